use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter, Serializer};
use crate::{error::Result, types::AnnotationRecord};

/// Indentation used for every written annotation file
pub const LABELME_INDENT: &[u8] = b"    ";

/// Pretty formatter that writes every non-ASCII character as a `\uXXXX`
/// escape (UTF-16 surrogate pairs above the BMP), so output is pure ASCII.
pub struct AsciiPrettyFormatter<'a> {
    inner: PrettyFormatter<'a>,
}

impl<'a> AsciiPrettyFormatter<'a> {
    pub fn with_indent(indent: &'a [u8]) -> Self {
        Self { inner: PrettyFormatter::with_indent(indent) }
    }
}

impl Formatter for AsciiPrettyFormatter<'_> {
    fn begin_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_array(writer)
    }

    fn end_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object(writer)
    }

    fn end_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.inner.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object_value(writer)
    }

    fn write_string_fragment<W: ?Sized + Write>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()> {
        if fragment.is_ascii() {
            return writer.write_all(fragment.as_bytes());
        }

        let mut units = [0u16; 2];
        for ch in fragment.chars() {
            if ch.is_ascii() {
                writer.write_all(&[ch as u8])?;
            } else {
                for unit in ch.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        Ok(())
    }
}

impl AnnotationRecord {
    /// Serialize to ASCII-only LabelMe JSON bytes with 4-space indentation
    pub fn to_labelme_vec(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let formatter = AsciiPrettyFormatter::with_indent(LABELME_INDENT);
        let mut serializer = Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)?;
        Ok(buf)
    }

    /// Serialize to a LabelMe JSON string with 4-space indentation
    pub fn to_labelme_string(&self) -> Result<String> {
        Ok(String::from_utf8(self.to_labelme_vec()?)?)
    }

    /// Save LabelMe JSON to file
    pub fn save_labelme<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_labelme_vec()?)?;
        Ok(())
    }

    /// Load a record from a LabelMe JSON string
    pub fn from_labelme_string(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load a record from a LabelMe JSON file
    pub fn from_labelme_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_labelme_string(&content)
    }
}
