use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Closed boundary of one foreground region as integer `[x, y]` pixel coordinates
pub type Contour = Vec<[i32; 2]>;

/// Version tag written into every record
pub const LABELME_VERSION: &str = "LabelMe";

/// The only class a mask can carry
pub const PORE_LABEL: &str = "pore";

/// Per-image annotation in the LabelMe layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[schemars(description = "LabelMe annotation record for one mask image")]
pub struct AnnotationRecord {
    #[schemars(description = "Annotation format tag")]
    pub version: String,
    #[serde(rename = "imagePath")]
    #[schemars(description = "File name of the source image")]
    pub image_path: String,
    #[serde(rename = "imageData")]
    #[schemars(description = "Embedded image bytes, never populated")]
    pub image_data: Option<String>,
    #[serde(rename = "imageHeight")]
    pub image_height: u32,
    #[serde(rename = "imageWidth")]
    pub image_width: u32,
    pub flags: BTreeMap<String, bool>,
    #[schemars(description = "Polygons in contour discovery order")]
    pub shapes: Vec<Shape>,
}

impl AnnotationRecord {
    /// Create an empty record for an image of the given size
    pub fn new(image_path: impl Into<String>, image_width: u32, image_height: u32) -> Self {
        Self {
            version: LABELME_VERSION.to_string(),
            image_path: image_path.into(),
            image_data: None,
            image_height,
            image_width,
            flags: BTreeMap::new(),
            shapes: Vec::new(),
        }
    }

    /// JSON schema of the record layout
    pub fn schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(AnnotationRecord)
    }

    /// Total number of polygon vertices across all shapes
    pub fn vertex_count(&self) -> usize {
        self.shapes.iter().map(|s| s.points.len()).sum()
    }
}

/// One labelled polygon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[schemars(description = "A single pore polygon")]
pub struct Shape {
    pub label: String,
    #[schemars(description = "Polygon vertices as [x, y] pixel pairs")]
    pub points: Vec<[i32; 2]>,
    #[schemars(description = "1-based contour index within the image; gaps mark dropped contours")]
    pub group_id: Option<u32>,
    pub description: String,
    pub shape_type: ShapeType,
    pub flags: BTreeMap<String, bool>,
}

impl Shape {
    pub fn pore(points: Vec<[i32; 2]>, group_id: u32) -> Self {
        Self {
            label: PORE_LABEL.to_string(),
            points,
            group_id: Some(group_id),
            description: String::new(),
            shape_type: ShapeType::Polygon,
            flags: BTreeMap::new(),
        }
    }

    /// Get the bounding box of the polygon as `(min, max)` corners
    pub fn bounding_box(&self) -> ([i32; 2], [i32; 2]) {
        let mut min = [i32::MAX, i32::MAX];
        let mut max = [i32::MIN, i32::MIN];

        for &[x, y] in &self.points {
            min[0] = min[0].min(x);
            min[1] = min[1].min(y);
            max[0] = max[0].max(x);
            max[1] = max[1].max(y);
        }

        (min, max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ShapeType {
    Polygon,
}
