pub mod labelme;

pub use labelme::*;
