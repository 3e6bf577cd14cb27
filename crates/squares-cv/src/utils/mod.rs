//! Utility modules

pub mod export;
pub mod image;

pub use self::export::export_json;
pub use self::image::{ImageUtils, LoadError};
