// ABOUTME: Validated types for image references and repository names.
// ABOUTME: Parsing is local and total; validation errors carry the offending input.

mod image_name;
mod parsed_image;

pub use image_name::{ImageName, ImageNameError};
pub use parsed_image::ParsedImage;
