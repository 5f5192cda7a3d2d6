mod filters;
mod load;
mod meta;
mod transform;

pub use filters::{ImageFilters, apply_image_filters};
pub use load::{DecodedImage, decode_image_from_bytes, decode_image_from_path};
pub use meta::{ImageMeta, format_system_time, human_readable_bytes};
pub use transform::{apply_geometry, fit_within, oriented_size, to_rgba_image};
