//! Image processing pipeline components.
//!
//! - **discovery**: Walk the source tree and filter by extension
//! - **decode**: Load and decode images, sniffing the codec from content
//! - **crop**: Midpoint-anchored crop regions as borrowed sub-views
//! - **thumbnail**: Encode the cropped view and write it out
//! - **processor**: Orchestrates the full pipeline

pub mod crop;
pub mod decode;
pub mod discovery;
pub mod processor;
pub mod thumbnail;

// Re-exports for convenient access
pub use crop::{CropRegion, Cropper};
pub use decode::{DecodedImage, ImageDecoder};
pub use discovery::{DiscoveredFile, FileDiscovery};
pub use processor::ImageProcessor;
pub use thumbnail::{ThumbnailEncoder, ThumbnailFormat};
