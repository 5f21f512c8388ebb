//! Turning a detection list into an annotated image: a pure planning pass
//! (threshold filter, pixel-space geometry, label text) and a drawing pass
//! that composites the plan onto a copy of the base image.

mod overlay;
pub mod palette;

pub use overlay::{plan, Annotation, Overlay, RenderError};
pub use palette::PaletteRangeError;
