//! Document extraction: style subsets, block classification and slide segmentation.
//!
//! The stages only read the parsed tree (an arena with index-based parent links), so
//! ancestor queries such as list nesting are plain upward walks.

mod classify;
mod segment;
mod style;

pub use classify::{classify_element, collect_blocks};
pub use segment::{parse_slides, segment_document};
pub use style::extract_style;
