//! Read-only views of the live markup.
//!
//! Everything here takes an owned copy of the markup and returns a fresh
//! value; nothing writes back to the surface.

mod sanitize;
mod segments;

pub use sanitize::{SanitizeOptions, sanitize};
pub use segments::{Segment, TagRef, to_html, to_json, to_plain_text, to_segments};
