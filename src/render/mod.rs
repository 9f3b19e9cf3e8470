//! Output rendering for outlines and reports.

mod json;
mod text;

pub use json::{to_json, JsonFormat};
pub use text::outline_to_text;
