//! Plain-text rendering of an outline as an indented tree.

use crate::model::Outline;

/// Render the title followed by one indented line per heading.
pub fn outline_to_text(outline: &Outline) -> String {
    let mut out = String::new();
    out.push_str(&outline.title);
    out.push('\n');

    for entry in &outline.headings {
        let indent = "  ".repeat(entry.level.depth() as usize);
        out.push_str(&format!(
            "{}{} {} (p. {})\n",
            indent, entry.level, entry.text, entry.page
        ));
    }

    out
}
