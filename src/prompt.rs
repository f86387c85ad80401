//! Prompt engineering for logo concepts.
//!
//! User text is embedded verbatim between single quotes. Nothing is escaped
//! or stripped before it reaches the synthesis service.

use crate::models::{GenerationRequest, LogoStyle};

/// Directive phrases appended to every prompt, in order.
pub const DIRECTIVES: [&str; 3] = [
    "The logo should be on a clean, white background, suitable for branding.",
    "Avoid realistic 3D rendering. The logo must be simple, memorable, and professional.",
    "Do not include any text unless it's an abstract part of the logo.",
];

pub const PREAMBLE: &str = "A modern, clean, vector logo for a company.";

pub fn build_logo_prompt(description: &str, style: LogoStyle, palette: &str) -> String {
    format!(
        "{} The company is: '{}'. The logo style should be: '{}'. Use the color palette: '{}'. {}",
        PREAMBLE,
        description,
        style.label(),
        palette,
        DIRECTIVES.join(" ")
    )
}

impl GenerationRequest {
    pub fn prompt(&self) -> String {
        build_logo_prompt(self.description(), self.style(), self.palette())
    }
}
