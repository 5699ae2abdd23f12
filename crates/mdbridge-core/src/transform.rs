//! Content transform seam
//!
//! The engine only needs "convert this text for the other side"; the markup
//! rules themselves live in `mdbridge-convert`.

use mdbridge_convert::Direction;

/// Converts document text between dialects.
pub trait Transform {
    fn transform(&self, content: &str, direction: Direction) -> String;
}

/// The Hugo/Obsidian markup converter.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkupTransform;

impl Transform for MarkupTransform {
    fn transform(&self, content: &str, direction: Direction) -> String {
        mdbridge_convert::convert(content, direction)
    }
}

impl<F> Transform for F
where
    F: Fn(&str, Direction) -> String,
{
    fn transform(&self, content: &str, direction: Direction) -> String {
        self(content, direction)
    }
}
