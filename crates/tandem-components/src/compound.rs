//! Compound component parsing.
//!
//! A compound file packs several named sections into one component file:
//!
//! ```text
//! :^) title :::
//! <h1>Interviews</h1>
//! :^) footer :::
//! <footer>...</footer>
//! ```
//!
//! The opening delimiter is the opening token followed by one space at the
//! very start of a line; the closing delimiter is one space followed by the
//! closing token. A file is compound if and only if it starts with the
//! opening delimiter at offset 0.

use std::collections::HashMap;

use crate::component::Component;

/// Delimiter tokens for the compound component grammar.
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundSyntax {
    /// Token that opens a section header (a single space follows it in source)
    pub opening: String,

    /// Token that closes a section header (a single space precedes it in source)
    pub closing: String,
}

impl Default for CompoundSyntax {
    fn default() -> Self {
        Self {
            opening: ":^)".to_string(),
            closing: ":::".to_string(),
        }
    }
}

impl CompoundSyntax {
    /// Whether a component source encodes multiple named sections.
    pub fn is_compound(&self, source: &str) -> bool {
        source.starts_with(&self.opening_marker())
    }

    fn opening_marker(&self) -> String {
        format!("{} ", self.opening)
    }

    fn closing_marker(&self) -> String {
        format!(" {}", self.closing)
    }
}

/// Errors that can occur when parsing a compound component.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Compound section {fragment:?} is missing its closing delimiter")]
    MalformedSection { fragment: String },
}

/// Parse a component source file into a leaf or compound component.
///
/// Anything that does not start with the opening delimiter is a leaf and is
/// kept verbatim. Compound sections keep whichever line terminator the file
/// itself uses.
pub fn parse_component(source: &str, syntax: &CompoundSyntax) -> Result<Component, ParseError> {
    if !syntax.is_compound(source) {
        return Ok(Component::Leaf(source.to_string()));
    }

    let opening = syntax.opening_marker();
    let closing = syntax.closing_marker();
    let eol = if source.contains("\r\n") { "\r\n" } else { "\n" };

    let section_separator = format!("{eol}{opening}");
    let header_end = format!("{closing}{eol}");

    // The first fragment still carries the opening delimiter.
    let body = &source[opening.len()..];

    let mut sections = HashMap::new();
    for fragment in body.split(section_separator.as_str()) {
        let Some((name, content)) = fragment.split_once(header_end.as_str()) else {
            return Err(ParseError::MalformedSection {
                fragment: fragment.lines().next().unwrap_or("").to_string(),
            });
        };
        sections.insert(name.to_string(), content.to_string());
    }

    Ok(Component::Compound(sections))
}
