//! Component representation.

use std::collections::HashMap;

/// A named, reusable markup fragment.
///
/// Content is treated as pre-formatted markup and is never re-escaped when
/// substituted into a page.
#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    /// A single fragment, rendered as-is.
    Leaf(String),

    /// Named subsections parsed from one compound file, addressed as
    /// `name.section`.
    Compound(HashMap<String, String>),
}

impl Component {
    /// Look up the content behind an optional subsection name.
    ///
    /// A leaf ignores no subsection; a compound requires one. Returns `None`
    /// when the shapes do not line up or the subsection does not exist.
    pub fn content(&self, section: Option<&str>) -> Option<&str> {
        match (self, section) {
            (Component::Leaf(body), None) => Some(body),
            (Component::Compound(sections), Some(name)) => {
                sections.get(name).map(String::as_str)
            }
            _ => None,
        }
    }

    /// Number of addressable sections (1 for a leaf).
    pub fn section_count(&self) -> usize {
        match self {
            Component::Leaf(_) => 1,
            Component::Compound(sections) => sections.len(),
        }
    }
}
