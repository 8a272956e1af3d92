//! Component file parsing for tandem sites.
//!
//! This crate loads reusable markup fragments ("components") from disk and
//! builds locale-scoped dictionaries out of them. A component file is either
//! a single opaque fragment or a compound file encoding several named
//! sections through a delimiter grammar.

pub mod component;
pub mod compound;
pub mod dictionary;

pub use component::Component;
pub use compound::{parse_component, CompoundSyntax, ParseError};
pub use dictionary::{ComponentDictionary, LoadError};
