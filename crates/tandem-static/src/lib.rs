//! Static site builder for bilingual component-based sites.
//!
//! Takes a source tree of HTML pages, substitutes reusable components into
//! `{{name}}` placeholder markers (once per locale), resolves relative-path
//! placeholders, and writes a fully built site tree with no markers left.

pub mod assets;
pub mod builder;
pub mod cards;
pub mod expander;
pub mod resolver;

pub use builder::{BuildConfig, BuildError, BuildResult, SiteBuilder};
pub use expander::{ExpandError, Expander};
pub use resolver::{LocalePair, PathResolver, ResolveError};
