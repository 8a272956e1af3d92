//! Relative-path placeholder resolution.
//!
//! After component expansion a page may still contain path placeholders
//! that depend on where the file lands in the output tree:
//!
//! - `{fill_parents}` — `"../"` repeats climbing back to the build root
//! - `{fill_parents_html}` — the same, against the `html/` root
//! - `{language_src}` — relative link to the same page in the other locale
//!
//! These are plain string transforms with no dictionary lookups, and they
//! must run after expansion because expanded component content can
//! introduce new occurrences of them.

use std::path::Path;

const FILL_PARENTS: &str = "{fill_parents}";
const FILL_PARENTS_HTML: &str = "{fill_parents_html}";
const LANGUAGE_SRC: &str = "{language_src}";

/// The two fixed locales a site is built for.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalePair {
    pub first: String,
    pub second: String,
}

impl Default for LocalePair {
    fn default() -> Self {
        Self {
            first: "en".to_string(),
            second: "sk".to_string(),
        }
    }
}

impl LocalePair {
    pub fn as_array(&self) -> [&str; 2] {
        [&self.first, &self.second]
    }
}

/// Errors that can occur while resolving path placeholders.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("Cannot resolve {{language_src}} in {path}: no locale folder in the path")]
    UnresolvedLanguageSrc { path: String },
}

/// Rewrites path placeholders based on a file's destination path.
#[derive(Debug, Clone)]
pub struct PathResolver {
    locales: LocalePair,
    build_root: String,
    html_root: String,
}

impl PathResolver {
    /// Resolver with the default root segment names `build` and `html`.
    pub fn new(locales: LocalePair) -> Self {
        Self {
            locales,
            build_root: "build".to_string(),
            html_root: "html".to_string(),
        }
    }

    /// Override the root segment `{fill_parents}` climbs back to.
    pub fn with_build_root(mut self, root: impl Into<String>) -> Self {
        self.build_root = root.into();
        self
    }

    /// Resolve every path placeholder in already-expanded page text.
    pub fn resolve(&self, destination: &Path, text: &str) -> Result<String, ResolveError> {
        let mut result = self.fill_parents(destination, text);

        if result.contains(LANGUAGE_SRC) {
            let link = self.language_link(destination)?;
            result = result.replace(LANGUAGE_SRC, &link);
        }

        Ok(result)
    }

    /// Replace both parent-folder markers with their `"../"` prefixes.
    ///
    /// The depth is a property of the destination path alone, so one value
    /// serves every occurrence within a file.
    fn fill_parents(&self, destination: &Path, text: &str) -> String {
        let from_build = parent_prefix(segments_below(destination, &self.build_root).len());
        let from_html = parent_prefix(segments_below(destination, &self.html_root).len());

        text.replace(FILL_PARENTS_HTML, &from_html)
            .replace(FILL_PARENTS, &from_build)
    }

    /// Relative link to the sibling file in the other locale's subtree.
    fn language_link(&self, destination: &Path) -> Result<String, ResolveError> {
        let tail_segments = segments_below(destination, &self.html_root);
        if tail_segments.is_empty() {
            return Err(ResolveError::UnresolvedLanguageSrc {
                path: destination.display().to_string(),
            });
        }

        let tail = tail_segments.join("/");
        let [first, second] = self.locales.as_array();
        let first_dir = format!("{first}/");
        let second_dir = format!("{second}/");

        // Swap whichever locale folder appears first for the other one.
        let swapped = if tail.contains(&first_dir) {
            tail.replacen(&first_dir, &second_dir, 1)
        } else if tail.contains(&second_dir) {
            tail.replacen(&second_dir, &first_dir, 1)
        } else {
            return Err(ResolveError::UnresolvedLanguageSrc {
                path: destination.display().to_string(),
            });
        };

        Ok(format!("{}{}", parent_prefix(tail_segments.len()), swapped))
    }
}

/// Path segments after the first segment named `root`, file name included.
/// An absent root segment yields no segments at all.
fn segments_below(path: &Path, root: &str) -> Vec<String> {
    let mut below = false;
    let mut segments = Vec::new();

    for component in path.components() {
        let part = component.as_os_str().to_string_lossy();
        if below {
            segments.push(part.into_owned());
        } else if part == root {
            below = true;
        }
    }

    segments
}

/// `"../"` repeated `depth - 1` times; zero depth resolves to nothing.
fn parent_prefix(depth: usize) -> String {
    "../".repeat(depth.saturating_sub(1))
}
