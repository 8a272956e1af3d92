//! Locale-scoped component dictionaries.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::component::Component;
use crate::compound::{parse_component, CompoundSyntax, ParseError};

/// Errors that can occur while loading a component dictionary.
///
/// Any failure aborts the whole load; a partially populated dictionary is
/// never returned.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read component {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse component {}: {source}", .path.display())]
    Parse { path: PathBuf, source: ParseError },
}

/// Mapping from component name to parsed component, built fresh per locale
/// per build run.
#[derive(Debug, Clone, Default)]
pub struct ComponentDictionary {
    entries: HashMap<String, Component>,
}

impl ComponentDictionary {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the components for one locale.
    ///
    /// Scans `.html` files at the top of the shared root first, then the
    /// locale subfolder. A locale component overrides a shared component of
    /// the same name. A missing directory simply contributes nothing.
    pub fn load(root: &Path, locale: &str, syntax: &CompoundSyntax) -> Result<Self, LoadError> {
        let mut dictionary = Self::new();
        dictionary.scan(root, syntax)?;
        dictionary.scan(&root.join(locale), syntax)?;

        tracing::debug!(
            "Loaded {} components for locale {} from {}",
            dictionary.len(),
            locale,
            root.display()
        );

        Ok(dictionary)
    }

    fn scan(&mut self, dir: &Path, syntax: &CompoundSyntax) -> Result<(), LoadError> {
        if !dir.is_dir() {
            return Ok(());
        }

        // Deterministic order so the override rule is scan order, not
        // readdir order.
        let mut paths: Vec<PathBuf> = WalkDir::new(dir)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file())
            .filter(|e| e.path().extension().and_then(|x| x.to_str()) == Some("html"))
            .map(|e| e.into_path())
            .collect();
        paths.sort();

        for path in paths {
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let source = fs::read_to_string(&path).map_err(|e| LoadError::Read {
                path: path.clone(),
                source: e,
            })?;

            let component = parse_component(&source, syntax).map_err(|e| LoadError::Parse {
                path: path.clone(),
                source: e,
            })?;

            self.insert(name, component);
        }

        Ok(())
    }

    /// Register a component, replacing any existing entry of the same name.
    pub fn insert(&mut self, name: &str, component: Component) {
        self.entries.insert(name.to_string(), component);
    }

    /// Look up a component by name.
    pub fn get(&self, name: &str) -> Option<&Component> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn loads_shared_and_locale_components() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("en")).unwrap();
        fs::write(root.join("nav.html"), "<nav></nav>").unwrap();
        fs::write(root.join("en").join("greeting.html"), "<p>Hello</p>").unwrap();

        let dictionary =
            ComponentDictionary::load(root, "en", &CompoundSyntax::default()).unwrap();

        assert_eq!(dictionary.len(), 2);
        assert_eq!(
            dictionary.get("nav"),
            Some(&Component::Leaf("<nav></nav>".to_string()))
        );
        assert_eq!(
            dictionary.get("greeting"),
            Some(&Component::Leaf("<p>Hello</p>".to_string()))
        );
    }

    #[test]
    fn locale_component_overrides_shared_component() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("sk")).unwrap();
        fs::write(root.join("greeting.html"), "<p>shared</p>").unwrap();
        fs::write(root.join("sk").join("greeting.html"), "<p>Ahoj</p>").unwrap();

        let dictionary =
            ComponentDictionary::load(root, "sk", &CompoundSyntax::default()).unwrap();

        assert_eq!(
            dictionary.get("greeting"),
            Some(&Component::Leaf("<p>Ahoj</p>".to_string()))
        );
    }

    #[test]
    fn other_locale_folder_is_not_scanned() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("en")).unwrap();
        fs::create_dir_all(root.join("sk")).unwrap();
        fs::write(root.join("en").join("only_en.html"), "en").unwrap();
        fs::write(root.join("sk").join("only_sk.html"), "sk").unwrap();

        let dictionary =
            ComponentDictionary::load(root, "en", &CompoundSyntax::default()).unwrap();

        assert!(dictionary.get("only_en").is_some());
        assert!(dictionary.get("only_sk").is_none());
    }

    #[test]
    fn missing_directories_yield_an_empty_dictionary() {
        let temp = tempdir().unwrap();

        let dictionary = ComponentDictionary::load(
            &temp.path().join("does-not-exist"),
            "en",
            &CompoundSyntax::default(),
        )
        .unwrap();

        assert!(dictionary.is_empty());
    }

    #[test]
    fn compound_files_load_with_their_sections() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        fs::write(
            root.join("layout.html"),
            ":^) head :::\n<head></head>\n:^) foot :::\n<footer></footer>",
        )
        .unwrap();

        let dictionary =
            ComponentDictionary::load(root, "en", &CompoundSyntax::default()).unwrap();

        let layout = dictionary.get("layout").unwrap();
        assert_eq!(layout.content(Some("head")), Some("<head></head>"));
        assert_eq!(layout.content(Some("foot")), Some("<footer></footer>"));
    }

    #[test]
    fn malformed_compound_aborts_the_load() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        fs::write(root.join("bad.html"), ":^) head\nno closing here").unwrap();

        let result = ComponentDictionary::load(root, "en", &CompoundSyntax::default());

        assert!(matches!(result, Err(LoadError::Parse { .. })));
    }
}
