//! Site build orchestration.
//!
//! One build run: load a component dictionary per locale, bootstrap the
//! output tree, compose stylesheets, then walk the source tree building
//! every HTML page once per locale and copying everything else once. The
//! whole run is sequential and aborts on the first unrecoverable error.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use walkdir::WalkDir;

use tandem_components::{Component, ComponentDictionary, CompoundSyntax, LoadError};

use crate::assets::AssetPipeline;
use crate::cards::{self, CardError};
use crate::expander::{ExpandError, Expander};
use crate::resolver::{LocalePair, PathResolver, ResolveError};

/// Name of the locale-partitioned subtree in both source and output.
const HTML_DIR: &str = "html";

/// Name of the stylesheet folder that gets composed into one file.
const CSS_DIR: &str = "css";

/// Configuration for building a site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Source tree of pages and assets
    pub source_dir: PathBuf,

    /// Output directory; its name is also the root segment for
    /// `{fill_parents}` depth arithmetic
    pub output_dir: PathBuf,

    /// Root of the component files (shared ones at the top, one subfolder
    /// per locale)
    pub components_dir: PathBuf,

    /// The two locales every HTML page is built for
    pub locales: LocalePair,

    /// Delimiter tokens of the compound component grammar
    pub syntax: CompoundSyntax,

    /// Minify the composed stylesheet
    pub minify: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("source"),
            output_dir: PathBuf::from("build"),
            components_dir: PathBuf::from("components"),
            locales: LocalePair::default(),
            syntax: CompoundSyntax::default(),
            minify: true,
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of page variants written (each page counts once per locale)
    pub pages: usize,

    /// Number of assets written or copied
    pub assets: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during a build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Source directory not found: {}", .0.display())]
    MissingSourceDir(PathBuf),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Card(#[from] CardError),

    #[error("Failed to expand {}: {source}", .path.display())]
    Expand { path: PathBuf, source: ExpandError },

    #[error("Failed to resolve links in {}: {source}", .path.display())]
    Resolve { path: PathBuf, source: ResolveError },

    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Builds a bilingual site out of a source tree and component dictionaries.
pub struct SiteBuilder {
    config: BuildConfig,
    expander: Expander,
    resolver: PathResolver,
}

impl SiteBuilder {
    pub fn new(config: BuildConfig) -> Self {
        let build_root = config
            .output_dir
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("build")
            .to_string();

        let resolver = PathResolver::new(config.locales.clone()).with_build_root(build_root);

        Self {
            config,
            expander: Expander::new(),
            resolver,
        }
    }

    /// Run one full build.
    pub fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        if !self.config.source_dir.is_dir() {
            return Err(BuildError::MissingSourceDir(self.config.source_dir.clone()));
        }

        let dictionaries = self.load_dictionaries()?;
        self.prepare_output_tree()?;
        let composed = self.compose_css()?;
        let (pages, copied) = self.build_files(&dictionaries)?;

        Ok(BuildResult {
            pages,
            assets: composed + copied,
            duration_ms: start.elapsed().as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// One dictionary per locale: shared components layered under the
    /// locale's own, plus the synthesized card components.
    fn load_dictionaries(&self) -> Result<Vec<(String, ComponentDictionary)>, BuildError> {
        let mut dictionaries = Vec::new();

        for locale in self.config.locales.as_array() {
            let mut dictionary = ComponentDictionary::load(
                &self.config.components_dir,
                locale,
                &self.config.syntax,
            )?;
            self.add_card_components(locale, &mut dictionary)?;

            tracing::info!("Loaded {} components for locale {}", dictionary.len(), locale);
            dictionaries.push((locale.to_string(), dictionary));
        }

        Ok(dictionaries)
    }

    /// Register `interview_cards` and `interview_navigation` rendered from
    /// the locale's JSON data. A locale without card data gets neither.
    fn add_card_components(
        &self,
        locale: &str,
        dictionary: &mut ComponentDictionary,
    ) -> Result<(), BuildError> {
        let data_path = self
            .config
            .components_dir
            .join(locale)
            .join("interview_cards.json");
        if !data_path.is_file() {
            return Ok(());
        }

        let cards = cards::load_cards(&data_path)?;
        dictionary.insert(
            "interview_cards",
            Component::Leaf(cards::render_card_deck(&cards, &self.config.source_dir)),
        );
        dictionary.insert(
            "interview_navigation",
            Component::Leaf(cards::render_card_navigation(&cards)),
        );

        tracing::info!("Generated card components for locale {} ({} cards)", locale, cards.len());
        Ok(())
    }

    /// Mirror the source folder structure into the output directory.
    /// Folders under `html/` exist once per locale, everything else once.
    fn prepare_output_tree(&self) -> Result<(), BuildError> {
        let html_root = self.config.output_dir.join(HTML_DIR);
        for locale in self.config.locales.as_array() {
            create_dir(&html_root.join(locale))?;
        }

        for entry in WalkDir::new(&self.config.source_dir)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.path().is_dir() {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(&self.config.source_dir)
                .unwrap_or(entry.path());
            if relative.as_os_str().is_empty() {
                continue;
            }

            match relative.strip_prefix(HTML_DIR) {
                Ok(tail) => {
                    for locale in self.config.locales.as_array() {
                        create_dir(&html_root.join(locale).join(tail))?;
                    }
                }
                Err(_) => create_dir(&self.config.output_dir.join(relative))?,
            }
        }

        Ok(())
    }

    /// Concatenate `css/*.css` from the source tree into one stylesheet.
    fn compose_css(&self) -> Result<usize, BuildError> {
        let css_dir = self.config.source_dir.join(CSS_DIR);
        if !css_dir.is_dir() {
            return Ok(0);
        }

        let mut paths: Vec<PathBuf> = fs::read_dir(&css_dir)
            .map_err(|e| io_error(&css_dir, e))?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().and_then(|x| x.to_str()) == Some("css"))
            .collect();
        paths.sort();

        if paths.is_empty() {
            return Ok(0);
        }

        let mut sources = Vec::new();
        for path in &paths {
            sources.push(fs::read_to_string(path).map_err(|e| io_error(path, e))?);
        }

        let mut css = AssetPipeline::compose_css(&sources);
        if self.config.minify {
            match AssetPipeline::minify_css(&css) {
                Ok(minified) => css = minified,
                Err(e) => tracing::warn!("Skipping CSS minification: {}", e),
            }
        }

        let out_path = self.config.output_dir.join(CSS_DIR).join("style.css");
        if let Some(parent) = out_path.parent() {
            create_dir(parent)?;
        }
        fs::write(&out_path, css).map_err(|e| io_error(&out_path, e))?;

        tracing::info!("Composed {} stylesheets into {}", paths.len(), out_path.display());
        Ok(1)
    }

    /// Walk the source tree: HTML pages under `html/` build once per
    /// locale, HTML outside it builds once, stylesheets are skipped (they
    /// were composed already), everything else copies verbatim.
    fn build_files(
        &self,
        dictionaries: &[(String, ComponentDictionary)],
    ) -> Result<(usize, usize), BuildError> {
        let mut pages = 0;
        let mut copied = 0;

        for entry in WalkDir::new(&self.config.source_dir)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(&self.config.source_dir).unwrap_or(path);
            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

            match ext {
                "html" => {
                    let text = fs::read_to_string(path).map_err(|e| io_error(path, e))?;

                    if let Ok(tail) = relative.strip_prefix(HTML_DIR) {
                        for (locale, dictionary) in dictionaries {
                            let destination = self
                                .config
                                .output_dir
                                .join(HTML_DIR)
                                .join(locale)
                                .join(tail);
                            self.write_page(path, &text, &destination, dictionary)?;
                            pages += 1;
                        }
                    } else {
                        // HTML outside the locale subtree is shared and
                        // builds once, against the first locale's dictionary.
                        let (_, dictionary) = &dictionaries[0];
                        let destination = self.config.output_dir.join(relative);
                        self.write_page(path, &text, &destination, dictionary)?;
                        pages += 1;
                    }
                }
                "css" => {
                    tracing::debug!("Skipped stylesheet {}", path.display());
                }
                _ => {
                    let destination = self.config.output_dir.join(relative);
                    if let Some(parent) = destination.parent() {
                        create_dir(parent)?;
                    }
                    fs::copy(path, &destination).map_err(|e| io_error(&destination, e))?;
                    copied += 1;
                }
            }
        }

        Ok((pages, copied))
    }

    /// Expand and resolve one page, then write it in a single shot.
    /// Rendering completes in memory first so a failure never leaves a
    /// partially written file behind.
    fn write_page(
        &self,
        source_path: &Path,
        text: &str,
        destination: &Path,
        dictionary: &ComponentDictionary,
    ) -> Result<(), BuildError> {
        let expanded = self
            .expander
            .expand(text, dictionary)
            .map_err(|e| BuildError::Expand {
                path: source_path.to_path_buf(),
                source: e,
            })?;

        let resolved = self
            .resolver
            .resolve(destination, &expanded)
            .map_err(|e| BuildError::Resolve {
                path: destination.to_path_buf(),
                source: e,
            })?;

        if let Some(parent) = destination.parent() {
            create_dir(parent)?;
        }
        fs::write(destination, resolved).map_err(|e| io_error(destination, e))?;

        tracing::debug!("Built {}", destination.display());
        Ok(())
    }
}

fn create_dir(path: &Path) -> Result<(), BuildError> {
    fs::create_dir_all(path).map_err(|e| io_error(path, e))
}

fn io_error(path: &Path, source: std::io::Error) -> BuildError {
    BuildError::Io {
        path: path.to_path_buf(),
        source,
    }
}
