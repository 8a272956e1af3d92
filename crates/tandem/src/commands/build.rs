//! Site build command.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;

use tandem_components::CompoundSyntax;
use tandem_static::{BuildConfig, LocalePair, SiteBuilder};

/// Configuration file structure (site.toml).
#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    site: SiteSection,
    #[serde(default)]
    locales: LocalesSection,
    #[serde(default)]
    syntax: SyntaxSection,
    #[serde(default)]
    build: BuildSection,
}

#[derive(Debug, Deserialize)]
struct SiteSection {
    #[serde(default = "default_source")]
    source: String,
    #[serde(default = "default_output")]
    output: String,
    #[serde(default = "default_components")]
    components: String,
}

#[derive(Debug, Deserialize)]
struct LocalesSection {
    #[serde(default = "default_first_locale")]
    first: String,
    #[serde(default = "default_second_locale")]
    second: String,
}

#[derive(Debug, Deserialize)]
struct SyntaxSection {
    #[serde(default = "default_opening")]
    opening: String,
    #[serde(default = "default_closing")]
    closing: String,
}

#[derive(Debug, Deserialize)]
struct BuildSection {
    #[serde(default = "default_minify")]
    minify: bool,
}

fn default_source() -> String {
    "source".to_string()
}
fn default_output() -> String {
    "build".to_string()
}
fn default_components() -> String {
    "components".to_string()
}
fn default_first_locale() -> String {
    "en".to_string()
}
fn default_second_locale() -> String {
    "sk".to_string()
}
fn default_opening() -> String {
    ":^)".to_string()
}
fn default_closing() -> String {
    ":::".to_string()
}
fn default_minify() -> bool {
    true
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            source: default_source(),
            output: default_output(),
            components: default_components(),
        }
    }
}

impl Default for LocalesSection {
    fn default() -> Self {
        Self {
            first: default_first_locale(),
            second: default_second_locale(),
        }
    }
}

impl Default for SyntaxSection {
    fn default() -> Self {
        Self {
            opening: default_opening(),
            closing: default_closing(),
        }
    }
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            minify: default_minify(),
        }
    }
}

/// Load configuration from site.toml if it exists.
/// Returns an error if the config file exists but is malformed.
fn load_config(path: &Path) -> Result<ConfigFile> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        let config: ConfigFile = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;
        tracing::info!("Loaded config from {}", path.display());
        return Ok(config);
    }
    Ok(ConfigFile::default())
}

/// Run the build command.
pub fn run(config_path: &Path, output: Option<PathBuf>, minify: Option<bool>) -> Result<()> {
    tracing::info!("Building site...");

    let file_config = load_config(config_path)?;

    let config = BuildConfig {
        source_dir: PathBuf::from(&file_config.site.source),
        output_dir: output.unwrap_or_else(|| PathBuf::from(&file_config.site.output)),
        components_dir: PathBuf::from(&file_config.site.components),
        locales: LocalePair {
            first: file_config.locales.first,
            second: file_config.locales.second,
        },
        syntax: CompoundSyntax {
            opening: file_config.syntax.opening,
            closing: file_config.syntax.closing,
        },
        minify: minify.unwrap_or(file_config.build.minify),
    };

    let result = SiteBuilder::new(config).build()?;

    tracing::info!(
        "Built {} page variants and {} assets in {}ms",
        result.pages,
        result.assets,
        result.duration_ms
    );
    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
