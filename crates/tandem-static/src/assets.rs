//! CSS asset pipeline.

/// Stylesheet composition and minification utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Join stylesheet sources into one file body.
    pub fn compose_css(sources: &[String]) -> String {
        sources.join("\n")
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }
}
