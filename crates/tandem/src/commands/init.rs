//! Initialize a site skeleton in the current directory.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub fn run(yes: bool) -> Result<()> {
    tracing::info!("Initializing tandem site...");

    // Create default config
    let config_path = Path::new("site.toml");
    if !config_path.exists() || yes {
        fs::write(config_path, DEFAULT_CONFIG).context("Failed to write site.toml")?;
        tracing::info!("Created site.toml");
    }

    // Source tree: one page under the locale-partitioned html/ subtree
    let index_path = Path::new("source/html/index.html");
    fs::create_dir_all("source/html").context("Failed to create source directory")?;
    if !index_path.exists() || yes {
        fs::write(index_path, DEFAULT_INDEX).context("Failed to write index.html")?;
        tracing::info!("Created source/html/index.html");
    }

    let css_path = Path::new("source/css/main.css");
    fs::create_dir_all("source/css").context("Failed to create css directory")?;
    if !css_path.exists() || yes {
        fs::write(css_path, DEFAULT_CSS).context("Failed to write main.css")?;
        tracing::info!("Created source/css/main.css");
    }

    // Components: shared at the top, one folder per locale
    for dir in ["components", "components/en", "components/sk"] {
        fs::create_dir_all(dir).context("Failed to create components directory")?;
    }

    let examples = [
        ("components/header.html", DEFAULT_HEADER),
        ("components/en/greeting.html", DEFAULT_GREETING_EN),
        ("components/sk/greeting.html", DEFAULT_GREETING_SK),
        ("components/en/language_name.html", "Slovensky"),
        ("components/sk/language_name.html", "English"),
    ];
    for (path, content) in examples {
        let path = Path::new(path);
        if !path.exists() || yes {
            fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Created {}", path.display());
        }
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'tandem build' to build the site into build/.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# Tandem Configuration

[site]
# Source tree of pages and assets
source = "source"

# Output directory for the built site
output = "build"

# Component files (shared at the top, en/ and sk/ per locale)
components = "components"

[locales]
# Every page under source/html/ is built once per locale
first = "en"
second = "sk"

[syntax]
# Compound component delimiter tokens
opening = ":^)"
closing = ":::"

[build]
# Minify the composed stylesheet
minify = true
"#;

const DEFAULT_INDEX: &str = r#"<!DOCTYPE html>
<html>
<head>
	<meta charset="utf-8">
	<link rel="stylesheet" href="{fill_parents}css/style.css">
</head>
<body>
	{{header}}
	{{greeting}}
	<a href="{language_src}">{{language_name}}</a>
</body>
</html>
"#;

const DEFAULT_HEADER: &str = "<header>\n\t<h1>My Site</h1>\n</header>\n";

const DEFAULT_GREETING_EN: &str = "<p>Welcome!</p>\n";

const DEFAULT_GREETING_SK: &str = "<p>Vitajte!</p>\n";

const DEFAULT_CSS: &str = r#"body {
	font-family: sans-serif;
	margin: 2rem auto;
	max-width: 40rem;
}
"#;
