use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use log::info;

use crate::config::Config;
use crate::parser::markdown_to_node;

/// Extract the page title from the document's first level-1 heading.
pub fn extract_title(markdown: &str) -> Result<String> {
    for line in markdown.lines() {
        let line = line.trim();
        if let Some(title) = line.strip_prefix("# ") {
            return Ok(title.trim().to_string());
        }
    }
    bail!("no level-1 heading found for page title");
}

/// Build the whole site rooted at `root`: wipe and repopulate the output
/// directory with static assets, then render every Markdown page through
/// the template.
pub fn build(root: &Path, config: &Config) -> Result<()> {
    let output = root.join(&config.paths.output);

    let static_dir = root.join(&config.paths.static_dir);
    if static_dir.is_dir() {
        copy_static(&static_dir, &output)?;
    } else {
        if output.exists() {
            fs::remove_dir_all(&output)
                .with_context(|| format!("removing {}", output.display()))?;
        }
        fs::create_dir_all(&output)?;
    }

    let template_path = root.join(&config.paths.template);
    let template = fs::read_to_string(&template_path)
        .with_context(|| format!("reading template {}", template_path.display()))?;

    generate_pages(
        &root.join(&config.paths.content),
        &template,
        &output,
        &config.site.base_path,
    )
}

/// Recursively copy static assets into a freshly created destination,
/// removing any stale output first.
pub fn copy_static(source: &Path, dest: &Path) -> Result<()> {
    if dest.exists() {
        fs::remove_dir_all(dest).with_context(|| format!("removing {}", dest.display()))?;
    }
    fs::create_dir_all(dest).with_context(|| format!("creating {}", dest.display()))?;

    let entries =
        fs::read_dir(source).with_context(|| format!("reading {}", source.display()))?;
    for entry in entries {
        let entry = entry?;
        let target = dest.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_static(&entry.path(), &target)?;
        } else {
            info!("copying {} to {}", entry.path().display(), target.display());
            fs::copy(entry.path(), &target)
                .with_context(|| format!("copying {}", entry.path().display()))?;
        }
    }
    Ok(())
}

/// Walk the content tree and render every `.md` file to a matching `.html`
/// path under the output directory.
pub fn generate_pages(content: &Path, template: &str, output: &Path, base_path: &str) -> Result<()> {
    let entries =
        fs::read_dir(content).with_context(|| format!("reading {}", content.display()))?;
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            generate_pages(&path, template, &output.join(entry.file_name()), base_path)?;
        } else if path.extension().is_some_and(|ext| ext == "md") {
            let dest = output.join(entry.file_name()).with_extension("html");
            generate_page(&path, template, &dest, base_path)?;
        }
    }
    Ok(())
}

/// Render one Markdown file through the HTML template, substituting the
/// `{{ Title }}` and `{{ Content }}` placeholders and rewriting
/// root-relative asset references to the base path.
pub fn generate_page(source: &Path, template: &str, dest: &Path, base_path: &str) -> Result<()> {
    info!("generating {} from {}", dest.display(), source.display());

    let markdown = fs::read_to_string(source)
        .with_context(|| format!("reading {}", source.display()))?;

    let content = markdown_to_node(&markdown)
        .with_context(|| format!("converting {}", source.display()))?
        .to_html();
    let title = extract_title(&markdown)
        .with_context(|| format!("extracting title from {}", source.display()))?;

    let html = template
        .replace("{{ Title }}", &title)
        .replace("{{ Content }}", &content);
    let html = rewrite_base_path(&html, base_path);

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    fs::write(dest, html).with_context(|| format!("writing {}", dest.display()))?;
    Ok(())
}

/// Point root-relative `href`/`src` references at the configured base path.
fn rewrite_base_path(html: &str, base_path: &str) -> String {
    if base_path == "/" {
        return html.to_string();
    }
    html.replace("href=\"/", &format!("href=\"{base_path}"))
        .replace("src=\"/", &format!("src=\"{base_path}"))
}
