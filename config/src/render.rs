//! # TypeScript Export
//!
//! Renders the site configuration as the `SITE` constant module the site
//! generator imports (`src/config.ts`).

use std::fmt::Write as _;
use std::path::Path;

use errors::ConfigError;
use serde_json::Value;
use tracing::info;

use crate::site::SiteConfig;

const GENERATED_HEADER: &str = "// Generated by sitectl. Edit site.toml and run `sitectl config render` instead.";

/// Render `config` as a TypeScript module exporting `SITE`.
///
/// Keys keep their camelCase names and declaration order. Strings are
/// emitted as JSON string literals, which are valid TypeScript.
pub fn to_typescript(config: &SiteConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{GENERATED_HEADER}");
    out.push_str("export const SITE = {\n");

    entry(&mut out, 1, "website", &quote(&config.website));
    entry(&mut out, 1, "author", &quote(&config.author));
    entry(&mut out, 1, "profile", &quote(&config.profile));
    entry(&mut out, 1, "desc", &quote(&config.desc));
    entry(&mut out, 1, "title", &quote(&config.title));
    if let Some(og_image) = &config.og_image {
        entry(&mut out, 1, "ogImage", &quote(og_image));
    }
    entry(&mut out, 1, "lightAndDarkMode", &config.light_and_dark_mode.to_string());
    entry(&mut out, 1, "postPerIndex", &config.post_per_index.to_string());
    entry(&mut out, 1, "postPerPage", &config.post_per_page.to_string());
    entry(&mut out, 1, "scheduledPostMargin", &config.scheduled_post_margin.to_string());
    entry(&mut out, 1, "showArchives", &config.show_archives.to_string());
    entry(&mut out, 1, "showBackButton", &config.show_back_button.to_string());

    out.push_str("  editPost: {\n");
    entry(&mut out, 2, "enabled", &config.edit_post.enabled.to_string());
    entry(&mut out, 2, "text", &quote(&config.edit_post.text));
    entry(&mut out, 2, "url", &quote(&config.edit_post.url));
    out.push_str("  },\n");

    entry(&mut out, 1, "dynamicOgImage", &config.dynamic_og_image.to_string());
    entry(&mut out, 1, "dir", &quote(config.dir.as_ref()));
    entry(&mut out, 1, "lang", &quote(&config.lang));
    entry(&mut out, 1, "timezone", &quote(&config.timezone));

    out.push_str("} as const;\n");
    out
}

/// Write the TypeScript module to `path`, creating parent directories.
pub fn write_typescript(config: &SiteConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, to_typescript(config))?;
    info!("Wrote site configuration module to {}", path.display());
    Ok(())
}

fn entry(out: &mut String, depth: usize, key: &str, value: &str) {
    let _ = writeln!(out, "{}{key}: {value},", "  ".repeat(depth));
}

fn quote(value: &str) -> String {
    Value::String(value.to_owned()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::TextDirection;
    use tempfile::TempDir;

    #[test]
    fn test_render_default_site() {
        let ts = to_typescript(&SiteConfig::default());
        assert!(ts.starts_with("// Generated by sitectl"));
        assert!(ts.contains("export const SITE = {\n"));
        assert!(ts.contains("  website: \"https://www.yunchujiao.com/\",\n"));
        assert!(ts.contains("  author: \"云触角（重庆）科技有限公司\",\n"));
        assert!(ts.contains("  ogImage: \"yunchujiao-og.jpg\",\n"));
        assert!(ts.contains("  postPerIndex: 3,\n"));
        assert!(ts.contains("  scheduledPostMargin: 900000,\n"));
        assert!(ts.contains("  editPost: {\n    enabled: false,\n    text: \"\",\n    url: \"\",\n  },\n"));
        assert!(ts.contains("  dir: \"ltr\",\n"));
        assert!(ts.contains("  timezone: \"Asia/Shanghai\",\n"));
        assert!(ts.ends_with("} as const;\n"));
    }

    #[test]
    fn test_render_preserves_key_order() {
        let ts = to_typescript(&SiteConfig::default());
        let website = ts.find("website:").unwrap();
        let edit_post = ts.find("editPost:").unwrap();
        let timezone = ts.find("timezone:").unwrap();
        assert!(website < edit_post && edit_post < timezone);
    }

    #[test]
    fn test_render_escapes_strings() {
        let mut site = SiteConfig::default();
        site.title = "Quotes \"and\" \\ backslashes\nnewline".to_string();
        let ts = to_typescript(&site);
        assert!(ts.contains(r#"  title: "Quotes \"and\" \\ backslashes\nnewline","#));
    }

    #[test]
    fn test_render_omits_missing_og_image() {
        let mut site = SiteConfig::default();
        site.og_image = None;
        site.dir = TextDirection::Rtl;
        let ts = to_typescript(&site);
        assert!(!ts.contains("ogImage"));
        assert!(ts.contains("  dir: \"rtl\",\n"));
    }

    #[test]
    fn test_write_typescript_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("src").join("config.ts");
        write_typescript(&SiteConfig::default(), &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, to_typescript(&SiteConfig::default()));
    }
}
