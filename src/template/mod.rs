//! Page templates with `{{ name }}` placeholders.
//!
//! Templates are plain files read from a directory on every invocation.
//! Only variable substitution is supported; unknown variables render empty
//! and values are inserted verbatim.

use crate::error::{TemplateError, TemplateResult};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

static PLACEHOLDER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}")
        .expect("Failed to compile placeholder regex")
});

/// Variables available to a template while rendering.
pub type Context = HashMap<String, String>;

/// Loads templates from a single directory.
#[derive(Debug, Clone)]
pub struct TemplateLoader {
    dir: PathBuf,
}

impl TemplateLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Read `name` from the template directory.
    ///
    /// Names must be relative and stay inside the directory.
    pub fn get_template(&self, name: &str) -> TemplateResult<Template> {
        let relative = Path::new(name);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if name.is_empty() || escapes {
            return Err(TemplateError::InvalidName(name.to_string()));
        }

        let path = self.dir.join(relative);
        let source = std::fs::read_to_string(&path).map_err(|source| TemplateError::Io {
            path: path.display().to_string(),
            source,
        })?;

        tracing::debug!("Loaded template {}", path.display());
        Ok(Template::new(name, source))
    }
}

/// A loaded template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    name: String,
    source: String,
}

impl Template {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Substitute every placeholder with its value from `context`.
    pub fn render(&self, context: &Context) -> String {
        PLACEHOLDER_REGEX
            .replace_all(&self.source, |caps: &Captures| {
                context.get(&caps[1]).cloned().unwrap_or_default()
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn context(pairs: &[(&str, &str)]) -> Context {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_render_substitutes_variables() {
        let template = Template::new(
            "index.html",
            "<h1>{{ dynamic_value }}</h1><p>{{timestamp}}</p>",
        );
        let html = template.render(&context(&[
            ("dynamic_value", "hello"),
            ("timestamp", "2024-05-01T12:00:00.000000"),
        ]));

        assert_eq!(html, "<h1>hello</h1><p>2024-05-01T12:00:00.000000</p>");
    }

    #[test]
    fn test_render_unknown_variable_is_empty() {
        let template = Template::new("t", "a{{ missing }}b");
        assert_eq!(template.render(&Context::new()), "ab");
    }

    #[test]
    fn test_render_leaves_non_placeholders_alone() {
        let template = Template::new("t", "{ x } {{ 1bad }} {{value}}");
        let html = template.render(&context(&[("value", "$1 <b>")]));
        assert_eq!(html, "{ x } {{ 1bad }} $1 <b>");
    }

    #[test]
    fn test_loader_reads_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("index.html"), "<p>{{ dynamic_value }}</p>").unwrap();

        let loader = TemplateLoader::new(dir.path());
        let template = loader.get_template("index.html").unwrap();

        assert_eq!(template.name(), "index.html");
        assert_eq!(
            template.render(&context(&[("dynamic_value", "x")])),
            "<p>x</p>"
        );
    }

    #[test]
    fn test_loader_missing_file() {
        let dir = TempDir::new().unwrap();
        let loader = TemplateLoader::new(dir.path());

        match loader.get_template("index.html") {
            Err(TemplateError::Io { path, .. }) => assert!(path.ends_with("index.html")),
            other => panic!("Expected Io error, got: {:?}", other),
        }
    }

    #[test]
    fn test_loader_rejects_escaping_names() {
        let loader = TemplateLoader::new("/var/task/templates");

        for name in ["../secrets", "/etc/passwd", ""] {
            assert!(matches!(
                loader.get_template(name),
                Err(TemplateError::InvalidName(_))
            ));
        }
    }
}
