//! Template registry and rendering.
//!
//! Templates are loaded once at startup into an immutable [`TemplateRegistry`]
//! that is shared by every handler. Built-in templates are compiled into the
//! binary; a templates directory can override them or add new ones.
//!
//! Logical names map to `{name}.html` files:
//!
//! | Name | Data |
//! |---|---|
//! | `view` | [`PageView`] |
//! | `edit` | [`PageView`] |
//! | `not-found`, `bad-request`, `internal-error` | [`ErrorPayload`] |

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use jot_storage::Page;
use minijinja::Environment;
use serde::Serialize;

/// File extension of template sources.
const TEMPLATE_EXTENSION: &str = "html";

/// Templates compiled into the binary.
const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    ("view", include_str!("../templates/view.html")),
    ("edit", include_str!("../templates/edit.html")),
    ("not-found", include_str!("../templates/not-found.html")),
    ("bad-request", include_str!("../templates/bad-request.html")),
    ("internal-error", include_str!("../templates/internal-error.html")),
];

/// Template loading or rendering error.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Template lookup, syntax or execution error.
    #[error("{0}")]
    Template(#[from] minijinja::Error),

    /// Template source could not be read.
    #[error("Failed to read template {}: {source}", .path.display())]
    Io {
        /// Path of the template file or directory.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Page data exposed to the `view` and `edit` templates.
#[derive(Debug, Serialize)]
pub struct PageView<'a> {
    /// Page title.
    pub title: &'a str,
    /// Page body decoded as UTF-8.
    pub body: Cow<'a, str>,
    /// URL of the page's view route.
    pub view_path: String,
    /// URL of the page's edit route.
    pub edit_path: String,
    /// URL the edit form posts to.
    pub save_path: String,
}

impl<'a> From<&'a Page> for PageView<'a> {
    fn from(page: &'a Page) -> Self {
        Self {
            title: &page.title,
            body: page.body_text(),
            view_path: crate::handlers::page_url("view", &page.title),
            edit_path: crate::handlers::page_url("edit", &page.title),
            save_path: crate::handlers::page_url("save", &page.title),
        }
    }
}

/// Error data exposed to error templates.
#[derive(Debug, Serialize)]
pub struct ErrorPayload {
    /// Human-readable failure description.
    pub message: String,
}

/// Data handed to a template.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum TemplateData<'a> {
    /// A page for `view` or `edit`.
    Page(PageView<'a>),
    /// An error for an error page.
    Error(&'a ErrorPayload),
}

/// Produces response bodies from a logical template name and data.
pub trait Renderer: Send + Sync {
    /// Render the template registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if no such template exists or execution fails.
    fn render(&self, name: &str, data: &TemplateData<'_>) -> Result<String, RenderError>;
}

/// Immutable set of parsed templates backed by minijinja.
///
/// HTML auto-escaping applies to every template because all names end in
/// `.html`.
#[derive(Debug)]
pub struct TemplateRegistry {
    env: Environment<'static>,
}

impl TemplateRegistry {
    /// Create a registry holding only the built-in templates.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if a built-in template fails to parse.
    pub fn builtin() -> Result<Self, RenderError> {
        let mut registry = Self {
            env: Environment::new(),
        };
        for (name, source) in BUILTIN_TEMPLATES {
            registry.add_template(name, source)?;
        }
        Ok(registry)
    }

    /// Create a registry from the built-ins overlaid with `dir`, if given.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the directory cannot be read or a template
    /// in it fails to parse.
    pub fn load(dir: Option<&Path>) -> Result<Self, RenderError> {
        let mut registry = Self::builtin()?;
        if let Some(dir) = dir {
            let count = registry.add_dir(dir)?;
            tracing::info!(dir = %dir.display(), count, "Loaded templates");
        }
        Ok(registry)
    }

    /// Register (or replace) a template under a logical name.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Template`] if the source fails to parse.
    pub fn add_template(&mut self, name: &str, source: &str) -> Result<(), RenderError> {
        self.env
            .add_template_owned(format!("{name}.{TEMPLATE_EXTENSION}"), source.to_owned())?;
        Ok(())
    }

    /// Register every `*.html` file under `dir`, recursively.
    ///
    /// A file's logical name is its stem, so `errors/not-found.html` replaces
    /// the built-in `not-found` template.
    fn add_dir(&mut self, dir: &Path) -> Result<usize, RenderError> {
        let io_err = |source, path: &Path| RenderError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut count = 0;
        let mut pending = vec![dir.to_path_buf()];
        while let Some(current) = pending.pop() {
            let entries = fs::read_dir(&current).map_err(|e| io_err(e, &current))?;
            let mut paths: Vec<PathBuf> = entries
                .map(|entry| entry.map(|e| e.path()))
                .collect::<Result<_, _>>()
                .map_err(|e| io_err(e, &current))?;
            paths.sort();

            for path in paths {
                if path.is_dir() {
                    pending.push(path);
                    continue;
                }
                if !path.extension().is_some_and(|e| e == TEMPLATE_EXTENSION) {
                    continue;
                }
                let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                let source = fs::read_to_string(&path).map_err(|e| io_err(e, &path))?;
                self.add_template(name, &source)?;
                tracing::debug!(name, path = %path.display(), "Registered template");
                count += 1;
            }
        }
        Ok(count)
    }

    /// Logical names of all registered templates, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .env
            .templates()
            .filter_map(|(name, _)| name.strip_suffix(".html").map(str::to_owned))
            .collect();
        names.sort();
        names
    }
}

impl Renderer for TemplateRegistry {
    fn render(&self, name: &str, data: &TemplateData<'_>) -> Result<String, RenderError> {
        let template = self
            .env
            .get_template(&format!("{name}.{TEMPLATE_EXTENSION}"))?;
        Ok(template.render(data)?)
    }
}
