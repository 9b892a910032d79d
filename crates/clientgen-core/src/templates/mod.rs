//! Template loading for the generated TypeScript artifacts.
//!
//! The built-in templates are compiled into the library. A template directory may
//! replace any of them by providing a file with the same name.

use std::path::{Path, PathBuf};

use tera::{Context, Tera};
use tokio::fs;

use crate::Error;

/// Environment variable naming a template override directory
pub const TEMPLATE_DIR_ENV: &str = "CLIENTGEN_TEMPLATE_DIR";

/// The templates an artifact can be rendered from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactTemplate {
    /// Global-types artifact
    Types,
    /// One tag group
    Group,
    /// Request capability contract
    Request,
}

impl ArtifactTemplate {
    pub const ALL: [Self; 3] = [Self::Types, Self::Group, Self::Request];

    /// File name of the template, also its name inside Tera
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Types => "types.ts.tera",
            Self::Group => "group.ts.tera",
            Self::Request => "request.ts.tera",
        }
    }

    fn builtin(&self) -> &'static str {
        match self {
            Self::Types => include_str!("../../templates/typescript/types.ts.tera"),
            Self::Group => include_str!("../../templates/typescript/group.ts.tera"),
            Self::Request => include_str!("../../templates/typescript/request.ts.tera"),
        }
    }
}

/// The compiled templates of one generation run
#[derive(Debug, Clone)]
pub struct TemplateSet {
    tera: Tera,
}

impl TemplateSet {
    /// Templates shipped with the library
    pub fn builtin() -> crate::Result<Self> {
        let mut tera = Tera::default();
        for template in ArtifactTemplate::ALL {
            tera.add_raw_template(template.file_name(), template.builtin())?;
        }
        Ok(Self { tera })
    }

    /// Built-in templates with any files found in `dir` taking their place
    pub async fn with_overrides(dir: Option<&TemplateDir>) -> crate::Result<Self> {
        let mut set = Self::builtin()?;
        let Some(dir) = dir else {
            return Ok(set);
        };

        for template in ArtifactTemplate::ALL {
            let path = dir.path().join(template.file_name());
            if !path.is_file() {
                continue;
            }
            let source = fs::read_to_string(&path).await?;
            set.tera
                .add_raw_template(template.file_name(), &source)
                .map_err(|e| Error::template(format!("{}: {}", path.display(), e)))?;
            log::debug!("using template override {}", path.display());
        }
        Ok(set)
    }

    pub fn render(&self, template: ArtifactTemplate, context: &Context) -> crate::Result<String> {
        Ok(self.tera.render(template.file_name(), context)?)
    }
}

/// A directory holding template overrides
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDir {
    path: PathBuf,
}

impl TemplateDir {
    /// Resolve the override directory.
    ///
    /// An explicit directory must exist. Without one, `CLIENTGEN_TEMPLATE_DIR` and then
    /// `~/.clientgen/templates` are tried; finding neither means no overrides.
    pub fn discover(custom_dir: Option<&Path>) -> crate::Result<Option<Self>> {
        if let Some(dir) = custom_dir {
            if !dir.is_dir() {
                return Err(Error::template(format!(
                    "Template directory not found: {}",
                    dir.display()
                )));
            }
            return Ok(Some(Self::new(dir)));
        }

        if let Ok(dir) = std::env::var(TEMPLATE_DIR_ENV) {
            let path = PathBuf::from(dir);
            if path.is_dir() {
                return Ok(Some(Self { path }));
            }
            log::warn!(
                "{TEMPLATE_DIR_ENV} points at {}, which is not a directory",
                path.display()
            );
        }

        if let Some(home_dir) = dirs::home_dir() {
            let path = home_dir.join(".clientgen").join("templates");
            if path.is_dir() {
                return Ok(Some(Self { path }));
            }
        }

        Ok(None)
    }

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
