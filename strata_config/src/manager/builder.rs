//! Builder assembling a [`ConfigManager`] from ordered sources.

use camino::{Utf8Path, Utf8PathBuf};

use crate::StrataResult;
use crate::document::ConfigDocument;
use crate::merge::{ResolvedConfig, fold_document};
use crate::resolver::resolve_active;
use crate::source::{ConfigSource, read_marker_file};

use super::ConfigManager;

/// Collects sources and overrides, then resolves them into a
/// [`ConfigManager`].
///
/// Sources fold in the order they are added; that order is the only
/// override-precedence mechanism between documents. All file reads happen in
/// [`ConfigManagerBuilder::build`], before the synchronous core runs.
///
/// # Examples
///
/// ```rust,no_run
/// use strata_config::ConfigManager;
///
/// # fn run() -> strata_config::StrataResult<()> {
/// let manager = ConfigManager::builder()
///     .base_dir("/etc/myapp")
///     .named("cfg.json")
///     .literal(r#"{"environments":{"prod":{"appSettings":{"x":"1"}}}}"#)
///     .marker_file("environment.txt")
///     .build()?;
/// assert!(manager.contains("appSettings"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ConfigManagerBuilder {
    sources: Vec<ConfigSource>,
    base_dir: Option<Utf8PathBuf>,
    explicit_environment: Option<String>,
    marker: Option<String>,
    marker_file: Option<Utf8PathBuf>,
}

impl ConfigManagerBuilder {
    /// Base directory against which named sources and a relative marker file
    /// resolve.
    #[must_use]
    pub fn base_dir(mut self, dir: impl Into<Utf8PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Append one source.
    #[must_use]
    pub fn source(mut self, source: impl Into<ConfigSource>) -> Self {
        self.sources.push(source.into());
        self
    }

    /// Append a literal JSON text source.
    #[must_use]
    pub fn literal(self, text: impl Into<String>) -> Self {
        self.source(ConfigSource::Literal(text.into()))
    }

    /// Append a filesystem path source.
    #[must_use]
    pub fn path(self, path: impl Into<Utf8PathBuf>) -> Self {
        self.source(ConfigSource::Path(path.into()))
    }

    /// Append a bare-filename source, resolved against the base directory.
    #[must_use]
    pub fn named(self, name: impl Into<String>) -> Self {
        self.source(ConfigSource::Named(name.into()))
    }

    /// Explicit active-environment override; takes precedence over markers
    /// and document nominations.
    #[must_use]
    pub fn explicit_environment(mut self, name: impl Into<String>) -> Self {
        self.explicit_environment = Some(name.into());
        self
    }

    /// Supply the external marker value directly (already retrieved).
    /// Wins over [`ConfigManagerBuilder::marker_file`].
    #[must_use]
    pub fn marker(mut self, content: impl Into<String>) -> Self {
        self.marker = Some(content.into());
        self
    }

    /// Read the external marker from a file (the conventional
    /// `environment.txt`). A missing file contributes no marker.
    #[must_use]
    pub fn marker_file(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.marker_file = Some(path.into());
        self
    }

    /// Read, parse, and fold every source in order, then resolve the active
    /// environment.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::StrataError`] values from source reads, document
    /// parsing, folding, and environment resolution, failing on the first.
    pub fn build(self) -> StrataResult<ConfigManager> {
        let mut resolved = ResolvedConfig::new();
        for (index, source) in self.sources.iter().enumerate() {
            let (origin, text) = source.read(self.base_dir.as_deref(), index)?;
            let document = ConfigDocument::parse(&origin, &text)?;
            fold_document(&mut resolved, document, &origin)?;
        }

        let marker = match self.marker {
            Some(content) => Some(content),
            None => self
                .marker_file
                .as_deref()
                .map(|path| read_marker_file(&self.resolve_marker_path(path)))
                .transpose()?
                .flatten(),
        };

        resolve_active(
            &mut resolved,
            self.explicit_environment.as_deref(),
            marker.as_deref(),
        )?;
        ConfigManager::from_resolved(resolved)
    }

    fn resolve_marker_path(&self, path: &Utf8Path) -> Utf8PathBuf {
        match &self.base_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_owned(),
        }
    }
}
