//! Caller-supplied document sources.
//!
//! The resolution core itself performs no I/O; any file reads happen here,
//! while the builder assembles its inputs, before folding starts.

use camino::{Utf8Path, Utf8PathBuf};

use crate::{StrataError, StrataResult};

/// One ordered configuration source supplied to the builder.
#[derive(Debug, Clone)]
pub enum ConfigSource {
    /// Literal JSON text, already in memory.
    Literal(String),
    /// A filesystem path to a JSON document.
    Path(Utf8PathBuf),
    /// A bare filename resolved against the builder's base directory.
    Named(String),
}

impl ConfigSource {
    /// Resolve this source to an origin label and its JSON text.
    ///
    /// `index` is the zero-based position of the source in the builder,
    /// used to label inline documents in diagnostics.
    pub(crate) fn read(
        &self,
        base_dir: Option<&Utf8Path>,
        index: usize,
    ) -> StrataResult<(String, String)> {
        match self {
            Self::Literal(text) => Ok((format!("inline document #{}", index + 1), text.clone())),
            Self::Path(path) => read_document(path),
            Self::Named(name) => {
                let path = base_dir.map_or_else(|| Utf8PathBuf::from(name), |dir| dir.join(name));
                read_document(&path)
            }
        }
    }
}

impl From<&str> for ConfigSource {
    /// Treats the string as literal JSON text.
    fn from(text: &str) -> Self {
        Self::Literal(text.to_owned())
    }
}

impl From<Utf8PathBuf> for ConfigSource {
    fn from(path: Utf8PathBuf) -> Self {
        Self::Path(path)
    }
}

fn read_document(path: &Utf8Path) -> StrataResult<(String, String)> {
    let text = std::fs::read_to_string(path).map_err(|e| StrataError::io(path, e))?;
    Ok((path.to_string(), text))
}

/// Read an environment marker file, such as the conventional
/// `environment.txt` beside the deployed configuration.
///
/// Returns `Ok(None)` when the file does not exist; a deployment without a
/// marker simply falls back to document-nominated environments.
///
/// # Errors
///
/// Returns [`StrataError::Io`] when the file exists but cannot be read.
pub fn read_marker_file(path: &Utf8Path) -> StrataResult<Option<String>> {
    if !path.is_file() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path).map_err(|e| StrataError::io(path, e))?;
    Ok(Some(content))
}
