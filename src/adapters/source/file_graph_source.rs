//! Filesystem graph source.

use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;

use crate::domain::questionnaire::QuestionDefinition;
use crate::ports::{GraphSource, GraphSourceError};

use super::{parse_definitions, DocumentFormat};

/// Reads a graph document from a local file.
///
/// Files ending in `.yaml` / `.yml` are decoded as YAML, everything else as
/// JSON.
#[derive(Debug, Clone)]
pub struct FileGraphSource {
    path: PathBuf,
}

impl FileGraphSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn format(&self) -> DocumentFormat {
        DocumentFormat::from_location(&self.path.to_string_lossy())
    }
}

#[async_trait]
impl GraphSource for FileGraphSource {
    async fn load(&self) -> Result<Vec<QuestionDefinition>, GraphSourceError> {
        let text = fs::read_to_string(&self.path)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => {
                    GraphSourceError::NotFound(self.path.display().to_string())
                }
                _ => GraphSourceError::Io(format!("{}: {}", self.path.display(), e)),
            })?;

        parse_definitions(&text, self.format())
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}
