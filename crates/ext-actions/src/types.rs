use serde::{Deserialize, Serialize};

use crate::plugin::ImportError;

/// Wildcard entity used when an action is invoked without a narrower target
pub const ANY: &str = "*";

/// The project / language / store an action is invoked on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionTarget {
    pub project: String,
    pub language: String,
    pub store: String,
}

impl ActionTarget {
    pub fn new(
        project: impl Into<String>,
        language: impl Into<String>,
        store: impl Into<String>,
    ) -> Self {
        Self {
            project: project.into(),
            language: language.into(),
            store: store.into(),
        }
    }

    /// Target matching every project, language and store
    pub fn any() -> Self {
        Self::new(ANY, ANY, ANY)
    }
}

impl Default for ActionTarget {
    fn default() -> Self {
        Self::any()
    }
}

/// The three mutually exclusive ways an action can present its result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Presentation {
    /// Inline on the current page
    ShowOutput,
    /// On a fresh results page
    NewPage,
    /// As a link to a downloadable file
    ReturnFile,
}

impl std::fmt::Display for Presentation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Presentation::ShowOutput => write!(f, "showoutput"),
            Presentation::NewPage => write!(f, "newpage"),
            Presentation::ReturnFile => write!(f, "returnfile"),
        }
    }
}

/// Result stream produced by running an action
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionOutput {
    content: Vec<u8>,
    /// Suggested file name when the output is offered as a download
    pub file_name: Option<String>,
}

impl ActionOutput {
    pub fn new(content: impl Into<Vec<u8>>) -> Self {
        Self {
            content: content.into(),
            file_name: None,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.content
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

impl From<String> for ActionOutput {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for ActionOutput {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Plugin import error: {0}")]
    Import(#[from] ImportError),

    #[error("Invalid arguments: {0}")]
    Args(#[from] clap::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Action failed: {0}")]
    Action(String),
}
