use thiserror::Error;

/// Error type for dataset loading, preference storage, and configuration.
///
/// An empty filter result is not an error; see
/// [`CatalogView::is_empty`](crate::view::CatalogView::is_empty).
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{what} unavailable: {reason}")]
    DatasetUnavailable { what: &'static str, reason: String },
    #[error("preference storage failure: {0}")]
    Storage(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] config::ConfigError),
}

impl CatalogError {
    pub fn unavailable(what: &'static str, reason: impl std::fmt::Display) -> Self {
        CatalogError::DatasetUnavailable {
            what,
            reason: reason.to_string(),
        }
    }

    /// The status line adapters show when loading fails.
    pub fn load_failure_text(&self) -> String {
        match self {
            CatalogError::DatasetUnavailable { reason, .. } => format!("加载失败：{reason}"),
            other => format!("加载失败：{other}"),
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
