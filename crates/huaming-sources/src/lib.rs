//! huaming-sources — where the two dataset documents come from.
//!
//! A [`DatasetSource`] reads the base and metadata documents as raw JSON
//! text. [`load`] issues both reads together, waits for both, and hands the
//! text to [`huaming_core::loader`] for parsing. Nothing downstream starts
//! until both reads have settled.

use std::path::PathBuf;

use huaming_core::loader::{parse_base, parse_meta};
use huaming_core::{CatalogError, Dataset, Result};
use thiserror::Error;

/// The sample dataset compiled into the binary.
pub const EMBEDDED_BASE: &str = include_str!("../../../data/flowers.json");
pub const EMBEDDED_META: &str = include_str!("../../../data/flower_meta.json");

/// A read that failed before any parsing happened.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("{path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Trait implemented by each dataset source.
#[allow(async_fn_in_trait)]
pub trait DatasetSource {
    /// Short label for logs.
    fn name(&self) -> &str;
    async fn read_base(&self) -> std::result::Result<String, SourceError>;
    async fn read_meta(&self) -> std::result::Result<String, SourceError>;
}

/// How to treat a metadata document that cannot be read or parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MetaPolicy {
    /// Both documents must be present and valid.
    #[default]
    Required,
    /// Fall back to zero metadata, logging a warning.
    Lenient,
}

impl MetaPolicy {
    pub fn lenient(yes: bool) -> Self {
        if yes {
            MetaPolicy::Lenient
        } else {
            MetaPolicy::Required
        }
    }
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

/// Two JSON files on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    pub base_path: PathBuf,
    pub meta_path: PathBuf,
}

impl FileSource {
    pub fn new(base_path: impl Into<PathBuf>, meta_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            meta_path: meta_path.into(),
        }
    }
}

async fn read_file(path: &PathBuf) -> std::result::Result<String, SourceError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SourceError::Read {
            path: path.clone(),
            source,
        })
}

impl DatasetSource for FileSource {
    fn name(&self) -> &str {
        "file"
    }

    async fn read_base(&self) -> std::result::Result<String, SourceError> {
        read_file(&self.base_path).await
    }

    async fn read_meta(&self) -> std::result::Result<String, SourceError> {
        read_file(&self.meta_path).await
    }
}

/// Two in-memory documents; [`EmbeddedSource::sample`] is the bundled dataset.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedSource {
    base: &'static str,
    meta: &'static str,
}

impl EmbeddedSource {
    pub const fn new(base: &'static str, meta: &'static str) -> Self {
        Self { base, meta }
    }

    pub const fn sample() -> Self {
        Self::new(EMBEDDED_BASE, EMBEDDED_META)
    }
}

impl Default for EmbeddedSource {
    fn default() -> Self {
        Self::sample()
    }
}

impl DatasetSource for EmbeddedSource {
    fn name(&self) -> &str {
        "embedded"
    }

    async fn read_base(&self) -> std::result::Result<String, SourceError> {
        Ok(self.base.to_string())
    }

    async fn read_meta(&self) -> std::result::Result<String, SourceError> {
        Ok(self.meta.to_string())
    }
}

/// Runtime choice between the two sources.
#[derive(Debug, Clone)]
pub enum AnySource {
    File(FileSource),
    Embedded(EmbeddedSource),
}

impl DatasetSource for AnySource {
    fn name(&self) -> &str {
        match self {
            AnySource::File(s) => s.name(),
            AnySource::Embedded(s) => s.name(),
        }
    }

    async fn read_base(&self) -> std::result::Result<String, SourceError> {
        match self {
            AnySource::File(s) => s.read_base().await,
            AnySource::Embedded(s) => s.read_base().await,
        }
    }

    async fn read_meta(&self) -> std::result::Result<String, SourceError> {
        match self {
            AnySource::File(s) => s.read_meta().await,
            AnySource::Embedded(s) => s.read_meta().await,
        }
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Read both documents concurrently and parse them.
///
/// A base failure is always [`CatalogError::DatasetUnavailable`]. A metadata
/// failure is too under [`MetaPolicy::Required`]; under
/// [`MetaPolicy::Lenient`] it degrades to an empty metadata collection.
pub async fn load<S: DatasetSource>(source: &S, policy: MetaPolicy) -> Result<Dataset> {
    let (base, meta) = tokio::join!(source.read_base(), source.read_meta());

    let base = base.map_err(|e| CatalogError::unavailable("base records", e))?;
    let base = parse_base(&base)?;

    let metas = match meta
        .map_err(|e| CatalogError::unavailable("metadata records", e))
        .and_then(|text| parse_meta(&text))
    {
        Ok(metas) => metas,
        Err(err) if policy == MetaPolicy::Lenient => {
            tracing::warn!(%err, "metadata unavailable, continuing without it");
            Vec::new()
        }
        Err(err) => return Err(err),
    };

    tracing::info!(
        source = source.name(),
        base = base.len(),
        metas = metas.len(),
        "dataset loaded"
    );
    Ok(Dataset::new(base, metas))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = r#"[{"name":"牡丹","group":1,"tier":"国色"},{"name":"兰花","group":2,"tier":"雅品"}]"#;
    const META: &str = r#"[{"name":"兰花","meaning":"高洁","season":"春"}]"#;

    fn write_pair(dir: &tempfile::TempDir, base: &str, meta: Option<&str>) -> FileSource {
        let base_path = dir.path().join("flowers.json");
        let meta_path = dir.path().join("flower_meta.json");
        std::fs::write(&base_path, base).unwrap();
        if let Some(meta) = meta {
            std::fs::write(&meta_path, meta).unwrap();
        }
        FileSource::new(base_path, meta_path)
    }

    #[tokio::test]
    async fn file_source_loads_and_merges() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_pair(&dir, BASE, Some(META));
        let dataset = load(&source, MetaPolicy::Required).await.unwrap();
        let records = dataset.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].meaning, "高洁");
    }

    #[tokio::test]
    async fn missing_meta_is_fatal_when_required() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_pair(&dir, BASE, None);
        let err = load(&source, MetaPolicy::Required).await.unwrap_err();
        assert!(matches!(
            err,
            CatalogError::DatasetUnavailable { what: "metadata records", .. }
        ));
    }

    #[tokio::test]
    async fn missing_or_malformed_meta_degrades_when_lenient() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_pair(&dir, BASE, None);
        let dataset = load(&source, MetaPolicy::Lenient).await.unwrap();
        assert_eq!(dataset.base.len(), 2);
        assert!(dataset.metas.is_empty());

        let source = write_pair(&dir, BASE, Some("{oops"));
        let dataset = load(&source, MetaPolicy::Lenient).await.unwrap();
        assert!(dataset.records().iter().all(|r| !r.has_meta()));
    }

    #[tokio::test]
    async fn base_failure_is_always_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_pair(&dir, "not json", Some(META));
        let err = load(&source, MetaPolicy::Lenient).await.unwrap_err();
        assert!(matches!(
            err,
            CatalogError::DatasetUnavailable { what: "base records", .. }
        ));

        let source = FileSource::new(dir.path().join("absent.json"), dir.path().join("x.json"));
        assert!(load(&source, MetaPolicy::Lenient).await.is_err());
    }

    #[tokio::test]
    async fn embedded_sample_is_valid() {
        let dataset = load(&EmbeddedSource::sample(), MetaPolicy::Required)
            .await
            .unwrap();
        assert!(!dataset.base.is_empty());
        assert!(dataset.records().iter().any(|r| r.has_meta()));
    }

    #[tokio::test]
    async fn any_source_dispatches() {
        let source = AnySource::Embedded(EmbeddedSource::new(BASE, META));
        assert_eq!(source.name(), "embedded");
        let dataset = load(&source, MetaPolicy::Required).await.unwrap();
        assert_eq!(dataset.metas.len(), 1);
    }
}
