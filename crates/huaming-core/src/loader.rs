//! Loader — parses the two dataset documents and merges them by name.
//!
//! Obtaining the raw text is the job of `huaming-sources`; this module only
//! deals with already-read JSON.

use std::collections::HashMap;

use crate::error::{CatalogError, Result};
use crate::types::{BaseRecord, MetaRecord, Record};

/// The two raw collections, as read from a source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    pub base: Vec<BaseRecord>,
    pub metas: Vec<MetaRecord>,
}

impl Dataset {
    pub fn new(base: Vec<BaseRecord>, metas: Vec<MetaRecord>) -> Self {
        Self { base, metas }
    }

    /// Parse both documents. Either failing is a dataset-unavailable error.
    pub fn from_json(base: &str, metas: &str) -> Result<Self> {
        Ok(Self {
            base: parse_base(base)?,
            metas: parse_meta(metas)?,
        })
    }

    /// Merge every base record with its metadata, in base order.
    pub fn records(&self) -> Vec<Record> {
        merge(&self.base, &self.metas)
    }
}

pub fn parse_base(text: &str) -> Result<Vec<BaseRecord>> {
    serde_json::from_str(text).map_err(|e| CatalogError::unavailable("base records", e))
}

pub fn parse_meta(text: &str) -> Result<Vec<MetaRecord>> {
    serde_json::from_str(text).map_err(|e| CatalogError::unavailable("metadata records", e))
}

/// Merge base records with metadata by exact name equality.
///
/// Duplicate metadata names overwrite earlier entries (last one wins); every
/// overwrite is logged. Metadata with an empty name is ignored.
pub fn merge(base: &[BaseRecord], metas: &[MetaRecord]) -> Vec<Record> {
    let index = index_meta(metas);
    let merged: Vec<Record> = base
        .iter()
        .map(|b| merge_record(b, index.get(b.name.as_str()).copied()))
        .collect();
    tracing::debug!(
        base = base.len(),
        metas = metas.len(),
        merged = merged.len(),
        "merged dataset"
    );
    merged
}

/// Merge exactly one record by name. Used by the detail view.
pub fn merge_one(base: &[BaseRecord], metas: &[MetaRecord], name: &str) -> Option<Record> {
    if name.is_empty() {
        return None;
    }
    let b = base.iter().find(|b| b.name == name)?;
    let meta = metas.iter().rev().find(|m| m.name == name);
    Some(merge_record(b, meta))
}

fn index_meta(metas: &[MetaRecord]) -> HashMap<&str, &MetaRecord> {
    let mut index: HashMap<&str, &MetaRecord> = HashMap::with_capacity(metas.len());
    for meta in metas.iter().filter(|m| !m.name.is_empty()) {
        if index.insert(meta.name.as_str(), meta).is_some() {
            tracing::warn!(name = %meta.name, "duplicate metadata entry, keeping the last one");
        }
    }
    index
}

fn merge_record(base: &BaseRecord, meta: Option<&MetaRecord>) -> Record {
    Record {
        name: base.name.clone(),
        group: base.group,
        tier: base.tier.clone().unwrap_or_default(),
        image_url: base.image_url.clone(),
        alias: meta.and_then(|m| m.alias.clone()).unwrap_or_default(),
        meaning: meta.and_then(|m| m.meaning.clone()).unwrap_or_default(),
        season: meta.and_then(|m| m.season.clone()).unwrap_or_default(),
        pinyin: meta.and_then(|m| m.pinyin.clone()).unwrap_or_default(),
        pinyin_initials: meta
            .and_then(|m| m.pinyin_initials.clone())
            .unwrap_or_default(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn meta(name: &str, meaning: &str) -> MetaRecord {
        MetaRecord {
            name: name.to_string(),
            meaning: Some(meaning.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn merge_preserves_base_order_and_defaults_missing_meta() {
        let base = vec![
            BaseRecord::new("牡丹", 1, "国色"),
            BaseRecord::new("芍药", 1, "国色"),
            BaseRecord::new("兰花", 2, "雅品"),
        ];
        let metas = vec![meta("兰花", "高洁"), meta("牡丹", "富贵")];

        let merged = merge(&base, &metas);
        let names: Vec<&str> = merged.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["牡丹", "芍药", "兰花"]);
        assert_eq!(merged[0].meaning, "富贵");
        assert_eq!(merged[1].meaning, "");
        assert!(merged[1].alias.is_empty());
        assert_eq!(merged[1].pinyin, "");
    }

    #[test]
    fn duplicate_meta_last_one_wins() {
        let base = vec![BaseRecord::new("梅花", 1, "国色")];
        let metas = vec![meta("梅花", "first"), meta("梅花", "second")];
        assert_eq!(merge(&base, &metas)[0].meaning, "second");
        assert_eq!(merge_one(&base, &metas, "梅花").unwrap().meaning, "second");
    }

    #[test]
    fn empty_meta_collection_degrades_to_defaults() {
        let base = vec![BaseRecord::new("菊花", 3, "雅品")];
        let merged = merge(&base, &[]);
        assert_eq!(merged.len(), 1);
        assert!(!merged[0].has_meta());
    }

    #[test]
    fn merge_one_unknown_or_empty_name() {
        let base = vec![BaseRecord::new("菊花", 3, "雅品")];
        assert!(merge_one(&base, &[], "").is_none());
        assert!(merge_one(&base, &[], "荷花").is_none());
        assert_eq!(merge_one(&base, &[], "菊花").unwrap().tier, "雅品");
    }

    #[test]
    fn malformed_json_is_dataset_unavailable() {
        let err = Dataset::from_json("not json", "[]").unwrap_err();
        assert!(matches!(
            err,
            CatalogError::DatasetUnavailable { what: "base records", .. }
        ));
    }
}
