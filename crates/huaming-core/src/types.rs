//! Core types for huaming-core.
//!
//! This module defines the wire shapes of the two dataset documents
//! ([`BaseRecord`], [`MetaRecord`]) and the typed, merged [`Record`] every
//! pipeline stage works on. Defaulting happens once, in
//! [`crate::loader::merge`]; nothing downstream deals with missing fields.

use serde::{Deserialize, Serialize};

/// Group key used when a record carries no group number.
pub const UNKNOWN_GROUP: &str = "未知";

/// One entry of `flowers.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseRecord {
    pub name: String,
    #[serde(default)]
    pub group: Option<u32>,
    #[serde(default)]
    pub tier: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub page_url: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

impl BaseRecord {
    pub fn new(name: impl Into<String>, group: u32, tier: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            group: Some(group),
            tier: Some(tier.into()),
            image_url: None,
            page_url: None,
            source: None,
        }
    }
}

/// One entry of `flower_meta.json`. Every field except `name` may be absent
/// or `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub alias: Option<Vec<String>>,
    #[serde(default)]
    pub meaning: Option<String>,
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub pinyin: Option<String>,
    #[serde(default)]
    pub pinyin_initials: Option<String>,
}

/// A catalog entry after merging its base record with its metadata.
///
/// `name` is the identity and is unique within one load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub name: String,
    pub group: Option<u32>,
    /// Empty when the base record has no tier.
    pub tier: String,
    pub image_url: Option<String>,
    pub alias: Vec<String>,
    pub meaning: String,
    pub season: String,
    pub pinyin: String,
    pub pinyin_initials: String,
}

impl Record {
    /// The string every grouping and group-selector comparison uses.
    pub fn group_key(&self) -> String {
        self.group
            .map(|g| g.to_string())
            .unwrap_or_else(|| UNKNOWN_GROUP.to_string())
    }

    /// Whether any optional metadata field is populated.
    pub fn has_meta(&self) -> bool {
        self.has_alias() || self.has_meaning() || self.has_season()
    }

    pub fn has_alias(&self) -> bool {
        !self.alias.is_empty()
    }

    pub fn has_meaning(&self) -> bool {
        !self.meaning.trim().is_empty()
    }

    pub fn has_season(&self) -> bool {
        !self.season.trim().is_empty()
    }

    pub fn has_image(&self) -> bool {
        self.image_url.as_deref().is_some_and(|u| !u.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
