//! View assembly — one pass of filter → group/sort → highlight, producing
//! everything an adapter needs to render the list.
//!
//! A [`CatalogView`] is ephemeral: adapters rebuild it after every
//! [`Selection`] change and never keep it across changes.

use serde::Serialize;

use crate::filter;
use crate::group::{self, Partition};
use crate::highlight::{Highlighter, Segment};
use crate::selection::Selection;
use crate::types::Record;

pub const PLACEHOLDER: &str = "待补充";
pub const UNNAMED: &str = "未命名";
pub const UNKNOWN_TIER: &str = "未知等级";
pub const IMAGE_READY: &str = "图片已准备";
pub const IMAGE_MISSING: &str = "图片待补充";

/// Aliases joined for display, or `None` when there are none.
pub fn alias_text(record: &Record) -> Option<String> {
    record.has_alias().then(|| record.alias.join(" / "))
}

/// The text as stored, or `None` when it is blank once trimmed.
pub fn non_blank(text: &str) -> Option<&str> {
    (!text.trim().is_empty()).then_some(text)
}

pub fn tier_label(tier: &str) -> &str {
    non_blank(tier).unwrap_or(UNKNOWN_TIER)
}

pub fn image_note(record: &Record) -> &'static str {
    if record.has_image() {
        IMAGE_READY
    } else {
        IMAGE_MISSING
    }
}

// ---------------------------------------------------------------------------
// Decorated records and groups
// ---------------------------------------------------------------------------

/// A record plus its highlighted display fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecoratedRecord<'r> {
    pub record: &'r Record,
    pub name: Vec<Segment>,
    pub alias: Vec<Segment>,
    pub meaning: Vec<Segment>,
    pub season: Vec<Segment>,
    pub image_note: &'static str,
    pub has_meta: bool,
}

impl<'r> DecoratedRecord<'r> {
    pub fn new(record: &'r Record, hl: &Highlighter) -> Self {
        Self {
            record,
            name: decorate(non_blank(&record.name), UNNAMED, hl),
            alias: decorate(alias_text(record).as_deref(), PLACEHOLDER, hl),
            meaning: decorate(non_blank(&record.meaning), PLACEHOLDER, hl),
            season: decorate(non_blank(&record.season), PLACEHOLDER, hl),
            image_note: image_note(record),
            has_meta: record.has_meta(),
        }
    }
}

// Placeholders are never highlighted.
fn decorate(text: Option<&str>, placeholder: &str, hl: &Highlighter) -> Vec<Segment> {
    match text {
        Some(text) => hl.highlight(text),
        None => vec![Segment::plain(placeholder)],
    }
}

/// One rendered group: key, tier label of its first member, members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayGroup<'r> {
    pub key: String,
    pub tier: String,
    pub records: Vec<DecoratedRecord<'r>>,
}

impl<'r> DisplayGroup<'r> {
    fn from_partition(partition: Partition<'r>, hl: &Highlighter) -> Self {
        Self {
            key: partition.key,
            tier: tier_label(&partition.tier).to_string(),
            records: partition
                .records
                .into_iter()
                .map(|r| DecoratedRecord::new(r, hl))
                .collect(),
        }
    }

    pub fn title(&self) -> String {
        format!("{} · {}", group_title(&self.key), self.tier)
    }
}

/// `第 N 组`, or the key itself for the unknown group.
pub fn group_title(key: &str) -> String {
    if key.parse::<u64>().is_ok() {
        format!("第 {key} 组")
    } else {
        key.to_string()
    }
}

// ---------------------------------------------------------------------------
// Metadata progress
// ---------------------------------------------------------------------------

/// Completeness over the full merged set, independent of the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetaProgress {
    pub filled: usize,
    pub total: usize,
}

impl MetaProgress {
    pub fn of(records: &[Record]) -> Self {
        Self {
            filled: records.iter().filter(|r| r.has_meta()).count(),
            total: records.len(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.total - self.filled
    }

    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.filled as f64 / self.total as f64
        }
    }

    pub fn text(&self) -> String {
        format!("元信息完成度：{}/{}", self.filled, self.total)
    }

    pub fn detail_text(&self) -> String {
        format!("已补充：{}，待补充：{}", self.filled, self.remaining())
    }
}

// ---------------------------------------------------------------------------
// CatalogView
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogView<'r> {
    pub total: usize,
    pub filtered: usize,
    pub groups: Vec<DisplayGroup<'r>>,
    pub progress: MetaProgress,
    pub summary: String,
}

impl<'r> CatalogView<'r> {
    pub fn build(records: &'r [Record], selection: &Selection) -> Self {
        let kept = filter::apply(records, selection);
        let filtered = kept.len();
        let hl = Highlighter::new(selection.keyword_trimmed());
        let groups = group::group_and_sort(&kept, selection.sort)
            .into_iter()
            .map(|p| DisplayGroup::from_partition(p, &hl))
            .collect();
        Self {
            total: records.len(),
            filtered,
            groups,
            progress: MetaProgress::of(records),
            summary: selection.summary(),
        }
    }

    /// Nothing matched; adapters show an empty state.
    pub fn is_empty(&self) -> bool {
        self.filtered == 0
    }

    pub fn status_text(&self) -> String {
        format!("已显示 {} / {} 个花名。", self.filtered, self.total)
    }

    /// Displayed records in render order, across groups.
    pub fn rows(&self) -> impl Iterator<Item = &DecoratedRecord<'r>> {
        self.groups.iter().flat_map(|g| g.records.iter())
    }

    pub fn row(&self, index: usize) -> Option<&DecoratedRecord<'r>> {
        self.rows().nth(index)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
