//! Detail view — one record merged on demand, with its display texts.

use serde::Serialize;

use crate::loader::{merge_one, Dataset};
use crate::types::Record;
use crate::view::{self, PLACEHOLDER};

pub const NOT_FOUND: &str = "未找到花名信息。";
pub const DASH: &str = "—";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordDetail {
    pub record: Record,
    pub alias: String,
    pub meaning: String,
    pub season: String,
    pub pinyin: String,
    pub initials: String,
    pub season_hint: String,
    pub tier: String,
    pub image_note: &'static str,
}

impl RecordDetail {
    /// `None` for an empty name or a name the base collection does not have.
    pub fn lookup(dataset: &Dataset, name: &str) -> Option<Self> {
        let record = merge_one(&dataset.base, &dataset.metas, name.trim());
        if record.is_none() {
            tracing::debug!(name, "detail lookup missed");
        }
        record.map(Self::from_record)
    }

    pub fn from_record(record: Record) -> Self {
        let or_placeholder = |t: &str| view::non_blank(t).unwrap_or(PLACEHOLDER).to_string();
        let or_dash = |t: &str| view::non_blank(t).unwrap_or(DASH).to_string();
        Self {
            alias: view::alias_text(&record).unwrap_or_else(|| PLACEHOLDER.to_string()),
            meaning: or_placeholder(&record.meaning),
            season: or_placeholder(&record.season),
            pinyin: or_dash(&record.pinyin),
            initials: or_dash(&record.pinyin_initials),
            season_hint: match view::non_blank(&record.season) {
                Some(season) => format!("推荐在{season}观赏"),
                None => PLACEHOLDER.to_string(),
            },
            tier: view::tier_label(&record.tier).to_string(),
            image_note: view::image_note(&record),
            record,
        }
    }

    pub fn group_title(&self) -> String {
        view::group_title(&self.record.group_key())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
