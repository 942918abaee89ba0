//! Predicate filter — the conjunction of every active [`Selection`] predicate.
//!
//! Predicates are independent and commutative; the order below is the cheap
//! checks first, keyword last. Output keeps the input's relative order.

use crate::search::KeywordMatcher;
use crate::selection::{Choice, Selection};
use crate::types::Record;

/// A [`Selection`] prepared for repeated record tests.
pub struct Filter<'a> {
    selection: &'a Selection,
    keyword: KeywordMatcher,
}

impl<'a> Filter<'a> {
    pub fn new(selection: &'a Selection) -> Self {
        Self {
            selection,
            keyword: KeywordMatcher::new(selection.keyword_trimmed()),
        }
    }

    pub fn accepts(&self, record: &Record) -> bool {
        let s = self.selection;
        (!s.only_filled || record.has_meta())
            && matches_group(record, &s.group)
            && matches_tier(record, &s.tier)
            && (!s.alias_only || record.has_alias())
            && (!s.meaning_only || record.has_meaning())
            && (!s.season_only || record.has_season())
            && matches_season(record, &s.season)
            && self.keyword.matches(record)
    }
}

/// Records accepted by every active predicate, in input order.
pub fn apply<'r>(records: &'r [Record], selection: &Selection) -> Vec<&'r Record> {
    let filter = Filter::new(selection);
    let kept: Vec<&Record> = records.iter().filter(|r| filter.accepts(r)).collect();
    tracing::debug!(total = records.len(), kept = kept.len(), "filter applied");
    kept
}

fn matches_group(record: &Record, group: &Choice) -> bool {
    match group {
        Choice::All => true,
        Choice::Only(g) => record.group_key() == *g,
    }
}

fn matches_tier(record: &Record, tier: &Choice) -> bool {
    match tier {
        Choice::All => true,
        Choice::Only(t) => record.tier == *t,
    }
}

fn matches_season(record: &Record, season: &Choice) -> bool {
    match season {
        Choice::All => true,
        Choice::Only(s) => record.season.trim().contains(s.as_str()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
