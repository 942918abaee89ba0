//! Selection — the full set of active filter and sort choices.
//!
//! Both adapters mutate a [`Selection`] through the same small vocabulary
//! (`set_keyword`, `toggle`, `set_group`, …) and rebuild the view after every
//! change. [`FilterOptions`] lists the values the group and tier selectors can
//! take for the loaded dataset.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::{Record, UNKNOWN_GROUP};

/// Sentinel used by selectors and the persisted format for "no restriction".
pub const ALL: &str = "all";

/// Seasons offered as quick filters.
pub const QUICK_SEASONS: [&str; 4] = ["春", "夏", "秋", "冬"];

// ---------------------------------------------------------------------------
// Choice
// ---------------------------------------------------------------------------

/// A selector value: either no restriction, or one specific value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Choice {
    #[default]
    All,
    Only(String),
}

impl Choice {
    /// Parse the persisted / CLI form; `"all"` and the empty string mean [`Choice::All`].
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value == ALL {
            Choice::All
        } else {
            Choice::Only(value.to_string())
        }
    }

    pub fn as_value(&self) -> Option<&str> {
        match self {
            Choice::All => None,
            Choice::Only(v) => Some(v.as_str()),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Choice::All)
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::All => write!(f, "{ALL}"),
            Choice::Only(v) => write!(f, "{v}"),
        }
    }
}

// ---------------------------------------------------------------------------
// SortMode
// ---------------------------------------------------------------------------

/// Ordering applied inside each display group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum SortMode {
    /// Dataset order.
    #[default]
    Original,
    /// Name collation order.
    ByName,
    /// Records with metadata first, then name order.
    FilledFirst,
}

impl SortMode {
    pub const ALL: [SortMode; 3] = [SortMode::Original, SortMode::ByName, SortMode::FilledFirst];

    /// Persisted / CLI token.
    pub fn as_str(self) -> &'static str {
        match self {
            SortMode::Original => "default",
            SortMode::ByName => "name",
            SortMode::FilledFirst => "filled",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortMode::Original => "按原顺序",
            SortMode::ByName => "按花名",
            SortMode::FilledFirst => "已补充优先",
        }
    }

    pub fn next(self) -> Self {
        match self {
            SortMode::Original => SortMode::ByName,
            SortMode::ByName => SortMode::FilledFirst,
            SortMode::FilledFirst => SortMode::Original,
        }
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "default" | "original" => Ok(SortMode::Original),
            "name" => Ok(SortMode::ByName),
            "filled" => Ok(SortMode::FilledFirst),
            other => Err(format!("unknown sort mode: {other} (default|name|filled)")),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SortMode {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SortMode {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(d)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Toggle
// ---------------------------------------------------------------------------

/// The four boolean filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum Toggle {
    OnlyFilled,
    AliasOnly,
    MeaningOnly,
    SeasonOnly,
}

impl Toggle {
    pub const ALL: [Toggle; 4] = [
        Toggle::OnlyFilled,
        Toggle::AliasOnly,
        Toggle::MeaningOnly,
        Toggle::SeasonOnly,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Toggle::OnlyFilled => "仅已补充",
            Toggle::AliasOnly => "含别名",
            Toggle::MeaningOnly => "含花语",
            Toggle::SeasonOnly => "含季节",
        }
    }
}

impl FromStr for Toggle {
    type Err = String;

    /// Accepts the quick-toggle keys used by the list view.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "filled" => Ok(Toggle::OnlyFilled),
            "alias" => Ok(Toggle::AliasOnly),
            "meaning" => Ok(Toggle::MeaningOnly),
            "season" => Ok(Toggle::SeasonOnly),
            other => Err(format!("unknown toggle: {other}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Every filter and sort choice in effect at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Raw keyword as typed; trimmed when applied.
    pub keyword: String,
    pub only_filled: bool,
    pub alias_only: bool,
    pub meaning_only: bool,
    pub season_only: bool,
    pub group: Choice,
    pub tier: Choice,
    /// Substring the season must contain.
    pub season: Choice,
    pub sort: SortMode,
}

impl Selection {
    pub fn keyword_trimmed(&self) -> &str {
        self.keyword.trim()
    }

    pub fn toggle_state(&self, toggle: Toggle) -> bool {
        match toggle {
            Toggle::OnlyFilled => self.only_filled,
            Toggle::AliasOnly => self.alias_only,
            Toggle::MeaningOnly => self.meaning_only,
            Toggle::SeasonOnly => self.season_only,
        }
    }

    fn toggle_slot(&mut self, toggle: Toggle) -> &mut bool {
        match toggle {
            Toggle::OnlyFilled => &mut self.only_filled,
            Toggle::AliasOnly => &mut self.alias_only,
            Toggle::MeaningOnly => &mut self.meaning_only,
            Toggle::SeasonOnly => &mut self.season_only,
        }
    }

    pub fn set_keyword(&mut self, keyword: impl Into<String>) {
        self.keyword = keyword.into();
    }

    pub fn clear_keyword(&mut self) {
        self.keyword.clear();
    }

    pub fn set_toggle(&mut self, toggle: Toggle, on: bool) {
        *self.toggle_slot(toggle) = on;
    }

    pub fn toggle(&mut self, toggle: Toggle) {
        let slot = self.toggle_slot(toggle);
        *slot = !*slot;
    }

    pub fn set_group(&mut self, group: Choice) {
        self.group = group;
    }

    pub fn set_tier(&mut self, tier: Choice) {
        self.tier = tier;
    }

    pub fn set_season(&mut self, season: Choice) {
        self.season = season;
    }

    /// Selecting the active season again clears the season selector.
    pub fn toggle_season(&mut self, season: &str) {
        if season.is_empty() {
            return;
        }
        self.season = match &self.season {
            Choice::Only(current) if current == season => Choice::All,
            _ => Choice::Only(season.to_string()),
        };
    }

    pub fn set_sort(&mut self, sort: SortMode) {
        self.sort = sort;
    }

    pub fn cycle_sort(&mut self) {
        self.sort = self.sort.next();
    }

    pub fn reset(&mut self) {
        *self = Selection::default();
    }

    /// Number of active boolean toggles.
    pub fn active_toggles(&self) -> usize {
        Toggle::ALL.iter().filter(|t| self.toggle_state(**t)).count()
    }

    /// Drop group/tier choices that the loaded dataset does not offer.
    pub fn reconcile(&mut self, options: &FilterOptions) {
        if let Choice::Only(g) = &self.group {
            if !options.groups.contains(g) {
                tracing::debug!(group = %g, "saved group not in dataset, resetting");
                self.group = Choice::All;
            }
        }
        if let Choice::Only(t) = &self.tier {
            if !options.tiers.contains(t) {
                tracing::debug!(tier = %t, "saved tier not in dataset, resetting");
                self.tier = Choice::All;
            }
        }
    }

    /// Human-readable description of the active choices, e.g.
    /// `当前筛选：关键词“冬”，仅已补充`.
    pub fn summary(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        let keyword = self.keyword_trimmed();
        if !keyword.is_empty() {
            parts.push(format!("关键词“{keyword}”"));
        }
        if let Some(g) = self.group.as_value() {
            parts.push(format!("第 {g} 组"));
        }
        if let Some(t) = self.tier.as_value() {
            parts.push(t.to_string());
        }
        for toggle in Toggle::ALL {
            if self.toggle_state(toggle) {
                parts.push(toggle.label().to_string());
            }
        }
        if let Some(s) = self.season.as_value() {
            parts.push(format!("季节含“{s}”"));
        }
        match self.sort {
            SortMode::ByName => parts.push("按花名排序".to_string()),
            SortMode::FilledFirst => parts.push("已补充优先".to_string()),
            SortMode::Original => {}
        }
        if parts.is_empty() {
            "当前筛选：全部".to_string()
        } else {
            format!("当前筛选：{}", parts.join("，"))
        }
    }
}

// ---------------------------------------------------------------------------
// FilterOptions
// ---------------------------------------------------------------------------

/// Values offered by the group and tier selectors for one dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// Group keys, numerically ascending; non-numeric keys last.
    pub groups: Vec<String>,
    /// Distinct non-empty tiers in first-seen order.
    pub tiers: Vec<String>,
}

impl FilterOptions {
    pub fn from_records(records: &[Record]) -> Self {
        let mut groups: Vec<String> = Vec::new();
        let mut tiers: Vec<String> = Vec::new();
        for r in records {
            let key = r.group_key();
            if !groups.contains(&key) {
                groups.push(key);
            }
            if !r.tier.is_empty() && !tiers.contains(&r.tier) {
                tiers.push(r.tier.clone());
            }
        }
        groups.sort_by_key(|g| g.parse::<u64>().map_err(|_| g.clone()));
        Self { groups, tiers }
    }

    /// Display label for a group selector entry.
    pub fn group_label(choice: &Choice) -> String {
        match choice {
            Choice::All => "全部".to_string(),
            Choice::Only(g) if g == UNKNOWN_GROUP => UNKNOWN_GROUP.to_string(),
            Choice::Only(g) => format!("第 {g} 组"),
        }
    }

    /// The choice after `current` in `All, groups...` order, wrapping around.
    pub fn next_group(&self, current: &Choice) -> Choice {
        cycle(&self.groups, current)
    }

    pub fn next_tier(&self, current: &Choice) -> Choice {
        cycle(&self.tiers, current)
    }
}

fn cycle(values: &[String], current: &Choice) -> Choice {
    let next_index = match current {
        Choice::All => 0,
        Choice::Only(v) => match values.iter().position(|x| x == v) {
            Some(i) => i + 1,
            None => values.len(),
        },
    };
    values
        .get(next_index)
        .map(|v| Choice::Only(v.clone()))
        .unwrap_or(Choice::All)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
