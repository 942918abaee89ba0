//! Markdown catalog import — turns the hand-maintained `flowers.md` list into
//! base records.
//!
//! ```text
//! ## 第 1 组：国色（3）
//! 1. 牡丹
//! 2. 芍药
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::BaseRecord;

static HEADER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^## 第\s+(\d+)\s+组：(.+?)（\d+）").expect("valid header regex"));

static ITEM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\s+(.*)").expect("valid item regex"));

/// Parse the markdown list. Items before any group header get group 0 and
/// an empty tier; headers that do not match keep the previous group.
pub fn parse(text: &str) -> Vec<BaseRecord> {
    let mut group = 0u32;
    let mut tier = String::new();
    let mut records = Vec::new();

    for line in text.lines().map(str::trim) {
        if line.starts_with("## 第 ") {
            if let Some(caps) = HEADER_RE.captures(line) {
                match caps[1].parse() {
                    Ok(n) => {
                        group = n;
                        tier = caps[2].to_string();
                    }
                    Err(err) => tracing::warn!(%err, line, "group number out of range"),
                }
            }
            continue;
        }
        if let Some(caps) = ITEM_RE.captures(line) {
            let name = caps[1].trim();
            records.push(BaseRecord::new(name, group, tier.as_str()));
        }
    }

    tracing::debug!(records = records.len(), "markdown catalog parsed");
    records
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
