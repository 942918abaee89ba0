//! Grouper/sorter — partitions filtered records by group key and orders each
//! partition by the selected [`SortMode`].

use std::cmp::Ordering;
use std::collections::HashMap;

use pinyin::ToPinyin;

use crate::selection::SortMode;
use crate::types::Record;

/// One partition of the filtered set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition<'r> {
    pub key: String,
    /// Tier of the first member after sorting.
    pub tier: String,
    pub records: Vec<&'r Record>,
}

/// Partition `records` by [`Record::group_key`], keeping first-seen group
/// order, and sort each partition.
pub fn group_and_sort<'r>(records: &[&'r Record], sort: SortMode) -> Vec<Partition<'r>> {
    let mut order: Vec<(String, Vec<&'r Record>)> = Vec::new();
    let mut slot: HashMap<String, usize> = HashMap::new();

    for &record in records {
        let key = record.group_key();
        match slot.get(&key) {
            Some(&i) => order[i].1.push(record),
            None => {
                slot.insert(key.clone(), order.len());
                order.push((key, vec![record]));
            }
        }
    }

    order
        .into_iter()
        .map(|(key, mut members)| {
            sort_members(&mut members, sort);
            let tier = members.first().map(|r| r.tier.clone()).unwrap_or_default();
            Partition {
                key,
                tier,
                records: members,
            }
        })
        .collect()
}

/// Sort in place. Both sorts are stable, so `Original` is the identity and
/// equal keys keep their input order.
pub fn sort_members(members: &mut [&Record], sort: SortMode) {
    match sort {
        SortMode::Original => {}
        SortMode::ByName => members.sort_by_cached_key(|r| name_key(&r.name)),
        SortMode::FilledFirst => {
            members.sort_by_cached_key(|r| (!r.has_meta(), name_key(&r.name)))
        }
    }
}

/// Name collation, the way a zh reader orders names: hanzi by their pinyin
/// syllables, other runs by lower-cased text. Only the name takes part;
/// the raw name breaks ties so the order is total.
pub fn compare_names(a: &Record, b: &Record) -> Ordering {
    name_key(&a.name).cmp(&name_key(&b.name))
}

/// Collation key for a name: one unit per hanzi syllable, one per run of
/// anything else. Whitespace separates runs and is otherwise ignored.
pub fn name_key(name: &str) -> (Vec<String>, String) {
    let mut units = Vec::new();
    let mut run = String::new();
    for c in name.chars() {
        if let Some(py) = c.to_pinyin() {
            if !run.is_empty() {
                units.push(std::mem::take(&mut run));
            }
            units.push(py.plain().to_string());
        } else if c.is_whitespace() {
            if !run.is_empty() {
                units.push(std::mem::take(&mut run));
            }
        } else {
            run.extend(c.to_lowercase());
        }
    }
    if !run.is_empty() {
        units.push(run);
    }
    (units, name.to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
