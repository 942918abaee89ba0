//! Static datasets used across harnesses.

use huaming_core::{Dataset, Record};

/// The bundled sample: 12 names in 3 groups, 9 with metadata.
pub fn sample_dataset() -> Dataset {
    Dataset::from_json(huaming_sources::EMBEDDED_BASE, huaming_sources::EMBEDDED_META)
        .expect("bundled sample must parse")
}

pub fn sample_records() -> Vec<Record> {
    sample_dataset().records()
}

/// The markdown catalog the sample base records were generated from.
pub const SAMPLE_MD: &str = include_str!("../../data/flowers.md");

/// A markdown catalog with an item before the first header and a malformed
/// header line.
pub const ODD_MD: &str = "\
1. 无组花
## 第 7 组：奇品（2）
1. 昙花
2.  夜来香
## 第 x 组：坏（1）
3. 仍在七组
";

pub fn names<'a>(records: impl IntoIterator<Item = &'a Record>) -> Vec<&'a str> {
    records.into_iter().map(|r| r.name.as_str()).collect()
}
