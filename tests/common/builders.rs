//! Test builders — ergonomic constructors for records and datasets.
//!
//! These builders are designed for readability in test assertions, not for
//! production use.

use huaming_core::{BaseRecord, Dataset, MetaRecord, Record};

// ---------------------------------------------------------------------------
// RecordBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for merged [`Record`] fixtures.
///
/// # Example
///
/// ```rust
/// let camellia = RecordBuilder::new("山茶")
///     .group(2)
///     .tier("A")
///     .alias(&["茗花"])
///     .season("冬季")
///     .build();
/// ```
pub struct RecordBuilder {
    record: Record,
}

impl RecordBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            record: Record {
                name: name.into(),
                group: Some(1),
                tier: String::new(),
                image_url: None,
                alias: Vec::new(),
                meaning: String::new(),
                season: String::new(),
                pinyin: String::new(),
                pinyin_initials: String::new(),
            },
        }
    }

    pub fn group(mut self, group: u32) -> Self {
        self.record.group = Some(group);
        self
    }

    pub fn no_group(mut self) -> Self {
        self.record.group = None;
        self
    }

    pub fn tier(mut self, tier: &str) -> Self {
        self.record.tier = tier.to_string();
        self
    }

    pub fn alias(mut self, alias: &[&str]) -> Self {
        self.record.alias = alias.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn meaning(mut self, meaning: &str) -> Self {
        self.record.meaning = meaning.to_string();
        self
    }

    pub fn season(mut self, season: &str) -> Self {
        self.record.season = season.to_string();
        self
    }

    pub fn pinyin(mut self, pinyin: &str, initials: &str) -> Self {
        self.record.pinyin = pinyin.to_string();
        self.record.pinyin_initials = initials.to_string();
        self
    }

    pub fn image(mut self, url: &str) -> Self {
        self.record.image_url = Some(url.to_string());
        self
    }

    pub fn build(self) -> Record {
        self.record
    }
}

// ---------------------------------------------------------------------------
// DatasetBuilder
// ---------------------------------------------------------------------------

/// Builds the two raw collections side by side.
#[derive(Default)]
pub struct DatasetBuilder {
    base: Vec<BaseRecord>,
    metas: Vec<MetaRecord>,
}

impl DatasetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base(mut self, name: &str, group: u32, tier: &str) -> Self {
        self.base.push(BaseRecord::new(name, group, tier));
        self
    }

    /// A complete metadata entry.
    pub fn meta(mut self, name: &str, alias: &[&str], meaning: &str, season: &str) -> Self {
        self.metas.push(MetaRecord {
            name: name.to_string(),
            alias: Some(alias.iter().map(|a| a.to_string()).collect()),
            meaning: Some(meaning.to_string()),
            season: Some(season.to_string()),
            pinyin: Some(format!("{name}-py")),
            pinyin_initials: Some("py".to_string()),
        });
        self
    }

    pub fn raw_meta(mut self, meta: MetaRecord) -> Self {
        self.metas.push(meta);
        self
    }

    pub fn build(self) -> Dataset {
        Dataset::new(self.base, self.metas)
    }
}

/// `n` records named `花0..花n`; the first `filled` carry a meaning.
pub fn numbered_records(n: usize, filled: usize) -> Vec<Record> {
    (0..n)
        .map(|i| {
            let b = RecordBuilder::new(format!("花{i}")).group((i % 3) as u32 + 1);
            if i < filled {
                b.meaning("有").build()
            } else {
                b.build()
            }
        })
        .collect()
}
