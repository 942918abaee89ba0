//! Dataset validation — consistency checks between the base and metadata
//! collections.

use std::collections::{BTreeSet, HashSet};

use thiserror::Error;

use crate::types::{BaseRecord, MetaRecord};

/// Characters a season may be written with.
pub const SEASON_CHARS: &str = "春夏秋冬";

/// One problem found in the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationIssue {
    #[error("数量不一致：flowers={base} meta={meta}")]
    CountMismatch { base: usize, meta: usize },
    #[error("元信息存在重复花名：{}", .0.join(", "))]
    DuplicateMeta(Vec<String>),
    #[error("缺少元信息条目：{}", .0.join(", "))]
    MissingMeta(Vec<String>),
    #[error("存在多余元信息条目：{}", .0.join(", "))]
    ExtraMeta(Vec<String>),
    #[error("{name} 缺少{field}")]
    MissingField { name: String, field: MetaField },
    #[error("{name} season 格式不符合：{season}")]
    BadSeason { name: String, season: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaField {
    Alias,
    Meaning,
    Season,
    Pinyin,
    PinyinInitials,
}

impl std::fmt::Display for MetaField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            MetaField::Alias => "别名 alias",
            MetaField::Meaning => "花语 meaning",
            MetaField::Season => "季节 season",
            MetaField::Pinyin => "拼音 pinyin",
            MetaField::PinyinInitials => "拼音首字母 pinyinInitials",
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }

    /// The printable report: a header plus one `- issue` line per problem,
    /// or the success line.
    pub fn render(&self) -> String {
        if self.is_ok() {
            return "花名元信息校验通过。\n".to_string();
        }
        let mut out = String::from("校验失败：\n");
        for issue in &self.issues {
            out.push_str(&format!("- {issue}\n"));
        }
        out
    }
}

pub fn validate(base: &[BaseRecord], metas: &[MetaRecord]) -> ValidationReport {
    let mut issues = Vec::new();

    if base.len() != metas.len() {
        issues.push(ValidationIssue::CountMismatch {
            base: base.len(),
            meta: metas.len(),
        });
    }

    let mut seen = HashSet::new();
    let duplicates: BTreeSet<&str> = metas
        .iter()
        .map(|m| m.name.as_str())
        .filter(|name| !seen.insert(*name))
        .collect();
    if !duplicates.is_empty() {
        issues.push(ValidationIssue::DuplicateMeta(
            duplicates.into_iter().map(str::to_string).collect(),
        ));
    }

    let base_names: HashSet<&str> = base.iter().map(|b| b.name.as_str()).collect();
    let meta_names: HashSet<&str> = metas.iter().map(|m| m.name.as_str()).collect();

    let missing: Vec<String> = base
        .iter()
        .filter(|b| !meta_names.contains(b.name.as_str()))
        .map(|b| b.name.clone())
        .collect();
    if !missing.is_empty() {
        issues.push(ValidationIssue::MissingMeta(missing));
    }

    let extra: Vec<String> = metas
        .iter()
        .filter(|m| !base_names.contains(m.name.as_str()))
        .map(|m| m.name.clone())
        .collect();
    if !extra.is_empty() {
        issues.push(ValidationIssue::ExtraMeta(extra));
    }

    for meta in metas {
        check_fields(meta, &mut issues);
    }

    tracing::debug!(issues = issues.len(), "dataset validated");
    ValidationReport { issues }
}

fn check_fields(meta: &MetaRecord, issues: &mut Vec<ValidationIssue>) {
    let blank = |v: &Option<String>| v.as_deref().map_or(true, str::is_empty);
    let checks = [
        (meta.alias.as_ref().map_or(true, Vec::is_empty), MetaField::Alias),
        (blank(&meta.meaning), MetaField::Meaning),
        (blank(&meta.season), MetaField::Season),
        (blank(&meta.pinyin), MetaField::Pinyin),
        (blank(&meta.pinyin_initials), MetaField::PinyinInitials),
    ];
    for (missing, field) in checks {
        if missing {
            issues.push(ValidationIssue::MissingField {
                name: meta.name.clone(),
                field,
            });
        }
    }

    if let Some(season) = meta.season.as_deref() {
        if season.chars().any(|c| !SEASON_CHARS.contains(c)) {
            issues.push(ValidationIssue::BadSeason {
                name: meta.name.clone(),
                season: season.to_string(),
            });
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
