//! Keyword matcher — normalized substring search across a record's text fields.
//!
//! Both the keyword and every token are lower-cased and stripped of all
//! whitespace before comparison, so `"Mu Dan"` finds a record whose pinyin is
//! `"mudan"`.

use crate::types::Record;

/// Lower-case `value` and remove every whitespace character.
pub fn normalize(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// A keyword normalized once, reusable across records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordMatcher {
    needle: String,
}

impl KeywordMatcher {
    pub fn new(keyword: &str) -> Self {
        Self {
            needle: normalize(keyword),
        }
    }

    /// An empty keyword matches everything.
    pub fn is_noop(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn matches(&self, record: &Record) -> bool {
        if self.is_noop() {
            return true;
        }
        let group = record.group.map(|g| g.to_string()).unwrap_or_default();
        let fixed = [
            record.name.as_str(),
            record.meaning.as_str(),
            record.season.as_str(),
            record.tier.as_str(),
            group.as_str(),
            record.pinyin.as_str(),
            record.pinyin_initials.as_str(),
        ];
        // Bound to a local so the borrow of `group` ends before it drops.
        let hit = fixed
            .into_iter()
            .chain(record.alias.iter().map(String::as_str))
            .any(|token| normalize(token).contains(&self.needle));
        hit
    }
}

/// One-shot form of [`KeywordMatcher::matches`].
pub fn matches_keyword(record: &Record, keyword: &str) -> bool {
    KeywordMatcher::new(keyword).matches(record)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn camellia() -> Record {
        Record {
            name: "山茶".into(),
            group: Some(2),
            tier: "A".into(),
            image_url: None,
            alias: vec!["茗花".into()],
            meaning: String::new(),
            season: "冬季".into(),
            pinyin: "Shan Cha".into(),
            pinyin_initials: "SC".into(),
        }
    }

    #[test]
    fn normalize_strips_whitespace_and_lowercases() {
        assert_eq!(normalize("  Mu \tDan\n"), "mudan");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("牡 丹"), "牡丹");
    }

    #[test]
    fn season_token_matches() {
        assert!(matches_keyword(&camellia(), "冬"));
    }

    #[test]
    fn alias_pinyin_group_and_tier_tokens_match() {
        let r = camellia();
        assert!(matches_keyword(&r, "茗"));
        assert!(matches_keyword(&r, "shancha"));
        assert!(matches_keyword(&r, "s c"));
        assert!(matches_keyword(&r, "2"));
        assert!(matches_keyword(&r, "a"));
    }

    #[test]
    fn keyword_must_be_inside_a_single_token() {
        // "茶冬" spans name and season; no single token contains it.
        assert!(!matches_keyword(&camellia(), "茶冬"));
        assert!(!matches_keyword(&camellia(), "夏"));
    }

    #[test]
    fn empty_or_blank_keyword_is_noop() {
        assert!(KeywordMatcher::new("   ").is_noop());
        assert!(matches_keyword(&camellia(), ""));
    }

    #[test]
    fn missing_group_contributes_empty_token() {
        let mut r = camellia();
        r.group = None;
        assert!(!matches_keyword(&r, "2"));
    }
}
