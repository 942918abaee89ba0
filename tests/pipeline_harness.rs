#![allow(unused)]
//! Catalog pipeline integration harness.
//!
//! # What this covers
//!
//! The full Loader → Filter → Grouper/Sorter → Highlighter chain over the
//! bundled sample dataset, as both adapters see it through
//! [`CatalogView::build`].
//!
//! - **Filter predicates**: every selector and toggle, alone and combined.
//! - **Keyword matching**: names, aliases, pinyin with spaces, initials, tiers.
//! - **Grouping and sorting**: first-seen group order, `ByName` collation,
//!   `FilledFirst` ordering, group tier labels.
//! - **Highlighting**: segments in the decorated rows, placeholders never
//!   highlighted.
//! - **Status texts**: summary, status line and metadata progress.
//!
//! # Running
//!
//! ```sh
//! cargo test --test pipeline_harness
//! ```

mod common;
use common::*;

use huaming_core::view::PLACEHOLDER;
use huaming_core::{CatalogView, Choice, Segment, Selection, SortMode, Toggle};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn selection(f: impl FnOnce(&mut Selection)) -> Selection {
    let mut s = Selection::default();
    f(&mut s);
    s
}

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

#[rstest]
#[case::everything(Selection::default(), 12)]
#[case::only_filled(selection(|s| s.set_toggle(Toggle::OnlyFilled, true)), 9)]
#[case::alias_only(selection(|s| s.set_toggle(Toggle::AliasOnly, true)), 8)]
#[case::meaning_only(selection(|s| s.set_toggle(Toggle::MeaningOnly, true)), 9)]
#[case::season_only(selection(|s| s.set_toggle(Toggle::SeasonOnly, true)), 8)]
#[case::spring(selection(|s| s.set_season(Choice::Only("春".into()))), 3)]
#[case::group_three(selection(|s| s.set_group(Choice::Only("3".into()))), 4)]
#[case::tier(selection(|s| s.set_tier(Choice::Only("名品".into()))), 4)]
#[case::pinyin_fragment(selection(|s| s.set_keyword("hua")), 5)]
#[case::initials(selection(|s| s.set_keyword("md")), 1)]
#[case::spaced_pinyin(selection(|s| s.set_keyword("Mu Dan")), 1)]
#[case::alias_text(selection(|s| s.set_keyword("洛阳")), 1)]
#[case::nothing(selection(|s| s.set_keyword("不存在")), 0)]
fn filter_counts(#[case] sel: Selection, #[case] expected: usize) {
    let records = sample_records();
    let view = CatalogView::build(&records, &sel);
    assert_eq!(view.total, 12);
    assert_eq!(view.filtered, expected, "{}", view.summary);
    assert_eq!(view.is_empty(), expected == 0);
}

#[test]
fn predicates_combine_as_a_conjunction() {
    let records = sample_records();
    let sel = selection(|s| {
        s.set_group(Choice::Only("1".into()));
        s.set_season(Choice::Only("春".into()));
        s.set_keyword("hua");
    });
    let view = CatalogView::build(&records, &sel);
    assert_rows!(view, ["兰花"]);
}

#[test]
fn season_quick_filter_toggles_off() {
    let mut sel = Selection::default();
    sel.toggle_season("冬");
    assert_eq!(sel.season, Choice::Only("冬".into()));
    sel.toggle_season("冬");
    assert_eq!(sel.season, Choice::All);
}

// ---------------------------------------------------------------------------
// Grouping and sorting
// ---------------------------------------------------------------------------

#[test]
fn original_order_keeps_dataset_order() {
    let records = sample_records();
    let view = CatalogView::build(&records, &Selection::default());
    let titles: Vec<String> = view.groups.iter().map(|g| g.title()).collect();
    assert_eq!(
        titles,
        vec!["第 1 组 · 国色", "第 2 组 · 名品", "第 3 组 · 雅品"]
    );
    assert_partition!(view, records);
}

#[test]
fn by_name_sorts_by_name_within_groups() {
    let records = sample_records();
    let view = CatalogView::build(&records, &selection(|s| s.set_sort(SortMode::ByName)));
    let first: Vec<&str> = view.groups[0]
        .records
        .iter()
        .map(|r| r.record.name.as_str())
        .collect();
    assert_eq!(first, vec!["兰花", "梅花", "牡丹", "芍药"]);
}

#[test]
fn filled_first_then_collation() {
    let records = sample_records();
    let sel = selection(|s| {
        s.set_group(Choice::Only("3".into()));
        s.set_sort(SortMode::FilledFirst);
    });
    let view = CatalogView::build(&records, &sel);
    // 水仙 is the only filled one. 海棠 has no pinyin metadata and still
    // collates by its name, between 杜鹃 and 茉莉.
    assert_rows!(view, ["水仙", "杜鹃", "海棠", "茉莉"]);
}

#[test]
fn records_without_group_share_the_unknown_group() {
    let records = vec![
        RecordBuilder::new("甲").no_group().tier("").build(),
        RecordBuilder::new("乙").group(4).tier("奇品").build(),
        RecordBuilder::new("丙").no_group().build(),
    ];
    let view = CatalogView::build(&records, &Selection::default());
    let keys: Vec<&str> = view.groups.iter().map(|g| g.key.as_str()).collect();
    assert_eq!(keys, vec!["未知", "4"]);
    assert_eq!(view.groups[0].title(), "未知 · 未知等级");
}

// ---------------------------------------------------------------------------
// Highlighting
// ---------------------------------------------------------------------------

#[test]
fn keyword_is_highlighted_in_every_field() {
    let records = vec![RecordBuilder::new("山茶")
        .group(2)
        .tier("A")
        .alias(&["茗花"])
        .season("冬季")
        .build()];
    let view = CatalogView::build(&records, &selection(|s| s.set_keyword("冬")));
    let row = view.row(0).expect("one row");
    assert_eq!(
        row.season,
        vec![Segment::marked("冬"), Segment::plain("季")]
    );
    assert_eq!(row.name, vec![Segment::plain("山茶")]);
    assert_eq!(row.meaning, vec![Segment::plain(PLACEHOLDER)]);
}

#[test]
fn placeholder_is_never_highlighted() {
    let records = vec![RecordBuilder::new("待补充花").build()];
    let view = CatalogView::build(&records, &selection(|s| s.set_keyword("待补充")));
    let row = view.row(0).expect("one row");
    assert!(row.name.iter().any(|s| s.highlight));
    assert_eq!(row.alias, vec![Segment::plain(PLACEHOLDER)]);
}

// ---------------------------------------------------------------------------
// Status texts
// ---------------------------------------------------------------------------

#[test]
fn summary_lists_active_parts_in_order() {
    let records = sample_records();
    let sel = selection(|s| {
        s.set_keyword("冬");
        s.set_toggle(Toggle::OnlyFilled, true);
        s.set_sort(SortMode::FilledFirst);
    });
    let view = CatalogView::build(&records, &sel);
    insta::assert_snapshot!(view.summary, @"当前筛选：关键词“冬”，仅已补充，已补充优先");
    insta::assert_snapshot!(view.status_text(), @"已显示 2 / 12 个花名。");
}

#[test]
fn progress_covers_the_full_set() {
    let records = sample_records();
    let view = CatalogView::build(&records, &selection(|s| s.set_keyword("不存在")));
    assert_eq!(view.progress.text(), "元信息完成度：9/12");
    assert_eq!(view.progress.detail_text(), "已补充：9，待补充：3");
    assert_eq!(CatalogView::build(&[], &Selection::default()).summary, "当前筛选：全部");
}
