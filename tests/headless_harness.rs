#![allow(unused)]
//! Headless mode process-level integration harness.
//!
//! # What this covers
//!
//! This harness exercises `huaming` as a compiled binary via
//! [`std::process::Command`]. It validates the contract of the headless
//! commands from the outside — what a user or another CLI tool would observe.
//!
//! - **`list`**: text and JSON output, filter flags, `--restore` and
//!   `--no-save` against a preference file in a temp dir.
//! - **`show`**: found and not-found names, exit codes.
//! - **`validate`**: failing sample dataset and a complete dataset.
//! - **`import`**: markdown catalog to JSON file.
//! - **Load failures**: missing files exit non-zero with `加载失败`, and
//!   `--lenient` degrades a missing metadata file to empty metadata.
//!
//! # What this does NOT cover
//!
//! - TUI rendering (that requires a real terminal)
//!
//! # Running
//!
//! ```sh
//! cargo test --test headless_harness
//! ```

mod common;
use common::*;

use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// A temp dir holding a config that points at `base`/`meta` and keeps the
/// preference file inside the temp dir.
struct Env {
    dir: TempDir,
}

impl Env {
    fn new() -> Self {
        Self::with_data(&data_dir().join("flowers.json"), &data_dir().join("flower_meta.json"))
    }

    fn with_data(base: &Path, meta: &Path) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = format!(
            "[data]\nbase_path = '{}'\nmeta_path = '{}'\n\n[prefs]\npath = '{}'\n",
            base.display(),
            meta.display(),
            dir.path().join("prefs.json").display(),
        );
        std::fs::write(dir.path().join("config.toml"), config).expect("write config");
        Self { dir }
    }

    fn prefs_path(&self) -> PathBuf {
        self.dir.path().join("prefs.json")
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_huaming"))
            .arg("--config")
            .arg(self.dir.path().join("config.toml"))
            .args(args)
            .env("HOME", self.dir.path())
            .env_remove("XDG_CONFIG_HOME")
            .env_remove("XDG_STATE_HOME")
            .output()
            .expect("spawn huaming")
    }
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

// ---------------------------------------------------------------------------
// list
// ---------------------------------------------------------------------------

#[test]
fn list_prints_every_group() {
    let env = Env::new();
    let out = env.run(&["list", "--no-save"]);
    assert!(out.status.success(), "{}", stderr(&out));
    let text = stdout(&out);
    assert!(text.contains("已显示 12 / 12 个花名。"), "{text}");
    assert!(text.contains("第 1 组 · 国色"));
    assert!(text.contains("第 3 组 · 雅品"));
    assert!(text.contains("当前筛选：全部"));
    assert!(!env.prefs_path().exists(), "--no-save must not write preferences");
}

#[test]
fn list_json_reflects_filters() {
    let env = Env::new();
    let out = env.run(&["list", "--keyword", "冬", "--format", "json", "--no-save"]);
    assert!(out.status.success(), "{}", stderr(&out));
    let view: serde_json::Value = serde_json::from_slice(&out.stdout).expect("json output");
    assert_eq!(view["filtered"], 2);
    assert_eq!(view["total"], 12);
    let names: Vec<&str> = view["groups"]
        .as_array()
        .expect("groups")
        .iter()
        .flat_map(|g| g["records"].as_array().expect("records"))
        .map(|r| r["record"]["name"].as_str().expect("name"))
        .collect();
    assert_eq!(names, vec!["梅花", "山茶"]);
}

#[test]
fn list_saves_and_restores_selection() {
    let env = Env::new();
    let first = env.run(&["list", "--tier", "名品", "--sort", "name"]);
    assert!(first.status.success(), "{}", stderr(&first));
    assert!(env.prefs_path().exists());

    let restored = env.run(&["list", "--restore", "--no-save"]);
    let text = stdout(&restored);
    assert!(text.contains("当前筛选：名品，按花名排序"), "{text}");
    assert!(text.contains("已显示 4 / 12 个花名。"), "{text}");

    let fresh = env.run(&["list", "--no-save"]);
    assert!(stdout(&fresh).contains("当前筛选：全部"));
}

#[test]
fn list_rejects_unknown_group() {
    let env = Env::new();
    let out = env.run(&["list", "--group", "42", "--no-save"]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("没有这个分组：42"), "{}", stderr(&out));
}

#[test]
fn bad_sort_flag_is_a_usage_error() {
    let env = Env::new();
    let out = env.run(&["list", "--sort", "sideways"]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("sideways"));
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

#[test]
fn show_prints_detail() {
    let env = Env::new();
    let out = env.run(&["show", "梅花"]);
    assert!(out.status.success(), "{}", stderr(&out));
    let text = stdout(&out);
    assert!(text.contains("别名：春梅 / 干枝梅"), "{text}");
    assert!(text.contains("赏花：推荐在冬观赏"));
    assert!(text.contains("拼音：mei hua"));
    assert!(text.contains("图片：图片已准备"));
}

#[test]
fn show_unknown_name_exits_one() {
    let env = Env::new();
    let out = env.run(&["show", "不存在"]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(stdout(&out), "未找到花名信息。\n");
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

#[test]
fn validate_reports_sample_gaps() {
    let env = Env::new();
    let out = env.run(&["validate"]);
    assert_eq!(out.status.code(), Some(1));
    let text = stdout(&out);
    assert!(text.starts_with("校验失败：\n"), "{text}");
    assert!(text.contains("- 海棠 缺少别名 alias"));
    assert!(text.contains("- 水仙 缺少季节 season"));
}

#[test]
fn validate_passes_complete_dataset() {
    let dir = tempfile::tempdir().expect("tempdir");
    let base = dir.path().join("flowers.json");
    let meta = dir.path().join("flower_meta.json");
    std::fs::write(&base, r#"[{"name":"兰花","group":1,"tier":"雅品"}]"#).expect("base");
    std::fs::write(
        &meta,
        r#"[{"name":"兰花","alias":["幽兰"],"meaning":"高洁","season":"春","pinyin":"lan hua","pinyinInitials":"lh"}]"#,
    )
    .expect("meta");

    let env = Env::with_data(&base, &meta);
    let out = env.run(&["validate"]);
    assert!(out.status.success(), "{}", stdout(&out));
    assert_eq!(stdout(&out), "花名元信息校验通过。\n");
}

// ---------------------------------------------------------------------------
// Load failures
// ---------------------------------------------------------------------------

#[test]
fn missing_base_file_exits_nonzero() {
    let env = Env::with_data(Path::new("/nonexistent/flowers.json"), &data_dir().join("flower_meta.json"));
    let out = env.run(&["list", "--no-save"]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("加载失败"), "{}", stderr(&out));
}

#[test]
fn lenient_tolerates_missing_metadata() {
    let env = Env::with_data(&data_dir().join("flowers.json"), Path::new("/nonexistent/meta.json"));

    let strict = env.run(&["list", "--no-save"]);
    assert!(!strict.status.success());

    let lenient = env.run(&["--lenient", "list", "--no-save"]);
    assert!(lenient.status.success(), "{}", stderr(&lenient));
    assert!(stdout(&lenient).contains("元信息完成度：0/12"));
}

#[test]
fn embedded_ignores_configured_files() {
    let env = Env::with_data(Path::new("/nonexistent/a.json"), Path::new("/nonexistent/b.json"));
    let out = env.run(&["--embedded", "show", "牡丹"]);
    assert!(out.status.success(), "{}", stderr(&out));
    assert!(stdout(&out).contains("花语：富贵吉祥"));
}

// ---------------------------------------------------------------------------
// import
// ---------------------------------------------------------------------------

#[test]
fn import_writes_base_records() {
    let env = Env::new();
    let target = env.dir.path().join("out.json");
    let out = env.run(&[
        "import",
        data_dir().join("flowers.md").to_str().expect("utf8 path"),
        "-o",
        target.to_str().expect("utf8 path"),
    ]);
    assert!(out.status.success(), "{}", stderr(&out));
    assert!(stdout(&out).contains("已导入 12 个花名"));

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&target).expect("output file")).expect("json");
    let first = &written[0];
    assert_eq!(first["name"], "牡丹");
    assert_eq!(first["group"], 1);
    assert_eq!(first["tier"], "国色");
    assert!(first["image_url"].is_null());
    assert!(first["page_url"].is_null());
    assert_eq!(written.as_array().map(Vec::len), Some(12));
}
