//! Command-line surface: argument types and the headless commands.
//!
//! Every command writes to a caller-supplied writer so the harnesses can
//! capture output without spawning a process.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand, ValueEnum};
use huaming_core::{
    catalog_md, config::Config, detail::NOT_FOUND, validate, CatalogView, Choice, Dataset,
    FileStore, FilterOptions, KeyValueStore, PreferenceStore, RecordDetail, Segment, Selection,
    SortMode, Toggle,
};
use huaming_sources::{AnySource, EmbeddedSource, FileSource, MetaPolicy};

#[derive(Debug, Parser)]
#[command(name = "huaming", about = "花名 — browse, filter and search a flower-naming catalog")]
pub struct Cli {
    /// Write debug logs to /tmp/huaming-debug.log (tail -f to inspect).
    #[arg(long, global = true)]
    pub debug: bool,

    /// Config file to use instead of ~/.config/huaming/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Use the bundled sample dataset instead of the configured files.
    #[arg(long, global = true)]
    pub embedded: bool,

    /// Continue without metadata when it cannot be loaded.
    #[arg(long, global = true)]
    pub lenient: bool,

    #[command(subcommand)]
    pub command: Option<Cmd>,
}

#[derive(Debug, Subcommand)]
pub enum Cmd {
    /// Interactive list and detail view (the default).
    Tui,
    /// Print the filtered, grouped catalog.
    List(ListArgs),
    /// Print every field of one flower name.
    Show { name: String },
    /// Check the metadata against the base records.
    Validate,
    /// Convert a markdown catalog into base-record JSON.
    Import {
        input: PathBuf,
        /// Output file; stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    #[arg(long)]
    pub keyword: Option<String>,
    #[arg(long)]
    pub only_filled: bool,
    #[arg(long)]
    pub alias_only: bool,
    #[arg(long)]
    pub meaning_only: bool,
    #[arg(long)]
    pub season_only: bool,
    /// Season substring, or `all`.
    #[arg(long)]
    pub season: Option<String>,
    /// Group number, or `all`.
    #[arg(long)]
    pub group: Option<String>,
    /// Tier, or `all`.
    #[arg(long)]
    pub tier: Option<String>,
    /// `default`, `name` or `filled`.
    #[arg(long)]
    pub sort: Option<SortMode>,
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
    /// Start from the saved selection instead of the defaults.
    #[arg(long)]
    pub restore: bool,
    /// Do not save the resulting selection.
    #[arg(long)]
    pub no_save: bool,
}

impl ListArgs {
    /// Layer the flags on top of `sel`. Toggle flags only ever switch on.
    pub fn apply(&self, sel: &mut Selection) {
        if let Some(k) = &self.keyword {
            sel.set_keyword(k.clone());
        }
        let flags = [
            (Toggle::OnlyFilled, self.only_filled),
            (Toggle::AliasOnly, self.alias_only),
            (Toggle::MeaningOnly, self.meaning_only),
            (Toggle::SeasonOnly, self.season_only),
        ];
        for (toggle, on) in flags {
            if on {
                sel.set_toggle(toggle, true);
            }
        }
        if let Some(s) = &self.season {
            sel.set_season(Choice::parse(s));
        }
        if let Some(g) = &self.group {
            sel.set_group(Choice::parse(g));
        }
        if let Some(t) = &self.tier {
            sel.set_tier(Choice::parse(t));
        }
        if let Some(sort) = self.sort {
            sel.set_sort(sort);
        }
    }
}

// ---------------------------------------------------------------------------
// Wiring
// ---------------------------------------------------------------------------

/// The dataset source picked by the flags and config.
pub fn source(cli: &Cli, config: &Config) -> AnySource {
    if cli.embedded {
        AnySource::Embedded(EmbeddedSource::sample())
    } else {
        AnySource::File(FileSource::new(
            &config.data.base_path,
            &config.data.meta_path,
        ))
    }
}

/// Run the async load to completion on a current-thread runtime.
pub fn load_blocking(source: &AnySource, policy: MetaPolicy) -> huaming_core::Result<Dataset> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    rt.block_on(huaming_sources::load(source, policy))
}

pub fn file_prefs(config: &Config) -> PreferenceStore<FileStore> {
    PreferenceStore::with_key(
        FileStore::new(config.prefs.resolved_path()),
        config.prefs.key.clone(),
    )
}

/// Dispatch one invocation. Returns the process exit code.
pub fn run(cli: Cli, config: Config, out: &mut impl Write) -> anyhow::Result<u8> {
    let policy = MetaPolicy::lenient(cli.lenient || config.data.lenient_meta);
    let load = || load_blocking(&source(&cli, &config), policy);

    match &cli.command {
        None | Some(Cmd::Tui) => {
            let prefs = PreferenceStore::with_key(
                Box::new(FileStore::new(config.prefs.resolved_path())) as Box<dyn KeyValueStore>,
                config.prefs.key.clone(),
            );
            let loaded = load();
            huaming_tui::run(loaded, config, prefs)?;
            Ok(0)
        }
        Some(Cmd::List(args)) => {
            let dataset = loaded_or_bail(load())?;
            let mut prefs = file_prefs(&config);
            list(&dataset, args, &mut prefs, out)?;
            Ok(0)
        }
        Some(Cmd::Show { name }) => {
            let dataset = loaded_or_bail(load())?;
            Ok(if show(&dataset, name, out)? { 0 } else { 1 })
        }
        Some(Cmd::Validate) => {
            let dataset = loaded_or_bail(load())?;
            Ok(if check(&dataset, out)? { 0 } else { 1 })
        }
        Some(Cmd::Import { input, output }) => {
            import(input, output.as_deref(), out)?;
            Ok(0)
        }
    }
}

fn loaded_or_bail(loaded: huaming_core::Result<Dataset>) -> anyhow::Result<Dataset> {
    loaded.map_err(|err| anyhow::anyhow!(err.load_failure_text()))
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// `huaming list`.
pub fn list<S: KeyValueStore>(
    dataset: &Dataset,
    args: &ListArgs,
    prefs: &mut PreferenceStore<S>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let records = dataset.records();
    let options = FilterOptions::from_records(&records);

    let mut selection = if args.restore {
        let mut saved = prefs.load_or_default();
        saved.reconcile(&options);
        saved
    } else {
        Selection::default()
    };
    args.apply(&mut selection);

    if let Choice::Only(g) = &selection.group {
        if !options.groups.contains(g) {
            bail!("没有这个分组：{g}（可选：{}）", options.groups.join(", "));
        }
    }
    if let Choice::Only(t) = &selection.tier {
        if !options.tiers.contains(t) {
            bail!("没有这个等级：{t}（可选：{}）", options.tiers.join(", "));
        }
    }

    let view = CatalogView::build(&records, &selection);
    match args.format {
        OutputFormat::Text => write_text(&view, out)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &view)?;
            writeln!(out)?;
        }
    }

    if !args.no_save {
        if let Err(err) = prefs.save(&selection) {
            tracing::warn!(%err, "could not save preferences");
        }
    }
    Ok(())
}

/// Highlighted segments are wrapped in `【】`.
fn marked(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|s| {
            if s.highlight {
                format!("【{}】", s.text)
            } else {
                s.text.clone()
            }
        })
        .collect()
}

pub fn write_text(view: &CatalogView<'_>, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "{}（{}）", view.progress.text(), view.progress.detail_text())?;
    writeln!(out, "{}", view.summary)?;
    writeln!(out, "{}", view.status_text())?;
    if view.is_empty() {
        writeln!(out)?;
        writeln!(out, "没有符合条件的花名。")?;
        return Ok(());
    }
    for group in &view.groups {
        writeln!(out)?;
        writeln!(out, "{}", group.title())?;
        for row in &group.records {
            writeln!(
                out,
                "  {}  别名：{}  花语：{}  季节：{}  {}",
                marked(&row.name),
                marked(&row.alias),
                marked(&row.meaning),
                marked(&row.season),
                row.image_note
            )?;
        }
    }
    Ok(())
}

/// `huaming show`. Returns whether the name was found.
pub fn show(dataset: &Dataset, name: &str, out: &mut impl Write) -> anyhow::Result<bool> {
    let Some(d) = RecordDetail::lookup(dataset, name) else {
        writeln!(out, "{NOT_FOUND}")?;
        return Ok(false);
    };
    writeln!(out, "{}", d.record.name)?;
    writeln!(out, "分组：{}", d.group_title())?;
    writeln!(out, "等级：{}", d.tier)?;
    writeln!(out, "别名：{}", d.alias)?;
    writeln!(out, "花语：{}", d.meaning)?;
    writeln!(out, "季节：{}", d.season)?;
    writeln!(out, "赏花：{}", d.season_hint)?;
    writeln!(out, "拼音：{}", d.pinyin)?;
    writeln!(out, "首字母：{}", d.initials)?;
    writeln!(out, "图片：{}", d.image_note)?;
    Ok(true)
}

/// `huaming validate`. Returns whether the dataset passed.
pub fn check(dataset: &Dataset, out: &mut impl Write) -> anyhow::Result<bool> {
    let report = validate(&dataset.base, &dataset.metas);
    write!(out, "{}", report.render())?;
    Ok(report.is_ok())
}

/// `huaming import`.
pub fn import(input: &Path, output: Option<&Path>, out: &mut impl Write) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("reading {}", input.display()))?;
    let records = catalog_md::parse(&text);
    let json = serde_json::to_string_pretty(&records)?;
    tracing::info!(count = records.len(), input = %input.display(), "markdown catalog parsed");
    match output {
        Some(path) => {
            std::fs::write(path, format!("{json}\n"))
                .with_context(|| format!("writing {}", path.display()))?;
            writeln!(out, "已导入 {} 个花名 → {}", records.len(), path.display())?;
        }
        None => writeln!(out, "{json}")?,
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
