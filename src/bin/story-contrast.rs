use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "story-contrast", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a story (or a single page) for text with low contrast against its background.
    Check(CheckArgs),
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Input JSON: a story with `pages`, or a single page.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Directory holding local copies of the story's media. Defaults to the input's directory.
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Worker threads for background resolution (defaults to rayon's global pool).
    #[arg(long)]
    threads: Option<usize>,

    /// Print the full report as JSON instead of a summary.
    #[arg(long)]
    json: bool,

    /// Conformance level to enforce.
    #[arg(long, value_enum, default_value_t = LevelChoice::Aa)]
    level: LevelChoice,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LevelChoice {
    Aa,
    Aaa,
}

impl From<LevelChoice> for story_contrast::WcagLevel {
    fn from(value: LevelChoice) -> Self {
        match value {
            LevelChoice::Aa => Self::AA,
            LevelChoice::Aaa => Self::AAA,
        }
    }
}

/// Exit code for runs that could not complete.
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let res = match cli.cmd {
        Command::Check(args) => cmd_check(args),
    };
    res.unwrap_or_else(|err| {
        eprintln!("error: {err:#}");
        ExitCode::from(EXIT_ERROR)
    })
}

fn read_story_json(path: &Path) -> anyhow::Result<story_contrast::Story> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("read story '{}'", path.display()))?;
    story_contrast::Story::from_json(&json)
        .with_context(|| format!("parse story '{}'", path.display()))
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<ExitCode> {
    let story = read_story_json(&args.in_path)?;

    let assets_root = match &args.assets {
        Some(dir) => dir.clone(),
        None => args
            .in_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf(),
    };
    let loader = story_contrast::FsMediaLoader::new(assets_root);
    let opts = story_contrast::CheckOpts::default()
        .with_level(args.level.into())
        .with_threads(args.threads);

    let report = story_contrast::check_story(&story, &loader, &opts)?;

    if args.json {
        let out = serde_json::to_string_pretty(&report).with_context(|| "serialize report")?;
        println!("{out}");
    } else {
        for page in &report.pages {
            let status = if page.has_low_contrast() { "LOW" } else { "ok" };
            println!(
                "{status:<4} page '{}': texts={} backgrounds={} unresolved={}",
                page.page_id,
                page.texts_checked,
                page.backgrounds_resolved,
                page.backgrounds_unresolved
            );
            for f in &page.findings {
                println!(
                    "     text '{}' {} on '{}' {}: {:.2}:1 < {:.1}:1",
                    f.text_element_id,
                    f.text_color.to_hex(),
                    f.background_element_id,
                    f.background_color.to_hex(),
                    f.contrast_ratio,
                    f.required_ratio
                );
            }
        }
    }

    Ok(if report.has_low_contrast() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
