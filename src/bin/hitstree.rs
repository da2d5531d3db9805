//! Aggregates request paths read from files or stdin into a templated report.
//!
//! Each input line is `path`, `path<TAB>hits`, or `path<TAB>hits<TAB>tag,tag`.
//! Blank lines are skipped.
//!
//! Run with: `cargo run --features cli --bin hitstree -- --max-children 10 access.log`

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use hits_tree::{ConfigError, HitsTree, TreeConfig};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Tab-separated `hits`, `path`, `tags` lines
    #[default]
    Text,
    /// The report as a JSON document
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "hitstree", about = "Count path hits and detect templated segments")]
struct Cli {
    /// Input files; reads stdin when none are given
    inputs: Vec<PathBuf>,

    /// JSON file with `max_children`, `placeholder` and `delimiter`
    #[arg(long)]
    config: Option<PathBuf>,

    /// Children per node before they collapse into the placeholder
    #[arg(long)]
    max_children: Option<usize>,

    /// Component used for collapsed branches
    #[arg(long)]
    placeholder: Option<String>,

    /// Path component separator
    #[arg(long)]
    delimiter: Option<char>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Log to stderr (honours RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("{}: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("reading input: {0}")]
    Io(#[from] io::Error),

    #[error("{}: {source}", .path.display())]
    ConfigFile {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("encoding report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("line {line}: {message}")]
    Input { line: usize, message: String },
}

type CliResult<T> = std::result::Result<T, CliError>;

/// One parsed input line.
#[derive(Debug, PartialEq, Eq)]
struct Record<'a> {
    path: &'a str,
    hits: u64,
    tags: Vec<&'a str>,
}

fn parse_line(line: &str, number: usize) -> CliResult<Option<Record<'_>>> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Ok(None);
    }
    let mut fields = line.split('\t');
    let path = fields.next().unwrap_or_default();
    let hits = match fields.next().map(str::trim) {
        None | Some("") => 1,
        Some(raw) => raw.parse().map_err(|_| CliError::Input {
            line: number,
            message: format!("invalid hit count {raw:?}"),
        })?,
    };
    let tags = fields
        .next()
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .collect()
        })
        .unwrap_or_default();
    if fields.next().is_some() {
        return Err(CliError::Input {
            line: number,
            message: "expected at most three tab-separated fields".to_owned(),
        });
    }
    Ok(Some(Record { path, hits, tags }))
}

fn load_config(cli: &Cli) -> CliResult<TreeConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let file = File::open(path).map_err(|source| CliError::Open {
                path: path.clone(),
                source,
            })?;
            serde_json::from_reader(BufReader::new(file)).map_err(|source| {
                CliError::ConfigFile {
                    path: path.clone(),
                    source,
                }
            })?
        }
        None => TreeConfig::default(),
    };
    if let Some(max_children) = cli.max_children {
        config.max_children = max_children;
    }
    if let Some(placeholder) = &cli.placeholder {
        config.placeholder = placeholder.clone();
    }
    if let Some(delimiter) = cli.delimiter {
        config.delimiter = delimiter;
    }
    Ok(config)
}

fn ingest<R: BufRead>(tree: &mut HitsTree, reader: R) -> CliResult<u64> {
    let mut records = 0;
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if let Some(record) = parse_line(&line, idx + 1)? {
            tree.add_hits(record.path, record.hits, record.tags);
            records += 1;
        }
    }
    Ok(records)
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
    } else {
        tracing_subscriber::EnvFilter::new("off")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> CliResult<()> {
    let config = load_config(&cli)?;
    tracing::info!(
        max_children = config.max_children,
        placeholder = %config.placeholder,
        delimiter = %config.delimiter,
        "building hits tree"
    );
    let mut tree = HitsTree::with_config(config)?;

    if cli.inputs.is_empty() {
        let records = ingest(&mut tree, io::stdin().lock())?;
        tracing::info!(records, "read stdin");
    }
    for path in &cli.inputs {
        let file = File::open(path).map_err(|source| CliError::Open {
            path: path.clone(),
            source,
        })?;
        let records = ingest(&mut tree, BufReader::new(file))?;
        tracing::info!(records, input = %path.display(), "read input");
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.format {
        Format::Text => {
            let report = tree.report();
            if !report.is_empty() {
                writeln!(out, "{report}")?;
            }
        }
        Format::Json => {
            serde_json::to_writer_pretty(&mut out, &tree.report())?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
