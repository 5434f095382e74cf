mod grid;
mod view;

use std::fmt;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode, WriteLogger};
use tabledom::{Document, parse_document, render_document};
use tablesort_lib::{SorterConfig, TableSorter};

use crate::grid::Grid;

#[derive(Parser)]
#[command(name = "tablesort-cli")]
#[command(about = "Click-to-sort HTML tables from the command line", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file overriding the sorter configuration
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply header clicks to a page and write the result
    Sort {
        /// HTML page to read
        input: PathBuf,

        /// Header to click, as TABLE:COLUMN (table index or id, 0-based column)
        #[arg(short, long = "click", value_parser = parse_click)]
        clicks: Vec<Click>,

        /// Write HTML here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the tables the sorter discovers
    Tables {
        /// HTML page to read
        input: PathBuf,
    },

    /// Browse and sort a page's tables in the terminal
    View {
        /// HTML page to read
        input: PathBuf,
    },
}

/// One `--click` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Click {
    table: String,
    column: usize,
}

impl fmt::Display for Click {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.table, self.column)
    }
}

fn parse_click(s: &str) -> Result<Click, String> {
    let (table, column) = s
        .rsplit_once(':')
        .ok_or_else(|| format!("expected TABLE:COLUMN, got '{}'", s))?;
    if table.is_empty() {
        return Err(format!("missing table in '{}'", s));
    }
    let column = column
        .parse()
        .map_err(|_| format!("invalid column '{}' in '{}'", column, s))?;
    Ok(Click {
        table: table.to_string(),
        column,
    })
}

/// Resolve a table given by id or discovery index to its id.
/// An exact id match wins over an index.
fn resolve_table(sorter: &TableSorter, table: &str) -> Result<String> {
    if sorter.table_index(table).is_some() {
        return Ok(table.to_string());
    }
    let index: usize = table
        .parse()
        .map_err(|_| anyhow!("no table with id '{}'", table))?;
    sorter
        .tables()
        .get(index)
        .map(|t| t.id.clone())
        .ok_or_else(|| {
            anyhow!(
                "table index {} out of range ({} tables)",
                index,
                sorter.tables().len()
            )
        })
}

fn init_logging(log_file: Option<&Path>, verbose: bool, interactive: bool) -> Result<()> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            WriteLogger::init(level, Config::default(), file)?;
        }
        // Terminal logging would draw over the view
        None if interactive => {}
        None => {
            TermLogger::init(
                level,
                Config::default(),
                TerminalMode::Stderr,
                ColorChoice::Auto,
            )?;
        }
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<SorterConfig> {
    match path {
        Some(path) => Ok(SorterConfig::load(path)?),
        None => Ok(SorterConfig::default()),
    }
}

fn load_page(input: &Path, config: SorterConfig) -> Result<(Document, TableSorter)> {
    let html = fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let mut doc = parse_document(&html);
    let mut sorter = TableSorter::new(config);
    sorter.attach(&mut doc);
    log::info!(
        "loaded {} with {} tables",
        input.display(),
        sorter.tables().len()
    );
    Ok((doc, sorter))
}

fn run_sort(
    input: &Path,
    clicks: &[Click],
    output: Option<&Path>,
    config: SorterConfig,
) -> Result<()> {
    let (mut doc, mut sorter) = load_page(input, config)?;

    for click in clicks {
        let table_id = resolve_table(&sorter, &click.table)?;
        sorter
            .click(&mut doc, &table_id, click.column)
            .with_context(|| format!("click {} failed", click))?;
        log::debug!(
            "click {} -> {:?}",
            click,
            sorter.state(&table_id).and_then(|s| s.direction)
        );
    }

    let html = render_document(&doc);
    match output {
        Some(path) => fs::write(path, html)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => io::stdout().write_all(html.as_bytes())?,
    }
    Ok(())
}

fn run_tables(input: &Path, config: SorterConfig) -> Result<()> {
    let (doc, sorter) = load_page(input, config)?;
    let mut stdout = io::stdout().lock();
    for (idx, table) in sorter.tables().iter().enumerate() {
        let grid = Grid::from_table(&doc, &table.id);
        writeln!(
            stdout,
            "{}\t{}\t{} rows\t{}",
            idx,
            table.id,
            grid.rows.len(),
            grid.headers.join(" | ")
        )?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let interactive = matches!(cli.command, Commands::View { .. });
    init_logging(cli.log_file.as_deref(), cli.verbose, interactive)?;
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Sort {
            input,
            clicks,
            output,
        } => run_sort(&input, &clicks, output.as_deref(), config),
        Commands::Tables { input } => run_tables(&input, config),
        Commands::View { input } => {
            let (doc, sorter) = load_page(&input, config)?;
            view::run(doc, sorter)
        }
    }
}
