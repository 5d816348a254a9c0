use anyhow::{Context, Result, bail};
use env_logger::Env;
use markdown_rtl_config::Config;
use markdown_rtl_engine::{
    Direction, DirectionOracle, Host, MarkdownBuffer, NativeRtl, Position, Selection,
    TableScanner, TextBuffer, io, reveal_marks,
};
use std::{
    env,
    fs::OpenOptions,
    path::{Path, PathBuf},
    process,
    time::Duration,
};

mod editor;

const USAGE: &str = "Usage:
  markdown-rtl-cli inspect <file>
  markdown-rtl-cli apply (--rtl|--ltr) <file> <line>[:<line>]...
  markdown-rtl-cli edit <file>";

enum Command {
    Inspect(PathBuf),
    Apply {
        direction: Direction,
        path: PathBuf,
        selections: Vec<Selection>,
    },
    Edit(PathBuf),
}

/// Host for one-shot commands: the document from disk, notices go to stderr.
struct BatchHost {
    document: MarkdownBuffer,
    auto_pair: bool,
}

impl Host for BatchHost {
    type Doc = MarkdownBuffer;

    fn active_document(&mut self) -> Option<&mut MarkdownBuffer> {
        Some(&mut self.document)
    }

    fn show_transient_notice(&mut self, message: &str, _duration: Duration) {
        eprintln!("{message}");
    }

    fn auto_pair_enabled(&self) -> bool {
        self.auto_pair
    }
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let command = match parse_args(command_args(&args)) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("{USAGE}");
            process::exit(1);
        }
    };

    let config = match Config::load_or_default() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            eprintln!("Fix or remove {}", Config::config_path().display());
            process::exit(1);
        }
    };

    match command {
        Command::Inspect(path) => {
            init_logging(None, false)?;
            inspect(&path)
        }
        Command::Apply {
            direction,
            path,
            selections,
        } => {
            init_logging(None, false)?;
            apply(&config, &path, direction, &selections)
        }
        Command::Edit(path) => {
            init_logging(config.log_file.as_ref(), true)?;
            editor::run(&config, &path)
        }
    }
}

/// Everything after the program name; empty when the OS passed no argv at all.
fn command_args(args: &[String]) -> &[String] {
    args.get(1..).unwrap_or_default()
}

fn parse_args(args: &[String]) -> Result<Command> {
    let Some((name, rest)) = args.split_first() else {
        bail!("no command given");
    };
    match (name.as_str(), rest) {
        ("inspect", [path]) => Ok(Command::Inspect(PathBuf::from(path))),
        ("edit", [path]) => Ok(Command::Edit(PathBuf::from(path))),
        ("apply", [flag, path, ranges @ ..]) if !ranges.is_empty() => {
            let direction = match flag.as_str() {
                "--rtl" => Direction::Rtl,
                "--ltr" => Direction::Ltr,
                other => bail!("expected --rtl or --ltr, got '{other}'"),
            };
            let selections = ranges
                .iter()
                .map(|range| parse_line_range(range))
                .collect::<Result<Vec<_>>>()?;
            Ok(Command::Apply {
                direction,
                path: PathBuf::from(path),
                selections,
            })
        }
        (other, _) => bail!("unrecognised arguments for '{other}'"),
    }
}

/// `7` or `3:9`, one-based and inclusive.
fn parse_line_range(range: &str) -> Result<Selection> {
    let (first, last) = range.split_once(':').unwrap_or((range, range));
    let parse = |n: &str| -> Result<usize> {
        let n: usize = n
            .trim()
            .parse()
            .with_context(|| format!("invalid line number '{n}'"))?;
        if n == 0 {
            bail!("line numbers start at 1");
        }
        Ok(n - 1)
    };
    Ok(Selection::new(
        Position::line_start(parse(first)?),
        Position::line_start(parse(last)?),
    ))
}

/// Logs go to `log_file` when given, else to stderr; the editor owns the
/// terminal, so without a log file it logs nothing. `RUST_LOG` overrides the
/// default level otherwise.
fn init_logging(log_file: Option<&PathBuf>, interactive: bool) -> Result<()> {
    let default_level = if log_file.is_some() { "debug" } else { "warn" };
    let mut builder =
        env_logger::Builder::from_env(Env::default().default_filter_or(default_level));
    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("cannot open log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    } else if interactive {
        builder.filter_level(log::LevelFilter::Off);
    }
    builder.init();
    Ok(())
}

fn inspect(path: &Path) -> Result<()> {
    let document = io::read_document(path)?;
    let scanner = TableScanner::new(&document);

    for line in 0..document.line_count() {
        let offset = document.position_to_offset(Position::line_start(line));
        let direction = document.direction_at(offset);
        let table = if scanner.table_at(line).is_some() { 'T' } else { ' ' };
        println!(
            "{:>5} {direction} {table} {}",
            line + 1,
            reveal_marks(&document.line(line))
        );
    }
    Ok(())
}

fn apply(
    config: &Config,
    path: &Path,
    direction: Direction,
    selections: &[Selection],
) -> Result<()> {
    let mut document = io::read_document(path)?;
    document.set_selections(selections);

    let mut host = BatchHost {
        document,
        auto_pair: config.auto_pair_brackets,
    };
    let mut plugin = NativeRtl::new(config.direction.clone());
    let Some(outcome) = plugin.request_direction(&mut host, direction) else {
        return Ok(());
    };

    if outcome.changed() {
        io::write_document(path, &host.document)?;
    }
    println!(
        "{}: {} line(s) checked, {} mark(s) inserted, {} removed, {} table(s) corrected",
        path.display(),
        outcome.lines_checked,
        outcome.marks_inserted,
        outcome.marks_removed,
        outcome.tables_corrected
    );
    Ok(())
}
