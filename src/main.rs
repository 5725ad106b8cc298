//! CLI entry point for taskprune

use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::{self, Command};

use chrono::NaiveDate;
use clap::{ArgAction, ArgMatches, CommandFactory, FromArgMatches, Parser, ValueEnum};
use log::{LevelFilter, info, warn};
use termcolor::{ColorChoice, StandardStream};

use taskprune::{
    FilterSpec, FilterTarget, Format, OutputConfig, PipelineConfig, Result, View, load_tree,
    render, render_console, run,
};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "taskprune")]
#[command(about = "Filter, reshape and export a task hierarchy snapshot")]
#[command(version)]
#[command(after_help = FILTER_HELP)]
struct Args {
    /// Snapshot to read (JSON), or - for stdin
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    input: PathBuf,

    /// Output file; the suffix picks the format (.tp, .taskpaper, .md, .ft, .opml, .html, .json).
    /// Without it a tree is printed to stdout
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,

    /// Context mode (as opposed to project mode)
    #[arg(short = 'C', long = "contexts")]
    contexts: bool,

    /// Flatten project/task structure
    #[arg(short = 'F', long = "flatten")]
    flatten: bool,

    /// Sort tasks by completion
    #[arg(long = "tsc")]
    tsc: bool,

    /// Prune empty projects, folders and contexts
    #[arg(long = "prune")]
    prune: bool,

    /// Open the output file with the registered application
    #[arg(long = "open", requires = "output")]
    open: bool,

    /// Include folders matching regexp
    #[arg(long = "fi", value_name = "REGEXP", allow_hyphen_values = true)]
    fi: Vec<String>,

    /// Exclude folders matching regexp
    #[arg(long = "fe", value_name = "REGEXP", allow_hyphen_values = true)]
    fe: Vec<String>,

    /// Include projects matching regexp
    #[arg(long = "pi", value_name = "REGEXP", allow_hyphen_values = true)]
    pi: Vec<String>,

    /// Exclude projects matching regexp
    #[arg(long = "pe", value_name = "REGEXP", allow_hyphen_values = true)]
    pe: Vec<String>,

    /// Include contexts matching regexp
    #[arg(long = "ci", value_name = "REGEXP", allow_hyphen_values = true)]
    ci: Vec<String>,

    /// Exclude contexts matching regexp
    #[arg(long = "ce", value_name = "REGEXP", allow_hyphen_values = true)]
    ce: Vec<String>,

    /// Include tasks matching regexp
    #[arg(long = "ti", value_name = "REGEXP", allow_hyphen_values = true)]
    ti: Vec<String>,

    /// Exclude tasks matching regexp
    #[arg(long = "te", value_name = "REGEXP", allow_hyphen_values = true)]
    te: Vec<String>,

    /// Include projects with completion matching regexp
    #[arg(long = "pci", value_name = "REGEXP", allow_hyphen_values = true)]
    pci: Vec<String>,

    /// Exclude projects with completion matching regexp
    #[arg(long = "pce", value_name = "REGEXP", allow_hyphen_values = true)]
    pce: Vec<String>,

    /// Include tasks with completion matching regexp
    #[arg(long = "tci", value_name = "REGEXP", allow_hyphen_values = true)]
    tci: Vec<String>,

    /// Exclude tasks with completion matching regexp
    #[arg(long = "tce", value_name = "REGEXP", allow_hyphen_values = true)]
    tce: Vec<String>,

    /// Date completion filters count days from (YYYY-MM-DD, default: today)
    #[arg(long = "today", value_name = "DATE")]
    today: Option<NaiveDate>,

    /// Title for OPML and HTML documents
    #[arg(long = "title", default_value = "Tasks")]
    title: String,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Log each pass (-v), decisions (-vv), every pattern test (-vvv)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

const FILTER_HELP: &str = "\
Filtering:
  Filters are regular expressions matched against an item's text. When an item
  matches, all its ancestors up to the root and all its descendants are selected.
  Several filters can be given; they run in command-line order.

Completion dates:
  Completion filters match against a string of the form
  '%Y-%m-%d %A %B -Nd', e.g. '2013-02-16 Saturday February -44d', so patterns
  can pick a day, a weekday, a month or how many days ago an item was completed.

Examples:
  taskprune -i db.json -o home.tp --fi '^Home$'
  taskprune -i db.json -o x.tp --fi '^Home$' --tce '.' --prune
  taskprune -i db.json -o x.tp --fi '^Home$' --tci '-[0-6]d' --prune";

/// Flag id, target and include/exclude of every filter option.
const FILTER_FLAGS: [(&str, FilterTarget, bool); 12] = [
    ("fi", FilterTarget::FolderName, true),
    ("fe", FilterTarget::FolderName, false),
    ("pi", FilterTarget::ProjectName, true),
    ("pe", FilterTarget::ProjectName, false),
    ("ci", FilterTarget::ContextName, true),
    ("ce", FilterTarget::ContextName, false),
    ("ti", FilterTarget::TaskName, true),
    ("te", FilterTarget::TaskName, false),
    ("pci", FilterTarget::ProjectCompletion, true),
    ("pce", FilterTarget::ProjectCompletion, false),
    ("tci", FilterTarget::TaskCompletion, true),
    ("tce", FilterTarget::TaskCompletion, false),
];

/// Collect filters in the order they appeared in argv, across all flags.
fn filters_in_argv_order(matches: &ArgMatches) -> Vec<FilterSpec> {
    let mut indexed = Vec::new();
    for (id, target, include) in FILTER_FLAGS {
        let (Some(values), Some(indices)) =
            (matches.get_many::<String>(id), matches.indices_of(id))
        else {
            continue;
        };
        for (pattern, index) in values.zip(indices) {
            indexed.push((
                index,
                FilterSpec {
                    target,
                    pattern: Some(pattern.clone()),
                    include,
                },
            ));
        }
    }
    indexed.sort_by_key(|(index, _)| *index);
    indexed.into_iter().map(|(_, spec)| spec).collect()
}

fn setup_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

/// Launch the platform's handler for `path`.
fn open_file(path: &Path) {
    let opener = if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    };
    match Command::new(opener).arg(path).status() {
        Ok(status) if status.success() => {}
        Ok(status) => warn!("{} exited with {}", opener, status),
        Err(e) => warn!("could not run {}: {}", opener, e),
    }
}

fn export(args: &Args, matches: &ArgMatches) -> Result<()> {
    // Resolve the format before doing any work.
    let format = args.output.as_deref().map(Format::from_path).transpose()?;

    let view = if args.contexts {
        View::Contexts
    } else {
        View::Projects
    };
    let pipeline = PipelineConfig {
        view,
        filters: filters_in_argv_order(matches),
        flatten: args.flatten,
        sort_by_completion: args.tsc,
        prune: args.prune,
        today: args.today,
        now: None,
    };
    let output_config = OutputConfig {
        use_color: should_use_color(args.color),
        title: args.title.clone(),
    };

    let mut tree = load_tree(&args.input)?;
    run(&mut tree, &pipeline)?;

    match (&args.output, format) {
        (Some(path), Some(format)) => {
            let buf = render(format, &mut tree, view, &output_config, Vec::new())?;
            fs::write(path, buf)?;
            info!("wrote {}", path.display());
            if args.open {
                open_file(path);
            }
        }
        _ => {
            let choice = if output_config.use_color {
                ColorChoice::Auto
            } else {
                ColorChoice::Never
            };
            render_console(&mut tree, view, StandardStream::stdout(choice))?;
        }
    }
    Ok(())
}

fn main() {
    let matches = Args::command().get_matches();
    let args = Args::from_arg_matches(&matches).unwrap_or_else(|e| {
        eprintln!("taskprune: argument parsing error: {}", e);
        process::exit(1);
    });

    setup_logging(args.verbose);

    if let Err(e) = export(&args, &matches) {
        eprintln!("taskprune: {}", e);
        process::exit(1);
    }
}
