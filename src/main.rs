//! jx - classify Java file objects and check name compatibility.
//!
//! Usage:
//!   jx list [PATH]                   List file objects under a root
//!   jx find [PATH] NAME              Find file objects compatible with NAME
//!   jx check FILE NAME               Check a single file against NAME
//!   jx kinds                         Show the kind/extension table
//!   jx supports ANNOTATION -p PAT    Match an annotation type against patterns
//!   jx --help                        Show help

use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result, bail};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use jxfile_core::{FileObject, JavaFileObject, SimpleJavaFileObject, SupportedAnnotationTypes};
use jxfile_scan::{JwalkLocator, Kind, LocateConfig, PathFileObject};

#[derive(Parser)]
#[command(
    name = "jx",
    version,
    about = "Classify Java source and class files",
    long_about = "jx lists Java file objects under a source or class path, reports \
                  their kind, nesting and access hints, and checks which files a \
                  compiler would match to a given type name."
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List file objects under a root
    List {
        /// Source or class path root
        #[arg(default_value = ".")]
        path: PathBuf,

        #[command(flatten)]
        filter: FilterArgs,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Find file objects compatible with a simple name
    Find {
        /// Simple name of the type, e.g. `Foo`
        name: String,

        /// Source or class path root
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Kind to match
        #[arg(short, long, default_value = "source", value_parser = parse_kind)]
        kind: Kind,

        #[command(flatten)]
        filter: FilterArgs,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Check whether one file is compatible with a simple name
    Check {
        /// File to check (need not exist)
        file: PathBuf,

        /// Simple name of the type, e.g. `Foo`
        name: String,

        /// Kind to match (defaults to the file's own kind)
        #[arg(short, long, value_parser = parse_kind)]
        kind: Option<Kind>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Show the kind/extension table
    Kinds {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Check an annotation type against supported annotation type patterns
    Supports {
        /// Canonical name of the annotation type
        annotation: String,

        /// Module the annotation type is declared in
        #[arg(short, long)]
        module: Option<String>,

        /// Supported annotation type pattern (repeatable), e.g. `com.example.*`
        #[arg(short, long = "pattern", required = true)]
        patterns: Vec<String>,
    },
}

#[derive(clap::Args)]
struct FilterArgs {
    /// Only include these kinds (repeatable)
    #[arg(short = 'K', long = "only", value_parser = parse_kind)]
    kinds: Vec<Kind>,

    /// Package to list, e.g. `com.example`
    #[arg(short, long)]
    package: Option<String>,

    /// Do not descend into subpackages
    #[arg(long)]
    no_recurse: bool,

    /// Include hidden files
    #[arg(long)]
    hidden: bool,

    /// Follow symbolic links
    #[arg(short = 'L', long)]
    follow_symlinks: bool,

    /// Glob of paths to skip (repeatable)
    #[arg(short, long = "ignore")]
    ignore: Vec<String>,

    /// Decode class files while listing and report malformed ones
    #[arg(long)]
    eager_hints: bool,

    /// Walker threads (0 = auto)
    #[arg(short, long, default_value = "0")]
    threads: usize,
}

impl FilterArgs {
    fn to_config(&self, root: &Path) -> Result<LocateConfig> {
        let config = LocateConfig::builder()
            .root(root)
            .kinds(self.kinds.clone())
            .package(self.package.clone())
            .recurse(!self.no_recurse)
            .include_hidden(self.hidden)
            .follow_symlinks(self.follow_symlinks)
            .ignore_patterns(self.ignore.clone())
            .eager_hints(self.eager_hints)
            .threads(self.threads)
            .build()
            .context("Invalid options")?;
        Ok(config)
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn parse_kind(s: &str) -> std::result::Result<Kind, String> {
    Kind::from_str(s).map_err(|_| format!("unknown kind `{s}` (expected source, class, html or other)"))
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    match cli.command {
        Command::List {
            path,
            filter,
            format,
        } => run_list(&path, &filter, format),
        Command::Find {
            name,
            path,
            kind,
            filter,
            format,
        } => run_find(&path, &name, kind, &filter, format),
        Command::Check {
            file,
            name,
            kind,
            format,
        } => run_check(&file, &name, kind, format),
        Command::Kinds { format } => run_kinds(format),
        Command::Supports {
            annotation,
            module,
            patterns,
        } => run_supports(&annotation, module.as_deref(), patterns),
    }
}

/// Initialize structured logging on stderr.
fn init_tracing(verbose: u8) -> Result<()> {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .context("Failed to create env filter")?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(env_filter)
        .try_init()
        .context("Failed to initialize tracing")?;
    Ok(())
}

/// Locate file objects and print them.
fn run_list(path: &Path, filter: &FilterArgs, format: OutputFormat) -> Result<()> {
    let config = filter.to_config(path)?;
    let set = JwalkLocator::new().locate(&config).context("Locating failed")?;

    match format {
        OutputFormat::Text => {
            println!();
            println!("{}", "─".repeat(70));
            println!(" {}", set.root.display());
            println!(
                " {} sources, {} classes, {} html, {} other ({})",
                set.stats.sources,
                set.stats.classes,
                set.stats.html,
                set.stats.other,
                format_size(set.stats.total_size)
            );
            println!(" Located in {:.2}s", set.duration.as_secs_f64());
            println!("{}", "─".repeat(70));
            println!();

            for object in &set {
                print_object(object);
            }

            if !set.warnings.is_empty() {
                println!();
                println!("{} warning(s):", set.warnings.len());
                for warning in &set.warnings {
                    println!("  {}", warning.message);
                }
            }
        }
        OutputFormat::Json => {
            let entries: Vec<_> = set.iter().map(PathFileObject::entry).collect();
            let report = serde_json::json!({
                "root": set.root,
                "stats": set.stats,
                "objects": entries,
                "warnings": set.warnings,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

/// Locate file objects compatible with a simple name.
fn run_find(
    path: &Path,
    name: &str,
    kind: Kind,
    filter: &FilterArgs,
    format: OutputFormat,
) -> Result<()> {
    let config = filter.to_config(path)?;
    let set = JwalkLocator::new().locate(&config).context("Locating failed")?;
    let found = set
        .find_compatible(name, kind)
        .with_context(|| format!("Cannot match `{name}`"))?;

    match format {
        OutputFormat::Text => {
            if found.is_empty() {
                println!("No {kind} file objects compatible with `{name}`.");
            }
            for object in found {
                print_object(object);
            }
        }
        OutputFormat::Json => {
            let entries: Vec<_> = found.into_iter().map(PathFileObject::entry).collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }

    Ok(())
}

/// Check a single file against a simple name.
fn run_check(file: &Path, name: &str, kind: Option<Kind>, format: OutputFormat) -> Result<()> {
    let object: Box<dyn JavaFileObject> = if file.is_file() {
        let file = file.canonicalize().context("Invalid path")?;
        let root = file.parent().map(Path::to_path_buf).unwrap_or_default();
        let metadata = std::fs::metadata(&file).context("Cannot read metadata")?;
        Box::new(PathFileObject::new(
            &root,
            file.clone(),
            metadata.len(),
            metadata.modified().ok(),
        ))
    } else {
        Box::new(SimpleJavaFileObject::from_path(file))
    };

    let kind = kind.unwrap_or_else(|| object.kind());
    let compatible = object
        .is_name_compatible(name, kind)
        .with_context(|| format!("Cannot match `{name}`"))?;

    match format {
        OutputFormat::Text => {
            println!(
                "{} ({}) is {}compatible with {name} as {kind}",
                object.uri_path(),
                object.kind(),
                if compatible { "" } else { "not " }
            );
            println!(
                "  nesting: {}, access: {}",
                describe(object.nesting_kind()),
                describe(object.access_level())
            );
        }
        OutputFormat::Json => {
            let report = serde_json::json!({
                "file": object.uri_path(),
                "kind": object.kind(),
                "name": name,
                "checked_kind": kind,
                "compatible": compatible,
                "nesting_kind": object.nesting_kind(),
                "access_level": object.access_level(),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

/// Print the fixed kind/extension table.
fn run_kinds(format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for kind in Kind::ALL {
                let extension = if kind.has_extension() {
                    kind.extension()
                } else {
                    "(none)"
                };
                println!("{:<8} {}", kind.to_string(), extension);
            }
        }
        OutputFormat::Json => {
            let table: Vec<_> = Kind::ALL
                .iter()
                .map(|kind| serde_json::json!({ "kind": kind, "extension": kind.extension() }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&table)?);
        }
    }
    Ok(())
}

/// Match an annotation type against supported annotation type patterns.
fn run_supports(annotation: &str, module: Option<&str>, patterns: Vec<String>) -> Result<()> {
    let supported = SupportedAnnotationTypes::new(patterns);
    let matcher = supported.matcher().context("Invalid pattern")?;

    if !matcher.matches(module, annotation) {
        bail!("{annotation} is not supported by {:?}", supported.values());
    }
    println!("{annotation} is supported");
    Ok(())
}

fn print_object(object: &PathFileObject) {
    println!(
        "  {:<6} {:<50} {:>10}  {:<9} {}",
        object.kind().to_string(),
        truncate(object.relative_path(), 50),
        format_size(object.size()),
        describe(object.nesting_kind()),
        describe(object.access_level())
    );
}

fn describe<T: ToString>(hint: Option<T>) -> String {
    hint.map(|h| h.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Format size in human-readable form.
fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}

/// Truncate a string to max length.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len - 1).collect();
        format!("{kept}…")
    }
}
