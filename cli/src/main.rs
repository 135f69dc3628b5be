mod error_formatter;
mod formatter;
mod interactive;
mod server;

use anyhow::Result;
use clap::{Parser, Subcommand};
use formatter::Formatter;
use friends::{split_paragraphs, FriendsError, Reply, ResourceLimits, SearchBudget, Session};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "friends")]
#[command(about = "すごーい！ A logic language for friends.")]
#[command(
    long_about = "Friends is a Horn-clause logic language with a Japanese surface syntax.\nThe CLI runs .friends files, checks their syntax, explores the knowledge they define, answers queries interactively, or serves a session over HTTP."
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every statement in the workspace and answer its queries
    ///
    /// Loads all .friends files in file name order into one session. Rules are believed,
    /// queries are answered against what was believed before them.
    Run {
        /// Workspace root directory containing .friends files
        #[arg(short = 'd', long = "dir", default_value = ".")]
        workdir: PathBuf,
        /// Show at most this many solutions per query
        #[arg(short = 'n', long)]
        max_solutions: Option<usize>,
        /// Give up on a query after this many search steps
        #[arg(long)]
        max_steps: Option<u64>,
    },
    /// Check the syntax of every statement without running anything
    Check {
        /// Workspace root directory containing .friends files
        #[arg(short = 'd', long = "dir", default_value = ".")]
        workdir: PathBuf,
    },
    /// List all predicates with their rule counts
    List {
        /// Workspace root directory containing .friends files
        #[arg(default_value = ".")]
        root: PathBuf,
    },
    /// Show every rule of a predicate
    Show {
        /// Name of the predicate, e.g. 定命の
        pred_name: String,
        /// Workspace root directory containing .friends files
        #[arg(short = 'd', long = "dir", default_value = ".")]
        workdir: PathBuf,
    },
    /// Start an interactive session on top of the workspace
    ///
    /// Type rules to believe them and queries to answer them, one solution at a time.
    Repl {
        /// Workspace root directory containing .friends files
        #[arg(short = 'd', long = "dir", default_value = ".")]
        workdir: PathBuf,
    },
    /// Start HTTP server (default: localhost:3000)
    ///
    /// Serves one shared session loaded from the workspace.
    /// API: POST /parse with plain text, POST /ask with {text}
    Server {
        /// Workspace root directory containing .friends files
        #[arg(short = 'd', long = "dir", default_value = ".")]
        workdir: PathBuf,
        /// Host address to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Port number to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_filter = match cli.command {
        Commands::Server { .. } => "friends=info,tower_http=info",
        _ => "friends=warn",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();

    let result = match &cli.command {
        Commands::Run {
            workdir,
            max_solutions,
            max_steps,
        } => run_command(workdir, *max_solutions, *max_steps),
        Commands::Check { workdir } => check_command(workdir),
        Commands::List { root } => list_command(root),
        Commands::Show { workdir, pred_name } => show_command(workdir, pred_name),
        Commands::Repl { workdir } => repl_command(workdir),
        Commands::Server {
            workdir,
            host,
            port,
        } => server_command(workdir, host, *port),
    };

    if let Err(e) = result {
        // Check if it's a FriendsError and format it nicely, otherwise use default
        if let Some(friends_err) = e.downcast_ref::<FriendsError>() {
            eprintln!("{}", error_formatter::format_error(friends_err));
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}

fn run_command(workdir: &Path, max_solutions: Option<usize>, max_steps: Option<u64>) -> Result<()> {
    let mut limits = ResourceLimits::default();
    if let Some(max_solutions) = max_solutions {
        limits.max_solutions = max_solutions;
    }
    if let Some(max_steps) = max_steps {
        limits.max_query_steps = max_steps;
    }

    let mut session = Session::with_limits(limits.clone());
    let formatter = Formatter::default();
    let mut failures = 0;

    for file in read_workspace(workdir)? {
        for paragraph in split_paragraphs(&file.text) {
            print!("{}", formatter.format_input(&paragraph.text));
            match session.input(&paragraph.text) {
                Ok(Reply::Accepted) => {}
                Ok(Reply::Solutions(mut solutions)) => {
                    let mut budget = SearchBudget::from_limits(&limits);
                    let mut shown = 0;
                    loop {
                        if shown == limits.max_solutions {
                            print!("{}", formatter.format_truncated(shown));
                            break;
                        }
                        match solutions.next_within(&mut budget) {
                            Ok(Some(solution)) => {
                                shown += 1;
                                print!("{}", formatter.format_solution(&solution));
                            }
                            Ok(None) => {
                                print!("{}", formatter.format_exhausted());
                                break;
                            }
                            Err(err) => {
                                failures += 1;
                                print!("{}", formatter.format_failure(&err));
                                break;
                            }
                        }
                    }
                }
                Err(err) => {
                    failures += 1;
                    print!("{}", formatter.format_failure(&err));
                }
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} statement(s) failed", failures);
    }
    Ok(())
}

fn check_command(workdir: &Path) -> Result<()> {
    let limits = ResourceLimits::default();
    let formatter = Formatter::default();
    let mut failures = 0;

    for file in read_workspace(workdir)? {
        for paragraph in split_paragraphs(&file.text) {
            let result = friends::parse(&paragraph.text, &limits).map(|_| ());
            if result.is_err() {
                failures += 1;
            }
            print!("{}", formatter.format_check(&paragraph.text, &result));
        }
    }

    if failures > 0 {
        anyhow::bail!("{} statement(s) are not well-formed", failures);
    }
    Ok(())
}

fn list_command(root: &Path) -> Result<()> {
    let mut session = Session::new();

    println!("Loading workspace from {}...", root.display());
    let file_count = load_workspace(&mut session, root)?;

    let knowledge = session.knowledge();
    let pred_stats: Vec<(String, usize)> = knowledge
        .predicates()
        .into_iter()
        .map(|name| {
            let count = knowledge.rules(&name).len();
            (name, count)
        })
        .collect();

    println!();
    let formatter = Formatter::default();
    print!(
        "{}",
        formatter.format_workspace_summary(file_count, knowledge.len(), &pred_stats)
    );

    Ok(())
}

fn show_command(workdir: &Path, pred_name: &str) -> Result<()> {
    let mut session = Session::new();
    load_workspace(&mut session, workdir)?;

    let rules = session.knowledge().rules(pred_name);
    if rules.is_empty() {
        anyhow::bail!("Predicate '{}' not found", pred_name);
    }

    let formatter = Formatter::default();
    print!("{}", formatter.format_rules(pred_name, rules.iter()));

    Ok(())
}

fn repl_command(workdir: &Path) -> Result<()> {
    let mut session = Session::new();
    let file_count = load_workspace(&mut session, workdir)?;
    println!(
        "Loaded {} rule(s) from {} file(s)",
        session.knowledge().len(),
        file_count
    );
    interactive::run_repl(&mut session)
}

fn server_command(workdir: &Path, host: &str, port: u16) -> Result<()> {
    #[cfg(feature = "server")]
    {
        use tokio::runtime::Runtime;
        let rt = Runtime::new()?;
        rt.block_on(async {
            let mut session = Session::new();
            load_workspace(&mut session, workdir)?;

            println!(
                "Starting HTTP server with {} rule(s) loaded",
                session.knowledge().len()
            );
            server::http::start_server(session, host, port).await
        })?;
    }

    #[cfg(not(feature = "server"))]
    {
        let _ = (workdir, host, port);
        eprintln!("Error: Server feature not enabled");
        eprintln!("Recompile with: cargo build --features server");
        std::process::exit(1);
    }

    Ok(())
}

/// A .friends file and its contents
struct SourceFile {
    path: String,
    text: String,
}

/// Reads all .friends files below `workdir`, in file name order
fn read_workspace(workdir: &Path) -> Result<Vec<SourceFile>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(workdir).sort_by_file_name() {
        let entry = entry?;
        if entry.path().extension().and_then(|s| s.to_str()) == Some("friends") {
            let path = entry.path();
            files.push(SourceFile {
                path: path.to_string_lossy().to_string(),
                text: fs::read_to_string(path)?,
            });
        }
    }
    Ok(files)
}

/// Load all rules of the workspace into `session`, returning the number of files read.
/// Queries in the files are skipped.
fn load_workspace(session: &mut Session, workdir: &Path) -> Result<usize> {
    let files = read_workspace(workdir)?;
    for file in &files {
        for paragraph in split_paragraphs(&file.text) {
            match session.input(&paragraph.text) {
                Ok(Reply::Accepted) => {}
                Ok(Reply::Solutions(_)) => {
                    debug!(file = %file.path, line = paragraph.line, "skipping query");
                }
                Err(err) => {
                    return Err(err
                        .with_source_id(format!("{}:{}", file.path, paragraph.line))
                        .into());
                }
            }
        }
    }
    Ok(files.len())
}
