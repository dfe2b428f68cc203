use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use controller::SearchController;
use dictionary::Dictionary;
use env_logger::{Env, Target};
use log::{warn, LevelFilter};
use recent::RECENT_KEY;
use storage::Storage;
use utilities::{input, str_to_bool};

mod controller;
mod recent;
mod render;
mod repl;
mod search_input;
mod storage;
mod tui;
mod utilities;

const APP_DIR: &str = "lexisearch";
const DB_FILE: &str = "lexisearch.db";
const LOG_FILE: &str = "lexisearch.log";

#[derive(Parser)]
#[command(name = "lexisearch", version, about = "Look up English words from the terminal")]
struct Cli {
    /// Base URL of the dictionary API
    #[arg(long, env = "DICTIONARY_API_BASE", global = true)]
    api_base: Option<String>,

    /// SQLite file that keeps recent searches
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Log at debug level (RUST_LOG still wins)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a word and print its definitions
    Define {
        #[arg(required = true)]
        word: Vec<String>,
    },
    /// Show recent searches
    Recent {
        /// Forget all recent searches
        #[arg(long)]
        clear: bool,
        /// Don't ask before clearing
        #[arg(long, short)]
        yes: bool,
    },
    /// Prompt for words line by line instead of the full-screen UI
    Repl,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let data_dir = data_dir();
    let full_screen = cli.command.is_none();
    init_logging(cli.debug, full_screen.then(|| data_dir.join(LOG_FILE)));

    let base = cli
        .api_base
        .as_deref()
        .or(option_env!("DICTIONARY_API_BASE"))
        .unwrap_or_default();
    let dict = Dictionary::with_base(base)?;

    let db = cli.db.unwrap_or_else(|| data_dir.join(DB_FILE));
    let storage = match Storage::open(&db).await {
        Ok(storage) => Some(storage),
        Err(error) => {
            warn!("recent searches won't be kept, cannot open {}: {error}", db.display());
            None
        }
    };
    let mut controller = SearchController::load(storage).await;

    match cli.command {
        None => tui::run(controller, Arc::new(dict)).await,
        Some(Commands::Define { word }) => {
            controller.search(&dict, &word.join(" ")).await;
            repl::print_outcome(&controller, &mut io::stdout())?;
            Ok(())
        }
        Some(Commands::Recent { clear, yes }) => show_recent(&mut controller, clear, yes).await,
        Some(Commands::Repl) => repl::run(&mut controller, &dict).await,
    }
}

async fn show_recent(
    controller: &mut SearchController<Option<Storage>>,
    clear: bool,
    yes: bool,
) -> anyhow::Result<()> {
    repl::print_recent(controller, &mut io::stdout())?;
    if let Some(storage) = controller.store() {
        if let Ok(Some(saved)) = storage.last_saved(RECENT_KEY).await {
            println!("Last updated {} UTC", saved.format("%Y-%m-%d %H:%M:%S"));
        }
    }
    if !clear || controller.recent().is_empty() {
        return Ok(());
    }
    let confirmed = yes
        || input(&format!(
            "Clear {} recent searches? (y/N): ",
            controller.recent().len()
        ))?
        .as_deref()
        .and_then(str_to_bool)
        .unwrap_or(false);
    if confirmed {
        controller.clear_recent().await;
        println!("Cleared recent searches.");
    }
    Ok(())
}

fn data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Full-screen mode logs to `log_file` so records never land on the screen.
fn init_logging(debug: bool, log_file: Option<PathBuf>) {
    let env = if debug {
        Env::default().default_filter_or("debug")
    } else {
        Env::default().default_filter_or("warn")
    };
    let mut builder = env_logger::Builder::from_env(env);
    match log_file {
        Some(path) => match open_log(&path) {
            Ok(file) => {
                builder.target(Target::Pipe(Box::new(file)));
            }
            Err(_) => {
                builder.filter_level(LevelFilter::Off);
            }
        },
        None => {
            builder.target(Target::Stderr);
        }
    }
    builder.init();
}

fn open_log(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    File::options().create(true).append(true).open(path)
}
