pub mod cli;
pub mod db;
pub mod error;
pub mod labels;
pub mod layout;
pub mod models;
pub mod print;
pub mod qr;
pub mod render;
pub mod settings;
mod utils;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use db::Database;
use print::{PrintSink, SystemPrintSink};
use settings::SettingsStore;

pub use error::{Error, Result};

const ENABLE_LOGS: bool = true;

/// Everything an action needs, passed explicitly.
pub struct AppState {
    pub db: Database,
    pub settings: SettingsStore,
    pub print_sink: Box<dyn PrintSink>,
}

impl AppState {
    pub fn new(db: Database, settings: SettingsStore, print_sink: Box<dyn PrintSink>) -> Self {
        Self {
            db,
            settings,
            print_sink,
        }
    }

    /// Load settings from `config` and open the history database it names,
    /// unless `db_override` points elsewhere.
    pub fn open(config: PathBuf, db_override: Option<PathBuf>) -> Result<Self> {
        let settings = SettingsStore::new(config)?;
        let db_path = db_override
            .unwrap_or_else(|| settings.resolve(&settings.settings().database_path));
        let db = Database::new(db_path)?;
        Ok(Self::new(db, settings, Box::new(SystemPrintSink)))
    }
}

pub fn run() -> ExitCode {
    utils::logging::init_logging();

    let cli = cli::Cli::parse();
    match cli::execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            crate::log_error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
