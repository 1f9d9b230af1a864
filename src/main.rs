use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use tracing::info;

use finboard::cli::{
    handle_categories, handle_export_command, handle_list, handle_show, handle_summary,
    ExportArgs, ListArgs, Shell,
};
use finboard::config::{FinboardPaths, Settings};
use finboard::services::ImportService;
use finboard::storage::Session;

#[derive(Parser)]
#[command(
    name = "finboard",
    author = "Kaylee Beyene",
    version,
    about = "Terminal personal-finance dashboard",
    long_about = "finboard tracks income and expense records for a session and shows \
                  totals, spending by category, and a searchable record list. Records \
                  live in memory; seed a session with --sample or --data and save it \
                  with the export command."
)]
struct Cli {
    /// Load records from a CSV, JSON or YAML export before running the command
    #[arg(long, global = true, value_name = "FILE")]
    data: Option<PathBuf>,

    /// Start with the two sample records
    #[arg(long, global = true)]
    sample: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show income, expense and net totals with the spending breakdown
    Summary,

    /// List records matching a search, category, date range and sort
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one record by ID
    Show {
        /// Record ID (full UUID or short form like rec-1a2b3c4d)
        id: String,
    },

    /// Export all records
    Export(ExportArgs),

    /// List the available categories
    Categories,

    /// Show current configuration and paths
    Config {
        /// Write the current settings to the config file
        #[arg(long)]
        save: bool,
    },

    /// Start an interactive session
    #[command(alias = "repl")]
    Shell,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = FinboardPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    finboard::logging::init(&settings);

    let session = load_session(&cli)?;
    let now = Local::now().naive_local();

    match cli.command {
        Some(Commands::Summary) => handle_summary(&session, &settings)?,
        Some(Commands::List(args)) => handle_list(&session, &settings, &args, now)?,
        Some(Commands::Show { id }) => handle_show(&session, &settings, &id)?,
        Some(Commands::Export(args)) => handle_export_command(&session, args)?,
        Some(Commands::Categories) => handle_categories(),
        Some(Commands::Config { save }) => {
            if save {
                settings.save(&paths)?;
                println!("Settings written to: {}", paths.settings_file().display());
                println!();
            }
            println!("finboard configuration");
            println!("======================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:      {}", settings.currency_symbol);
            println!("  Date format:          {}", settings.date_format);
            println!("  Default sort:         {}", settings.default_sort);
            println!("  Default range:        {}", settings.default_range);
            println!("  Top categories shown: {}", settings.top_categories);
            println!("  Log level:            {}", settings.log_level);
        }
        Some(Commands::Shell) => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            Shell::new(&session, &settings).run(stdin.lock(), &mut out)?;
        }
        None => {
            println!("finboard - terminal personal-finance dashboard");
            println!();
            println!("Run 'finboard --help' for usage information.");
            println!("Run 'finboard --sample shell' to try it with sample records.");
        }
    }

    Ok(())
}

/// Build the session from --sample and --data
fn load_session(cli: &Cli) -> Result<Session> {
    let session = if cli.sample {
        Session::with_sample_data()?
    } else {
        Session::new()
    };

    if let Some(path) = &cli.data {
        let result = ImportService::new(&session)
            .import_file(path)
            .with_context(|| format!("Failed to load records from {}", path.display()))?;

        for (row, message) in &result.error_messages {
            eprintln!("Skipped row {}: {}", row, message);
        }
        info!(imported = result.imported, "Session loaded");
    }

    Ok(session)
}
