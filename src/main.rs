mod error;
mod ledger;
mod models;
mod run;
mod store;
mod ui;
mod validate;

use anyhow::{Context, Result};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let data_dir = get_data_dir()?;
    let ledger = ledger::Ledger::open(&data_dir)?;

    if args.len() > 1 {
        run::as_cli(&args, &ledger)
    } else {
        run::as_tui(&ledger)
    }
}

fn get_data_dir() -> Result<std::path::PathBuf> {
    let data_dir = match std::env::var("TALLYBOOK_DATA_DIR") {
        Ok(dir) if !dir.is_empty() => std::path::PathBuf::from(dir),
        _ => {
            let proj_dirs = directories::ProjectDirs::from("com", "tallybook", "TallyBook")
                .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
            proj_dirs.data_dir().to_path_buf()
        }
    };
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir)
}
