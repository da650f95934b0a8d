mod actions;
mod config;
mod executor;
mod presets;
mod query;
mod webhook;

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use tracing::info;
use tracing_subscriber::prelude::*;

use actions::build;
use config::{Config, ConfigError};
use executor::{invalid_settings_row, parse_pick, render, Executor, Outcome, ResultRow};
use presets::PresetStore;
use query::classify;

#[tokio::main]
async fn main() {
    let config_path = PathBuf::from(
        std::env::args()
            .nth(1)
            .unwrap_or_else(|| "hooklaunch.json".to_string()),
    );
    let one_shot: Vec<String> = std::env::args().skip(2).collect();

    // Setup logging: file only, stdout is reserved for results.
    let log_dir = config_dir(&config_path).join("logs");
    std::fs::create_dir_all(&log_dir).ok();
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("hooklaunch.log"))
        .expect("Failed to open log file");
    let (non_blocking, _guard) = tracing_appender::non_blocking(log_file);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_filter(
                    tracing_subscriber::EnvFilter::from_default_env()
                        .add_directive(tracing::Level::INFO.into()),
                ),
        )
        .init();

    info!("Starting hooklaunch");
    info!("Settings file: {}", config_path.display());

    let executor = Executor::new(config_path.clone());
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    if !one_shot.is_empty() {
        let _ = run_query(&executor, &config_path, &one_shot.join(" "), &mut lines).await;
        return;
    }

    // Interactive loop: each line is a query, EOF or :q exits. A picked
    // preset row pre-fills the next prompt the way the launcher's
    // autocomplete would.
    let mut pending = String::new();
    loop {
        print!("> {pending}");
        std::io::stdout().flush().ok();
        let Some(Ok(line)) = lines.next() else { break };
        if line.trim() == ":q" {
            break;
        }
        let text = format!("{pending}{line}");
        pending.clear();
        if let Some(requery) = run_query(&executor, &config_path, &text, &mut lines).await {
            pending = requery;
        }
    }
}

fn config_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Classify one query, show its results, and run the picked action.
/// Returns text to pre-fill the next query with, if any.
async fn run_query(
    executor: &Executor,
    config_path: &Path,
    text: &str,
    lines: &mut impl Iterator<Item = std::io::Result<String>>,
) -> Option<String> {
    // Re-read settings on every query so outside edits are reflected.
    let actions = match load_store(config_path) {
        Ok(store) => build(&classify(text, &store), &store),
        Err(row) => {
            print_rows(std::iter::once(&row), false);
            return None;
        }
    };

    let rows: Vec<ResultRow> = actions.iter().map(render).collect();
    print_rows(rows.iter(), true);

    print!("pick> ");
    std::io::stdout().flush().ok();
    let Some(Ok(pick)) = lines.next() else {
        return None;
    };
    let Some((n, delete)) = parse_pick(&pick) else {
        return None;
    };
    let Some(action) = actions.get(n.checked_sub(1)?) else {
        println!("No result #{n}");
        return None;
    };

    // `Nd` deletes a listed preset, standing in for the context menu.
    let action = if delete {
        match action {
            actions::Action::DisplayPreset { name, .. } => actions::Action::RemovePresetPrompt {
                name: name.clone(),
            },
            _ => {
                println!("Only listed presets can be removed");
                return None;
            }
        }
    } else {
        action.clone()
    };

    match executor.execute(&action).await {
        Outcome::Results(rows) => {
            print_rows(rows.iter(), false);
            None
        }
        Outcome::Requery(text) => Some(text),
        Outcome::Nothing => None,
    }
}

fn load_store(config_path: &Path) -> Result<PresetStore, ResultRow> {
    let config = Config::load(config_path)
        .map_err(|e| ResultRow::with_sub("Failed to load settings", e.to_string()))?;
    match config.webhooks() {
        Ok(raw) => {
            let store = PresetStore::parse(raw);
            if !store.is_empty() {
                info!("Loaded {} presets", store.len());
            }
            Ok(store)
        }
        Err(ConfigError::InvalidSettings) => Err(invalid_settings_row()),
        Err(e) => Err(ResultRow::with_sub("Failed to load settings", e.to_string())),
    }
}

fn print_rows<'a>(rows: impl Iterator<Item = &'a ResultRow>, numbered: bool) {
    for (i, row) in rows.enumerate() {
        if numbered {
            print!("{:>3}. ", i + 1);
        } else {
            print!("     ");
        }
        match &row.sub {
            Some(sub) => println!("{}\n        {}", row.title, sub),
            None => println!("{}", row.title),
        }
    }
}
