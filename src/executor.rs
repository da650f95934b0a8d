//! Executes picked actions and renders them as launcher-style results.
//!
//! Actions themselves are pure data; every side effect (webhook delivery,
//! settings rewrites) happens here, one user-confirmed pick at a time.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::actions::Action;
use crate::config::Config;
use crate::presets::{add_preset, remove_preset};
use crate::webhook;

/// One displayable result row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub title: String,
    pub sub: Option<String>,
}

impl ResultRow {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sub: None,
        }
    }

    pub fn with_sub(title: impl Into<String>, sub: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sub: Some(sub.into()),
        }
    }
}

/// Shown when the persisted settings value cannot be read as a string.
pub fn invalid_settings_row() -> ResultRow {
    ResultRow::new("Invalid Settings Given")
}

/// Render an action the way the launcher would list it.
pub fn render(action: &Action) -> ResultRow {
    match action {
        Action::SendMessage { url, message } => ResultRow::with_sub(
            format!("Do you want to send the message to {url}?"),
            format!("Message: {message}"),
        ),
        Action::AddPresetPrompt { name, .. } => ResultRow::with_sub(
            "Do you want to add this url as a preset?",
            format!("Keyword for preset: {name:?}"),
        ),
        Action::RemovePresetPrompt { name } => {
            ResultRow::new(format!("Remove the {name} webhook"))
        }
        Action::DisplayPreset { name, url } => ResultRow::with_sub(
            format!("Send a message to the {name} webhook"),
            url.clone(),
        ),
        Action::Notice { title, detail } => ResultRow {
            title: title.clone(),
            sub: detail.clone(),
        },
    }
}

/// What a pick produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Follow-up rows to display.
    Results(Vec<ResultRow>),
    /// Pre-fill the next query with this text.
    Requery(String),
    /// Nothing to do (informational rows).
    Nothing,
}

/// Parse a pick like `2` or `2d` (the `d` suffix asks to delete a listed
/// preset, the terminal stand-in for the launcher's context menu).
pub fn parse_pick(input: &str) -> Option<(usize, bool)> {
    let input = input.trim();
    let (digits, delete) = match input.strip_suffix('d') {
        Some(rest) => (rest, true),
        None => (input, false),
    };
    digits.parse::<usize>().ok().map(|n| (n, delete))
}

pub struct Executor {
    client: webhook::Client,
    config_path: PathBuf,
}

impl Executor {
    pub fn new(config_path: PathBuf) -> Self {
        Self {
            client: webhook::Client::new(),
            config_path,
        }
    }

    /// Run one action. Settings are re-read from disk here so a pick always
    /// operates on the latest blob.
    pub async fn execute(&self, action: &Action) -> Outcome {
        match action {
            Action::SendMessage { url, message } => self.send_message(url, message).await,
            Action::AddPresetPrompt { url, name } => self.add(name, url),
            Action::RemovePresetPrompt { name } => self.remove(name),
            Action::DisplayPreset { name, .. } => Outcome::Requery(format!("{name} ")),
            Action::Notice { .. } => Outcome::Nothing,
        }
    }

    async fn send_message(&self, url: &str, message: &str) -> Outcome {
        info!("Sending message to {url}");
        match self.client.send(url, message).await {
            Ok(sent) => Outcome::Results(vec![ResultRow::with_sub(
                "Message sent successfully",
                format!("ID: {} ({})", sent.id, sent.jump_url),
            )]),
            Err(e) => {
                warn!("Send failed: {e}");
                Outcome::Results(vec![ResultRow::with_sub(
                    "An error occurred while attempting to send the message.",
                    e.to_string(),
                )])
            }
        }
    }

    fn add(&self, name: &str, url: &str) -> Outcome {
        let mut config = match self.reload() {
            Ok(c) => c,
            Err(row) => return Outcome::Results(vec![row]),
        };
        let current = match config.webhooks() {
            Ok(raw) => raw.map(str::to_string),
            Err(_) => return Outcome::Results(vec![invalid_settings_row()]),
        };
        match add_preset(current.as_deref(), name, url) {
            Ok(blob) => {
                config.set_webhooks(blob);
                if let Err(e) = config.save() {
                    warn!("Failed to save settings: {e}");
                    return Outcome::Results(vec![ResultRow::with_sub(
                        "Failed to save settings",
                        e.to_string(),
                    )]);
                }
                info!("Added preset {name:?} -> {url}");
                Outcome::Results(vec![ResultRow::new(format!("Added the {name:?} preset"))])
            }
            Err(dup) => Outcome::Results(vec![ResultRow::new(format!(
                "There is already a preset with the {:?} keyword.",
                dup.name
            ))]),
        }
    }

    fn remove(&self, name: &str) -> Outcome {
        let mut config = match self.reload() {
            Ok(c) => c,
            Err(row) => return Outcome::Results(vec![row]),
        };
        let current = match config.webhooks() {
            Ok(raw) => raw.map(str::to_string),
            Err(_) => return Outcome::Results(vec![invalid_settings_row()]),
        };
        config.set_webhooks(remove_preset(current.as_deref(), name));
        if let Err(e) = config.save() {
            warn!("Failed to save settings: {e}");
            return Outcome::Results(vec![ResultRow::with_sub(
                "Failed to save settings",
                e.to_string(),
            )]);
        }
        info!("Removed preset {name:?}");
        Outcome::Results(vec![ResultRow::new(format!("Removed the {name} webhook"))])
    }

    fn reload(&self) -> Result<Config, ResultRow> {
        Config::load(&self.config_path).map_err(|e| {
            warn!("Failed to load settings: {e}");
            ResultRow::with_sub("Failed to load settings", e.to_string())
        })
    }
}
