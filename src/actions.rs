//! Action building - one intent becomes a short list of pending actions.
//!
//! Actions describe side effects for the executor to confirm and run; the
//! builder itself never touches the network or the settings file.

use crate::presets::PresetStore;
use crate::query::Intent;

/// A single user-confirmable step. Not queued, not retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Deliver `message` to the webhook at `url`.
    SendMessage { url: String, message: String },
    /// Offer to save `url` under the single-token name the user just sent.
    AddPresetPrompt { url: String, name: String },
    /// Offer to delete the named preset.
    RemovePresetPrompt { name: String },
    /// Show a stored preset; picking it pre-fills the next query.
    DisplayPreset { name: String, url: String },
    /// Informational row with no side effect.
    Notice {
        title: String,
        detail: Option<String>,
    },
}

/// Build the action list for a classified intent.
///
/// Always yields between one and `presets.len() + 1` actions, fully
/// materialized - the executor consumes the whole list immediately.
pub fn build(intent: &Intent, presets: &PresetStore) -> Vec<Action> {
    match intent {
        Intent::ShowIndex => {
            let mut actions = vec![Action::Notice {
                title: "To send a message, type the url then content or a webhook's name then content.".to_string(),
                detail: None,
            }];
            actions.extend(presets.iter().map(|(name, url)| Action::DisplayPreset {
                name: name.to_string(),
                url: url.to_string(),
            }));
            actions
        }
        Intent::PresetSend { url, message, .. } => vec![Action::SendMessage {
            url: url.clone(),
            message: message.clone(),
        }],
        Intent::UrlSend { url, message } => {
            let mut actions = vec![Action::SendMessage {
                url: url.clone(),
                message: message.clone(),
            }];
            // A body with no spaces doubles as a candidate preset name.
            if !message.contains(' ') {
                actions.push(Action::AddPresetPrompt {
                    url: url.clone(),
                    name: message.clone(),
                });
            }
            actions
        }
        Intent::Invalid { token } => vec![Action::Notice {
            title: format!("Invalid url or unknown webhook name: {token}"),
            detail: None,
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://discord.com/api/webhooks/222/xyz";

    #[test]
    fn test_show_index_empty_store() {
        let actions = build(&Intent::ShowIndex, &PresetStore::default());
        assert_eq!(actions.len(), 1);
        assert!(matches!(&actions[0], Action::Notice { .. }));
    }

    #[test]
    fn test_show_index_lists_presets_in_order() {
        let store = PresetStore::parse(Some("work!one\nhome!two"));
        let actions = build(&Intent::ShowIndex, &store);
        assert_eq!(actions.len(), 3);
        assert!(matches!(&actions[0], Action::Notice { .. }));
        assert_eq!(
            actions[1],
            Action::DisplayPreset {
                name: "work".to_string(),
                url: "one".to_string(),
            }
        );
        assert_eq!(
            actions[2],
            Action::DisplayPreset {
                name: "home".to_string(),
                url: "two".to_string(),
            }
        );
    }

    #[test]
    fn test_preset_send_single_action() {
        let intent = Intent::PresetSend {
            name: "work".to_string(),
            url: URL.to_string(),
            message: "hello".to_string(),
        };
        let actions = build(&intent, &PresetStore::default());
        assert_eq!(
            actions,
            vec![Action::SendMessage {
                url: URL.to_string(),
                message: "hello".to_string(),
            }]
        );
    }

    #[test]
    fn test_url_send_multiword_message_no_prompt() {
        let intent = Intent::UrlSend {
            url: URL.to_string(),
            message: "hello there".to_string(),
        };
        let actions = build(&intent, &PresetStore::default());
        assert_eq!(actions.len(), 1);
        assert!(matches!(&actions[0], Action::SendMessage { .. }));
    }

    #[test]
    fn test_url_send_single_token_offers_preset() {
        let intent = Intent::UrlSend {
            url: URL.to_string(),
            message: "solo".to_string(),
        };
        let actions = build(&intent, &PresetStore::default());
        assert_eq!(actions.len(), 2);
        assert!(matches!(&actions[0], Action::SendMessage { .. }));
        assert_eq!(
            actions[1],
            Action::AddPresetPrompt {
                url: URL.to_string(),
                name: "solo".to_string(),
            }
        );
    }

    #[test]
    fn test_url_send_empty_message_still_offers_preset() {
        let intent = Intent::UrlSend {
            url: URL.to_string(),
            message: String::new(),
        };
        let actions = build(&intent, &PresetStore::default());
        assert_eq!(actions.len(), 2);
    }

    #[test]
    fn test_invalid_single_notice() {
        let intent = Intent::Invalid {
            token: "bogus".to_string(),
        };
        let actions = build(&intent, &PresetStore::default());
        assert_eq!(
            actions,
            vec![Action::Notice {
                title: "Invalid url or unknown webhook name: bogus".to_string(),
                detail: None,
            }]
        );
    }
}
