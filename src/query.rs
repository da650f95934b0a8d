//! Query classification - turns raw input text into one intent.

use std::sync::LazyLock;

use regex::Regex;

use crate::presets::PresetStore;

/// Webhook URL shape, anchored to the start of the query. Variant
/// subdomains (canary, ptb, regional mirrors) and a trailing slash are
/// accepted and normalized away when the URL is reconstructed.
static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^https://(?P<subdomain>[a-zA-Z]+\.)?discord\.com/api/webhooks/(?P<channel_id>[0-9]+)/(?P<slug>[a-zA-Z0-9_\-]+)/?",
    )
    .expect("URL pattern is valid")
});

/// What the user meant by a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// First token named a stored preset; send the rest to its URL.
    PresetSend {
        name: String,
        url: String,
        message: String,
    },
    /// Query led with a webhook URL; send the rest to it.
    UrlSend { url: String, message: String },
    /// Empty query: list presets and usage.
    ShowIndex,
    /// First token is neither a preset nor a webhook URL.
    Invalid { token: String },
}

/// Classify a query against the current preset store.
///
/// Precedence: empty query, then preset name, then URL shape. A preset
/// whose name happens to look like a URL shadows the URL match, so short
/// mnemonics always win. Total - anything unrecognized becomes `Invalid`.
pub fn classify(text: &str, presets: &PresetStore) -> Intent {
    let tokens: Vec<&str> = text.split(' ').collect();
    let first = tokens[0];

    if first.trim().is_empty() {
        return Intent::ShowIndex;
    }

    if let Some(url) = presets.get(first) {
        return Intent::PresetSend {
            name: first.to_string(),
            url: url.to_string(),
            message: tokens[1..].join(" ").trim().to_string(),
        };
    }

    if let Some(caps) = URL_PATTERN.captures(text) {
        let url = format!(
            "https://discord.com/api/webhooks/{}/{}",
            &caps["channel_id"], &caps["slug"]
        );
        return Intent::UrlSend {
            url,
            message: tokens[1..].join(" ").trim().to_string(),
        };
    }

    Intent::Invalid {
        token: first.to_string(),
    }
}
