//! Preset store - named shortcuts for webhook URLs.
//!
//! Presets persist as a single text blob, one `name!url` pair per line.
//! The store is rebuilt from the blob on every query so edits made outside
//! the tool are always picked up on the next read.

use std::fmt;

/// A preset name collided with one already in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateName {
    pub name: String,
}

impl fmt::Display for DuplicateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "there is already a preset named {:?}", self.name)
    }
}

impl std::error::Error for DuplicateName {}

/// Ordered name -> url mapping parsed from the settings blob.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresetStore {
    entries: Vec<(String, String)>,
}

impl PresetStore {
    /// Parse the raw settings blob into a store.
    ///
    /// Lines without a `!` are skipped. A duplicate name updates the
    /// existing entry in place, so the first occurrence keeps its position
    /// but the last value wins.
    pub fn parse(raw: Option<&str>) -> Self {
        let mut entries: Vec<(String, String)> = Vec::new();
        for line in raw.unwrap_or("").lines() {
            let Some((name, url)) = line.split_once('!') else {
                continue;
            };
            let name = name.trim();
            let url = url.trim();
            if name.is_empty() && url.is_empty() {
                continue;
            }
            match entries.iter_mut().find(|(n, _)| n == name) {
                Some((_, existing)) => *existing = url.to_string(),
                None => entries.push((name.to_string(), url.to_string())),
            }
        }
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, url)| url.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, u)| (n.as_str(), u.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize back to the blob format: `name!url` lines, insertion
    /// order, no trailing newline.
    pub fn serialize(&self) -> String {
        self.entries
            .iter()
            .map(|(n, u)| format!("{n}!{u}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Append a `name!url` line to the blob.
///
/// Fails if the name already exists (exact, case-sensitive match). The
/// caller keeps its blob on failure, so a failed add changes nothing.
pub fn add_preset(current: Option<&str>, name: &str, url: &str) -> Result<String, DuplicateName> {
    if PresetStore::parse(current).contains(name) {
        return Err(DuplicateName {
            name: name.to_string(),
        });
    }
    Ok(match current {
        None | Some("") => format!("{name}!{url}"),
        Some(existing) => format!("{existing}\n{name}!{url}"),
    })
}

/// Drop every line belonging to `name` from the blob.
///
/// Matches on the space-stripped line prefix so stray whitespace around the
/// name or the `!` does not hide a line. Removing an absent name is a no-op.
pub fn remove_preset(current: Option<&str>, name: &str) -> String {
    let prefix = format!("{name}!");
    current
        .unwrap_or("")
        .lines()
        .filter(|line| !line.replace(' ', "").starts_with(&prefix))
        .collect::<Vec<_>>()
        .join("\n")
}
