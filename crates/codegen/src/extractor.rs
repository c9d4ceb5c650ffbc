//! Fenced blocks → file layout.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde_json::{json, Map, Value};
use tracing::debug;

use crate::fence::scan_fenced_blocks;

/// Relative filename → file content. Built fresh per extraction.
pub type ExtractedFileSet = BTreeMap<String, String>;

pub const PACKAGE_JSON: &str = "package.json";

/// Filename used for `javascript`/`js` blocks and for responses without any fence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryFile {
    #[default]
    IndexJs,
    BotJs,
}

impl EntryFile {
    pub fn file_name(self) -> &'static str {
        match self {
            EntryFile::IndexJs => "index.js",
            EntryFile::BotJs => "bot.js",
        }
    }
}

impl FromStr for EntryFile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "index.js" | "index" => Ok(EntryFile::IndexJs),
            "bot.js" | "bot" => Ok(EntryFile::BotJs),
            other => Err(format!("unknown JS entry file: {} (expected index.js or bot.js)", other)),
        }
    }
}

impl fmt::Display for EntryFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Telegram library the generated bot is expected to use; drives the synthesized dependencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportLibrary {
    #[default]
    Telegraf,
    NodeTelegramBotApi,
}

impl TransportLibrary {
    pub fn package_name(self) -> &'static str {
        match self {
            TransportLibrary::Telegraf => "telegraf",
            TransportLibrary::NodeTelegramBotApi => "node-telegram-bot-api",
        }
    }

    /// `(package, version range)` pairs for the synthesized `package.json`.
    pub fn dependencies(self) -> &'static [(&'static str, &'static str)] {
        match self {
            TransportLibrary::Telegraf => &[
                ("telegraf", "^4.16.3"),
                ("express", "^4.19.2"),
                ("axios", "^1.7.2"),
                ("dotenv", "^16.4.5"),
            ],
            TransportLibrary::NodeTelegramBotApi => &[
                ("node-telegram-bot-api", "^0.66.0"),
                ("dotenv", "^16.4.5"),
            ],
        }
    }
}

impl FromStr for TransportLibrary {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "telegraf" => Ok(TransportLibrary::Telegraf),
            "node-telegram-bot-api" => Ok(TransportLibrary::NodeTelegramBotApi),
            other => Err(format!(
                "unknown transport library: {} (expected telegraf or node-telegram-bot-api)",
                other
            )),
        }
    }
}

/// Naming and synthesis options for [`CodeExtractor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorConfig {
    pub entry_file: EntryFile,
    pub transport: TransportLibrary,
    /// `name` of the synthesized `package.json`.
    pub package_name: String,
    /// `description` of the synthesized `package.json`.
    pub description: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            entry_file: EntryFile::default(),
            transport: TransportLibrary::default(),
            package_name: "generated-bot".to_string(),
            description: "Telegram bot generated by an LLM".to_string(),
        }
    }
}

/// Extracts files from LLM responses using a fixed language → filename table.
#[derive(Debug, Clone, Default)]
pub struct CodeExtractor {
    config: ExtractorConfig,
}

impl CodeExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Same extractor with a different `package.json` description (e.g. the user's request).
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.config.description = description.into();
        self
    }

    pub fn entry_file_name(&self) -> &'static str {
        self.config.entry_file.file_name()
    }

    /// Maps a lower-cased block label to its target filename.
    ///
    /// Labels outside `[a-z0-9+#_-]` (paths, dots, spaces) map to `file.txt` like an empty label.
    pub fn file_name_for_label(&self, label: &str) -> String {
        if !is_plain_label(label) {
            debug!(label = %label, "Label is not a plain language name; using file.txt");
            return "file.txt".to_string();
        }
        match label {
            "javascript" | "js" => self.entry_file_name().to_string(),
            "json" => PACKAGE_JSON.to_string(),
            "dockerfile" => "Dockerfile".to_string(),
            "markdown" | "md" => "README.md".to_string(),
            "env" => ".env.example".to_string(),
            "" => "file.txt".to_string(),
            other => format!("file.{}", other),
        }
    }

    /// Builds the file layout for `response_text`.
    ///
    /// - Every closed fenced block is stored under its mapped filename, content trimmed; a later
    ///   block replaces an earlier one with the same filename.
    /// - Without any block, non-blank text becomes the entry file; blank text gives an empty set.
    /// - When blocks were found but none mapped to `package.json`, one is synthesized.
    pub fn extract_files(&self, response_text: &str) -> ExtractedFileSet {
        let mut files = ExtractedFileSet::new();
        let blocks = scan_fenced_blocks(response_text);

        if blocks.is_empty() {
            let trimmed = response_text.trim();
            if !trimmed.is_empty() {
                files.insert(self.entry_file_name().to_string(), trimmed.to_string());
            }
            debug!(files = files.len(), "No fenced blocks; using whole-text fallback");
            return files;
        }

        for block in &blocks {
            let name = self.file_name_for_label(&block.label);
            if files
                .insert(name.clone(), block.content.trim().to_string())
                .is_some()
            {
                debug!(file = %name, "Later block replaces earlier one");
            }
        }

        if !files.contains_key(PACKAGE_JSON) {
            files.insert(PACKAGE_JSON.to_string(), self.synthesize_package_json());
            debug!("Synthesized package.json");
        }

        debug!(blocks = blocks.len(), files = files.len(), "Extracted files from response");
        files
    }

    fn synthesize_package_json(&self) -> String {
        let entry = self.entry_file_name();
        let dependencies: Map<String, Value> = self
            .config
            .transport
            .dependencies()
            .iter()
            .map(|(name, version)| (name.to_string(), Value::from(*version)))
            .collect();
        let package = json!({
            "name": self.config.package_name,
            "version": "1.0.0",
            "description": self.config.description,
            "main": entry,
            "scripts": { "start": format!("node {}", entry) },
            "dependencies": dependencies,
        });
        serde_json::to_string_pretty(&package).unwrap_or_else(|_| package.to_string())
    }
}

fn is_plain_label(label: &str) -> bool {
    label
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '+' | '#' | '_' | '-'))
}

/// [`CodeExtractor::extract_files`] with the default configuration.
pub fn extract_files(response_text: &str) -> ExtractedFileSet {
    CodeExtractor::default().extract_files(response_text)
}
