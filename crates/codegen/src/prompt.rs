//! Instruction text sent to the LLM for `/code`.

use crate::extractor::ExtractorConfig;

/// Builds the code-generation prompt for a user's project description.
///
/// Asks for one fenced block per file with the labels [`crate::CodeExtractor`] understands.
pub fn build_code_prompt(description: &str, config: &ExtractorConfig) -> String {
    let entry = config.entry_file.file_name();
    let transport = config.transport.package_name();
    format!(
        "Generate a COMPLETE, working Telegram bot in Node.js (JavaScript) for: {description}\n\
         Use {transport}, express, axios and dotenv. Include {entry}, package.json, a Dockerfile for Render, \
         .env.example and README.md.\n\
         The code must run without edits.\n\
         Put every file in its own fenced code block labelled with its language: \
         javascript for {entry}, json for package.json, dockerfile, env for .env.example, markdown for README.md.",
        description = description.trim(),
    )
}
