//! # code-extractor
//!
//! Turns a free-form LLM response into files and text the bot can deliver.
//!
//! - [`CodeExtractor::extract_files`]: fenced code blocks → `filename → content`, with a fixed
//!   language → filename table, last-write-wins on duplicates and a synthesized `package.json`
//!   when the response did not include one.
//! - [`chunk_for_delivery`]: splits text into Telegram-sized parts by character count.
//! - [`build_code_prompt`] and [`repo_name_for`]: the instruction text sent to the LLM and the
//!   name of the repository the files are published to.
//!
//! Everything here is pure and synchronous; nothing fails.

mod chunk;
mod extractor;
mod fence;
mod naming;
mod prompt;

pub use chunk::{
    chunk_for_delivery, split_for_telegram, DeliveryChunks, DELIVERY_CHUNK_SIZE,
    TELEGRAM_MESSAGE_LIMIT,
};
pub use extractor::{
    extract_files, CodeExtractor, EntryFile, ExtractedFileSet, ExtractorConfig, TransportLibrary,
    PACKAGE_JSON,
};
pub use fence::{scan_fenced_blocks, FencedBlock};
pub use naming::{repo_name_at, repo_name_for, REPO_NAME_PREFIX};
pub use prompt::build_code_prompt;
