//! Character-count chunking for chat delivery.

use std::iter::FusedIterator;

/// Telegram's maximum message length, in characters.
pub const TELEGRAM_MESSAGE_LIMIT: usize = 4096;

/// Chunk size used once a text exceeds [`TELEGRAM_MESSAGE_LIMIT`]; leaves room for wrapping markup.
pub const DELIVERY_CHUNK_SIZE: usize = 4000;

/// Lazy iterator over consecutive substrings of at most `max_chars` characters.
///
/// Clone it to iterate again from where the clone was taken. Always yields at least one item:
/// an empty text yields a single empty chunk.
#[derive(Debug, Clone)]
pub struct DeliveryChunks<'a> {
    rest: &'a str,
    max_chars: usize,
    started: bool,
}

/// Splits `text` into chunks of at most `max_chunk_size` characters, purely by count.
///
/// Joining the chunks reproduces `text`. A `max_chunk_size` of 0 is treated as 1.
pub fn chunk_for_delivery(text: &str, max_chunk_size: usize) -> DeliveryChunks<'_> {
    DeliveryChunks {
        rest: text,
        max_chars: max_chunk_size.max(1),
        started: false,
    }
}

/// Whole text when it fits in one Telegram message, otherwise [`DELIVERY_CHUNK_SIZE`] chunks.
pub fn split_for_telegram(text: &str) -> DeliveryChunks<'_> {
    if text.chars().count() <= TELEGRAM_MESSAGE_LIMIT {
        chunk_for_delivery(text, TELEGRAM_MESSAGE_LIMIT)
    } else {
        chunk_for_delivery(text, DELIVERY_CHUNK_SIZE)
    }
}

impl<'a> Iterator for DeliveryChunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            if self.started {
                return None;
            }
            self.started = true;
            return Some(self.rest);
        }
        self.started = true;
        let split_at = self
            .rest
            .char_indices()
            .nth(self.max_chars)
            .map(|(i, _)| i)
            .unwrap_or(self.rest.len());
        let (chunk, rest) = self.rest.split_at(split_at);
        self.rest = rest;
        Some(chunk)
    }
}

impl FusedIterator for DeliveryChunks<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_multiple() {
        let text = "abcdef";
        let chunks: Vec<_> = chunk_for_delivery(text, 3).collect();
        assert_eq!(chunks, vec!["abc", "def"]);
    }

    #[test]
    fn test_zero_limit_treated_as_one() {
        let chunks: Vec<_> = chunk_for_delivery("ab", 0).collect();
        assert_eq!(chunks, vec!["a", "b"]);
    }

    #[test]
    fn test_empty_text_single_chunk() {
        let chunks: Vec<_> = chunk_for_delivery("", 10).collect();
        assert_eq!(chunks, vec![""]);
    }
}
