//! Line scanner for fenced code blocks.
//!
//! A fence opens on a line whose leading-trimmed text starts with three backticks; the first
//! whitespace-separated token after them is the label. It closes on a line that is exactly three
//! backticks once trimmed. Inside an open block every other line is content, including backtick
//! lines that carry a label. A block still open at end of input is dropped.

use tracing::debug;

const FENCE: &str = "```";

/// One closed fenced block. `content` borrows the text between the fence lines, untrimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FencedBlock<'a> {
    /// Lower-cased label; empty when the opening fence had none.
    pub label: String,
    pub content: &'a str,
}

fn fence_label(line: &str) -> Option<String> {
    let rest = line.trim_start().strip_prefix(FENCE)?;
    Some(
        rest.split_whitespace()
            .next()
            .unwrap_or("")
            .to_ascii_lowercase(),
    )
}

fn is_fence_end(line: &str) -> bool {
    line.trim() == FENCE
}

/// Returns every closed fenced block in `text`, in order of appearance.
pub fn scan_fenced_blocks(text: &str) -> Vec<FencedBlock<'_>> {
    let mut blocks = Vec::new();
    // (label, byte offset where content starts)
    let mut open: Option<(String, usize)> = None;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();

        match open.take() {
            None => {
                if let Some(label) = fence_label(line) {
                    open = Some((label, offset));
                }
            }
            Some((label, content_start)) => {
                if is_fence_end(line) {
                    blocks.push(FencedBlock {
                        label,
                        content: &text[content_start..line_start],
                    });
                } else {
                    open = Some((label, content_start));
                }
            }
        }
    }

    if let Some((label, _)) = open {
        debug!(label = %label, "Dropping unterminated fenced block");
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_two_blocks() {
        let text = "intro\n```js\nconsole.log(1)\n```\nmiddle\n```JSON\n{}\n```\n";
        let blocks = scan_fenced_blocks(text);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].label, "js");
        assert_eq!(blocks[0].content, "console.log(1)\n");
        assert_eq!(blocks[1].label, "json");
        assert_eq!(blocks[1].content, "{}\n");
    }

    #[test]
    fn test_closing_fence_without_trailing_newline() {
        let blocks = scan_fenced_blocks("```env\nBOT_TOKEN=\n```");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].content, "BOT_TOKEN=\n");
    }

    #[test]
    fn test_labelled_fence_inside_block_is_content() {
        let text = "```markdown\n# Title\n```bash\nnpm start\n```\n";
        let blocks = scan_fenced_blocks(text);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].label, "markdown");
        assert_eq!(blocks[0].content, "# Title\n```bash\nnpm start\n");
    }

    #[test]
    fn test_unterminated_block_dropped() {
        let blocks = scan_fenced_blocks("```js\nconsole.log(1)\n```\n```json\n{\n");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].label, "js");
    }

    #[test]
    fn test_label_takes_first_token_and_indent_allowed() {
        let blocks = scan_fenced_blocks("  ```Dockerfile title=\"x\"\r\nFROM node:20\r\n  ```\r\n");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].label, "dockerfile");
        assert_eq!(blocks[0].content, "FROM node:20\r\n");
    }

    #[test]
    fn test_inline_backticks_are_not_fences() {
        assert!(scan_fenced_blocks("use ```js``` inline").is_empty());
    }
}
