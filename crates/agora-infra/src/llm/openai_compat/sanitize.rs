//! Response sanitization for reasoning models.
//!
//! Local models served through OpenAI-compatible endpoints (qwen3,
//! deepseek-r1 and friends) interleave `<think>...</think>` blocks with the
//! reply. Any `<tag>...</tag>` pair is stripped, including across newlines,
//! before the response enters the timeline.

use std::sync::OnceLock;

use regex::Regex;

fn markup_block() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<[^>]+>.*?</[^>]+>").expect("valid regex"))
}

/// Remove every `<tag>...</tag>` block and trim the result.
pub fn strip_markup_blocks(text: &str) -> String {
    markup_block().replace_all(text, "").trim().to_string()
}
