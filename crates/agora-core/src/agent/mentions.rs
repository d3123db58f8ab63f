//! Reply-target extraction from `@name` mentions.
//!
//! A single best-effort heuristic, kept as a pure function over an explicit
//! snapshot of valid names so it is testable independent of scheduler
//! timing. It is deliberately not natural-language understanding:
//!
//! 1. The first `@<name>` whose `<name>` case-sensitively matches a valid
//!    name becomes the reply target; that one mention is removed.
//! 2. The text is then truncated at the first remaining `@`, matched or
//!    not. This keeps LLM-hallucinated multi-target mention runs out of
//!    the timeline, at the cost of discarding any legitimate content after
//!    a second mention -- a known limitation worth revisiting.

use std::collections::HashSet;

use regex::Regex;

/// Extract at most one reply target from `text`.
///
/// Returns the cleaned, whitespace-trimmed text and the extracted target
/// name, if any.
pub fn extract(text: &str, valid_names: &HashSet<String>) -> (String, Option<String>) {
    let (remainder, target) = match find_first_mention(text, valid_names) {
        Some((start, end, name)) => (remove_mention(text, start, end), Some(name)),
        None => (text.to_string(), None),
    };

    // Anything after a further '@' is discarded.
    let cleaned = remainder.split('@').next().unwrap_or("").trim().to_string();
    (cleaned, target)
}

/// Locate the first `@name` mention matching a valid name.
///
/// Names are alternated longest-first so that when one valid name is a
/// prefix of another (e.g. "Al" and "Alice"), the longer exact match wins.
fn find_first_mention(
    text: &str,
    valid_names: &HashSet<String>,
) -> Option<(usize, usize, String)> {
    if valid_names.is_empty() || !text.contains('@') {
        return None;
    }
    let mut names: Vec<&String> = valid_names.iter().filter(|n| !n.is_empty()).collect();
    if names.is_empty() {
        return None;
    }
    names.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    let alternation = names
        .iter()
        .map(|name| regex::escape(name))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = Regex::new(&format!("@({alternation})")).ok()?;

    let captures = pattern.captures(text)?;
    let whole = captures.get(0)?;
    let name = captures.get(1)?.as_str().to_string();
    Some((whole.start(), whole.end(), name))
}

/// Remove the mention span, collapsing the doubled whitespace the removal
/// would otherwise leave behind.
fn remove_mention(text: &str, start: usize, end: usize) -> String {
    let head = &text[..start];
    let mut tail = &text[end..];
    if head.ends_with(char::is_whitespace) {
        tail = tail.trim_start();
    }
    format!("{head}{tail}")
}
