//! Turn prompt builder.
//!
//! Assembles the user-prompt string for one agent turn. The section order
//! is a contract, not an implementation detail -- downstream prompt tuning
//! depends on it, so reordering is a breaking change:
//!
//! ```text
//! 1. thread title line            (when the title is set)
//! 2. running summary block        (when non-empty)
//! 3. persona line
//! 4. stay-on-topic instruction    (when the title is set)
//! 5. recent posts, oldest first   ("{seq}. {author}[ (reply to: {t})]: {text}")
//! 6. global posting instructions, verbatim
//! ```

use agora_types::agent::AgentPersona;
use agora_types::post::Post;

/// Render one post in the numbered, reply-annotated form shared by turn
/// prompts and the summarizer's merge prompt.
pub fn render_post_line(post: &Post) -> String {
    match &post.reply_to {
        Some(target) => format!(
            "{}. {} (reply to: {}): {}",
            post.seq, post.author, target, post.text
        ),
        None => format!("{}. {}: {}", post.seq, post.author, post.text),
    }
}

/// Build the complete prompt for one agent turn.
///
/// Deterministic given its inputs; holds no state.
pub fn build_turn_prompt(
    title: &str,
    summary: &str,
    recent: &[Post],
    agent: &AgentPersona,
    instructions: &str,
) -> String {
    let mut prompt = String::new();
    let titled = !title.trim().is_empty();

    if titled {
        prompt.push_str(&format!("The title of this thread is \"{title}\".\n"));
    }
    let summary = summary.trim();
    if !summary.is_empty() {
        prompt.push_str(&format!(
            "There is a running summary of the discussion. Use it as context:\n{summary}\n\n"
        ));
    }
    prompt.push_str(&format!(
        "You are {}. Your personality: {}.\n",
        agent.name, agent.personality
    ));
    if titled {
        prompt.push_str("Keep your posts relevant to the thread title.\n");
    }
    prompt.push_str("Here are the most recent posts.\n");
    for post in recent {
        prompt.push_str(&render_post_line(post));
        prompt.push('\n');
    }
    prompt.push('\n');
    prompt.push_str(instructions);
    prompt
}
