//! Prompt construction and response parsing for meeting summaries

use minutes_types::NO_ACTION_ITEMS;

use super::MeetingSummary;

pub const SUMMARY_HEADING: &str = "## Summary";
pub const ACTION_ITEMS_HEADING: &str = "## Action Items";

/// Build the user prompt. Only the first `input_chars` characters of the
/// notes are included.
pub fn build_prompt(content: &str, input_chars: usize) -> String {
    let excerpt: String = content.chars().take(input_chars).collect();

    format!(
        "Analyze the following meeting notes:\n\n\
         {excerpt}\n\n\
         Instructions:\n\
         1. Summary: condense the main discussion into exactly 3 key points.\n\
         2. Action items: extract them as owner, task and due date. \
         If there are none, write \"{none}\".\n\n\
         Output format (follow it exactly):\n\
         {summary}\n\
         - Point 1\n\
         - Point 2\n\
         - Point 3\n\n\
         {actions}\n\
         | Owner | Task | Due |\n\
         |-------|------|-----|\n\
         | Jane Doe | API design | 2024-02-15 |\n",
        excerpt = excerpt,
        none = NO_ACTION_ITEMS,
        summary = SUMMARY_HEADING,
        actions = ACTION_ITEMS_HEADING,
    )
}

/// Split a model reply into summary and action items
pub fn parse_response(text: &str) -> MeetingSummary {
    let (summary_part, actions_part) = match text.split_once(ACTION_ITEMS_HEADING) {
        Some((before, after)) => (before, Some(after)),
        None => (text, None),
    };

    let summary = summary_part.replace(SUMMARY_HEADING, "").trim().to_string();
    let action_items = actions_part
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(NO_ACTION_ITEMS)
        .to_string();

    MeetingSummary {
        summary,
        action_items,
    }
}
