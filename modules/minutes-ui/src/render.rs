//! Presentation helpers: which sections a meeting shows, summary previews,
//! markdown action-item tables and plain-text page rendering.

use chrono::{DateTime, Local, Utc};
use minutes_types::Meeting;
use std::fmt::Write;

const PREVIEW_LINES: usize = 2;
const PREVIEW_MAX_CHARS: usize = 160;

/// Local time, minute precision
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

/// First couple of summary lines for a list row. None for a blank summary.
pub fn summary_preview(summary: &str) -> Option<String> {
    let joined = summary
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .take(PREVIEW_LINES)
        .collect::<Vec<_>>()
        .join(" ");

    if joined.is_empty() {
        return None;
    }

    if joined.chars().count() > PREVIEW_MAX_CHARS {
        let cut: String = joined.chars().take(PREVIEW_MAX_CHARS - 1).collect();
        Some(format!("{}…", cut.trim_end()))
    } else {
        Some(joined)
    }
}

// ── Markdown tables ─────────────────────────────────

/// A GitHub-flavored pipe table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownTable {
    pub headers: Vec<String>,
    /// Every row has exactly `headers.len()` cells
    pub rows: Vec<Vec<String>>,
}

impl MarkdownTable {
    /// Find the first pipe table in `markdown`. Returns the table and the
    /// remaining non-table text.
    pub fn extract(markdown: &str) -> Option<(MarkdownTable, String)> {
        let lines: Vec<&str> = markdown.lines().collect();

        let start = (0..lines.len().saturating_sub(1)).find(|&i| {
            is_table_line(lines[i]) && is_separator_line(lines[i + 1])
        })?;

        let headers = split_cells(lines[start]);
        let mut end = start + 2;
        let mut rows = Vec::new();
        while end < lines.len() && is_table_line(lines[end]) {
            let mut cells = split_cells(lines[end]);
            cells.resize(headers.len(), String::new());
            rows.push(cells);
            end += 1;
        }

        let rest = lines[..start]
            .iter()
            .chain(lines[end..].iter())
            .map(|l| l.trim_end())
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string();

        Some((MarkdownTable { headers, rows }, rest))
    }

    /// Widths are measured on the header text as displayed, since upper-casing
    /// can change its length (`ß` becomes `SS`)
    fn column_widths(&self, headers: &[String]) -> Vec<usize> {
        headers
            .iter()
            .enumerate()
            .map(|(i, h)| {
                self.rows
                    .iter()
                    .map(|r| r[i].chars().count())
                    .chain(std::iter::once(h.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    /// Boxed, column-aligned text. Header cells are upper-cased.
    pub fn render(&self) -> String {
        let headers: Vec<String> = self.headers.iter().map(|h| h.to_uppercase()).collect();
        let widths = self.column_widths(&headers);
        let border = widths
            .iter()
            .map(|w| "-".repeat(w + 2))
            .collect::<Vec<_>>()
            .join("+");
        let border = format!("+{}+", border);

        let row_line = |cells: &[String]| {
            let padded = cells
                .iter()
                .zip(&widths)
                .map(|(c, w)| format!(" {}{} ", c, " ".repeat(w.saturating_sub(c.chars().count()))))
                .collect::<Vec<_>>()
                .join("|");
            format!("|{}|", padded)
        };

        let mut out = String::new();
        let _ = writeln!(out, "{}", border);
        let _ = writeln!(out, "{}", row_line(&headers));
        let _ = writeln!(out, "{}", border);
        for row in &self.rows {
            let _ = writeln!(out, "{}", row_line(row));
        }
        out.push_str(&border);
        out
    }
}

fn is_table_line(line: &str) -> bool {
    line.trim_start().starts_with('|')
}

fn is_separator_line(line: &str) -> bool {
    let cells = split_cells(line);
    !cells.is_empty()
        && cells.iter().all(|c| {
            let inner = c.trim_start_matches(':').trim_end_matches(':');
            !inner.is_empty() && inner.chars().all(|ch| ch == '-')
        })
}

fn split_cells(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    let inner = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    inner.split('|').map(|c| c.trim().to_string()).collect()
}

// ── Detail page ─────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionItemsSection {
    pub table: Option<MarkdownTable>,
    /// Markdown outside the table (or all of it when there is no table)
    pub text: String,
}

/// What the detail page shows for one meeting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailSections {
    pub title: String,
    pub created_at: String,
    pub updated_at: Option<String>,
    pub summary: Option<String>,
    pub action_items: Option<ActionItemsSection>,
    /// Shown verbatim, never interpreted as markdown
    pub content: String,
}

impl DetailSections {
    pub fn from_meeting(meeting: &Meeting) -> Self {
        let action_items = meeting.visible_action_items().map(|md| match MarkdownTable::extract(md) {
            Some((table, text)) => ActionItemsSection {
                table: Some(table),
                text,
            },
            None => ActionItemsSection {
                table: None,
                text: md.trim().to_string(),
            },
        });

        Self {
            title: meeting.title.clone(),
            created_at: format_timestamp(&meeting.created_at),
            updated_at: meeting.updated_at.as_ref().map(format_timestamp),
            summary: meeting.visible_summary().map(|s| s.trim().to_string()),
            action_items,
            content: meeting.content.clone(),
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.title);
        let _ = writeln!(out, "{}", "=".repeat(self.title.chars().count().max(3)));
        let _ = write!(out, "Created {}", self.created_at);
        if let Some(updated) = &self.updated_at {
            let _ = write!(out, " · Updated {}", updated);
        }
        out.push('\n');

        if let Some(summary) = &self.summary {
            let _ = write!(out, "\n## AI Summary\n{}\n", summary);
        }

        if let Some(actions) = &self.action_items {
            out.push_str("\n## Action Items\n");
            if !actions.text.is_empty() {
                let _ = writeln!(out, "{}", actions.text);
            }
            if let Some(table) = &actions.table {
                let _ = writeln!(out, "{}", table.render());
            }
        }

        out.push_str("\n## Original Notes\n");
        for line in self.content.lines() {
            let _ = writeln!(out, "    {}", line);
        }

        out
    }
}
