//! Meeting record database operations

use chrono::{DateTime, SecondsFormat, Utc};
use minutes_types::Meeting;
use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension};

use super::super::{Database, DbResult};
use crate::ai::MeetingSummary;

const MEETING_COLUMNS: &str =
    "id, title, content, summary, action_items, created_at, updated_at";

impl Database {
    /// Insert a meeting; the store assigns id and created_at
    pub fn create_meeting(
        &self,
        title: &str,
        content: &str,
        summary: Option<&MeetingSummary>,
    ) -> DbResult<Meeting> {
        let conn = self.conn()?;
        let now = timestamp(Utc::now());

        let meeting = conn.query_row(
            &format!(
                "INSERT INTO meeting_records (title, content, summary, action_items, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 RETURNING {}",
                MEETING_COLUMNS
            ),
            params![
                title,
                content,
                summary.map(|s| s.summary.as_str()),
                summary.map(|s| s.action_items.as_str()),
                now,
            ],
            Self::row_to_meeting,
        )?;

        Ok(meeting)
    }

    /// All meetings, newest first
    pub fn list_meetings(&self) -> DbResult<Vec<Meeting>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM meeting_records ORDER BY created_at DESC, id DESC",
            MEETING_COLUMNS
        ))?;

        let meetings = stmt
            .query_map([], Self::row_to_meeting)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(meetings)
    }

    /// Substring search over title and content, newest first.
    /// A blank query lists everything.
    pub fn search_meetings(&self, query: &str) -> DbResult<Vec<Meeting>> {
        if query.trim().is_empty() {
            return self.list_meetings();
        }

        let conn = self.conn()?;
        let pattern = format!("%{}%", escape_like(query));

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM meeting_records
             WHERE title LIKE ?1 ESCAPE '\\' OR content LIKE ?1 ESCAPE '\\'
             ORDER BY created_at DESC, id DESC",
            MEETING_COLUMNS
        ))?;

        let meetings = stmt
            .query_map([pattern], Self::row_to_meeting)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(meetings)
    }

    pub fn get_meeting(&self, id: i64) -> DbResult<Option<Meeting>> {
        let conn = self.conn()?;

        let meeting = conn
            .query_row(
                &format!("SELECT {} FROM meeting_records WHERE id = ?1", MEETING_COLUMNS),
                [id],
                Self::row_to_meeting,
            )
            .optional()?;

        Ok(meeting)
    }

    /// Overwrite title and content. Summary fields change only when
    /// `regenerated` is given. Returns None if the meeting does not exist.
    pub fn update_meeting(
        &self,
        id: i64,
        title: &str,
        content: &str,
        regenerated: Option<&MeetingSummary>,
    ) -> DbResult<Option<Meeting>> {
        let conn = self.conn()?;
        let now = timestamp(Utc::now());

        let meeting = match regenerated {
            Some(summary) => conn
                .query_row(
                    &format!(
                        "UPDATE meeting_records
                         SET title = ?2, content = ?3, summary = ?4, action_items = ?5, updated_at = ?6
                         WHERE id = ?1
                         RETURNING {}",
                        MEETING_COLUMNS
                    ),
                    params![id, title, content, summary.summary, summary.action_items, now],
                    Self::row_to_meeting,
                )
                .optional()?,
            None => conn
                .query_row(
                    &format!(
                        "UPDATE meeting_records
                         SET title = ?2, content = ?3, updated_at = ?4
                         WHERE id = ?1
                         RETURNING {}",
                        MEETING_COLUMNS
                    ),
                    params![id, title, content, now],
                    Self::row_to_meeting,
                )
                .optional()?,
        };

        Ok(meeting)
    }

    /// Delete a meeting. Returns whether a row was removed.
    pub fn delete_meeting(&self, id: i64) -> DbResult<bool> {
        let conn = self.conn()?;
        let rows_affected = conn.execute("DELETE FROM meeting_records WHERE id = ?1", [id])?;
        Ok(rows_affected > 0)
    }

    fn row_to_meeting(row: &rusqlite::Row) -> rusqlite::Result<Meeting> {
        let created_at_str: String = row.get(5)?;
        let updated_at_str: Option<String> = row.get(6)?;

        Ok(Meeting {
            id: row.get(0)?,
            title: row.get(1)?,
            content: row.get(2)?,
            summary: row.get(3)?,
            action_items: row.get(4)?,
            created_at: parse_timestamp(5, &created_at_str)?,
            updated_at: updated_at_str
                .map(|s| parse_timestamp(6, &s))
                .transpose()?,
        })
    }
}

/// Fixed-width RFC 3339 so text ordering matches time ordering
fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(column: usize, value: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(e)))
}

/// Escape LIKE wildcards so the query matches literally
fn escape_like(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len());
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
