//! SQLite-based relationship storage.
//!
//! Provides persistent storage for:
//! - People and their contact cadence
//! - Interactions, commitments and notes owned by a person
//! - The per-person rows the weekly review ranks
//!
//! Deleting a person cascades to everything they own.

use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

use super::data_dir;
use crate::dates::{add_days, parse_date};
use crate::error::{CoreError, DatabaseError, Result};
use crate::people::{
    optional_text, require_text, Commitment, CommitmentStatus, Interaction, InteractionKind,
    Person, PersonNote, PersonSummary,
};
use crate::review::ReviewCandidate;

/// Latest date SQLite's `date()` understands.
const LAST_SQL_DATE: &str = "9999-12-31";

/// Field changes for [`Database::update_person`]. `None` leaves a field alone.
#[derive(Debug, Clone, Default)]
pub struct PersonUpdate {
    pub name: Option<String>,
    /// `Some("")` clears the context.
    pub context: Option<String>,
    pub importance: Option<i64>,
    /// `Some(None)` clears the cadence target.
    pub ideal_contact_frequency_days: Option<Option<i64>>,
}

/// SQLite database for people and everything attached to them.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `<data dir>/rapport.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or the schema
    /// cannot be created.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("rapport.db");
        Self::open_at(&path)
    }

    /// Open (or create) the database at an explicit path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or the schema
    /// cannot be created.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "opened database");
        Self::with_connection(conn)
    }

    /// Open an in-memory database.
    ///
    /// # Errors
    /// Returns an error if the schema cannot be created.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        let db = Self { conn };
        db.ensure_schema()
            .map_err(|e| DatabaseError::SchemaFailed(e.to_string()))?;
        Ok(db)
    }

    fn ensure_schema(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "PRAGMA foreign_keys = ON;

            CREATE TABLE IF NOT EXISTS people (
                id          TEXT PRIMARY KEY,
                name        TEXT NOT NULL,
                context     TEXT,
                importance  INTEGER DEFAULT 3,
                ideal_contact_frequency_days INTEGER,
                created_at  TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS interactions (
                id          TEXT PRIMARY KEY,
                person_id   TEXT NOT NULL REFERENCES people(id) ON DELETE CASCADE,
                date        TEXT NOT NULL,
                type        TEXT,
                notes       TEXT
            );

            CREATE TABLE IF NOT EXISTS commitments (
                id          TEXT PRIMARY KEY,
                person_id   TEXT NOT NULL REFERENCES people(id) ON DELETE CASCADE,
                description TEXT NOT NULL,
                due_date    TEXT,
                status      TEXT NOT NULL DEFAULT 'open',
                created_at  TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS person_notes (
                id          TEXT PRIMARY KEY,
                person_id   TEXT NOT NULL REFERENCES people(id) ON DELETE CASCADE,
                body        TEXT NOT NULL,
                created_at  TEXT NOT NULL,
                updated_at  TEXT
            );

            CREATE INDEX IF NOT EXISTS idx_interactions_person_date ON interactions(person_id, date);
            CREATE INDEX IF NOT EXISTS idx_commitments_person_status ON commitments(person_id, status);
            CREATE INDEX IF NOT EXISTS idx_person_notes_person ON person_notes(person_id);",
        )
    }

    // ── People ──────────────────────────────────────────────────────────

    /// Add a person. The name must not be blank.
    ///
    /// # Errors
    /// Returns a validation error for a blank name, or a database error.
    pub fn create_person(
        &self,
        name: &str,
        context: Option<&str>,
        importance: i64,
        ideal_contact_frequency_days: Option<i64>,
    ) -> Result<Person> {
        let person = Person {
            id: Uuid::new_v4().to_string(),
            name: require_text("name", name)?,
            context: optional_text(context),
            importance,
            ideal_contact_frequency_days: ideal_contact_frequency_days.filter(|f| *f > 0),
            created_at: Utc::now(),
        };
        self.conn.execute(
            "INSERT INTO people (id, name, context, importance, ideal_contact_frequency_days, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                person.id,
                person.name,
                person.context,
                person.importance,
                person.ideal_contact_frequency_days,
                person.created_at.to_rfc3339(),
            ],
        )?;
        tracing::debug!(id = %person.id, "created person");
        Ok(person)
    }

    pub fn get_person(&self, id: &str) -> Result<Option<Person>> {
        let person = self
            .conn
            .query_row(
                "SELECT id, name, context, COALESCE(importance, 3), ideal_contact_frequency_days, created_at
                 FROM people WHERE id = ?1",
                params![id],
                row_to_person,
            )
            .optional()?;
        Ok(person)
    }

    /// Like [`get_person`](Self::get_person) but a missing person is an error.
    pub fn require_person(&self, id: &str) -> Result<Person> {
        self.get_person(id)?.ok_or_else(|| CoreError::NotFound {
            entity: "person",
            id: id.to_string(),
        })
    }

    /// Apply `update` to a person and return the stored result.
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown id and a validation error for a
    /// blank name.
    pub fn update_person(&self, id: &str, update: PersonUpdate) -> Result<Person> {
        let mut person = self.require_person(id)?;
        if let Some(name) = update.name {
            person.name = require_text("name", &name)?;
        }
        if let Some(context) = update.context {
            person.context = optional_text(Some(&context));
        }
        if let Some(importance) = update.importance {
            person.importance = importance;
        }
        if let Some(freq) = update.ideal_contact_frequency_days {
            person.ideal_contact_frequency_days = freq.filter(|f| *f > 0);
        }
        self.conn.execute(
            "UPDATE people SET name = ?1, context = ?2, importance = ?3, ideal_contact_frequency_days = ?4
             WHERE id = ?5",
            params![
                person.name,
                person.context,
                person.importance,
                person.ideal_contact_frequency_days,
                person.id,
            ],
        )?;
        Ok(person)
    }

    /// Delete a person and everything they own. Returns whether a row was removed.
    pub fn delete_person(&self, id: &str) -> Result<bool> {
        let n = self.conn.execute("DELETE FROM people WHERE id = ?1", params![id])?;
        tracing::debug!(id, removed = n, "deleted person");
        Ok(n > 0)
    }

    /// All people, newest first, each with their most recent interaction date.
    pub fn list_people(&self) -> Result<Vec<PersonSummary>> {
        let mut last_contact = self.last_contact_by_person()?;
        let mut stmt = self.conn.prepare(
            "SELECT id, name, context, COALESCE(importance, 3), ideal_contact_frequency_days, created_at
             FROM people ORDER BY created_at DESC, id",
        )?;
        let people = stmt
            .query_map([], row_to_person)?
            .map(|row| {
                row.map(|person| PersonSummary {
                    last_contact_date: last_contact.remove(&person.id),
                    person,
                })
            })
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(people)
    }

    /// Most recent parsable interaction date per person.
    fn last_contact_by_person(&self) -> Result<HashMap<String, NaiveDate>> {
        let mut stmt = self.conn.prepare("SELECT person_id, date FROM interactions")?;
        let mut latest: HashMap<String, NaiveDate> = HashMap::new();
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, Option<String>>(1)?))
        })?;
        for row in rows {
            let (person_id, raw) = row?;
            let Some(date) = raw.as_deref().and_then(parse_date) else {
                tracing::warn!(
                    person_id = %person_id,
                    date = ?raw,
                    "skipping unparsable interaction date"
                );
                continue;
            };
            latest
                .entry(person_id)
                .and_modify(|d| *d = (*d).max(date))
                .or_insert(date);
        }
        Ok(latest)
    }

    // ── Interactions ────────────────────────────────────────────────────

    pub fn add_interaction(
        &self,
        person_id: &str,
        date: NaiveDate,
        kind: Option<InteractionKind>,
        notes: Option<&str>,
    ) -> Result<Interaction> {
        self.require_person(person_id)?;
        let interaction = Interaction {
            id: Uuid::new_v4().to_string(),
            person_id: person_id.to_string(),
            date: date.format("%Y-%m-%d").to_string(),
            kind: kind.map(|k| k.as_str().to_string()),
            notes: optional_text(notes),
        };
        self.conn.execute(
            "INSERT INTO interactions (id, person_id, date, type, notes) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                interaction.id,
                interaction.person_id,
                interaction.date,
                interaction.kind,
                interaction.notes,
            ],
        )?;
        tracing::debug!(id = %interaction.id, person_id, "logged interaction");
        Ok(interaction)
    }

    /// Interactions for a person, most recent first.
    pub fn list_interactions(&self, person_id: &str) -> Result<Vec<Interaction>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, person_id, date, type, notes FROM interactions
             WHERE person_id = ?1 ORDER BY date DESC, id",
        )?;
        let rows = stmt
            .query_map(params![person_id], |row| {
                Ok(Interaction {
                    id: row.get(0)?,
                    person_id: row.get(1)?,
                    date: row.get(2)?,
                    kind: row.get(3)?,
                    notes: row.get(4)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    pub fn delete_interaction(&self, id: &str) -> Result<bool> {
        let n = self
            .conn
            .execute("DELETE FROM interactions WHERE id = ?1", params![id])?;
        Ok(n > 0)
    }

    // ── Commitments ─────────────────────────────────────────────────────

    pub fn add_commitment(
        &self,
        person_id: &str,
        description: &str,
        due_date: Option<NaiveDate>,
    ) -> Result<Commitment> {
        self.require_person(person_id)?;
        let commitment = Commitment {
            id: Uuid::new_v4().to_string(),
            person_id: person_id.to_string(),
            description: require_text("description", description)?,
            due_date: due_date.map(|d| d.format("%Y-%m-%d").to_string()),
            status: CommitmentStatus::Open,
            created_at: Utc::now(),
        };
        self.conn.execute(
            "INSERT INTO commitments (id, person_id, description, due_date, status, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                commitment.id,
                commitment.person_id,
                commitment.description,
                commitment.due_date,
                commitment.status.as_str(),
                commitment.created_at.to_rfc3339(),
            ],
        )?;
        Ok(commitment)
    }

    /// Set a commitment's status. Returns whether a row was updated.
    pub fn set_commitment_status(&self, id: &str, status: CommitmentStatus) -> Result<bool> {
        let n = self.conn.execute(
            "UPDATE commitments SET status = ?1 WHERE id = ?2",
            params![status.as_str(), id],
        )?;
        Ok(n > 0)
    }

    /// Commitments for a person: open first, then by due date (undated last).
    pub fn list_commitments(&self, person_id: &str) -> Result<Vec<Commitment>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, person_id, description, due_date, status, created_at FROM commitments
             WHERE person_id = ?1
             ORDER BY status = 'closed', due_date IS NULL, due_date, created_at",
        )?;
        let rows = stmt
            .query_map(params![person_id], |row| {
                Ok(Commitment {
                    id: row.get(0)?,
                    person_id: row.get(1)?,
                    description: row.get(2)?,
                    due_date: row.get(3)?,
                    status: CommitmentStatus::from_db(&row.get::<_, String>(4)?),
                    created_at: timestamp(row, 5)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    // ── Notes ───────────────────────────────────────────────────────────

    pub fn add_note(&self, person_id: &str, body: &str) -> Result<PersonNote> {
        self.require_person(person_id)?;
        let note = PersonNote {
            id: Uuid::new_v4().to_string(),
            person_id: person_id.to_string(),
            body: require_text("body", body)?,
            created_at: Utc::now(),
            updated_at: None,
        };
        self.conn.execute(
            "INSERT INTO person_notes (id, person_id, body, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![note.id, note.person_id, note.body, note.created_at.to_rfc3339()],
        )?;
        Ok(note)
    }

    /// Replace a note's body and stamp `updated_at`.
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown id and a validation error for a blank body.
    pub fn update_note(&self, id: &str, body: &str) -> Result<PersonNote> {
        let body = require_text("body", body)?;
        let n = self.conn.execute(
            "UPDATE person_notes SET body = ?1, updated_at = ?2 WHERE id = ?3",
            params![body, Utc::now().to_rfc3339(), id],
        )?;
        if n == 0 {
            return Err(CoreError::NotFound {
                entity: "note",
                id: id.to_string(),
            });
        }
        let note = self.conn.query_row(
            "SELECT id, person_id, body, created_at, updated_at FROM person_notes WHERE id = ?1",
            params![id],
            row_to_note,
        )?;
        Ok(note)
    }

    pub fn delete_note(&self, id: &str) -> Result<bool> {
        let n = self
            .conn
            .execute("DELETE FROM person_notes WHERE id = ?1", params![id])?;
        Ok(n > 0)
    }

    /// Notes for a person, newest first.
    pub fn list_notes(&self, person_id: &str) -> Result<Vec<PersonNote>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, person_id, body, created_at, updated_at FROM person_notes
             WHERE person_id = ?1 ORDER BY created_at DESC, id",
        )?;
        let rows = stmt
            .query_map(params![person_id], row_to_note)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    // ── Weekly review ───────────────────────────────────────────────────

    /// Per-person inputs to the weekly review.
    ///
    /// Open loops are `open` commitments that are undated or due on or
    /// before `today + open_loop_window_days`. Rows come back oldest person
    /// first so equal scores rank in a stable order.
    pub fn review_candidates(
        &self,
        today: NaiveDate,
        open_loop_window_days: u32,
    ) -> Result<Vec<ReviewCandidate>> {
        let mut last_contact = self.last_contact_by_person()?;
        let horizon = match add_days(today, open_loop_window_days) {
            Some(date) if date.year() <= 9999 => date.format("%Y-%m-%d").to_string(),
            _ => LAST_SQL_DATE.to_string(),
        };

        let mut stmt = self.conn.prepare(
            "SELECT p.id, p.name, COALESCE(p.importance, 3),
                (SELECT COUNT(1) FROM commitments c
                  WHERE c.person_id = p.id AND c.status = 'open'
                    AND (c.due_date IS NULL OR date(c.due_date) <= date(?1))) AS open_loops
             FROM people p
             ORDER BY p.created_at, p.id",
        )?;
        let candidates = stmt
            .query_map(params![horizon], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, i64>(2)?,
                    row.get::<_, u32>(3)?,
                ))
            })?
            .map(|row| {
                row.map(|(id, name, importance, open_loops)| ReviewCandidate {
                    last_contact: last_contact.remove(&id).into(),
                    id,
                    name,
                    importance: Some(importance),
                    open_loop_count: Some(open_loops),
                })
            })
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(candidates)
    }
}

fn timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    parse_timestamp(idx, &raw)
}

fn optional_timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<DateTime<Utc>>> {
    let raw: Option<String> = row.get(idx)?;
    raw.map(|s| parse_timestamp(idx, &s)).transpose()
}

fn parse_timestamp(idx: usize, raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}

fn row_to_person(row: &Row<'_>) -> rusqlite::Result<Person> {
    Ok(Person {
        id: row.get(0)?,
        name: row.get(1)?,
        context: row.get(2)?,
        importance: row.get(3)?,
        ideal_contact_frequency_days: row.get(4)?,
        created_at: timestamp(row, 5)?,
    })
}

fn row_to_note(row: &Row<'_>) -> rusqlite::Result<PersonNote> {
    Ok(PersonNote {
        id: row.get(0)?,
        person_id: row.get(1)?,
        body: row.get(2)?,
        created_at: timestamp(row, 3)?,
        updated_at: optional_timestamp(row, 4)?,
    })
}
