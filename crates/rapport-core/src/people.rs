//! Domain records: people, interactions, commitments and notes.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Importance given to people created without an explicit rating.
pub const DEFAULT_IMPORTANCE: i64 = 3;

/// Someone the user keeps in touch with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    pub name: String,
    pub context: Option<String>,
    pub importance: i64,
    /// Target days between touchpoints. `None` or non-positive means no target.
    pub ideal_contact_frequency_days: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl Person {
    /// Frequency in the form the scheduler takes.
    pub fn frequency_days(&self) -> Option<f64> {
        self.ideal_contact_frequency_days.map(|f| f as f64)
    }
}

/// A person together with the date of their most recent interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonSummary {
    #[serde(flatten)]
    pub person: Person,
    pub last_contact_date: Option<NaiveDate>,
}

/// How an interaction happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    Call,
    Message,
    /// In person.
    Meeting,
    Video,
    VoiceNote,
    Other,
}

impl InteractionKind {
    pub const ALL: [InteractionKind; 6] = [
        InteractionKind::Call,
        InteractionKind::Message,
        InteractionKind::Meeting,
        InteractionKind::Video,
        InteractionKind::VoiceNote,
        InteractionKind::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            InteractionKind::Call => "call",
            InteractionKind::Message => "message",
            InteractionKind::Meeting => "meeting",
            InteractionKind::Video => "video",
            InteractionKind::VoiceNote => "voice_note",
            InteractionKind::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            InteractionKind::Call => "Call",
            InteractionKind::Message => "Message",
            InteractionKind::Meeting => "In-person",
            InteractionKind::Video => "Video chat",
            InteractionKind::VoiceNote => "Voice note",
            InteractionKind::Other => "Other",
        }
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InteractionKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        InteractionKind::ALL
            .into_iter()
            .find(|k| k.as_str() == normalized)
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "kind".into(),
                message: format!(
                    "unknown interaction kind '{s}' (expected one of: {})",
                    InteractionKind::ALL.map(|k| k.as_str()).join(", ")
                ),
            })
    }
}

/// A recorded touchpoint with a person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub id: String,
    pub person_id: String,
    /// Stored text, normally `YYYY-MM-DD`. Parsed leniently when read.
    pub date: String,
    /// Stored text; rows written by other tools may hold kinds this build
    /// does not know, so this is not an [`InteractionKind`].
    pub kind: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitmentStatus {
    Open,
    Closed,
}

impl CommitmentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CommitmentStatus::Open => "open",
            CommitmentStatus::Closed => "closed",
        }
    }

    /// Anything other than `closed` counts as open.
    pub fn from_db(s: &str) -> Self {
        if s.eq_ignore_ascii_case("closed") {
            CommitmentStatus::Closed
        } else {
            CommitmentStatus::Open
        }
    }
}

/// Something the user promised to do for or with a person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commitment {
    pub id: String,
    pub person_id: String,
    pub description: String,
    pub due_date: Option<String>,
    pub status: CommitmentStatus,
    pub created_at: DateTime<Utc>,
}

/// Free-text note attached to a person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonNote {
    pub id: String,
    pub person_id: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Trim `value` and reject it when nothing is left.
pub fn require_text(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::Empty(field))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Trim optional text, mapping blank values to `None`.
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interaction_kind_parses_loosely() {
        assert_eq!("Call".parse::<InteractionKind>().unwrap(), InteractionKind::Call);
        assert_eq!(
            "voice-note".parse::<InteractionKind>().unwrap(),
            InteractionKind::VoiceNote
        );
        assert!("carrier pigeon".parse::<InteractionKind>().is_err());
    }

    #[test]
    fn commitment_status_defaults_to_open() {
        assert_eq!(CommitmentStatus::from_db("closed"), CommitmentStatus::Closed);
        assert_eq!(CommitmentStatus::from_db("open"), CommitmentStatus::Open);
        assert_eq!(CommitmentStatus::from_db("weird"), CommitmentStatus::Open);
    }

    #[test]
    fn text_helpers_trim() {
        assert_eq!(require_text("name", "  Ada ").unwrap(), "Ada");
        assert!(matches!(
            require_text("name", "   "),
            Err(ValidationError::Empty("name"))
        ));
        assert_eq!(optional_text(Some("  ")), None);
        assert_eq!(optional_text(Some(" hi ")), Some("hi".to_string()));
        assert_eq!(optional_text(None), None);
    }
}
