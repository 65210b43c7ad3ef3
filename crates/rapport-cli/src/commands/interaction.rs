//! Interaction logging commands for CLI.

use clap::Subcommand;
use rapport_core::{CoreError, Database, InteractionKind};

use super::{parse_day, print_json, resolve_today};

#[derive(Subcommand)]
pub enum InteractionAction {
    /// Record an interaction with someone
    Log {
        /// Person ID
        person_id: String,
        /// When it happened (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<String>,
        /// call, message, meeting, video, voice_note or other
        #[arg(long)]
        kind: Option<InteractionKind>,
        /// What you talked about
        #[arg(long)]
        notes: Option<String>,
    },
    /// List a person's interactions, most recent first
    List {
        /// Person ID
        person_id: String,
    },
    /// Delete an interaction
    Delete {
        /// Interaction ID
        id: String,
    },
}

pub fn run(action: InteractionAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        InteractionAction::Log {
            person_id,
            date,
            kind,
            notes,
        } => {
            let date = match date {
                Some(d) => parse_day(&d)?,
                None => resolve_today(None)?,
            };
            let interaction = db.add_interaction(&person_id, date, kind, notes.as_deref())?;
            println!("Interaction logged: {}", interaction.id);
            print_json(&interaction)?;
        }
        InteractionAction::List { person_id } => {
            db.require_person(&person_id)?;
            print_json(&db.list_interactions(&person_id)?)?;
        }
        InteractionAction::Delete { id } => {
            if !db.delete_interaction(&id)? {
                return Err(CoreError::NotFound { entity: "interaction", id }.into());
            }
            println!("Interaction deleted: {id}");
        }
    }
    Ok(())
}
