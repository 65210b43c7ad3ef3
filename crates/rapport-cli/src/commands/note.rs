//! Person note commands for CLI.

use clap::Subcommand;
use rapport_core::{CoreError, Database};

use super::print_json;

#[derive(Subcommand)]
pub enum NoteAction {
    /// Add a note to a person
    Add {
        /// Person ID
        person_id: String,
        /// Note text
        body: String,
    },
    /// Replace a note's text
    Edit {
        /// Note ID
        id: String,
        /// New text
        body: String,
    },
    /// Delete a note
    Delete {
        /// Note ID
        id: String,
    },
    /// List a person's notes, newest first
    List {
        /// Person ID
        person_id: String,
    },
}

pub fn run(action: NoteAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        NoteAction::Add { person_id, body } => {
            let note = db.add_note(&person_id, &body)?;
            println!("Note added: {}", note.id);
        }
        NoteAction::Edit { id, body } => {
            let note = db.update_note(&id, &body)?;
            println!("Note updated:");
            print_json(&note)?;
        }
        NoteAction::Delete { id } => {
            if !db.delete_note(&id)? {
                return Err(CoreError::NotFound { entity: "note", id }.into());
            }
            println!("Note deleted: {id}");
        }
        NoteAction::List { person_id } => {
            db.require_person(&person_id)?;
            print_json(&db.list_notes(&person_id)?)?;
        }
    }
    Ok(())
}
