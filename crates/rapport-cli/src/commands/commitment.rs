//! Commitment (open loop) commands for CLI.

use clap::Subcommand;
use rapport_core::{CommitmentStatus, CoreError, Database};

use super::{parse_day, print_json};

#[derive(Subcommand)]
pub enum CommitmentAction {
    /// Record something you owe someone
    Add {
        /// Person ID
        person_id: String,
        /// What you committed to
        description: String,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
    },
    /// Mark a commitment as done
    Close {
        /// Commitment ID
        id: String,
    },
    /// Reopen a closed commitment
    Reopen {
        /// Commitment ID
        id: String,
    },
    /// List a person's commitments, open first
    List {
        /// Person ID
        person_id: String,
    },
}

pub fn run(action: CommitmentAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        CommitmentAction::Add {
            person_id,
            description,
            due,
        } => {
            let due = due.as_deref().map(parse_day).transpose()?;
            let commitment = db.add_commitment(&person_id, &description, due)?;
            println!("Commitment created: {}", commitment.id);
            print_json(&commitment)?;
        }
        CommitmentAction::Close { id } => set_status(&db, id, CommitmentStatus::Closed)?,
        CommitmentAction::Reopen { id } => set_status(&db, id, CommitmentStatus::Open)?,
        CommitmentAction::List { person_id } => {
            db.require_person(&person_id)?;
            print_json(&db.list_commitments(&person_id)?)?;
        }
    }
    Ok(())
}

fn set_status(
    db: &Database,
    id: String,
    status: CommitmentStatus,
) -> Result<(), Box<dyn std::error::Error>> {
    if !db.set_commitment_status(&id, status)? {
        return Err(CoreError::NotFound { entity: "commitment", id }.into());
    }
    println!("Commitment {id} is now {}", status.as_str());
    Ok(())
}
