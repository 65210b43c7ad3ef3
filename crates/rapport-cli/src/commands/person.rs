//! People management commands for CLI.

use clap::Subcommand;
use rapport_core::contact::{
    build_roster, compute_schedule_from_interactions, ContactMetrics, RosterOptions, SortMode,
};
use rapport_core::format::{describe_due, describe_relative_days, format_display_date, MISSING};
use rapport_core::{
    Commitment, Config, CoreError, Database, Interaction, Person, PersonNote, PersonUpdate,
};
use serde::Serialize;

use super::{print_json, resolve_today};

#[derive(Subcommand)]
pub enum PersonAction {
    /// Add someone
    Add {
        /// Display name
        name: String,
        /// Free-text context (how you know them, etc.)
        #[arg(long)]
        context: Option<String>,
        /// Importance rating (default from config, normally 3)
        #[arg(long)]
        importance: Option<i64>,
        /// Ideal days between contacts (default from config; 0 for none)
        #[arg(long)]
        frequency: Option<i64>,
    },
    /// List people with their contact cadence
    List {
        /// Sort order: name, last-contact, next-contact or overdue
        #[arg(long, default_value = "name")]
        sort: SortMode,
        /// Only show people who are overdue
        #[arg(long)]
        overdue_only: bool,
        /// Output JSON
        #[arg(long)]
        json: bool,
        /// Evaluate as of this date (YYYY-MM-DD)
        #[arg(long)]
        today: Option<String>,
    },
    /// Show one person with their history
    Show {
        /// Person ID
        id: String,
        /// Output JSON
        #[arg(long)]
        json: bool,
        /// Evaluate as of this date (YYYY-MM-DD)
        #[arg(long)]
        today: Option<String>,
    },
    /// Edit a person
    Edit {
        /// Person ID
        id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New context (empty string clears it)
        #[arg(long)]
        context: Option<String>,
        /// New importance
        #[arg(long)]
        importance: Option<i64>,
        /// New ideal days between contacts (0 clears it)
        #[arg(long)]
        frequency: Option<i64>,
    },
    /// Delete a person and all their data
    Delete {
        /// Person ID
        id: String,
    },
}

#[derive(Serialize)]
struct PersonDetail<'a> {
    person: &'a Person,
    metrics: ContactMetrics,
    interactions: &'a [Interaction],
    commitments: &'a [Commitment],
    notes: &'a [PersonNote],
}

pub fn run(action: PersonAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        PersonAction::Add {
            name,
            context,
            importance,
            frequency,
        } => {
            let config = Config::load_or_default();
            let importance = importance.unwrap_or(config.people.default_importance);
            let frequency =
                frequency.or(Some(i64::from(config.people.suggested_frequency_days)));
            let person = db.create_person(&name, context.as_deref(), importance, frequency)?;
            println!("Person created: {}", person.id);
            print_json(&person)?;
        }
        PersonAction::List {
            sort,
            overdue_only,
            json,
            today,
        } => {
            let today = resolve_today(today.as_deref())?;
            let roster = build_roster(
                db.list_people()?,
                today,
                RosterOptions { sort, overdue_only },
            );
            if json {
                print_json(&roster)?;
            } else if roster.is_empty() {
                if overdue_only {
                    println!("Nobody is overdue.");
                } else {
                    println!("No people yet. Add someone with `rapport person add <name>`.");
                }
            } else {
                for entry in &roster {
                    let last = match entry.metrics.days_since_last {
                        Some(_) => describe_relative_days(entry.metrics.days_since_last),
                        None => MISSING.to_string(),
                    };
                    let placeholder = next_placeholder(&entry.metrics, &entry.person);
                    println!(
                        "{:<24} last: {:<14} next: {:<18} {}",
                        entry.person.name,
                        last,
                        describe_due(entry.metrics.days_until_next, placeholder),
                        entry.person.id,
                    );
                }
            }
        }
        PersonAction::Show { id, json, today } => {
            let today = resolve_today(today.as_deref())?;
            let person = db.require_person(&id)?;
            let interactions = db.list_interactions(&id)?;
            let commitments = db.list_commitments(&id)?;
            let notes = db.list_notes(&id)?;
            let metrics = compute_schedule_from_interactions(
                interactions.iter().map(|i| i.date.as_str()),
                person.frequency_days(),
                today,
            );

            if json {
                print_json(&PersonDetail {
                    person: &person,
                    metrics,
                    interactions: &interactions,
                    commitments: &commitments,
                    notes: &notes,
                })?;
            } else {
                print_detail(&person, &metrics, &interactions, &commitments, &notes);
            }
        }
        PersonAction::Edit {
            id,
            name,
            context,
            importance,
            frequency,
        } => {
            let update = PersonUpdate {
                name,
                context,
                importance,
                ideal_contact_frequency_days: frequency.map(|f| (f > 0).then_some(f)),
            };
            let person = db.update_person(&id, update)?;
            println!("Person updated:");
            print_json(&person)?;
        }
        PersonAction::Delete { id } => {
            if !db.delete_person(&id)? {
                return Err(CoreError::NotFound { entity: "person", id }.into());
            }
            println!("Person deleted: {id}");
        }
    }
    Ok(())
}

fn next_placeholder(metrics: &ContactMetrics, person: &Person) -> &'static str {
    if metrics.last_contact_date.is_none() {
        "Log an interaction"
    } else if person.ideal_contact_frequency_days.is_none() {
        "No cadence set"
    } else {
        MISSING
    }
}

fn print_detail(
    person: &Person,
    metrics: &ContactMetrics,
    interactions: &[Interaction],
    commitments: &[Commitment],
    notes: &[PersonNote],
) {
    println!("{} ({})", person.name, person.id);
    if let Some(context) = &person.context {
        println!("  Context:      {context}");
    }
    println!("  Importance:   {}", person.importance);
    match person.ideal_contact_frequency_days {
        Some(f) => println!("  Cadence:      every {f} days"),
        None => println!("  Cadence:      {MISSING}"),
    }
    let since = describe_relative_days(metrics.days_since_last);
    if since.is_empty() {
        println!("  Last contact: {}", format_display_date(metrics.last_contact_date));
    } else {
        println!(
            "  Last contact: {} ({since})",
            format_display_date(metrics.last_contact_date)
        );
    }
    let due = describe_due(metrics.days_until_next, next_placeholder(metrics, person));
    match metrics.next_contact_date {
        Some(_) => println!(
            "  Next contact: {} ({due})",
            format_display_date(metrics.next_contact_date)
        ),
        None => println!("  Next contact: {due}"),
    }

    println!();
    println!("Interactions:");
    if interactions.is_empty() {
        println!("  (none)");
    }
    for i in interactions {
        println!(
            "  {}  {:<10} {}  [{}]",
            i.date,
            i.kind.as_deref().unwrap_or(MISSING),
            i.notes.as_deref().unwrap_or(""),
            i.id
        );
    }

    println!();
    println!("Commitments:");
    if commitments.is_empty() {
        println!("  (none)");
    }
    for c in commitments {
        let due = c
            .due_date
            .as_deref()
            .map(|d| format!("due {d}"))
            .unwrap_or_else(|| "no due date".to_string());
        println!("  [{}] {}  ({due})  [{}]", c.status.as_str(), c.description, c.id);
    }

    println!();
    println!("Notes:");
    if notes.is_empty() {
        println!("  (none)");
    }
    for n in notes {
        println!("  - {}  [{}]", n.body, n.id);
    }
}
