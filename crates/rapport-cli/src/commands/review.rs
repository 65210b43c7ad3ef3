//! Weekly review command for CLI.

use clap::Args;
use rapport_core::format::{describe_last_contact, describe_open_loops, describe_recency};
use rapport_core::{Config, Database, PriorityRanker};

use super::{print_json, resolve_today};

#[derive(Args)]
pub struct ReviewArgs {
    /// How many people to show (default from config, normally 5)
    #[arg(long)]
    limit: Option<usize>,
    /// Evaluate as of this date (YYYY-MM-DD)
    #[arg(long)]
    today: Option<String>,
    /// Output JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: ReviewArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let db = Database::open()?;
    let today = resolve_today(args.today.as_deref())?;

    let candidates = db.review_candidates(today, config.review.open_loop_window_days)?;
    tracing::info!(%today, candidates = candidates.len(), "running weekly review");
    let ranker = PriorityRanker::new(config.review.weights());
    let rows = ranker.rank(&candidates, today, args.limit.unwrap_or(config.review.limit));

    if args.json {
        return print_json(&rows);
    }

    if rows.is_empty() {
        println!("No people yet. Add someone with `rapport person add <name>`.");
        return Ok(());
    }

    println!("Top priorities for the week of {}", today.format("%b %-d, %Y"));
    println!("Based on importance, recency, and open loops.");
    println!();
    for (rank, row) in rows.iter().enumerate() {
        println!("{}. {}  (score {})  [{}]", rank + 1, row.name, row.score, row.person_id);
        println!(
            "   {} • {} • {}",
            describe_last_contact(row.last_contact_date),
            describe_open_loops(row.open_loop_count),
            describe_recency(row.recency_days),
        );
    }
    Ok(())
}
