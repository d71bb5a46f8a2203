use clap::Subcommand;
use pawwords_core::storage::Database;
use pawwords_core::srs::MAX_LEVEL;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Progress overview
    Show {
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        StatsAction::Show { json } => {
            let stats = db.load_stats()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
                return Ok(());
            }

            let words = db.load_words()?;
            let learned = words.iter().filter(|w| w.is_learned).count();
            let mastered = words.iter().filter(|w| w.is_graduated()).count();
            let now = super::now_ms();
            let due = words.iter().filter(|w| w.is_due(now)).count();

            println!("reward points:   {}", stats.reward_points);
            println!("streak:          {} days", stats.streak);
            println!("words completed: {}", stats.total_words);
            println!(
                "collection:      {} words, {} learned, {} at level {}, {} due",
                words.len(),
                learned,
                mastered,
                MAX_LEVEL,
                due
            );
        }
    }
    Ok(())
}
