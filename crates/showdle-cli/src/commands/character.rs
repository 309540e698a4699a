use clap::Subcommand;
use serde::Serialize;
use showdle_core::{puzzle, Character, Config, DatabaseError, GameMode};

use super::Context;

#[derive(Subcommand)]
pub enum CharacterAction {
    /// Add a character to the catalog
    Add {
        name: String,
        /// Quote used by the quote mode
        #[arg(long)]
        quote: Option<String>,
        /// Image reference used by the image mode
        #[arg(long)]
        image: Option<String>,
    },
    /// List the catalog
    List,
    /// Remove a character by id
    Remove { id: i64 },
    /// Today's answer for each mode (or one mode)
    Daily {
        #[arg(long)]
        mode: Option<GameMode>,
    },
}

#[derive(Serialize)]
struct DailyAnswer {
    mode: GameMode,
    seed: String,
    character: Option<Character>,
}

pub fn run(ctx: &Context, action: CharacterAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let service = ctx.service(&config)?;
    let db = service.db();

    match action {
        CharacterAction::Add { name, quote, image } => {
            let character = db.add_character(&name, quote.as_deref(), image.as_deref())?;
            ctx.emit(&character, |c| println!("Character added: {} (#{})", c.name, c.id))?;
        }
        CharacterAction::List => {
            let characters = db.list_characters()?;
            ctx.emit(&characters, |list| {
                for c in list {
                    let modes: Vec<&str> = GameMode::ALL
                        .iter()
                        .filter(|m| c.playable_in(**m))
                        .map(|m| m.as_str())
                        .collect();
                    println!("#{:<4} {:<24} {}", c.id, c.name, modes.join(","));
                }
            })?;
        }
        CharacterAction::Remove { id } => {
            db.remove_character(id)?;
            ctx.emit(&id, |id| println!("Character removed: #{id}"))?;
        }
        CharacterAction::Daily { mode } => {
            let day = service.today();
            let modes = match mode {
                Some(mode) => vec![mode],
                None => GameMode::ALL.to_vec(),
            };
            let answers = modes
                .into_iter()
                .map(|mode| -> Result<DailyAnswer, DatabaseError> {
                    Ok(DailyAnswer {
                        mode,
                        seed: puzzle::daily_seed(day, mode),
                        character: db.daily_character(day, mode)?,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            ctx.emit(&answers, |answers| {
                println!("Answers for {day} ({})", service.zone());
                for a in answers {
                    match &a.character {
                        Some(c) => println!("  {:<8} {}", a.mode, c.name),
                        None => println!("  {:<8} (no eligible character)", a.mode),
                    }
                }
            })?;
        }
    }
    Ok(())
}
