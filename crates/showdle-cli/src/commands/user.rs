use clap::Subcommand;
use serde::Serialize;
use showdle_core::{Config, DailyStatus, Database, UserRecord};

use super::{format_slots, Context};

#[derive(Subcommand)]
pub enum UserAction {
    /// Create a user with an empty score record
    Create {
        /// Unique display name
        name: String,
    },
    /// List all users
    List,
    /// Show a user and their score record
    Show {
        /// User name or id
        user: String,
    },
    /// Delete a user and all of their scores
    Delete {
        /// User name or id
        user: String,
    },
}

#[derive(Serialize)]
struct UserDetails {
    #[serde(flatten)]
    user: UserRecord,
    status: DailyStatus,
}

pub fn run(ctx: &Context, action: UserAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        UserAction::Create { name } => {
            let user = db.create_user(&name)?;
            ctx.emit(&user, |u| println!("User created: {} ({})", u.name, u.id))?;
        }
        UserAction::List => {
            let users = db.list_users()?;
            ctx.emit(&users, |users| {
                if users.is_empty() {
                    println!("No users.");
                }
                for u in users {
                    println!("{}  {}", u.id, u.name);
                }
            })?;
        }
        UserAction::Show { user } => {
            let user = db.resolve_user(&user)?;
            let status = ctx.service(&Config::load()?)?.status(user.id)?;
            let details = UserDetails { user, status };
            ctx.emit(&details, |d| {
                println!("{} ({})", d.user.name, d.user.id);
                println!("  created:  {}", d.user.created_at.to_rfc3339());
                println!(
                    "  streak:   {} (longest {})",
                    d.status.streak, d.status.longest_streak
                );
                match d.status.last_played {
                    Some(at) => println!("  last day: {}", at.to_rfc3339()),
                    None => println!("  last day: never"),
                }
                println!("  {}: {}", d.status.day, format_slots(d.status.scores.slots()));
            })?;
        }
        UserAction::Delete { user } => {
            let user = db.resolve_user(&user)?;
            db.delete_user(user.id)?;
            ctx.emit(&user, |u| println!("User deleted: {}", u.name))?;
        }
    }
    Ok(())
}
