use clap::Subcommand;
use showdle_core::Config;

use super::Context;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "game.reference_zone", "history.recent_limit")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },
    /// List all config values
    List,
    /// Reset config to defaults
    Reset,
}

pub fn run(ctx: &Context, action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            let value = config
                .get(&key)
                .ok_or_else(|| format!("unknown key: {key}"))?;
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            tracing::info!(%key, %value, "updated configuration");
            println!("ok");
        }
        ConfigAction::List => {
            let config = Config::load()?;
            if ctx.json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                println!("game.reference_zone  = {}", config.game.reference_zone);
                println!("history.recent_limit = {}", config.history.recent_limit);
                println!("log.level            = {}", config.log.level);
            }
        }
        ConfigAction::Reset => {
            Config::default().save()?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}
