//! Config commands. `get` prints the bare value for scripting; the rest
//! print JSON like every other command.

use clap::Subcommand;
use pillarwise_core::{Config, ConfigError};
use serde_json::{json, Value};

use super::print_json;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one value, e.g. `tracking.history_weeks`
    Get { key: String },
    /// Validate, save and echo one value
    Set { key: String, value: String },
    /// Print the whole config
    List,
    /// Restore and print the defaults
    Reset,
}

/// Typed value at a dot-separated key, or `UnknownKey`.
fn lookup(config: &Config, key: &str) -> Result<Value, Box<dyn std::error::Error>> {
    let tree = serde_json::to_value(config)?;
    let pointer = format!("/{}", key.replace('.', "/"));
    tree.pointer(&pointer)
        .cloned()
        .ok_or_else(|| ConfigError::UnknownKey(key.to_string()).into())
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            match lookup(&config, &key)? {
                Value::String(s) => println!("{s}"),
                other => println!("{other}"),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            let stored = lookup(&config, &key)?;
            print_json(&json!({ "key": key, "value": stored }))?;
        }
        ConfigAction::List => print_json(&Config::load()?)?,
        ConfigAction::Reset => {
            let config = Config::default();
            config.save()?;
            print_json(&config)?;
        }
    }
    Ok(())
}
