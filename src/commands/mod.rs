//! This module aggregates all the command modules for the bot.

use serenity::http::Http;
use tracing::{error, info};

use crate::{Data, Error};

/// Commands related to music playback.
pub mod music;

/// Every slash command the bot registers, in registration order
pub fn commands() -> Vec<poise::Command<Data, Error>> {
    use music::{pause::*, play::*, queue::*, skip::*, stop::*};

    vec![
        play(),
        skip(),
        queue_list(),
        stop(),
        clear_queue(),
        pause(),
        resume(),
    ]
}

/// Replace the application's global command set.
///
/// A failure is logged and reported through the return value; the bot keeps
/// running with whatever was registered before.
pub async fn register_commands(
    http: impl AsRef<Http>,
    commands: &[poise::Command<Data, Error>],
) -> bool {
    info!("Registering {} application commands", commands.len());

    match poise::builtins::register_globally(http, commands).await {
        Ok(()) => {
            info!("Application commands registered");
            true
        }
        Err(e) => {
            error!("Failed to register application commands: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_command_names_and_order() {
        let names: Vec<String> = commands().into_iter().map(|command| command.name).collect();

        assert_eq!(
            names,
            vec!["play", "skip", "queue-list", "stop", "clear-queue", "pause", "resume"]
        );
    }

    #[test]
    fn test_commands_have_descriptions() {
        for command in commands() {
            assert!(
                command.description.as_deref().is_some_and(|text| !text.is_empty()),
                "/{} has no description",
                command.name
            );
        }
    }

    #[test]
    fn test_only_play_takes_an_option() {
        for command in commands() {
            if command.name == "play" {
                assert_eq!(command.parameters.len(), 1);
                assert_eq!(command.parameters[0].name, "query");
                assert!(command.parameters[0].required);
            } else {
                assert!(command.parameters.is_empty(), "/{} takes options", command.name);
            }
        }
    }

    #[test]
    fn test_commands_are_guild_only_slash_commands() {
        for command in commands() {
            assert!(command.guild_only, "/{} is not guild only", command.name);
            assert!(command.slash_action.is_some(), "/{} is not a slash command", command.name);
        }
    }
}
