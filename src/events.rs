use serenity::client::Context;
use serenity::model::voice::VoiceState;
use tracing::{debug, error, info, warn};

use crate::commands::music::utils::gateway::PlaybackGateway;
use crate::commands::music::utils::music_manager::listeners_in_channel;
use crate::{Data, Error};

/// Gateway events the framework forwards to us
pub async fn event_handler(
    ctx: &Context,
    event: &serenity::all::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::all::FullEvent::Ready { data_about_bot } => {
            info!("{} is connected", data_about_bot.user.name);
        }
        serenity::all::FullEvent::VoiceStateUpdate { new, .. } => {
            leave_if_alone(ctx, new, data).await;
        }
        _ => (),
    }
    Ok(())
}

/// Stop and leave once nobody but bots is left listening
async fn leave_if_alone(ctx: &Context, state: &VoiceState, data: &Data) {
    let Some(guild_id) = state.guild_id else {
        return;
    };
    let Some(channel_id) = data.gateway.connected_channel(guild_id).await else {
        return;
    };

    let listeners = listeners_in_channel(ctx, guild_id, channel_id);
    if !should_leave(listeners) {
        debug!("{:?} listeners left in {}", listeners, channel_id);
        return;
    }

    info!(
        "Voice channel {} in guild {} is empty, leaving",
        channel_id, guild_id
    );
    if let Err(e) = data.gateway.stop(guild_id).await {
        warn!("Failed to leave empty voice channel: {}", e);
    }
}

/// Only a known-empty channel is left; an uncached guild is not proof of that
fn should_leave(listeners: Option<usize>) -> bool {
    listeners == Some(0)
}

/// Log command failures; anything else gets the framework's default handling
pub async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to set up the framework: {}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command /{}: {}", ctx.command().name, error);
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Some(0) => true ; "nobody left")]
    #[test_case(Some(1) => false ; "one listener")]
    #[test_case(Some(5) => false ; "several listeners")]
    #[test_case(None => false ; "guild not cached")]
    fn test_should_leave(listeners: Option<usize>) -> bool {
        should_leave(listeners)
    }
}
