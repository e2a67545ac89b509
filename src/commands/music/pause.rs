use super::*;

/// Pause the current song
#[poise::command(slash_command, guild_only, category = "Music")]
pub async fn pause(ctx: Context<'_>) -> CommandResult {
    dispatch(ctx, MusicCommand::Pause).await
}

/// Resume the paused song
#[poise::command(slash_command, guild_only, category = "Music")]
pub async fn resume(ctx: Context<'_>) -> CommandResult {
    dispatch(ctx, MusicCommand::Resume).await
}
