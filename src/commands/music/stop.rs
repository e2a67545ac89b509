use super::*;

/// Stop the music, clear the queue, and leave the voice channel
#[poise::command(slash_command, guild_only, category = "Music")]
pub async fn stop(ctx: Context<'_>) -> CommandResult {
    dispatch(ctx, MusicCommand::Stop).await
}

/// Clear the queue
#[poise::command(slash_command, guild_only, rename = "clear-queue", category = "Music")]
pub async fn clear_queue(ctx: Context<'_>) -> CommandResult {
    dispatch(ctx, MusicCommand::ClearQueue).await
}
