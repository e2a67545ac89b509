use super::*;

/// Show the songs in the queue
#[poise::command(slash_command, guild_only, rename = "queue-list", category = "Music")]
pub async fn queue_list(ctx: Context<'_>) -> CommandResult {
    dispatch(ctx, MusicCommand::QueueList).await
}
