use super::*;

/// Skip the current song
#[poise::command(slash_command, guild_only, category = "Music")]
pub async fn skip(ctx: Context<'_>) -> CommandResult {
    dispatch(ctx, MusicCommand::Skip).await
}
