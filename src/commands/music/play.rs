use super::*;

/// Play a song from a URL or the best search match
#[poise::command(slash_command, guild_only, category = "Music")]
pub async fn play(
    ctx: Context<'_>,
    #[description = "The song to play"] query: String,
) -> CommandResult {
    dispatch(ctx, MusicCommand::Play { query }).await
}
