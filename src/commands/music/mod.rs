pub(crate) mod pause;
pub(crate) mod play;
pub(crate) mod queue;
pub(crate) mod skip;
pub(crate) mod stop;

pub mod audio_sources;
pub mod utils;

use crate::{CommandResult, Context};
use utils::command::MusicCommand;
use utils::dispatcher::Invocation;
use utils::music_manager::{MusicError, get_user_voice_channel};
use utils::reply::{PoiseTransport, Responder};

/// Hand a parsed command to the dispatcher with everything it needs to know
/// about who invoked it and from where.
async fn dispatch(ctx: Context<'_>, command: MusicCommand) -> CommandResult {
    let guild_id = ctx.guild_id().ok_or(MusicError::NotInGuild)?;
    let author = ctx.author();

    let invocation = Invocation {
        command,
        guild_id,
        text_channel: ctx.channel_id(),
        voice_channel: get_user_voice_channel(ctx.serenity_context(), guild_id, author.id).ok(),
        member: author.id,
        member_name: author.name.clone(),
    };

    let mut responder = Responder::new(PoiseTransport::new(ctx));
    ctx.data().dispatcher.handle(invocation, &mut responder).await
}
