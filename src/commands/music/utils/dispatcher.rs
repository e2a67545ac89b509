//! Validates music command invocations and maps them onto the playback gateway.
//!
//! The dispatcher holds no state of its own: every decision is made from the
//! invocation and a fresh read of the guild's queue.

use serenity::model::id::{ChannelId, GuildId, UserId};
use std::sync::Arc;
use tracing::{error, info};

use super::command::MusicCommand;
use super::embedded_messages::{self, render_queue};
use super::gateway::{PlayRequest, PlaybackGateway};
use super::music_manager::MusicError;
use super::reply::{ReplyTransport, Responder, Response};
use crate::CommandResult;
use crate::commands::music::audio_sources::AudioSource;

/// Searches only ever look at the best match
pub const SEARCH_LIMIT: usize = 1;

/// A single slash command event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub command: MusicCommand,
    pub guild_id: GuildId,
    pub text_channel: ChannelId,
    /// The member's current voice channel, if they are in one
    pub voice_channel: Option<ChannelId>,
    pub member: UserId,
    pub member_name: String,
}

pub struct Dispatcher {
    gateway: Arc<dyn PlaybackGateway>,
}

impl Dispatcher {
    pub fn new(gateway: Arc<dyn PlaybackGateway>) -> Self {
        Self { gateway }
    }

    /// Handle one invocation, producing exactly one reply.
    ///
    /// Gateway failures are reported to the member as `"Error: {message}"`; the
    /// returned error is reserved for failures of the reply itself.
    pub async fn handle<T: ReplyTransport>(
        &self,
        invocation: Invocation,
        responder: &mut Responder<T>,
    ) -> CommandResult {
        info!(
            "Received /{} from {} ({}) in guild {}",
            invocation.command.name(),
            invocation.member_name,
            invocation.member,
            invocation.guild_id
        );

        if invocation.command.requires_voice_channel() && invocation.voice_channel.is_none() {
            return responder
                .reply(Response::text(embedded_messages::JOIN_VOICE_CHANNEL))
                .await;
        }

        if let Err(err) = self.execute(&invocation, responder).await {
            error!(
                "Failed to handle /{} in guild {}: {}",
                invocation.command.name(),
                invocation.guild_id,
                err
            );

            // Nothing more can be said once the member has their answer
            if responder.is_replied() {
                return Ok(());
            }

            responder
                .reply(Response::text(embedded_messages::error_message(&err)))
                .await?;
        }

        Ok(())
    }

    async fn execute<T: ReplyTransport>(
        &self,
        invocation: &Invocation,
        responder: &mut Responder<T>,
    ) -> CommandResult {
        let guild_id = invocation.guild_id;

        let reply = match &invocation.command {
            MusicCommand::Play { query } => return self.play(invocation, query, responder).await,
            MusicCommand::Skip => match self.gateway.queue(guild_id).await {
                None => embedded_messages::NOTHING_TO_SKIP.to_string(),
                Some(_) => {
                    self.gateway.skip(guild_id).await?;
                    embedded_messages::SKIPPED.to_string()
                }
            },
            MusicCommand::QueueList => match self.gateway.queue(guild_id).await {
                Some(queue) if !queue.songs.is_empty() => render_queue(&queue.songs),
                _ => embedded_messages::QUEUE_EMPTY.to_string(),
            },
            MusicCommand::Stop => match self.gateway.queue(guild_id).await {
                None => embedded_messages::NOTHING_PLAYING.to_string(),
                Some(_) => {
                    self.gateway.stop(guild_id).await?;
                    embedded_messages::STOPPED.to_string()
                }
            },
            MusicCommand::ClearQueue => match self.gateway.queue(guild_id).await {
                None => embedded_messages::QUEUE_EMPTY.to_string(),
                Some(_) => {
                    self.gateway.stop(guild_id).await?;
                    embedded_messages::QUEUE_CLEARED.to_string()
                }
            },
            MusicCommand::Pause => match self.gateway.queue(guild_id).await {
                None => embedded_messages::NOTHING_PLAYING.to_string(),
                Some(queue) if queue.paused => embedded_messages::ALREADY_PAUSED.to_string(),
                Some(_) => {
                    self.gateway.pause(guild_id).await?;
                    embedded_messages::PAUSED.to_string()
                }
            },
            MusicCommand::Resume => match self.gateway.queue(guild_id).await {
                None => embedded_messages::NOTHING_PLAYING.to_string(),
                Some(queue) if !queue.paused => embedded_messages::ALREADY_PLAYING.to_string(),
                Some(_) => {
                    self.gateway.resume(guild_id).await?;
                    embedded_messages::RESUMED.to_string()
                }
            },
        };

        responder.reply(Response::Text(reply)).await
    }

    async fn play<T: ReplyTransport>(
        &self,
        invocation: &Invocation,
        query: &str,
        responder: &mut Responder<T>,
    ) -> CommandResult {
        let voice_channel = invocation
            .voice_channel
            .ok_or(MusicError::UserNotInVoiceChannel)?;

        // Resolving and starting a song can take a while
        responder.defer().await?;

        let url = if AudioSource::is_url(query) {
            query.to_string()
        } else {
            let results = self.gateway.search(query.to_string(), SEARCH_LIMIT).await?;
            match results.into_iter().next() {
                Some(result) => result.url,
                None => {
                    return responder
                        .reply(Response::text(embedded_messages::SONG_NOT_FOUND))
                        .await;
                }
            }
        };

        let song = self
            .gateway
            .play(PlayRequest {
                guild_id: invocation.guild_id,
                voice_channel,
                text_channel: invocation.text_channel,
                url,
                member_name: invocation.member_name.clone(),
            })
            .await?;

        responder.reply(Response::NowPlaying(song)).await
    }
}
