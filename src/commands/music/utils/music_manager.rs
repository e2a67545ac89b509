use dashmap::DashMap;
use serenity::async_trait;
use serenity::client::Context;
use serenity::model::id::{ChannelId, GuildId, UserId};
use serenity::prelude::Mutex as SerenityMutex;
use songbird::input::{Input, YoutubeDl};
use songbird::tracks::{PlayMode, Track};
use songbird::{Call, Event, Songbird, TrackEvent};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

use super::event_handlers::{PlaybackEvent, TrackData, TrackNotifier};
use super::gateway::{GuildQueue, PlayRequest, PlaybackGateway, SearchResult};
use crate::commands::music::audio_sources::track_metadata::Song;

/// Errors that can occur during music operations
#[derive(Error, Debug)]
pub enum MusicError {
    #[error("Not in a guild")]
    NotInGuild,

    #[error("Failed to join voice channel: {0}")]
    JoinError(String),

    #[error("Not connected to a voice channel")]
    NotConnected,

    #[error("User is not in a voice channel")]
    UserNotInVoiceChannel,

    #[error("Audio source error: {0}")]
    AudioSourceError(String),

    #[error("Playback error: {0}")]
    PlaybackError(String),

    #[error("Interaction was already acknowledged")]
    AlreadyAcknowledged,

    #[error("Interaction was already replied to")]
    AlreadyReplied,
}

/// Result type for music operations
pub type MusicResult<T> = Result<T, MusicError>;

/// Plays audio through songbird, keeping one builtin track queue per guild
pub struct SongbirdGateway {
    songbird: Arc<Songbird>,
    http_client: reqwest::Client,
    // Text channel that receives notifications for each guild's queue
    text_channels: Arc<DashMap<GuildId, ChannelId>>,
    events: UnboundedSender<PlaybackEvent>,
}

impl SongbirdGateway {
    pub fn new(
        songbird: Arc<Songbird>,
        http_client: reqwest::Client,
        events: UnboundedSender<PlaybackEvent>,
    ) -> Self {
        Self {
            songbird,
            http_client,
            text_channels: Arc::new(DashMap::new()),
            events,
        }
    }

    /// Get the current voice channel call handle
    fn get_call(&self, guild_id: GuildId) -> MusicResult<Arc<SerenityMutex<Call>>> {
        self.songbird.get(guild_id).ok_or(MusicError::NotConnected)
    }

    /// Join a voice channel, reusing the existing call if there is one
    async fn join_channel(
        &self,
        guild_id: GuildId,
        channel_id: ChannelId,
    ) -> MusicResult<Arc<SerenityMutex<Call>>> {
        if let Some(call) = self.songbird.get(guild_id) {
            return Ok(call);
        }

        info!("Joining voice channel {} in guild {}", channel_id, guild_id);
        let call = self
            .songbird
            .join(guild_id, channel_id)
            .await
            .map_err(|e| MusicError::JoinError(e.to_string()))?;

        // A fresh call gets its notifiers once; they follow every track it plays
        {
            let mut handler = call.lock().await;
            for event in [TrackEvent::Play, TrackEvent::Error] {
                handler.add_global_event(
                    Event::Track(event),
                    TrackNotifier {
                        guild_id,
                        text_channels: self.text_channels.clone(),
                        events: self.events.clone(),
                    },
                );
            }
        }

        Ok(call)
    }

    /// Leave the voice channel and forget the guild's notification channel
    pub async fn leave_channel(&self, guild_id: GuildId) -> MusicResult<()> {
        self.text_channels.remove(&guild_id);

        if self.songbird.get(guild_id).is_none() {
            return Err(MusicError::NotConnected);
        }

        self.songbird
            .remove(guild_id)
            .await
            .map_err(|e| MusicError::JoinError(format!("Failed to leave voice channel: {}", e)))
    }

    /// The voice channel the bot is currently connected to in this guild
    pub async fn connected_channel(&self, guild_id: GuildId) -> Option<ChannelId> {
        let call = self.songbird.get(guild_id)?;
        let channel = call.lock().await.current_channel()?;
        Some(ChannelId::new(channel.0.get()))
    }

    fn send_event(&self, event: PlaybackEvent) {
        if self.events.send(event).is_err() {
            warn!("Playback event dropped: relay is not running");
        }
    }
}

#[async_trait]
impl PlaybackGateway for SongbirdGateway {
    async fn queue(&self, guild_id: GuildId) -> Option<GuildQueue> {
        let call = self.songbird.get(guild_id)?;
        let handles = call.lock().await.queue().current_queue();

        let current = handles.first()?;
        let paused = match current.get_info().await {
            Ok(state) => matches!(state.playing, PlayMode::Pause),
            Err(e) => {
                debug!("Could not read track state in guild {}: {}", guild_id, e);
                false
            }
        };

        let songs = handles
            .iter()
            .map(|handle| handle.data::<TrackData>().song.clone())
            .collect();

        Some(GuildQueue {
            songs,
            paused,
            text_channel: self.text_channels.get(&guild_id).map(|entry| *entry),
        })
    }

    async fn play(&self, request: PlayRequest) -> MusicResult<Song> {
        let call = self
            .join_channel(request.guild_id, request.voice_channel)
            .await?;

        let mut input: Input = YoutubeDl::new(self.http_client.clone(), request.url.clone()).into();
        let metadata = input
            .aux_metadata()
            .await
            .map_err(|e| MusicError::AudioSourceError(e.to_string()))?;
        let song = Song::from_metadata(metadata, &request.url);

        let mut track = Track::from(input);
        track.user_data = Arc::new(TrackData::new(song.clone()));

        let (queue_length, text_channel) = {
            let mut handler = call.lock().await;
            // Set before enqueueing so the first Play event already sees it
            let text_channel = claim_notification_channel(
                &self.text_channels,
                request.guild_id,
                request.text_channel,
                handler.queue().is_empty(),
            );
            handler.enqueue(track).await;
            (handler.queue().len(), text_channel)
        };

        info!(
            "Queued '{}' in guild {} for {} (position {})",
            song.name, request.guild_id, request.member_name, queue_length
        );

        if queue_length > 1 {
            self.send_event(PlaybackEvent::SongQueued {
                guild_id: request.guild_id,
                text_channel,
                song: song.clone(),
            });
        }

        Ok(song)
    }

    async fn search(&self, query: String, limit: usize) -> MusicResult<Vec<SearchResult>> {
        info!("Searching for '{}' (limit {})", query, limit);

        let mut source = YoutubeDl::new_search(self.http_client.clone(), query);
        let found = source
            .search(Some(limit))
            .await
            .map_err(|e| MusicError::AudioSourceError(e.to_string()))?;

        let results = found
            .into_iter()
            .filter_map(|metadata| {
                let url = metadata.source_url?;
                Some(SearchResult {
                    name: metadata.title.unwrap_or_else(|| url.clone()),
                    url,
                })
            })
            .take(limit)
            .collect();

        Ok(results)
    }

    async fn skip(&self, guild_id: GuildId) -> MusicResult<()> {
        let call = self.get_call(guild_id)?;
        let handler = call.lock().await;
        handler
            .queue()
            .skip()
            .map_err(|e| MusicError::PlaybackError(e.to_string()))
    }

    async fn stop(&self, guild_id: GuildId) -> MusicResult<()> {
        let call = self.get_call(guild_id)?;
        call.lock().await.queue().stop();
        info!("Stopped playback and cleared the queue in guild {}", guild_id);

        // Leaving is best effort: the queue is already gone
        if let Err(e) = self.leave_channel(guild_id).await {
            warn!("Failed to leave voice channel during stop: {}", e);
        }

        Ok(())
    }

    async fn pause(&self, guild_id: GuildId) -> MusicResult<()> {
        let call = self.get_call(guild_id)?;
        let handler = call.lock().await;
        handler
            .queue()
            .pause()
            .map_err(|e| MusicError::PlaybackError(e.to_string()))
    }

    async fn resume(&self, guild_id: GuildId) -> MusicResult<()> {
        let call = self.get_call(guild_id)?;
        let handler = call.lock().await;
        handler
            .queue()
            .resume()
            .map_err(|e| MusicError::PlaybackError(e.to_string()))
    }
}

/// Record where a guild's queue sends its notifications and return that channel.
///
/// A new queue (nothing queued yet) takes the requesting channel, even if the
/// call outlived an earlier queue. Songs added to a running queue keep its channel.
pub fn claim_notification_channel(
    text_channels: &DashMap<GuildId, ChannelId>,
    guild_id: GuildId,
    requested: ChannelId,
    queue_is_empty: bool,
) -> ChannelId {
    if queue_is_empty {
        text_channels.insert(guild_id, requested);
        return requested;
    }

    *text_channels.entry(guild_id).or_insert(requested)
}

/// Get the voice channel ID that the user is currently in
pub fn get_user_voice_channel(
    ctx: &Context,
    guild_id: GuildId,
    user_id: UserId,
) -> MusicResult<ChannelId> {
    let guild = ctx.cache.guild(guild_id).ok_or(MusicError::NotInGuild)?;

    guild
        .voice_states
        .get(&user_id)
        .and_then(|voice_state| voice_state.channel_id)
        .ok_or(MusicError::UserNotInVoiceChannel)
}

/// Someone connected to a voice channel, as far as leave-on-empty cares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occupant {
    pub user_id: UserId,
    pub channel_id: Option<ChannelId>,
    pub is_bot: bool,
}

/// Count the human members in `channel_id`, never counting the bot itself
pub fn count_listeners(
    occupants: impl IntoIterator<Item = Occupant>,
    channel_id: ChannelId,
    bot_id: UserId,
) -> usize {
    occupants
        .into_iter()
        .filter(|occupant| occupant.channel_id == Some(channel_id))
        .filter(|occupant| occupant.user_id != bot_id && !occupant.is_bot)
        .count()
}

/// Count the non-bot members in a voice channel, according to the cache
pub fn listeners_in_channel(
    ctx: &Context,
    guild_id: GuildId,
    channel_id: ChannelId,
) -> Option<usize> {
    let bot_id = ctx.cache.current_user().id;
    let guild = ctx.cache.guild(guild_id)?;

    let occupants = guild.voice_states.values().map(|voice_state| Occupant {
        user_id: voice_state.user_id,
        channel_id: voice_state.channel_id,
        is_bot: voice_state
            .member
            .as_ref()
            .map(|member| member.user.bot)
            .or_else(|| guild.members.get(&voice_state.user_id).map(|m| m.user.bot))
            .unwrap_or(false),
    });

    Some(count_listeners(occupants, channel_id, bot_id))
}
