//! The contract between the dispatcher and whatever actually plays audio.
//!
//! The dispatcher only reads queue snapshots and asks for mutations; the gateway
//! owns every guild queue and serializes changes to it.

use serenity::async_trait;
use serenity::model::id::{ChannelId, GuildId};

use super::music_manager::MusicResult;
use crate::commands::music::audio_sources::track_metadata::Song;

/// Snapshot of a guild's queue at the time it was requested.
#[derive(Debug, Clone, PartialEq)]
pub struct GuildQueue {
    /// Songs in play order; the song currently playing comes first.
    pub songs: Vec<Song>,
    pub paused: bool,
    /// Text channel that receives playback notifications for this queue.
    pub text_channel: Option<ChannelId>,
}

/// A single search hit. Only the URL is needed to play it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayRequest {
    pub guild_id: GuildId,
    pub voice_channel: ChannelId,
    pub text_channel: ChannelId,
    pub url: String,
    pub member_name: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlaybackGateway: Send + Sync {
    /// The guild's queue, or `None` when nothing is queued.
    async fn queue(&self, guild_id: GuildId) -> Option<GuildQueue>;

    /// Play or enqueue the song at `request.url`, joining the voice channel if needed.
    async fn play(&self, request: PlayRequest) -> MusicResult<Song>;

    /// Search for songs matching `query`, returning at most `limit` results.
    async fn search(&self, query: String, limit: usize) -> MusicResult<Vec<SearchResult>>;

    async fn skip(&self, guild_id: GuildId) -> MusicResult<()>;

    /// Stop playback and clear the queue.
    async fn stop(&self, guild_id: GuildId) -> MusicResult<()>;

    async fn pause(&self, guild_id: GuildId) -> MusicResult<()>;

    async fn resume(&self, guild_id: GuildId) -> MusicResult<()>;
}
