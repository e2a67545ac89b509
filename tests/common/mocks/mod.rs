//! In-memory stand-ins for the playback gateway and the Discord reply/notify APIs

use rusty_dj::Error;
use rusty_dj::commands::music::audio_sources::track_metadata::Song;
use rusty_dj::commands::music::utils::event_handlers::{NotificationSink, PlaybackEvent};
use rusty_dj::commands::music::utils::gateway::{
    GuildQueue, PlayRequest, PlaybackGateway, SearchResult,
};
use rusty_dj::commands::music::utils::music_manager::{MusicError, MusicResult};
use rusty_dj::commands::music::utils::reply::{ReplyTransport, Response};
use rusty_dj::CommandResult;
use serenity::async_trait;
use serenity::model::id::{ChannelId, GuildId};
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::mpsc::UnboundedSender;

#[derive(Debug, Default)]
struct FakeGuild {
    songs: Vec<Song>,
    paused: bool,
    text_channel: Option<ChannelId>,
}

/// A playback gateway that keeps queues in memory and behaves like the real one
#[derive(Default)]
pub struct FakeGateway {
    guilds: Mutex<HashMap<GuildId, FakeGuild>>,
    catalog: Vec<SearchResult>,
    failing_urls: Vec<String>,
    events: Option<UnboundedSender<PlaybackEvent>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Results returned by searches, filtered by a case-insensitive substring match
    pub fn with_catalog(mut self, catalog: Vec<SearchResult>) -> Self {
        self.catalog = catalog;
        self
    }

    /// Urls that fail to resolve
    pub fn with_failing_url(mut self, url: &str) -> Self {
        self.failing_urls.push(url.to_string());
        self
    }

    pub fn with_events(mut self, events: UnboundedSender<PlaybackEvent>) -> Self {
        self.events = Some(events);
        self
    }

    fn emit(&self, event: PlaybackEvent) {
        if let Some(events) = &self.events {
            let _ = events.send(event);
        }
    }
}

#[async_trait]
impl PlaybackGateway for FakeGateway {
    async fn queue(&self, guild_id: GuildId) -> Option<GuildQueue> {
        let guilds = self.guilds.lock().unwrap();
        let guild = guilds.get(&guild_id)?;
        Some(GuildQueue {
            songs: guild.songs.clone(),
            paused: guild.paused,
            text_channel: guild.text_channel,
        })
    }

    async fn play(&self, request: PlayRequest) -> MusicResult<Song> {
        if self.failing_urls.contains(&request.url) {
            return Err(MusicError::AudioSourceError(format!(
                "could not resolve {}",
                request.url
            )));
        }

        let song = self
            .catalog
            .iter()
            .find(|result| result.url == request.url)
            .map(|result| Song {
                name: result.name.clone(),
                url: result.url.clone(),
                ..Default::default()
            })
            .unwrap_or_else(|| Song {
                name: request.url.clone(),
                url: request.url.clone(),
                ..Default::default()
            });

        let (queued, text_channel) = {
            let mut guilds = self.guilds.lock().unwrap();
            let guild = guilds.entry(request.guild_id).or_default();
            let text_channel = *guild.text_channel.get_or_insert(request.text_channel);
            guild.songs.push(song.clone());
            (guild.songs.len() > 1, text_channel)
        };

        let event = if queued {
            PlaybackEvent::SongQueued {
                guild_id: request.guild_id,
                text_channel,
                song: song.clone(),
            }
        } else {
            PlaybackEvent::SongStarted {
                guild_id: request.guild_id,
                text_channel,
                song: song.clone(),
            }
        };
        self.emit(event);

        Ok(song)
    }

    async fn search(&self, query: String, limit: usize) -> MusicResult<Vec<SearchResult>> {
        let query = query.to_lowercase();
        Ok(self
            .catalog
            .iter()
            .filter(|result| result.name.to_lowercase().contains(&query))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn skip(&self, guild_id: GuildId) -> MusicResult<()> {
        let mut guilds = self.guilds.lock().unwrap();
        let guild = guilds.get_mut(&guild_id).ok_or(MusicError::NotConnected)?;
        guild.songs.remove(0);
        guild.paused = false;
        if guild.songs.is_empty() {
            guilds.remove(&guild_id);
        }
        Ok(())
    }

    async fn stop(&self, guild_id: GuildId) -> MusicResult<()> {
        self.guilds
            .lock()
            .unwrap()
            .remove(&guild_id)
            .map(|_| ())
            .ok_or(MusicError::NotConnected)
    }

    async fn pause(&self, guild_id: GuildId) -> MusicResult<()> {
        let mut guilds = self.guilds.lock().unwrap();
        let guild = guilds.get_mut(&guild_id).ok_or(MusicError::NotConnected)?;
        guild.paused = true;
        Ok(())
    }

    async fn resume(&self, guild_id: GuildId) -> MusicResult<()> {
        let mut guilds = self.guilds.lock().unwrap();
        let guild = guilds.get_mut(&guild_id).ok_or(MusicError::NotConnected)?;
        guild.paused = false;
        Ok(())
    }
}

/// Records what each invocation would have answered
#[derive(Debug, Default)]
pub struct RecordingTransport {
    pub deferred: bool,
    pub sent: Vec<Response>,
    pub edited: Vec<Response>,
}

impl RecordingTransport {
    /// Every response that reached the user, however it was delivered
    pub fn responses(&self) -> Vec<Response> {
        self.sent.iter().chain(self.edited.iter()).cloned().collect()
    }
}

#[async_trait]
impl ReplyTransport for RecordingTransport {
    async fn defer(&mut self) -> CommandResult {
        self.deferred = true;
        Ok(())
    }

    async fn send(&mut self, response: Response) -> CommandResult {
        self.sent.push(response);
        Ok(())
    }

    async fn edit(&mut self, response: Response) -> CommandResult {
        self.edited.push(response);
        Ok(())
    }
}

/// Collects channel notifications instead of posting them
#[derive(Default)]
pub struct RecordingSink {
    pub sent: Mutex<Vec<(ChannelId, String)>>,
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn send(&self, channel: ChannelId, content: String) -> Result<(), Error> {
        self.sent.lock().unwrap().push((channel, content));
        Ok(())
    }
}
