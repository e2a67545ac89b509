use dashmap::DashMap;
use serenity::async_trait;
use serenity::http::Http;
use serenity::model::id::{ChannelId, GuildId};
use songbird::tracks::PlayMode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, info, warn};

use super::embedded_messages;
use crate::Error;
use crate::commands::music::audio_sources::track_metadata::Song;

/// Asynchronous notifications emitted by the playback gateway
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackEvent {
    SongStarted {
        guild_id: GuildId,
        text_channel: ChannelId,
        song: Song,
    },
    SongQueued {
        guild_id: GuildId,
        text_channel: ChannelId,
        song: Song,
    },
    PlaybackError {
        channel: Option<ChannelId>,
        message: String,
    },
}

impl PlaybackEvent {
    /// The channel and text to send for this event, if it has a user-visible channel
    pub fn notification(&self) -> Option<(ChannelId, String)> {
        match self {
            Self::SongStarted {
                text_channel, song, ..
            } => Some((*text_channel, embedded_messages::now_playing_notice(song))),
            Self::SongQueued {
                text_channel, song, ..
            } => Some((*text_channel, embedded_messages::added_to_queue_notice(song))),
            Self::PlaybackError { channel, message } => {
                channel.map(|channel| (channel, embedded_messages::error_message(message)))
            }
        }
    }
}

/// User data attached to every track handed to songbird
pub struct TrackData {
    pub song: Song,
    announced: AtomicBool,
}

impl TrackData {
    pub fn new(song: Song) -> Self {
        Self {
            song,
            announced: AtomicBool::new(false),
        }
    }

    /// Returns true only the first time it is called; resumes fire `Play` again
    pub fn mark_announced(&self) -> bool {
        !self.announced.swap(true, Ordering::SeqCst)
    }
}

/// Map a track's new play mode to the notification it deserves, if any.
///
/// Only the first `Play` of a track is announced; later ones are resumes.
pub fn track_event(
    guild_id: GuildId,
    playing: &PlayMode,
    data: &TrackData,
    text_channel: Option<ChannelId>,
) -> Option<PlaybackEvent> {
    match playing {
        PlayMode::Errored(err) => {
            error!(
                "Track '{}' failed in guild {}: {:?}",
                data.song.name, guild_id, err
            );
            Some(PlaybackEvent::PlaybackError {
                channel: text_channel,
                message: format!("Could not play {}: {}", data.song.name, err),
            })
        }
        PlayMode::Play if data.mark_announced() => {
            text_channel.map(|text_channel| PlaybackEvent::SongStarted {
                guild_id,
                text_channel,
                song: data.song.clone(),
            })
        }
        _ => None,
    }
}

/// Global track event handler turning songbird events into `PlaybackEvent`s
pub struct TrackNotifier {
    pub guild_id: GuildId,
    pub text_channels: Arc<DashMap<GuildId, ChannelId>>,
    pub events: UnboundedSender<PlaybackEvent>,
}

#[async_trait]
impl songbird::EventHandler for TrackNotifier {
    async fn act(&self, ctx: &songbird::EventContext<'_>) -> Option<songbird::Event> {
        if let songbird::EventContext::Track(tracks) = ctx {
            let text_channel = self.text_channels.get(&self.guild_id).map(|entry| *entry);

            for (state, handle) in tracks.iter() {
                let data = handle.data::<TrackData>();
                let Some(event) = track_event(self.guild_id, &state.playing, &data, text_channel)
                else {
                    continue;
                };

                if self.events.send(event).is_err() {
                    warn!("Playback event dropped: relay is not running");
                }
            }
        }
        None
    }
}

/// Somewhere to deliver one-shot text notifications
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn send(&self, channel: ChannelId, content: String) -> Result<(), Error>;
}

#[async_trait]
impl<S: NotificationSink + ?Sized> NotificationSink for Arc<S> {
    async fn send(&self, channel: ChannelId, content: String) -> Result<(), Error> {
        (**self).send(channel, content).await
    }
}

/// Sends notifications as plain messages through the Discord HTTP API
pub struct DiscordNotifier {
    http: Arc<Http>,
}

impl DiscordNotifier {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl NotificationSink for DiscordNotifier {
    async fn send(&self, channel: ChannelId, content: String) -> Result<(), Error> {
        channel.say(self.http.clone(), content).await?;
        Ok(())
    }
}

/// Forwards playback events to their text channels, independently of any interaction
pub struct EventRelay<S> {
    sink: S,
}

impl<S: NotificationSink> EventRelay<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Relay events until every sender has been dropped
    pub async fn run(self, mut events: UnboundedReceiver<PlaybackEvent>) {
        info!("Playback event relay started");
        while let Some(event) = events.recv().await {
            self.relay(event).await;
        }
        info!("Playback event relay stopped");
    }

    /// Deliver a single event. Failures are logged, never propagated.
    pub async fn relay(&self, event: PlaybackEvent) {
        if let PlaybackEvent::PlaybackError { channel, message } = &event {
            error!("Playback error (channel {:?}): {}", channel, message);
        }

        let Some((channel, content)) = event.notification() else {
            debug!("No channel to notify for {:?}", event);
            return;
        };

        if let Err(e) = self.sink.send(channel, content).await {
            warn!("Failed to send notification to channel {}: {}", channel, e);
        }
    }
}
