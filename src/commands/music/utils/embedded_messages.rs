use serenity::builder::CreateEmbed;
use serenity::model::colour::Colour;
use std::fmt::Display;

use super::format_duration;
use crate::commands::music::audio_sources::track_metadata::Song;

pub const JOIN_VOICE_CHANNEL: &str = "You need to join a voice channel first!";
pub const SONG_NOT_FOUND: &str = "The song you searched for could not be found.";
pub const SKIPPED: &str = "⏭ Skipped to the next song.";
pub const NOTHING_TO_SKIP: &str = "There is no song to skip right now.";
pub const QUEUE_EMPTY: &str = "The queue is currently empty.";
pub const STOPPED: &str = "⏹ Playback stopped.";
pub const NOTHING_PLAYING: &str = "Nothing is playing right now.";
pub const QUEUE_CLEARED: &str = "🗑 The queue has been cleared.";
pub const ALREADY_PAUSED: &str = "The song is already paused.";
pub const PAUSED: &str = "⏸ Paused the song.";
pub const ALREADY_PLAYING: &str = "The song is already playing.";
pub const RESUMED: &str = "▶ Resumed the song.";

/// Accent colour of the now playing embed
pub const ACCENT_COLOUR: Colour = Colour::BLUE;

/// Fixed format for every failure reported to a user
pub fn error_message(err: impl Display) -> String {
    format!("Error: {}", err)
}

pub fn now_playing_notice(song: &Song) -> String {
    format!("Now playing: {}", song.name)
}

pub fn added_to_queue_notice(song: &Song) -> String {
    format!("Added to queue: {}", song.name)
}

/// One `"{position}. {name}"` line per song, numbered from 1
pub fn render_queue(songs: &[Song]) -> String {
    songs
        .iter()
        .enumerate()
        .map(|(index, song)| format!("{}. {}", index + 1, song.name))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Create an embed for the song a play request resolved to
pub fn now_playing(song: &Song) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title("🎵 Now Playing")
        .description(&song.name)
        .url(&song.url)
        .color(ACCENT_COLOUR);

    if let Some(thumbnail) = &song.thumbnail {
        embed = embed.thumbnail(thumbnail);
    }

    if let Some(duration) = song.duration {
        embed = embed.field("Duration", format_duration(duration), true);
    }

    embed
}
