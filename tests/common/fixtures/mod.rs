//! Sample ids and songs used across the integration tests

use rusty_dj::commands::music::audio_sources::track_metadata::Song;
use rusty_dj::commands::music::utils::{command::MusicCommand, dispatcher::Invocation};
use rusty_dj::commands::music::utils::gateway::SearchResult;
use serenity::model::id::{ChannelId, GuildId, UserId};

/// Sample guild id for testing
pub const SAMPLE_GUILD_ID: GuildId = GuildId::new(111222333);

/// Sample user id for testing
pub const SAMPLE_USER_ID: UserId = UserId::new(123456789);

/// Sample text channel id for testing
pub const SAMPLE_CHANNEL_ID: ChannelId = ChannelId::new(987654321);

/// Sample voice channel id for testing
pub const SAMPLE_VOICE_CHANNEL_ID: ChannelId = ChannelId::new(555666777);

pub fn song(name: &str) -> Song {
    Song {
        name: name.to_string(),
        url: format!("https://www.youtube.com/watch?v={}", name.to_lowercase()),
        ..Default::default()
    }
}

pub fn search_result(name: &str) -> SearchResult {
    let song = song(name);
    SearchResult {
        name: song.name,
        url: song.url,
    }
}

/// An invocation from a member sitting in the sample voice channel
pub fn invocation(command: MusicCommand) -> Invocation {
    Invocation {
        command,
        guild_id: SAMPLE_GUILD_ID,
        text_channel: SAMPLE_CHANNEL_ID,
        voice_channel: Some(SAMPLE_VOICE_CHANNEL_ID),
        member: SAMPLE_USER_ID,
        member_name: "tester".to_string(),
    }
}

/// The same invocation from a member outside any voice channel
pub fn invocation_outside_voice(command: MusicCommand) -> Invocation {
    Invocation {
        voice_channel: None,
        ..invocation(command)
    }
}

pub fn play(query: &str) -> MusicCommand {
    MusicCommand::Play {
        query: query.to_string(),
    }
}
