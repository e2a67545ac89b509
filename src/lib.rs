//! A Discord music bot: slash commands are turned into invocations, checked by a
//! small dispatcher and forwarded to a songbird-backed playback gateway.

use std::sync::Arc;

pub mod commands;
pub mod config;
pub mod events;

use commands::music::utils::{dispatcher::Dispatcher, music_manager::SongbirdGateway};

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;
pub type CommandResult = Result<(), Error>;

/// User data, which is stored and accessible in all command invocations
pub struct Data {
    pub dispatcher: Dispatcher,
    pub gateway: Arc<SongbirdGateway>,
}

impl Data {
    pub fn new(gateway: Arc<SongbirdGateway>) -> Self {
        Self {
            dispatcher: Dispatcher::new(gateway.clone()),
            gateway,
        }
    }
}
