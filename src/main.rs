use dotenv::dotenv;
use poise::serenity_prelude as serenity;
use songbird::{SerenityInit, Songbird};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use rusty_dj::commands::music::utils::{
    event_handlers::{DiscordNotifier, EventRelay},
    music_manager::SongbirdGateway,
};
use rusty_dj::config::Config;
use rusty_dj::{Data, Error, commands, events};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize logging with debug level for our crate
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("rusty_dj=debug,warn")),
        )
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .with_target(true)
        .with_ansi(true)
        .pretty()
        .init();

    dotenv().ok();

    let config = Config::load()?;

    let intents =
        serenity::GatewayIntents::non_privileged() | serenity::GatewayIntents::GUILD_VOICE_STATES;

    let songbird = Songbird::serenity();
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let gateway = Arc::new(SongbirdGateway::new(
        songbird.clone(),
        reqwest::Client::new(),
        events_tx,
    ));

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::commands(),
            event_handler: |ctx, event, framework, data| {
                Box::pin(events::event_handler(ctx, event, framework, data))
            },
            on_error: |error| Box::pin(events::on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            Box::pin(async move {
                commands::register_commands(ctx, &framework.options().commands).await;

                let relay = EventRelay::new(DiscordNotifier::new(ctx.http.clone()));
                tokio::spawn(relay.run(events_rx));

                Ok(Data::new(gateway))
            })
        });

    let mut client = serenity::ClientBuilder::new(&config.token, intents)
        .application_id(serenity::ApplicationId::new(config.application_id))
        .framework(framework.build())
        .register_songbird_with(songbird)
        .await?;

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Shutting down");
                shard_manager.shutdown_all().await;
            }
            Err(e) => error!("Failed to listen for shutdown signal: {}", e),
        }
    });

    client.start().await.map_err(Into::into)
}
