//! The single reply each invocation is allowed.
//!
//! A reply is either sent directly or, for slow commands, deferred first and then
//! completed by editing the deferred response. `Responder` enforces that at most
//! one reply is ever made.

use poise::CreateReply;
use serenity::async_trait;
use serenity::builder::EditInteractionResponse;

use super::embedded_messages;
use super::music_manager::MusicError;
use crate::commands::music::audio_sources::track_metadata::Song;
use crate::{CommandResult, Context};

/// What an invocation answers with
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Text(String),
    NowPlaying(Song),
}

impl Response {
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }
}

/// The platform side of a reply
#[async_trait]
pub trait ReplyTransport: Send {
    /// Acknowledge the invocation without answering yet
    async fn defer(&mut self) -> CommandResult;

    /// Answer an invocation that has not been acknowledged
    async fn send(&mut self, response: Response) -> CommandResult;

    /// Replace the deferred acknowledgment with the answer
    async fn edit(&mut self, response: Response) -> CommandResult;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyState {
    Pending,
    Deferred,
    Replied,
}

/// Tracks the reply state of one invocation
pub struct Responder<T> {
    transport: T,
    state: ReplyState,
}

impl<T: ReplyTransport> Responder<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            state: ReplyState::Pending,
        }
    }

    pub fn state(&self) -> ReplyState {
        self.state
    }

    pub fn is_replied(&self) -> bool {
        self.state == ReplyState::Replied
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    pub async fn defer(&mut self) -> CommandResult {
        if self.state != ReplyState::Pending {
            return Err(MusicError::AlreadyAcknowledged.into());
        }

        self.transport.defer().await?;
        self.state = ReplyState::Deferred;
        Ok(())
    }

    pub async fn reply(&mut self, response: Response) -> CommandResult {
        match self.state {
            ReplyState::Pending => self.transport.send(response).await?,
            ReplyState::Deferred => self.transport.edit(response).await?,
            ReplyState::Replied => return Err(MusicError::AlreadyReplied.into()),
        }

        self.state = ReplyState::Replied;
        Ok(())
    }
}

/// Replies through a poise command context
pub struct PoiseTransport<'a> {
    ctx: Context<'a>,
}

impl<'a> PoiseTransport<'a> {
    pub fn new(ctx: Context<'a>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl<'a> ReplyTransport for PoiseTransport<'a> {
    async fn defer(&mut self) -> CommandResult {
        self.ctx.defer().await?;
        Ok(())
    }

    async fn send(&mut self, response: Response) -> CommandResult {
        let reply = match response {
            Response::Text(content) => CreateReply::default().content(content),
            Response::NowPlaying(song) => {
                CreateReply::default().embed(embedded_messages::now_playing(&song))
            }
        };

        self.ctx.send(reply).await?;
        Ok(())
    }

    async fn edit(&mut self, response: Response) -> CommandResult {
        let poise::Context::Application(app_ctx) = self.ctx else {
            // Prefix invocations have no deferred response to edit
            return self.send(response).await;
        };

        let edit = match response {
            Response::Text(content) => EditInteractionResponse::new().content(content),
            Response::NowPlaying(song) => {
                EditInteractionResponse::new().embed(embedded_messages::now_playing(&song))
            }
        };

        app_ctx
            .interaction
            .edit_response(app_ctx.serenity_context(), edit)
            .await?;
        Ok(())
    }
}

/// Records what would have been sent, for tests
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingTransport {
    pub deferred: bool,
    pub sent: Vec<Response>,
    pub edited: Vec<Response>,
}

#[cfg(test)]
impl RecordingTransport {
    /// The one response that reached the user, however it was delivered
    pub fn response(&self) -> Option<&Response> {
        self.sent.first().or(self.edited.first())
    }
}

#[cfg(test)]
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
