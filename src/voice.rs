//! Voice channel seam and the session that turns utterances into spoken briefs.
//!
//! The channel owns all asynchronous I/O. Brief generation itself is
//! synchronous and runs between `listen` and `speak`.

use async_trait::async_trait;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin, Stdout};
use tracing::{debug, info, warn};

use crate::state::DashboardState;
use crate::utils::normalize_utterance;

pub const PROCESSING_FAILED: &str =
    "I'm sorry, I couldn't process your request. Please try again.";

#[derive(Debug, Error)]
pub enum RecognitionError {
    #[error("input stream ended")]
    Ended,

    #[error("recognition failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("playback failed: {0}")]
    Io(#[from] std::io::Error),
}

#[async_trait]
pub trait VoiceChannel: Send {
    /// Wait for one recognized utterance.
    async fn listen(&mut self) -> Result<String, RecognitionError>;

    /// Resolve once playback of `text` has finished.
    async fn speak(&mut self, text: &str) -> Result<(), SynthesisError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VoiceStatus {
    #[default]
    Idle,
    Listening,
    Processing,
    Speaking,
}

#[derive(Debug, Default)]
pub struct VoiceSession {
    status: VoiceStatus,
    transcript: String,
    response: String,
}

impl VoiceSession {
    pub fn status(&self) -> VoiceStatus {
        self.status
    }

    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    pub fn response(&self) -> &str {
        &self.response
    }

    /// Recognition errors leave the session idle.
    pub async fn listen<V: VoiceChannel + ?Sized>(
        &mut self,
        voice: &mut V,
    ) -> Result<String, RecognitionError> {
        self.status = VoiceStatus::Listening;
        let heard = voice.listen().await;
        if let Err(e) = &heard {
            warn!("Speech recognition error: {:#}", e);
            self.status = VoiceStatus::Idle;
        }
        heard
    }

    /// For a `listen` future dropped before it resolved, e.g. the losing
    /// branch of a `select!`.
    pub fn cancel_listening(&mut self) {
        if self.status == VoiceStatus::Listening {
            self.status = VoiceStatus::Idle;
        }
    }

    /// Produce the brief for one utterance.
    pub fn handle_utterance(&mut self, utterance: &str, state: &DashboardState) -> String {
        self.status = VoiceStatus::Processing;
        let query = normalize_utterance(utterance);
        self.transcript = utterance.trim().to_string();

        let reply = if query.is_empty() {
            PROCESSING_FAILED.to_string()
        } else {
            state.brief(&query)
        };
        debug!("Query {:?} -> {} chars", query, reply.len());
        self.response = reply.clone();
        reply
    }

    /// Playback failures resolve like completion.
    pub async fn respond<V: VoiceChannel + ?Sized>(&mut self, voice: &mut V, text: &str) {
        self.status = VoiceStatus::Speaking;
        if let Err(e) = voice.speak(text).await {
            warn!("Speech synthesis error: {:#}", e);
        }
        self.status = VoiceStatus::Idle;
    }

    /// One full listen -> brief -> speak turn.
    pub async fn turn<V: VoiceChannel + ?Sized>(
        &mut self,
        voice: &mut V,
        state: &DashboardState,
    ) -> Result<(), RecognitionError> {
        let heard = self.listen(voice).await?;
        let reply = self.handle_utterance(&heard, state);
        self.respond(voice, &reply).await;
        Ok(())
    }
}

/// Line-based stand-in for speech: stdin is recognition, stdout is synthesis.
pub struct ConsoleVoice {
    lines: Lines<BufReader<Stdin>>,
    out: Stdout,
}

impl ConsoleVoice {
    pub fn new(lang: &str) -> Self {
        info!("Console voice channel ready (lang={})", lang);
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
            out: tokio::io::stdout(),
        }
    }
}

#[async_trait]
impl VoiceChannel for ConsoleVoice {
    // `next_line` is cancel-safe, so this can sit in a select loop.
    async fn listen(&mut self) -> Result<String, RecognitionError> {
        match self.lines.next_line().await? {
            Some(line) => Ok(line),
            None => Err(RecognitionError::Ended),
        }
    }

    async fn speak(&mut self, text: &str) -> Result<(), SynthesisError> {
        self.out.write_all(text.as_bytes()).await?;
        self.out.write_all(b"\n").await?;
        self.out.flush().await?;
        Ok(())
    }
}
