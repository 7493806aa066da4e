//! Metadata stream session and the reconnect supervisor.
//!
//! A `StreamSession` owns exactly one live subscription: it connects,
//! consumes the event stream, and drives the tracker and page writer.
//! Anything that goes wrong with a single event is logged and skipped;
//! anything that goes wrong with the connection ends the session and
//! returns control to the `Supervisor`, which waits the configured
//! delay and starts a fresh session against the same tracker state.

use std::time::Duration;

use futures_util::StreamExt;
use tracing::{debug, info, warn};

use wpn_core::config::StreamConfig;
use wpn_core::history::NowPlaying;
use wpn_core::metadata;
use wpn_core::sse::{SseDecoder, SseEvent};

use crate::page::PageWriter;

/// Event type carrying track metadata on the Zeno stream.
const METADATA_EVENT: &str = "message";

/// Terminal condition for one stream session.  Every variant is
/// recoverable at the supervisor level by reconnecting.
#[derive(Debug, thiserror::Error)]
pub enum SessionEnd {
    /// The subscription request failed (DNS, TCP, TLS, or connect timeout).
    #[error("connect failed: {0}")]
    Connect(reqwest::Error),
    /// The endpoint answered with a non-success status.
    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),
    /// The body stream broke mid-flight.
    #[error("stream read failed: {0}")]
    Read(reqwest::Error),
}

// ── Stream session ────────────────────────────────────────────────────────────

/// One live subscription to the metadata endpoint.
pub struct StreamSession<'a> {
    client: &'a reqwest::Client,
    url: &'a str,
    tracker: &'a mut NowPlaying,
    writer: &'a PageWriter,
}

impl<'a> StreamSession<'a> {
    pub fn new(
        client: &'a reqwest::Client,
        url: &'a str,
        tracker: &'a mut NowPlaying,
        writer: &'a PageWriter,
    ) -> Self {
        Self {
            client,
            url,
            tracker,
            writer,
        }
    }

    /// Consume the subscription until the connection ends.
    ///
    /// `Ok(())` means the server closed the stream; either way the
    /// session is finished and the caller decides whether to reconnect.
    pub async fn run(mut self) -> Result<(), SessionEnd> {
        let response = self
            .client
            .get(self.url)
            .header("Accept", "text/event-stream")
            .send()
            .await
            .map_err(SessionEnd::Connect)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SessionEnd::Status(status));
        }

        let mut body = response.bytes_stream();
        let mut decoder = SseDecoder::new();

        while let Some(chunk) = body.next().await {
            let chunk = chunk.map_err(SessionEnd::Read)?;
            for event in decoder.feed(&chunk) {
                self.handle_event(&event).await;
            }
        }
        Ok(())
    }

    /// One event, fully contained: a malformed payload or a failed page
    /// write is logged and skipped, never fatal to the session.
    async fn handle_event(&mut self, event: &SseEvent) {
        if event.event != METADATA_EVENT {
            debug!("ignoring event type {:?}", event.event);
            return;
        }

        let Some(title) = metadata::extract_stream_title(&event.data) else {
            debug!("no stream title in payload ({} bytes)", event.data.len());
            return;
        };

        // No snapshot means a repeat of the current track
        let Some(snapshot) = self.tracker.observe(&title) else {
            return;
        };

        match self.writer.write(&snapshot).await {
            Ok(()) => info!("Updated page with: {}", title),
            Err(e) => warn!("Skipped page write: {:#}", e),
        }
    }
}

// ── Supervisor ────────────────────────────────────────────────────────────────

/// Keeps a stream session alive for the life of the process.
pub struct Supervisor {
    config: StreamConfig,
    client: reqwest::Client,
    tracker: NowPlaying,
    writer: PageWriter,
}

impl Supervisor {
    pub fn new(
        config: StreamConfig,
        tracker: NowPlaying,
        writer: PageWriter,
    ) -> anyhow::Result<Self> {
        // One client for the process lifetime; reconnects reuse its pool
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()?;
        Ok(Self {
            config,
            client,
            tracker,
            writer,
        })
    }

    pub fn tracker(&self) -> &NowPlaying {
        &self.tracker
    }

    /// Reconnect loop, unbounded.  Tracker state carries across sessions,
    /// so the play history survives disconnects within one process.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let delay = Duration::from_secs(self.config.reconnect_delay_secs);
        loop {
            info!("Connecting to metadata stream: {}", self.config.url);
            let session = StreamSession::new(
                &self.client,
                &self.config.url,
                &mut self.tracker,
                &self.writer,
            );
            match session.run().await {
                Ok(()) => info!("Stream ended, reconnecting in {:?}", delay),
                Err(e) => warn!("Stream error: {}; reconnecting in {:?}", e, delay),
            }
            tokio::time::sleep(delay).await;
        }
    }
}
