//! Now-playing state and the bounded play history.
//!
//! One `NowPlaying` instance lives for the whole process and is mutated
//! only by the stream session's event path.  `observe` is the single
//! update rule: it decides whether a candidate title is a genuine track
//! change and, when it is, hands back the snapshot the renderer needs.
//! History deliberately survives reconnects so a brief disconnect does
//! not erase the recently played list.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// How many past tracks the page shows.
pub const HISTORY_CAP: usize = 10;

/// Fills unused history slots on the rendered page.
pub const PLACEHOLDER: &str = "---";

/// Everything one render needs, captured at the moment of a track change.
/// `history` always holds exactly [`HISTORY_CAP`] entries, placeholder padded.
#[derive(Debug, Clone)]
pub struct RenderSnapshot {
    pub now_playing: String,
    pub history: Vec<String>,
    pub updated_at: DateTime<Tz>,
}

#[derive(Debug)]
pub struct NowPlaying {
    current: Option<String>,
    history: Vec<String>,
    tz: Tz,
}

impl NowPlaying {
    pub fn new(tz: Tz) -> Self {
        Self {
            current: None,
            history: Vec::new(),
            tz,
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Real (unpadded) history, most recent first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Apply one parsed title.
    ///
    /// A repeat of the current track is a no-op; retransmitted metadata
    /// for the same song must not trigger a render.  On a genuine change
    /// the previous track (if any) moves to the front of the history,
    /// the history is clipped to [`HISTORY_CAP`], and a snapshot is
    /// returned for exactly one render.
    pub fn observe(&mut self, candidate: &str) -> Option<RenderSnapshot> {
        if self.current.as_deref() == Some(candidate) {
            return None;
        }

        if let Some(prev) = self.current.take() {
            self.history.insert(0, prev);
            self.history.truncate(HISTORY_CAP);
        }
        self.current = Some(candidate.to_string());

        let mut padded = self.history.clone();
        padded.resize(HISTORY_CAP, PLACEHOLDER.to_string());

        Some(RenderSnapshot {
            now_playing: candidate.to_string(),
            history: padded,
            updated_at: Utc::now().with_timezone(&self.tz),
        })
    }
}
