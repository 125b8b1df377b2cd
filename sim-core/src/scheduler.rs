//! Display-synchronized frame scheduling.
//!
//! A [`FrameScheduler`] hands out one [`FrameToken`] per requested frame and
//! later delivers it back to the simulation as a tick. The simulation keeps
//! at most one token pending and cancels it on teardown.

/// Handle to one requested frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameToken(u64);

impl FrameToken {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

/// Source of display-synchronized frame callbacks.
pub trait FrameScheduler {
    /// Schedules a callback for the next display refresh.
    fn request_frame(&mut self) -> FrameToken;

    /// Cancels a scheduled frame.
    ///
    /// Cancelling a token that already fired or was already cancelled is a
    /// no-op.
    fn cancel_frame(&mut self, token: FrameToken);
}

/// A scheduler whose frames fire only when the owner pulls them.
///
/// Frames are delivered in request order by [`ManualScheduler::next_due`].
/// Hosts drive it from their own refresh callback; tests drive it by hand.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: Vec<FrameToken>,
    cancelled: Vec<FrameToken>,
    requested: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns the oldest pending frame, if any.
    pub fn next_due(&mut self) -> Option<FrameToken> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }

    pub fn is_pending(&self, token: FrameToken) -> bool {
        self.pending.contains(&token)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Returns `true` if `token` was cancelled while still pending.
    pub fn was_cancelled(&self, token: FrameToken) -> bool {
        self.cancelled.contains(&token)
    }

    /// Total number of frames ever requested.
    pub fn requested(&self) -> usize {
        self.requested
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameToken {
        let token = FrameToken::new(self.next_id);
        self.next_id += 1;
        self.requested += 1;
        self.pending.push(token);
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        if let Some(i) = self.pending.iter().position(|&t| t == token) {
            self.pending.remove(i);
            self.cancelled.push(token);
        }
    }
}
