use field_core::scheduler::{FrameScheduler, FrameToken, ManualScheduler};

/// Frame scheduler backed by egui's repaint requests.
///
/// Requesting a frame asks egui to repaint; the next `update` pulls the due
/// token with [`RepaintScheduler::take_due`] and ticks the field with it.
pub struct RepaintScheduler {
    ctx: egui::Context,
    frames: ManualScheduler,
}

impl RepaintScheduler {
    pub fn new(ctx: egui::Context) -> Self {
        Self {
            ctx,
            frames: ManualScheduler::new(),
        }
    }

    pub fn take_due(&mut self) -> Option<FrameToken> {
        self.frames.next_due()
    }
}

impl FrameScheduler for RepaintScheduler {
    fn request_frame(&mut self) -> FrameToken {
        self.ctx.request_repaint();
        self.frames.request_frame()
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        self.frames.cancel_frame(token);
    }
}
