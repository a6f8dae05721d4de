//! Timed playback of frame sequences

use embedded_hal::delay::DelayNs;
use flipdot_hal::Transport;
use flipdot_protocol::Frame;

use crate::display::{Display, DisplayError};

/// How a playback ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Playback {
    /// Every frame was shown
    Completed { frames: usize },
    /// `keep_going` returned false before the sequence ran out
    Stopped { frames: usize },
}

impl Playback {
    /// Frames actually shown
    pub fn frames(&self) -> usize {
        match self {
            Playback::Completed { frames } | Playback::Stopped { frames } => *frames,
        }
    }
}

/// Plays frames with a fixed delay after each one
pub struct Animator<D> {
    delay: D,
    frame_delay_ms: u32,
}

impl<D: DelayNs> Animator<D> {
    /// Create an animator
    pub fn new(delay: D, frame_delay_ms: u32) -> Self {
        Self {
            delay,
            frame_delay_ms,
        }
    }

    /// Delay between frames
    pub fn frame_delay_ms(&self) -> u32 {
        self.frame_delay_ms
    }

    /// Change the delay between frames
    pub fn set_frame_delay_ms(&mut self, ms: u32) {
        self.frame_delay_ms = ms;
    }

    /// Show every frame of `frames` on `display`
    ///
    /// `keep_going` is polled before each frame; returning false stops the
    /// playback with the current image left up. The first display error
    /// aborts playback and is returned as-is.
    pub fn play<T, I, F>(
        &mut self,
        display: &mut Display<T>,
        frames: I,
        mut keep_going: F,
    ) -> Result<Playback, DisplayError>
    where
        T: Transport,
        I: IntoIterator<Item = Frame>,
        F: FnMut() -> bool,
    {
        trace!("animator: playing, {} ms per frame", self.frame_delay_ms);
        let mut shown = 0;
        for frame in frames {
            if !keep_going() {
                debug!("animator: stopped after {} frames", shown);
                return Ok(Playback::Stopped { frames: shown });
            }
            display.show(&frame)?;
            shown += 1;
            self.delay.delay_ms(self.frame_delay_ms);
        }
        trace!("animator: completed {} frames", shown);
        Ok(Playback::Completed { frames: shown })
    }

    /// Wait without changing the image
    pub fn hold(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }

    /// Give the delay provider back
    pub fn into_inner(self) -> D {
        self.delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::Flash;
    use flipdot_hal::TransportError;
    use flipdot_protocol::{ControlBytes, Layout, Simulator};

    /// Records requested delays instead of sleeping
    #[derive(Default)]
    struct FakeDelay {
        total_ns: u64,
        calls: usize,
    }

    impl DelayNs for FakeDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += ns as u64;
            self.calls += 1;
        }
    }

    fn display() -> Display<Simulator> {
        let layout = Layout::new(4, 4, ControlBytes::LEGACY);
        Display::new(Simulator::new(layout.clone()), layout).unwrap()
    }

    #[test]
    fn test_plays_all_frames_with_delay() {
        let mut display = display();
        let layout = display.layout().clone();
        let mut animator = Animator::new(FakeDelay::default(), 50);

        let result = animator.play(&mut display, Flash::new(&layout, &[0x7F], 3), || true);
        assert_eq!(result, Ok(Playback::Completed { frames: 6 }));
        assert_eq!(display.link().writes(), 12);

        let delay = animator.into_inner();
        assert_eq!(delay.total_ns, 6 * 50_000_000);
    }

    #[test]
    fn test_keep_going_stops_playback() {
        let mut display = display();
        let layout = display.layout().clone();
        let mut animator = Animator::new(FakeDelay::default(), 10);

        let mut budget = 2;
        let result = animator.play(&mut display, Flash::new(&layout, &[0x7F], 5), || {
            budget -= 1;
            budget >= 0
        });
        assert_eq!(result, Ok(Playback::Stopped { frames: 2 }));
        assert_eq!(result.unwrap().frames(), 2);
    }

    #[test]
    fn test_error_aborts_playback() {
        let mut display = display();
        let layout = display.layout().clone();
        display.link_mut().inject_fault(3, TransportError::Disconnected);
        let mut animator = Animator::new(FakeDelay::default(), 10);

        let result = animator.play(&mut display, Flash::new(&layout, &[0x7F], 5), || true);
        assert_eq!(result, Err(DisplayError::Transport(TransportError::Disconnected)));
    }
}
