//! Frame effects
//!
//! Each effect is an iterator of [`Frame`]s for one layout. Nothing here
//! sleeps or writes: hand the iterator to an [`Animator`] or pull frames
//! yourself.
//!
//! [`Animator`]: crate::Animator

use rand::RngCore;

use flipdot_protocol::glyph::ColumnBytes;
use flipdot_protocol::{Frame, FrameEncoder, GlyphTable, Layout};

use crate::text::{double_height, padded_for_scroll, place, Justify};

/// Horizontal scroll from right to left
///
/// The text enters from the right edge and leaves at the left; the first
/// and last frames are dark. [`with_pause`](Scroll::with_pause) holds the
/// middle frame and [`without_exit`](Scroll::without_exit) stops once the
/// text's last column has entered.
#[derive(Debug, Clone)]
pub struct Scroll<'a> {
    encoder: FrameEncoder<'a>,
    top: ColumnBytes,
    bottom: Option<ColumnBytes>,
    width: usize,
    step: usize,
    offset: usize,
    pause: usize,
    held: usize,
}

impl<'a> Scroll<'a> {
    /// Scroll `columns` across the first pixel band, `step` columns per frame
    pub fn new(layout: &'a Layout, columns: &[u8], step: usize) -> Self {
        let width = layout.visible_width;
        Self {
            encoder: FrameEncoder::new(layout),
            top: padded_for_scroll(columns, width),
            bottom: None,
            width,
            step: step.max(1),
            offset: 0,
            pause: 0,
            held: 0,
        }
    }

    /// Scroll `columns` stretched to double height across both bands
    pub fn double_height(layout: &'a Layout, columns: &[u8], step: usize) -> Self {
        let width = layout.visible_width;
        let (top, bottom) = double_height(columns, layout.bits_per_column);
        Self {
            encoder: FrameEncoder::new(layout),
            top: padded_for_scroll(&top, width),
            bottom: Some(padded_for_scroll(&bottom, width)),
            width,
            step: step.max(1),
            offset: 0,
            pause: 0,
            held: 0,
        }
    }

    /// Repeat the middle frame `frames` extra times
    pub fn with_pause(mut self, frames: usize) -> Self {
        self.pause = frames;
        self
    }

    /// Drop the trailing blank run so the text stays on screen at the end
    ///
    /// The last frame shows the text's final columns against the right
    /// edge instead of a dark panel.
    pub fn without_exit(mut self) -> Self {
        let keep = self.top.len().saturating_sub(self.width).max(self.width);
        self.top.truncate(keep);
        if let Some(bottom) = self.bottom.as_mut() {
            bottom.truncate(keep);
        }
        self
    }

    /// Total frames this scroll produces, pause included
    pub fn frame_count(&self) -> usize {
        match self.travel_frames() {
            0 => 0,
            travel => travel + self.pause,
        }
    }

    fn travel_frames(&self) -> usize {
        match self.top.len().checked_sub(self.width) {
            Some(travel) => travel / self.step + 1,
            None => 0,
        }
    }

    fn window(&self, offset: usize) -> Frame {
        let window = offset..offset + self.width;
        match &self.bottom {
            Some(bottom) => self
                .encoder
                .pack_dual(&self.top[window.clone()], &bottom[window]),
            None => self.encoder.pack(&self.top[window]),
        }
    }
}

impl Iterator for Scroll<'_> {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        let shown = self.offset / self.step;
        if self.held < self.pause && shown == self.travel_frames() / 2 + 1 {
            self.held += 1;
            return Some(self.window(self.offset - self.step));
        }

        if self.offset + self.width > self.top.len() {
            return None;
        }
        let frame = self.window(self.offset);
        self.offset += self.step;
        Some(frame)
    }
}

/// Horizontal rotation of a full-width window
///
/// Columns leaving one edge come back in at the other. The first frame is
/// the unrotated window.
#[derive(Debug, Clone)]
pub struct Rotate<'a> {
    encoder: FrameEncoder<'a>,
    window: ColumnBytes,
    step: usize,
    left: bool,
    remaining: usize,
}

impl<'a> Rotate<'a> {
    /// Rotate left by `step` columns per frame
    pub fn left(layout: &'a Layout, columns: &[u8], step: usize) -> Self {
        Self::new(layout, columns, step, true)
    }

    /// Rotate right by `step` columns per frame
    pub fn right(layout: &'a Layout, columns: &[u8], step: usize) -> Self {
        Self::new(layout, columns, step, false)
    }

    fn new(layout: &'a Layout, columns: &[u8], step: usize, left: bool) -> Self {
        let width = layout.visible_width;
        let step = step.max(1);
        Self {
            encoder: FrameEncoder::new(layout),
            window: place(columns, width, Justify::Left),
            step,
            left,
            remaining: width / step,
        }
    }
}

impl Iterator for Rotate<'_> {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let frame = self.encoder.pack(&self.window);
        let by = self.step % self.window.len().max(1);
        if self.left {
            self.window.rotate_left(by);
        } else {
            self.window.rotate_right(by);
        }
        Some(frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// Vertical shift, one pixel row per frame
///
/// Rows pushed off the edge are lost, so after one frame per pixel row the
/// panel is dark.
#[derive(Debug, Clone)]
pub struct Shift<'a> {
    encoder: FrameEncoder<'a>,
    columns: ColumnBytes,
    up: bool,
    remaining: u8,
}

impl<'a> Shift<'a> {
    /// Move the image up
    pub fn up(layout: &'a Layout, columns: &[u8]) -> Self {
        Self::new(layout, columns, true)
    }

    /// Move the image down
    pub fn down(layout: &'a Layout, columns: &[u8]) -> Self {
        Self::new(layout, columns, false)
    }

    fn new(layout: &'a Layout, columns: &[u8], up: bool) -> Self {
        let take = columns.len().min(layout.buffer_length);
        Self {
            encoder: FrameEncoder::new(layout),
            columns: ColumnBytes::from_slice(&columns[..take]).unwrap_or_default(),
            up,
            remaining: layout.rows_per_column(),
        }
    }
}

impl Iterator for Shift<'_> {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let mask = self.encoder.layout().bit_mask();
        for column in self.columns.iter_mut() {
            *column = if self.up {
                (*column << 1) & mask
            } else {
                (*column & mask) >> 1
            };
        }
        Some(self.encoder.pack(&self.columns))
    }
}

/// Direction of a row sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SweepKind {
    FillBottomUp,
    FillTopDown,
    EraseTopDown,
    EraseBottomUp,
}

/// Reveal or hide an image one pixel row at a time
#[derive(Debug, Clone)]
pub struct Sweep {
    image: Frame,
    kind: SweepKind,
    bits: u8,
    step: u8,
}

impl Sweep {
    /// Sweep over `columns` packed for `layout`
    pub fn new(layout: &Layout, columns: &[u8], kind: SweepKind) -> Self {
        Self {
            image: FrameEncoder::new(layout).pack(columns),
            kind,
            bits: layout.rows_per_column(),
            step: 0,
        }
    }

    /// Row mask shown at `step`
    fn mask(&self, step: u8) -> u8 {
        let full = ((1u16 << self.bits) - 1) as u8;
        let low = |n: u8| ((1u16 << n) - 1) as u8;
        match self.kind {
            SweepKind::FillBottomUp => low(step + 1),
            SweepKind::FillTopDown => full & !low(self.bits - 1 - step),
            SweepKind::EraseTopDown => low(self.bits - 1 - step),
            SweepKind::EraseBottomUp => full & !low(step + 1),
        }
    }
}

impl Iterator for Sweep {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        if self.step >= self.bits {
            return None;
        }
        let frame = self.image.masked(self.mask(self.step));
        self.step += 1;
        Some(frame)
    }
}

/// Random-order fill or erase
///
/// Six frames show random row masks of the image, two more add (or remove)
/// further random rows, and a final frame completes the job if the last
/// mask left anything undone.
#[derive(Debug, Clone)]
pub struct RandomSweep<R> {
    image: Frame,
    rng: R,
    fill: bool,
    full: u8,
    mask: u8,
    step: u8,
}

impl<R: RngCore> RandomSweep<R> {
    const RANDOM_STEPS: u8 = 6;
    const STEPS: u8 = 8;

    /// Fill the image in random row order
    pub fn fill(layout: &Layout, columns: &[u8], rng: R) -> Self {
        Self::new(layout, columns, rng, true)
    }

    /// Erase the image in random row order
    pub fn erase(layout: &Layout, columns: &[u8], rng: R) -> Self {
        Self::new(layout, columns, rng, false)
    }

    fn new(layout: &Layout, columns: &[u8], rng: R, fill: bool) -> Self {
        let full = layout.bit_mask();
        Self {
            image: FrameEncoder::new(layout).pack(columns),
            rng,
            fill,
            full,
            mask: if fill { 0 } else { full },
            step: 0,
        }
    }

    fn random_rows(&mut self) -> u8 {
        self.rng.next_u32() as u8 & self.full
    }
}

impl<R: RngCore> Iterator for RandomSweep<R> {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        if self.step < Self::STEPS {
            let rows = self.random_rows();
            self.mask = match (self.fill, self.step < Self::RANDOM_STEPS) {
                (true, true) => rows,
                (true, false) => self.mask | rows,
                (false, true) => self.full & !rows,
                (false, false) => self.mask & !rows,
            };
            self.step += 1;
            return Some(self.image.masked(self.mask));
        }

        if self.step == Self::STEPS {
            self.step += 1;
            if self.fill && self.mask != self.full {
                return Some(self.image.clone());
            }
            if !self.fill && self.mask != 0 {
                return Some(self.image.masked(0));
            }
        }
        None
    }
}

/// Alternate negative and normal images
#[derive(Debug, Clone)]
pub struct Flash {
    image: Frame,
    negative: Frame,
    remaining: usize,
}

impl Flash {
    /// Flash `columns` `times` times, ending on the normal image
    pub fn new(layout: &Layout, columns: &[u8], times: usize) -> Self {
        let encoder = FrameEncoder::new(layout);
        let image = encoder.pack(columns);
        let negative = encoder.negative(&image);
        Self {
            image,
            negative,
            remaining: times * 2,
        }
    }
}

impl Iterator for Flash {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(if self.remaining % 2 == 1 {
            self.negative.clone()
        } else {
            self.image.clone()
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// Text typed out one character per frame, left-justified
#[derive(Debug, Clone)]
pub struct Typewriter<'a> {
    encoder: FrameEncoder<'a>,
    glyphs: GlyphTable,
    text: &'a str,
    typed: usize,
    tall: bool,
}

impl<'a> Typewriter<'a> {
    /// Type on the first pixel band
    pub fn new(layout: &'a Layout, glyphs: GlyphTable, text: &'a str) -> Self {
        Self {
            encoder: FrameEncoder::new(layout),
            glyphs,
            text,
            typed: 0,
            tall: false,
        }
    }

    /// Type at double height across both bands
    pub fn tall(layout: &'a Layout, glyphs: GlyphTable, text: &'a str) -> Self {
        Self {
            tall: true,
            ..Self::new(layout, glyphs, text)
        }
    }
}

impl Iterator for Typewriter<'_> {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        let rest = &self.text[self.typed..];
        let ch = rest.chars().next()?;
        self.typed += ch.len_utf8();

        let layout = self.encoder.layout();
        let columns = self.glyphs.encode(&self.text[..self.typed]);
        let placed = place(&columns, layout.visible_width, Justify::Left);
        Some(if self.tall {
            let (top, bottom) = double_height(&placed, layout.bits_per_column);
            self.encoder.pack_dual(&top, &bottom)
        } else {
            self.encoder.pack(&placed)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flipdot_protocol::ControlBytes;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn strip(width: usize) -> Layout {
        Layout::new(width, width, ControlBytes::LEGACY)
    }

    #[test]
    fn test_scroll_frame_count() {
        let layout = strip(10);
        // "HI" = 5 + 1 + 1 columns, padded to 27
        let columns = GlyphTable::standard().encode("HI");
        let scroll = Scroll::new(&layout, &columns, 1);
        assert_eq!(scroll.frame_count(), 18);
        assert_eq!(scroll.count(), 18);
    }

    #[test]
    fn test_scroll_step_and_edges() {
        let layout = strip(4);
        let mut scroll = Scroll::new(&layout, &[1, 2, 3], 2);
        // padded: 0 0 0 0 1 2 3 0 0 0 0, offsets 0, 2, 4, 6
        assert_eq!(scroll.frame_count(), 4);
        assert!(scroll.next().unwrap().is_dark());
        assert_eq!(scroll.next().unwrap().as_bytes(), &[0, 0, 1, 2]);
        assert_eq!(scroll.next().unwrap().as_bytes(), &[1, 2, 3, 0]);
        assert_eq!(scroll.next().unwrap().as_bytes(), &[3, 0, 0, 0]);
        assert!(scroll.next().is_none());
    }

    #[test]
    fn test_scroll_pause_holds_middle_frame() {
        let layout = strip(4);
        let mut scroll = Scroll::new(&layout, &[1, 2, 3], 2).with_pause(2);
        assert_eq!(scroll.frame_count(), 6);
        assert!(scroll.next().unwrap().is_dark());
        assert_eq!(scroll.next().unwrap().as_bytes(), &[0, 0, 1, 2]);
        for _ in 0..3 {
            assert_eq!(scroll.next().unwrap().as_bytes(), &[1, 2, 3, 0]);
        }
        assert_eq!(scroll.next().unwrap().as_bytes(), &[3, 0, 0, 0]);
        assert!(scroll.next().is_none());
    }

    #[test]
    fn test_scroll_without_exit_ends_on_text() {
        let layout = strip(4);
        let scroll = Scroll::new(&layout, &[1, 2, 3], 1).without_exit();
        assert_eq!(scroll.frame_count(), 4);
        let frames: heapless::Vec<Frame, 8> = scroll.collect();
        assert_eq!(frames.len(), 4);
        assert!(frames[0].is_dark());
        assert_eq!(frames[3].as_bytes(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_scroll_without_exit_and_pause() {
        let layout = strip(4);
        let scroll = Scroll::new(&layout, &[1, 2, 3], 1)
            .without_exit()
            .with_pause(1);
        let frames: heapless::Vec<Frame, 8> = scroll.collect();
        assert_eq!(frames.len(), 5);
        assert_eq!(frames[2], frames[3]);
        assert_eq!(frames[2].as_bytes(), &[0, 0, 1, 2]);
    }

    #[test]
    fn test_scroll_double_height_without_exit() {
        let layout = Layout::new(8, 4, ControlBytes::LEGACY);
        let frames: heapless::Vec<Frame, 8> = Scroll::double_height(&layout, &[0x7F], 1)
            .without_exit()
            .collect();
        assert_eq!(frames.len(), 2);
        let last = frames[1].as_bytes();
        assert_eq!(last[3], 0x7F);
        assert_eq!(last[7], 0x7F);
    }

    #[test]
    fn test_rotate_left_and_right() {
        let layout = strip(4);
        let mut left = Rotate::left(&layout, &[1, 2], 1);
        assert_eq!(left.next().unwrap().as_bytes(), &[1, 2, 0, 0]);
        assert_eq!(left.next().unwrap().as_bytes(), &[2, 0, 0, 1]);
        assert_eq!(left.count(), 2);

        let mut right = Rotate::right(&layout, &[1, 2], 2);
        assert_eq!(right.size_hint(), (2, Some(2)));
        assert_eq!(right.next().unwrap().as_bytes(), &[1, 2, 0, 0]);
        assert_eq!(right.next().unwrap().as_bytes(), &[0, 0, 1, 2]);
        assert!(right.next().is_none());
    }

    #[test]
    fn test_shift_up_and_down() {
        let layout = strip(2);
        let frames: heapless::Vec<Frame, 8> = Shift::up(&layout, &[0x01, 0x7F]).collect();
        assert_eq!(frames.len(), 7);
        assert_eq!(frames[0].as_bytes(), &[0x02, 0x7E]);
        assert!(frames[6].is_dark());

        let mut down = Shift::down(&layout, &[0x40]);
        assert_eq!(down.next().unwrap().as_bytes(), &[0x20, 0]);
    }

    #[test]
    fn test_sweep_masks() {
        let layout = strip(1);
        let masks = |kind| {
            let frames: heapless::Vec<u8, 8> = Sweep::new(&layout, &[0x7F], kind)
                .map(|frame| frame.as_bytes()[0])
                .collect();
            frames
        };
        assert_eq!(&masks(SweepKind::FillBottomUp)[..], &[0x01, 0x03, 0x07, 0x0F, 0x1F, 0x3F, 0x7F]);
        assert_eq!(&masks(SweepKind::FillTopDown)[..], &[0x40, 0x60, 0x70, 0x78, 0x7C, 0x7E, 0x7F]);
        assert_eq!(&masks(SweepKind::EraseTopDown)[..], &[0x3F, 0x1F, 0x0F, 0x07, 0x03, 0x01, 0x00]);
        assert_eq!(&masks(SweepKind::EraseBottomUp)[..], &[0x7E, 0x7C, 0x78, 0x70, 0x60, 0x40, 0x00]);
    }

    #[test]
    fn test_random_fill_ends_full() {
        let layout = strip(3);
        let rng = SmallRng::seed_from_u64(7);
        let frames: heapless::Vec<Frame, 9> =
            RandomSweep::fill(&layout, &[0x7F, 0x55, 0x2A], rng).collect();
        assert!(frames.len() == 8 || frames.len() == 9);
        assert_eq!(frames[frames.len() - 1].as_bytes(), &[0x7F, 0x55, 0x2A]);
        // Never lights a pixel the image does not have
        for frame in &frames {
            assert!(frame.as_bytes()[1] & !0x55 == 0);
        }
    }

    #[test]
    fn test_random_erase_ends_dark() {
        let layout = strip(2);
        let mut rng = SmallRng::seed_from_u64(42);
        let frames: heapless::Vec<Frame, 9> =
            RandomSweep::erase(&layout, &[0x7F, 0x7F], &mut rng).collect();
        assert!(frames[frames.len() - 1].is_dark());
    }

    #[test]
    fn test_flash_alternates() {
        let layout = strip(2);
        let frames: heapless::Vec<Frame, 8> = Flash::new(&layout, &[0x7F, 0x00], 2).collect();
        assert_eq!(frames.len(), 4);
        assert_eq!(frames[0].as_bytes(), &[0x00, 0x7F]);
        assert_eq!(frames[1].as_bytes(), &[0x7F, 0x00]);
        assert_eq!(frames[2].as_bytes(), &[0x00, 0x7F]);
        assert_eq!(frames[3].as_bytes(), &[0x7F, 0x00]);
    }

    #[test]
    fn test_typewriter_one_frame_per_char() {
        let layout = strip(12);
        let glyphs = GlyphTable::standard();
        let frames: heapless::Vec<Frame, 4> = Typewriter::new(&layout, glyphs, "IHI").collect();
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0].as_bytes()[..2], [0x7F, 0x00]);
        assert_eq!(frames[1].as_bytes()[..7], [0x7F, 0, 0x7F, 0x08, 0x08, 0x08, 0x7F]);
        assert_eq!(frames[2].as_bytes()[8], 0x7F);
    }

    #[test]
    fn test_tall_typewriter_fills_second_band() {
        let layout = Layout::new(10, 5, ControlBytes::LEGACY);
        let mut frames = Typewriter::tall(&layout, GlyphTable::standard(), "I");
        let frame = frames.next().unwrap();
        assert_eq!(frame.as_bytes()[0], 0x7F);
        assert_eq!(frame.as_bytes()[5], 0x7F);
        assert!(frames.next().is_none());
    }
}
