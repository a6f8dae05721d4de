//! End-to-end behavior through the simulated sign

use embedded_hal::delay::DelayNs;
use flipdot_display::{
    padded_for_scroll, parse_config, Animator, Display, Justify, Link, Playback, Scroll,
    Typewriter,
};
use flipdot_hal::{Transport, TransportError};
use flipdot_protocol::{ControlBytes, FrameEncoder, GlyphTable, Layout, Simulator};
use proptest::prelude::*;

struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

/// Serial port stand-in that never answers
struct Unplugged;

impl Transport for Unplugged {
    fn write(&mut self, _bytes: &[u8]) -> Result<(), TransportError> {
        Err(TransportError::Disconnected)
    }
}

fn simulated(layout: Layout) -> Display<Link<Unplugged>> {
    Display::new(Link::simulated(layout.clone()), layout).unwrap()
}

fn sim(display: &Display<Link<Unplugged>>) -> &Simulator {
    display.link().simulator().unwrap()
}

#[test]
fn scroll_hi_across_ten_columns() {
    let layout = Layout::new(10, 10, ControlBytes::LEGACY);
    let glyphs = GlyphTable::standard();
    let text = glyphs.encode("HI");
    let padded = padded_for_scroll(&text, 10);
    assert_eq!(padded.len(), 27);

    let mut display = simulated(layout.clone());
    let mut windows = Vec::new();
    for frame in Scroll::new(&layout, &text, 1) {
        display.show(&frame).unwrap();
        windows.push(sim(&display).columns().to_vec());
    }

    assert_eq!(windows.len(), padded.len() - 10 + 1);
    for (offset, window) in windows.iter().enumerate() {
        assert_eq!(&window[..], &padded[offset..offset + 10]);
    }
    // Consecutive frames always differ
    windows.dedup();
    assert_eq!(windows.len(), 18);
}

#[test]
fn centered_text_puts_extra_column_right() {
    let layout = Layout::new(8, 8, ControlBytes::LEGACY);
    let mut display = simulated(layout);
    // "H" is 5 wide: 1 blank left, 2 right
    display.show_text("H", Justify::Center).unwrap();
    let columns = sim(&display).columns();
    assert_eq!(&columns[..], &[0, 0x7F, 0x08, 0x08, 0x08, 0x7F, 0, 0]);
}

#[test]
fn tall_text_on_serpentine_panel() {
    let mut display = simulated(Layout::serpentine());
    display.show_tall_text("I", Justify::Left).unwrap();

    let grid = sim(&display).grid();
    assert_eq!(grid.rows(), 14);
    assert_eq!(grid.cols(), 30);
    for row in 0..14 {
        assert!(grid.get(row, 0));
        assert!(!grid.get(row, 1));
    }
    let rendered = grid.to_string();
    assert_eq!(rendered.lines().count(), 14);
    assert!(rendered.lines().all(|line| line.starts_with("O.")));
}

#[test]
fn typewriter_through_animator() {
    let layout = Layout::two_row();
    let mut display = simulated(layout.clone());
    let mut animator = Animator::new(NoDelay, 100);

    let frames = Typewriter::new(&layout, GlyphTable::standard(), "HELLO");
    let result = animator.play(&mut display, frames, || true).unwrap();
    assert_eq!(result, Playback::Completed { frames: 5 });

    let expected = GlyphTable::standard().encode("HELLO");
    assert_eq!(&sim(&display).columns()[..expected.len()], &expected[..]);
}

#[test]
fn hardware_failure_reaches_caller() {
    let layout = Layout::single_row();
    let mut display = Display::new(Link::Hardware(Unplugged), layout).unwrap();
    assert!(display.show_text("HI", Justify::Left).is_err());
    assert!(display.last_frame().is_dark());
}

#[test]
fn profile_drives_display() {
    let config = parse_config(
        r#"
        name = "kitchen"

        [layout]
        preset = "quadrants"
        "#,
    )
    .unwrap();

    let mut display = simulated(config.layout.clone());
    display.show_tall_text("I", Justify::Right).unwrap();

    let grid = sim(&display).grid();
    assert_eq!(grid.cols(), 30);
    assert!(grid.get(0, 29));
    assert!(grid.get(13, 29));
    assert_eq!(grid.lit_count(), 14);
}

proptest! {
    #[test]
    fn scroll_windows_are_contiguous(
        text in "[ -~]{0,12}",
        width in 1usize..40,
        step in 1usize..4,
    ) {
        let layout = Layout::new(width, width, ControlBytes::SPLIT);
        let columns = GlyphTable::standard().encode(&text);
        let padded = padded_for_scroll(&columns, width);
        let encoder = FrameEncoder::new(&layout);

        let scroll = Scroll::new(&layout, &columns, step);
        let expected = (padded.len() - width) / step + 1;
        prop_assert_eq!(scroll.frame_count(), expected);

        let mut count = 0;
        for (n, frame) in scroll.enumerate() {
            let offset = n * step;
            prop_assert_eq!(frame, encoder.pack(&padded[offset..offset + width]));
            count += 1;
        }
        prop_assert_eq!(count, expected);
    }
}
