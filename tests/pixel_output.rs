//! Fill and blit tests: clipping, window programming and pixel streaming.
//!
//! Run with: cargo test --test pixel_output
#![cfg(feature = "std")]

use embedded_graphics::pixelcolor::{Rgb565, Rgb888};
use embedded_graphics::prelude::*;

use ssd1963::sim::{self, Command, Event, Line, SimDriver, Trace};
use ssd1963::{DisplayError, PanelConfig};

/// Initialised driver with an empty trace
fn ready(config: PanelConfig) -> (SimDriver, Trace) {
    let (mut display, trace) = sim::driver(config);
    display.init().unwrap();
    trace.clear();
    (display, trace)
}

/// Small panel so whole-panel checks stay cheap
fn tiny_panel() -> PanelConfig {
    PanelConfig {
        width: 8,
        height: 6,
        ..PanelConfig::TFT_480X272
    }
}

/// Start and end of the range programmed by command `code`
fn range(commands: &[Command], code: u8) -> (u16, u16) {
    let c = commands.iter().find(|c| c.code == code).unwrap();
    (
        u16::from_be_bytes([c.params[0], c.params[1]]),
        u16::from_be_bytes([c.params[2], c.params[3]]),
    )
}

/// Column and page ranges of the last window
fn window_of(trace: &Trace) -> ((u16, u16), (u16, u16)) {
    let commands = trace.commands();
    (range(&commands, 0x2A), range(&commands, 0x2B))
}

#[test]
fn fill_clips_left_edge() {
    let (mut display, trace) = ready(PanelConfig::TFT_480X272);

    display
        .fill_rectangle(-10, 50, 100, 60, Rgb565::RED)
        .unwrap();

    let commands = trace.commands();
    assert_eq!(
        commands,
        vec![
            Command {
                code: 0x2A,
                params: vec![0x00, 0x00, 0x00, 100]
            },
            Command {
                code: 0x2B,
                params: vec![0x00, 50, 0x00, 60]
            },
            Command {
                code: 0x2C,
                params: vec![]
            },
        ]
    );
    // One repeated word, not 1111 single writes
    assert_eq!(
        trace.events().last(),
        Some(&Event::Repeat(0xF800, 101 * 11))
    );
    assert_eq!(trace.pixels().len(), 1111);
}

#[test]
fn fill_entirely_right_of_panel_sends_nothing() {
    let (mut display, trace) = ready(PanelConfig::TFT_480X272);

    display
        .fill_rectangle(500, 0, 600, 10, Rgb565::BLUE)
        .unwrap();

    assert!(trace.events().is_empty());
}

#[test]
fn every_rejection_condition_sends_nothing() {
    let (mut display, trace) = ready(PanelConfig::TFT_480X272);

    for (x1, y1, x2, y2) in [
        (-50, 0, -1, 10),   // x2 < 0
        (0, -50, 10, -1),   // y2 < 0
        (480, 0, 490, 10),  // x1 > W-1
        (0, 272, 10, 280),  // y1 > H-1
        (20, 0, 10, 10),    // inverted
    ] {
        display
            .fill_rectangle(x1, y1, x2, y2, Rgb565::GREEN)
            .unwrap();
        display
            .blit_rectangle(x1, y1, x2, y2, &[0u16; 4])
            .unwrap();
        display
            .blit_colors(x1, y1, x2, y2, &[Rgb565::WHITE; 4])
            .unwrap();
    }

    assert!(trace.events().is_empty());
}

#[test]
fn fill_window_is_intersection_with_panel() {
    let (mut display, trace) = ready(tiny_panel());

    for (x1, y1, x2, y2) in [
        (-3, -3, 2, 2),
        (5, 4, 20, 20),
        (-100, 1, 100, 1),
        (0, 0, 7, 5),
        (3, -1, 3, 10),
    ] {
        trace.clear();
        display
            .fill_rectangle(x1, y1, x2, y2, Rgb565::YELLOW)
            .unwrap();

        let cx = (x1.max(0) as u16, x2.min(7) as u16);
        let cy = (y1.max(0) as u16, y2.min(5) as u16);
        assert_eq!(window_of(&trace), (cx, cy), "request ({x1},{y1})-({x2},{y2})");

        let count = usize::from(cx.1 - cx.0 + 1) * usize::from(cy.1 - cy.0 + 1);
        let pixels = trace.pixels();
        assert_eq!(pixels.len(), count);
        assert!(pixels.iter().all(|&p| p == Rgb565::YELLOW.into_storage()));
    }
}

#[test]
fn fill_converts_other_color_types() {
    let (mut display, trace) = ready(PanelConfig::TFT_480X272);

    display
        .fill_rectangle(0, 0, 1, 1, Rgb888::new(255, 0, 0))
        .unwrap();

    assert_eq!(trace.pixels(), vec![0xF800; 4]);
}

#[test]
fn mode_line_only_moves_on_transitions() {
    let (mut display, trace) = ready(PanelConfig::TFT_480X272);

    display.fill_rectangle(0, 0, 9, 9, Rgb565::RED).unwrap();

    // 0x2A low (already), params high, 0x2B low, params high, 0x2C low, pixels high
    assert_eq!(trace.line_writes(Line::Rs), 5);

    trace.clear();
    display.fill_rectangle(0, 0, 9, 9, Rgb565::RED).unwrap();
    // Bus was left in data mode, the first command pulls it low again
    assert_eq!(trace.line_writes(Line::Rs), 6);
}

#[test]
fn blit_skips_clipped_columns_with_unclipped_stride() {
    let (mut display, trace) = ready(PanelConfig::TFT_480X272);
    let src: Vec<u16> = (0..12).collect();

    // 4x3 request at (-1, -1): visible is (0,0)-(2,1)
    display.blit_rectangle(-1, -1, 2, 1, &src).unwrap();

    assert_eq!(window_of(&trace), ((0, 2), (0, 1)));
    let rows: Vec<Event> = trace
        .events()
        .into_iter()
        .filter(|e| matches!(e, Event::Words(_)))
        .collect();
    assert_eq!(
        rows,
        vec![Event::Words(vec![5, 6, 7]), Event::Words(vec![9, 10, 11])]
    );
}

#[test]
fn blit_pixel_addressing_on_every_side() {
    let (mut display, trace) = ready(tiny_panel());

    for (x1, y1, x2, y2) in [
        (-2, -1, 3, 2),
        (5, 3, 10, 8),
        (-4, 2, 12, 3),
        (1, 1, 4, 4),
        (6, -3, 7, 0),
    ] {
        trace.clear();
        let stride = (x2 - x1 + 1) as usize;
        let rows = (y2 - y1 + 1) as usize;
        let src: Vec<u16> = (0..(stride * rows) as u16).collect();

        display.blit_rectangle(x1, y1, x2, y2, &src).unwrap();

        let ((cx1, cx2), (cy1, cy2)) = window_of(&trace);
        let width = usize::from(cx2 - cx1 + 1);
        let pixels = trace.pixels();
        assert_eq!(pixels.len(), width * usize::from(cy2 - cy1 + 1));

        for (n, &pixel) in pixels.iter().enumerate() {
            let (i, j) = ((n % width) as i32, (n / width) as i32);
            let row = j + i32::from(cy1) - y1;
            let col = i + i32::from(cx1) - x1;
            let expected = src[row as usize * stride + col as usize];
            assert_eq!(pixel, expected, "request ({x1},{y1})-({x2},{y2}) pixel ({i},{j})");
        }
    }
}

#[test]
fn blit_colors_converts_each_pixel_with_same_addressing() {
    let (mut display, trace) = ready(PanelConfig::TFT_480X272);
    let palette = [
        Rgb565::RED,
        Rgb565::GREEN,
        Rgb565::BLUE,
        Rgb565::WHITE,
        Rgb565::BLACK,
        Rgb565::CYAN,
    ];

    // 3x2 request hanging off the right edge by one column
    display.blit_colors(478, 0, 480, 1, &palette).unwrap();

    let words: Vec<Event> = trace
        .events()
        .into_iter()
        .filter(|e| matches!(e, Event::Word(_)))
        .collect();
    assert_eq!(
        words,
        vec![
            Event::Word(Rgb565::RED.into_storage()),
            Event::Word(Rgb565::GREEN.into_storage()),
            Event::Word(Rgb565::WHITE.into_storage()),
            Event::Word(Rgb565::BLACK.into_storage()),
        ]
    );
}

#[test]
fn blit_colors_accepts_wider_color_types() {
    let (mut display, trace) = ready(PanelConfig::TFT_480X272);

    display
        .blit_colors(0, 0, 1, 0, &[Rgb888::WHITE, Rgb888::BLACK])
        .unwrap();

    assert_eq!(trace.pixels(), vec![0xFFFF, 0x0000]);
}

#[test]
fn short_source_fails_without_touching_the_bus() {
    let (mut display, trace) = ready(PanelConfig::TFT_480X272);

    let result = display.blit_rectangle(0, 0, 9, 9, &[0u16; 50]);

    assert!(matches!(result, Err(DisplayError::OutOfBoundsError)));
    assert!(!trace.has_bus_writes());
    assert!(trace.events().is_empty());
}

#[test]
fn source_only_needs_to_cover_visible_rows() {
    let (mut display, trace) = ready(tiny_panel());
    // 4x4 request at y=4, only two rows fit on the 6-row panel
    let src: Vec<u16> = (0..8).collect();

    display.blit_rectangle(0, 4, 3, 7, &src).unwrap();

    assert_eq!(trace.pixels(), src);
}
