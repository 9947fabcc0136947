//! Bring-up sequence tests, run against the recording bus.
//!
//! Run with: cargo test --test bring_up
#![cfg(feature = "std")]

use ssd1963::sim::{self, Command, Event, Line};
use ssd1963::{BacklightConfig, BusMode, Orientation, PanelConfig};

fn cmd(code: u8, params: &[u8]) -> Command {
    Command {
        code,
        params: params.to_vec(),
    }
}

#[test]
fn command_stream_matches_controller_procedure() {
    let (mut display, trace) = sim::driver(PanelConfig::TFT_480X272);

    display.init().unwrap();

    assert_eq!(
        trace.commands(),
        vec![
            cmd(0x01, &[]),
            cmd(0x01, &[]),
            cmd(0x01, &[]),
            cmd(0xE2, &[0x23, 0x05, 0x54]),
            cmd(0xE0, &[0x01]),
            cmd(0xE0, &[0x03]),
            cmd(0x01, &[]),
            cmd(0xE6, &[0x04, 0x93, 0xE0]),
            cmd(0xB0, &[0x20, 0x00, 0x01, 0xDF, 0x01, 0x0F, 0x00]),
            cmd(0xB4, &[0x02, 0x13, 0x00, 0x2B, 0x0A, 0x00, 0x08, 0x00]),
            cmd(0xB6, &[0x01, 0x20, 0x00, 0x0C, 0x0A, 0x00, 0x04]),
            cmd(0xF0, &[0x03]),
            cmd(0x36, &[0x03]),
            cmd(0xBE, &[0x02, 0x20, 0x01, 0x00, 0x00, 0x00]),
            cmd(0x13, &[]),
            cmd(0x29, &[]),
        ]
    );
}

#[test]
fn reset_and_soft_reset_timing() {
    let (mut display, trace) = sim::driver(PanelConfig::TFT_480X272);

    display.init().unwrap();

    let events = trace.events();
    assert_eq!(
        events[..20],
        [
            // IO init
            Event::Pin(Line::Reset, true),
            Event::Pin(Line::Backlight, false),
            Event::Pin(Line::Rs, false),
            Event::ChipSelect(true),
            // Hardware reset
            Event::Pin(Line::Reset, true),
            Event::DelayMs(50),
            Event::Pin(Line::Reset, false),
            Event::DelayMs(50),
            Event::Pin(Line::Reset, true),
            Event::DelayMs(50),
            Event::ChipSelect(false),
            Event::DelayMs(10),
            Event::ChipSelect(true),
            Event::DelayMs(5),
            // Three soft resets before any PLL setup
            Event::Byte(0x01),
            Event::DelayMs(20),
            Event::Byte(0x01),
            Event::DelayMs(20),
            Event::Byte(0x01),
            Event::DelayMs(20),
        ]
    );
    assert_eq!(events[20], Event::Byte(0xE2));
}

#[test]
fn pll_is_locked_before_the_extra_reset() {
    let (mut display, trace) = sim::driver(PanelConfig::TFT_480X272);

    display.init().unwrap();

    let events = trace.events();
    let start = events
        .iter()
        .position(|e| *e == Event::Byte(0xE0))
        .unwrap();
    assert_eq!(
        events[start..start + 13],
        [
            Event::Byte(0xE0),
            Event::Pin(Line::Rs, true),
            Event::Byte(0x01),
            Event::DelayMs(20),
            Event::Pin(Line::Rs, false),
            Event::Byte(0xE0),
            Event::Pin(Line::Rs, true),
            Event::Byte(0x03),
            Event::Pin(Line::Rs, false),
            Event::Byte(0x01),
            Event::DelayMs(20),
            Event::Byte(0xE6),
            Event::Pin(Line::Rs, true),
        ]
    );
}

#[test]
fn backlight_and_display_on_finish_the_sequence() {
    let (mut display, trace) = sim::driver(PanelConfig::TFT_480X272);

    display.init().unwrap();

    let events = trace.events();
    assert_eq!(
        events[events.len() - 6..],
        [
            Event::Byte(0x00),
            Event::Pin(Line::Backlight, true),
            Event::Pin(Line::Rs, false),
            Event::Byte(0x13),
            Event::Byte(0x29),
            Event::DelayMs(30),
        ]
    );
    assert_eq!(display.interface().mode(), Some(BusMode::Command));
    assert!(trace.pixels().is_empty());
}

#[test]
fn flipped_orientation_changes_only_the_address_mode() {
    let (mut normal, normal_trace) = sim::driver(PanelConfig::TFT_480X272);
    let (mut flipped, flipped_trace) =
        sim::driver(PanelConfig::TFT_480X272.with_orientation(Orientation::Flipped));

    normal.init().unwrap();
    flipped.init().unwrap();

    let normal_cmds = normal_trace.commands();
    let flipped_cmds = flipped_trace.commands();
    assert_eq!(normal_cmds.len(), flipped_cmds.len());
    for (a, b) in normal_cmds.iter().zip(&flipped_cmds) {
        if a.code == 0x36 {
            assert_eq!(a.params, [0x03]);
            assert_eq!(b.params, [0x00]);
        } else {
            assert_eq!(a, b);
        }
    }
}

#[test]
fn custom_backlight_reaches_pwm_config() {
    let config = PanelConfig::TFT_480X272.with_backlight(BacklightConfig {
        pwm_divisor: 0x05,
        duty: 0xFF,
    });
    let (mut display, trace) = sim::driver(config);

    display.init().unwrap();

    let commands = trace.commands();
    let pwm = commands.iter().find(|c| c.code == 0xBE).unwrap();
    assert_eq!(pwm.params, [0x05, 0xFF, 0x01, 0x00, 0x00, 0x00]);
    // Nothing else in the sequence depends on the backlight
    let (mut stock, stock_trace) = sim::driver(PanelConfig::TFT_480X272);
    stock.init().unwrap();
    let stock_commands = stock_trace.commands();
    assert_eq!(commands.len(), stock_commands.len());
    for (a, b) in commands.iter().zip(&stock_commands) {
        if a.code != 0xBE {
            assert_eq!(a, b);
        }
    }
}

#[test]
fn panel_size_flows_into_lcd_mode() {
    let config = PanelConfig {
        width: 800,
        height: 480,
        ..PanelConfig::TFT_480X272
    };
    let (mut display, trace) = sim::driver(config);

    display.init().unwrap();

    let lcd_mode = trace
        .commands()
        .into_iter()
        .find(|c| c.code == 0xB0)
        .unwrap();
    // HDP = 799 = 0x031F, VDP = 479 = 0x01DF
    assert_eq!(lcd_mode.params, [0x20, 0x00, 0x03, 0x1F, 0x01, 0xDF, 0x00]);
}

#[test]
fn init_twice_repeats_hardware_reset() {
    let (mut display, trace) = sim::driver(PanelConfig::TFT_480X272);

    display.init().unwrap();
    display.init().unwrap();

    let resets = trace
        .events()
        .iter()
        .filter(|e| **e == Event::Pin(Line::Reset, false))
        .count();
    assert_eq!(resets, 2);
    assert_eq!(
        trace.commands().iter().filter(|c| c.code == 0x29).count(),
        2
    );
}
