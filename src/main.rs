//! Print the bus traffic of the SSD1963 bring-up sequence
//!
//! Runs the driver against the recording bus and lists every line change,
//! byte and delay, handy to compare against a logic analyzer capture.
//!
//! ```text
//! ssd1963-trace [--flipped] [--pwm-divisor N] [--duty N] [fill X1 Y1 X2 Y2 RGB565]
//! ```
use anyhow::Result;
use clap::{Parser, Subcommand};
use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::pixelcolor::Rgb565;

use ssd1963::{sim, BacklightConfig, Orientation, PanelConfig};

#[derive(Debug, Parser)]
#[command(name = "ssd1963-trace")]
#[command(version)]
#[command(about = "List the bus traffic of the SSD1963 bring-up on a 480x272 panel")]
struct Cli {
    /// Use the controller's default scan direction (address mode 0x00)
    #[arg(long)]
    flipped: bool,

    /// Backlight PWM frequency divisor
    #[arg(long, value_parser = parse_byte)]
    pwm_divisor: Option<u8>,

    /// Backlight PWM duty, 0x00 off to 0xFF full
    #[arg(long, value_parser = parse_byte)]
    duty: Option<u8>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fill a rectangle after bring-up, coordinates may lie off the panel
    #[command(allow_negative_numbers = true)]
    Fill {
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        /// RGB565 color, decimal or 0x-prefixed hex
        #[arg(value_parser = parse_color)]
        color: u16,
    },
}

fn parse_color(text: &str) -> Result<u16, std::num::ParseIntError> {
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => text.parse(),
    }
}

fn parse_byte(text: &str) -> Result<u8, std::num::ParseIntError> {
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => text.parse(),
    }
}

impl Cli {
    fn panel(&self) -> PanelConfig {
        let mut config = PanelConfig::TFT_480X272;
        if self.flipped {
            config = config.with_orientation(Orientation::Flipped);
        }
        let backlight = config.backlight;
        config.with_backlight(BacklightConfig {
            pwm_divisor: self.pwm_divisor.unwrap_or(backlight.pwm_divisor),
            duty: self.duty.unwrap_or(backlight.duty),
        })
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let (mut display, trace) = sim::driver(cli.panel());
    display
        .init()
        .map_err(|e| anyhow::anyhow!("Init failed: {e:?}"))?;

    if let Some(Commands::Fill {
        x1,
        y1,
        x2,
        y2,
        color,
    }) = cli.command
    {
        log::info!("Filling ({x1},{y1})-({x2},{y2}) with 0x{color:04X}");
        display
            .fill_rectangle(x1, y1, x2, y2, Rgb565::from(RawU16::new(color)))
            .map_err(|e| anyhow::anyhow!("Fill failed: {e:?}"))?;
    }

    for line in trace.lines() {
        println!("{line}");
    }
    Ok(())
}
