//! SSD1963 Display Driver Implementation
//!
//! Brings the controller out of reset and streams pixels into its frame memory.
//!
//! ## Architecture
//!
//! ### Initialization
//! - `new()` - Wrap bus, pins and delay, nothing is sent yet
//! - `init()` - Full bring-up: IO, hardware reset, soft reset, PLL, panel timing,
//!   backlight PWM, display on
//!
//! ### Pixel Output
//! - `fill_rectangle()` - Solid color, one repeated word
//! - `blit_rectangle()` - Native RGB565 words, one bulk write per row
//! - `blit_colors()` - Any color convertible to RGB565, converted per pixel
//!
//! ## Clipping
//!
//! Coordinates are signed and may lie outside the panel. Requests are
//! intersected with the panel before the column/page window is programmed, a
//! request that misses the panel entirely sends nothing. For blits the source
//! keeps the stride of the unclipped request so rows stay aligned.
//!
//! ## Timing
//!
//! All delays are fixed. The controller has no status read-back on this bus,
//! a missing or miswired chip goes unnoticed.

pub use display_interface::DisplayError;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::IntoStorage;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::bus::ParallelBus;
use crate::cmd::Cmd;
use crate::config::PanelConfig;
use crate::flag::Flag;
use crate::interface::DisplayInterface;
use crate::window::Window;

/// Reset line high/low/high phases
const RESET_DELAY_MS: u32 = 50;
/// Chip select released before the bus is re-enabled
const CS_DISABLE_DELAY_MS: u32 = 10;
/// Settle after chip select is asserted again
const CS_ENABLE_DELAY_MS: u32 = 5;
/// Settle after each software reset
const SOFT_RESET_DELAY_MS: u32 = 20;
/// A single soft reset is sometimes not latched right after power-up
const SOFT_RESET_REPEATS: usize = 3;
/// PLL lock time
const PLL_LOCK_DELAY_MS: u32 = 20;
/// Settle after display on
const DISPLAY_ON_DELAY_MS: u32 = 30;

/// SSD1963 LCD controller driver
///
/// ## Type Parameters
///
/// - `BUS` - Parallel bus transport with chip select
/// - `DC` - Data/Command ("RS") output pin
/// - `RST` - Reset output pin
/// - `BL` - Backlight enable output pin
/// - `DELAY` - Delay provider for timing
pub struct Ssd1963<BUS, DC, RST, BL, DELAY> {
    /// The display interface
    interface: DisplayInterface<BUS, DC, RST, BL>,
    delay: DELAY,
    config: PanelConfig,
}

impl<BUS, DC, RST, BL, DELAY> Ssd1963<BUS, DC, RST, BL, DELAY> {
    /// Panel configuration in use
    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Panel size in pixels, width then height
    pub fn panel_size(&self) -> (u16, u16) {
        (self.config.width, self.config.height)
    }

    /// Access the framing layer
    pub fn interface(&self) -> &DisplayInterface<BUS, DC, RST, BL> {
        &self.interface
    }

    /// Give bus, pins and delay back
    pub fn release(self) -> (BUS, DC, RST, BL, DELAY) {
        let (bus, dc, rst, bl) = self.interface.release();
        (bus, dc, rst, bl, self.delay)
    }

    fn clip(&self, x1: i32, y1: i32, x2: i32, y2: i32) -> Option<Window> {
        let win = Window::clip(x1, y1, x2, y2, self.config.width, self.config.height);
        if win.is_none() {
            log::trace!("Rectangle ({x1},{y1})-({x2},{y2}) is off the panel, skipped");
        }
        win
    }
}

impl<BUS, DC, RST, BL, DELAY> Ssd1963<BUS, DC, RST, BL, DELAY>
where
    BUS: ParallelBus,
    DC: OutputPin,
    RST: OutputPin,
    BL: OutputPin,
    DELAY: DelayNs,
{
    /// Create the driver. Call [`Self::init`] once before drawing.
    pub fn new(bus: BUS, dc: DC, rst: RST, bl: BL, delay: DELAY, config: PanelConfig) -> Self {
        let interface = DisplayInterface::new(bus, dc, rst, bl);
        Ssd1963 {
            interface,
            delay,
            config,
        }
    }

    /// Run the complete bring-up sequence.
    ///
    /// Calling it again re-runs everything, hardware reset included.
    pub fn init(&mut self) -> Result<(), DisplayError> {
        log::info!(
            "Initializing SSD1963 for a {}x{} panel",
            self.config.width,
            self.config.height
        );

        self.interface.init_io()?;
        self.hardware_reset()?;
        self.software_reset()?;
        self.set_clock()?;
        self.set_panel_timing()?;
        self.init_backlight()?;

        self.interface.cmd(Cmd::ENTER_NORMAL_MODE)?;
        self.interface.cmd(Cmd::SET_DISPLAY_ON)?;
        self.delay.delay_ms(DISPLAY_ON_DELAY_MS);

        log::info!("SSD1963 display on");
        Ok(())
    }

    /// Pulse the reset line, then cycle chip select so the bus interface
    /// starts from a clean state
    fn hardware_reset(&mut self) -> Result<(), DisplayError> {
        log::info!("Hardware reset");
        self.interface.set_reset(true)?;
        self.delay.delay_ms(RESET_DELAY_MS);
        self.interface.set_reset(false)?;
        self.delay.delay_ms(RESET_DELAY_MS);
        self.interface.set_reset(true)?;
        self.delay.delay_ms(RESET_DELAY_MS);

        self.interface.deselect()?;
        self.delay.delay_ms(CS_DISABLE_DELAY_MS);
        self.interface.select()?;
        self.delay.delay_ms(CS_ENABLE_DELAY_MS);
        Ok(())
    }

    fn software_reset(&mut self) -> Result<(), DisplayError> {
        for _ in 0..SOFT_RESET_REPEATS {
            self.interface.cmd(Cmd::SOFT_RESET)?;
            self.delay.delay_ms(SOFT_RESET_DELAY_MS);
        }
        Ok(())
    }

    /// PLL setup. Enable, wait for lock, switch over to the PLL clock, then
    /// soft reset once more before the pixel clock is programmed.
    fn set_clock(&mut self) -> Result<(), DisplayError> {
        log::info!("Configuring PLL");
        self.interface
            .cmd_with_data(Cmd::SET_PLL_MN, &self.config.pll_params())?;

        self.interface
            .cmd_with_data(Cmd::SET_PLL, &[Flag::PLL_ENABLE])?;
        self.delay.delay_ms(PLL_LOCK_DELAY_MS);

        self.interface.cmd_with_data(Cmd::SET_PLL, &[Flag::PLL_LOCK])?;

        self.interface.cmd(Cmd::SOFT_RESET)?;
        self.delay.delay_ms(SOFT_RESET_DELAY_MS);

        self.interface
            .cmd_with_data(Cmd::SET_LSHIFT_FREQ, &self.config.pixel_clock_params())
    }

    fn set_panel_timing(&mut self) -> Result<(), DisplayError> {
        log::info!("Configuring panel timing");
        let cfg = self.config;
        self.interface
            .cmd_with_data(Cmd::SET_LCD_MODE, &cfg.lcd_mode_params())?;
        self.interface
            .cmd_with_data(Cmd::SET_HORI_PERIOD, &cfg.hori_period_params())?;
        self.interface
            .cmd_with_data(Cmd::SET_VERT_PERIOD, &cfg.vert_period_params())?;
        self.interface
            .cmd_with_data(Cmd::SET_PIXEL_DATA_INTERFACE, &[Flag::PIXEL_DATA_16BIT_565])?;
        self.interface
            .cmd_with_data(Cmd::SET_ADDRESS_MODE, &[cfg.orientation.address_mode()])
    }

    fn init_backlight(&mut self) -> Result<(), DisplayError> {
        log::info!(
            "Backlight PWM divisor {} duty 0x{:02X}",
            self.config.backlight.pwm_divisor,
            self.config.backlight.duty
        );
        self.interface
            .cmd_with_data(Cmd::SET_PWM_CONF, &self.config.pwm_params())?;
        self.interface.set_backlight(true)
    }

    /// Program the column and page window and start a memory write.
    /// The bus is left in data mode.
    pub(crate) fn open_window(&mut self, win: &Window) -> Result<(), DisplayError> {
        log::debug!(
            "Window ({},{})-({},{}) {} pixels",
            win.x1,
            win.y1,
            win.x2,
            win.y2,
            win.pixel_count()
        );
        self.interface
            .cmd_with_data(Cmd::SET_COLUMN_ADDRESS, &win.column_params())?;
        self.interface
            .cmd_with_data(Cmd::SET_PAGE_ADDRESS, &win.page_params())?;
        self.interface.cmd(Cmd::WRITE_MEMORY_START)?;
        self.interface.enter_data_mode()
    }

    /// Write one pixel word into an open window
    pub(crate) fn write_pixel(&mut self, word: u16) -> Result<(), DisplayError> {
        self.interface.data_word(word)
    }

    /// Fill `(x1, y1)..=(x2, y2)` with one color.
    ///
    /// The rectangle is clipped to the panel, one that misses the panel
    /// completely is ignored.
    pub fn fill_rectangle<C>(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: C,
    ) -> Result<(), DisplayError>
    where
        C: Into<Rgb565>,
    {
        let Some(win) = self.clip(x1, y1, x2, y2) else {
            return Ok(());
        };
        let word = color.into().into_storage();

        self.open_window(&win)?;
        self.interface.data_repeated(word, win.pixel_count())
    }

    /// Copy native RGB565 words into `(x1, y1)..=(x2, y2)`.
    ///
    /// `pixels` is row major with a stride of `x2 - x1 + 1`. Only the visible
    /// part is sent, each row as one bulk write.
    pub fn blit_rectangle(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        pixels: &[u16],
    ) -> Result<(), DisplayError> {
        let Some(win) = self.clip(x1, y1, x2, y2) else {
            return Ok(());
        };
        let rows = source_rows(pixels, x1, y1, x2, &win)?;

        self.open_window(&win)?;
        for row in rows {
            self.interface.data_words(row)?;
        }
        Ok(())
    }

    /// Like [`Self::blit_rectangle`] but for any color type, each pixel is
    /// converted to RGB565 on the way out.
    pub fn blit_colors<C>(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        pixels: &[C],
    ) -> Result<(), DisplayError>
    where
        C: Into<Rgb565> + Copy,
    {
        let Some(win) = self.clip(x1, y1, x2, y2) else {
            return Ok(());
        };
        let rows = source_rows(pixels, x1, y1, x2, &win)?;

        self.open_window(&win)?;
        for row in rows {
            for &color in row {
                self.interface.data_word(color.into().into_storage())?;
            }
        }
        Ok(())
    }
}

/// Rows of `src` that land inside `win`.
///
/// `src` covers the unclipped request starting at `(x1, y1)` with stride
/// `x2 - x1 + 1`. Fails before anything is read if `src` is too short.
fn source_rows<'a, T>(
    src: &'a [T],
    x1: i32,
    y1: i32,
    x2: i32,
    win: &Window,
) -> Result<impl Iterator<Item = &'a [T]> + 'a, DisplayError> {
    let offset = |a: i64, b: i64| usize::try_from(a - b).map_err(|_| DisplayError::OutOfBoundsError);

    let stride = offset(i64::from(x2) + 1, i64::from(x1))?;
    let col_skip = offset(i64::from(win.x1), i64::from(x1))?;
    let row_skip = offset(i64::from(win.y1), i64::from(y1))?;
    let width = usize::from(win.width());
    let height = usize::from(win.height());

    let start = row_skip
        .checked_mul(stride)
        .and_then(|n| n.checked_add(col_skip))
        .ok_or(DisplayError::OutOfBoundsError)?;
    let end = (height - 1)
        .checked_mul(stride)
        .and_then(|n| n.checked_add(start))
        .and_then(|n| n.checked_add(width))
        .ok_or(DisplayError::OutOfBoundsError)?;

    let visible = src.get(start..end).ok_or_else(|| {
        log::warn!(
            "Pixel source holds {} values, {} needed for the visible area",
            src.len(),
            end
        );
        DisplayError::OutOfBoundsError
    })?;

    // Every chunk but the last is `stride` long, the last is exactly `width`
    Ok(visible.chunks(stride).map(move |row| &row[..width]))
}
