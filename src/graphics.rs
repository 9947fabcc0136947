//! `embedded-graphics` support
//!
//! Draws straight to the controller's frame memory, there is no local buffer.
//! Pixels outside the panel are dropped.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::bus::ParallelBus;
use crate::driver::{DisplayError, Ssd1963};
use crate::window::Window;

impl<BUS, DC, RST, BL, DELAY> OriginDimensions for Ssd1963<BUS, DC, RST, BL, DELAY> {
    fn size(&self) -> Size {
        let (width, height) = self.panel_size();
        Size::new(u32::from(width), u32::from(height))
    }
}

/// Inclusive corners of a non-empty rectangle
fn corners(area: &Rectangle) -> Option<(i32, i32, i32, i32)> {
    let bottom_right = area.bottom_right()?;
    Some((
        area.top_left.x,
        area.top_left.y,
        bottom_right.x,
        bottom_right.y,
    ))
}

impl<BUS, DC, RST, BL, DELAY> DrawTarget for Ssd1963<BUS, DC, RST, BL, DELAY>
where
    BUS: ParallelBus,
    DC: OutputPin,
    RST: OutputPin,
    BL: OutputPin,
    DELAY: DelayNs,
{
    type Color = Rgb565;
    type Error = DisplayError;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let (width, height) = self.panel_size();
        for Pixel(point, color) in pixels {
            let Some(win) = Window::clip(point.x, point.y, point.x, point.y, width, height)
            else {
                continue;
            };
            self.open_window(&win)?;
            self.write_pixel(color.into_storage())?;
        }
        Ok(())
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        let Some((x1, y1, x2, y2)) = corners(area) else {
            return Ok(());
        };
        let (width, height) = self.panel_size();
        let Some(win) = Window::clip(x1, y1, x2, y2, width, height) else {
            return Ok(());
        };

        self.open_window(&win)?;
        for (point, color) in area.points().zip(colors) {
            if win.contains(point.x, point.y) {
                self.write_pixel(color.into_storage())?;
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        match corners(area) {
            Some((x1, y1, x2, y2)) => self.fill_rectangle(x1, y1, x2, y2, color),
            None => Ok(()),
        }
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let (width, height) = self.panel_size();
        self.fill_rectangle(0, 0, i32::from(width) - 1, i32::from(height) - 1, color)
    }
}
