//! Parallel bus transport
//!
//! The SSD1963 talks 8080-style: data lines, an active-low write strobe and an
//! active-low chip select. The D/C ("RS") line is not part of the transport,
//! the framing layer in [`crate::interface`] owns it.

use display_interface::DisplayError;
use embedded_hal::digital::{OutputPin, PinState};

/// Width of the data bus, the controller is set to 16-bit 565 pixel data.
pub const BUS_WIDTH: usize = 16;

/// A write-only parallel bus.
///
/// Every write is latched in whatever command/data mode the D/C line
/// currently selects.
pub trait ParallelBus {
    /// Write one byte on the low data lines
    fn write_byte(&mut self, byte: u8) -> Result<(), DisplayError>;

    /// Write one 16-bit word in a single strobe
    fn write_word(&mut self, word: u16) -> Result<(), DisplayError>;

    /// Write the same word `count` times
    fn write_repeated(&mut self, word: u16, count: u32) -> Result<(), DisplayError> {
        for _ in 0..count {
            self.write_word(word)?;
        }
        Ok(())
    }

    /// Write consecutive words
    fn write_words(&mut self, words: &[u16]) -> Result<(), DisplayError> {
        for &word in words {
            self.write_word(word)?;
        }
        Ok(())
    }

    /// Assert chip select
    fn select(&mut self) -> Result<(), DisplayError>;

    /// Release chip select
    fn deselect(&mut self) -> Result<(), DisplayError>;
}

impl<T: ParallelBus + ?Sized> ParallelBus for &mut T {
    fn write_byte(&mut self, byte: u8) -> Result<(), DisplayError> {
        T::write_byte(self, byte)
    }

    fn write_word(&mut self, word: u16) -> Result<(), DisplayError> {
        T::write_word(self, word)
    }

    fn write_repeated(&mut self, word: u16, count: u32) -> Result<(), DisplayError> {
        T::write_repeated(self, word, count)
    }

    fn write_words(&mut self, words: &[u16]) -> Result<(), DisplayError> {
        T::write_words(self, words)
    }

    fn select(&mut self) -> Result<(), DisplayError> {
        T::select(self)
    }

    fn deselect(&mut self) -> Result<(), DisplayError> {
        T::deselect(self)
    }
}

/// Bit-banged 16-bit bus over plain GPIO output pins
///
/// `data[0]` is D0. Data is latched by the controller on the rising edge of WR.
pub struct GpioBus<D, WR, CS> {
    data: [D; BUS_WIDTH],
    /// Write strobe, active low
    wr: WR,
    /// Chip select, active low
    cs: CS,
    /// Last value driven on the data lines, only changed lines are toggled
    latched: Option<u16>,
}

impl<D, WR, CS> GpioBus<D, WR, CS> {
    /// Create the bus. Pins are not touched until the first write.
    pub fn new(data: [D; BUS_WIDTH], wr: WR, cs: CS) -> Self {
        GpioBus {
            data,
            wr,
            cs,
            latched: None,
        }
    }

    /// Give the pins back
    pub fn release(self) -> ([D; BUS_WIDTH], WR, CS) {
        (self.data, self.wr, self.cs)
    }
}

impl<D, WR, CS> GpioBus<D, WR, CS>
where
    D: OutputPin,
    WR: OutputPin,
    CS: OutputPin,
{
    fn put(&mut self, value: u16) -> Result<(), DisplayError> {
        let changed = match self.latched {
            Some(previous) => previous ^ value,
            None => u16::MAX,
        };
        for (bit, pin) in self.data.iter_mut().enumerate() {
            if changed & (1 << bit) != 0 {
                let level = PinState::from(value & (1 << bit) != 0);
                pin.set_state(level)
                    .map_err(|_| DisplayError::BusWriteError)?;
            }
        }
        self.latched = Some(value);
        Ok(())
    }

    fn strobe(&mut self) -> Result<(), DisplayError> {
        self.wr.set_low().map_err(|_| DisplayError::BusWriteError)?;
        self.wr.set_high().map_err(|_| DisplayError::BusWriteError)
    }
}

impl<D, WR, CS> ParallelBus for GpioBus<D, WR, CS>
where
    D: OutputPin,
    WR: OutputPin,
    CS: OutputPin,
{
    fn write_byte(&mut self, byte: u8) -> Result<(), DisplayError> {
        self.put(u16::from(byte))?;
        self.strobe()
    }

    fn write_word(&mut self, word: u16) -> Result<(), DisplayError> {
        self.put(word)?;
        self.strobe()
    }

    fn write_repeated(&mut self, word: u16, count: u32) -> Result<(), DisplayError> {
        if count == 0 {
            return Ok(());
        }
        // Lines hold their level, only the strobe has to toggle
        self.put(word)?;
        for _ in 0..count {
            self.strobe()?;
        }
        Ok(())
    }

    fn select(&mut self) -> Result<(), DisplayError> {
        self.cs.set_low().map_err(|_| DisplayError::CSError)
    }

    fn deselect(&mut self) -> Result<(), DisplayError> {
        self.cs.set_high().map_err(|_| DisplayError::CSError)
    }
}
