//! Display interface over the parallel bus
//!
//! Owns the D/C ("RS") line together with the reset and backlight lines and
//! frames every transfer as command or data. The D/C level is only driven when
//! the mode actually changes.
use crate::bus::ParallelBus;
use display_interface::DisplayError;
use embedded_hal::digital::OutputPin;

/// Which kind of transfer the D/C line currently selects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusMode {
    /// D/C low
    Command,
    /// D/C high
    Data,
}

/// The connection to the controller: bus plus control lines.
pub struct DisplayInterface<BUS, DC, RST, BL> {
    /// Parallel transport, includes chip select
    bus: BUS,
    /// Data/Command Control Pin (High for data, Low for command)
    dc: DC,
    /// Pin for Reseting, active low
    rst: RST,
    /// Backlight enable
    bl: BL,
    /// Level last driven on `dc`, `None` until the line has been set once
    mode: Option<BusMode>,
}

impl<BUS, DC, RST, BL> DisplayInterface<BUS, DC, RST, BL> {
    /// Create the interface. No line is driven until [`Self::init_io`].
    pub fn new(bus: BUS, dc: DC, rst: RST, bl: BL) -> Self {
        DisplayInterface {
            bus,
            dc,
            rst,
            bl,
            mode: None,
        }
    }

    /// Current mode of the D/C line
    pub fn mode(&self) -> Option<BusMode> {
        self.mode
    }

    /// Give the bus and pins back
    pub fn release(self) -> (BUS, DC, RST, BL) {
        (self.bus, self.dc, self.rst, self.bl)
    }
}

impl<BUS, DC, RST, BL> DisplayInterface<BUS, DC, RST, BL>
where
    BUS: ParallelBus,
    DC: OutputPin,
    RST: OutputPin,
    BL: OutputPin,
{
    /// Put every control line into its idle state and select the bus:
    /// reset released, backlight off, D/C in command mode.
    pub(crate) fn init_io(&mut self) -> Result<(), DisplayError> {
        self.rst.set_high().map_err(|_| DisplayError::RSError)?;
        self.bl.set_low().map_err(|_| DisplayError::BusWriteError)?;
        self.dc.set_low().map_err(|_| DisplayError::DCError)?;
        self.mode = Some(BusMode::Command);
        self.bus.select()
    }

    /// Latch the bus for commands
    pub fn enter_command_mode(&mut self) -> Result<(), DisplayError> {
        if self.mode != Some(BusMode::Command) {
            // low for commands
            self.dc.set_low().map_err(|_| DisplayError::DCError)?;
            self.mode = Some(BusMode::Command);
        }
        Ok(())
    }

    /// Latch the bus for data
    pub fn enter_data_mode(&mut self) -> Result<(), DisplayError> {
        if self.mode != Some(BusMode::Data) {
            // high for data
            self.dc.set_high().map_err(|_| DisplayError::DCError)?;
            self.mode = Some(BusMode::Data);
        }
        Ok(())
    }

    /// Basic function for sending commands
    pub fn cmd(&mut self, command: u8) -> Result<(), DisplayError> {
        self.enter_command_mode()?;
        self.bus.write_byte(command).map_err(|e| {
            log::error!("Bus write error for command 0x{:02X}: {:?}", command, e);
            e
        })
    }

    /// Basic function for sending one parameter byte
    pub fn data(&mut self, data: u8) -> Result<(), DisplayError> {
        self.enter_data_mode()?;
        self.bus.write_byte(data)
    }

    /// Send parameter bytes one at a time
    pub fn data_bytes(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        for &byte in data {
            self.data(byte)?;
        }
        Ok(())
    }

    /// Basic function for sending a command and the data belonging to it.
    pub fn cmd_with_data(&mut self, command: u8, data: &[u8]) -> Result<(), DisplayError> {
        self.cmd(command)?;
        self.data_bytes(data)
    }

    /// Send one pixel word
    pub(crate) fn data_word(&mut self, word: u16) -> Result<(), DisplayError> {
        self.enter_data_mode()?;
        self.bus.write_word(word)
    }

    /// Send a run of pixel words
    pub(crate) fn data_words(&mut self, words: &[u16]) -> Result<(), DisplayError> {
        self.enter_data_mode()?;
        self.bus.write_words(words)
    }

    /// Send the same pixel word `count` times, used for solid fills
    pub(crate) fn data_repeated(&mut self, word: u16, count: u32) -> Result<(), DisplayError> {
        self.enter_data_mode()?;
        self.bus.write_repeated(word, count)
    }

    /// Drive the reset line, low holds the controller in reset
    pub(crate) fn set_reset(&mut self, released: bool) -> Result<(), DisplayError> {
        if released {
            self.rst.set_high().map_err(|_| DisplayError::RSError)
        } else {
            self.rst.set_low().map_err(|_| DisplayError::RSError)
        }
    }

    /// Switch the backlight enable line
    pub(crate) fn set_backlight(&mut self, on: bool) -> Result<(), DisplayError> {
        if on {
            self.bl.set_high().map_err(|_| DisplayError::BusWriteError)
        } else {
            self.bl.set_low().map_err(|_| DisplayError::BusWriteError)
        }
    }

    /// Assert chip select
    pub(crate) fn select(&mut self) -> Result<(), DisplayError> {
        self.bus.select()
    }

    /// Release chip select
    pub(crate) fn deselect(&mut self) -> Result<(), DisplayError> {
        self.bus.deselect()
    }
}
