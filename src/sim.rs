//! Recording stand-ins for the bus, pins and delay
//!
//! Everything the driver does to the hardware ends up as an [`Event`] in a
//! shared [`Trace`]. Used by the tests and the `ssd1963-trace` tool to check
//! the byte stream without a panel attached.

use std::cell::RefCell;
use std::convert::Infallible;
use std::fmt;
use std::rc::Rc;

use display_interface::DisplayError;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};

use crate::bus::ParallelBus;
use crate::config::PanelConfig;
use crate::driver::Ssd1963;

/// Control lines driven by the framing layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    /// Reset, active low
    Reset,
    /// Backlight enable
    Backlight,
    /// D/C, low for command, high for data
    Rs,
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Line::Reset => write!(f, "RST"),
            Line::Backlight => write!(f, "BL"),
            Line::Rs => write!(f, "RS"),
        }
    }
}

/// One observable action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A control line was driven
    Pin(Line, bool),
    /// Chip select asserted (`true`) or released
    ChipSelect(bool),
    /// One byte strobed onto the bus
    Byte(u8),
    /// One word strobed onto the bus
    Word(u16),
    /// A word strobed `count` times
    Repeat(u16, u32),
    /// A run of words
    Words(Vec<u16>),
    /// Millisecond delay
    DelayMs(u32),
    /// Sub-millisecond delay
    DelayNs(u32),
}

/// A command byte together with the parameter bytes that followed it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Command code
    pub code: u8,
    /// Parameter bytes written in data mode
    pub params: Vec<u8>,
}

/// Shared, append-only event log
#[derive(Debug, Clone, Default)]
pub struct Trace(Rc<RefCell<Vec<Event>>>);

impl Trace {
    /// Empty trace
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    /// Copy of everything recorded so far
    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    /// Forget everything recorded so far
    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    /// Whether any byte or word reached the bus
    pub fn has_bus_writes(&self) -> bool {
        self.0.borrow().iter().any(|e| {
            matches!(
                e,
                Event::Byte(_) | Event::Word(_) | Event::Repeat(..) | Event::Words(_)
            )
        })
    }

    /// Bytes grouped into commands, decoded with the RS line level
    pub fn commands(&self) -> Vec<Command> {
        let mut commands: Vec<Command> = Vec::new();
        let mut data_mode = false;
        for event in self.0.borrow().iter() {
            match *event {
                Event::Pin(Line::Rs, level) => data_mode = level,
                Event::Byte(code) if !data_mode => commands.push(Command {
                    code,
                    params: Vec::new(),
                }),
                Event::Byte(byte) => {
                    if let Some(last) = commands.last_mut() {
                        last.params.push(byte);
                    }
                }
                _ => {}
            }
        }
        commands
    }

    /// Every pixel word written, repeats expanded
    pub fn pixels(&self) -> Vec<u16> {
        let mut pixels = Vec::new();
        for event in self.0.borrow().iter() {
            match event {
                Event::Word(word) => pixels.push(*word),
                Event::Repeat(word, count) => {
                    pixels.extend(std::iter::repeat(*word).take(*count as usize))
                }
                Event::Words(words) => pixels.extend_from_slice(words),
                _ => {}
            }
        }
        pixels
    }

    /// How often `line` was driven
    pub fn line_writes(&self, line: Line) -> usize {
        self.0
            .borrow()
            .iter()
            .filter(|e| matches!(e, Event::Pin(l, _) if *l == line))
            .count()
    }

    /// Human readable listing, one event per line
    pub fn lines(&self) -> Vec<String> {
        let mut data_mode = false;
        let mut out = Vec::new();
        for event in self.0.borrow().iter() {
            let line = match event {
                Event::Pin(line, level) => {
                    if *line == Line::Rs {
                        data_mode = *level;
                    }
                    format!("{line} {}", if *level { "high" } else { "low" })
                }
                Event::ChipSelect(true) => "CS select".to_string(),
                Event::ChipSelect(false) => "CS release".to_string(),
                Event::Byte(byte) if data_mode => format!("DAT 0x{byte:02X}"),
                Event::Byte(byte) => format!("CMD 0x{byte:02X}"),
                Event::Word(word) => format!("WORD 0x{word:04X}"),
                Event::Repeat(word, count) => format!("REPEAT 0x{word:04X} x{count}"),
                Event::Words(words) => format!("WORDS {}", words.len()),
                Event::DelayMs(ms) => format!("DELAY {ms}ms"),
                Event::DelayNs(ns) => format!("DELAY {ns}ns"),
            };
            out.push(line);
        }
        out
    }
}

/// Bus that records instead of driving pins
#[derive(Debug, Clone)]
pub struct TraceBus {
    trace: Trace,
}

impl TraceBus {
    /// Record into `trace`
    pub fn new(trace: Trace) -> Self {
        TraceBus { trace }
    }
}

impl ParallelBus for TraceBus {
    fn write_byte(&mut self, byte: u8) -> Result<(), DisplayError> {
        self.trace.push(Event::Byte(byte));
        Ok(())
    }

    fn write_word(&mut self, word: u16) -> Result<(), DisplayError> {
        self.trace.push(Event::Word(word));
        Ok(())
    }

    fn write_repeated(&mut self, word: u16, count: u32) -> Result<(), DisplayError> {
        self.trace.push(Event::Repeat(word, count));
        Ok(())
    }

    fn write_words(&mut self, words: &[u16]) -> Result<(), DisplayError> {
        self.trace.push(Event::Words(words.to_vec()));
        Ok(())
    }

    fn select(&mut self) -> Result<(), DisplayError> {
        self.trace.push(Event::ChipSelect(true));
        Ok(())
    }

    fn deselect(&mut self) -> Result<(), DisplayError> {
        self.trace.push(Event::ChipSelect(false));
        Ok(())
    }
}

/// Output pin that records its level changes
#[derive(Debug, Clone)]
pub struct TracePin {
    trace: Trace,
    line: Line,
}

impl TracePin {
    /// Record writes to `line` into `trace`
    pub fn new(trace: Trace, line: Line) -> Self {
        TracePin { trace, line }
    }
}

impl ErrorType for TracePin {
    type Error = Infallible;
}

impl OutputPin for TracePin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.trace.push(Event::Pin(self.line, false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.trace.push(Event::Pin(self.line, true));
        Ok(())
    }
}

/// Delay that returns at once and records the requested time
#[derive(Debug, Clone)]
pub struct TraceDelay {
    trace: Trace,
}

impl TraceDelay {
    /// Record into `trace`
    pub fn new(trace: Trace) -> Self {
        TraceDelay { trace }
    }
}

impl DelayNs for TraceDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.trace.push(Event::DelayNs(ns));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.trace.push(Event::DelayMs(ms));
    }
}

/// Driver wired entirely to recording parts
pub type SimDriver = Ssd1963<TraceBus, TracePin, TracePin, TracePin, TraceDelay>;

/// Build a driver for `config` that records into the returned trace.
pub fn driver(config: PanelConfig) -> (SimDriver, Trace) {
    let trace = Trace::new();
    let driver = Ssd1963::new(
        TraceBus::new(trace.clone()),
        TracePin::new(trace.clone(), Line::Rs),
        TracePin::new(trace.clone(), Line::Reset),
        TracePin::new(trace.clone(), Line::Backlight),
        TraceDelay::new(trace.clone()),
        config,
    );
    (driver, trace)
}
