//! SSD1963 LCD Controller Driver
//!
//! Drives the Solomon Systech SSD1963 over a 16-bit 8080-style parallel bus,
//! as found on the common 4.3" to 7" TFT modules.
//!
//! ### Usage
//! 1. wrap your bus in something implementing [`bus::ParallelBus`], or use
//!    [`bus::GpioBus`] with sixteen GPIO data pins
//! 1. create the driver with [`Ssd1963::new`] and a [`PanelConfig`]
//! 1. call [`Ssd1963::init`] once
//! 1. draw with [`Ssd1963::fill_rectangle`], [`Ssd1963::blit_rectangle`] or
//!    through [`embedded_graphics`], the driver is a `DrawTarget<Color = Rgb565>`
//!
//! Coordinates may lie off the panel, they are clipped before anything is sent.
//!
//! The driver is blocking and keeps no global state. Share it between threads
//! only behind your own mutex.
//!
//! ### Features
//! - `std` (default): the [`sim`] recording bus and the `ssd1963-trace` tool
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(missing_docs)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

pub mod bus;
pub mod cmd;
pub mod config;
pub mod driver;
pub mod flag;
pub mod graphics;
pub mod interface;
#[cfg(feature = "std")]
pub mod sim;
pub mod window;

pub use bus::{GpioBus, ParallelBus};
pub use cmd::Cmd;
pub use config::{BacklightConfig, Orientation, PanelConfig, PllConfig};
pub use driver::{DisplayError, Ssd1963};
pub use flag::Flag;
pub use interface::{BusMode, DisplayInterface};
pub use window::Window;
