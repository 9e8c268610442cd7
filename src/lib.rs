//! # udisplay
//!
//! Generic driver for bitmap display controllers that are addressed through a
//! windowed command/data bus: ILI9341, ST7735, HX8353, S6D02A1, SSD1331,
//! SSD1351 and friends all follow the same pattern of "set column range, set
//! page range, stream pixels".
//!
//! The crate is split in three layers:
//!  - a [`Bus`] which moves command and data bytes, with [`SpiBus`] as the
//!    stock implementation on top of `embedded_hal` SPI and GPIO traits,
//!  - a [`Controller`] profile describing the command ids, the initialization
//!    sequence and the wire format of one controller model,
//!  - the [`Display`] engine which implements pixels, rectangles, lines and
//!    blits for any profile without keeping a frame buffer in memory.
//!
//! Colors are 16 bit RGB565 values, see [`color565`].
//!
//! ```ignore
//! let bus = SpiBus::new(spi, dc, cs)?;
//! let mut display = Display::new(bus, MyPanel, 128, 160)?;
//! display.fill(color565(0, 0, 0))?;
//! display.fill_rectangle(120, 0, 20, 10, 0xFFFF)?;
//! ```
#![no_std]

#[cfg(test)]
#[macro_use]
extern crate std;

extern crate embedded_hal as hal;

pub mod backend;
pub mod bitbang;
pub mod codec;
pub mod controller;
pub mod display;
pub mod dummypins;
pub mod error;

#[cfg(feature = "graphics")]
pub mod graphics;

#[cfg(test)]
mod mock;

pub use crate::backend::{Bus, SpiBus, SpiBusError};
pub use crate::codec::color565;
pub use crate::controller::{Controller, Dcs, InitStep};
pub use crate::display::{Display, Rect};
pub use crate::error::{Command, Error};

/// Number of pixels streamed per bus transfer by [`Display::fill_rectangle`]
/// unless a [`Controller`] asks for something else.
pub const DEFAULT_FILL_CHUNK_PIXELS: usize = 512;

/// Largest encoded pixel (write or read format) a [`Controller`] may use.
pub const MAX_PIXEL_BYTES: usize = 4;

/// Largest encoded coordinate pair a [`Controller`] may use.
pub const MAX_POSITION_BYTES: usize = 8;

/// Size of the scratch buffer used while streaming fills. The effective chunk
/// is capped so that `chunk * PIXEL_BYTES` fits in here.
pub const FILL_BUFFER_BYTES: usize = DEFAULT_FILL_CHUNK_PIXELS * MAX_PIXEL_BYTES;
