//! Draws a few shapes through the complete stack (bit banged SPI, SPI bus,
//! display engine) with placeholder pins, so it runs on the host.
//!
//! On a board, swap the `DummyPin`s for real GPIO pins (or use a hardware SPI
//! peripheral instead of `BitBangSpi`) and the `StdDelay` for the HAL's delay.
use std::convert::Infallible;
use std::thread;
use std::time::Duration;

use embedded_hal::blocking::delay::DelayMs;
use udisplay::bitbang::BitBangSpi;
use udisplay::dummypins::DummyPin;
use udisplay::{color565, Controller, Display, InitStep, SpiBus};

/// ST7735 style panel, 16 bit pixels.
struct Panel;

impl Controller for Panel {
    const COLUMN_SET: Option<u8> = Some(0x2a);
    const PAGE_SET: Option<u8> = Some(0x2b);
    const RAM_WRITE: Option<u8> = Some(0x2c);
    const RAM_READ: Option<u8> = Some(0x2e);
    const INIT: &'static [InitStep] = &[
        (Some(0x01), None),
        (Some(0x11), None),
        (Some(0x3a), Some(&[0x05])),
        (Some(0x36), Some(&[0xc8])),
        (Some(0x29), None),
    ];
}

struct StdDelay;

impl DelayMs<u8> for StdDelay {
    fn delay_ms(&mut self, ms: u8) {
        thread::sleep(Duration::from_millis(ms.into()));
    }
}

fn main() {
    let spi = BitBangSpi::new(DummyPin, DummyPin, DummyPin).expect("Infallible cannot fail");
    let bus = SpiBus::with_reset(spi, DummyPin, DummyPin, DummyPin, &mut StdDelay)
        .expect("Infallible cannot fail");

    let mut display = Display::new(bus, Panel, 128, 160).expect("Infallible cannot fail");

    display.fill(color565(0, 0, 0)).expect("Infallible cannot fail");
    display
        .fill_rectangle(120, 0, 20, 10, 0xffff)
        .expect("Infallible cannot fail");
    display
        .hline(0, 80, 128, color565(255, 0, 0))
        .expect("Infallible cannot fail");
    display
        .vline(64, 0, 160, color565(0, 255, 0))
        .expect("Infallible cannot fail");

    let sprite: Vec<u8> = (0..16 * 16)
        .flat_map(|i: u16| color565((i * 16) as u8, 0, 255).to_be_bytes().to_vec())
        .collect();
    display
        .blit_buffer(&sprite, 8, 8, 16, 16)
        .expect("Infallible cannot fail");

    // the placeholder MISO always reads low
    let pixel: Result<u16, udisplay::Error<udisplay::SpiBusError<Infallible, Infallible>>> =
        display.pixel(0, 0);
    println!("pixel (0, 0) reads back as {:#06x}", pixel.expect("Infallible cannot fail"));
}
