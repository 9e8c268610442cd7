//! Byte transports between the display engine and the controller.

use hal::blocking::delay::DelayMs;
use hal::blocking::spi::{Transfer, Write};
use hal::digital::v2::OutputPin;

use crate::dummypins::DummyPin;

/// Hold time of each phase of the reset pulse.
const RESET_DELAY_MS: u8 = 50;

/// Bytes clocked in per SPI transfer while reading.
const READ_CHUNK_BYTES: usize = 64;

/// Command/data transport to a display controller.
///
/// Every transfer is a command/data pair: a missing command sends the data on
/// its own, missing data sends a bare command.
pub trait Bus {
    type Error;

    fn write(&mut self, command: Option<u8>, data: Option<&[u8]>) -> Result<(), Self::Error>;

    /// Sends the optional command and then reads `buffer.len()` bytes.
    fn read(&mut self, command: Option<u8>, buffer: &mut [u8]) -> Result<(), Self::Error>;
}

impl<B: Bus + ?Sized> Bus for &mut B {
    type Error = B::Error;

    #[inline]
    fn write(&mut self, command: Option<u8>, data: Option<&[u8]>) -> Result<(), Self::Error> {
        (**self).write(command, data)
    }

    #[inline]
    fn read(&mut self, command: Option<u8>, buffer: &mut [u8]) -> Result<(), Self::Error> {
        (**self).read(command, buffer)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiBusError<PinErr, SpiErr> {
    Pin(PinErr),
    Spi(SpiErr),
}

/// [`Bus`] over an SPI peripheral with data/command and chip select lines.
///
/// DC is driven low for commands and high for data, CS is held low for the
/// duration of each transfer. The optional reset line defaults to a
/// [`DummyPin`].
pub struct SpiBus<SPI, DC, CS, RST = DummyPin>
where
    SPI: Write<u8> + Transfer<u8>,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
{
    spi: SPI,
    dc: DC,
    cs: CS,
    rst: RST,
}

impl<SPI, DC, CS, PinErr, SpiErr> SpiBus<SPI, DC, CS, DummyPin>
where
    SPI: Write<u8, Error = SpiErr> + Transfer<u8, Error = SpiErr>,
    DC: OutputPin<Error = PinErr>,
    CS: OutputPin<Error = PinErr>,
{
    /// Creates a bus without a reset line.
    pub fn new(spi: SPI, mut dc: DC, mut cs: CS) -> Result<Self, PinErr> {
        cs.set_high()?;
        dc.set_low()?;
        Ok(SpiBus {
            spi,
            dc,
            cs,
            rst: DummyPin,
        })
    }
}

impl<SPI, DC, CS, RST, PinErr, SpiErr> SpiBus<SPI, DC, CS, RST>
where
    SPI: Write<u8, Error = SpiErr> + Transfer<u8, Error = SpiErr>,
    DC: OutputPin<Error = PinErr>,
    CS: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
{
    /// Creates a bus with a reset line and resets the controller.
    ///
    /// Resetting at startup is mandatory, the controller ignores the
    /// initialization sequence otherwise.
    pub fn with_reset<D: DelayMs<u8>>(
        spi: SPI,
        mut dc: DC,
        mut cs: CS,
        rst: RST,
        delay: &mut D,
    ) -> Result<Self, PinErr> {
        cs.set_high()?;
        dc.set_low()?;
        let mut bus = SpiBus { spi, dc, cs, rst };
        bus.reset(delay)?;
        Ok(bus)
    }

    /// Pulses the reset line: low, 50 ms, high, 50 ms.
    ///
    /// [`with_reset`](Self::with_reset) already does this. Run
    /// [`Display::init`](crate::Display::init) afterwards.
    pub fn reset<D: DelayMs<u8>>(&mut self, delay: &mut D) -> Result<(), PinErr> {
        log::debug!("resetting display controller");
        self.rst.set_low()?;
        delay.delay_ms(RESET_DELAY_MS);
        self.rst.set_high()?;
        delay.delay_ms(RESET_DELAY_MS);
        Ok(())
    }
}

impl<SPI, DC, CS, RST, PinErr, SpiErr> SpiBus<SPI, DC, CS, RST>
where
    SPI: Write<u8, Error = SpiErr> + Transfer<u8, Error = SpiErr>,
    DC: OutputPin<Error = PinErr>,
    CS: OutputPin<Error = PinErr>,
    RST: OutputPin,
{
    /// Gives back the SPI peripheral and the pins.
    pub fn release(self) -> (SPI, DC, CS, RST) {
        (self.spi, self.dc, self.cs, self.rst)
    }

    fn send(&mut self, bytes: &[u8]) -> Result<(), SpiBusError<PinErr, SpiErr>> {
        self.cs.set_low().map_err(SpiBusError::Pin)?;
        self.spi.write(bytes).map_err(SpiBusError::Spi)?;
        self.cs.set_high().map_err(SpiBusError::Pin)
    }
}

impl<SPI, DC, CS, RST, PinErr, SpiErr> Bus for SpiBus<SPI, DC, CS, RST>
where
    SPI: Write<u8, Error = SpiErr> + Transfer<u8, Error = SpiErr>,
    DC: OutputPin<Error = PinErr>,
    CS: OutputPin<Error = PinErr>,
    RST: OutputPin,
{
    type Error = SpiBusError<PinErr, SpiErr>;

    fn write(&mut self, command: Option<u8>, data: Option<&[u8]>) -> Result<(), Self::Error> {
        if let Some(command) = command {
            self.dc.set_low().map_err(SpiBusError::Pin)?;
            self.send(&[command])?;
        }
        if let Some(data) = data {
            self.dc.set_high().map_err(SpiBusError::Pin)?;
            self.send(data)?;
        }
        Ok(())
    }

    fn read(&mut self, command: Option<u8>, buffer: &mut [u8]) -> Result<(), Self::Error> {
        self.dc.set_low().map_err(SpiBusError::Pin)?;
        self.cs.set_low().map_err(SpiBusError::Pin)?;
        if let Some(command) = command {
            self.spi.write(&[command]).map_err(SpiBusError::Spi)?;
        }
        for chunk in buffer.chunks_mut(READ_CHUNK_BYTES) {
            let mut scratch = [0u8; READ_CHUNK_BYTES];
            let received = self
                .spi
                .transfer(&mut scratch[..chunk.len()])
                .map_err(SpiBusError::Spi)?;
            for (byte, received) in chunk.iter_mut().zip(received) {
                *byte = *received;
            }
        }
        self.cs.set_high().map_err(SpiBusError::Pin)
    }
}
