//! "Bit bang" SPI over plain GPIO pins.
//!
//! MSB first, SPI mode 0: MOSI is set up while the clock is low and MISO is
//! sampled on the rising edge. Most panels are write-only in practice, pass a
//! [`DummyPin`](crate::dummypins::DummyPin) as MISO for those and every read
//! returns zeros.
//!
//! Use [`BitBangSpi::new`] on slow boards that do not need a delay and
//! [`BitBangSpi::new_with_delay`] on faster ones.

use core::marker::PhantomData;

use hal::blocking::delay::DelayUs;
use hal::blocking::spi::{Transfer, Write};
use hal::digital::v2::{InputPin, OutputPin};

/// "Bit bang" SPI implementation.
pub struct BitBangSpi<ERR, CLK, MOSI, MISO, DELAY> {
    clk: CLK,
    mosi: MOSI,
    miso: MISO,
    delay: DELAY,
    _phantom: PhantomData<ERR>,
}

/// Used to run without delay on a slow enough clock speed.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDelay;

impl DelayUs<u8> for NoDelay {
    #[inline]
    fn delay_us(&mut self, _us: u8) {}
}

impl<ERR, CLK, MOSI, MISO> BitBangSpi<ERR, CLK, MOSI, MISO, NoDelay>
where
    CLK: OutputPin<Error = ERR>,
    MOSI: OutputPin<Error = ERR>,
    MISO: InputPin<Error = ERR>,
{
    /// Constructs a "bit bang" SPI without any delay between clock edges.
    pub fn new(clk: CLK, mosi: MOSI, miso: MISO) -> Result<Self, ERR> {
        Self::new_with_delay(clk, mosi, miso, NoDelay)
    }
}

impl<ERR, CLK, MOSI, MISO, DELAY> BitBangSpi<ERR, CLK, MOSI, MISO, DELAY>
where
    CLK: OutputPin<Error = ERR>,
    MOSI: OutputPin<Error = ERR>,
    MISO: InputPin<Error = ERR>,
    DELAY: DelayUs<u8>,
{
    /// Constructs a "bit bang" SPI waiting one microsecond on every clock
    /// phase. Use this when the MCU toggles pins faster than the controller
    /// can follow.
    pub fn new_with_delay(mut clk: CLK, mosi: MOSI, miso: MISO, delay: DELAY) -> Result<Self, ERR> {
        clk.set_low()?;
        Ok(BitBangSpi {
            clk,
            mosi,
            miso,
            delay,
            _phantom: PhantomData,
        })
    }

    /// Gives back the pins and the delay.
    pub fn release(self) -> (CLK, MOSI, MISO, DELAY) {
        (self.clk, self.mosi, self.miso, self.delay)
    }

    #[inline]
    fn exchange_bit(&mut self, high: bool) -> Result<bool, ERR> {
        if high {
            self.mosi.set_high()?;
        } else {
            self.mosi.set_low()?;
        }
        self.delay.delay_us(1);
        self.clk.set_high()?;
        let sample = self.miso.is_high()?;
        self.delay.delay_us(1);
        self.clk.set_low()?;
        Ok(sample)
    }

    fn exchange_byte(&mut self, mut value: u8) -> Result<u8, ERR> {
        let mut read = 0u8;
        for _ in 0..8 {
            let bit = self.exchange_bit((value & 0x80) == 0x80)?;
            read = (read << 1) | bit as u8;
            value <<= 1;
        }
        Ok(read)
    }
}

impl<ERR, CLK, MOSI, MISO, DELAY> Write<u8> for BitBangSpi<ERR, CLK, MOSI, MISO, DELAY>
where
    CLK: OutputPin<Error = ERR>,
    MOSI: OutputPin<Error = ERR>,
    MISO: InputPin<Error = ERR>,
    DELAY: DelayUs<u8>,
{
    type Error = ERR;

    #[inline]
    fn write(&mut self, words: &[u8]) -> Result<(), ERR> {
        for value in words {
            self.exchange_byte(*value)?;
        }
        Ok(())
    }
}

impl<ERR, CLK, MOSI, MISO, DELAY> Transfer<u8> for BitBangSpi<ERR, CLK, MOSI, MISO, DELAY>
where
    CLK: OutputPin<Error = ERR>,
    MOSI: OutputPin<Error = ERR>,
    MISO: InputPin<Error = ERR>,
    DELAY: DelayUs<u8>,
{
    type Error = ERR;

    fn transfer<'w>(&mut self, words: &'w mut [u8]) -> Result<&'w [u8], ERR> {
        for word in words.iter_mut() {
            *word = self.exchange_byte(*word)?;
        }
        Ok(words)
    }
}
