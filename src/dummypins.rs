//! # Placeholder pin
//!
//! Stands in wherever a signal line is required by a constructor but not wired
//! up on the board: a reset line tied to VCC, a chip select tied to ground, or
//! the MISO line of a write-only [`BitBangSpi`](crate::bitbang::BitBangSpi).
//!
//! It accepts every operation and always reads as low.

use hal::digital::v2::{InputPin, OutputPin, StatefulOutputPin, ToggleableOutputPin};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DummyPin;

impl OutputPin for DummyPin {
    type Error = core::convert::Infallible;

    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl StatefulOutputPin for DummyPin {
    fn is_set_high(&self) -> Result<bool, Self::Error> {
        Ok(false)
    }

    fn is_set_low(&self) -> Result<bool, Self::Error> {
        Ok(true)
    }
}

impl ToggleableOutputPin for DummyPin {
    type Error = core::convert::Infallible;

    fn toggle(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl InputPin for DummyPin {
    type Error = core::convert::Infallible;

    fn is_high(&self) -> Result<bool, Self::Error> {
        Ok(false)
    }

    fn is_low(&self) -> Result<bool, Self::Error> {
        Ok(true)
    }
}
