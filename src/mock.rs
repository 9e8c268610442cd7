//! Test doubles: a simulated controller behind the [`Bus`] trait and
//! recording `embedded_hal` pins, SPI and delays.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::vec::Vec;

use hal::blocking::delay::{DelayMs, DelayUs};
use hal::blocking::spi::{Transfer, Write};
use hal::digital::v2::{InputPin, OutputPin};

use crate::backend::Bus;
use crate::codec::rgb;
use crate::controller::{Controller, InitStep};

pub const CASET: u8 = 0x2a;
pub const PASET: u8 = 0x2b;
pub const RAMWR: u8 = 0x2c;
pub const RAMRD: u8 = 0x2e;

/// Profile of the simulated panel.
#[derive(Debug)]
pub struct Panel;

impl Controller for Panel {
    const COLUMN_SET: Option<u8> = Some(CASET);
    const PAGE_SET: Option<u8> = Some(PASET);
    const RAM_WRITE: Option<u8> = Some(RAMWR);
    const RAM_READ: Option<u8> = Some(RAMRD);
    const INIT: &'static [InitStep] = &[
        (Some(0x01), None),
        (Some(0x3a), Some(&[0x55])),
        (None, Some(&[0xaa, 0xbb])),
    ];
}

/// Profile without any commands.
#[derive(Debug)]
pub struct Unconfigured;

impl Controller for Unconfigured {}

/// One recorded bus call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub command: Option<u8>,
    pub data: Option<Vec<u8>>,
    pub read: Option<usize>,
}

impl Transaction {
    pub fn write(command: Option<u8>, data: Option<&[u8]>) -> Self {
        Transaction {
            command,
            data: data.map(<[u8]>::to_vec),
            read: None,
        }
    }

    pub fn read(command: Option<u8>, count: usize) -> Self {
        Transaction {
            command,
            data: None,
            read: Some(count),
        }
    }
}

/// Controller simulation: understands the window commands, keeps the written
/// pixels in `canvas` and records every call in `log`.
#[derive(Debug)]
pub struct FakePanel {
    pub width: u16,
    pub height: u16,
    pub canvas: Vec<u16>,
    pub log: Vec<Transaction>,
    /// Number of calls that succeed before every further call fails.
    pub fail_after: Option<usize>,
    columns: (u16, u16),
    pages: (u16, u16),
    cursor: (u16, u16),
    writing: bool,
}

impl FakePanel {
    pub fn new(width: u16, height: u16) -> Self {
        FakePanel {
            width,
            height,
            canvas: vec![0; width as usize * height as usize],
            log: Vec::new(),
            fail_after: None,
            columns: (0, 0),
            pages: (0, 0),
            cursor: (0, 0),
            writing: false,
        }
    }

    pub fn pixel(&self, x: u16, y: u16) -> u16 {
        self.canvas[y as usize * self.width as usize + x as usize]
    }

    fn check_failure(&mut self) -> Result<(), &'static str> {
        match self.fail_after {
            Some(0) => Err("bus failure"),
            Some(n) => {
                self.fail_after = Some(n - 1);
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn decode_pair(data: Option<&[u8]>) -> (u16, u16) {
        let data = data.expect("window command without coordinates");
        (
            u16::from_be_bytes([data[0], data[1]]),
            u16::from_be_bytes([data[2], data[3]]),
        )
    }

    fn start_memory_access(&mut self) {
        self.cursor = (self.columns.0, self.pages.0);
    }

    fn advance(&mut self) {
        let (x, y) = self.cursor;
        self.cursor = if x >= self.columns.1 {
            (self.columns.0, y + 1)
        } else {
            (x + 1, y)
        };
    }

    fn index(&self) -> Option<usize> {
        let (x, y) = self.cursor;
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    fn stream(&mut self, data: &[u8]) {
        for pixel in data.chunks_exact(2) {
            if let Some(index) = self.index() {
                self.canvas[index] = u16::from_be_bytes([pixel[0], pixel[1]]);
            }
            self.advance();
        }
    }
}

impl Bus for FakePanel {
    type Error = &'static str;

    fn write(&mut self, command: Option<u8>, data: Option<&[u8]>) -> Result<(), Self::Error> {
        self.check_failure()?;
        self.log.push(Transaction::write(command, data));

        match command {
            Some(CASET) => {
                self.writing = false;
                self.columns = Self::decode_pair(data);
            }
            Some(PASET) => {
                self.writing = false;
                self.pages = Self::decode_pair(data);
            }
            Some(RAMWR) => {
                self.writing = true;
                self.start_memory_access();
            }
            Some(_) => self.writing = false,
            None => {}
        }
        if let (true, Some(data)) = (self.writing, data) {
            self.stream(data);
        }
        Ok(())
    }

    fn read(&mut self, command: Option<u8>, buffer: &mut [u8]) -> Result<(), Self::Error> {
        self.check_failure()?;
        self.log.push(Transaction::read(command, buffer.len()));

        self.writing = false;
        if command == Some(RAMRD) {
            self.start_memory_access();
            for sample in buffer.chunks_exact_mut(3) {
                let color = self.index().map(|index| self.canvas[index]).unwrap_or(0);
                let (r, g, b) = rgb(color);
                sample.copy_from_slice(&[r, g, b]);
                self.advance();
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Pin(&'static str, bool),
    Spi(Vec<u8>),
    Transfer(usize),
    DelayMs(u32),
    DelayUs(u32),
}

#[derive(Debug, Default)]
struct WireState {
    events: Vec<Event>,
    miso: VecDeque<u8>,
    inputs: HashMap<&'static str, VecDeque<bool>>,
    failing: HashSet<&'static str>,
}

/// Shared recorder for the pins, SPI and delays handed out by it.
#[derive(Debug, Default, Clone)]
pub struct Wire(Rc<RefCell<WireState>>);

impl Wire {
    pub fn pin(&self, name: &'static str) -> MockPin {
        MockPin {
            name,
            wire: self.clone(),
        }
    }

    pub fn input(&self, name: &'static str) -> MockPin {
        self.pin(name)
    }

    pub fn spi(&self) -> MockSpi {
        MockSpi(self.clone())
    }

    pub fn delay(&self) -> MockDelay {
        MockDelay(self.clone())
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().events.clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().events.clear();
    }

    /// Bytes returned by SPI transfers.
    pub fn queue_miso(&self, bytes: &[u8]) {
        self.0.borrow_mut().miso.extend(bytes.iter().copied());
    }

    /// Levels returned by the input pin `name`, MSB first.
    pub fn queue_input(&self, name: &'static str, bytes: &[u8]) {
        let mut state = self.0.borrow_mut();
        let queue = state.inputs.entry(name).or_default();
        for byte in bytes {
            for bit in (0..8).rev() {
                queue.push_back((*byte >> bit) & 1 == 1);
            }
        }
    }

    pub fn fail_pin(&self, name: &'static str) {
        self.0.borrow_mut().failing.insert(name);
    }

    fn record(&self, event: Event) {
        self.0.borrow_mut().events.push(event);
    }
}

pub struct MockPin {
    name: &'static str,
    wire: Wire,
}

impl MockPin {
    fn set(&mut self, level: bool) -> Result<(), ()> {
        if self.wire.0.borrow().failing.contains(self.name) {
            return Err(());
        }
        self.wire.record(Event::Pin(self.name, level));
        Ok(())
    }

    fn sample(&self) -> bool {
        let mut state = self.wire.0.borrow_mut();
        state
            .inputs
            .get_mut(self.name)
            .and_then(VecDeque::pop_front)
            .unwrap_or(false)
    }
}

impl OutputPin for MockPin {
    type Error = ();

    fn set_low(&mut self) -> Result<(), ()> {
        self.set(false)
    }

    fn set_high(&mut self) -> Result<(), ()> {
        self.set(true)
    }
}

impl InputPin for MockPin {
    type Error = ();

    fn is_high(&self) -> Result<bool, ()> {
        Ok(self.sample())
    }

    fn is_low(&self) -> Result<bool, ()> {
        Ok(!self.sample())
    }
}

pub struct MockSpi(Wire);

impl Write<u8> for MockSpi {
    type Error = ();

    fn write(&mut self, words: &[u8]) -> Result<(), ()> {
        self.0.record(Event::Spi(words.to_vec()));
        Ok(())
    }
}

impl Transfer<u8> for MockSpi {
    type Error = ();

    fn transfer<'w>(&mut self, words: &'w mut [u8]) -> Result<&'w [u8], ()> {
        self.0.record(Event::Transfer(words.len()));
        let mut state = (self.0).0.borrow_mut();
        for word in words.iter_mut() {
            *word = state.miso.pop_front().unwrap_or(0);
        }
        Ok(words)
    }
}

pub struct MockDelay(Wire);

impl DelayMs<u8> for MockDelay {
    fn delay_ms(&mut self, ms: u8) {
        self.0.record(Event::DelayMs(ms.into()));
    }
}

impl DelayUs<u8> for MockDelay {
    fn delay_us(&mut self, us: u8) {
        self.0.record(Event::DelayUs(us.into()));
    }
}
