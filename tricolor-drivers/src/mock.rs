//! Test doubles shared by the driver tests
//!
//! Every pin and delay appends to one shared [`Trace`], so tests can check
//! the exact edge order across lines. The decoders replay a trace the way
//! the receiving chip would see it.

use core::cell::RefCell;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use tricolor_hal::{I2cBus, OutputPin};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    High(&'static str),
    Low(&'static str),
    DelayNs(u32),
}

pub type Trace = RefCell<Vec<Event>>;

pub fn take(trace: &Trace) -> Vec<Event> {
    core::mem::take(&mut *trace.borrow_mut())
}

/// Output pin that records its edges
pub struct MockPin<'a> {
    name: &'static str,
    high: bool,
    trace: &'a Trace,
}

impl<'a> MockPin<'a> {
    pub fn new(name: &'static str, trace: &'a Trace) -> Self {
        Self {
            name,
            high: false,
            trace,
        }
    }
}

impl OutputPin for MockPin<'_> {
    fn set_high(&mut self) {
        self.high = true;
        self.trace.borrow_mut().push(Event::High(self.name));
    }

    fn set_low(&mut self) {
        self.high = false;
        self.trace.borrow_mut().push(Event::Low(self.name));
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

/// Delay that records instead of sleeping
pub struct MockDelay<'a> {
    trace: &'a Trace,
}

impl<'a> MockDelay<'a> {
    pub fn new(trace: &'a Trace) -> Self {
        Self { trace }
    }
}

impl DelayNs for MockDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        self.trace.borrow_mut().push(Event::DelayNs(ns));
    }
}

/// TM1637 receiver: start/stop framing and LSB-first bytes
///
/// Start is DIO falling while CLK is high, stop is DIO rising while CLK is
/// high. Bits are sampled on CLK rising edges; the ninth edge of each
/// byte is the acknowledge slot.
pub fn decode_tm1637(events: &[Event]) -> Vec<Vec<u8>> {
    let mut frames = Vec::new();
    let mut current: Option<Vec<u8>> = None;
    let (mut clk, mut dio) = (true, true);
    let (mut byte, mut bit) = (0u8, 0u8);

    for event in events {
        match *event {
            Event::Low("dio") => {
                if clk && dio {
                    current = Some(Vec::new());
                    byte = 0;
                    bit = 0;
                }
                dio = false;
            }
            Event::High("dio") => {
                if clk && !dio {
                    if let Some(frame) = current.take() {
                        frames.push(frame);
                    }
                }
                dio = true;
            }
            Event::High("clk") => {
                clk = true;
                if let Some(frame) = current.as_mut() {
                    if bit < 8 {
                        byte |= (dio as u8) << bit;
                        bit += 1;
                    } else {
                        frame.push(byte);
                        byte = 0;
                        bit = 0;
                    }
                }
            }
            Event::Low("clk") => clk = false,
            _ => {}
        }
    }

    frames
}

/// 74HC595 model: shift on clock rise, copy to outputs on latch rise
#[derive(Debug, Default)]
pub struct Hc595 {
    shift: u8,
    pub outputs: u8,
    data: bool,
}

impl Hc595 {
    pub fn feed(&mut self, event: Event) {
        match event {
            Event::High("data") => self.data = true,
            Event::Low("data") => self.data = false,
            Event::High("clock") => self.shift = (self.shift << 1) | self.data as u8,
            Event::High("latch") => self.outputs = self.shift,
            _ => {}
        }
    }

    /// Outputs Q7 down to Q0
    pub fn output_bits(&self) -> [u8; 8] {
        let mut bits = [0; 8];
        for (i, bit) in bits.iter_mut().enumerate() {
            *bit = (self.outputs >> (7 - i)) & 1;
        }
        bits
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockI2cError {
    Nack,
    Bus,
}

/// I2C bus with one register-file device behind it
pub struct MockI2c {
    pub address: u8,
    pub registers: [u8; 19],
    pub writes: Vec<Vec<u8>>,
    pub fail: bool,
}

impl MockI2c {
    pub fn new(address: u8) -> Self {
        Self {
            address,
            registers: [0; 19],
            writes: Vec::new(),
            fail: false,
        }
    }

    fn check(&self, address: u8) -> Result<(), MockI2cError> {
        if self.fail {
            return Err(MockI2cError::Bus);
        }
        if address != self.address {
            return Err(MockI2cError::Nack);
        }
        Ok(())
    }
}

impl I2cBus for MockI2c {
    type Error = MockI2cError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.check(address)?;
        self.writes.push(data.to_vec());
        if let Some((&pointer, payload)) = data.split_first() {
            let start = pointer as usize;
            self.registers[start..start + payload.len()].copy_from_slice(payload);
        }
        Ok(())
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.check(address)?;
        let start = write_data.first().copied().unwrap_or(0) as usize;
        read_buf.copy_from_slice(&self.registers[start..start + read_buf.len()]);
        Ok(())
    }
}
