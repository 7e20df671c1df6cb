//! TM1637 seven-segment display driver
//!
//! The TM1637 speaks a two-wire protocol that looks like I2C but is not:
//! no device address, bytes go LSB first, and the acknowledge bit is
//! clocked but never read. Both lines are driven push-pull by the MCU.
//!
//! # Frames
//!
//! ```text
//! start:  DIO low, CLK low
//! byte:   8 x (DIO = bit, CLK high, CLK low), then one ack clock
//! stop:   CLK low, DIO low, CLK high, DIO high
//! ```
//!
//! Every edge is followed by a [`BIT_DELAY_US`] pause except the final
//! DIO rise of a stop.
//!
//! # Commands
//!
//! - `0x40`: data command, auto-increment addressing
//! - `0xC0 | n`: set start address `n` (0-5)
//! - `0x88 | b`: display on at brightness `b` (0-7); `0x88` alone is
//!   used for "off" at power-up

use embedded_hal::delay::DelayNs;
use tricolor_core::segments::{self, SegmentPattern, Segments, MAX_DIGITS};
use tricolor_core::traits::SegmentDisplay;
use tricolor_hal::OutputPin;

/// Pause after each line transition
pub const BIT_DELAY_US: u32 = 10;

/// Data command: write with auto-increment
const CMD_DATA: u8 = 0x40;
/// Address command base
const CMD_ADDRESS: u8 = 0xC0;
/// Display control with the on bit set
const CMD_DISPLAY_ON: u8 = 0x88;

const BRIGHTNESS_MASK: u8 = 0x07;
const MAX_POSITION: u8 = MAX_DIGITS as u8 - 1;

/// TM1637 on two output pins
pub struct Tm1637<CLK, DIO, D> {
    clk: CLK,
    dio: DIO,
    delay: D,
    /// Brightness level 0-7
    brightness: u8,
}

impl<CLK, DIO, D> Tm1637<CLK, DIO, D>
where
    CLK: OutputPin,
    DIO: OutputPin,
    D: DelayNs,
{
    /// Take the pins and park both lines high (bus idle)
    ///
    /// Nothing is sent to the chip until [`init`](Self::init).
    pub fn new(clk: CLK, dio: DIO, delay: D) -> Self {
        let mut display = Self {
            clk,
            dio,
            delay,
            brightness: BRIGHTNESS_MASK,
        };
        display.dio.set_high();
        display.clk.set_high();
        display
    }

    /// Reset brightness to maximum and blank the display
    pub fn init(&mut self) {
        self.brightness = BRIGHTNESS_MASK;
        self.turn_off();
    }

    /// Display on at the stored brightness
    pub fn turn_on(&mut self) {
        self.write_command(CMD_DISPLAY_ON | self.brightness);
    }

    /// Send the bare display-control command
    pub fn turn_off(&mut self) {
        self.write_command(CMD_DISPLAY_ON);
    }

    /// Store a new brightness (masked to 0-7) and apply it
    pub fn set_brightness(&mut self, level: u8) {
        self.brightness = level & BRIGHTNESS_MASK;
        self.turn_on();
    }

    /// Current brightness level
    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Write segment patterns starting at digit `position`
    ///
    /// `position` is clamped to the last address. Patterns that would land
    /// past it are dropped.
    pub fn write(&mut self, segments: &[SegmentPattern], position: u8) {
        let position = position.min(MAX_POSITION);
        let room = usize::from(MAX_POSITION - position) + 1;

        self.write_command(CMD_DATA);

        self.start();
        self.write_byte(CMD_ADDRESS | position);
        for &segment in segments.iter().take(room) {
            self.write_byte(segment);
        }
        self.stop();

        self.turn_on();
    }

    /// Pattern for a hex digit
    pub fn encode_digit(&self, value: u8) -> SegmentPattern {
        segments::encode_digit(value)
    }

    /// Patterns for a string of digits; anything else is blank
    pub fn encode_string(&self, text: &str) -> Segments {
        segments::encode_string(text)
    }

    fn pause(&mut self) {
        self.delay.delay_us(BIT_DELAY_US);
    }

    fn start(&mut self) {
        self.dio.set_low();
        self.pause();
        self.clk.set_low();
        self.pause();
    }

    fn stop(&mut self) {
        self.clk.set_low();
        self.pause();
        self.dio.set_low();
        self.pause();
        self.clk.set_high();
        self.pause();
        self.dio.set_high();
    }

    fn write_byte(&mut self, byte: u8) {
        for bit in 0..8 {
            self.dio.set_state((byte >> bit) & 1 != 0);
            self.clk.set_high();
            self.pause();
            self.clk.set_low();
            self.pause();
        }
        // Ack slot, not sampled
        self.clk.set_high();
        self.pause();
        self.clk.set_low();
        self.pause();
    }

    fn write_command(&mut self, command: u8) {
        self.start();
        self.write_byte(command);
        self.stop();
    }
}

impl<CLK, DIO, D> SegmentDisplay for Tm1637<CLK, DIO, D>
where
    CLK: OutputPin,
    DIO: OutputPin,
    D: DelayNs,
{
    fn write(&mut self, segments: &[SegmentPattern], position: u8) {
        Tm1637::write(self, segments, position);
    }
}
