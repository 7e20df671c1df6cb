//! 74HC595 serial-in/parallel-out channel
//!
//! Bits are shifted MSB first and sampled on the rising edge of the shift
//! clock. The parallel outputs only change on the rising edge of the
//! latch, so a half-shifted value is never visible on the LEDs.
//!
//! No delays are inserted; GPIO writes are slower than the chip's setup
//! and hold times.

use tricolor_core::traits::ShiftRegister;
use tricolor_hal::OutputPin;

/// One shift-register channel on three output pins
pub struct SipoChannel<L, C, D> {
    latch: L,
    clock: C,
    data: D,
}

impl<L, C, D> SipoChannel<L, C, D>
where
    L: OutputPin,
    C: OutputPin,
    D: OutputPin,
{
    pub fn new(latch: L, clock: C, data: D) -> Self {
        Self { latch, clock, data }
    }

    /// Give the pins back
    pub fn release(self) -> (L, C, D) {
        (self.latch, self.clock, self.data)
    }
}

impl<L, C, D> ShiftRegister for SipoChannel<L, C, D>
where
    L: OutputPin,
    C: OutputPin,
    D: OutputPin,
{
    fn update(&mut self, value: u8) {
        self.latch.set_low();
        for bit in (0..8).rev() {
            self.clock.set_low();
            self.data.set_state((value >> bit) & 1 != 0);
            self.clock.set_high();
        }
        self.latch.set_high();
    }
}
