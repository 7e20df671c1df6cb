//! Shift register channel trait

/// One serial-in/parallel-out channel
///
/// Writes have no acknowledgement and cannot fail.
pub trait ShiftRegister {
    /// Shift `value` in and present it on the parallel outputs
    fn update(&mut self, value: u8);
}

impl<S: ShiftRegister + ?Sized> ShiftRegister for &mut S {
    fn update(&mut self, value: u8) {
        (**self).update(value);
    }
}

/// Drive every channel to zero, in order
///
/// Used when a field's active color changes so the channels being
/// deactivated do not keep showing a stale value.
pub fn reset_channels<S: ShiftRegister>(channels: &mut [S]) {
    for channel in channels.iter_mut() {
        channel.update(0);
    }
}
