//! Board assembly
//!
//! Turns a validated [`ClockConfig`] into concrete drivers. Embassy tasks
//! cannot be generic, so the full controller type is spelled out here.

use embassy_rp::peripherals::I2C0;
use embassy_time::Delay;
use tricolor_core::config::{ChannelPins, ClockConfig};
use tricolor_core::cycle::{ChannelBank, ColorCycleController};
use tricolor_drivers::{Ds3231, SipoChannel, Tm1637};
use tricolor_hal_rp2040::{PinBank, PinError, RpI2c, RpOutput};

use crate::observer::DefmtObserver;

pub type Pin = RpOutput<'static>;
pub type Channel = SipoChannel<Pin, Pin, Pin>;
pub type Display = Tm1637<Pin, Pin, Delay>;
pub type Rtc = Ds3231<RpI2c<'static, I2C0>>;
pub type Clock = ColorCycleController<Rtc, Channel, Display, DefmtObserver>;

fn output(bank: &mut PinBank, pin: u8) -> Result<Pin, PinError> {
    Ok(RpOutput::new(bank.take(pin)?))
}

fn channel(bank: &mut PinBank, pins: &ChannelPins) -> Result<Channel, PinError> {
    Ok(SipoChannel::new(
        output(bank, pins.latch)?,
        output(bank, pins.clock)?,
        output(bank, pins.data)?,
    ))
}

/// Claim the display pins, then reset it and apply the configured brightness
pub fn display(bank: &mut PinBank, config: &ClockConfig) -> Result<Display, PinError> {
    let clk = output(bank, config.display.clk)?;
    let dio = output(bank, config.display.dio)?;

    let mut display = Tm1637::new(clk, dio, Delay);
    display.init();
    display.set_brightness(config.display.brightness);
    Ok(display)
}

/// Claim all seven shift-register channels
pub fn channels(bank: &mut PinBank, config: &ClockConfig) -> Result<ChannelBank<Channel>, PinError> {
    Ok(ChannelBank {
        hours: [
            channel(bank, &config.hours[0])?,
            channel(bank, &config.hours[1])?,
            channel(bank, &config.hours[2])?,
        ],
        minutes: [
            channel(bank, &config.minutes[0])?,
            channel(bank, &config.minutes[1])?,
            channel(bank, &config.minutes[2])?,
        ],
        seconds: channel(bank, &config.seconds)?,
    })
}

/// Build the controller and clear every LED left on by a previous run
pub fn clock(rtc: Rtc, bank: &mut PinBank, config: &ClockConfig) -> Result<Clock, PinError> {
    let display = display(bank, config)?;
    let channels = channels(bank, config)?;

    let mut clock = ColorCycleController::with_observer(rtc, channels, display, DefmtObserver::default());
    clock.reset_all();
    Ok(clock)
}
