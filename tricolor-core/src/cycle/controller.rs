//! Color cycle controller
//!
//! One [`ColorCycleController::tick`] per second:
//!
//! 1. Read the RTC; on failure report it and leave every output alone
//! 2. Compute the hour and minute colors
//! 3. Zero a whole bank when its color changed since the last tick
//! 4. Write seconds, then the active minute channel, then the active hour
//!    channel
//! 5. Show `HHMM` on the segment display
//!
//! The last colors start unset, so the first tick always clears both banks.

use core::fmt::Write;

use heapless::String;

use crate::color::{ColorIndex, COLOR_COUNT};
use crate::segments::{encode_string, MAX_DIGITS};
use crate::time::Time;
use crate::traits::{
    reset_channels, NoopObserver, RealTimeClock, SegmentDisplay, ShiftRegister, TickObserver,
};

/// The seven shift-register channels, grouped by field
pub struct ChannelBank<S> {
    /// Hour channels, indexed by [`ColorIndex::index`]
    pub hours: [S; COLOR_COUNT],
    /// Minute channels, indexed by [`ColorIndex::index`]
    pub minutes: [S; COLOR_COUNT],
    /// Seconds channel (red only)
    pub seconds: S,
}

/// Outcome of a successful tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    /// Time read from the RTC
    pub time: Time,
    /// Active hour channel
    pub hour_color: ColorIndex,
    /// Active minute channel
    pub minute_color: ColorIndex,
    /// Hour bank was zeroed this tick
    pub hours_reset: bool,
    /// Minute bank was zeroed this tick
    pub minutes_reset: bool,
}

/// Per-second orchestration of the RTC, LED banks and segment display
pub struct ColorCycleController<R, S, D, O = NoopObserver> {
    rtc: R,
    channels: ChannelBank<S>,
    display: D,
    observer: O,
    last_hour_color: Option<ColorIndex>,
    last_minute_color: Option<ColorIndex>,
}

impl<R, S, D> ColorCycleController<R, S, D, NoopObserver>
where
    R: RealTimeClock,
    S: ShiftRegister,
    D: SegmentDisplay,
{
    /// Create a controller that reports to nobody
    pub fn new(rtc: R, channels: ChannelBank<S>, display: D) -> Self {
        Self::with_observer(rtc, channels, display, NoopObserver)
    }
}

impl<R, S, D, O> ColorCycleController<R, S, D, O>
where
    R: RealTimeClock,
    S: ShiftRegister,
    D: SegmentDisplay,
    O: TickObserver<R::Error>,
{
    /// Create a controller with an observer for tick reports
    pub fn with_observer(rtc: R, channels: ChannelBank<S>, display: D, observer: O) -> Self {
        Self {
            rtc,
            channels,
            display,
            observer,
            last_hour_color: None,
            last_minute_color: None,
        }
    }

    /// Zero all seven channels
    ///
    /// Run once at power-up so LEDs left lit by a previous run go dark.
    pub fn reset_all(&mut self) {
        reset_channels(&mut self.channels.hours);
        reset_channels(&mut self.channels.minutes);
        self.channels.seconds.update(0);
    }

    /// Run one tick
    ///
    /// A failed RTC read is reported to the observer and returned; nothing
    /// is written and the color state is kept for the next attempt.
    pub fn tick(&mut self) -> Result<TickReport, R::Error> {
        let time = match self.rtc.read_time() {
            Ok(time) => time,
            Err(e) => {
                self.observer.on_read_error(&e);
                return Err(e);
            }
        };

        let hour_color = ColorIndex::for_hour(time.hour);
        let minute_color = ColorIndex::for_minute(time.minute);

        let hours_reset = self.last_hour_color != Some(hour_color);
        if hours_reset {
            reset_channels(&mut self.channels.hours);
            self.last_hour_color = Some(hour_color);
        }

        let minutes_reset = self.last_minute_color != Some(minute_color);
        if minutes_reset {
            reset_channels(&mut self.channels.minutes);
            self.last_minute_color = Some(minute_color);
        }

        self.channels.seconds.update(time.second);
        self.channels.minutes[minute_color.index()].update(time.minute);
        self.channels.hours[hour_color.index()].update(time.hour);

        let mut text: String<MAX_DIGITS> = String::new();
        // Two digits each; RTC masking keeps both fields below 100
        let _ = write!(text, "{:02}{:02}", time.hour, time.minute);
        self.display.write(&encode_string(&text), 0);

        let report = TickReport {
            time,
            hour_color,
            minute_color,
            hours_reset,
            minutes_reset,
        };
        self.observer.on_tick(&report);

        Ok(report)
    }

    /// Hour color written on the last successful tick
    pub fn last_hour_color(&self) -> Option<ColorIndex> {
        self.last_hour_color
    }

    /// Minute color written on the last successful tick
    pub fn last_minute_color(&self) -> Option<ColorIndex> {
        self.last_minute_color
    }

    /// Access the RTC
    pub fn rtc_mut(&mut self) -> &mut R {
        &mut self.rtc
    }

    /// Access the observer
    pub fn observer(&self) -> &O {
        &self.observer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::RefCell;
    use heapless::Vec;

    use crate::segments::{encode_digit, SegmentPattern, Segments};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Channel {
        Hour(usize),
        Minute(usize),
        Second,
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Event {
        Shift(Channel, u8),
        Display(Segments, u8),
    }

    type Log = RefCell<Vec<Event, 64>>;

    struct FakeChannel<'a> {
        channel: Channel,
        log: &'a Log,
    }

    impl ShiftRegister for FakeChannel<'_> {
        fn update(&mut self, value: u8) {
            self.log
                .borrow_mut()
                .push(Event::Shift(self.channel, value))
                .unwrap();
        }
    }

    struct FakeDisplay<'a> {
        log: &'a Log,
    }

    impl SegmentDisplay for FakeDisplay<'_> {
        fn write(&mut self, segments: &[SegmentPattern], position: u8) {
            let segs = Segments::from_slice(segments).unwrap();
            self.log
                .borrow_mut()
                .push(Event::Display(segs, position))
                .unwrap();
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct BusError;

    struct FakeRtc {
        next: Result<Time, BusError>,
    }

    impl RealTimeClock for FakeRtc {
        type Error = BusError;

        fn read_time(&mut self) -> Result<Time, BusError> {
            self.next
        }

        fn write_time(&mut self, time: &Time) -> Result<(), BusError> {
            self.next = Ok(*time);
            Ok(())
        }
    }

    #[derive(Default)]
    struct CountingObserver {
        ticks: u32,
        errors: u32,
        last: Option<TickReport>,
    }

    impl TickObserver<BusError> for CountingObserver {
        fn on_tick(&mut self, report: &TickReport) {
            self.ticks += 1;
            self.last = Some(*report);
        }

        fn on_read_error(&mut self, _error: &BusError) {
            self.errors += 1;
        }
    }

    fn at(hour: u8, minute: u8, second: u8) -> Time {
        Time {
            year: 2024,
            month: 8,
            date: 4,
            weekday: 1,
            hour,
            minute,
            second,
        }
    }

    fn bank(log: &Log) -> ChannelBank<FakeChannel<'_>> {
        let ch = |channel| FakeChannel { channel, log };
        ChannelBank {
            hours: [ch(Channel::Hour(0)), ch(Channel::Hour(1)), ch(Channel::Hour(2))],
            minutes: [
                ch(Channel::Minute(0)),
                ch(Channel::Minute(1)),
                ch(Channel::Minute(2)),
            ],
            seconds: ch(Channel::Second),
        }
    }

    fn controller(
        log: &Log,
        time: Time,
    ) -> ColorCycleController<FakeRtc, FakeChannel<'_>, FakeDisplay<'_>, CountingObserver> {
        ColorCycleController::with_observer(
            FakeRtc { next: Ok(time) },
            bank(log),
            FakeDisplay { log },
            CountingObserver::default(),
        )
    }

    fn display(text: &str) -> Event {
        Event::Display(encode_string(text), 0)
    }

    fn take(log: &Log) -> Vec<Event, 64> {
        core::mem::take(&mut *log.borrow_mut())
    }

    #[test]
    fn test_first_tick_resets_both_banks() {
        let log = Log::default();
        let mut ctl = controller(&log, at(17, 36, 0));

        let report = ctl.tick().unwrap();
        assert_eq!(report.hour_color.index(), 2);
        assert_eq!(report.minute_color.index(), 1);
        assert!(report.hours_reset);
        assert!(report.minutes_reset);

        let expected = [
            Event::Shift(Channel::Hour(0), 0),
            Event::Shift(Channel::Hour(1), 0),
            Event::Shift(Channel::Hour(2), 0),
            Event::Shift(Channel::Minute(0), 0),
            Event::Shift(Channel::Minute(1), 0),
            Event::Shift(Channel::Minute(2), 0),
            Event::Shift(Channel::Second, 0),
            Event::Shift(Channel::Minute(1), 36),
            Event::Shift(Channel::Hour(2), 17),
            display("1736"),
        ];
        assert_eq!(take(&log).as_slice(), &expected);
    }

    #[test]
    fn test_first_tick_resets_even_for_red() {
        // Color 0 on both banks must still trigger the initial reset
        let log = Log::default();
        let mut ctl = controller(&log, at(0, 0, 0));

        ctl.tick().unwrap();
        let events = take(&log);
        let hour_resets = events
            .iter()
            .filter(|e| matches!(e, Event::Shift(Channel::Hour(_), 0)))
            .count();
        // Three resets plus the active write of hour 0
        assert_eq!(hour_resets, 4);
        assert_eq!(events[0], Event::Shift(Channel::Hour(0), 0));
        assert_eq!(events[8], Event::Shift(Channel::Hour(0), 0));
    }

    #[test]
    fn test_steady_tick_skips_reset() {
        let log = Log::default();
        let mut ctl = controller(&log, at(17, 36, 0));
        ctl.tick().unwrap();
        take(&log);

        ctl.rtc_mut().next = Ok(at(17, 36, 1));
        let report = ctl.tick().unwrap();
        assert!(!report.hours_reset);
        assert!(!report.minutes_reset);

        let expected = [
            Event::Shift(Channel::Second, 1),
            Event::Shift(Channel::Minute(1), 36),
            Event::Shift(Channel::Hour(2), 17),
            display("1736"),
        ];
        assert_eq!(take(&log).as_slice(), &expected);
    }

    #[test]
    fn test_midnight_rollover_resets_hours_first() {
        let log = Log::default();
        let mut ctl = controller(&log, at(23, 59, 59));
        ctl.tick().unwrap();
        assert_eq!(ctl.last_hour_color(), Some(ColorIndex::Blue));
        take(&log);

        ctl.rtc_mut().next = Ok(at(0, 0, 0));
        ctl.tick().unwrap();

        let expected = [
            Event::Shift(Channel::Hour(0), 0),
            Event::Shift(Channel::Hour(1), 0),
            Event::Shift(Channel::Hour(2), 0),
            Event::Shift(Channel::Minute(0), 0),
            Event::Shift(Channel::Minute(1), 0),
            Event::Shift(Channel::Minute(2), 0),
            Event::Shift(Channel::Second, 0),
            Event::Shift(Channel::Minute(0), 0),
            Event::Shift(Channel::Hour(0), 0),
            display("0000"),
        ];
        assert_eq!(take(&log).as_slice(), &expected);
        assert_eq!(ctl.last_hour_color(), Some(ColorIndex::Red));
    }

    #[test]
    fn test_minute_rotation_only_resets_minutes() {
        let log = Log::default();
        let mut ctl = controller(&log, at(9, 19, 59));
        ctl.tick().unwrap();
        take(&log);

        ctl.rtc_mut().next = Ok(at(9, 20, 0));
        let report = ctl.tick().unwrap();
        assert!(!report.hours_reset);
        assert!(report.minutes_reset);

        let expected = [
            Event::Shift(Channel::Minute(0), 0),
            Event::Shift(Channel::Minute(1), 0),
            Event::Shift(Channel::Minute(2), 0),
            Event::Shift(Channel::Second, 0),
            Event::Shift(Channel::Minute(1), 20),
            Event::Shift(Channel::Hour(0), 9),
            display("0920"),
        ];
        assert_eq!(take(&log).as_slice(), &expected);
    }

    #[test]
    fn test_read_error_skips_outputs() {
        let log = Log::default();
        let mut ctl = controller(&log, at(17, 36, 0));
        ctl.tick().unwrap();
        take(&log);

        ctl.rtc_mut().next = Err(BusError);
        assert_eq!(ctl.tick(), Err(BusError));
        assert!(take(&log).is_empty());
        assert_eq!(ctl.observer().errors, 1);
        assert_eq!(ctl.last_hour_color(), Some(ColorIndex::Blue));
        assert_eq!(ctl.last_minute_color(), Some(ColorIndex::Green));

        // Next tick resumes without a spurious reset
        ctl.rtc_mut().next = Ok(at(17, 36, 2));
        let report = ctl.tick().unwrap();
        assert!(!report.hours_reset);
        assert_eq!(ctl.observer().ticks, 2);
    }

    #[test]
    fn test_read_error_before_first_tick_keeps_unset() {
        let log = Log::default();
        let mut ctl = controller(&log, at(17, 36, 0));
        ctl.rtc_mut().next = Err(BusError);

        assert!(ctl.tick().is_err());
        assert_eq!(ctl.last_hour_color(), None);
        assert_eq!(ctl.last_minute_color(), None);
    }

    #[test]
    fn test_observer_gets_report() {
        let log = Log::default();
        let mut ctl = controller(&log, at(17, 36, 0));

        let report = ctl.tick().unwrap();
        assert_eq!(ctl.observer().ticks, 1);
        assert_eq!(ctl.observer().last, Some(report));
        assert_eq!(report.time, at(17, 36, 0));
    }

    #[test]
    fn test_reset_all_zeroes_every_channel() {
        let log = Log::default();
        let mut ctl = controller(&log, at(17, 36, 0));

        ctl.reset_all();

        let expected = [
            Event::Shift(Channel::Hour(0), 0),
            Event::Shift(Channel::Hour(1), 0),
            Event::Shift(Channel::Hour(2), 0),
            Event::Shift(Channel::Minute(0), 0),
            Event::Shift(Channel::Minute(1), 0),
            Event::Shift(Channel::Minute(2), 0),
            Event::Shift(Channel::Second, 0),
        ];
        assert_eq!(take(&log).as_slice(), &expected);
        // Power-up reset does not count as a color transition
        assert_eq!(ctl.last_hour_color(), None);
    }

    #[test]
    fn test_display_zero_pads() {
        let log = Log::default();
        let mut ctl = controller(&log, at(7, 5, 0));
        ctl.tick().unwrap();

        let events = take(&log);
        let expected = Event::Display(
            Segments::from_slice(&[
                encode_digit(0),
                encode_digit(7),
                encode_digit(0),
                encode_digit(5),
            ])
            .unwrap(),
            0,
        );
        assert_eq!(events.last(), Some(&expected));
    }

    #[test]
    fn test_noop_observer_constructor() {
        let log = Log::default();
        let mut ctl = ColorCycleController::new(
            FakeRtc {
                next: Ok(at(12, 0, 0)),
            },
            bank(&log),
            FakeDisplay { log: &log },
        );
        assert!(ctl.tick().is_ok());
    }
}
