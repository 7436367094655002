//! Register definitions and bitfield structures for the DS3232 RTC.
//!
//! This module contains all register addresses, bitfield definitions, and
//! related types for interacting with the DS3232 Real-Time Clock registers.
//! The DS3232 shares the DS3231 timekeeping register layout and adds the
//! battery-backed SRAM block at 0x14 plus the temperature conversion-rate
//! bits in the status register.

use bitfield::bitfield;

/// Number of bytes in the battery-backed SRAM block (addresses 0x14..=0xFF).
pub const NVRAM_SIZE: usize = 236;

/// Register addresses for the DS3232 RTC.
#[allow(unused)]
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegAddr {
    /// Seconds register (0-59)
    Seconds = 0x00,
    /// Minutes register (0-59)
    Minutes = 0x01,
    /// Hours register (1-12 + AM/PM or 0-23)
    Hours = 0x02,
    /// Day of week register (1-7, 1 = Sunday)
    Day = 0x03,
    /// Date register (1-31)
    Date = 0x04,
    /// Month register (1-12)
    Month = 0x05,
    /// Year register (0-99)
    Year = 0x06,
    /// Alarm 1 seconds register
    Alarm1Seconds = 0x07,
    /// Alarm 1 minutes register
    Alarm1Minutes = 0x08,
    /// Alarm 1 hours register
    Alarm1Hours = 0x09,
    /// Alarm 1 day/date register
    Alarm1DayDate = 0x0A,
    /// Alarm 2 minutes register
    Alarm2Minutes = 0x0B,
    /// Alarm 2 hours register
    Alarm2Hours = 0x0C,
    /// Alarm 2 day/date register
    Alarm2DayDate = 0x0D,
    /// Control register
    Control = 0x0E,
    /// Status register
    Status = 0x0F,
    /// Aging offset register
    AgingOffset = 0x10,
    /// Temperature MSB register (signed whole degrees)
    TemperatureMsb = 0x11,
    /// Temperature LSB register (quarter degrees in bits 7:6)
    TemperatureLsb = 0x12,
    /// First byte of the battery-backed SRAM block
    Nvram = 0x14,
}

/// Time representation format for the DS3232.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeRepresentation {
    /// 24-hour format (0-23)
    TwentyFourHour = 0,
    /// 12-hour format (1-12 + AM/PM)
    TwelveHour = 1,
}
impl From<u8> for TimeRepresentation {
    /// Creates a `TimeRepresentation` from a raw register value.
    ///
    /// # Panics
    /// Panics if the value is not 0 or 1.
    fn from(v: u8) -> Self {
        match v {
            0 => TimeRepresentation::TwentyFourHour,
            1 => TimeRepresentation::TwelveHour,
            _ => panic!("Invalid value for TimeRepresentation: {}", v),
        }
    }
}
impl From<TimeRepresentation> for u8 {
    /// Converts a `TimeRepresentation` to its raw register value.
    fn from(v: TimeRepresentation) -> Self {
        v as u8
    }
}

/// Oscillator control for the DS3232 (EOSC, control register bit 7).
///
/// The register bit uses inverted logic: 0 keeps the oscillator running on
/// battery power, 1 stops it. The enum values mirror the bit directly so the
/// raw register state is never misreported.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Oscillator {
    /// Oscillator runs on battery power (bit clear)
    Enabled = 0,
    /// Oscillator stops when the device switches to battery power (bit set)
    Disabled = 1,
}
impl From<u8> for Oscillator {
    /// Creates an `Oscillator` from a raw register value.
    ///
    /// # Panics
    /// Panics if the value is not 0 or 1.
    fn from(v: u8) -> Self {
        match v {
            0 => Oscillator::Enabled,
            1 => Oscillator::Disabled,
            _ => panic!("Invalid value for Oscillator: {}", v),
        }
    }
}
impl From<Oscillator> for u8 {
    /// Converts an `Oscillator` to its raw register value.
    fn from(v: Oscillator) -> Self {
        v as u8
    }
}

/// Interrupt control mode for the DS3232 (INTCN, control register bit 2).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterruptControl {
    /// Output square wave on INT/SQW pin
    SquareWave = 0,
    /// Output alarm interrupt signal on INT/SQW pin
    Interrupt = 1,
}
impl From<u8> for InterruptControl {
    /// Creates an `InterruptControl` from a raw register value.
    ///
    /// # Panics
    /// Panics if the value is not 0 or 1.
    fn from(v: u8) -> Self {
        match v {
            0 => InterruptControl::SquareWave,
            1 => InterruptControl::Interrupt,
            _ => panic!("Invalid value for InterruptControl: {}", v),
        }
    }
}
impl From<InterruptControl> for u8 {
    /// Converts an `InterruptControl` to its raw register value.
    fn from(v: InterruptControl) -> Self {
        v as u8
    }
}

/// Square wave output frequency options (RS2:RS1, control register bits 4:3).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SquareWaveFrequency {
    /// 1 Hz square wave output
    Hz1 = 0b00,
    /// 1.024 kHz square wave output
    Hz1024 = 0b01,
    /// 4.096 kHz square wave output
    Hz4096 = 0b10,
    /// 8.192 kHz square wave output
    Hz8192 = 0b11,
}
impl From<u8> for SquareWaveFrequency {
    /// Creates a `SquareWaveFrequency` from a raw register value.
    ///
    /// # Panics
    /// Panics if the value is not 0b00, 0b01, 0b10, or 0b11.
    fn from(v: u8) -> Self {
        match v {
            0b00 => SquareWaveFrequency::Hz1,
            0b01 => SquareWaveFrequency::Hz1024,
            0b10 => SquareWaveFrequency::Hz4096,
            0b11 => SquareWaveFrequency::Hz8192,
            _ => panic!("Invalid value for SquareWaveFrequency: {}", v),
        }
    }
}
impl From<SquareWaveFrequency> for u8 {
    /// Converts a `SquareWaveFrequency` to its raw register value.
    fn from(v: SquareWaveFrequency) -> Self {
        v as u8
    }
}

/// Temperature conversion rate (CRATE1:CRATE0, status register bits 5:4).
///
/// Selects how often the DS3232 runs a temperature conversion and TCXO
/// compensation cycle while on battery power.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConversionRate {
    /// Convert every 64 seconds
    Seconds64 = 0b00,
    /// Convert every 128 seconds
    Seconds128 = 0b01,
    /// Convert every 256 seconds
    Seconds256 = 0b10,
    /// Convert every 512 seconds
    Seconds512 = 0b11,
}
impl From<u8> for ConversionRate {
    /// Creates a `ConversionRate` from a raw register value.
    ///
    /// # Panics
    /// Panics if the value is not 0b00, 0b01, 0b10, or 0b11.
    fn from(v: u8) -> Self {
        match v {
            0b00 => ConversionRate::Seconds64,
            0b01 => ConversionRate::Seconds128,
            0b10 => ConversionRate::Seconds256,
            0b11 => ConversionRate::Seconds512,
            _ => panic!("Invalid value for ConversionRate: {}", v),
        }
    }
}
impl From<ConversionRate> for u8 {
    /// Converts a `ConversionRate` to its raw register value.
    fn from(v: ConversionRate) -> Self {
        v as u8
    }
}

/// Day/Date select for alarm registers (DY/DT bit).
///
/// This controls whether the alarm day/date register matches against
/// the day of the week or the date of the month.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DayDateSelect {
    /// Match against date of the month (1-31)
    Date = 0,
    /// Match against day of the week (1-7, where 1 = Sunday)
    Day = 1,
}
impl From<u8> for DayDateSelect {
    /// Creates a `DayDateSelect` from a raw register value.
    ///
    /// # Panics
    /// Panics if the value is not 0 or 1.
    fn from(v: u8) -> Self {
        match v {
            0 => DayDateSelect::Date,
            1 => DayDateSelect::Day,
            _ => panic!("Invalid value for DayDateSelect: {}", v),
        }
    }
}
impl From<DayDateSelect> for u8 {
    /// Converts a `DayDateSelect` to its raw register value.
    fn from(v: DayDateSelect) -> Self {
        v as u8
    }
}

/// INT/SQW pin mode.
///
/// The discriminants carry the corresponding control-register bit pattern in
/// bits 2-4 (INTCN and RS2:RS1). Reading the mode back applies the chip's
/// precedence rule: whenever INTCN is set the pin is not producing a square
/// wave, so both [`SqwPinMode::Off`] and [`SqwPinMode::Interrupt`] read back
/// as [`SqwPinMode::Off`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SqwPinMode {
    /// 1 Hz square wave
    Rate1Hz = 0x00,
    /// 1.024 kHz square wave
    Rate1024Hz = 0x08,
    /// 4.096 kHz square wave
    Rate4096Hz = 0x10,
    /// 8.192 kHz square wave
    Rate8192Hz = 0x18,
    /// Alarm interrupt output (INTCN set, frequency bits cleared)
    Interrupt = 0x04,
    /// Square wave disabled (INTCN set, frequency bits set)
    Off = 0x1C,
}

impl SqwPinMode {
    /// The INTCN setting this mode writes to the control register.
    #[must_use]
    pub fn interrupt_control(self) -> InterruptControl {
        match self {
            SqwPinMode::Rate1Hz
            | SqwPinMode::Rate1024Hz
            | SqwPinMode::Rate4096Hz
            | SqwPinMode::Rate8192Hz => InterruptControl::SquareWave,
            SqwPinMode::Interrupt | SqwPinMode::Off => InterruptControl::Interrupt,
        }
    }

    /// The RS2:RS1 setting this mode writes to the control register.
    #[must_use]
    pub fn frequency(self) -> SquareWaveFrequency {
        match self {
            SqwPinMode::Rate1Hz | SqwPinMode::Interrupt => SquareWaveFrequency::Hz1,
            SqwPinMode::Rate1024Hz => SquareWaveFrequency::Hz1024,
            SqwPinMode::Rate4096Hz => SquareWaveFrequency::Hz4096,
            SqwPinMode::Rate8192Hz | SqwPinMode::Off => SquareWaveFrequency::Hz8192,
        }
    }
}

impl From<SqwPinMode> for u8 {
    /// Converts a `SqwPinMode` to its control-register bit pattern (bits 2-4).
    fn from(v: SqwPinMode) -> Self {
        v as u8
    }
}

/// Alarm selector for the flag and interrupt-enable operations.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Alarm {
    /// Alarm 1 (seconds precision)
    One = 1,
    /// Alarm 2 (minute precision)
    Two = 2,
}

// This macro generates the From<u8> and Into<u8> implementations for the
// register type
macro_rules! from_register_u8 {
    ($typ:ty) => {
        impl From<u8> for $typ {
            fn from(v: u8) -> Self {
                paste::paste!([< $typ >](v))
            }
        }
        impl From<$typ> for u8 {
            fn from(v: $typ) -> Self {
                v.0
            }
        }
    };
}

bitfield! {
    /// Seconds register (0-59) with BCD encoding.
    #[derive(Clone, Copy, Default, PartialEq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub struct Seconds(u8);
    impl Debug;
    /// Tens place of seconds (0-5)
    pub ten_seconds, set_ten_seconds: 6, 4;
    /// Ones place of seconds (0-9)
    pub seconds, set_seconds: 3, 0;
}
from_register_u8!(Seconds);

bitfield! {
    /// Minutes register (0-59) with BCD encoding.
    #[derive(Clone, Copy, Default, PartialEq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub struct Minutes(u8);
    impl Debug;
    /// Tens place of minutes (0-5)
    pub ten_minutes, set_ten_minutes: 6, 4;
    /// Ones place of minutes (0-9)
    pub minutes, set_minutes: 3, 0;
}
from_register_u8!(Minutes);

bitfield! {
    /// Hours register with format selection and BCD encoding.
    #[derive(Clone, Copy, Default, PartialEq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub struct Hours(u8);
    impl Debug;
    /// Time representation format (12/24 hour)
    pub from into TimeRepresentation, time_representation, set_time_representation: 6, 6;
    /// PM flag (12-hour) or 20-hour bit (24-hour)
    pub pm_or_twenty_hours, set_pm_or_twenty_hours: 5, 5;
    /// Tens place of hours
    pub ten_hours, set_ten_hours: 4, 4;
    /// Ones place of hours
    pub hours, set_hours: 3, 0;
}
from_register_u8!(Hours);

bitfield! {
    /// Day of week register (1-7, 1 = Sunday).
    #[derive(Clone, Copy, Default, PartialEq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub struct Day(u8);
    impl Debug;
    /// Day of week (1-7)
    pub day, set_day: 2, 0;
}
from_register_u8!(Day);

bitfield! {
    /// Date register (1-31) with BCD encoding.
    #[derive(Clone, Copy, Default, PartialEq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub struct Date(u8);
    impl Debug;
    /// Tens place of date (0-3)
    pub ten_date, set_ten_date: 5, 4;
    /// Ones place of date (0-9)
    pub date, set_date: 3, 0;
}
from_register_u8!(Date);

bitfield! {
    /// Month register (1-12) with century flag and BCD encoding.
    #[derive(Clone, Copy, Default, PartialEq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub struct Month(u8);
    impl Debug;
    /// Century flag (unused by this driver; years are bounded to 2000-2099)
    pub century, set_century: 7;
    /// Tens place of month (0-1)
    pub ten_month, set_ten_month: 4, 4;
    /// Ones place of month (0-9)
    pub month, set_month: 3, 0;
}
from_register_u8!(Month);

bitfield! {
    /// Year register (0-99) with BCD encoding.
    #[derive(Clone, Copy, Default, PartialEq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub struct Year(u8);
    impl Debug;
    /// Tens place of year (0-9)
    pub ten_year, set_ten_year: 7, 4;
    /// Ones place of year (0-9)
    pub year, set_year: 3, 0;
}
from_register_u8!(Year);

bitfield! {
    /// Control register for device configuration.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Control(u8);
    impl Debug;
    /// Oscillator enable/disable control (EOSC, inverted logic)
    pub from into Oscillator, oscillator_enable, set_oscillator_enable: 7, 7;
    /// Enable square wave output on battery power
    pub battery_backed_square_wave, set_battery_backed_square_wave: 6;
    /// Force temperature conversion
    pub convert_temperature, set_convert_temperature: 5;
    /// Square wave output frequency selection
    pub from into SquareWaveFrequency, square_wave_frequency, set_square_wave_frequency: 4, 3;
    /// INT/SQW pin function control
    pub from into InterruptControl, interrupt_control, set_interrupt_control: 2, 2;
    /// Enable alarm 2 interrupt
    pub alarm2_interrupt_enable, set_alarm2_interrupt_enable: 1;
    /// Enable alarm 1 interrupt
    pub alarm1_interrupt_enable, set_alarm1_interrupt_enable: 0;
}
from_register_u8!(Control);

#[cfg(feature = "defmt")]
impl defmt::Format for Control {
    fn format(&self, f: defmt::Formatter) {
        match self.oscillator_enable() {
            Oscillator::Enabled => defmt::write!(f, "Oscillator enabled"),
            Oscillator::Disabled => defmt::write!(f, "Oscillator disabled"),
        }
        if self.battery_backed_square_wave() {
            defmt::write!(f, ", Battery backed square wave enabled");
        }
        if self.convert_temperature() {
            defmt::write!(f, ", Temperature conversion forced");
        }
        match self.square_wave_frequency() {
            SquareWaveFrequency::Hz1 => defmt::write!(f, ", 1 Hz square wave"),
            SquareWaveFrequency::Hz1024 => defmt::write!(f, ", 1024 Hz square wave"),
            SquareWaveFrequency::Hz4096 => defmt::write!(f, ", 4096 Hz square wave"),
            SquareWaveFrequency::Hz8192 => defmt::write!(f, ", 8192 Hz square wave"),
        }
        match self.interrupt_control() {
            InterruptControl::SquareWave => defmt::write!(f, ", Square wave output"),
            InterruptControl::Interrupt => defmt::write!(f, ", Interrupt output"),
        }
        if self.alarm2_interrupt_enable() {
            defmt::write!(f, ", Alarm 2 interrupt enabled");
        }
        if self.alarm1_interrupt_enable() {
            defmt::write!(f, ", Alarm 1 interrupt enabled");
        }
    }
}

bitfield! {
    /// Status register for device state and flags.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Status(u8);
    impl Debug;
    /// Oscillator stop flag
    pub oscillator_stop_flag, set_oscillator_stop_flag: 7;
    /// Enable 32kHz output on battery power
    pub battery_backed_32khz_output, set_battery_backed_32khz_output: 6;
    /// Temperature conversion rate selection
    pub from into ConversionRate, conversion_rate, set_conversion_rate: 5, 4;
    /// Enable 32kHz output
    pub enable_32khz_output, set_enable_32khz_output: 3;
    /// Device busy flag
    pub busy, set_busy: 2;
    /// Alarm 2 triggered flag
    pub alarm2_flag, set_alarm2_flag: 1;
    /// Alarm 1 triggered flag
    pub alarm1_flag, set_alarm1_flag: 0;
}
from_register_u8!(Status);

#[cfg(feature = "defmt")]
impl defmt::Format for Status {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Status(");
        let mut first = true;
        if self.oscillator_stop_flag() {
            defmt::write!(f, "OSF");
            first = false;
        }
        if self.battery_backed_32khz_output() {
            if !first {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "BB32kHz");
            first = false;
        }
        match self.conversion_rate() {
            ConversionRate::Seconds64 => {}
            rate => {
                if !first {
                    defmt::write!(f, ", ");
                }
                defmt::write!(f, "CRATE={}", rate);
                first = false;
            }
        }
        if self.enable_32khz_output() {
            if !first {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "EN32kHz");
            first = false;
        }
        if self.busy() {
            if !first {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "BSY");
            first = false;
        }
        if self.alarm2_flag() {
            if !first {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "A2F");
            first = false;
        }
        if self.alarm1_flag() {
            if !first {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "A1F");
            first = false;
        }
        if first {
            defmt::write!(f, "clear");
        }
        defmt::write!(f, ")");
    }
}

bitfield! {
    /// Aging offset register for oscillator adjustment.
    #[derive(Clone, Copy, Default, PartialEq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub struct AgingOffset(u8);
    impl Debug;
    /// Aging offset value (-128 to +127)
    pub i8, aging_offset, set_aging_offset: 7, 0;
}
from_register_u8!(AgingOffset);

bitfield! {
    /// Temperature register (signed integer part).
    #[derive(Clone, Copy, Default, PartialEq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub struct Temperature(u8);
    impl Debug;
    /// Temperature value (-128 to +127 degrees C)
    pub i8, temperature, set_temperature: 7, 0;
}
from_register_u8!(Temperature);

bitfield! {
    /// Temperature fraction register (quarter degrees in bits 7:6).
    #[derive(Clone, Copy, Default, PartialEq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub struct TemperatureFraction(u8);
    impl Debug;
    /// Temperature fraction in 0.25 degree steps (0-3)
    pub temperature_fraction, set_temperature_fraction: 7, 6;
}
from_register_u8!(TemperatureFraction);

// Alarm register types with mask bits and special control bits

bitfield! {
    /// Alarm Seconds register with mask bit (only used by Alarm 1).
    #[derive(Clone, Copy, Default, PartialEq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub struct AlarmSeconds(u8);
    impl Debug;
    /// Alarm mask bit 1 (A1M1)
    pub alarm_mask1, set_alarm_mask1: 7;
    /// Tens place of seconds (0-5)
    pub ten_seconds, set_ten_seconds: 6, 4;
    /// Ones place of seconds (0-9)
    pub seconds, set_seconds: 3, 0;
}
from_register_u8!(AlarmSeconds);

bitfield! {
    /// Alarm Minutes register with mask bit (used by both alarms).
    #[derive(Clone, Copy, Default, PartialEq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub struct AlarmMinutes(u8);
    impl Debug;
    /// Alarm mask bit 2 (A1M2/A2M2)
    pub alarm_mask2, set_alarm_mask2: 7;
    /// Tens place of minutes (0-5)
    pub ten_minutes, set_ten_minutes: 6, 4;
    /// Ones place of minutes (0-9)
    pub minutes, set_minutes: 3, 0;
}
from_register_u8!(AlarmMinutes);

bitfield! {
    /// Alarm Hours register with mask bit and time format control.
    #[derive(Clone, Copy, Default, PartialEq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub struct AlarmHours(u8);
    impl Debug;
    /// Alarm mask bit 3 (A1M3/A2M3)
    pub alarm_mask3, set_alarm_mask3: 7;
    /// Time representation format (12/24 hour)
    pub from into TimeRepresentation, time_representation, set_time_representation: 6, 6;
    /// PM flag (12-hour) or 20-hour bit (24-hour)
    pub pm_or_twenty_hours, set_pm_or_twenty_hours: 5, 5;
    /// Tens place of hours
    pub ten_hours, set_ten_hours: 4, 4;
    /// Ones place of hours
    pub hours, set_hours: 3, 0;
}
from_register_u8!(AlarmHours);

bitfield! {
    /// Alarm Day/Date register with mask bit and DY/DT control.
    #[derive(Clone, Copy, Default, PartialEq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub struct AlarmDayDate(u8);
    impl Debug;
    /// Alarm mask bit 4 (A1M4/A2M4)
    pub alarm_mask4, set_alarm_mask4: 7;
    /// Day/Date select (1 = day of week, 0 = date of month)
    pub from into DayDateSelect, day_date_select, set_day_date_select: 6, 6;
    /// Tens place of date (0-3) when DY/DT=0, unused when DY/DT=1
    pub ten_date, set_ten_date: 5, 4;
    /// Day of week (1-7) when DY/DT=1, ones place of date when DY/DT=0
    pub day_or_date, set_day_or_date: 3, 0;
}
from_register_u8!(AlarmDayDate);
