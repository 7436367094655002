//! Alarm configuration utilities for the DS3232 RTC.
//!
//! The DS3232 matches each alarm against a subset of the time fields; which
//! fields participate is selected by the mask bits stored in bit 7 of the
//! alarm registers and the DY/DT bit of the day/date register. This module
//! provides the mode tags that name the useful mask combinations and the
//! register images built from a `NaiveDateTime` plus a mode.
//!
//! # Alarm modes
//!
//! ## Alarm 1 (seconds precision)
//! - `EverySecond` - triggers once per second
//! - `AtSeconds` - triggers when seconds match
//! - `AtMinutesSeconds` - triggers when minutes:seconds match
//! - `AtTime` - triggers when hours:minutes:seconds match (daily)
//! - `AtTimeOnDate` - triggers at a time on a date of the month
//! - `AtTimeOnDay` - triggers at a time on a day of the week
//!
//! ## Alarm 2 (minute precision, fires at 00 seconds)
//! - `EveryMinute` - triggers once per minute
//! - `AtMinutes` - triggers when minutes match
//! - `AtTime` - triggers when hours:minutes match (daily)
//! - `AtTimeOnDate` - triggers at a time on a date of the month
//! - `AtTimeOnDay` - triggers at a time on a day of the week

use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::{
    datetime::{DS3232DateTime, DS3232DateTimeError},
    AlarmDayDate, AlarmHours, AlarmMinutes, AlarmSeconds, DayDateSelect, TimeRepresentation,
};

/// Alarm 1 match mode.
///
/// The discriminant carries the mask-bit pattern: bits 0-3 are A1M1..A1M4
/// (a set bit masks the corresponding field out of the comparison) and bit 4
/// is the DY/DT selector (set = compare day of week, clear = date of month).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Alarm1Mode {
    /// Trigger every second (all fields masked)
    EverySecond = 0x0F,
    /// Trigger when seconds match
    AtSeconds = 0x0E,
    /// Trigger when minutes and seconds match
    AtMinutesSeconds = 0x0C,
    /// Trigger when hours, minutes and seconds match (daily alarm)
    AtTime = 0x08,
    /// Trigger at a time on a specific date of the month
    AtTimeOnDate = 0x00,
    /// Trigger at a time on a specific day of the week
    AtTimeOnDay = 0x10,
}

impl Alarm1Mode {
    /// A1M1: true when the seconds field is excluded from the match.
    #[must_use]
    pub fn seconds_masked(self) -> bool {
        (self as u8) & 0x01 != 0
    }

    /// A1M2: true when the minutes field is excluded from the match.
    #[must_use]
    pub fn minutes_masked(self) -> bool {
        (self as u8) & 0x02 != 0
    }

    /// A1M3: true when the hours field is excluded from the match.
    #[must_use]
    pub fn hours_masked(self) -> bool {
        (self as u8) & 0x04 != 0
    }

    /// A1M4: true when the day/date field is excluded from the match.
    #[must_use]
    pub fn day_date_masked(self) -> bool {
        (self as u8) & 0x08 != 0
    }

    /// DY/DT: whether the day/date register compares a weekday or a date.
    #[must_use]
    pub fn day_date_select(self) -> DayDateSelect {
        if (self as u8) & 0x10 != 0 {
            DayDateSelect::Day
        } else {
            DayDateSelect::Date
        }
    }
}

/// Alarm 2 match mode.
///
/// Alarm 2 has no seconds register and always fires at 00 seconds of the
/// matching minute. The discriminant carries the mask-bit pattern: bits 0-2
/// are A2M2..A2M4 and bit 3 is the DY/DT selector.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Alarm2Mode {
    /// Trigger every minute (all fields masked)
    EveryMinute = 0x07,
    /// Trigger when minutes match
    AtMinutes = 0x06,
    /// Trigger when hours and minutes match (daily alarm)
    AtTime = 0x04,
    /// Trigger at a time on a specific date of the month
    AtTimeOnDate = 0x00,
    /// Trigger at a time on a specific day of the week
    AtTimeOnDay = 0x08,
}

impl Alarm2Mode {
    /// A2M2: true when the minutes field is excluded from the match.
    #[must_use]
    pub fn minutes_masked(self) -> bool {
        (self as u8) & 0x01 != 0
    }

    /// A2M3: true when the hours field is excluded from the match.
    #[must_use]
    pub fn hours_masked(self) -> bool {
        (self as u8) & 0x02 != 0
    }

    /// A2M4: true when the day/date field is excluded from the match.
    #[must_use]
    pub fn day_date_masked(self) -> bool {
        (self as u8) & 0x04 != 0
    }

    /// DY/DT: whether the day/date register compares a weekday or a date.
    #[must_use]
    pub fn day_date_select(self) -> DayDateSelect {
        if (self as u8) & 0x08 != 0 {
            DayDateSelect::Day
        } else {
            DayDateSelect::Date
        }
    }
}

/// Builds the day/date alarm register from the datetime, honoring DY/DT.
///
/// The field value is always encoded, even when A1M4/A2M4 masks it out of the
/// comparison, matching what the chip stores.
fn convert_day_date(
    datetime: &NaiveDateTime,
    select: DayDateSelect,
    masked: bool,
) -> Result<AlarmDayDate, DS3232DateTimeError> {
    let mut value = AlarmDayDate::default();
    value.set_alarm_mask4(masked);
    value.set_day_date_select(select);
    match select {
        DayDateSelect::Day => {
            // Weekday register encoding is 1-7 with 1 = Sunday.
            let day = u8::try_from(datetime.weekday().num_days_from_sunday() + 1)
                .map_err(|_| DS3232DateTimeError::InvalidDateTime)?;
            value.set_day_or_date(day);
        }
        DayDateSelect::Date => {
            let (ones, tens) = DS3232DateTime::make_bcd(datetime.day(), 31)?;
            value.set_day_or_date(ones);
            value.set_ten_date(tens);
        }
    }
    Ok(value)
}

/// Internal representation of the DS3232 Alarm 1 registers (0x07-0x0A).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DS3232Alarm1 {
    seconds: AlarmSeconds,
    minutes: AlarmMinutes,
    hours: AlarmHours,
    day_date: AlarmDayDate,
}

impl DS3232Alarm1 {
    /// Builds the Alarm 1 register image for `datetime` matched per `mode`.
    ///
    /// All time fields are encoded from the datetime; the mode only controls
    /// the mask and DY/DT bits.
    ///
    /// # Errors
    ///
    /// Returns an error if a datetime field cannot be encoded as BCD.
    pub fn from_datetime(
        datetime: &NaiveDateTime,
        mode: Alarm1Mode,
        time_representation: TimeRepresentation,
    ) -> Result<Self, DS3232DateTimeError> {
        let (sec_ones, sec_tens) = DS3232DateTime::make_bcd(datetime.second(), 59)?;
        let mut seconds = AlarmSeconds::default();
        seconds.set_seconds(sec_ones);
        seconds.set_ten_seconds(sec_tens);
        seconds.set_alarm_mask1(mode.seconds_masked());

        let (min_ones, min_tens) = DS3232DateTime::make_bcd(datetime.minute(), 59)?;
        let mut minutes = AlarmMinutes::default();
        minutes.set_minutes(min_ones);
        minutes.set_ten_minutes(min_tens);
        minutes.set_alarm_mask2(mode.minutes_masked());

        let hour_reg = DS3232DateTime::convert_hours(datetime.hour(), time_representation)?;
        let mut hours = AlarmHours::from(u8::from(hour_reg));
        hours.set_alarm_mask3(mode.hours_masked());

        let day_date = convert_day_date(datetime, mode.day_date_select(), mode.day_date_masked())?;

        Ok(DS3232Alarm1 {
            seconds,
            minutes,
            hours,
            day_date,
        })
    }

    /// Gets the alarm seconds register
    #[must_use]
    pub fn seconds(&self) -> AlarmSeconds {
        self.seconds
    }

    /// Gets the alarm minutes register
    #[must_use]
    pub fn minutes(&self) -> AlarmMinutes {
        self.minutes
    }

    /// Gets the alarm hours register
    #[must_use]
    pub fn hours(&self) -> AlarmHours {
        self.hours
    }

    /// Gets the alarm day/date register
    #[must_use]
    pub fn day_date(&self) -> AlarmDayDate {
        self.day_date
    }
}

impl From<&DS3232Alarm1> for [u8; 4] {
    fn from(alarm: &DS3232Alarm1) -> [u8; 4] {
        [
            alarm.seconds.0,
            alarm.minutes.0,
            alarm.hours.0,
            alarm.day_date.0,
        ]
    }
}

/// Internal representation of the DS3232 Alarm 2 registers (0x0B-0x0D).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DS3232Alarm2 {
    minutes: AlarmMinutes,
    hours: AlarmHours,
    day_date: AlarmDayDate,
}

impl DS3232Alarm2 {
    /// Builds the Alarm 2 register image for `datetime` matched per `mode`.
    ///
    /// # Errors
    ///
    /// Returns an error if a datetime field cannot be encoded as BCD.
    pub fn from_datetime(
        datetime: &NaiveDateTime,
        mode: Alarm2Mode,
        time_representation: TimeRepresentation,
    ) -> Result<Self, DS3232DateTimeError> {
        let (min_ones, min_tens) = DS3232DateTime::make_bcd(datetime.minute(), 59)?;
        let mut minutes = AlarmMinutes::default();
        minutes.set_minutes(min_ones);
        minutes.set_ten_minutes(min_tens);
        minutes.set_alarm_mask2(mode.minutes_masked());

        let hour_reg = DS3232DateTime::convert_hours(datetime.hour(), time_representation)?;
        let mut hours = AlarmHours::from(u8::from(hour_reg));
        hours.set_alarm_mask3(mode.hours_masked());

        let day_date = convert_day_date(datetime, mode.day_date_select(), mode.day_date_masked())?;

        Ok(DS3232Alarm2 {
            minutes,
            hours,
            day_date,
        })
    }

    /// Gets the alarm minutes register
    #[must_use]
    pub fn minutes(&self) -> AlarmMinutes {
        self.minutes
    }

    /// Gets the alarm hours register
    #[must_use]
    pub fn hours(&self) -> AlarmHours {
        self.hours
    }

    /// Gets the alarm day/date register
    #[must_use]
    pub fn day_date(&self) -> AlarmDayDate {
        self.day_date
    }
}

impl From<&DS3232Alarm2> for [u8; 3] {
    fn from(alarm: &DS3232Alarm2) -> [u8; 3] {
        [alarm.minutes.0, alarm.hours.0, alarm.day_date.0]
    }
}
