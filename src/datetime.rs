//! `DateTime` conversion and register utilities for the DS3232 RTC.
//!
//! This module provides the internal representation and conversion logic for
//! the DS3232's date and time registers. It enables safe, validated conversion
//! between the DS3232's BCD-encoded registers and chrono's `NaiveDateTime`.
//!
//! # Register Model
//!
//! The DS3232 stores date and time in 7 consecutive registers:
//! - Seconds, Minutes, Hours, Day, Date, Month, Year
//!
//! The day register holds the day of the week as 1-7 with 1 = Sunday; the
//! year register holds the offset from 2000 (the chip's century bit is not
//! used, so representable years are 2000-2099).
//!
//! # Error Handling
//!
//! Conversion errors are reported via [`DS3232DateTimeError`].

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::{Date, Day, Hours, Minutes, Month, Seconds, TimeRepresentation, Year};

/// Internal representation of the DS3232 RTC date and time.
///
/// This struct models the 7 date/time registers of the DS3232, using
/// strongly-typed bitfield wrappers for each field. It is used for
/// register-level I/O and conversion to/from chrono's `NaiveDateTime`.
///
/// Values are always validated and encoded/decoded as BCD.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct DS3232DateTime {
    seconds: Seconds,
    minutes: Minutes,
    hours: Hours,
    day: Day,
    date: Date,
    month: Month,
    year: Year,
}

impl DS3232DateTime {
    /// Helper function to split a number into BCD digits with validation
    pub(crate) fn make_bcd(value: u32, max_value: u32) -> Result<(u8, u8), DS3232DateTimeError> {
        if value > max_value {
            return Err(DS3232DateTimeError::InvalidDateTime);
        }
        let ones = u8::try_from(value % 10).map_err(|_| DS3232DateTimeError::InvalidDateTime)?;
        let tens = u8::try_from(value / 10).map_err(|_| DS3232DateTimeError::InvalidDateTime)?;
        Ok((ones, tens))
    }

    fn convert_seconds(seconds: u32) -> Result<Seconds, DS3232DateTimeError> {
        let (ones, tens) = Self::make_bcd(seconds, 59)?;
        let mut value = Seconds::default();
        value.set_seconds(ones);
        value.set_ten_seconds(tens);
        Ok(value)
    }

    fn convert_minutes(minutes: u32) -> Result<Minutes, DS3232DateTimeError> {
        let (ones, tens) = Self::make_bcd(minutes, 59)?;
        let mut value = Minutes::default();
        value.set_minutes(ones);
        value.set_ten_minutes(tens);
        Ok(value)
    }

    pub(crate) fn convert_hours(
        hour: u32,
        time_representation: TimeRepresentation,
    ) -> Result<Hours, DS3232DateTimeError> {
        if hour > 23 {
            return Err(DS3232DateTimeError::InvalidDateTime);
        }
        let mut value = Hours::default();
        value.set_time_representation(time_representation);

        match time_representation {
            TimeRepresentation::TwentyFourHour => {
                let ones =
                    u8::try_from(hour % 10).map_err(|_| DS3232DateTimeError::InvalidDateTime)?;
                let ten_hours = u8::from((10..20).contains(&hour));
                let twenty_hours = u8::from(hour >= 20);
                value.set_hours(ones);
                value.set_ten_hours(ten_hours);
                value.set_pm_or_twenty_hours(twenty_hours);
            }
            TimeRepresentation::TwelveHour => {
                let (hour12, is_pm) = match hour {
                    0 => (12, false),             // 12 AM
                    1..=11 => (hour, false),      // 1-11 AM
                    12 => (12, true),             // 12 PM
                    13..=23 => (hour - 12, true), // 1-11 PM
                    _ => unreachable!(),          // Already checked h <= 23
                };
                let ones =
                    u8::try_from(hour12 % 10).map_err(|_| DS3232DateTimeError::InvalidDateTime)?;
                let tens =
                    u8::try_from(hour12 / 10).map_err(|_| DS3232DateTimeError::InvalidDateTime)?;
                value.set_hours(ones);
                value.set_ten_hours(tens);
                value.set_pm_or_twenty_hours(u8::from(is_pm));
            }
        }
        Ok(value)
    }

    /// Converts chrono's Sunday-based weekday index (0-6) to the register
    /// encoding 1-7 with 1 = Sunday.
    pub(crate) fn convert_day(days_from_sunday: u32) -> Result<Day, DS3232DateTimeError> {
        if days_from_sunday > 6 {
            return Err(DS3232DateTimeError::InvalidDateTime);
        }
        let mut value = Day::default();
        value.set_day(
            u8::try_from(days_from_sunday + 1).map_err(|_| DS3232DateTimeError::InvalidDateTime)?,
        );
        Ok(value)
    }

    fn convert_date(date: u32) -> Result<Date, DS3232DateTimeError> {
        let (ones, tens) = Self::make_bcd(date, 31)?;
        let mut value = Date::default();
        value.set_date(ones);
        value.set_ten_date(tens);
        Ok(value)
    }

    fn convert_month(month: u32) -> Result<Month, DS3232DateTimeError> {
        let (ones, tens) = Self::make_bcd(month, 12)?;
        let mut value = Month::default();
        value.set_month(ones);
        value.set_ten_month(tens);
        Ok(value)
    }

    fn convert_year(year: i32) -> Result<Year, DS3232DateTimeError> {
        if year > 2099 {
            error!("Year {} is too late! must be before 2100", year);
            return Err(DS3232DateTimeError::YearNotBefore2100);
        }
        if year < 2000 {
            error!("Year {} is too early! must be greater than 1999", year);
            return Err(DS3232DateTimeError::YearNotAfter1999);
        }

        let year_offset =
            u8::try_from(year - 2000).map_err(|_| DS3232DateTimeError::InvalidDateTime)?;
        let ones = year_offset % 10;
        let tens = year_offset / 10;

        let mut value = Year::default();
        value.set_year(ones);
        value.set_ten_year(tens);
        Ok(value)
    }

    pub(crate) fn from_datetime(
        datetime: &NaiveDateTime,
        time_representation: TimeRepresentation,
    ) -> Result<Self, DS3232DateTimeError> {
        let seconds = Self::convert_seconds(datetime.second())?;
        let minutes = Self::convert_minutes(datetime.minute())?;
        let hours = Self::convert_hours(datetime.hour(), time_representation)?;
        let day = Self::convert_day(datetime.weekday().num_days_from_sunday())?;
        let date = Self::convert_date(datetime.day())?;
        let month = Self::convert_month(datetime.month())?;
        let year = Self::convert_year(datetime.year())?;

        let raw = DS3232DateTime {
            seconds,
            minutes,
            hours,
            day,
            date,
            month,
            year,
        };

        debug!("raw={:?}", raw);

        Ok(raw)
    }

    pub(crate) fn into_datetime(self) -> Result<NaiveDateTime, DS3232DateTimeError> {
        let seconds: u32 =
            10 * u32::from(self.seconds.ten_seconds()) + u32::from(self.seconds.seconds());
        let minutes =
            10 * u32::from(self.minutes.ten_minutes()) + u32::from(self.minutes.minutes());
        let hours = 10 * u32::from(self.hours.ten_hours()) + u32::from(self.hours.hours());
        let hours = match self.hours.time_representation() {
            TimeRepresentation::TwentyFourHour => {
                hours + 20 * u32::from(self.hours.pm_or_twenty_hours())
            }
            TimeRepresentation::TwelveHour => {
                let is_pm = self.hours.pm_or_twenty_hours() != 0;
                match (hours, is_pm) {
                    (12, false) => 0,    // 12 AM = 0:xx
                    (12, true) => 12,    // 12 PM = 12:xx
                    (h, false) => h,     // 1-11 AM = 1-11:xx
                    (h, true) => h + 12, // 1-11 PM = 13-23:xx
                }
            }
        };
        debug!(
            "raw_hour={:?} h={} m={} s={}",
            self.hours, hours, minutes, seconds
        );

        let year_offset = 10 * u32::from(self.year.ten_year()) + u32::from(self.year.year());
        let year = 2000_i32
            + i32::try_from(year_offset).map_err(|_| DS3232DateTimeError::InvalidDateTime)?;
        let month = 10 * u32::from(self.month.ten_month()) + u32::from(self.month.month());
        let date = 10 * u32::from(self.date.ten_date()) + u32::from(self.date.date());

        // Validate the date components before creating NaiveDateTime
        NaiveDate::from_ymd_opt(year, month, date)
            .and_then(|d| d.and_hms_opt(hours, minutes, seconds))
            .ok_or(DS3232DateTimeError::InvalidDateTime)
    }
}

impl From<[u8; 7]> for DS3232DateTime {
    fn from(data: [u8; 7]) -> Self {
        DS3232DateTime {
            seconds: Seconds(data[0]),
            minutes: Minutes(data[1]),
            hours: Hours(data[2]),
            day: Day(data[3]),
            date: Date(data[4]),
            month: Month(data[5]),
            year: Year(data[6]),
        }
    }
}

impl From<&DS3232DateTime> for [u8; 7] {
    fn from(dt: &DS3232DateTime) -> [u8; 7] {
        [
            dt.seconds.0,
            dt.minutes.0,
            dt.hours.0,
            dt.day.0,
            dt.date.0,
            dt.month.0,
            dt.year.0,
        ]
    }
}

/// Errors that can occur during DS3232 date/time conversion or validation.
#[derive(Debug, PartialEq)]
pub enum DS3232DateTimeError {
    /// The provided or decoded date/time is invalid (e.g., out of range, not representable)
    InvalidDateTime,
    /// The year is not before 2100 (the DS3232 year register holds 2000-2099)
    YearNotBefore2100,
    /// The year is not after 1999 (the DS3232 year register holds 2000-2099)
    YearNotAfter1999,
}
