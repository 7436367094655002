//! A platform-agnostic driver for the DS3232 real-time clock.
//!
//! The DS3232 is an I2C RTC with an integrated temperature-compensated
//! crystal oscillator, two programmable alarms, a configurable square-wave /
//! interrupt output pin, a temperature sensor, and 236 bytes of
//! battery-backed SRAM. This crate talks to it through the
//! [`embedded-hal`](https://docs.rs/embedded-hal) 1.0 `I2c` trait (or
//! `embedded-hal-async` with the `async` feature, see [`asynch`]).
//!
//! Dates and times are `chrono::NaiveDateTime` values; the representable
//! range is years 2000-2099.
//!
//! # Example
//!
//! ```rust,ignore
//! use ds3232::{Alarm1Mode, DS3232, SqwPinMode};
//!
//! let mut rtc = DS3232::new(i2c);
//! if rtc.lost_power()? {
//!     rtc.set_datetime(&build_datetime)?;
//! }
//! let now = rtc.datetime()?;
//!
//! // Alarms require the pin in interrupt mode first.
//! rtc.set_sqw_pin_mode(SqwPinMode::Interrupt)?;
//! rtc.set_alarm1(&wakeup, Alarm1Mode::AtTime)?;
//! ```
//!
//! # Features
//!
//! - `async`: async driver in the [`asynch`] module via `embedded-hal-async`
//! - `log`: internal debug logging through the `log` crate
//! - `defmt`: `defmt::Format` implementations on the public types

#![no_std]

#[cfg(all(feature = "defmt", feature = "log"))]
compile_error!("the `defmt` and `log` features are mutually exclusive");

// Logging shims; without the `log` feature they compile to nothing but the
// arguments still type-check.
#[cfg(feature = "log")]
macro_rules! debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}
#[cfg(not(feature = "log"))]
macro_rules! debug {
    ($($arg:tt)*) => {{
        let _ = ($($arg)*);
    }};
}

#[cfg(feature = "log")]
macro_rules! error {
    ($($arg:tt)*) => { log::error!($($arg)*) };
}
#[cfg(not(feature = "log"))]
macro_rules! error {
    ($($arg:tt)*) => {{
        let _ = ($($arg)*);
    }};
}

mod alarm;
pub(crate) mod datetime;
mod registers;

#[cfg(feature = "async")]
pub mod asynch;

pub use alarm::{Alarm1Mode, Alarm2Mode, DS3232Alarm1, DS3232Alarm2};
pub use datetime::DS3232DateTimeError;
pub use registers::*;

use chrono::NaiveDateTime;
use datetime::DS3232DateTime;
use embedded_hal::i2c::{I2c, Operation};

/// Fixed 7-bit I2C address of the DS3232.
pub const DEVICE_ADDRESS: u8 = 0x68;

/// Device configuration applied by [`DS3232::configure`].
pub struct Config {
    /// 12-hour or 24-hour encoding for the hours registers
    pub time_representation: TimeRepresentation,
    /// Square wave output frequency (RS2:RS1)
    pub square_wave_frequency: SquareWaveFrequency,
    /// INT/SQW pin function (INTCN)
    pub interrupt_control: InterruptControl,
    /// Keep the square wave running on battery power (BBSQW)
    pub battery_backed_square_wave: bool,
    /// Oscillator behavior on battery power (EOSC)
    pub oscillator_enable: Oscillator,
}

/// Errors returned by the DS3232 driver.
#[derive(Debug)]
pub enum DS3232Error<I2CE> {
    /// I2C bus error
    I2c(I2CE),
    /// Date/time conversion error
    DateTime(DS3232DateTimeError),
    /// NVRAM address and length fall outside the 236-byte SRAM region
    NvramOutOfRange,
}

impl<I2CE> From<I2CE> for DS3232Error<I2CE> {
    fn from(e: I2CE) -> Self {
        DS3232Error::I2c(e)
    }
}

// Generates the typed get/set accessor pair for one register.
macro_rules! set_and_get_register {
    ($(($name:ident, $regaddr:expr, $typ:ty)),+ $(,)?) => {
        $(
            paste::paste! {
                #[doc = concat!("Gets the value of the ", stringify!($name), " register.")]
                ///
                /// # Errors
                /// Returns an error if the I2C transaction fails.
                pub fn $name(&mut self) -> Result<$typ, DS3232Error<I2C::Error>> {
                    let mut data = [0];
                    self.i2c
                        .write_read(self.address, &[$regaddr as u8], &mut data)?;
                    Ok(<$typ>::from(data[0]))
                }

                #[doc = concat!("Sets the value of the ", stringify!($name), " register.")]
                ///
                /// # Errors
                /// Returns an error if the I2C transaction fails.
                pub fn [<set_ $name>](&mut self, value: $typ) -> Result<(), DS3232Error<I2C::Error>> {
                    self.i2c
                        .write(self.address, &[$regaddr as u8, value.into()])?;
                    Ok(())
                }
            }
        )+
    }
}

/// DS3232 Real-Time Clock driver.
///
/// Owns the I2C bus handle for its lifetime; all operations are blocking and
/// issue one or two bus transactions. Use [`DS3232::release`] to get the bus
/// back.
pub struct DS3232<I2C: I2c> {
    i2c: I2C,
    address: u8,
    time_representation: TimeRepresentation,
}

impl<I2C: I2c> DS3232<I2C> {
    /// Creates a new driver bound to the DS3232's fixed bus address.
    ///
    /// The device defaults to 24-hour time representation until
    /// [`DS3232::configure`] says otherwise.
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            address: DEVICE_ADDRESS,
            time_representation: TimeRepresentation::TwentyFourHour,
        }
    }

    /// Checks whether the device answers on the bus.
    ///
    /// Issues a status register read and reports success as presence.
    pub fn probe(&mut self) -> bool {
        let mut data = [0];
        self.i2c
            .write_read(self.address, &[RegAddr::Status as u8], &mut data)
            .is_ok()
    }

    /// Releases the underlying I2C bus handle.
    #[must_use]
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Configures the device according to the provided configuration.
    ///
    /// # Errors
    /// Returns an error if an I2C transaction fails.
    pub fn configure(&mut self, config: &Config) -> Result<(), DS3232Error<I2C::Error>> {
        let mut control = self.control()?;
        control.set_oscillator_enable(config.oscillator_enable);
        control.set_battery_backed_square_wave(config.battery_backed_square_wave);
        control.set_square_wave_frequency(config.square_wave_frequency);
        control.set_interrupt_control(config.interrupt_control);
        debug!("control: {:?}", control);
        self.set_control(control)?;

        let mut hours = self.hour()?;
        hours.set_time_representation(config.time_representation);
        self.set_hour(hours)?;
        self.time_representation = config.time_representation;
        Ok(())
    }

    fn read_raw_datetime(&mut self) -> Result<DS3232DateTime, DS3232Error<I2C::Error>> {
        let mut data = [0; 7];
        self.i2c
            .write_read(self.address, &[RegAddr::Seconds as u8], &mut data)?;
        Ok(data.into())
    }

    fn write_raw_datetime(
        &mut self,
        datetime: &DS3232DateTime,
    ) -> Result<(), DS3232Error<I2C::Error>> {
        let data: [u8; 7] = datetime.into();
        self.i2c.write(
            self.address,
            &[
                RegAddr::Seconds as u8,
                data[0],
                data[1],
                data[2],
                data[3],
                data[4],
                data[5],
                data[6],
            ],
        )?;
        Ok(())
    }

    /// Gets the current date and time.
    ///
    /// Reads all seven time registers in one transaction so the value is a
    /// consistent snapshot.
    ///
    /// # Errors
    /// Returns an error if the I2C transaction fails or the registers hold an
    /// invalid date/time.
    pub fn datetime(&mut self) -> Result<NaiveDateTime, DS3232Error<I2C::Error>> {
        let raw = self.read_raw_datetime()?;
        raw.into_datetime().map_err(DS3232Error::DateTime)
    }

    /// Sets the date and time and clears the oscillator stop flag.
    ///
    /// All seven time registers are written in one transaction so the chip
    /// never observes a partially-updated time. Because this restarts valid
    /// timekeeping, the oscillator stop flag is cleared as a side effect;
    /// callers using [`DS3232::lost_power`] to detect an unset clock must
    /// check it before calling this.
    ///
    /// # Errors
    /// Returns an error if an I2C transaction fails or the datetime is
    /// outside the representable range (years 2000-2099).
    pub fn set_datetime(&mut self, datetime: &NaiveDateTime) -> Result<(), DS3232Error<I2C::Error>> {
        let raw = DS3232DateTime::from_datetime(datetime, self.time_representation)
            .map_err(DS3232Error::DateTime)?;
        self.write_raw_datetime(&raw)?;

        let mut status = self.status()?;
        status.set_oscillator_stop_flag(false);
        self.set_status(status)?;
        Ok(())
    }

    /// Checks whether the oscillator stopped since the flag was last cleared.
    ///
    /// The flag is set on first power-up and whenever the oscillator halts
    /// (e.g. power loss with a drained battery), so a true result means the
    /// timekeeping data cannot be trusted.
    ///
    /// # Errors
    /// Returns an error if the I2C transaction fails.
    pub fn lost_power(&mut self) -> Result<bool, DS3232Error<I2C::Error>> {
        Ok(self.status()?.oscillator_stop_flag())
    }

    /// Clears the oscillator stop flag without touching the time registers.
    ///
    /// # Errors
    /// Returns an error if an I2C transaction fails.
    pub fn clear_oscillator_stop_flag(&mut self) -> Result<(), DS3232Error<I2C::Error>> {
        let mut status = self.status()?;
        status.set_oscillator_stop_flag(false);
        self.set_status(status)?;
        Ok(())
    }

    /// Reads the INT/SQW pin mode.
    ///
    /// INTCN takes precedence: when it is set the pin is not producing a
    /// square wave regardless of the frequency bits, and this reports
    /// [`SqwPinMode::Off`].
    ///
    /// # Errors
    /// Returns an error if the I2C transaction fails.
    pub fn sqw_pin_mode(&mut self) -> Result<SqwPinMode, DS3232Error<I2C::Error>> {
        let control = self.control()?;
        if control.interrupt_control() == InterruptControl::Interrupt {
            return Ok(SqwPinMode::Off);
        }
        Ok(match control.square_wave_frequency() {
            SquareWaveFrequency::Hz1 => SqwPinMode::Rate1Hz,
            SquareWaveFrequency::Hz1024 => SqwPinMode::Rate1024Hz,
            SquareWaveFrequency::Hz4096 => SqwPinMode::Rate4096Hz,
            SquareWaveFrequency::Hz8192 => SqwPinMode::Rate8192Hz,
        })
    }

    /// Sets the INT/SQW pin mode.
    ///
    /// Rewrites INTCN and the frequency bits; the other control bits are
    /// preserved.
    ///
    /// # Errors
    /// Returns an error if an I2C transaction fails.
    pub fn set_sqw_pin_mode(&mut self, mode: SqwPinMode) -> Result<(), DS3232Error<I2C::Error>> {
        let mut control = self.control()?;
        control.set_interrupt_control(mode.interrupt_control());
        control.set_square_wave_frequency(mode.frequency());
        self.set_control(control)?;
        Ok(())
    }

    /// Reads the temperature sensor in degrees Celsius.
    ///
    /// Resolution is 0.25 degrees. The chip refreshes the temperature
    /// registers once per conversion cycle (every 64 seconds by default, see
    /// [`ConversionRate`]), so the value may be up to one cycle stale.
    ///
    /// # Errors
    /// Returns an error if the I2C transaction fails.
    pub fn temperature(&mut self) -> Result<f32, DS3232Error<I2C::Error>> {
        let mut data = [0u8; 2];
        self.i2c
            .write_read(self.address, &[RegAddr::TemperatureMsb as u8], &mut data)?;
        let whole = Temperature(data[0]).temperature();
        let quarters = TemperatureFraction(data[1]).temperature_fraction();
        Ok(f32::from(whole) + f32::from(quarters) * 0.25)
    }

    /// Configures alarm 1 and enables its interrupt.
    ///
    /// Returns `Ok(false)` without writing anything when the INT/SQW pin is
    /// not in interrupt mode (INTCN clear): the alarm interrupt could never
    /// reach the pin, and this chip family's convention is to refuse the
    /// alarm entirely until [`DS3232::set_sqw_pin_mode`] selects
    /// [`SqwPinMode::Interrupt`]. On success the alarm registers are written
    /// in one transaction, A1IE is set, and `Ok(true)` is returned.
    ///
    /// # Errors
    /// Returns an error if an I2C transaction fails or the datetime cannot be
    /// encoded.
    pub fn set_alarm1(
        &mut self,
        datetime: &NaiveDateTime,
        mode: Alarm1Mode,
    ) -> Result<bool, DS3232Error<I2C::Error>> {
        let mut control = self.control()?;
        if control.interrupt_control() != InterruptControl::Interrupt {
            return Ok(false);
        }

        let alarm = DS3232Alarm1::from_datetime(datetime, mode, self.time_representation)
            .map_err(DS3232Error::DateTime)?;
        let regs: [u8; 4] = (&alarm).into();
        self.i2c.write(
            self.address,
            &[
                RegAddr::Alarm1Seconds as u8,
                regs[0],
                regs[1],
                regs[2],
                regs[3],
            ],
        )?;

        control.set_alarm1_interrupt_enable(true);
        self.set_control(control)?;
        Ok(true)
    }

    /// Configures alarm 2 and enables its interrupt.
    ///
    /// Alarm 2 has no seconds register and fires at 00 seconds of the
    /// matching minute. The INTCN guard behaves exactly as in
    /// [`DS3232::set_alarm1`].
    ///
    /// # Errors
    /// Returns an error if an I2C transaction fails or the datetime cannot be
    /// encoded.
    pub fn set_alarm2(
        &mut self,
        datetime: &NaiveDateTime,
        mode: Alarm2Mode,
    ) -> Result<bool, DS3232Error<I2C::Error>> {
        let mut control = self.control()?;
        if control.interrupt_control() != InterruptControl::Interrupt {
            return Ok(false);
        }

        let alarm = DS3232Alarm2::from_datetime(datetime, mode, self.time_representation)
            .map_err(DS3232Error::DateTime)?;
        let regs: [u8; 3] = (&alarm).into();
        self.i2c.write(
            self.address,
            &[RegAddr::Alarm2Minutes as u8, regs[0], regs[1], regs[2]],
        )?;

        control.set_alarm2_interrupt_enable(true);
        self.set_control(control)?;
        Ok(true)
    }

    /// Disables the interrupt enable bit of the given alarm.
    ///
    /// # Errors
    /// Returns an error if an I2C transaction fails.
    pub fn disable_alarm(&mut self, alarm: Alarm) -> Result<(), DS3232Error<I2C::Error>> {
        let mut control = self.control()?;
        match alarm {
            Alarm::One => control.set_alarm1_interrupt_enable(false),
            Alarm::Two => control.set_alarm2_interrupt_enable(false),
        }
        self.set_control(control)?;
        Ok(())
    }

    /// Clears the fired flag of the given alarm.
    ///
    /// Must be called after handling a fired alarm, otherwise
    /// [`DS3232::alarm_fired`] keeps reporting true and the interrupt line
    /// stays asserted.
    ///
    /// # Errors
    /// Returns an error if an I2C transaction fails.
    pub fn clear_alarm(&mut self, alarm: Alarm) -> Result<(), DS3232Error<I2C::Error>> {
        let mut status = self.status()?;
        match alarm {
            Alarm::One => status.set_alarm1_flag(false),
            Alarm::Two => status.set_alarm2_flag(false),
        }
        self.set_status(status)?;
        Ok(())
    }

    /// Checks whether the given alarm has fired since its flag was cleared.
    ///
    /// # Errors
    /// Returns an error if the I2C transaction fails.
    pub fn alarm_fired(&mut self, alarm: Alarm) -> Result<bool, DS3232Error<I2C::Error>> {
        let status = self.status()?;
        Ok(match alarm {
            Alarm::One => status.alarm1_flag(),
            Alarm::Two => status.alarm2_flag(),
        })
    }

    /// Enables the 32kHz output pin.
    ///
    /// # Errors
    /// Returns an error if an I2C transaction fails.
    pub fn enable_32khz_output(&mut self) -> Result<(), DS3232Error<I2C::Error>> {
        let mut status = self.status()?;
        status.set_enable_32khz_output(true);
        self.set_status(status)?;
        Ok(())
    }

    /// Disables the 32kHz output pin.
    ///
    /// # Errors
    /// Returns an error if an I2C transaction fails.
    pub fn disable_32khz_output(&mut self) -> Result<(), DS3232Error<I2C::Error>> {
        let mut status = self.status()?;
        status.set_enable_32khz_output(false);
        self.set_status(status)?;
        Ok(())
    }

    /// Checks whether the 32kHz output pin is enabled.
    ///
    /// # Errors
    /// Returns an error if the I2C transaction fails.
    pub fn is_32khz_output_enabled(&mut self) -> Result<bool, DS3232Error<I2C::Error>> {
        Ok(self.status()?.enable_32khz_output())
    }

    /// Keeps the 32kHz output running on battery power.
    ///
    /// # Errors
    /// Returns an error if an I2C transaction fails.
    pub fn enable_battery_backed_32khz_output(&mut self) -> Result<(), DS3232Error<I2C::Error>> {
        let mut status = self.status()?;
        status.set_battery_backed_32khz_output(true);
        self.set_status(status)?;
        Ok(())
    }

    /// Stops the 32kHz output on battery power.
    ///
    /// # Errors
    /// Returns an error if an I2C transaction fails.
    pub fn disable_battery_backed_32khz_output(&mut self) -> Result<(), DS3232Error<I2C::Error>> {
        let mut status = self.status()?;
        status.set_battery_backed_32khz_output(false);
        self.set_status(status)?;
        Ok(())
    }

    /// Checks whether the 32kHz output stays enabled on battery power.
    ///
    /// # Errors
    /// Returns an error if the I2C transaction fails.
    pub fn is_battery_backed_32khz_output_enabled(
        &mut self,
    ) -> Result<bool, DS3232Error<I2C::Error>> {
        Ok(self.status()?.battery_backed_32khz_output())
    }

    /// Reads the oscillator control state (EOSC).
    ///
    /// The register bit is inverted: [`Oscillator::Enabled`] is bit 7 clear
    /// (running on battery), [`Oscillator::Disabled`] is bit 7 set.
    ///
    /// # Errors
    /// Returns an error if the I2C transaction fails.
    pub fn oscillator(&mut self) -> Result<Oscillator, DS3232Error<I2C::Error>> {
        Ok(self.control()?.oscillator_enable())
    }

    /// Keeps the oscillator running on battery power (clears EOSC).
    ///
    /// # Errors
    /// Returns an error if an I2C transaction fails.
    pub fn enable_oscillator(&mut self) -> Result<(), DS3232Error<I2C::Error>> {
        let mut control = self.control()?;
        control.set_oscillator_enable(Oscillator::Enabled);
        self.set_control(control)?;
        Ok(())
    }

    /// Stops the oscillator on battery power (sets EOSC).
    ///
    /// While stopped on battery all register data is static and timekeeping
    /// halts; the oscillator always runs when the device is powered by VCC.
    ///
    /// # Errors
    /// Returns an error if an I2C transaction fails.
    pub fn disable_oscillator(&mut self) -> Result<(), DS3232Error<I2C::Error>> {
        let mut control = self.control()?;
        control.set_oscillator_enable(Oscillator::Disabled);
        self.set_control(control)?;
        Ok(())
    }

    /// Reads the temperature conversion rate (CRATE1:CRATE0).
    ///
    /// # Errors
    /// Returns an error if the I2C transaction fails.
    pub fn conversion_rate(&mut self) -> Result<ConversionRate, DS3232Error<I2C::Error>> {
        Ok(self.status()?.conversion_rate())
    }

    /// Sets the temperature conversion rate (CRATE1:CRATE0).
    ///
    /// # Errors
    /// Returns an error if an I2C transaction fails.
    pub fn set_conversion_rate(
        &mut self,
        rate: ConversionRate,
    ) -> Result<(), DS3232Error<I2C::Error>> {
        let mut status = self.status()?;
        status.set_conversion_rate(rate);
        self.set_status(status)?;
        Ok(())
    }

    fn check_nvram_range(address: u8, len: usize) -> Result<(), DS3232Error<I2C::Error>> {
        if usize::from(address) + len > NVRAM_SIZE {
            return Err(DS3232Error::NvramOutOfRange);
        }
        Ok(())
    }

    /// Reads `buf.len()` bytes of battery-backed SRAM starting at `address`.
    ///
    /// SRAM addresses run from 0 to 235.
    ///
    /// # Errors
    /// Returns [`DS3232Error::NvramOutOfRange`] without touching the bus when
    /// the range exceeds the SRAM region, or an I2C error if the transaction
    /// fails.
    pub fn read_nvram(
        &mut self,
        address: u8,
        buf: &mut [u8],
    ) -> Result<(), DS3232Error<I2C::Error>> {
        Self::check_nvram_range(address, buf.len())?;
        self.i2c
            .write_read(self.address, &[RegAddr::Nvram as u8 + address], buf)?;
        Ok(())
    }

    /// Writes `buf` into battery-backed SRAM starting at `address`.
    ///
    /// The register address and payload go out in a single transaction.
    ///
    /// # Errors
    /// Returns [`DS3232Error::NvramOutOfRange`] without touching the bus when
    /// the range exceeds the SRAM region, or an I2C error if the transaction
    /// fails.
    pub fn write_nvram(&mut self, address: u8, buf: &[u8]) -> Result<(), DS3232Error<I2C::Error>> {
        Self::check_nvram_range(address, buf.len())?;
        let reg = [RegAddr::Nvram as u8 + address];
        self.i2c.transaction(
            self.address,
            &mut [Operation::Write(&reg), Operation::Write(buf)],
        )?;
        Ok(())
    }

    /// Reads one byte of battery-backed SRAM.
    ///
    /// # Errors
    /// Same as [`DS3232::read_nvram`].
    pub fn read_nvram_byte(&mut self, address: u8) -> Result<u8, DS3232Error<I2C::Error>> {
        let mut data = [0];
        self.read_nvram(address, &mut data)?;
        Ok(data[0])
    }

    /// Writes one byte of battery-backed SRAM.
    ///
    /// # Errors
    /// Same as [`DS3232::write_nvram`].
    pub fn write_nvram_byte(
        &mut self,
        address: u8,
        value: u8,
    ) -> Result<(), DS3232Error<I2C::Error>> {
        self.write_nvram(address, &[value])
    }

    set_and_get_register!(
        (second, RegAddr::Seconds, Seconds),
        (minute, RegAddr::Minutes, Minutes),
        (hour, RegAddr::Hours, Hours),
        (day, RegAddr::Day, Day),
        (date, RegAddr::Date, Date),
        (month, RegAddr::Month, Month),
        (year, RegAddr::Year, Year),
        (control, RegAddr::Control, Control),
        (status, RegAddr::Status, Status),
        (aging_offset, RegAddr::AgingOffset, AgingOffset),
    );
}

#[cfg(test)]
mod tests {
    extern crate alloc;

    use alloc::vec;

    use chrono::{Datelike, NaiveDate, Timelike};
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTrans};

    use super::*;

    fn sample_datetime() -> NaiveDateTime {
        // 2026-08-07 is a Friday: weekday register 6 (1 = Sunday).
        NaiveDate::from_ymd_opt(2026, 8, 7)
            .unwrap()
            .and_hms_opt(15, 30, 0)
            .unwrap()
    }

    const SAMPLE_REGISTERS: [u8; 7] = [0x00, 0x30, 0x15, 0x06, 0x07, 0x08, 0x26];

    #[test]
    fn test_probe_present() {
        let mock = I2cMock::new(&[I2cTrans::write_read(
            DEVICE_ADDRESS,
            vec![RegAddr::Status as u8],
            vec![0x00],
        )]);
        let mut dev = DS3232::new(mock);
        assert!(dev.probe());
        dev.i2c.done();
    }

    #[test]
    fn test_probe_absent() {
        let mock = I2cMock::new(&[I2cTrans::write_read(
            DEVICE_ADDRESS,
            vec![RegAddr::Status as u8],
            vec![0x00],
        )
        .with_error(ErrorKind::Other)]);
        let mut dev = DS3232::new(mock);
        assert!(!dev.probe());
        dev.i2c.done();
    }

    #[test]
    fn test_configure() {
        let config = Config {
            time_representation: TimeRepresentation::TwentyFourHour,
            square_wave_frequency: SquareWaveFrequency::Hz8192,
            interrupt_control: InterruptControl::Interrupt,
            battery_backed_square_wave: false,
            oscillator_enable: Oscillator::Enabled,
        };

        let mock = I2cMock::new(&[
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Control as u8], vec![0]),
            I2cTrans::write(DEVICE_ADDRESS, vec![RegAddr::Control as u8, 0b0001_1100]),
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Hours as u8], vec![0]),
            I2cTrans::write(DEVICE_ADDRESS, vec![RegAddr::Hours as u8, 0]),
        ]);

        let mut dev = DS3232::new(mock);
        dev.configure(&config).unwrap();
        dev.i2c.done();
    }

    #[test]
    fn test_datetime() {
        let mock = I2cMock::new(&[I2cTrans::write_read(
            DEVICE_ADDRESS,
            vec![RegAddr::Seconds as u8],
            SAMPLE_REGISTERS.to_vec(),
        )]);
        let mut dev = DS3232::new(mock);

        let dt = dev.datetime().unwrap();
        assert_eq!(dt.year(), 2026);
        assert_eq!(dt.month(), 8);
        assert_eq!(dt.day(), 7);
        assert_eq!(dt.hour(), 15);
        assert_eq!(dt.minute(), 30);
        assert_eq!(dt.second(), 0);
        dev.i2c.done();
    }

    #[test]
    fn test_datetime_ignores_reserved_bits() {
        // Bit 7 of the seconds/minutes registers is reserved and must not
        // reach the decoded value.
        let mut registers = SAMPLE_REGISTERS;
        registers[0] |= 0x80;
        registers[1] |= 0x80;
        let mock = I2cMock::new(&[I2cTrans::write_read(
            DEVICE_ADDRESS,
            vec![RegAddr::Seconds as u8],
            registers.to_vec(),
        )]);
        let mut dev = DS3232::new(mock);

        let dt = dev.datetime().unwrap();
        assert_eq!(dt.second(), 0);
        assert_eq!(dt.minute(), 30);
        dev.i2c.done();
    }

    #[test]
    fn test_set_datetime_clears_stop_flag() {
        let mut write_bytes = vec![RegAddr::Seconds as u8];
        write_bytes.extend_from_slice(&SAMPLE_REGISTERS);
        let mock = I2cMock::new(&[
            I2cTrans::write(DEVICE_ADDRESS, write_bytes),
            // OSF is cleared afterwards; other status bits survive.
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Status as u8], vec![0x88]),
            I2cTrans::write(DEVICE_ADDRESS, vec![RegAddr::Status as u8, 0x08]),
        ]);
        let mut dev = DS3232::new(mock);

        dev.set_datetime(&sample_datetime()).unwrap();
        dev.i2c.done();
    }

    #[test]
    fn test_set_datetime_rejects_out_of_range_year() {
        let dt = NaiveDate::from_ymd_opt(2100, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let mut dev = DS3232::new(I2cMock::new(&[]));
        assert!(matches!(
            dev.set_datetime(&dt),
            Err(DS3232Error::DateTime(
                DS3232DateTimeError::YearNotBefore2100
            ))
        ));
        dev.i2c.done();
    }

    #[test]
    fn test_lost_power() {
        let mock = I2cMock::new(&[
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Status as u8], vec![0x80]),
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Status as u8], vec![0x00]),
        ]);
        let mut dev = DS3232::new(mock);

        assert!(dev.lost_power().unwrap());
        assert!(!dev.lost_power().unwrap());
        dev.i2c.done();
    }

    #[test]
    fn test_clear_oscillator_stop_flag() {
        let mock = I2cMock::new(&[
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Status as u8], vec![0x8B]),
            I2cTrans::write(DEVICE_ADDRESS, vec![RegAddr::Status as u8, 0x0B]),
        ]);
        let mut dev = DS3232::new(mock);

        dev.clear_oscillator_stop_flag().unwrap();
        dev.i2c.done();
    }

    #[test]
    fn test_sqw_pin_mode_roundtrip() {
        let modes = [
            (SqwPinMode::Rate1Hz, 0x00),
            (SqwPinMode::Rate1024Hz, 0x08),
            (SqwPinMode::Rate4096Hz, 0x10),
            (SqwPinMode::Rate8192Hz, 0x18),
            (SqwPinMode::Off, 0x1C),
        ];

        for (mode, bits) in modes {
            let mock = I2cMock::new(&[
                // write path: clear INTCN + RS bits, then OR the pattern in
                I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Control as u8], vec![0x83]),
                I2cTrans::write(DEVICE_ADDRESS, vec![RegAddr::Control as u8, 0x83 | bits]),
                // read path
                I2cTrans::write_read(
                    DEVICE_ADDRESS,
                    vec![RegAddr::Control as u8],
                    vec![0x83 | bits],
                ),
            ]);
            let mut dev = DS3232::new(mock);

            dev.set_sqw_pin_mode(mode).unwrap();
            assert_eq!(dev.sqw_pin_mode().unwrap(), mode);
            dev.i2c.done();
        }
    }

    #[test]
    fn test_sqw_interrupt_mode_reads_back_as_off() {
        let mock = I2cMock::new(&[
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Control as u8], vec![0x18]),
            I2cTrans::write(DEVICE_ADDRESS, vec![RegAddr::Control as u8, 0x04]),
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Control as u8], vec![0x04]),
        ]);
        let mut dev = DS3232::new(mock);

        dev.set_sqw_pin_mode(SqwPinMode::Interrupt).unwrap();
        assert_eq!(dev.sqw_pin_mode().unwrap(), SqwPinMode::Off);
        dev.i2c.done();
    }

    #[test]
    fn test_sqw_intcn_takes_precedence_over_frequency_bits() {
        // Any INTCN-set pattern reads as Off, whatever RS2:RS1 hold.
        for bits in [0x04, 0x0C, 0x14, 0x1C] {
            let mock = I2cMock::new(&[I2cTrans::write_read(
                DEVICE_ADDRESS,
                vec![RegAddr::Control as u8],
                vec![bits],
            )]);
            let mut dev = DS3232::new(mock);
            assert_eq!(dev.sqw_pin_mode().unwrap(), SqwPinMode::Off);
            dev.i2c.done();
        }
    }

    #[test]
    fn test_temperature() {
        let mock = I2cMock::new(&[I2cTrans::write_read(
            DEVICE_ADDRESS,
            vec![RegAddr::TemperatureMsb as u8],
            vec![23, 0b0100_0000],
        )]);
        let mut dev = DS3232::new(mock);

        let temp = dev.temperature().unwrap();
        assert_eq!(temp, 23.25);
        dev.i2c.done();
    }

    #[test]
    fn test_temperature_negative() {
        let mock = I2cMock::new(&[I2cTrans::write_read(
            DEVICE_ADDRESS,
            vec![RegAddr::TemperatureMsb as u8],
            vec![0xE7, 0b1100_0000], // -25 whole degrees + 0.75
        )]);
        let mut dev = DS3232::new(mock);

        let temp = dev.temperature().unwrap();
        assert_eq!(temp, -24.25);
        dev.i2c.done();
    }

    #[test]
    fn test_set_alarm1_refused_without_interrupt_mode() {
        // Only the control read happens; no alarm registers are touched.
        let mock = I2cMock::new(&[I2cTrans::write_read(
            DEVICE_ADDRESS,
            vec![RegAddr::Control as u8],
            vec![0x00],
        )]);
        let mut dev = DS3232::new(mock);

        let armed = dev
            .set_alarm1(&sample_datetime(), Alarm1Mode::EverySecond)
            .unwrap();
        assert!(!armed);
        dev.i2c.done();
    }

    #[test]
    fn test_set_alarm1() {
        let dt = NaiveDate::from_ymd_opt(2026, 8, 7)
            .unwrap()
            .and_hms_opt(12, 34, 56)
            .unwrap();
        let mock = I2cMock::new(&[
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Control as u8], vec![0x04]),
            // 12:34:56 daily, day/date masked out (A1M4 | date 7)
            I2cTrans::write(
                DEVICE_ADDRESS,
                vec![RegAddr::Alarm1Seconds as u8, 0x56, 0x34, 0x12, 0x87],
            ),
            I2cTrans::write(DEVICE_ADDRESS, vec![RegAddr::Control as u8, 0x05]),
        ]);
        let mut dev = DS3232::new(mock);

        let armed = dev.set_alarm1(&dt, Alarm1Mode::AtTime).unwrap();
        assert!(armed);
        dev.i2c.done();
    }

    #[test]
    fn test_set_alarm2_refused_without_interrupt_mode() {
        let mock = I2cMock::new(&[I2cTrans::write_read(
            DEVICE_ADDRESS,
            vec![RegAddr::Control as u8],
            vec![0x18],
        )]);
        let mut dev = DS3232::new(mock);

        let armed = dev
            .set_alarm2(&sample_datetime(), Alarm2Mode::EveryMinute)
            .unwrap();
        assert!(!armed);
        dev.i2c.done();
    }

    #[test]
    fn test_set_alarm2() {
        let dt = NaiveDate::from_ymd_opt(2026, 8, 7)
            .unwrap()
            .and_hms_opt(12, 34, 56)
            .unwrap();
        let mock = I2cMock::new(&[
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Control as u8], vec![0x04]),
            I2cTrans::write(
                DEVICE_ADDRESS,
                vec![RegAddr::Alarm2Minutes as u8, 0xB4, 0x92, 0x87],
            ),
            I2cTrans::write(DEVICE_ADDRESS, vec![RegAddr::Control as u8, 0x06]),
        ]);
        let mut dev = DS3232::new(mock);

        let armed = dev.set_alarm2(&dt, Alarm2Mode::EveryMinute).unwrap();
        assert!(armed);
        dev.i2c.done();
    }

    #[test]
    fn test_disable_alarm() {
        let mock = I2cMock::new(&[
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Control as u8], vec![0x07]),
            I2cTrans::write(DEVICE_ADDRESS, vec![RegAddr::Control as u8, 0x06]),
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Control as u8], vec![0x07]),
            I2cTrans::write(DEVICE_ADDRESS, vec![RegAddr::Control as u8, 0x05]),
        ]);
        let mut dev = DS3232::new(mock);

        dev.disable_alarm(Alarm::One).unwrap();
        dev.disable_alarm(Alarm::Two).unwrap();
        dev.i2c.done();
    }

    #[test]
    fn test_clear_and_check_alarm_flags() {
        let mock = I2cMock::new(&[
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Status as u8], vec![0x03]),
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Status as u8], vec![0x03]),
            I2cTrans::write(DEVICE_ADDRESS, vec![RegAddr::Status as u8, 0x02]),
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Status as u8], vec![0x02]),
        ]);
        let mut dev = DS3232::new(mock);

        assert!(dev.alarm_fired(Alarm::One).unwrap());
        dev.clear_alarm(Alarm::One).unwrap();
        assert!(!dev.alarm_fired(Alarm::One).unwrap());
        dev.i2c.done();
    }

    #[test]
    fn test_32khz_output_toggles() {
        let mock = I2cMock::new(&[
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Status as u8], vec![0x00]),
            I2cTrans::write(DEVICE_ADDRESS, vec![RegAddr::Status as u8, 0x08]),
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Status as u8], vec![0x08]),
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Status as u8], vec![0x08]),
            I2cTrans::write(DEVICE_ADDRESS, vec![RegAddr::Status as u8, 0x00]),
        ]);
        let mut dev = DS3232::new(mock);

        dev.enable_32khz_output().unwrap();
        assert!(dev.is_32khz_output_enabled().unwrap());
        dev.disable_32khz_output().unwrap();
        dev.i2c.done();
    }

    #[test]
    fn test_battery_backed_32khz_output_toggles() {
        let mock = I2cMock::new(&[
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Status as u8], vec![0x08]),
            I2cTrans::write(DEVICE_ADDRESS, vec![RegAddr::Status as u8, 0x48]),
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Status as u8], vec![0x48]),
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Status as u8], vec![0x48]),
            I2cTrans::write(DEVICE_ADDRESS, vec![RegAddr::Status as u8, 0x08]),
        ]);
        let mut dev = DS3232::new(mock);

        dev.enable_battery_backed_32khz_output().unwrap();
        assert!(dev.is_battery_backed_32khz_output_enabled().unwrap());
        dev.disable_battery_backed_32khz_output().unwrap();
        dev.i2c.done();
    }

    #[test]
    fn test_oscillator_control() {
        let mock = I2cMock::new(&[
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Control as u8], vec![0x00]),
            I2cTrans::write(DEVICE_ADDRESS, vec![RegAddr::Control as u8, 0x80]),
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Control as u8], vec![0x80]),
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Control as u8], vec![0x80]),
            I2cTrans::write(DEVICE_ADDRESS, vec![RegAddr::Control as u8, 0x00]),
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Control as u8], vec![0x00]),
        ]);
        let mut dev = DS3232::new(mock);

        dev.disable_oscillator().unwrap();
        assert_eq!(dev.oscillator().unwrap(), Oscillator::Disabled);
        dev.enable_oscillator().unwrap();
        assert_eq!(dev.oscillator().unwrap(), Oscillator::Enabled);
        dev.i2c.done();
    }

    #[test]
    fn test_conversion_rate() {
        let mock = I2cMock::new(&[
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Status as u8], vec![0x00]),
            I2cTrans::write(DEVICE_ADDRESS, vec![RegAddr::Status as u8, 0x30]),
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Status as u8], vec![0x30]),
        ]);
        let mut dev = DS3232::new(mock);

        dev.set_conversion_rate(ConversionRate::Seconds512).unwrap();
        assert_eq!(dev.conversion_rate().unwrap(), ConversionRate::Seconds512);
        dev.i2c.done();
    }

    #[test]
    fn test_nvram_byte_roundtrip() {
        let mock = I2cMock::new(&[
            I2cTrans::transaction_start(DEVICE_ADDRESS),
            I2cTrans::write(DEVICE_ADDRESS, vec![0x14 + 0x10]),
            I2cTrans::write(DEVICE_ADDRESS, vec![0xA5]),
            I2cTrans::transaction_end(DEVICE_ADDRESS),
            I2cTrans::write_read(DEVICE_ADDRESS, vec![0x14 + 0x10], vec![0xA5]),
        ]);
        let mut dev = DS3232::new(mock);

        dev.write_nvram_byte(0x10, 0xA5).unwrap();
        assert_eq!(dev.read_nvram_byte(0x10).unwrap(), 0xA5);
        dev.i2c.done();
    }

    #[test]
    fn test_nvram_buffer_roundtrip() {
        let payload = [0xDE, 0xAD, 0xBE, 0xEF];
        let mock = I2cMock::new(&[
            I2cTrans::transaction_start(DEVICE_ADDRESS),
            I2cTrans::write(DEVICE_ADDRESS, vec![0x14]),
            I2cTrans::write(DEVICE_ADDRESS, payload.to_vec()),
            I2cTrans::transaction_end(DEVICE_ADDRESS),
            I2cTrans::write_read(DEVICE_ADDRESS, vec![0x14], payload.to_vec()),
        ]);
        let mut dev = DS3232::new(mock);

        dev.write_nvram(0, &payload).unwrap();
        let mut buf = [0u8; 4];
        dev.read_nvram(0, &mut buf).unwrap();
        assert_eq!(buf, payload);
        dev.i2c.done();
    }

    #[test]
    fn test_nvram_last_byte_is_reachable() {
        let mock = I2cMock::new(&[I2cTrans::write_read(
            DEVICE_ADDRESS,
            vec![0xFF],
            vec![0x42],
        )]);
        let mut dev = DS3232::new(mock);

        assert_eq!(dev.read_nvram_byte(235).unwrap(), 0x42);
        dev.i2c.done();
    }

    #[test]
    fn test_nvram_out_of_range_is_rejected_without_bus_traffic() {
        let mut dev = DS3232::new(I2cMock::new(&[]));

        assert!(matches!(
            dev.read_nvram_byte(236),
            Err(DS3232Error::NvramOutOfRange)
        ));
        assert!(matches!(
            dev.write_nvram(235, &[1, 2]),
            Err(DS3232Error::NvramOutOfRange)
        ));
        let mut buf = [0u8; 8];
        assert!(matches!(
            dev.read_nvram(230, &mut buf),
            Err(DS3232Error::NvramOutOfRange)
        ));
        dev.i2c.done();
    }

    #[test]
    fn test_register_accessors() {
        let mock = I2cMock::new(&[
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Seconds as u8], vec![0x45]),
            I2cTrans::write(DEVICE_ADDRESS, vec![RegAddr::Seconds as u8, 0x30]),
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::AgingOffset as u8], vec![0xF6]),
        ]);
        let mut dev = DS3232::new(mock);

        let seconds = dev.second().unwrap();
        assert_eq!(seconds.ten_seconds(), 4);
        assert_eq!(seconds.seconds(), 5);
        dev.set_second(Seconds(0x30)).unwrap();

        let aging = dev.aging_offset().unwrap();
        assert_eq!(aging.aging_offset(), -10);
        dev.i2c.done();
    }

    #[test]
    fn test_release_returns_bus() {
        let mock = I2cMock::new(&[]);
        let dev = DS3232::new(mock);
        let mut i2c = dev.release();
        i2c.done();
    }
}
