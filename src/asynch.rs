//! Async implementation of the DS3232 driver.
//!
//! This module provides an async interface to the DS3232 RTC device using
//! `embedded-hal-async` traits. It is only available when the `async` feature
//! is enabled.
//!
//! # Example
//!
//! ```rust,ignore
//! use ds3232::asynch::DS3232;
//!
//! let mut rtc = DS3232::new(i2c);
//!
//! rtc.configure(&config).await?;
//! let datetime = rtc.datetime().await?;
//! ```

use chrono::NaiveDateTime;
use embedded_hal_async::i2c::{I2c, Operation};
use paste::paste;

use crate::{
    alarm::{Alarm1Mode, Alarm2Mode, DS3232Alarm1, DS3232Alarm2},
    datetime::DS3232DateTime,
    AgingOffset, Alarm, Config, ConversionRate, Control, DS3232Error, Date, Day, Hours,
    InterruptControl, Minutes, Month, Oscillator, RegAddr, Seconds, SqwPinMode,
    SquareWaveFrequency, Status, Temperature, TemperatureFraction, TimeRepresentation, Year,
    DEVICE_ADDRESS, NVRAM_SIZE,
};

/// DS3232 Real-Time Clock async driver.
///
/// Mirrors the sync driver's operations over `embedded-hal-async` I2C.
pub struct DS3232<I2C: I2c> {
    i2c: I2C,
    address: u8,
    time_representation: TimeRepresentation,
}

impl<I2C: I2c> DS3232<I2C> {
    /// Creates a new async driver bound to the DS3232's fixed bus address.
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            address: DEVICE_ADDRESS,
            time_representation: TimeRepresentation::TwentyFourHour,
        }
    }

    /// Checks whether the device answers on the bus.
    pub async fn probe(&mut self) -> bool {
        let mut data = [0];
        self.i2c
            .write_read(self.address, &[RegAddr::Status as u8], &mut data)
            .await
            .is_ok()
    }

    /// Releases the underlying I2C bus handle.
    #[must_use]
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Configures the device according to the provided configuration.
    ///
    /// # Returns
    /// * `Ok(())` on success
    /// * `Err(DS3232Error)` on error
    pub async fn configure(&mut self, config: &Config) -> Result<(), DS3232Error<I2C::Error>> {
        let mut control = self.control().await?;
        control.set_oscillator_enable(config.oscillator_enable);
        control.set_battery_backed_square_wave(config.battery_backed_square_wave);
        control.set_square_wave_frequency(config.square_wave_frequency);
        control.set_interrupt_control(config.interrupt_control);
        self.set_control(control).await?;

        let mut hours = self.hour().await?;
        hours.set_time_representation(config.time_representation);
        self.set_hour(hours).await?;
        self.time_representation = config.time_representation;
        Ok(())
    }

    async fn read_raw_datetime(&mut self) -> Result<DS3232DateTime, DS3232Error<I2C::Error>> {
        let mut data = [0; 7];
        self.i2c
            .write_read(self.address, &[RegAddr::Seconds as u8], &mut data)
            .await?;
        Ok(data.into())
    }

    async fn write_raw_datetime(
        &mut self,
        datetime: &DS3232DateTime,
    ) -> Result<(), DS3232Error<I2C::Error>> {
        let data: [u8; 7] = datetime.into();
        self.i2c
            .write(
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
            )
            .await?;
        Ok(())
    }

    /// Gets the current date and time.
    ///
    /// # Returns
    /// * `Ok(NaiveDateTime)` - The current date and time
    /// * `Err(DS3232Error)` on error
    pub async fn datetime(&mut self) -> Result<NaiveDateTime, DS3232Error<I2C::Error>> {
        let raw = self.read_raw_datetime().await?;
        raw.into_datetime().map_err(DS3232Error::DateTime)
    }

    /// Sets the date and time and clears the oscillator stop flag.
    ///
    /// # Returns
    /// * `Ok(())` on success
    /// * `Err(DS3232Error)` on error
    pub async fn set_datetime(
        &mut self,
        datetime: &NaiveDateTime,
    ) -> Result<(), DS3232Error<I2C::Error>> {
        let raw = DS3232DateTime::from_datetime(datetime, self.time_representation)
            .map_err(DS3232Error::DateTime)?;
        self.write_raw_datetime(&raw).await?;

        let mut status = self.status().await?;
        status.set_oscillator_stop_flag(false);
        self.set_status(status).await?;
        Ok(())
    }

    /// Checks whether the oscillator stopped since the flag was last cleared.
    pub async fn lost_power(&mut self) -> Result<bool, DS3232Error<I2C::Error>> {
        Ok(self.status().await?.oscillator_stop_flag())
    }

    /// Clears the oscillator stop flag without touching the time registers.
    pub async fn clear_oscillator_stop_flag(&mut self) -> Result<(), DS3232Error<I2C::Error>> {
        let mut status = self.status().await?;
        status.set_oscillator_stop_flag(false);
        self.set_status(status).await?;
        Ok(())
    }

    /// Reads the INT/SQW pin mode, applying the INTCN precedence rule.
    pub async fn sqw_pin_mode(&mut self) -> Result<SqwPinMode, DS3232Error<I2C::Error>> {
        let control = self.control().await?;
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

    /// Sets the INT/SQW pin mode, preserving the other control bits.
    pub async fn set_sqw_pin_mode(
        &mut self,
        mode: SqwPinMode,
    ) -> Result<(), DS3232Error<I2C::Error>> {
        let mut control = self.control().await?;
        control.set_interrupt_control(mode.interrupt_control());
        control.set_square_wave_frequency(mode.frequency());
        self.set_control(control).await?;
        Ok(())
    }

    /// Reads the temperature sensor in degrees Celsius (0.25 C resolution).
    pub async fn temperature(&mut self) -> Result<f32, DS3232Error<I2C::Error>> {
        let mut data = [0u8; 2];
        self.i2c
            .write_read(self.address, &[RegAddr::TemperatureMsb as u8], &mut data)
            .await?;
        let whole = Temperature(data[0]).temperature();
        let quarters = TemperatureFraction(data[1]).temperature_fraction();
        Ok(f32::from(whole) + f32::from(quarters) * 0.25)
    }

    /// Configures alarm 1 and enables its interrupt.
    ///
    /// # Returns
    /// * `Ok(true)` when the alarm was written and A1IE set
    /// * `Ok(false)` when refused because the pin is not in interrupt mode
    /// * `Err(DS3232Error)` on error
    pub async fn set_alarm1(
        &mut self,
        datetime: &NaiveDateTime,
        mode: Alarm1Mode,
    ) -> Result<bool, DS3232Error<I2C::Error>> {
        let mut control = self.control().await?;
        if control.interrupt_control() != InterruptControl::Interrupt {
            return Ok(false);
        }

        let alarm = DS3232Alarm1::from_datetime(datetime, mode, self.time_representation)
            .map_err(DS3232Error::DateTime)?;
        let regs: [u8; 4] = (&alarm).into();
        self.i2c
            .write(
                self.address,
                &[
                    RegAddr::Alarm1Seconds as u8,
                    regs[0],
                    regs[1],
                    regs[2],
                    regs[3],
                ],
            )
            .await?;

        control.set_alarm1_interrupt_enable(true);
        self.set_control(control).await?;
        Ok(true)
    }

    /// Configures alarm 2 and enables its interrupt.
    ///
    /// # Returns
    /// * `Ok(true)` when the alarm was written and A2IE set
    /// * `Ok(false)` when refused because the pin is not in interrupt mode
    /// * `Err(DS3232Error)` on error
    pub async fn set_alarm2(
        &mut self,
        datetime: &NaiveDateTime,
        mode: Alarm2Mode,
    ) -> Result<bool, DS3232Error<I2C::Error>> {
        let mut control = self.control().await?;
        if control.interrupt_control() != InterruptControl::Interrupt {
            return Ok(false);
        }

        let alarm = DS3232Alarm2::from_datetime(datetime, mode, self.time_representation)
            .map_err(DS3232Error::DateTime)?;
        let regs: [u8; 3] = (&alarm).into();
        self.i2c
            .write(
                self.address,
                &[RegAddr::Alarm2Minutes as u8, regs[0], regs[1], regs[2]],
            )
            .await?;

        control.set_alarm2_interrupt_enable(true);
        self.set_control(control).await?;
        Ok(true)
    }

    /// Disables the interrupt enable bit of the given alarm.
    pub async fn disable_alarm(&mut self, alarm: Alarm) -> Result<(), DS3232Error<I2C::Error>> {
        let mut control = self.control().await?;
        match alarm {
            Alarm::One => control.set_alarm1_interrupt_enable(false),
            Alarm::Two => control.set_alarm2_interrupt_enable(false),
        }
        self.set_control(control).await?;
        Ok(())
    }

    /// Clears the fired flag of the given alarm.
    pub async fn clear_alarm(&mut self, alarm: Alarm) -> Result<(), DS3232Error<I2C::Error>> {
        let mut status = self.status().await?;
        match alarm {
            Alarm::One => status.set_alarm1_flag(false),
            Alarm::Two => status.set_alarm2_flag(false),
        }
        self.set_status(status).await?;
        Ok(())
    }

    /// Checks whether the given alarm has fired since its flag was cleared.
    pub async fn alarm_fired(&mut self, alarm: Alarm) -> Result<bool, DS3232Error<I2C::Error>> {
        let status = self.status().await?;
        Ok(match alarm {
            Alarm::One => status.alarm1_flag(),
            Alarm::Two => status.alarm2_flag(),
        })
    }

    /// Enables the 32kHz output pin.
    pub async fn enable_32khz_output(&mut self) -> Result<(), DS3232Error<I2C::Error>> {
        let mut status = self.status().await?;
        status.set_enable_32khz_output(true);
        self.set_status(status).await?;
        Ok(())
    }

    /// Disables the 32kHz output pin.
    pub async fn disable_32khz_output(&mut self) -> Result<(), DS3232Error<I2C::Error>> {
        let mut status = self.status().await?;
        status.set_enable_32khz_output(false);
        self.set_status(status).await?;
        Ok(())
    }

    /// Checks whether the 32kHz output pin is enabled.
    pub async fn is_32khz_output_enabled(&mut self) -> Result<bool, DS3232Error<I2C::Error>> {
        Ok(self.status().await?.enable_32khz_output())
    }

    /// Keeps the 32kHz output running on battery power.
    pub async fn enable_battery_backed_32khz_output(
        &mut self,
    ) -> Result<(), DS3232Error<I2C::Error>> {
        let mut status = self.status().await?;
        status.set_battery_backed_32khz_output(true);
        self.set_status(status).await?;
        Ok(())
    }

    /// Stops the 32kHz output on battery power.
    pub async fn disable_battery_backed_32khz_output(
        &mut self,
    ) -> Result<(), DS3232Error<I2C::Error>> {
        let mut status = self.status().await?;
        status.set_battery_backed_32khz_output(false);
        self.set_status(status).await?;
        Ok(())
    }

    /// Checks whether the 32kHz output stays enabled on battery power.
    pub async fn is_battery_backed_32khz_output_enabled(
        &mut self,
    ) -> Result<bool, DS3232Error<I2C::Error>> {
        Ok(self.status().await?.battery_backed_32khz_output())
    }

    /// Reads the oscillator control state (EOSC, inverted register logic).
    pub async fn oscillator(&mut self) -> Result<Oscillator, DS3232Error<I2C::Error>> {
        Ok(self.control().await?.oscillator_enable())
    }

    /// Keeps the oscillator running on battery power (clears EOSC).
    pub async fn enable_oscillator(&mut self) -> Result<(), DS3232Error<I2C::Error>> {
        let mut control = self.control().await?;
        control.set_oscillator_enable(Oscillator::Enabled);
        self.set_control(control).await?;
        Ok(())
    }

    /// Stops the oscillator on battery power (sets EOSC).
    pub async fn disable_oscillator(&mut self) -> Result<(), DS3232Error<I2C::Error>> {
        let mut control = self.control().await?;
        control.set_oscillator_enable(Oscillator::Disabled);
        self.set_control(control).await?;
        Ok(())
    }

    /// Reads the temperature conversion rate (CRATE1:CRATE0).
    pub async fn conversion_rate(&mut self) -> Result<ConversionRate, DS3232Error<I2C::Error>> {
        Ok(self.status().await?.conversion_rate())
    }

    /// Sets the temperature conversion rate (CRATE1:CRATE0).
    pub async fn set_conversion_rate(
        &mut self,
        rate: ConversionRate,
    ) -> Result<(), DS3232Error<I2C::Error>> {
        let mut status = self.status().await?;
        status.set_conversion_rate(rate);
        self.set_status(status).await?;
        Ok(())
    }

    fn check_nvram_range(address: u8, len: usize) -> Result<(), DS3232Error<I2C::Error>> {
        if usize::from(address) + len > NVRAM_SIZE {
            return Err(DS3232Error::NvramOutOfRange);
        }
        Ok(())
    }

    /// Reads `buf.len()` bytes of battery-backed SRAM starting at `address`.
    pub async fn read_nvram(
        &mut self,
        address: u8,
        buf: &mut [u8],
    ) -> Result<(), DS3232Error<I2C::Error>> {
        Self::check_nvram_range(address, buf.len())?;
        self.i2c
            .write_read(self.address, &[RegAddr::Nvram as u8 + address], buf)
            .await?;
        Ok(())
    }

    /// Writes `buf` into battery-backed SRAM starting at `address`.
    pub async fn write_nvram(
        &mut self,
        address: u8,
        buf: &[u8],
    ) -> Result<(), DS3232Error<I2C::Error>> {
        Self::check_nvram_range(address, buf.len())?;
        let reg = [RegAddr::Nvram as u8 + address];
        self.i2c
            .transaction(
                self.address,
                &mut [Operation::Write(&reg), Operation::Write(buf)],
            )
            .await?;
        Ok(())
    }

    /// Reads one byte of battery-backed SRAM.
    pub async fn read_nvram_byte(&mut self, address: u8) -> Result<u8, DS3232Error<I2C::Error>> {
        let mut data = [0];
        self.read_nvram(address, &mut data).await?;
        Ok(data[0])
    }

    /// Writes one byte of battery-backed SRAM.
    pub async fn write_nvram_byte(
        &mut self,
        address: u8,
        value: u8,
    ) -> Result<(), DS3232Error<I2C::Error>> {
        self.write_nvram(address, &[value]).await
    }
}

// Register access implementations
macro_rules! impl_register_access {
    ($(($name:ident, $regaddr:expr, $typ:ty)),+ $(,)?) => {
        impl<I2C: I2c> DS3232<I2C> {
            $(
                paste! {
                    #[doc = concat!("Gets the value of the ", stringify!($name), " register.")]
                    pub async fn $name(&mut self) -> Result<$typ, DS3232Error<I2C::Error>> {
                        let mut data = [0];
                        self.i2c
                            .write_read(self.address, &[$regaddr as u8], &mut data)
                            .await?;
                        Ok(<$typ>::from(data[0]))
                    }

                    #[doc = concat!("Sets the value of the ", stringify!($name), " register.")]
                    pub async fn [<set_ $name>](&mut self, value: $typ) -> Result<(), DS3232Error<I2C::Error>> {
                        self.i2c.write(
                            self.address,
                            &[$regaddr as u8, value.into()],
                        ).await?;
                        Ok(())
                    }
                }
            )+
        }
    }
}

impl_register_access!(
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
