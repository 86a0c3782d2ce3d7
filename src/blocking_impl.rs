use crate::hw_def::*;
use crate::logging::{trace, warn};
use crate::types::*;
use crate::{Error, Htu21dBlocking};

use embedded_hal::{
    delay::DelayNs,
    i2c::{Error as _, I2c},
};

// No busy flag here: measurements take `&mut self`, so they cannot overlap.
impl<I2C, Delay> Htu21dBlocking<I2C, Delay>
where
    I2C: I2c,
    Delay: DelayNs,
{
    /// Create a new HTU21D driver instance
    pub fn new(i2c: I2C, delay: Delay) -> Self {
        Self { i2c, delay }
    }

    /// Destroy the driver, returning the I²C bus and delay
    pub fn destroy(self) -> (I2C, Delay) {
        (self.i2c, self.delay)
    }

    fn issue_measurement(&mut self, command: Command) -> Result<u16, Error<I2C::Error>> {
        self.i2c
            .write(I2C_ADDRESS, &[command.as_u8()])
            .map_err(Error::I2cWrite)?;
        trace!("htu21d::issue_measurement(): sent command {:#x}", command.as_u8());

        self.delay.delay_ms(SETTLE_TIME_MS);

        let mut read_buf = [0u8; 3];
        self.i2c
            .read(I2C_ADDRESS, &mut read_buf)
            .map_err(Error::I2cRead)?;
        trace!("htu21d::issue_measurement(): read_buf={:?}", read_buf);

        let sample = RawSample::from(read_buf);
        if !sample.is_valid() {
            return Err(Error::CrcMismatch);
        }
        Ok(sample.raw_value())
    }

    fn try_measure(&mut self, command: Command) -> Result<f32, Error<I2C::Error>> {
        let raw = self.issue_measurement(command)?;
        Ok(command.convert(raw))
    }

    fn measure(&mut self, command: Command) -> Option<f32> {
        match self.try_measure(command) {
            Ok(value) => Some(value),
            Err(e) => {
                match &e {
                    Error::I2cWrite(bus) | Error::I2cRead(bus) => {
                        warn!("htu21d: command {:#x} failed on the bus: {:?}", command.as_u8(), bus.kind())
                    }
                    Error::CrcMismatch => {
                        warn!("htu21d: command {:#x} sample failed checksum", command.as_u8())
                    }
                }
                None
            }
        }
    }

    /// Measure temperature in degrees Centigrade, `None` on failure
    pub fn measure_temperature(&mut self) -> Option<f32> {
        self.measure(Command::MeasureTemperature)
    }

    /// Measure temperature in degrees Fahrenheit, `None` on failure
    pub fn measure_temperature_fahrenheit(&mut self) -> Option<f32> {
        self.measure_temperature().map(centigrade_to_fahrenheit)
    }

    /// Measure relative humidity in percent, `None` on failure
    pub fn measure_humidity(&mut self) -> Option<f32> {
        self.measure(Command::MeasureHumidity)
    }

    /// Measure temperature in degrees Centigrade, reporting why a measurement failed
    pub fn try_measure_temperature(&mut self) -> Result<f32, Error<I2C::Error>> {
        self.try_measure(Command::MeasureTemperature)
    }

    /// Measure relative humidity in percent, reporting why a measurement failed
    pub fn try_measure_humidity(&mut self) -> Result<f32, Error<I2C::Error>> {
        self.try_measure(Command::MeasureHumidity)
    }
}
