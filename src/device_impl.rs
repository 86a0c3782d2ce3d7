use crate::hw_def::*;
use crate::logging::{trace, warn};
use crate::types::*;
use crate::{Error, Htu21d};

use core::cell::RefCell;
use core::sync::atomic::{AtomicBool, Ordering};
use embedded_hal_async::{
    delay::DelayNs,
    i2c::{Error as _, I2c},
};

/// Clears the busy flag when the transaction ends, however it ends
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<I2C, Delay> Htu21d<I2C, Delay>
where
    I2C: I2c,
    Delay: DelayNs + Clone,
{
    /// Create a new HTU21D driver instance
    pub fn new(i2c: I2C, delay: Delay) -> Self {
        Self {
            i2c: RefCell::new(i2c),
            delay,
            busy: AtomicBool::new(false),
        }
    }

    /// Destroy the driver, returning the I²C bus and delay
    pub fn destroy(self) -> (I2C, Delay) {
        (self.i2c.into_inner(), self.delay)
    }

    /// True while a measurement is on the bus
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    // Holding the bus across awaits is fine: it is only ever borrowed by the owner of the
    // busy flag.
    #[allow(clippy::await_holding_refcell_ref)]
    async fn issue_measurement(&self, command: Command) -> Result<u16, Error<I2C::Error>> {
        let mut delay = self.delay.clone();

        // No await between the check and the set, so no other task can slip in
        while self.busy.load(Ordering::Acquire) {
            delay.delay_ms(BUSY_POLL_MS).await;
        }
        self.busy.store(true, Ordering::Release);
        let _busy = BusyGuard(&self.busy);

        let mut i2c = self.i2c.borrow_mut();
        i2c.write(I2C_ADDRESS, &[command.as_u8()])
            .await
            .map_err(Error::I2cWrite)?;
        trace!("htu21d::issue_measurement(): sent command {:#x}", command.as_u8());

        delay.delay_ms(SETTLE_TIME_MS).await;

        let mut read_buf = [0u8; 3];
        i2c.read(I2C_ADDRESS, &mut read_buf)
            .await
            .map_err(Error::I2cRead)?;
        trace!("htu21d::issue_measurement(): read_buf={:?}", read_buf);

        let sample = RawSample::from(read_buf);
        if !sample.is_valid() {
            return Err(Error::CrcMismatch);
        }
        Ok(sample.raw_value())
    }

    async fn try_measure(&self, command: Command) -> Result<f32, Error<I2C::Error>> {
        let raw = self.issue_measurement(command).await?;
        // TODO: find out why the sensor occasionally reports a raw value of 0. Such samples
        // pass the checksum and are converted like any other.
        Ok(command.convert(raw))
    }

    async fn measure(&self, command: Command) -> Option<f32> {
        match self.try_measure(command).await {
            Ok(value) => Some(value),
            Err(Error::I2cWrite(e)) => {
                warn!("htu21d: command {:#x} write failed: {:?}", command.as_u8(), e.kind());
                None
            }
            Err(Error::I2cRead(e)) => {
                warn!("htu21d: command {:#x} read failed: {:?}", command.as_u8(), e.kind());
                None
            }
            Err(Error::CrcMismatch) => {
                warn!("htu21d: command {:#x} sample failed checksum", command.as_u8());
                None
            }
        }
    }

    /// Measure temperature in degrees Centigrade.
    ///
    /// Returns `None` if the bus failed or the sample did not match its checksum.
    pub async fn measure_temperature(&self) -> Option<f32> {
        self.measure(Command::MeasureTemperature).await
    }

    /// Measure temperature in degrees Fahrenheit, `None` on failure
    pub async fn measure_temperature_fahrenheit(&self) -> Option<f32> {
        self.measure_temperature().await.map(centigrade_to_fahrenheit)
    }

    /// Measure relative humidity in percent.
    ///
    /// Returns `None` if the bus failed or the sample did not match its checksum.
    pub async fn measure_humidity(&self) -> Option<f32> {
        self.measure(Command::MeasureHumidity).await
    }

    /// Measure temperature in degrees Centigrade, reporting why a measurement failed
    pub async fn try_measure_temperature(&self) -> Result<f32, Error<I2C::Error>> {
        self.try_measure(Command::MeasureTemperature).await
    }

    /// Measure relative humidity in percent, reporting why a measurement failed
    pub async fn try_measure_humidity(&self) -> Result<f32, Error<I2C::Error>> {
        self.try_measure(Command::MeasureHumidity).await
    }
}
