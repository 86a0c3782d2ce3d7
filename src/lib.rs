//! This is a platform-agnostic Rust driver for the HTU21D humidity and temperature digital
//! sensor using the [`embedded-hal`] or [`embedded-hal-async`] traits.
//!
//! [`embedded-hal`]: https://github.com/rust-embedded/embedded-hal/tree/master/embedded-hal
//! [`embedded-hal-async`]: https://github.com/rust-embedded/embedded-hal/tree/master/embedded-hal-async
//!
//! This driver allows you to:
//! - Measure temperature in degrees Centigrade or Fahrenheit.
//! - Measure relative humidity in percent.
//! - Share one sensor between several tasks on a cooperative executor (async API).
//! - Validate every sample against the checksum sent by the sensor.
//! - Use either a blocking or an async API.
//!
//! This driver does not support the following device features:
//! - Configurable measurement resolution (the user register is never written).
//! - Several sensors on one bus (the HTU21D has a single fixed address).
//! - Continuous sampling.
//!
//! ## Features
//!
//! - `async`: Enables async API.
//! - `blocking`: Enables blocking API.
//! - `defmt`: Enables logging using the `defmt` framework.
//! - `log`: Enables logging using the `log` framework.
//!
//! ## Measurement protocol
//!
//! Each measurement writes a single command byte to address `0x40`, waits 50 ms for the
//! conversion, then reads three bytes: a big-endian value whose two low status bits are
//! masked off, followed by a checksum. A sample whose checksum does not validate is
//! discarded.
//!
//! The async driver takes `&self`, so several tasks may measure through the same instance.
//! Only one transaction is on the bus at a time: a caller that finds the sensor busy sleeps
//! for 160 ms and checks again. Waiters are not served in arrival order.
//!
//! Datasheet:
//!   [HTU21D](https://cdn-shop.adafruit.com/datasheets/1899_HTU21D.pdf)
//!
//! To use this driver, import this crate and an `embedded_hal` or `embedded_hal_async`
//! implementation, then instantiate the device.
//!
//! ## Async Example:
//!
//! ```ignore
//! use htu21d_async::Htu21d;
//!
//! // Platform-specific
//! let i2c = /* embedded_hal_async::i2c::I2c instance */;
//! let delay = /* embedded_hal_async::delay::DelayNs + Clone instance */;
//!
//! let htu21d = Htu21d::new(i2c, delay);
//!
//! // Both measurements share the sensor; the second waits for the first to finish
//! let (temperature, humidity) = join(htu21d.measure_temperature(), htu21d.measure_humidity()).await;
//! match (temperature, humidity) {
//!     (Some(t), Some(h)) => println!("{:0.1} °C, {:0.1} %RH", t, h),
//!     _ => println!("sensor unavailable"),
//! }
//!
//! // Or find out why a measurement failed
//! match htu21d.try_measure_temperature().await {
//!     Ok(t) => println!("{:0.1} °C", t),
//!     Err(e) => println!("{}", e),
//! }
//! ```
//!
//! ## Blocking Example:
//!
//! ```ignore
//! use htu21d_async::Htu21dBlocking;
//!
//! // Platform-specific
//! let i2c = /* embedded_hal::i2c::I2c instance */;
//! let delay = /* embedded_hal::delay::DelayNs instance */;
//!
//! let mut htu21d = Htu21dBlocking::new(i2c, delay);
//!
//! if let Some(rh) = htu21d.measure_humidity() {
//!     println!("{:0.1} %RH", rh);
//! }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![cfg_attr(not(test), no_std)]

#[cfg(not(any(feature = "async", feature = "blocking")))]
compile_error!("At least one of \"async\" and \"blocking\" features must be enabled");

#[cfg(all(feature = "defmt", feature = "log"))]
compile_error!("Features \"defmt\" and \"log\" are mutually exclusive and cannot be enabled together");

mod logging;

#[cfg(feature = "blocking")]
mod blocking_impl;
#[cfg(feature = "async")]
mod device_impl;
mod hw_def;
mod types;

pub use crate::{hw_def::*, types::*};

#[cfg(feature = "async")]
use core::{cell::RefCell, sync::atomic::AtomicBool};
use core::fmt;

#[cfg(feature="defmt")]
use defmt::Format;

/// HTU21D async device driver
///
/// Measurements take `&self`; concurrent callers are serialized by an internal busy flag.
#[cfg(feature = "async")]
#[derive(Debug)]
pub struct Htu21d<I2C, Delay> {
    pub(crate) i2c: RefCell<I2C>,
    pub(crate) delay: Delay,
    pub(crate) busy: AtomicBool,
}

/// HTU21D blocking device driver
#[cfg(feature = "blocking")]
#[derive(Debug)]
pub struct Htu21dBlocking<I2C, Delay> {
    pub(crate) i2c: I2C,
    pub(crate) delay: Delay,
}

/// All possible errors in this crate
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error<E> {
    /// I²C error while writing the measurement command
    I2cWrite(E),
    /// I²C error while reading the sample
    I2cRead(E),
    /// The sample did not match its checksum
    CrcMismatch,
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::I2cWrite(e) => write!(f, "I2C write of measurement command failed: {e:?}"),
            Error::I2cRead(e) => write!(f, "I2C read of sample failed: {e:?}"),
            Error::CrcMismatch => write!(f, "sample checksum mismatch"),
        }
    }
}
