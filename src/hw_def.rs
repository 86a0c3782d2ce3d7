/// Fixed I²C address of the HTU21D
pub const I2C_ADDRESS: u8 = 0x40;

/// Time the sensor needs to finish its analog conversion after a measurement command (ms)
pub const SETTLE_TIME_MS: u32 = 50;

/// Backoff between checks of the busy flag while another measurement is in flight (ms)
pub const BUSY_POLL_MS: u32 = 160;

/// The two low bits of a sample are status bits, not part of the measurement
pub const RAW_VALUE_MASK: u16 = 0xFFFC;

// x^8 + x^5 + x^4 + 1, aligned to the top of a 24-bit sample
pub(crate) const CRC_DIVISOR: u32 = 0x98_8000;

/// Measurement commands understood by the sensor
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum Command {
    /// Trigger a temperature measurement
    MeasureTemperature = 0xE3,
    /// Trigger a relative humidity measurement
    MeasureHumidity = 0xE5,
}
impl Command {
    /// Command byte as sent on the bus
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Apply the calibration formula matching this command to a masked raw value
    pub fn convert(self, raw: u16) -> f32 {
        match self {
            Command::MeasureTemperature => raw_temp_to_centigrade(raw),
            Command::MeasureHumidity => raw_rel_humid_to_percent(raw),
        }
    }
}

/// Convert a masked raw temperature value to degrees Centigrade
pub fn raw_temp_to_centigrade(raw: u16) -> f32 {
    -46.85 + 175.72 * raw as f32 / 65536.0
}

/// Convert a masked raw humidity value to relative humidity in percent
pub fn raw_rel_humid_to_percent(raw: u16) -> f32 {
    -6.0 + 125.0 * raw as f32 / 65536.0
}

/// Convert degrees Centigrade to degrees Fahrenheit
pub fn centigrade_to_fahrenheit(centigrade: f32) -> f32 {
    centigrade * 1.8 + 32.0
}
