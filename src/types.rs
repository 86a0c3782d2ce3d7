use crate::hw_def::*;

/// One sample as read from the sensor: two big-endian data bytes and a checksum
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RawSample(pub [u8; 3]);

impl From<[u8; 3]> for RawSample {
    fn from(bytes: [u8; 3]) -> Self {
        Self(bytes)
    }
}

impl RawSample {
    /// Check the trailing checksum byte against the two data bytes.
    ///
    /// This is the bit-serial polynomial division from the datasheet: the 24-bit
    /// sample is divided by x^8 + x^5 + x^4 + 1 and is valid when nothing remains.
    pub fn is_valid(&self) -> bool {
        let [msb, lsb, crc] = self.0;
        let mut remainder = ((((msb as u32) << 8) + lsb as u32) << 8) | crc as u32;
        let mut divisor = CRC_DIVISOR;

        for i in 0..16 {
            if remainder & (1 << (23 - i)) != 0 {
                remainder ^= divisor;
            }
            divisor >>= 1;
        }

        remainder == 0
    }

    /// The checksum byte sent by the sensor
    pub fn checksum(&self) -> u8 {
        self.0[2]
    }

    /// Measurement value with the status bits cleared
    pub fn raw_value(&self) -> u16 {
        u16::from_be_bytes([self.0[0], self.0[1]]) & RAW_VALUE_MASK
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crc::{Algorithm, Crc};

    // Same polynomial, computed the usual byte-wise way
    const REFERENCE: Algorithm<u8> = Algorithm {
        width: 8,
        poly: 0x31,
        init: 0x00,
        refin: false,
        refout: false,
        xorout: 0x00,
        check: 0x00,
        residue: 0x00,
    };
    const REFERENCE_CRC: Crc<u8> = Crc::<u8>::new(&REFERENCE);

    fn assert_close(actual: f32, expected: f64) {
        assert!(
            (actual as f64 - expected).abs() < 1e-3,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn datasheet_checksums() {
        assert!(RawSample([0x00, 0xDC, 0x79]).is_valid());
        assert!(RawSample([0x68, 0x3A, 0x7C]).is_valid());
        assert!(RawSample([0x4E, 0x85, 0x6B]).is_valid());
    }

    #[test]
    fn corrupted_byte_fails_checksum() {
        let good = [0x68, 0x3A, 0x7C];
        for index in 0..3 {
            for bit in 0..8 {
                let mut bytes = good;
                bytes[index] ^= 1 << bit;
                assert!(!RawSample(bytes).is_valid(), "{bytes:02x?} should not validate");
            }
        }
    }

    #[test]
    fn checksum_matches_reference_for_every_sample() {
        for msb in 0..=u8::MAX {
            for lsb in 0..=u8::MAX {
                let expected = REFERENCE_CRC.checksum(&[msb, lsb]);
                for crc in 0..=u8::MAX {
                    assert_eq!(
                        RawSample([msb, lsb, crc]).is_valid(),
                        crc == expected,
                        "sample [{msb:#04x}, {lsb:#04x}, {crc:#04x}]"
                    );
                }
            }
        }
    }

    #[test]
    fn raw_value_masks_status_bits() {
        let sample = RawSample([0x67, 0x26, 0x00]);
        assert_eq!(sample.raw_value(), 0x6724);
        assert_eq!(RawSample([0xFF, 0xFF, 0x00]).raw_value(), 0xFFFC);
        assert_eq!(sample.checksum(), 0x00);
    }

    #[test]
    fn temperature_conversion() {
        assert_eq!(raw_temp_to_centigrade(0), -46.85);
        assert_close(
            raw_temp_to_centigrade(0xFFFC),
            -46.85 + 175.72 * 65532.0 / 65536.0,
        );
        assert_close(
            raw_temp_to_centigrade(0x6724),
            -46.85 + 175.72 * 26404.0 / 65536.0,
        );
        // datasheet example, 0x683A => 24.7 °C
        let sample = RawSample([0x68, 0x3A, 0x7C]);
        assert_close(
            raw_temp_to_centigrade(sample.raw_value()),
            -46.85 + 175.72 * 26680.0 / 65536.0,
        );
    }

    #[test]
    fn humidity_conversion() {
        assert_eq!(raw_rel_humid_to_percent(0), -6.0);
        // datasheet example, 0x4E85 => 32.3 %RH
        let sample = RawSample([0x4E, 0x85, 0x6B]);
        assert_close(
            raw_rel_humid_to_percent(sample.raw_value()),
            -6.0 + 125.0 * 20100.0 / 65536.0,
        );
    }

    #[test]
    fn command_selects_conversion() {
        assert_eq!(Command::MeasureTemperature.as_u8(), 0xE3);
        assert_eq!(Command::MeasureHumidity.as_u8(), 0xE5);
        assert_eq!(Command::MeasureTemperature.convert(0), -46.85);
        assert_eq!(Command::MeasureHumidity.convert(0), -6.0);
    }

    #[test]
    fn fahrenheit() {
        assert_close(centigrade_to_fahrenheit(0.0), 32.0);
        assert_close(centigrade_to_fahrenheit(100.0), 212.0);
    }
}
