//! Machine-readable symbol generation behind an opaque encoder boundary.
//!
//! The layout and label-building code only sees a bitmap; which symbology
//! produced it is an implementation detail of the encoder.

use image::{GrayImage, Luma};
use qrcode::QrCode;

use crate::error::EncodeError;

/// Turns a text payload into a symbol bitmap at its natural size.
///
/// Encoders are pure: the same payload always yields the same bitmap.
pub trait SymbolEncoder {
    fn encode(&self, payload: &str) -> Result<GrayImage, EncodeError>;
}

/// QR code encoder. Dark modules are black, background white, no quiet zone
/// (the label surface around the symbol serves as one).
#[derive(Debug, Clone, Copy, Default)]
pub struct QrEncoder;

impl SymbolEncoder for QrEncoder {
    fn encode(&self, payload: &str) -> Result<GrayImage, EncodeError> {
        let code = QrCode::new(payload.as_bytes())
            .map_err(|e| EncodeError::Unencodable(e.to_string()))?;

        let image = code
            .render::<Luma<u8>>()
            .quiet_zone(false)
            .module_dimensions(2, 2)
            .build();
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_typical_payload() {
        let image = QrEncoder
            .encode("S/N X000-17, Lot X000, Date 40/20")
            .unwrap();
        assert!(image.width() > 0 && image.height() > 0);
        // Both dark and light modules must be present.
        assert!(image.pixels().any(|p| p.0[0] == 0));
        assert!(image.pixels().any(|p| p.0[0] == 255));
    }

    #[test]
    fn identical_payloads_yield_identical_bitmaps() {
        let a = QrEncoder.encode("S/N A-1, Lot A, Date 1/21").unwrap();
        let b = QrEncoder.encode("S/N A-1, Lot A, Date 1/21").unwrap();
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn oversized_payload_fails_to_encode() {
        let payload = "x".repeat(8000);
        assert!(matches!(
            QrEncoder.encode(&payload),
            Err(EncodeError::Unencodable(_))
        ));
    }
}
