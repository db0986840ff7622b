//! Physical-unit conversion at the fixed device resolution.

/// Device resolution in dots per inch. All label geometry is expressed in
/// device pixels at this resolution.
pub const DPI: f64 = 94.0;

/// Millimetres → device pixels. Truncates toward zero; inputs are not
/// range-checked, negative values pass through arithmetically.
pub fn mm_to_pixels(mm: f64) -> i32 {
    (mm / 25.4 * DPI) as i32
}

/// Device pixels → millimetres. The inverse of [`mm_to_pixels`] up to the
/// truncation it performs.
pub fn pixels_to_mm(pixels: i32) -> f64 {
    pixels as f64 / DPI * 25.4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_inch_is_dpi_pixels() {
        assert_eq!(mm_to_pixels(25.4), DPI as i32);
    }

    #[test]
    fn a4_dimensions() {
        assert_eq!(mm_to_pixels(210.0), 777);
        assert_eq!(mm_to_pixels(297.0), 1099);
    }

    #[test]
    fn round_trip_is_lossy_but_bounded() {
        for p in 0..2000 {
            let back = mm_to_pixels(pixels_to_mm(p));
            assert!(
                (back - p).abs() <= 1,
                "round trip of {p} px drifted to {back}"
            );
        }
    }
}
