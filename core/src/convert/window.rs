/// Intensity window for contrast adjustment
///
/// Defines the clip band `[center - width/2, center + width/2]`
/// (integer floor division, matching the DICOM convention of integral
/// window parameters).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub center: i32,
    pub width: i32,
}

impl Window {
    pub fn new(center: i32, width: i32) -> Self {
        Self { center, width }
    }

    /// Lower and upper clip bounds of this window
    pub fn bounds(&self) -> (f64, f64) {
        let min = self.center - self.width / 2;
        let max = self.center + self.width / 2;
        (f64::from(min), f64::from(max))
    }
}

/// Clips every sample into the window's bounds, in place
pub fn apply_window(pixels: &mut [f64], window: Window) {
    let (min, max) = window.bounds();
    for value in pixels.iter_mut() {
        *value = value.clamp(min, max);
    }
}

/// Linearly rescales samples to the full 8-bit range
///
/// The rescale uses the observed (post-clip) min/max, so windowing also
/// controls the contrast stretch. A flat buffer (min == max) maps to an
/// all-zero buffer of identical length instead of dividing by zero.
pub fn normalize_to_u8(pixels: &[f64]) -> Vec<u8> {
    if pixels.is_empty() {
        return Vec::new();
    }
    let min = pixels.iter().copied().fold(f64::INFINITY, f64::min);
    let max = pixels.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if min == max {
        return vec![0; pixels.len()];
    }
    let range = max - min;
    pixels
        .iter()
        .map(|&value| ((value - min) / range * 255.0) as u8)
        .collect()
}
