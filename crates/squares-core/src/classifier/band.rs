use super::ClassifierConfig;
use crate::geometry::ImageSize;
use serde::{Deserialize, Serialize};

/// The reference block area is a 24th of the image.
pub const AREA_DIVISOR: u64 = 24;

/// Open interval of plausible square areas for one image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AreaBand {
    pub min: f64,
    pub max: f64,
}

impl AreaBand {
    pub fn for_image(size: ImageSize, config: &ClassifierConfig) -> Self {
        // integer division first, then the ratios apply in floating point
        let reference = (size.pixel_count() / AREA_DIVISOR) as f64;
        Self {
            min: reference / config.min_ratio,
            max: reference * config.max_ratio,
        }
    }

    /// Both bounds are exclusive.
    pub fn contains(&self, area: f64) -> bool {
        area > self.min && area < self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_for_240_square_image() {
        let band = AreaBand::for_image(ImageSize::new(240, 240), &ClassifierConfig::default());
        assert_eq!(band.min, 600.0);
        assert_eq!(band.max, 9600.0);
    }

    #[test]
    fn test_bounds_are_exclusive() {
        let band = AreaBand { min: 600.0, max: 9600.0 };
        assert!(!band.contains(600.0));
        assert!(!band.contains(9600.0));
        assert!(band.contains(600.5));
        assert!(band.contains(9599.5));
    }

    #[test]
    fn test_reference_truncates_pixel_count() {
        // 10 * 10 / 24 = 4 in integer arithmetic
        let band = AreaBand::for_image(ImageSize::new(10, 10), &ClassifierConfig::new(1.0, 1.0).unwrap());
        assert_eq!(band.min, 4.0);
        assert_eq!(band.max, 4.0);
    }
}
