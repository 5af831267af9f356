//! Heatmap colour ramps
//!
//! Each metric interpolates linearly in HSL between a low and a high colour.
//! Renderers take the CSS string; the numeric form is there for anyone who
//! needs to blend further.

use crate::types::HeatmapMetric;
use serde::{Serialize, Serializer};
use std::fmt;

/// A colour in HSL space; hue in degrees, saturation and lightness in percent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    /// Hue, 0..360
    pub h: f64,
    /// Saturation, 0..100
    pub s: f64,
    /// Lightness, 0..100
    pub l: f64,
}

impl Hsl {
    /// Create a colour
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    /// CSS `hsl()` notation with whole-number components
    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({:.0}, {:.0}%, {:.0}%)", self.h, self.s, self.l)
    }
}

impl Serialize for Hsl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Low and high colour of a metric
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorRamp {
    /// Colour at value 0
    pub start: Hsl,
    /// Colour at value 1
    pub end: Hsl,
}

impl ColorRamp {
    /// Ramp used for a metric
    pub fn for_metric(metric: HeatmapMetric) -> Self {
        let (start, end) = match metric {
            HeatmapMetric::Volume => (Hsl::new(207.0, 90.0, 54.0), Hsl::new(4.0, 90.0, 58.0)),
            HeatmapMetric::Frequency => (Hsl::new(145.0, 63.0, 13.0), Hsl::new(122.0, 39.0, 49.0)),
            HeatmapMetric::Occupancy => (Hsl::new(39.0, 100.0, 50.0), Hsl::new(45.0, 100.0, 51.0)),
            HeatmapMetric::Misplacement => {
                (Hsl::new(4.0, 66.0, 47.0), Hsl::new(14.0, 100.0, 57.0))
            }
            HeatmapMetric::Expiry => (Hsl::new(39.0, 100.0, 50.0), Hsl::new(45.0, 100.0, 51.0)),
            HeatmapMetric::Exceptions => {
                (Hsl::new(291.0, 64.0, 42.0), Hsl::new(292.0, 76.0, 53.0))
            }
        };
        Self { start, end }
    }

    /// Colour for a value in `[0, 1]`; out-of-range values are clamped
    pub fn at(&self, value: f64) -> Hsl {
        let t = if value.is_finite() { value.clamp(0.0, 1.0) } else { 0.0 };
        let lerp = |a: f64, b: f64| a + (b - a) * t;
        Hsl::new(
            lerp(self.start.h, self.end.h),
            lerp(self.start.s, self.end.s),
            lerp(self.start.l, self.end.l),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramp_endpoints() {
        let ramp = ColorRamp::for_metric(HeatmapMetric::Volume);
        assert_eq!(ramp.at(0.0), ramp.start);
        assert_eq!(ramp.at(1.0), ramp.end);
        assert_eq!(ramp.at(-3.0), ramp.start);
        assert_eq!(ramp.at(f64::NAN), ramp.start);
    }

    #[test]
    fn test_ramp_midpoint() {
        let ramp = ColorRamp::for_metric(HeatmapMetric::Exceptions);
        let mid = ramp.at(0.5);
        assert_eq!(mid.h, 291.5);
        assert_eq!(mid.s, 70.0);
        assert_eq!(mid.l, 47.5);
    }

    #[test]
    fn test_css_format() {
        assert_eq!(Hsl::new(207.0, 90.0, 54.0).to_css(), "hsl(207, 90%, 54%)");
        let json = serde_json::to_string(&Hsl::new(4.0, 90.0, 58.0)).unwrap();
        assert_eq!(json, "\"hsl(4, 90%, 58%)\"");
    }
}
