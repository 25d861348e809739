use crate::scale::color::Color;

/// ColorBrewer RdYlBu, 11 classes, red (hot) to blue (cold).
pub const RD_YL_BU: [Color; 11] = [
    Color::new(0xa5, 0x00, 0x26),
    Color::new(0xd7, 0x30, 0x27),
    Color::new(0xf4, 0x6d, 0x43),
    Color::new(0xfd, 0xae, 0x61),
    Color::new(0xfe, 0xe0, 0x90),
    Color::new(0xff, 0xff, 0xbf),
    Color::new(0xe0, 0xf3, 0xf8),
    Color::new(0xab, 0xd9, 0xe9),
    Color::new(0x74, 0xad, 0xd1),
    Color::new(0x45, 0x75, 0xb4),
    Color::new(0x31, 0x36, 0x95),
];

/// Smooth color ramp over a fixed set of stops, evaluated with a uniform
/// cubic B-spline per channel. `at(0.0)` and `at(1.0)` return the first and
/// last stops exactly. Always holds at least two stops.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DivergingScheme {
    stops: &'static [Color],
}

impl DivergingScheme {
    /// `None` for fewer than two stops.
    pub fn new(stops: &'static [Color]) -> Option<Self> {
        (stops.len() >= 2).then_some(Self { stops })
    }

    pub const fn rd_yl_bu() -> Self {
        Self { stops: &RD_YL_BU }
    }

    /// Hot end (`t = 0`)
    pub fn start(&self) -> Color {
        self.stops[0]
    }

    /// Cold end (`t = 1`)
    pub fn end(&self) -> Color {
        self.stops[self.stops.len() - 1]
    }

    /// Color at `t`, clamped to `[0, 1]`. NaN maps to the midpoint.
    pub fn at(&self, t: f64) -> Color {
        let t = if t.is_nan() { 0.5 } else { t.clamp(0.0, 1.0) };
        let n = self.stops.len() - 1;

        let i = if t >= 1.0 {
            n - 1
        } else {
            (t * n as f64).floor() as usize
        };
        let local = (t - i as f64 / n as f64) * n as f64;

        let channel = |get: fn(&Color) -> u8| {
            let v1 = get(&self.stops[i]) as f64;
            let v2 = get(&self.stops[i + 1]) as f64;
            let v0 = if i > 0 {
                get(&self.stops[i - 1]) as f64
            } else {
                2.0 * v1 - v2
            };
            let v3 = if i < n - 1 {
                get(&self.stops[i + 2]) as f64
            } else {
                2.0 * v2 - v1
            };
            basis(local, v0, v1, v2, v3)
        };

        Color::from_channels(channel(|c| c.r), channel(|c| c.g), channel(|c| c.b))
    }
}

impl Default for DivergingScheme {
    fn default() -> Self {
        Self::rd_yl_bu()
    }
}

fn basis(t1: f64, v0: f64, v1: f64, v2: f64, v3: f64) -> f64 {
    let t2 = t1 * t1;
    let t3 = t2 * t1;
    ((1.0 - 3.0 * t1 + 3.0 * t2 - t3) * v0
        + (4.0 - 6.0 * t2 + 3.0 * t3) * v1
        + (1.0 + 3.0 * t1 + 3.0 * t2 - 3.0 * t3) * v2
        + t3 * v3)
        / 6.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_are_exact() {
        let scheme = DivergingScheme::rd_yl_bu();
        assert_eq!(scheme.at(0.0), Color::new(0xa5, 0x00, 0x26));
        assert_eq!(scheme.at(1.0), Color::new(0x31, 0x36, 0x95));
        assert_eq!(scheme.at(-3.0), scheme.start());
        assert_eq!(scheme.at(7.0), scheme.end());
    }

    #[test]
    fn test_midpoint_is_pale_yellow() {
        let mid = DivergingScheme::rd_yl_bu().at(0.5);
        // The neutral center of the ramp is close to #ffffbf
        assert!(mid.r > 240 && mid.g > 240 && mid.b > 170 && mid.b < 210);
    }

    #[test]
    fn test_warm_half_is_red_dominant() {
        let scheme = DivergingScheme::rd_yl_bu();
        let warm = scheme.at(0.2);
        let cool = scheme.at(0.8);
        assert!(warm.r > warm.b);
        assert!(cool.b > cool.r);
    }

    #[test]
    fn test_nan_does_not_panic() {
        let scheme = DivergingScheme::rd_yl_bu();
        assert_eq!(scheme.at(f64::NAN), scheme.at(0.5));
    }

    #[test]
    fn test_new_requires_two_stops() {
        static ONE: [Color; 1] = [Color::new(0, 0, 0)];
        static TWO: [Color; 2] = [Color::new(0, 0, 0), Color::new(255, 255, 255)];

        assert!(DivergingScheme::new(&[]).is_none());
        assert!(DivergingScheme::new(&ONE).is_none());

        let gray = DivergingScheme::new(&TWO).unwrap();
        assert_eq!(gray.start(), TWO[0]);
        assert_eq!(gray.end(), TWO[1]);
        assert_eq!(gray.at(1.0), TWO[1]);
    }
}
