use crate::scale::color::Color;
use crate::scale::color_scale::ColorScale;
use crate::utils::rounding::round_half_up;
use serde::{Deserialize, Serialize};

/// Gradient strip and labels describing a [`ColorScale`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    pub gradient_stops: Vec<Color>,
    pub labels: [String; 3],
    pub low: i64,
    pub high: i64,
}

impl Legend {
    /// Sample `scale` at `steps + 1` evenly spaced points from the floor of its
    /// minimum to the ceiling of its maximum.
    pub fn build(scale: &ColorScale, steps: usize) -> Self {
        let range = scale.range();
        let low = range.min.floor();
        let high = range.max.ceil();
        let steps = steps.max(1);

        let gradient_stops = (0..=steps)
            .map(|i| {
                let temp = low + (high - low) * (i as f64 / steps as f64);
                scale.color_of(Some(temp))
            })
            .collect();

        let mid = round_half_up((low + high) / 2.0);

        Self {
            gradient_stops,
            labels: [label(low), label(mid), label(high)],
            low: low as i64,
            high: high as i64,
        }
    }

    /// CSS `linear-gradient(to right, ...)` for the stops
    pub fn css_gradient(&self) -> String {
        let mut css = String::from("linear-gradient(to right");
        for stop in &self.gradient_stops {
            css.push_str(", ");
            css.push_str(&stop.to_hex());
        }
        css.push(')');
        css
    }
}

fn label(value: f64) -> String {
    format!("{}°F", value as i64)
}
