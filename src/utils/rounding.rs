/// Round to the nearest integer with ties going toward positive infinity
/// (`-2.5 -> -2`, `2.5 -> 3`).
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Round to one decimal place, ties toward positive infinity.
pub fn round_to_tenth(value: f64) -> f64 {
    round_half_up(value * 10.0) / 10.0
}
