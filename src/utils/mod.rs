//! Small numeric helpers shared by generation and derivation.

/// Rounds half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1199.0 / 3.0, 2), 399.67);
        assert_eq!(round_to(-12.345678, 2), -12.35);
        assert_eq!(round_to(20.0, 2), 20.0);
        assert_eq!(round_to(0.125, 0), 0.0);
    }
}
