//! Numeric literal formatting for SPICE decks.
//!
//! Plain numbers are rendered in the shortest form that round-trips, switching
//! to exponent notation only for very large or very small magnitudes (below
//! 1e-6 or from 1e21 up), e.g. `1000`, `0.0005`, `1e-9`, `1e+21`. Component
//! values use SPICE scale suffixes instead.

/// Shortest round-trip rendering of a number.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return format!("{}", value);
    }

    let formatted = format!("{:e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => formatted,
    }
}

/// Resistance with `MEG`/`K` suffix: `1000` -> `1K`, `2.2e6` -> `2.2MEG`.
pub fn format_resistance(resistance: f64) -> String {
    if resistance >= 1e6 {
        format!("{}MEG", format_number(resistance / 1e6))
    } else if resistance >= 1e3 {
        format!("{}K", format_number(resistance / 1e3))
    } else {
        format_number(resistance)
    }
}

/// Capacitance with `M`/`U`/`N`/`P` suffix: `1e-6` -> `1U`.
pub fn format_capacitance(capacitance: f64) -> String {
    if capacitance >= 1e-3 {
        format!("{}M", format_number(capacitance * 1e3))
    } else if capacitance >= 1e-6 {
        format!("{}U", format_number(capacitance * 1e6))
    } else if capacitance >= 1e-9 {
        format!("{}N", format_number(capacitance * 1e9))
    } else if capacitance >= 1e-12 {
        format!("{}P", format_number(capacitance * 1e12))
    } else {
        format_number(capacitance)
    }
}

/// Inductance with lower-case `m`/`u`/`n`/`p` suffix; henries are unscaled.
pub fn format_inductance(inductance: f64) -> String {
    if inductance >= 1.0 {
        format_number(inductance)
    } else if inductance >= 1e-3 {
        format!("{}m", format_number(inductance * 1e3))
    } else if inductance >= 1e-6 {
        format!("{}u", format_number(inductance * 1e6))
    } else if inductance >= 1e-9 {
        format!("{}n", format_number(inductance * 1e9))
    } else if inductance >= 1e-12 {
        format!("{}p", format_number(inductance * 1e12))
    } else {
        format_number(inductance)
    }
}

/// Round a magnitude for use in analysis and waveform parameters.
///
/// Magnitudes of at least 1e3 or at most 1e-3 keep six digits after the
/// leading one in scientific form; everything else keeps six significant
/// digits.
pub fn round_for_spice(value: f64) -> f64 {
    if !value.is_finite() || value == 0.0 {
        return value;
    }
    let magnitude = value.abs();
    let text = if magnitude >= 1e3 || magnitude <= 1e-3 {
        format!("{:.6e}", value)
    } else {
        format!("{:.5e}", value)
    };
    text.parse().unwrap_or(value)
}

/// [`round_for_spice`] followed by [`format_number`].
pub fn format_number_for_spice(value: f64) -> String {
    format_number(round_for_spice(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_format_number_plain() {
        assert_eq!(format_number(1000.0), "1000");
        assert_eq!(format_number(0.0005), "0.0005");
        assert_eq!(format_number(-2.5), "-2.5");
        assert_eq!(format_number(5.0), "5");
        assert_eq!(format_number(0.00068), "0.00068");
    }

    #[test]
    fn test_format_number_exponent() {
        assert_eq!(format_number(1e-9), "1e-9");
        assert_eq!(format_number(1.5e-7), "1.5e-7");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
    }

    #[test]
    fn test_format_resistance() {
        assert_eq!(format_resistance(1000.0), "1K");
        assert_eq!(format_resistance(4700.0), "4.7K");
        assert_eq!(format_resistance(2.2e6), "2.2MEG");
        assert_eq!(format_resistance(300.0), "300");
    }

    #[test]
    fn test_format_capacitance() {
        assert_eq!(format_capacitance(1e-6), "1U");
        assert_eq!(format_capacitance(1e-5), "10U");
        assert_eq!(format_capacitance(2.2e-3), "2.2M");
        assert_eq!(format_capacitance(1e-12), "1P");
    }

    #[test]
    fn test_format_inductance() {
        assert_eq!(format_inductance(1.0), "1");
        assert_eq!(format_inductance(1e-3), "1m");
        assert_eq!(format_inductance(1e-6), "1u");
        assert_eq!(format_inductance(1e-9), "1n");
    }

    #[test]
    fn test_format_number_for_spice() {
        assert_eq!(format_number_for_spice(0.001), "0.001");
        assert_eq!(format_number_for_spice(0.1), "0.1");
        assert_eq!(format_number_for_spice(0.00005), "0.00005");
        assert_eq!(format_number_for_spice(0.0), "0");
        assert_eq!(format_number_for_spice(1.0 / 3.0), "0.333333");
        assert_eq!(format_number_for_spice(12345.678), "12345.68");
    }

    #[test]
    fn test_round_for_spice_keeps_small_values() {
        assert_relative_eq!(round_for_spice(1e-9), 1e-9);
        assert_relative_eq!(round_for_spice(0.0005), 0.0005);
    }
}
