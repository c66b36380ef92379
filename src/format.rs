//! Number rendering for report output.
//!
//! Two shapes are needed:
//! * [`repr_f64`] – shortest round-trip text that always reads as a float
//!   (`6.0`, `13.8`, `1e-05`, `1.5e+16`).
//! * [`fixed_trimmed`] – fixed precision with trailing zeros and a dangling
//!   decimal point removed (`2563.125`, `40`).

/// Fractional digits used by [`fixed_trimmed`] for sub-population output.
pub const SUB_POPULATION_PRECISION: usize = 15;

/// Render `value` in shortest round-trip form.
///
/// Positional notation is used for decimal exponents in `-4..16`,
/// scientific notation with a signed, two-digit-minimum exponent otherwise.
pub fn repr_f64(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_owned();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0.0" } else { "0.0" }.to_owned();
    }

    let sci = format!("{value:e}");
    let (mantissa, exponent) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if (-4..16).contains(&exponent) {
        let plain = value.to_string();
        if plain.contains('.') {
            plain
        } else {
            format!("{plain}.0")
        }
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs())
    }
}

/// Render `value` with `precision` fractional digits, then strip trailing
/// zeros and a trailing `.`.
pub fn fixed_trimmed(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return repr_f64(value);
    }
    let fixed = format!("{value:.precision$}");
    if !fixed.contains('.') {
        return fixed;
    }
    fixed.trim_end_matches('0').trim_end_matches('.').to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repr_keeps_a_fractional_digit() {
        assert_eq!(repr_f64(6.0), "6.0");
        assert_eq!(repr_f64(50.0), "50.0");
        assert_eq!(repr_f64(-3.0), "-3.0");
        assert_eq!(repr_f64(0.0), "0.0");
    }

    #[test]
    fn repr_uses_shortest_digits() {
        assert_eq!(repr_f64(13.8), "13.8");
        assert_eq!(repr_f64(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(repr_f64(0.0001), "0.0001");
        assert_eq!(repr_f64(1e15), "1000000000000000.0");
    }

    #[test]
    fn repr_switches_to_scientific_outside_range() {
        assert_eq!(repr_f64(1e16), "1e+16");
        assert_eq!(repr_f64(1.5e-5), "1.5e-05");
        assert_eq!(repr_f64(-2.25e100), "-2.25e+100");
    }

    #[test]
    fn repr_non_finite() {
        assert_eq!(repr_f64(f64::NAN), "nan");
        assert_eq!(repr_f64(f64::INFINITY), "inf");
        assert_eq!(repr_f64(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn fixed_trimmed_strips_zeros_and_point() {
        assert_eq!(fixed_trimmed(40.0, SUB_POPULATION_PRECISION), "40");
        assert_eq!(fixed_trimmed(2563.125, SUB_POPULATION_PRECISION), "2563.125");
        assert_eq!(fixed_trimmed(0.0, SUB_POPULATION_PRECISION), "0");
        assert_eq!(fixed_trimmed(100.5, 3), "100.5");
    }

    #[test]
    fn fixed_trimmed_rounds_at_precision() {
        assert_eq!(fixed_trimmed(1.0 / 3.0, 4), "0.3333");
        assert_eq!(fixed_trimmed(2.0 / 3.0, 2), "0.67");
    }
}
