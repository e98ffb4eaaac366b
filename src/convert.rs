// convert.rs

//! Unit and radix conversions. Unit conversions are fixed linear formulas
//! with no failure mode.

pub const FEET_PER_METER: f64 = 3.28084;
pub const LBS_PER_KG: f64 = 2.20462;

pub fn celsius_to_fahrenheit(c: f64) -> f64 {
    c * 9.0 / 5.0 + 32.0
}

pub fn fahrenheit_to_celsius(f: f64) -> f64 {
    (f - 32.0) * 5.0 / 9.0
}

pub fn meters_to_feet(m: f64) -> f64 {
    m * FEET_PER_METER
}

pub fn feet_to_meters(ft: f64) -> f64 {
    ft / FEET_PER_METER
}

pub fn kg_to_lbs(kg: f64) -> f64 {
    kg * LBS_PER_KG
}

pub fn lbs_to_kg(lbs: f64) -> f64 {
    lbs / LBS_PER_KG
}

/// Rewrites `digits`, read in radix `from`, into radix `to` (lowercase).
///
/// Characters that are not digits of `from` are skipped, so `"1z0"` in
/// base 2 reads as `10`. A leading `-` is the one exception: it is carried
/// onto the result instead of being skipped, while a `-` anywhere else is
/// skipped like any other non-digit. Returns `None` when either radix is
/// outside `2..=36`, when no valid digit remains, or when the value does not
/// fit in 128 bits.
pub fn base_convert(digits: &str, from: u32, to: u32) -> Option<String> {
    if !(2..=36).contains(&from) || !(2..=36).contains(&to) {
        return None;
    }
    let trimmed = digits.trim();
    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    let mut value: u128 = 0;
    let mut seen = false;
    for d in body.chars().filter_map(|c| c.to_digit(from)) {
        value = value.checked_mul(from as u128)?.checked_add(d as u128)?;
        seen = true;
    }
    if !seen {
        return None;
    }

    let mut out = Vec::new();
    loop {
        let d = (value % to as u128) as u32;
        out.push(std::char::from_digit(d, to)?);
        value /= to as u128;
        if value == 0 {
            break;
        }
    }
    if negative && out != ['0'] {
        out.push('-');
    }
    Some(out.into_iter().rev().collect())
}
