// arith.rs

//! Basic, scientific and number-theory operations.
//!
//! Partial operations return `None` when the result is mathematically
//! undefined (division by zero, square root of a negative, factorial of a
//! negative). Callers check for absence; nothing here panics.

pub fn add(a: f64, b: f64) -> f64 {
    a + b
}

pub fn sub(a: f64, b: f64) -> f64 {
    a - b
}

pub fn mul(a: f64, b: f64) -> f64 {
    a * b
}

/// `None` when `b == 0`.
pub fn div(a: f64, b: f64) -> Option<f64> {
    if b == 0.0 {
        return None;
    }
    Some(a / b)
}

/// Floating remainder carrying the sign of the dividend (C `fmod`).
/// `None` when `b == 0`.
pub fn modulo(a: f64, b: f64) -> Option<f64> {
    if b == 0.0 {
        return None;
    }
    Some(a % b)
}

/// Not trapped: invalid domains yield NaN or infinity.
pub fn pow(a: f64, b: f64) -> f64 {
    a.powf(b)
}

pub fn sqrt(a: f64) -> Option<f64> {
    if a < 0.0 {
        return None;
    }
    Some(a.sqrt())
}

/// `1·2·…·n`, with `factorial(0) == 1`.
///
/// Accumulated in `f64`: exact through 22!, rounded beyond that and
/// `+inf` past 170!.
pub fn factorial(n: i64) -> Option<f64> {
    if n < 0 {
        return None;
    }
    let mut acc = 1.0_f64;
    for i in 1..=n {
        acc *= i as f64;
        if acc.is_infinite() {
            break;
        }
    }
    Some(acc)
}

/// Euclid on absolute values. `gcd(0, 0) == 0`.
pub fn gcd(a: i64, b: i64) -> u64 {
    let (mut a, mut b) = (a.unsigned_abs(), b.unsigned_abs());
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

/// `|a·b| / gcd(a, b)`, or 0 when either side is 0.
///
/// The product is formed in `u128` so no pair of `i64` inputs can overflow.
pub fn lcm(a: i64, b: i64) -> u128 {
    if a == 0 || b == 0 {
        return 0;
    }
    let product = a.unsigned_abs() as u128 * b.unsigned_abs() as u128;
    product / gcd(a, b) as u128
}

/// Trial division by 2, 3 and then 6k ± 1 up to √n.
pub fn is_prime(n: i64) -> bool {
    if n <= 1 {
        return false;
    }
    if n <= 3 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }
    let n = n as u64;
    let mut i: u64 = 5;
    while i * i <= n {
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }
    true
}
