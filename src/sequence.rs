// sequence.rs

/// First `n` Fibonacci numbers starting `0, 1, 1, 2, …`.
///
/// Terms are `u128`, which holds every term up to index 186; later terms
/// saturate at `u128::MAX`.
pub fn fibonacci(n: usize) -> Vec<u128> {
    let mut out = Vec::with_capacity(n);
    let (mut a, mut b) = (0u128, 1u128);
    for _ in 0..n {
        out.push(a);
        let next = a.saturating_add(b);
        a = b;
        b = next;
    }
    out
}

/// `start + i·diff` for `i` in `0..n`.
pub fn arithmetic(n: usize, start: f64, diff: f64) -> Vec<f64> {
    (0..n).map(|i| start + i as f64 * diff).collect()
}

/// `start · ratio^i` for `i` in `0..n`.
pub fn geometric(n: usize, start: f64, ratio: f64) -> Vec<f64> {
    (0..n).map(|i| start * ratio.powf(i as f64)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fibonacci() {
        assert!(fibonacci(0).is_empty());
        assert_eq!(fibonacci(1), vec![0]);
        assert_eq!(fibonacci(2), vec![0, 1]);
        assert_eq!(fibonacci(7), vec![0, 1, 1, 2, 3, 5, 8]);
    }

    #[test]
    fn test_fibonacci_long_run_saturates() {
        let seq = fibonacci(300);
        assert_eq!(seq.len(), 300);
        assert_eq!(seq[186], seq[185] + seq[184]);
        assert!(seq[186] > u128::MAX / 2);
        assert_eq!(seq[187], u128::MAX);
        assert_eq!(*seq.last().unwrap(), u128::MAX);
    }

    #[test]
    fn test_arithmetic() {
        assert!(arithmetic(0, 1.0, 1.0).is_empty());
        assert_eq!(arithmetic(4, 1.0, 2.5), vec![1.0, 3.5, 6.0, 8.5]);
        assert_eq!(arithmetic(3, 5.0, -5.0), vec![5.0, 0.0, -5.0]);
    }

    #[test]
    fn test_geometric() {
        assert!(geometric(0, 2.0, 3.0).is_empty());
        assert_eq!(geometric(4, 2.0, 3.0), vec![2.0, 6.0, 18.0, 54.0]);
        assert_eq!(geometric(3, 1.0, 0.5), vec![1.0, 0.5, 0.25]);
    }
}
