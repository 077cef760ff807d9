//! General-purpose bounded random numbers
//!
//! Backed by `rand::thread_rng()`: a per-thread CSPRNG, so concurrent callers
//! never contend on a shared generator.

use rand::Rng;
use sbx_core::{SbxError, SbxResult};

use crate::provider::RandomNumberGenerator;

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRng;

impl SystemRng {
    pub fn new() -> Self {
        Self
    }
}

impl RandomNumberGenerator for SystemRng {
    fn next_int(&self) -> i32 {
        rand::thread_rng().gen_range(0..i32::MAX)
    }

    fn next_int_below(&self, max: i32) -> SbxResult<i32> {
        if max < 0 {
            return Err(SbxError::InvalidArgument(format!(
                "max must be >= 0 (got {max})"
            )));
        }
        if max == 0 {
            return Ok(0);
        }
        Ok(rand::thread_rng().gen_range(0..max))
    }

    fn next_int_between(&self, min: i32, max: i32) -> SbxResult<i32> {
        if min > max {
            return Err(SbxError::InvalidArgument(format!(
                "max must be >= min (got min={min}, max={max})"
            )));
        }
        if min == max {
            return Ok(min);
        }
        Ok(rand::thread_rng().gen_range(min..max))
    }

    fn next_double(&self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }

    fn next_double_below(&self, max: f64) -> SbxResult<f64> {
        if !max.is_finite() || max < 0.0 {
            return Err(SbxError::InvalidArgument(format!(
                "max must be a finite value >= 0 (got {max})"
            )));
        }
        Ok(self.next_double() * max)
    }

    fn next_double_between(&self, min: f64, max: f64) -> SbxResult<f64> {
        if !min.is_finite() || !max.is_finite() || max < min {
            return Err(SbxError::InvalidArgument(format!(
                "max must be >= min, both finite (got min={min}, max={max})"
            )));
        }
        if min == max {
            return Ok(min);
        }

        // convex combination: `max - min` may overflow for wide finite ranges
        let x = self.next_double();
        let value = (min * (1.0 - x) + max * x).max(min);
        Ok(if value < max { value } else { max.next_down() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_int_range() {
        let rng = SystemRng::new();
        for _ in 0..1000 {
            let x = rng.next_int();
            assert!((0..i32::MAX).contains(&x));
        }
    }

    #[test]
    fn test_next_int_below() {
        let rng = SystemRng::new();
        for _ in 0..1000 {
            let x = rng.next_int_below(10).unwrap();
            assert!((0..10).contains(&x));
        }
        assert_eq!(rng.next_int_below(0).unwrap(), 0);
        assert_eq!(rng.next_int_below(1).unwrap(), 0);
        assert!(matches!(
            rng.next_int_below(-1),
            Err(SbxError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_next_int_between() {
        let rng = SystemRng::new();
        for _ in 0..1000 {
            let x = rng.next_int_between(-5, 5).unwrap();
            assert!((-5..5).contains(&x));
        }
        assert_eq!(rng.next_int_between(7, 7).unwrap(), 7);
        assert!(rng.next_int_between(i32::MIN, i32::MAX).is_ok());
        assert!(matches!(
            rng.next_int_between(5, 4),
            Err(SbxError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_next_double() {
        let rng = SystemRng::new();
        for _ in 0..1000 {
            let x = rng.next_double();
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn test_next_double_below() {
        let rng = SystemRng::new();
        for _ in 0..1000 {
            let x = rng.next_double_below(2.5).unwrap();
            assert!((0.0..2.5).contains(&x));
        }
        assert_eq!(rng.next_double_below(0.0).unwrap(), 0.0);
        assert!(rng.next_double_below(-0.1).is_err());
        assert!(rng.next_double_below(f64::NAN).is_err());
    }

    #[test]
    fn test_next_double_between() {
        let rng = SystemRng::new();
        for _ in 0..1000 {
            let x = rng.next_double_between(-1.0, 1.0).unwrap();
            assert!((-1.0..1.0).contains(&x));
        }
        assert_eq!(rng.next_double_between(3.0, 3.0).unwrap(), 3.0);
        assert!(rng.next_double_between(1.0, 0.0).is_err());
    }

    #[test]
    fn test_next_double_between_full_range() {
        let rng = SystemRng::new();
        for _ in 0..1000 {
            let x = rng.next_double_between(-f64::MAX, f64::MAX).unwrap();
            assert!(x.is_finite(), "got {x}");
            assert!((-f64::MAX..f64::MAX).contains(&x));
        }
        for _ in 0..1000 {
            let x = rng.next_double_between(f64::MAX / 2.0, f64::MAX).unwrap();
            assert!((f64::MAX / 2.0..f64::MAX).contains(&x));
        }
    }

    #[test]
    fn test_values_vary() {
        let rng = SystemRng::new();
        let draws: std::collections::HashSet<i32> = (0..100).map(|_| rng.next_int()).collect();
        assert!(draws.len() > 1, "100 draws should not all be equal");
    }

    #[test]
    fn test_concurrent_use() {
        let rng = std::sync::Arc::new(SystemRng::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let rng = rng.clone();
                std::thread::spawn(move || {
                    (0..1000)
                        .map(|_| rng.next_int_below(100).unwrap())
                        .all(|x| (0..100).contains(&x))
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}
