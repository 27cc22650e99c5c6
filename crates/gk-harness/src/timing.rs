use std::time::{Duration, Instant};

/// Runs `f` and returns its result together with the wall-clock time it took.
pub fn measure_time<F, T>(f: F) -> (T, Duration)
where
    F: FnOnce() -> T,
{
    let start = Instant::now();
    let result = f();
    let duration = start.elapsed();
    (result, duration)
}

/// Milliseconds with sub-millisecond precision, for log fields.
pub fn millis(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_time_returns_result() {
        let (value, elapsed) = measure_time(|| 6 * 7);
        assert_eq!(value, 42);
        assert!(elapsed < Duration::from_secs(5));
    }

    #[test]
    fn test_millis() {
        approx::assert_relative_eq!(millis(Duration::from_micros(1500)), 1.5);
    }
}
