//! Operation timing.

use std::time::Instant;
use tracing::debug;

/// Runs `f` and logs how long it took at debug level.
pub fn timed<T, F>(operation: &'static str, f: F) -> T
where
    F: FnOnce() -> T,
{
    let start = Instant::now();
    let result = f();
    let elapsed_us = start.elapsed().as_micros() as u64;
    debug!(operation, elapsed_us, "operation finished");
    result
}
