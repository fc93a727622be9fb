//! Execution timing.
//!
//! Wraps a fallible operation, logs how long it took, and hands back its
//! result untouched. Failures are timed too and flagged in the log entry.

use std::future::Future;
use std::time::{Duration, Instant};

/// Label used when the caller has nothing better.
pub const DEFAULT_LABEL: &str = "Operation";

/// Awaits `operation` and logs its execution time under `label`.
///
/// # Examples
///
/// ```
/// # async fn example() -> Result<(), std::io::Error> {
/// use storefront_policy::timing::measure_execution_time;
///
/// let total = measure_execution_time("load-orders", async { Ok::<_, std::io::Error>(3) }).await?;
/// assert_eq!(total, 3);
/// # Ok(())
/// # }
/// ```
pub async fn measure_execution_time<T, E, F>(label: &str, operation: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
{
    let start = Instant::now();
    let result = operation.await;
    report(label, start.elapsed(), result.is_err());
    result
}

/// Runs `operation` and logs its execution time under `label`.
pub fn measure_execution_time_sync<T, E, F>(label: &str, operation: F) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E>,
{
    let start = Instant::now();
    let result = operation();
    report(label, start.elapsed(), result.is_err());
    result
}

fn report(label: &str, elapsed: Duration, failed: bool) {
    let elapsed_ms = format_millis(elapsed);
    let suffix = if failed { " (failed)" } else { "" };
    tracing::info!(
        label,
        elapsed_ms = %elapsed_ms,
        failed,
        "[{}] Execution time: {}ms{}",
        label,
        elapsed_ms,
        suffix
    );
}

/// Milliseconds with two decimals.
fn format_millis(elapsed: Duration) -> String {
    format!("{:.2}", elapsed.as_secs_f64() * 1000.0)
}
