//! Response delivery timing.

use std::time::Duration;

/// Hold `response` back for `delay` without blocking the runtime thread.
pub async fn deliver<T>(response: T, delay: Option<Duration>) -> T {
    if let Some(delay) = delay {
        tracing::info!(delay_ms = delay.as_millis() as u64, "Delaying response");
        tokio::time::sleep(delay).await;
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn test_immediate_without_delay() {
        let start = Instant::now();
        assert_eq!(deliver("ok", None).await, "ok");
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_waits_for_delay() {
        let start = Instant::now();
        deliver((), Some(Duration::from_millis(100))).await;
        assert!(start.elapsed() >= Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_delay_does_not_block_other_tasks() {
        let slow = tokio::spawn(async {
            deliver(Instant::now(), Some(Duration::from_millis(200))).await;
            Instant::now()
        });
        let fast = tokio::spawn(async { deliver(Instant::now(), None).await });

        let fast_done = fast.await.unwrap();
        let slow_done = slow.await.unwrap();
        assert!(fast_done < slow_done);
    }
}
