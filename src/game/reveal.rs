//! Cosmetic pause before a draw result is shown.
//!
//! The outcome is final before the pause starts; waiting (or cancelling the
//! wait) never changes it.

use std::future::Future;
use std::time::Duration;

/// Wait for `delay` or until `cancel` resolves, whichever comes first, then
/// hand back `outcome` untouched.
pub async fn reveal<T, C>(delay: Duration, cancel: C, outcome: T) -> T
where
    C: Future<Output = ()>,
{
    if delay.is_zero() {
        return outcome;
    }
    tokio::select! {
        _ = tokio::time::sleep(delay) => {}
        _ = cancel => {
            log::debug!("reveal skipped");
        }
    }
    outcome
}

/// Reveal without a way to skip.
pub async fn reveal_after<T>(delay: Duration, outcome: T) -> T {
    reveal(delay, std::future::pending::<()>(), outcome).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn cancel_returns_outcome_early() {
        let started = Instant::now();
        let value = tokio_test::block_on(reveal(
            Duration::from_secs(60),
            std::future::ready(()),
            "mythic",
        ));
        assert_eq!(value, "mythic");
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn short_delay_elapses() {
        let value = tokio_test::block_on(reveal_after(Duration::from_millis(10), 7u32));
        assert_eq!(value, 7);
    }

    #[test]
    fn zero_delay_is_immediate() {
        let value = tokio_test::block_on(reveal_after(Duration::ZERO, vec![1, 2]));
        assert_eq!(value, vec![1, 2]);
    }
}
