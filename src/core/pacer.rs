use crate::core::{ConfigProvider, Pacer};
use async_trait::async_trait;
use std::time::Duration;

/// Courtesy throttle toward the hosting API: a short stall after every
/// probe, a long one after every `long_every`-th.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedPacer {
    short: Duration,
    long: Duration,
    long_every: usize,
}

impl FixedPacer {
    pub fn new(short: Duration, long: Duration, long_every: usize) -> Self {
        Self {
            short,
            long,
            long_every: long_every.max(1),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(config.short_delay(), config.long_delay(), config.long_every())
    }

    pub fn delay_for(&self, index: usize) -> Duration {
        if index > 0 && index % self.long_every == 0 {
            self.long
        } else {
            self.short
        }
    }
}

impl Default for FixedPacer {
    fn default() -> Self {
        Self::new(Duration::from_millis(300), Duration::from_secs(2), 10)
    }
}

#[async_trait]
impl Pacer for FixedPacer {
    async fn after_probe(&self, index: usize) {
        let delay = self.delay_for(index);
        tracing::trace!("pacing {:?} after probe #{}", delay, index);
        tokio::time::sleep(delay).await;
    }
}

/// Does not wait. For tests and local mock targets.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPacer;

#[async_trait]
impl Pacer for NoopPacer {
    async fn after_probe(&self, _index: usize) {}
}

/// Either pacer, picked at runtime.
pub enum AnyPacer {
    Fixed(FixedPacer),
    Noop(NoopPacer),
}

#[async_trait]
impl Pacer for AnyPacer {
    async fn after_probe(&self, index: usize) {
        match self {
            AnyPacer::Fixed(p) => p.after_probe(index).await,
            AnyPacer::Noop(p) => p.after_probe(index).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_every_tenth_probe_waits_long() {
        let pacer = FixedPacer::default();

        assert_eq!(pacer.delay_for(1), Duration::from_millis(300));
        assert_eq!(pacer.delay_for(9), Duration::from_millis(300));
        assert_eq!(pacer.delay_for(10), Duration::from_secs(2));
        assert_eq!(pacer.delay_for(11), Duration::from_millis(300));
        assert_eq!(pacer.delay_for(20), Duration::from_secs(2));
        assert_eq!(pacer.delay_for(30), Duration::from_secs(2));
    }

    #[test]
    fn test_zero_period_is_clamped() {
        let pacer = FixedPacer::new(Duration::from_millis(1), Duration::from_millis(5), 0);
        assert_eq!(pacer.delay_for(1), Duration::from_millis(5));
        assert_eq!(pacer.delay_for(2), Duration::from_millis(5));
    }

    #[tokio::test]
    async fn test_after_probe_blocks_for_the_delay() {
        let pacer = FixedPacer::new(Duration::from_millis(20), Duration::from_millis(60), 2);

        let start = Instant::now();
        pacer.after_probe(1).await;
        assert!(start.elapsed() >= Duration::from_millis(20));

        let start = Instant::now();
        pacer.after_probe(2).await;
        assert!(start.elapsed() >= Duration::from_millis(60));
    }

    #[tokio::test]
    async fn test_noop_pacer_returns_immediately() {
        let start = Instant::now();
        for i in 1..=100 {
            AnyPacer::Noop(NoopPacer).after_probe(i).await;
        }
        assert!(start.elapsed() < Duration::from_millis(100));
    }
}
