use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

/// Percent-complete handle shared between one extraction run (sole writer)
/// and any number of pollers. Each run gets its own handle, so concurrent
/// runs cannot clobber each other's counter.
#[derive(Clone, Default)]
pub struct Progress {
    percent: Arc<AtomicU8>,
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, percent: u8) {
        self.percent.store(percent.min(100), Ordering::Relaxed);
    }

    pub fn get(&self) -> u8 {
        self.percent.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_counter() {
        let progress = Progress::new();
        let poller = progress.clone();
        progress.set(42);
        assert_eq!(poller.get(), 42);
    }

    #[test]
    fn clamps_to_100() {
        let progress = Progress::new();
        progress.set(250);
        assert_eq!(progress.get(), 100);
    }
}
