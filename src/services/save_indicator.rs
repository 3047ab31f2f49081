// src/services/save_indicator.rs
use chrono::{DateTime, Local};
use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};
use tokio::task::JoinHandle;

/// Cosmetic "saving..." flag shown after a save.
///
/// Purely feedback: the save itself has already completed when `start` is
/// called. A new save cancels the running timer and starts a fresh one.
#[derive(Debug, Clone)]
pub struct SaveIndicator {
    // Generation of the timer that owns the flag; 0 = not saving.
    active: Arc<AtomicU64>,
    generation: Arc<AtomicU64>,
    timer: Arc<Mutex<Option<JoinHandle<()>>>>,
    last_saved_at: Arc<Mutex<Option<DateTime<Local>>>>,
    duration: Duration,
}

impl SaveIndicator {
    pub fn new(duration: Duration) -> Self {
        Self {
            active: Arc::new(AtomicU64::new(0)),
            generation: Arc::new(AtomicU64::new(0)),
            timer: Arc::new(Mutex::new(None)),
            last_saved_at: Arc::new(Mutex::new(None)),
            duration,
        }
    }

    pub fn is_saving(&self) -> bool {
        self.active.load(Ordering::SeqCst) != 0
    }

    pub fn last_saved_at(&self) -> Option<DateTime<Local>> {
        self.last_saved_at.lock().ok().and_then(|guard| *guard)
    }

    /// Turns the flag on and (re)starts the timer that turns it off.
    pub fn start(&self) {
        if let Ok(mut last) = self.last_saved_at.lock() {
            *last = Some(Local::now());
        }

        let Ok(mut timer) = self.timer.lock() else {
            return;
        };
        if let Some(previous) = timer.take() {
            previous.abort();
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.active.store(generation, Ordering::SeqCst);

        // A stale timer that already woke up cannot clear a newer generation.
        let active = Arc::clone(&self.active);
        let duration = self.duration;
        *timer = Some(tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            let _ = active.compare_exchange(generation, 0, Ordering::SeqCst, Ordering::SeqCst);
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn flag_clears_after_the_delay() {
        let indicator = SaveIndicator::new(Duration::from_millis(800));
        assert!(!indicator.is_saving());

        indicator.start();
        assert!(indicator.is_saving());
        assert!(indicator.last_saved_at().is_some());

        tokio::time::sleep(Duration::from_millis(801)).await;
        assert!(!indicator.is_saving());
    }

    #[tokio::test(start_paused = true)]
    async fn second_save_restarts_the_delay() {
        let indicator = SaveIndicator::new(Duration::from_millis(800));
        indicator.start();
        tokio::time::sleep(Duration::from_millis(600)).await;

        indicator.start();
        tokio::time::sleep(Duration::from_millis(600)).await;
        assert!(indicator.is_saving());

        tokio::time::sleep(Duration::from_millis(201)).await;
        assert!(!indicator.is_saving());
    }

    #[tokio::test(start_paused = true)]
    async fn restart_as_the_old_timer_expires_keeps_the_flag_on() {
        let indicator = SaveIndicator::new(Duration::from_millis(800));
        indicator.start();

        // Restart at the instant the first timer comes due.
        tokio::time::advance(Duration::from_millis(800)).await;
        indicator.start();
        tokio::task::yield_now().await;
        assert!(indicator.is_saving());

        tokio::time::sleep(Duration::from_millis(801)).await;
        assert!(!indicator.is_saving());
    }

    #[tokio::test(start_paused = true)]
    async fn stale_timer_cannot_clear_a_newer_save() {
        let indicator = SaveIndicator::new(Duration::from_millis(800));
        indicator.start();
        let stale = indicator.active.load(Ordering::SeqCst);
        indicator.start();

        // What a first timer that woke up before its abort would do.
        let _ = indicator.active.compare_exchange(stale, 0, Ordering::SeqCst, Ordering::SeqCst);
        assert!(indicator.is_saving());
    }
}
