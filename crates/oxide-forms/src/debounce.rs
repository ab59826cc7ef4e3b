//! One cancelable async-validation slot per field.

use tokio::task::JoinHandle;

/// Holds the single live async check for a field.
///
/// Every scheduled check gets a generation number. Scheduling a new check
/// aborts the previous task and bumps the generation, so a check that was
/// already past its last await point still cannot write a stale result.
#[derive(Debug, Default)]
pub struct TaskSlot {
    generation: u64,
    handle: Option<JoinHandle<()>>,
}

impl TaskSlot {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels any live check and returns the generation for the next one.
    pub fn begin(&mut self) -> u64 {
        self.cancel();
        self.generation
    }

    /// Attaches the task running the check for `generation`.
    ///
    /// A handle for an outdated generation is aborted immediately.
    pub fn attach(&mut self, generation: u64, handle: JoinHandle<()>) {
        if generation == self.generation {
            self.handle = Some(handle);
        } else {
            handle.abort();
        }
    }

    /// Aborts the live check, if any, and invalidates its generation.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
        self.generation = self.generation.wrapping_add(1);
    }

    /// Returns whether `generation` is still the live check.
    pub const fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Settles the check for `generation`.
    ///
    /// Returns `true` when the caller may publish its result.
    pub fn finish(&mut self, generation: u64) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.handle = None;
        true
    }

    /// Returns whether a check is attached and not yet settled.
    pub const fn is_pending(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for TaskSlot {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn test_newer_generation_wins() {
        let mut slot = TaskSlot::new();

        let first = slot.begin();
        slot.attach(first, tokio::spawn(async {}));
        let second = slot.begin();

        assert_ne!(first, second);
        assert!(!slot.finish(first));
        assert!(slot.finish(second));
    }

    fn flag_after(delay_ms: u64, flag: &Arc<AtomicBool>) -> JoinHandle<()> {
        let flag = Arc::clone(flag);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            flag.store(true, Ordering::SeqCst);
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_begin_aborts_previous_task() {
        let fired = Arc::new(AtomicBool::new(false));
        let mut slot = TaskSlot::new();

        let generation = slot.begin();
        slot.attach(generation, flag_after(10, &fired));
        assert!(slot.is_pending());

        slot.begin();
        assert!(!slot.is_pending());
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!fired.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_attach_is_aborted() {
        let fired = Arc::new(AtomicBool::new(false));
        let mut slot = TaskSlot::new();
        let stale = slot.begin();
        slot.cancel();

        slot.attach(stale, flag_after(10, &fired));
        assert!(!slot.is_pending());
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!fired.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_live_task() {
        let fired = Arc::new(AtomicBool::new(false));
        {
            let mut slot = TaskSlot::new();
            let generation = slot.begin();
            slot.attach(generation, flag_after(10, &fired));
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!fired.load(Ordering::SeqCst));
    }
}
