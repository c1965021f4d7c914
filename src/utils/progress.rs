use std::sync::Mutex;

use indicatif::{ProgressBar, ProgressStyle};
use lazy_static::lazy_static;

lazy_static! {
    // Bar currently drawn on stderr, if any
    static ref ACTIVE_BAR: Mutex<Option<ProgressBar>> = Mutex::new(None);
}

/// Progress bar over the catalog regions of a run
///
/// While a tracker is alive, console output should go through
/// [`suspend_active`] so lines are not drawn over the bar.
pub struct ProgressTracker {
    bar: ProgressBar,
}

impl ProgressTracker {
    pub fn new(total: u64, description: &str) -> Self {
        let bar = ProgressBar::new(total);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
        {
            bar.set_style(style.progress_chars("#>-"));
        }
        bar.set_message(description.to_string());
        set_active(Some(bar.clone()));

        ProgressTracker {
            bar,
        }
    }

    pub fn increment(&self, amount: u64) {
        self.bar.inc(amount);
    }

    pub fn finish(&self) {
        self.bar.finish_with_message("Completed");
        set_active(None);
    }

    pub fn set_message(&self, msg: &str) {
        self.bar.set_message(msg.to_string());
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        set_active(None);
    }
}

fn set_active(bar: Option<ProgressBar>) {
    let mut active = match ACTIVE_BAR.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    *active = bar;
}

/// Run `f` with the active progress bar hidden, or directly if there is none
pub fn suspend_active<F: FnOnce() -> R, R>(f: F) -> R {
    let bar = match ACTIVE_BAR.lock() {
        Ok(guard) => guard.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    };
    match bar {
        Some(bar) => bar.suspend(f),
        None => f(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suspend_runs_with_and_without_a_bar() {
        assert_eq!(suspend_active(|| 1), 1);

        let tracker = ProgressTracker::new(3, "Extracting regions");
        tracker.increment(1);
        assert_eq!(suspend_active(|| 2), 2);
        drop(tracker);

        assert_eq!(suspend_active(|| 3), 3);
    }
}
