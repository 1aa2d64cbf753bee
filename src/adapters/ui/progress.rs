//! Busy indicator backed by an indicatif spinner.
//!
//! Several presenters may be busy at once; the spinner stays up until the last one clears.

use indicatif::{ProgressBar, ProgressStyle};
use parking_lot::Mutex;
use std::time::Duration;

#[derive(Default)]
struct Inner {
    holders: usize,
    bar: Option<ProgressBar>,
}

#[derive(Default)]
pub struct BusySpinner {
    inner: Mutex<Inner>,
}

impl BusySpinner {
    pub fn set_busy(&self, busy: bool) {
        let mut inner = self.inner.lock();
        if busy {
            inner.holders += 1;
            if inner.bar.is_none() {
                let bar = ProgressBar::new_spinner();
                if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
                    bar.set_style(style);
                }
                bar.set_message("Working...");
                bar.enable_steady_tick(Duration::from_millis(80));
                inner.bar = Some(bar);
            }
        } else {
            inner.holders = inner.holders.saturating_sub(1);
            if inner.holders == 0 {
                if let Some(bar) = inner.bar.take() {
                    bar.finish_and_clear();
                }
            }
        }
    }

    pub fn is_busy(&self) -> bool {
        self.inner.lock().holders > 0
    }

    /// Run `f` with the spinner hidden so printed lines do not tear.
    pub fn suspend<R>(&self, f: impl FnOnce() -> R) -> R {
        let bar = self.inner.lock().bar.clone();
        match bar {
            Some(bar) => bar.suspend(f),
            None => f(),
        }
    }
}
