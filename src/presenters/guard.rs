//! Scoped view-state guards and the presenter lifetime token.
//!
//! Guards release what they acquired on drop, so success, failure and early
//! return all leave the view consistent.

use crate::domain::MessageId;
use crate::ports::{BusyIndicator, MessageSink};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Busy flag held for the guard's scope.
pub(crate) struct BusyGuard<'a, V: BusyIndicator + ?Sized> {
    view: &'a V,
}

impl<'a, V: BusyIndicator + ?Sized> BusyGuard<'a, V> {
    pub(crate) fn engage(view: &'a V) -> Self {
        view.set_busy(true);
        Self { view }
    }
}

impl<V: BusyIndicator + ?Sized> Drop for BusyGuard<'_, V> {
    fn drop(&mut self) {
        self.view.set_busy(false);
    }
}

/// Info message shown until the guard drops.
pub(crate) struct TransientMessage<'a, V: MessageSink + ?Sized> {
    view: &'a V,
    id: MessageId,
}

impl<'a, V: MessageSink + ?Sized> TransientMessage<'a, V> {
    pub(crate) fn show(view: &'a V, message: &str) -> Self {
        let id = view.display_info_message(message, Duration::ZERO);
        Self { view, id }
    }
}

impl<V: MessageSink + ?Sized> Drop for TransientMessage<'_, V> {
    fn drop(&mut self) {
        self.view.delete_message(&self.id);
    }
}

/// At most one operation of a kind per presenter instance.
#[derive(Debug, Default)]
pub(crate) struct InFlight(AtomicBool);

impl InFlight {
    /// `None` if an operation already holds the slot.
    pub(crate) fn try_begin(&self) -> Option<InFlightGuard<'_>> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard(&self.0))
    }

    pub(crate) fn is_active(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

pub(crate) struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Lifetime of a presenter instance. Once cancelled, pending service calls
/// are dropped and their results never reach the view.
#[derive(Debug, Default)]
pub(crate) struct Lifetime(CancellationToken);

impl Lifetime {
    pub(crate) fn cancel(&self) {
        self.0.cancel();
    }

    /// A narrower lifetime that ends with this one or when cancelled on its own.
    pub(crate) fn child(&self) -> Self {
        Self(self.0.child_token())
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.0.is_cancelled()
    }

    /// Await `fut` unless the lifetime ends first.
    pub(crate) async fn guard<F: Future>(&self, fut: F) -> Option<F::Output> {
        tokio::select! {
            biased;
            _ = self.0.cancelled() => None,
            out = fut => Some(out),
        }
    }
}
