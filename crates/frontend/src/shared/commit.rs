use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use leptos::prelude::on_cleanup;
use wasm_bindgen_futures::spawn_local;

/// Liveness token for one modal.
///
/// Async requests started from a modal deliver their result only while the
/// modal that started them is still open. Anything resolving later is
/// dropped with a debug log.
#[derive(Debug, Clone)]
pub struct CommitScope {
    alive: Arc<AtomicBool>,
    label: &'static str,
}

impl CommitScope {
    pub fn new(label: &'static str) -> Self {
        Self {
            alive: Arc::new(AtomicBool::new(true)),
            label,
        }
    }

    /// Scope cancelled when the current reactive owner is disposed.
    pub fn for_owner(label: &'static str) -> Self {
        let scope = Self::new(label);
        let on_drop = scope.clone();
        on_cleanup(move || on_drop.cancel());
        scope
    }

    pub fn cancel(&self) {
        self.alive.store(false, Ordering::Release);
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    /// Hands `value` to `apply` if the scope is still alive.
    pub fn deliver<T>(&self, value: T, apply: impl FnOnce(T)) -> bool {
        if self.is_alive() {
            apply(value);
            true
        } else {
            log::debug!("{}: dropping result of a closed modal", self.label);
            false
        }
    }

    /// Spawns `request` and applies its output only if the scope survives
    /// until it resolves.
    pub fn commit<Fut, T>(&self, request: Fut, apply: impl FnOnce(T) + 'static)
    where
        Fut: Future<Output = T> + 'static,
        T: 'static,
    {
        let scope = self.clone();
        spawn_local(async move {
            let value = request.await;
            scope.deliver(value, apply);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_deliver_while_alive() {
        let scope = CommitScope::new("test");
        let seen = Cell::new(0);
        assert!(scope.deliver(3, |v| seen.set(v)));
        assert_eq!(seen.get(), 3);
    }

    #[test]
    fn test_cancel_drops_late_result() {
        let scope = CommitScope::new("test");
        let held_by_request = scope.clone();
        scope.cancel();

        let seen = Cell::new(false);
        assert!(!held_by_request.is_alive());
        assert!(!held_by_request.deliver((), |_| seen.set(true)));
        assert!(!seen.get());
    }
}
