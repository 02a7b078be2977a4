//! Thread-safe wrapper that serializes and coalesces recomputations.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, TryLockError};

use tracing::Instrument;
use variant_model::AvailabilitySet;

use crate::behavior::{CombinationsBehavior, LoadOutcome};
use crate::fetch::CombinationSource;
use crate::selection_source::SelectionSource;

/// A [`CombinationsBehavior`] shared between threads.
///
/// At most one recomputation runs at a time. Selection changes reported while
/// one is running are folded into a single follow-up pass by whichever
/// thread holds the behavior.
pub struct SharedBehavior<U> {
    inner: Arc<Mutex<CombinationsBehavior<U>>>,
    pending: Arc<AtomicBool>,
}

impl<U> Clone for SharedBehavior<U> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            pending: Arc::clone(&self.pending),
        }
    }
}

impl<U: SelectionSource> SharedBehavior<U> {
    pub fn new(behavior: CombinationsBehavior<U>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(behavior)),
            pending: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Fetch combinations without holding the lock across the request.
    pub async fn load_combinations<S: CombinationSource>(&self, source: &S) -> LoadOutcome {
        let (started, disposed, scope) = self.with(|behavior| {
            let started = behavior.begin_load();
            let scope = behavior.settings().content_scope.to_string();
            (started, behavior.is_disposed(), scope)
        });
        if !started {
            return if disposed {
                LoadOutcome::Ignored
            } else {
                LoadOutcome::AlreadyRequested
            };
        }
        let span = tracing::debug_span!("load_combinations", scope = %scope);
        let result = source.fetch().instrument(span).await;
        self.with(|behavior| behavior.apply_fetch_result(result))
    }

    /// Report a selection change.
    ///
    /// Returns the availability computed by this call, or `None` when another
    /// thread is recomputing and will pick the change up.
    pub fn notify_selection_changed(&self) -> Option<AvailabilitySet> {
        self.pending.store(true, Ordering::Release);
        self.drain()
    }

    /// Run `f` with exclusive access; changes reported meanwhile are
    /// processed once the lock is released.
    ///
    /// Every lock site goes through here so no deferred change is left behind.
    pub fn with<R>(&self, f: impl FnOnce(&mut CombinationsBehavior<U>) -> R) -> R {
        let result = {
            let mut guard = self.lock();
            f(&mut guard)
        };
        self.drain();
        result
    }

    pub fn dispose(&self) {
        self.with(|behavior| behavior.dispose());
    }

    fn lock(&self) -> MutexGuard<'_, CombinationsBehavior<U>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn drain(&self) -> Option<AvailabilitySet> {
        let mut last = None;
        loop {
            let mut guard = match self.inner.try_lock() {
                Ok(guard) => guard,
                Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
                Err(TryLockError::WouldBlock) => return last,
            };
            while self.pending.swap(false, Ordering::AcqRel) {
                last = guard.on_selection_changed();
            }
            drop(guard);
            // A trigger may have landed between the last swap and the unlock.
            if !self.pending.load(Ordering::Acquire) {
                return last;
            }
        }
    }
}
