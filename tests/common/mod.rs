//! Shared instrumented fixture: a value type that counts logical
//! constructions and destructions, failing loudly on a double release.

#![allow(dead_code)]

use std::sync::atomic::{AtomicIsize, Ordering};
use std::sync::Arc;

use shroud::erase_fields;

/// A value whose clones increment, and drops decrement, a shared live
/// counter. Dropping below zero panics, pinning double-free bugs.
pub struct Counted {
    live: Arc<AtomicIsize>,
    pub value: u64,
}

impl Counted {
    pub fn new(live: &Arc<AtomicIsize>, value: u64) -> Self {
        live.fetch_add(1, Ordering::SeqCst);
        Self {
            live: Arc::clone(live),
            value,
        }
    }
}

impl Clone for Counted {
    fn clone(&self) -> Self {
        self.live.fetch_add(1, Ordering::SeqCst);
        Self {
            live: Arc::clone(&self.live),
            value: self.value,
        }
    }
}

impl Drop for Counted {
    fn drop(&mut self) {
        let previous = self.live.fetch_sub(1, Ordering::SeqCst);
        assert!(previous > 0, "Counted released more times than constructed");
    }
}

impl PartialEq for Counted {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl std::fmt::Debug for Counted {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Counted").field("value", &self.value).finish()
    }
}

erase_fields!(Counted => CountedErased {
    live: Arc<AtomicIsize>,
    value: u64,
});

/// Creates a fresh live counter for one test.
pub fn counter() -> Arc<AtomicIsize> {
    Arc::new(AtomicIsize::new(0))
}

/// Reads the current live count.
pub fn live(counter: &Arc<AtomicIsize>) -> isize {
    counter.load(Ordering::SeqCst)
}
