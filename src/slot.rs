//! `Slot` — a single manually-managed storage location.
//!
//! A slot holds at most one value of `T`, stored inside the erased shape
//! `T::Erased` so that none of `T`'s declared behavior (destructor, clone
//! hooks, interior qualifiers) can fire on its own. Every lifecycle
//! event is an explicit call: [`Slot::set`] begins a value's residence,
//! [`Slot::destroy`] or [`Slot::take`] ends it. The slot itself has no
//! `Drop` impl; dropping an occupied slot leaks the value by design.
//!
//! ## State discipline
//!
//! A slot is either `Empty` or `Occupied`. The discipline is
//! caller-enforced:
//!
//! - `set` requires `Empty` (violating this leaks the prior value);
//! - `get`, `replace`, `take`, `destroy` require `Occupied` (violating
//!   this is undefined behavior, which is why they are `unsafe`).
//!
//! Debug builds additionally track occupancy and panic on any violation;
//! release builds document the contract and do not check.

use core::mem::MaybeUninit;
use core::ptr;

use crate::shape::Erase;

/// A single-slot manually-managed storage location shaped like
/// `T::Erased`.
///
/// # Examples
///
/// ```rust
/// use shroud::Slot;
///
/// let mut slot = Slot::new(String::from("manual"));
/// // Ownership moves out; the slot is empty afterwards and needs no
/// // further cleanup.
/// let value = unsafe { slot.take() };
/// assert_eq!(value, "manual");
/// ```
pub struct Slot<T: Erase> {
    raw: MaybeUninit<T::Erased>,
    #[cfg(debug_assertions)]
    occupied: bool,
}

impl<T: Erase> Slot<T> {
    /// Creates an empty slot.
    ///
    /// Instantiating a slot forces the compile-time layout validation of
    /// `T`'s erased shape.
    #[inline(always)]
    pub const fn empty() -> Self {
        let _: () = T::LAYOUT_OK;
        Self {
            raw: MaybeUninit::uninit(),
            #[cfg(debug_assertions)]
            occupied: false,
        }
    }

    /// Creates an occupied slot holding `value`.
    ///
    /// Equivalent to [`Slot::empty`] followed by [`Slot::set`].
    #[inline]
    pub fn new(value: T) -> Self {
        let mut slot = Self::empty();
        slot.set(value);
        slot
    }

    /// Stores `value` into an empty slot.
    ///
    /// The move is bitwise; no clone hook runs and no destructor runs on
    /// the origin (ownership transfers into the slot).
    ///
    /// Contract: the slot must be `Empty`. Violating this in a release
    /// build overwrites the occupant without destroying it (a leak, never
    /// undefined behavior), so this operation is safe.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if the slot is occupied.
    #[inline]
    pub fn set(&mut self, value: T) {
        #[cfg(debug_assertions)]
        {
            assert!(!self.occupied, "Slot::set called on an occupied slot");
            self.occupied = true;
        }
        // SAFETY: `T::Erased` matches `T`'s size and alignment
        // (`LAYOUT_OK`), so the cast pointer is valid for a write of `T`.
        unsafe { ptr::write(self.raw.as_mut_ptr().cast::<T>(), value) };
    }

    /// Returns a bit-for-bit duplicate of the stored value without
    /// changing state.
    ///
    /// No clone hook runs: after this call two bitwise copies of the value
    /// exist and the caller must resolve the doubled ownership, typically
    /// by forgetting one copy, or by ensuring only one of them is ever
    /// destroyed.
    ///
    /// # Safety
    ///
    /// The slot must be `Occupied`, and the caller must prevent both
    /// copies from being destroyed.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if the slot is empty.
    #[inline]
    pub unsafe fn get(&self) -> T {
        #[cfg(debug_assertions)]
        assert!(self.occupied, "Slot::get called on an empty slot");
        // SAFETY: caller asserts occupancy; the slot holds a live `T`.
        unsafe { ptr::read(self.raw.as_ptr().cast::<T>()) }
    }

    /// Destroys the stored value, then stores `value` in its place.
    ///
    /// The old value is destroyed exactly once before the new value is
    /// written.
    ///
    /// # Safety
    ///
    /// The slot must be `Occupied`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if the slot is empty.
    #[inline]
    pub unsafe fn replace(&mut self, value: T) {
        // SAFETY: caller asserts occupancy.
        unsafe { self.destroy() };
        self.set(value);
    }

    /// Moves the stored value out, transitioning to `Empty` without
    /// running any destructor.
    ///
    /// Ownership transfers to the caller, who now holds the one live copy.
    ///
    /// # Safety
    ///
    /// The slot must be `Occupied`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if the slot is empty.
    #[inline]
    pub unsafe fn take(&mut self) -> T {
        #[cfg(debug_assertions)]
        {
            assert!(self.occupied, "Slot::take called on an empty slot");
            self.occupied = false;
        }
        // SAFETY: caller asserts occupancy; the slot is marked empty so the
        // value has exactly one owner afterwards.
        unsafe { ptr::read(self.raw.as_ptr().cast::<T>()) }
    }

    /// Destroys the stored value in place and transitions to `Empty`.
    ///
    /// For reference-like types this releases the handle; for plain data
    /// it is a no-op on the bytes. The slot is not re-initialized.
    ///
    /// # Safety
    ///
    /// The slot must be `Occupied`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if the slot is empty.
    #[inline]
    pub unsafe fn destroy(&mut self) {
        #[cfg(debug_assertions)]
        {
            assert!(self.occupied, "Slot::destroy called on an empty slot");
            self.occupied = false;
        }
        // SAFETY: caller asserts occupancy; drop runs at most once because
        // the slot transitions to `Empty`.
        unsafe { ptr::drop_in_place(self.raw.as_mut_ptr().cast::<T>()) };
    }

    /// Borrows the stored value.
    ///
    /// Kept crate-internal: the raw slot is never exposed by reference to
    /// callers, only the safe wrappers read through it.
    ///
    /// # Safety
    ///
    /// The slot must be `Occupied`.
    #[inline(always)]
    pub(crate) unsafe fn peek(&self) -> &T {
        #[cfg(debug_assertions)]
        assert!(self.occupied, "Slot::peek called on an empty slot");
        // SAFETY: caller asserts occupancy.
        unsafe { &*self.raw.as_ptr().cast::<T>() }
    }
}

// SAFETY: a slot logically owns at most one `T`; the erased storage adds
// no sharing. Sending or sharing the slot is exactly sending or sharing
// the owned value.
unsafe impl<T: Erase + Send> Send for Slot<T> {}
unsafe impl<T: Erase + Sync> Sync for Slot<T> {}
