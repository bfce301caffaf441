//! # `shroud` - Layout-Erased Manual-Lifetime Storage
//!
//! A toolkit for holding values of arbitrary types in storage that never
//! triggers the language's automatic lifecycle machinery on its own.
//! Values are kept in an "erased shape" (a layout-identical, hook-free
//! representation) and set, read, replaced, moved out, and destroyed
//! entirely under caller control.
//!
//! ## Safety Guarantees
//!
//! ### Layout Fidelity
//! - **Compile-time validation**: every erased shape is checked for size
//!   and alignment equality against its source type; a mismatch halts
//!   compilation for that type, never surfaces at runtime.
//! - **No raw exposure**: the erased bytes are never handed out by
//!   reference; all reads go through the typed API.
//!
//! ### Lifecycle Discipline
//! - **Nothing implicit**: the raw slot has no `Drop` impl. The only
//!   operation that ever runs a destructor is an explicit `destroy`.
//! - **Fail-fast contracts**: debug builds track slot occupancy and panic
//!   on protocol violations; the state-mutating misuses are `unsafe` in
//!   all builds.
//! - **Safe wrappers**: [`OptionSlot`] restores scoped release on every
//!   exit path, so only the raw layer demands manual pairing.
//!
//! ## Architecture
//!
//! Four layers, each depending only downward:
//!
//! 1. **Shape erasure** ([`shape`]): the [`Erase`] trait maps a type to a
//!    layout-identical storage shape with no behavioral attachments, plus
//!    the [`is_reference_traceable`] ownership predicate.
//! 2. **Slots** ([`Slot`]): one manually-managed storage location shaped
//!    like the erased type, with explicit set/get/replace/take/destroy.
//! 3. **Optional values** ([`OptionSlot`]): a presence flag over one slot,
//!    giving safe option semantics for any erasable type.
//! 4. **Keyed tables** ([`SlotTable`]): a hash table whose values live in
//!    slots, so reassignment replaces values in place.
//!
//! ## Example
//!
//! ```rust
//! use shroud::{Slot, SlotTable};
//!
//! // Fully manual: the slot never cleans up behind your back.
//! let mut slot = Slot::new(vec![1u8, 2, 3]);
//! let bytes = unsafe { slot.take() };
//! assert_eq!(bytes.len(), 3);
//!
//! // Keyed storage with in-place replacement.
//! let mut table = SlotTable::new();
//! table.insert("config", String::from("v1"));
//! table.insert("config", String::from("v2"));
//! assert_eq!(table.get(&"config").as_deref(), Ok("v2"));
//! table.clear();
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod error;
pub mod optional;
pub mod shape;
pub mod slot;
pub mod table;

pub use error::NotFound;
pub use optional::OptionSlot;
pub use shape::{
    is_reference_traceable, Erase, ErasedClosure, ErasedRef, ErasedSeq, ErasedVec, OpaqueBlob,
};
pub use slot::Slot;
pub use table::SlotTable;
