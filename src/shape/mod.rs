//! Layout erasure — mapping a value type to a hook-free storage shape.
//!
//! The [`Erase`] trait is a pure type-level function: for any implementing
//! `T`, `T::Erased` names a type with the same size and alignment as `T`
//! but none of its behavioral attachments: no destructor and no clone
//! behavior. The storage layer ([`crate::Slot`])
//! holds values inside `MaybeUninit<T::Erased>` so that every lifecycle
//! event is explicit.
//!
//! ## Structural rules
//!
//! - Product types decompose field-by-field ([`erase_fields!`](crate::erase_fields));
//!   overlapping-field types fall back to an exact-size blob
//!   ([`erase_opaque!`](crate::erase_opaque)).
//! - Sum types and native maps are opaque blobs (the live variant cannot
//!   be distinguished structurally).
//! - Single-pointer handles collapse to [`ErasedRef`].
//! - Sequence handles collapse to [`ErasedSeq`] / [`ErasedVec`].
//! - Boxed closures collapse to [`ErasedClosure`].
//! - Enumerations substitute their declared integer representation
//!   ([`erase_enum!`](crate::erase_enum)).
//! - Fixed arrays erase element-wise; scalars map to themselves.
//!
//! ## Layout postcondition
//!
//! Size and alignment equality are enforced by [`Erase::LAYOUT_OK`], a
//! const assertion evaluated whenever a slot for `T` is instantiated. A
//! violation is a compile-time failure, never a runtime error.
//!
//! ## Traceability
//!
//! This crate targets a runtime without a tracing collector, so the
//! classic "must the collector scan this region" predicate relaxes to an
//! ownership predicate: [`Erase::REFERENCE_TRACEABLE`] reports whether the
//! erased layout contains owned handles that an explicit destroy must
//! release. Borrowed references and raw pointers carry no ownership and
//! are not traceable.

mod erased;
mod impls;
mod macros;

pub use erased::{ErasedClosure, ErasedRef, ErasedSeq, ErasedVec, OpaqueBlob};

/// Maps a value type to a layout-identical, hook-free storage shape.
///
/// # Safety
///
/// Implementors guarantee that `Self::Erased` has exactly the size and
/// alignment of `Self` (checked by [`Erase::LAYOUT_OK`]) and that
/// `Self::Erased` has no `Drop` impl and no validity requirement, so that
/// arbitrary bytes, including uninitialized ones behind `MaybeUninit`,
/// may occupy it. The storage layer writes live `Self` values into
/// `Self::Erased` storage through pointer casts on the strength of this
/// guarantee.
///
/// Prefer the [`erase_fields!`](crate::erase_fields),
/// [`erase_enum!`](crate::erase_enum) and
/// [`erase_opaque!`](crate::erase_opaque) macros over hand-written impls;
/// they generate the layout assertions alongside the impl.
pub unsafe trait Erase: Sized {
    /// The erased storage shape: same size and alignment as `Self`, no
    /// lifecycle hooks.
    type Erased;

    /// Whether the erased layout contains owned handles that an explicit
    /// destroy must release.
    const REFERENCE_TRACEABLE: bool;

    /// Compile-time layout validation.
    ///
    /// Evaluated at every slot instantiation for `Self`; a size or
    /// alignment mismatch halts compilation for that type. Implementors
    /// must not override the default.
    const LAYOUT_OK: () = {
        assert!(
            core::mem::size_of::<Self>() == core::mem::size_of::<Self::Erased>(),
            "erased shape size differs from the source type"
        );
        assert!(
            core::mem::align_of::<Self>() == core::mem::align_of::<Self::Erased>(),
            "erased shape alignment differs from the source type"
        );
    };
}

/// Returns whether `T`'s erased layout contains owned handles needing an
/// explicit release.
///
/// Usable by generic containers that must decide whether storing `T`
/// obliges them to run per-value destroys on teardown.
#[inline(always)]
pub const fn is_reference_traceable<T: Erase>() -> bool {
    T::REFERENCE_TRACEABLE
}
