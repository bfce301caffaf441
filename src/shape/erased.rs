//! Plain-data building blocks for erased layouts.
//!
//! Every type in this module is hook-free: no `Drop`, no `Clone` behavior
//! beyond a bitwise copy, and no validity requirement stronger than "these
//! bytes exist". They are never constructed directly by callers; they exist
//! only so that `T::Erased` can name a storage representation with the same
//! size and alignment as `T`.

use core::mem::MaybeUninit;

/// One untyped, nullable reference word.
///
/// This is the erased form of every single-pointer handle: `Box<T>`,
/// `Rc<T>`, `Arc<T>`, `NonNull<T>`, raw pointers, and plain references.
/// The pointee type is deliberately forgotten; only the address-sized
/// region it occupies is preserved.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct ErasedRef {
    /// The preserved address word. Null when the origin handle was null.
    pub addr: *const (),
}

impl ErasedRef {
    /// A null reference word.
    #[inline(always)]
    pub const fn null() -> Self {
        Self {
            addr: core::ptr::null(),
        }
    }

    /// Returns `true` if the preserved address is null.
    #[inline(always)]
    pub fn is_null(&self) -> bool {
        self.addr.is_null()
    }
}

/// The erased form of a two-word sequence handle (`&[T]`, `Box<[T]>`,
/// `&str`, `Box<str>`): one data reference plus one length word.
///
/// Field order here is fixed by `repr(C)`; the origin handle's internal
/// order is unspecified by the language, so only size and alignment are
/// guaranteed to agree, which is all the storage layer relies on.
#[repr(C)]
pub struct ErasedSeq {
    /// Reference to the first element.
    pub data: ErasedRef,
    /// Element count.
    pub len: usize,
}

/// The erased form of a growable sequence (`Vec<T>`, `String`): data
/// reference, capacity, and length.
///
/// The host representation carries a capacity word in addition to the
/// classic (length, reference) pair, so the erased shape does too.
#[repr(C)]
pub struct ErasedVec {
    /// Reference to the heap buffer.
    pub data: ErasedRef,
    /// Allocated capacity in elements.
    pub cap: usize,
    /// Live element count.
    pub len: usize,
}

/// The erased form of a boxed closure object: a context reference and an
/// entry reference.
///
/// For `Box<dyn Fn…>` the context is the captured environment and the
/// entry is the vtable; both collapse to opaque words.
#[repr(C)]
pub struct ErasedClosure {
    /// Reference to the captured environment.
    pub context: ErasedRef,
    /// Reference to the callable entry (vtable).
    pub entry: ErasedRef,
}

/// An opaque blob with exactly the size and alignment of `T`.
///
/// This is the conservative fallback: it preserves the storage region of
/// `T` without attempting to decompose it. Used for union-like types whose
/// fields overlap, for sum types whose live variant cannot be determined
/// structurally, and for native associative containers.
#[repr(transparent)]
pub struct OpaqueBlob<T> {
    /// The preserved byte region. `MaybeUninit` guarantees the absence of
    /// any validity or drop obligation.
    pub bytes: MaybeUninit<T>,
}
