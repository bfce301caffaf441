//! `Erase` implementations for the host language's built-in shapes.

use core::ptr::NonNull;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

use super::{Erase, ErasedClosure, ErasedRef, ErasedSeq, ErasedVec, OpaqueBlob};

// Rule: primitive scalars map to an unqualified primitive of the same
// representation; in this host, themselves.
macro_rules! erase_identity {
    ($($ty:ty),+ $(,)?) => {
        $(
            // SAFETY: the erased shape is the type itself; scalars have no
            // lifecycle hooks to strip.
            unsafe impl Erase for $ty {
                type Erased = $ty;
                const REFERENCE_TRACEABLE: bool = false;
            }
        )+
    };
}

erase_identity!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64, bool, char, ()
);

// Rule: reference-like types collapse to a single nullable reference word.
// Owning handles are traceable (destroy must release them); borrows and raw
// pointers carry no ownership.

// SAFETY: `Box<T>` is one pointer word for sized `T`; `ErasedRef` matches.
unsafe impl<T> Erase for Box<T> {
    type Erased = ErasedRef;
    const REFERENCE_TRACEABLE: bool = true;
}

// SAFETY: `Rc<T>` is one pointer word; `ErasedRef` matches.
unsafe impl<T> Erase for Rc<T> {
    type Erased = ErasedRef;
    const REFERENCE_TRACEABLE: bool = true;
}

// SAFETY: `Arc<T>` is one pointer word; `ErasedRef` matches.
unsafe impl<T> Erase for Arc<T> {
    type Erased = ErasedRef;
    const REFERENCE_TRACEABLE: bool = true;
}

// SAFETY: shared references are one pointer word for sized pointees.
unsafe impl<'a, T> Erase for &'a T {
    type Erased = ErasedRef;
    const REFERENCE_TRACEABLE: bool = false;
}

// SAFETY: exclusive references are one pointer word for sized pointees.
unsafe impl<'a, T> Erase for &'a mut T {
    type Erased = ErasedRef;
    const REFERENCE_TRACEABLE: bool = false;
}

// SAFETY: raw pointers are one pointer word for sized pointees.
unsafe impl<T> Erase for *const T {
    type Erased = ErasedRef;
    const REFERENCE_TRACEABLE: bool = false;
}

// SAFETY: raw pointers are one pointer word for sized pointees.
unsafe impl<T> Erase for *mut T {
    type Erased = ErasedRef;
    const REFERENCE_TRACEABLE: bool = false;
}

// SAFETY: `NonNull<T>` is one pointer word; the erased form additionally
// admits null, which only widens the set of representable bytes.
unsafe impl<T> Erase for NonNull<T> {
    type Erased = ErasedRef;
    const REFERENCE_TRACEABLE: bool = false;
}

// Rule: two-word sequence handles collapse to (reference, length).

// SAFETY: slice references are two words; `ErasedSeq` matches in size and
// alignment (internal word order is not relied upon).
unsafe impl<'a, T> Erase for &'a [T] {
    type Erased = ErasedSeq;
    const REFERENCE_TRACEABLE: bool = false;
}

// SAFETY: as for `&[T]`.
unsafe impl<'a, T> Erase for &'a mut [T] {
    type Erased = ErasedSeq;
    const REFERENCE_TRACEABLE: bool = false;
}

// SAFETY: as for `&[T]`.
unsafe impl<'a> Erase for &'a str {
    type Erased = ErasedSeq;
    const REFERENCE_TRACEABLE: bool = false;
}

// SAFETY: `Box<[T]>` is a two-word owning handle.
unsafe impl<T> Erase for Box<[T]> {
    type Erased = ErasedSeq;
    const REFERENCE_TRACEABLE: bool = true;
}

// SAFETY: `Box<str>` is a two-word owning handle.
unsafe impl Erase for Box<str> {
    type Erased = ErasedSeq;
    const REFERENCE_TRACEABLE: bool = true;
}

// Rule: growable sequences carry a capacity word in this host.

// SAFETY: `Vec<T>` is (pointer, capacity, length); `ErasedVec` matches in
// size and alignment.
unsafe impl<T> Erase for Vec<T> {
    type Erased = ErasedVec;
    const REFERENCE_TRACEABLE: bool = true;
}

// SAFETY: `String` shares `Vec<u8>`'s representation.
unsafe impl Erase for String {
    type Erased = ErasedVec;
    const REFERENCE_TRACEABLE: bool = true;
}

// Rule: closures collapse to (context reference, entry reference); plain
// function pointers are a single code reference.
macro_rules! erase_callable {
    ($($arg:ident),*) => {
        // SAFETY: a boxed closure object is (data pointer, vtable pointer);
        // `ErasedClosure` matches in size and alignment.
        unsafe impl<R, $($arg),*> Erase for Box<dyn Fn($($arg),*) -> R> {
            type Erased = ErasedClosure;
            const REFERENCE_TRACEABLE: bool = true;
        }

        // SAFETY: as for `Box<dyn Fn…>`.
        unsafe impl<R, $($arg),*> Erase for Box<dyn FnMut($($arg),*) -> R> {
            type Erased = ErasedClosure;
            const REFERENCE_TRACEABLE: bool = true;
        }

        // SAFETY: a function pointer is one code-address word.
        unsafe impl<R, $($arg),*> Erase for fn($($arg),*) -> R {
            type Erased = ErasedRef;
            const REFERENCE_TRACEABLE: bool = false;
        }
    };
}

erase_callable!();
erase_callable!(A);
erase_callable!(A, B);
erase_callable!(A, B, C);
erase_callable!(A, B, C, D);

// Rule: fixed-size arrays erase the element, preserve the count.

// SAFETY: `[T::Erased; N]` has element-wise identical size and alignment,
// so the array layouts agree.
unsafe impl<T: Erase, const N: usize> Erase for [T; N] {
    type Erased = [T::Erased; N];
    const REFERENCE_TRACEABLE: bool = T::REFERENCE_TRACEABLE;
}

// Rule: sum types cannot be decomposed structurally (the live variant is
// not knowable from the layout), so they erase to an exact-size blob.

// SAFETY: `OpaqueBlob<Self>` trivially preserves size and alignment.
unsafe impl<T: Erase> Erase for Option<T> {
    type Erased = OpaqueBlob<Option<T>>;
    const REFERENCE_TRACEABLE: bool = T::REFERENCE_TRACEABLE;
}

// SAFETY: `OpaqueBlob<Self>` trivially preserves size and alignment.
unsafe impl<T: Erase, E: Erase> Erase for Result<T, E> {
    type Erased = OpaqueBlob<Result<T, E>>;
    const REFERENCE_TRACEABLE: bool = T::REFERENCE_TRACEABLE || E::REFERENCE_TRACEABLE;
}

// Rule: native associative maps are opaque reference-bearing blobs.

// SAFETY: `OpaqueBlob<Self>` trivially preserves size and alignment.
unsafe impl<K, V, S> Erase for HashMap<K, V, S> {
    type Erased = OpaqueBlob<HashMap<K, V, S>>;
    const REFERENCE_TRACEABLE: bool = true;
}
