//! Macros deriving [`Erase`](crate::shape::Erase) impls for user types.
//!
//! Hand-written `Erase` impls are easy to get subtly wrong; these macros
//! generate the impl together with the const layout assertions, so a
//! mismatch halts compilation instead of corrupting storage.

/// Derives `Erase` for a product type by erasing it field-by-field.
///
/// Generates a hidden mirror struct whose fields are the erased shapes of
/// the original fields, in the same declaration order, plus const
/// assertions that the mirror agrees with the original in total size,
/// alignment, and per-field offsets.
///
/// Types with overlapping storage (unions) cannot be decomposed this way;
/// use [`erase_opaque!`](crate::erase_opaque) for those.
///
/// # Example
///
/// ```rust
/// use shroud::erase_fields;
///
/// pub struct Sample {
///     id: u64,
///     payload: Box<u32>,
/// }
///
/// erase_fields!(Sample => SampleErased { id: u64, payload: Box<u32> });
///
/// assert!(shroud::is_reference_traceable::<Sample>());
/// ```
#[macro_export]
macro_rules! erase_fields {
    ($ty:ty => $erased:ident { $($field:ident: $fty:ty),+ $(,)? }) => {
        #[doc(hidden)]
        #[allow(missing_docs, missing_debug_implementations, dead_code)]
        pub struct $erased {
            $(pub $field: <$fty as $crate::shape::Erase>::Erased,)+
        }

        // SAFETY: each mirror field has the size and alignment of its
        // original (guaranteed by that field's own `Erase` impl), and the
        // assertions below pin total size, alignment, and every field
        // offset against the original type.
        unsafe impl $crate::shape::Erase for $ty {
            type Erased = $erased;
            const REFERENCE_TRACEABLE: bool =
                $(<$fty as $crate::shape::Erase>::REFERENCE_TRACEABLE)||+;
        }

        const _: () = {
            assert!(
                ::core::mem::size_of::<$ty>() == ::core::mem::size_of::<$erased>(),
                "erased mirror size differs from the source type"
            );
            assert!(
                ::core::mem::align_of::<$ty>() == ::core::mem::align_of::<$erased>(),
                "erased mirror alignment differs from the source type"
            );
            $(
                assert!(
                    ::core::mem::offset_of!($ty, $field)
                        == ::core::mem::offset_of!($erased, $field),
                    "erased mirror field offset differs from the source type"
                );
            )+
        };
    };
}

/// Derives `Erase` for an enumeration by substituting its declared integer
/// representation.
///
/// The enum must carry the matching `#[repr(…)]` attribute; a mismatch is
/// caught by the generated size assertion.
///
/// # Example
///
/// ```rust
/// use shroud::erase_enum;
///
/// #[repr(u8)]
/// pub enum Mode {
///     Off = 0,
///     On = 1,
/// }
///
/// erase_enum!(Mode => u8);
/// ```
#[macro_export]
macro_rules! erase_enum {
    ($ty:ty => $repr:ty) => {
        // SAFETY: the declared integer representation fixes the enum's size
        // and alignment to those of `$repr`; the assertions below verify
        // the declaration matches.
        unsafe impl $crate::shape::Erase for $ty {
            type Erased = <$repr as $crate::shape::Erase>::Erased;
            const REFERENCE_TRACEABLE: bool =
                <$repr as $crate::shape::Erase>::REFERENCE_TRACEABLE;
        }

        const _: () = {
            assert!(
                ::core::mem::size_of::<$ty>() == ::core::mem::size_of::<$repr>(),
                "enum size differs from its declared representation"
            );
            assert!(
                ::core::mem::align_of::<$ty>() == ::core::mem::align_of::<$repr>(),
                "enum alignment differs from its declared representation"
            );
        };
    };
}

/// Derives `Erase` for a type that can only be preserved as an exact-size
/// opaque blob: unions and other overlapping-storage layouts.
///
/// Pass `traceable` when the blob may contain owned handles that a destroy
/// must release (the conservative choice for reference-bearing unions).
///
/// # Example
///
/// ```rust
/// use shroud::erase_opaque;
///
/// pub union Word {
///     bits: u32,
///     halves: [u16; 2],
/// }
///
/// erase_opaque!(Word);
/// ```
#[macro_export]
macro_rules! erase_opaque {
    ($ty:ty) => {
        $crate::erase_opaque!(@impl $ty, false);
    };
    ($ty:ty, traceable) => {
        $crate::erase_opaque!(@impl $ty, true);
    };
    (@impl $ty:ty, $traceable:expr) => {
        // SAFETY: `OpaqueBlob<T>` is `repr(transparent)` over
        // `MaybeUninit<T>` and preserves layout exactly.
        unsafe impl $crate::shape::Erase for $ty {
            type Erased = $crate::shape::OpaqueBlob<$ty>;
            const REFERENCE_TRACEABLE: bool = $traceable;
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::shape::{is_reference_traceable, Erase};
    use core::mem::{align_of, size_of};

    #[allow(dead_code)]
    struct Plain {
        a: u32,
        b: f64,
        c: bool,
    }

    erase_fields!(Plain => PlainErased { a: u32, b: f64, c: bool });

    #[allow(dead_code)]
    struct Handles {
        id: u64,
        name: String,
        boxed: Box<u32>,
    }

    erase_fields!(Handles => HandlesErased { id: u64, name: String, boxed: Box<u32> });

    #[repr(i16)]
    enum Signed {
        Neg = -1,
        Pos = 1,
    }

    erase_enum!(Signed => i16);

    #[allow(dead_code)]
    union Overlap {
        bits: u64,
        bytes: [u8; 8],
    }

    erase_opaque!(Overlap);

    #[allow(dead_code)]
    union OverlapRef {
        raw: *const u8,
        word: usize,
    }

    erase_opaque!(OverlapRef, traceable);

    #[test]
    fn field_wise_erasure_preserves_layout() {
        assert_eq!(size_of::<Plain>(), size_of::<PlainErased>());
        assert_eq!(align_of::<Plain>(), align_of::<PlainErased>());
        assert!(!is_reference_traceable::<Plain>());
    }

    #[test]
    fn reference_bearing_fields_propagate() {
        assert_eq!(size_of::<Handles>(), size_of::<HandlesErased>());
        assert!(is_reference_traceable::<Handles>());
    }

    #[test]
    fn enum_erases_to_declared_repr() {
        assert_eq!(size_of::<<Signed as Erase>::Erased>(), size_of::<i16>());
        let _ = Signed::Neg;
        let _ = Signed::Pos;
    }

    #[test]
    fn overlapping_fields_erase_to_exact_size_blob() {
        assert_eq!(size_of::<<Overlap as Erase>::Erased>(), size_of::<Overlap>());
        assert!(!is_reference_traceable::<Overlap>());
        assert!(is_reference_traceable::<OverlapRef>());
        let _ = Overlap { bits: 0 };
        let _ = OverlapRef { word: 0 };
    }
}
