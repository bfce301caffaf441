//! Layout postcondition tests for shape erasure: size equality, alignment
//! equality, and the ownership-traceability predicate.

use core::mem::{align_of, size_of};

use shroud::{erase_enum, erase_fields, erase_opaque, is_reference_traceable, Erase};

fn layout_matches<T: Erase>() -> bool {
    size_of::<T>() == size_of::<T::Erased>() && align_of::<T>() == align_of::<T::Erased>()
}

#[test]
fn primitive_erasure_is_size_preserving() {
    assert_eq!(size_of::<<i32 as Erase>::Erased>(), size_of::<i32>());
    assert_eq!(size_of::<<u128 as Erase>::Erased>(), size_of::<u128>());
    assert_eq!(size_of::<<bool as Erase>::Erased>(), size_of::<bool>());
    assert_eq!(size_of::<<() as Erase>::Erased>(), 0);
}

#[test]
fn boxed_handles_are_traceable() {
    assert!(is_reference_traceable::<Box<u64>>());
    assert!(is_reference_traceable::<std::sync::Arc<String>>());
    assert!(is_reference_traceable::<Box<dyn Fn(u32) -> u32>>());
    assert!(layout_matches::<Box<dyn Fn(u32) -> u32>>());
}

#[derive(Clone, Copy)]
#[allow(dead_code)]
struct Scalars {
    a: u32,
    b: u16,
    c: f64,
}

erase_fields!(Scalars => ScalarsErased { a: u32, b: u16, c: f64 });

#[test]
fn plain_scalar_struct_is_not_traceable() {
    assert!(layout_matches::<Scalars>());
    assert!(!is_reference_traceable::<Scalars>());
    let _ = Scalars { a: 0, b: 0, c: 0.0 };
}

#[allow(dead_code)]
struct Mixed {
    tag: u8,
    name: String,
    items: Vec<u32>,
    callback: Box<dyn Fn(u32) -> u32>,
}

erase_fields!(Mixed => MixedErased {
    tag: u8,
    name: String,
    items: Vec<u32>,
    callback: Box<dyn Fn(u32) -> u32>,
});

#[test]
fn reference_bearing_struct_is_traceable() {
    assert!(layout_matches::<Mixed>());
    assert!(is_reference_traceable::<Mixed>());
    let sample = Mixed {
        tag: 1,
        name: String::new(),
        items: Vec::new(),
        callback: Box::new(|x| x),
    };
    assert_eq!((sample.callback)(2), 2);
}

#[allow(dead_code)]
union Registers {
    word: u64,
    halves: [u32; 2],
    bytes: [u8; 8],
}

erase_opaque!(Registers);

#[test]
fn overlapping_fields_erase_to_exact_size_blob() {
    assert!(layout_matches::<Registers>());
    assert_eq!(size_of::<<Registers as Erase>::Erased>(), 8);
    assert!(!is_reference_traceable::<Registers>());
}

#[repr(u16)]
#[allow(dead_code)]
enum Opcode {
    Load = 0,
    Store = 1,
    Halt = 0xFFFF,
}

erase_enum!(Opcode => u16);

#[test]
fn enums_substitute_their_representation() {
    assert!(layout_matches::<Opcode>());
    assert_eq!(size_of::<<Opcode as Erase>::Erased>(), size_of::<u16>());
    assert!(!is_reference_traceable::<Opcode>());
}

#[test]
fn arrays_erase_element_wise() {
    assert!(layout_matches::<[u64; 5]>());
    assert!(layout_matches::<[Box<u8>; 4]>());
    assert!(is_reference_traceable::<[Box<u8>; 4]>());
    assert!(!is_reference_traceable::<[u64; 5]>());
}

#[test]
fn sequences_preserve_handle_layout() {
    assert!(layout_matches::<&[u8]>());
    assert!(layout_matches::<Vec<u64>>());
    assert!(layout_matches::<String>());
    assert!(layout_matches::<Box<[u16]>>());
    assert!(!is_reference_traceable::<&[u8]>());
    assert!(is_reference_traceable::<Box<[u16]>>());
}

#[test]
fn native_maps_are_opaque_reference_blobs() {
    assert!(layout_matches::<std::collections::HashMap<u32, String>>());
    assert!(is_reference_traceable::<std::collections::HashMap<u32, String>>());
}
