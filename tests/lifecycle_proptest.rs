//! Property tests: arbitrary operation sequences must keep the live-value
//! accounting balanced, and the table must agree with a std map model.

mod common;

use std::collections::HashMap;

use common::{counter, live, Counted};
use proptest::prelude::*;
use shroud::{NotFound, Slot, SlotTable};

#[derive(Debug, Clone)]
enum SlotOp {
    Set(u64),
    Replace(u64),
    Take,
    Destroy,
}

fn slot_op() -> impl Strategy<Value = SlotOp> {
    prop_oneof![
        any::<u64>().prop_map(SlotOp::Set),
        any::<u64>().prop_map(SlotOp::Replace),
        Just(SlotOp::Take),
        Just(SlotOp::Destroy),
    ]
}

proptest! {
    #[test]
    fn slot_op_sequences_stay_balanced(ops in proptest::collection::vec(slot_op(), 1..128)) {
        let count = counter();
        let mut slot = Slot::empty();
        let mut occupied = false;

        for op in ops {
            match op {
                SlotOp::Set(v) => {
                    if !occupied {
                        slot.set(Counted::new(&count, v));
                        occupied = true;
                    }
                }
                SlotOp::Replace(v) => {
                    if occupied {
                        unsafe { slot.replace(Counted::new(&count, v)) };
                    }
                }
                SlotOp::Take => {
                    if occupied {
                        drop(unsafe { slot.take() });
                        occupied = false;
                    }
                }
                SlotOp::Destroy => {
                    if occupied {
                        unsafe { slot.destroy() };
                        occupied = false;
                    }
                }
            }
            prop_assert_eq!(live(&count), isize::from(occupied));
        }

        if occupied {
            unsafe { slot.destroy() };
        }
        prop_assert_eq!(live(&count), 0);
    }
}

#[derive(Debug, Clone)]
enum TableOp {
    Insert(u8, u64),
    Remove(u8),
    Get(u8),
    Clear,
}

fn table_op() -> impl Strategy<Value = TableOp> {
    prop_oneof![
        8 => (any::<u8>(), any::<u64>()).prop_map(|(k, v)| TableOp::Insert(k, v)),
        4 => any::<u8>().prop_map(TableOp::Remove),
        4 => any::<u8>().prop_map(TableOp::Get),
        1 => Just(TableOp::Clear),
    ]
}

proptest! {
    #[test]
    fn table_matches_std_map_model(ops in proptest::collection::vec(table_op(), 1..256)) {
        let count = counter();
        let mut table = SlotTable::new();
        let mut model: HashMap<u8, u64> = HashMap::new();

        for op in ops {
            match op {
                TableOp::Insert(k, v) => {
                    table.insert(k, Counted::new(&count, v));
                    model.insert(k, v);
                }
                TableOp::Remove(k) => {
                    prop_assert_eq!(table.remove(&k), model.remove(&k).is_some());
                }
                TableOp::Get(k) => {
                    match model.get(&k) {
                        Some(v) => prop_assert_eq!(table.get(&k).map(|c| c.value), Ok(*v)),
                        None => prop_assert_eq!(table.get(&k).map(|c| c.value), Err(NotFound)),
                    }
                }
                TableOp::Clear => {
                    table.clear();
                    model.clear();
                }
            }
            prop_assert_eq!(table.len(), model.len());
            prop_assert_eq!(live(&count) as usize, model.len());
        }

        table.clear();
        prop_assert_eq!(live(&count), 0);
    }
}
