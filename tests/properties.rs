use std::collections::HashMap;

use immap::{BatchPlan, IMap, IMapMapped, ISet, KeyMapping};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Operation {
    Set(u8, u16),
    Update(u8, u16),
    Delete(u8),
}

fn operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        (any::<u8>(), any::<u16>()).prop_map(|(k, v)| Operation::Set(k, v)),
        (any::<u8>(), any::<u16>()).prop_map(|(k, d)| Operation::Update(k, d)),
        any::<u8>().prop_map(Operation::Delete),
    ]
}

fn apply_single(map: &IMap<u8, u16>, op: &Operation) -> IMap<u8, u16> {
    match *op {
        Operation::Set(k, v) => map.insert(k, v),
        Operation::Update(k, d) => map.update(&k, |v| v.wrapping_add(d)),
        Operation::Delete(k) => map.remove(&k),
    }
}

fn plan_of(ops: &[Operation]) -> BatchPlan<'static, u8, u16> {
    ops.iter().fold(BatchPlan::new(), |plan, op| match *op {
        Operation::Set(k, v) => plan.set(k, v),
        Operation::Update(k, d) => plan.update(k, move |v: &u16| v.wrapping_add(d)),
        Operation::Delete(k) => plan.delete(k),
    })
}

fn sorted(map: &IMap<u8, u16>) -> Vec<(u8, u16)> {
    let mut entries: Vec<_> = map.iter().map(|(k, v)| (*k, *v)).collect();
    entries.sort_unstable();
    entries
}

/// Stores a signed key as its two's-complement bits.
struct Bits;

impl KeyMapping for Bits {
    type Key = i16;
    type Mapped = u16;

    fn to_key(key: &i16) -> u16 {
        key.cast_unsigned()
    }

    fn from_key(mapped: &u16) -> i16 {
        mapped.cast_signed()
    }
}

proptest! {
    #[test]
    fn matches_std_map(
        entries in proptest::collection::vec((any::<u8>(), any::<u16>()), 0..50),
        ops in proptest::collection::vec(operation(), 0..100),
    ) {
        let mut model: HashMap<u8, u16> = entries.iter().copied().collect();
        let mut map = IMap::from_entries(entries);

        for op in &ops {
            map = apply_single(&map, op);
            match *op {
                Operation::Set(k, v) => {
                    model.insert(k, v);
                }
                Operation::Update(k, d) => {
                    if let Some(v) = model.get_mut(&k) {
                        *v = v.wrapping_add(d);
                    }
                }
                Operation::Delete(k) => {
                    model.remove(&k);
                }
            }
            prop_assert_eq!(map.len(), model.len());
        }

        prop_assert_eq!(map.to_hash_map(), model);
    }

    #[test]
    fn batch_equals_fold(
        entries in proptest::collection::vec((any::<u8>(), any::<u16>()), 0..50),
        ops in proptest::collection::vec(operation(), 0..100),
    ) {
        let base = IMap::from_entries(entries);
        let folded = ops.iter().fold(base.clone(), |m, op| apply_single(&m, op));
        let batched = base.apply_batch(plan_of(&ops));
        prop_assert_eq!(&batched, &folded);
        prop_assert_eq!(batched.adhash(), folded.adhash());
    }

    #[test]
    fn writes_leave_source_unchanged(
        entries in proptest::collection::vec((any::<u8>(), any::<u16>()), 0..50),
        ops in proptest::collection::vec(operation(), 1..20),
    ) {
        let base = IMap::from_entries(entries);
        let before = sorted(&base);
        for op in &ops {
            let _ = apply_single(&base, op);
        }
        let _ = base.apply_batch(plan_of(&ops));
        prop_assert_eq!(sorted(&base), before);
    }

    #[test]
    fn noop_insert_shares_storage(
        entries in proptest::collection::vec((any::<u8>(), any::<u16>()), 1..50),
    ) {
        let map = IMap::from_entries(entries);
        let (k, v) = map.iter().next().map(|(k, v)| (*k, *v)).expect("non-empty");
        let same = map.insert_if_changed(k, v);
        prop_assert!(same.ptr_eq(&map));
    }

    #[test]
    fn equality_is_an_equivalence(
        entries in proptest::collection::vec((any::<u8>(), any::<u16>()), 0..50),
    ) {
        let model: HashMap<u8, u16> = entries.iter().copied().collect();
        let a = IMap::from(model.clone());
        let mut pairs: Vec<_> = model.into_iter().collect();
        pairs.sort_unstable();
        let b: IMap<u8, u16> = pairs.iter().rev().copied().collect();
        let c = IMap::from_entries(pairs);

        prop_assert!(a.equals_with(&a.clone(), |x, y| x == y));
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(&b, &a);
        prop_assert_eq!(&b, &c);
        prop_assert_eq!(&a, &c);
    }

    #[test]
    fn set_algebra_laws(
        xs in proptest::collection::vec(any::<u8>(), 0..60),
        ys in proptest::collection::vec(any::<u8>(), 0..60),
    ) {
        let a: ISet<u8> = xs.into_iter().collect();
        let b: ISet<u8> = ys.into_iter().collect();

        let union = a.union(&b);
        let inter = a.intersection(&b);
        prop_assert_eq!(&union, &b.union(&a));
        prop_assert_eq!(&inter, &b.intersection(&a));
        prop_assert_eq!(union.len() + inter.len(), a.len() + b.len());
        prop_assert!(inter.is_subset_of(&a) && inter.is_subset_of(&b));
        prop_assert!(union.is_superset_of(&a) && union.is_superset_of(&b));

        let same = a.diff(&a);
        prop_assert!(same.added.is_empty() && same.deleted.is_empty());

        let diff = a.diff(&b);
        prop_assert_eq!(&diff.added, &b.subtract(&a));
        prop_assert_eq!(&diff.deleted, &a.subtract(&b));
        prop_assert_eq!(a.subtract(&diff.deleted).union(&diff.added), b);
    }

    #[test]
    fn mapped_round_trip(keys in proptest::collection::vec(any::<i16>(), 0..50)) {
        let map: IMapMapped<Bits, usize> =
            keys.iter().enumerate().map(|(i, k)| (*k, i)).collect();
        for k in &keys {
            prop_assert_eq!(Bits::from_key(&Bits::to_key(k)), *k);
            prop_assert!(map.contains_key(k));
        }
        for (k, _) in map.iter() {
            prop_assert!(keys.contains(&k));
        }
    }
}
