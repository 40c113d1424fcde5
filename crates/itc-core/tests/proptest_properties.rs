//! Property-based tests for stamps and trees.
//!
//! Stamps are generated by replaying random fork/event/join/send sequences
//! from a seed, so every generated stamp is one a real system could reach.
//! Raw trees are generated directly and may be far from normal form.

use itc_core::{Event, Id, Stamp};
use proptest::prelude::*;

// =============================================================================
// STRATEGIES
// =============================================================================

#[derive(Debug, Clone)]
enum Op {
    Fork(usize),
    Event(usize),
    Join(usize, usize),
    Send(usize, usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        2 => any::<usize>().prop_map(Op::Fork),
        4 => any::<usize>().prop_map(Op::Event),
        1 => (any::<usize>(), any::<usize>()).prop_map(|(a, b)| Op::Join(a, b)),
        2 => (any::<usize>(), any::<usize>()).prop_map(|(a, b)| Op::Send(a, b)),
    ]
}

/// Replays `ops` from a seed. Indices are taken modulo the number of live
/// stamps; operations pairing a stamp with itself are skipped.
fn replay(ops: &[Op]) -> Vec<Stamp> {
    let mut pool = vec![Stamp::seed()];
    for op in ops {
        let n = pool.len();
        match *op {
            Op::Fork(i) => {
                let forked = pool[i % n].fork();
                pool.push(forked);
            }
            Op::Event(i) => pool[i % n].event(),
            Op::Join(i, j) => {
                let (i, j) = (i % n, j % n);
                if i != j {
                    let other = pool.swap_remove(j);
                    let i = if i == n - 1 { j } else { i };
                    pool[i].join(other);
                }
            }
            Op::Send(i, j) => {
                let (i, j) = (i % n, j % n);
                if i != j {
                    let message = pool[i].send();
                    pool[j].receive(message);
                }
            }
        }
    }
    pool
}

fn pool_strategy() -> impl Strategy<Value = Vec<Stamp>> {
    prop::collection::vec(op_strategy(), 0..40).prop_map(|ops| replay(&ops))
}

fn stamp_strategy() -> impl Strategy<Value = Stamp> {
    (pool_strategy(), any::<prop::sample::Index>()).prop_map(|(pool, idx)| pool[idx.index(pool.len())].clone())
}

fn raw_id_strategy() -> impl Strategy<Value = Id> {
    let leaf = prop_oneof![Just(Id::Zero), Just(Id::One)];
    leaf.prop_recursive(6, 64, 2, |inner| {
        (inner.clone(), inner).prop_map(|(l, r)| Id::Node(Box::new(l), Box::new(r)))
    })
}

fn raw_event_strategy() -> impl Strategy<Value = Event> {
    let leaf = (0u64..6).prop_map(Event::Leaf);
    leaf.prop_recursive(6, 64, 2, |inner| {
        (0u64..4, inner.clone(), inner).prop_map(|(v, l, r)| Event::node(v, l, r))
    })
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn reachable_stamps_are_normal(pool in pool_strategy()) {
        for stamp in &pool {
            prop_assert!(stamp.id().is_normal(), "{stamp}");
            prop_assert!(stamp.history().is_normal(), "{stamp}");
        }
    }

    #[test]
    fn live_ids_partition_the_space(pool in pool_strategy()) {
        let total = pool
            .iter()
            .fold(Id::Zero, |acc, stamp| acc.sum(stamp.id().clone()));
        prop_assert_eq!(total, Id::One);
    }

    #[test]
    fn marshal_roundtrip(stamp in stamp_strategy()) {
        let bytes = stamp.marshal();
        prop_assert_eq!(bytes.len() % 4, 0);
        prop_assert_eq!(Stamp::unmarshal(&bytes).unwrap(), stamp);
    }

    #[test]
    fn display_parses_back(stamp in stamp_strategy()) {
        let parsed: Stamp = stamp.to_string().parse().unwrap();
        prop_assert_eq!(parsed, stamp);
    }

    #[test]
    fn sum_of_split_restores_id(stamp in stamp_strategy()) {
        let id = stamp.id().clone();
        let (left, right) = id.clone().split();
        prop_assert_eq!(left.sum(right), id);
    }

    #[test]
    fn id_normalize_is_idempotent(id in raw_id_strategy()) {
        let once = id.normalize();
        prop_assert!(once.is_normal());
        prop_assert_eq!(once.clone().normalize(), once);
    }

    #[test]
    fn event_normalize_is_idempotent(event in raw_event_strategy()) {
        let once = event.normalize();
        prop_assert!(once.is_normal());
        prop_assert_eq!(once.clone().normalize(), once);
    }

    #[test]
    fn raw_leq_implies_normal_leq(a in raw_event_strategy(), b in raw_event_strategy()) {
        // On raw trees `leq` may miss an ordering the normal forms reveal,
        // but never reports one that does not hold.
        if a.leq(&b) {
            prop_assert!(a.clone().normalize().leq(&b.clone().normalize()), "{a} <= {b}");
        }
    }

    #[test]
    fn normal_leq_agrees_with_join(a in raw_event_strategy(), b in raw_event_strategy()) {
        // For normal trees, a <= b exactly when joining a changes nothing.
        let (a, b) = (a.normalize(), b.normalize());
        let joined = a.clone().join(b.clone());
        prop_assert_eq!(a.leq(&b), joined == b);
    }

    #[test]
    fn leq_is_reflexive(stamp in stamp_strategy()) {
        prop_assert!(stamp.leq(&stamp));
    }

    #[test]
    fn leq_is_antisymmetric(pool in pool_strategy()) {
        for a in &pool {
            for b in &pool {
                if a.leq(b) && b.leq(a) {
                    prop_assert_eq!(a.history(), b.history());
                }
            }
        }
    }

    #[test]
    fn leq_is_transitive(pool in pool_strategy()) {
        for a in &pool {
            for b in &pool {
                for c in &pool {
                    if a.leq(b) && b.leq(c) {
                        prop_assert!(a.leq(c), "{a} <= {b} <= {c}");
                    }
                }
            }
        }
    }

    #[test]
    fn join_is_commutative_and_idempotent(pool in pool_strategy()) {
        for a in &pool {
            for b in &pool {
                let ab = a.history().clone().join(b.history().clone());
                let ba = b.history().clone().join(a.history().clone());
                prop_assert_eq!(&ab, &ba);
                prop_assert!(a.history().leq(&ab) && b.history().leq(&ab));
            }
            let aa = a.history().clone().join(a.history().clone());
            prop_assert_eq!(&aa, a.history());
        }
    }

    #[test]
    fn event_strictly_advances(stamp in stamp_strategy()) {
        let before = stamp.clone();
        let mut after = stamp;
        after.event();
        prop_assert!(before.leq(&after));
        if before.is_anonymous() {
            prop_assert_eq!(after, before);
        } else {
            prop_assert!(!after.leq(&before), "{before} -> {after}");
            prop_assert_eq!(after.id(), before.id());
        }
    }

    #[test]
    fn unmarshal_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let _ = Stamp::unmarshal(&bytes);
    }

    #[test]
    fn decoded_stamps_are_normal(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        if let Ok(stamp) = Stamp::unmarshal(&bytes) {
            prop_assert!(stamp.id().is_normal());
            prop_assert!(stamp.history().is_normal());
        }
    }

    #[test]
    fn decoded_stamps_accept_an_event(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        if let Ok(mut stamp) = Stamp::unmarshal(&bytes) {
            let before = stamp.clone();
            stamp.event();
            prop_assert!(before.leq(&stamp));
        }
    }
}
