use proptest::collection::vec;
use proptest::prelude::*;
use stamplist::{ArraySeq, LinkedSeq};
use std::iter::FromIterator;

/// One structural or value operation, applied identically to the
/// container under test and to a plain `Vec` model. Indices are reduced
/// modulo the current length so every generated op is applicable.
#[derive(Debug, Clone)]
enum Op {
    Push(i32),
    Insert(usize, i32),
    Remove(usize),
    Set(usize, i32),
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        8 => any::<i32>().prop_map(Op::Push),
        4 => (any::<usize>(), any::<i32>()).prop_map(|(i, v)| Op::Insert(i, v)),
        4 => any::<usize>().prop_map(Op::Remove),
        3 => (any::<usize>(), any::<i32>()).prop_map(|(i, v)| Op::Set(i, v)),
        1 => Just(Op::Clear),
    ]
}

fn apply_to_model(model: &mut Vec<i32>, op: &Op) {
    match *op {
        Op::Push(v) => model.push(v),
        Op::Insert(i, v) => {
            let at = i % (model.len() + 1);
            model.insert(at, v);
        }
        Op::Remove(i) => {
            if !model.is_empty() {
                model.remove(i % model.len());
            }
        }
        Op::Set(i, v) => {
            if !model.is_empty() {
                let at = i % model.len();
                model[at] = v;
            }
        }
        Op::Clear => model.clear(),
    }
}

fn apply_to_array(seq: &mut ArraySeq<i32>, op: &Op) {
    match *op {
        Op::Push(v) => seq.push(v).unwrap(),
        Op::Insert(i, v) => seq.insert(i % (seq.len() + 1), v).unwrap(),
        Op::Remove(i) => {
            if !seq.is_empty() {
                seq.remove(i % seq.len()).unwrap();
            }
        }
        Op::Set(i, v) => {
            if !seq.is_empty() {
                seq.set(i % seq.len(), v).unwrap();
            }
        }
        Op::Clear => seq.clear(),
    }
}

fn apply_to_linked(seq: &mut LinkedSeq<i32>, op: &Op) {
    match *op {
        Op::Push(v) => seq.push_back(v),
        Op::Insert(i, v) => seq.insert(i % (seq.len() + 1), v).unwrap(),
        Op::Remove(i) => {
            if !seq.is_empty() {
                seq.remove_at(i % seq.len()).unwrap();
            }
        }
        Op::Set(i, v) => {
            if !seq.is_empty() {
                seq.set(i % seq.len(), v).unwrap();
            }
        }
        Op::Clear => seq.clear(),
    }
}

proptest! {
    #[test]
    fn array_matches_vec_model(ops in vec(op_strategy(), 0..64)) {
        let mut seq = ArraySeq::new();
        let mut model = Vec::new();
        for op in &ops {
            apply_to_array(&mut seq, op);
            apply_to_model(&mut model, op);
            prop_assert_eq!(seq.as_slice(), model.as_slice());
        }
    }

    #[test]
    fn linked_matches_vec_model(ops in vec(op_strategy(), 0..64)) {
        let mut seq = LinkedSeq::new();
        let mut model = Vec::new();
        for op in &ops {
            apply_to_linked(&mut seq, op);
            apply_to_model(&mut model, op);
            prop_assert_eq!(seq.to_vec(), model.clone());
            prop_assert_eq!(seq.len(), model.len());
        }
    }

    #[test]
    fn both_containers_agree(ops in vec(op_strategy(), 0..48)) {
        let mut array = ArraySeq::new();
        let mut linked = LinkedSeq::new();
        for op in &ops {
            apply_to_array(&mut array, op);
            apply_to_linked(&mut linked, op);
        }
        prop_assert_eq!(array.to_vec(), linked.to_vec());
    }

    #[test]
    fn remove_if_agrees_with_retain(values in vec(any::<i32>(), 0..64)) {
        let mut seq = ArraySeq::from_iter(values.iter().copied());
        let removed = seq.remove_if(|n| n % 3 == 0);

        let mut model = values.clone();
        model.retain(|n| n % 3 != 0);
        prop_assert_eq!(removed, values.len() - model.len());
        prop_assert_eq!(seq.as_slice(), model.as_slice());
    }

    #[test]
    fn sort_by_produces_a_sorted_permutation(values in vec(any::<i32>(), 0..64)) {
        let mut seq = ArraySeq::from_iter(values.iter().copied());
        seq.sort_by(|a, b| a.cmp(b));

        let mut model = values.clone();
        model.sort();
        prop_assert_eq!(seq.as_slice(), model.as_slice());
    }

    #[test]
    fn recursive_array_split_covers_everything(values in vec(any::<i32>(), 0..256)) {
        fn drain(
            range: &mut stamplist::ArrayRange,
            seq: &ArraySeq<i32>,
            out: &mut Vec<i32>,
        ) {
            if let Some(mut lower) = range.try_split(seq) {
                drain(&mut lower, seq, out);
                drain(range, seq, out);
            } else {
                while let Some(n) = range.next(seq).unwrap() {
                    out.push(*n);
                }
            }
        }
        let seq = ArraySeq::from_iter(values.iter().copied());
        let mut range = seq.range();
        let mut out = Vec::new();
        drain(&mut range, &seq, &mut out);
        prop_assert_eq!(out, values);
    }

    #[test]
    fn linked_batch_split_covers_everything(len in 0usize..4000) {
        let seq = LinkedSeq::from_iter(0..len as i32);
        let mut range = seq.range();
        let mut out = Vec::new();
        while let Some(batch) = range.try_split(&seq).unwrap() {
            out.extend(batch);
        }
        prop_assert_eq!(out, (0..len as i32).collect::<Vec<_>>());
    }

    #[test]
    fn snapshot_round_trips(values in vec(any::<i32>(), 0..64)) {
        let array = ArraySeq::from_iter(values.iter().copied());
        let linked = LinkedSeq::from_iter(values.iter().copied());
        prop_assert_eq!(array.to_vec(), values.clone());
        prop_assert_eq!(linked.to_vec(), values.clone());

        let mut buf = Vec::new();
        array.snapshot_into(&mut buf);
        prop_assert_eq!(buf, values);
    }

    #[test]
    fn any_structural_mutation_stales_open_handles(
        values in vec(any::<i32>(), 1..32),
        op in op_strategy(),
    ) {
        // `Set` is the one non-structural op; everything else must fail
        // the cursor fast.
        let mut seq = ArraySeq::from_iter(values.iter().copied());
        let mut cursor = seq.cursor();
        apply_to_array(&mut seq, &op);

        let step = cursor.next(&seq);
        match op {
            Op::Set(_, _) => prop_assert!(step.is_ok()),
            _ => prop_assert_eq!(step, Err(stamplist::Error::ConcurrentStructuralChange)),
        }
    }
}
