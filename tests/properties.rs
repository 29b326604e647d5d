//! Property tests: sequence behavior against a `Vec` model

use proptest::prelude::*;
use secvec::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Push(i32),
    Pop,
    Insert(usize, i32),
    Erase(usize),
    Resize(usize),
    Reserve(usize),
    Truncate(usize),
    ShrinkToFit,
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<i32>().prop_map(Op::Push),
        1 => Just(Op::Pop),
        2 => (0usize..40, any::<i32>()).prop_map(|(i, v)| Op::Insert(i, v)),
        2 => (0usize..40).prop_map(Op::Erase),
        1 => (0usize..40).prop_map(Op::Resize),
        1 => (0usize..64).prop_map(Op::Reserve),
        1 => (0usize..40).prop_map(Op::Truncate),
        1 => Just(Op::ShrinkToFit),
    ]
}

proptest! {
    #[test]
    fn push_back_appends_and_preserves_prefix(
        initial in proptest::collection::vec(any::<i32>(), 0..50),
        value in any::<i32>(),
    ) {
        let mut seq: Sequence<i32> = initial.iter().copied().collect();
        seq.push_back(value).unwrap();

        prop_assert_eq!(seq.len(), initial.len() + 1);
        prop_assert_eq!(seq.last(), Some(&value));
        prop_assert_eq!(&seq[..initial.len()], initial.as_slice());
    }

    #[test]
    fn erase_then_insert_restores_content(
        initial in proptest::collection::vec(any::<i32>(), 1..50),
        pick in any::<proptest::sample::Index>(),
    ) {
        let mut seq: Sequence<i32> = initial.iter().copied().collect();
        let pos = pick.index(initial.len());
        let erased = seq[pos];

        seq.erase(pos).unwrap();
        seq.insert(pos, erased).unwrap();

        prop_assert_eq!(seq.as_slice(), initial.as_slice());
    }

    #[test]
    fn appends_amortize_capacity(n in 1usize..2000) {
        let mut seq: Sequence<u8> = Sequence::new();
        let mut reallocations = 0;
        for _ in 0..n {
            let before = seq.capacity();
            seq.push_back(0).unwrap();
            if seq.capacity() != before {
                reallocations += 1;
            }
        }

        prop_assert!(seq.capacity() <= 2 * n);
        // Doubling from 1 reallocates ceil(log2(n)) + 1 times at most
        prop_assert!(reallocations <= usize::BITS as usize - n.leading_zeros() as usize + 1);
    }

    #[test]
    fn clone_and_take_round_trip(
        initial in proptest::collection::vec(".{0,8}", 0..30),
    ) {
        let mut seq: Sequence<String> = initial.iter().cloned().collect();
        let copy = seq.clone();
        prop_assert_eq!(&copy, &seq);
        prop_assert_eq!(seq.as_slice(), initial.as_slice());

        let moved = seq.take();
        prop_assert_eq!(seq.len(), 0);
        prop_assert_eq!(seq.capacity(), 0);
        prop_assert_eq!(moved, copy);
    }

    #[test]
    fn matches_vec_model(ops in proptest::collection::vec(arb_op(), 0..100)) {
        let mut seq: Sequence<i32> = Sequence::new();
        let mut model: Vec<i32> = Vec::new();

        for op in ops {
            match op {
                Op::Push(v) => {
                    seq.push_back(v).unwrap();
                    model.push(v);
                }
                Op::Pop => {
                    prop_assert_eq!(seq.pop_back(), model.pop());
                }
                Op::Insert(i, v) => {
                    let result = seq.insert(i, v);
                    if i <= model.len() {
                        prop_assert_eq!(result, Ok(i));
                        model.insert(i, v);
                    } else {
                        prop_assert_eq!(
                            result,
                            Err(SequenceError::PositionOutOfRange { index: i, len: model.len() })
                        );
                    }
                }
                Op::Erase(i) => {
                    let result = seq.erase(i);
                    if i < model.len() {
                        prop_assert_eq!(result, Ok(i));
                        model.remove(i);
                    } else {
                        prop_assert!(result.is_err());
                    }
                }
                Op::Resize(n) => {
                    let capacity = seq.capacity();
                    seq.resize(n).unwrap();
                    if n <= model.len() {
                        prop_assert_eq!(seq.capacity(), capacity);
                    }
                    model.resize(n, 0);
                }
                Op::Reserve(n) => {
                    let capacity = seq.capacity();
                    seq.reserve(n).unwrap();
                    prop_assert_eq!(seq.capacity(), capacity.max(n));
                }
                Op::Truncate(n) => {
                    seq.truncate(n);
                    model.truncate(n);
                }
                Op::ShrinkToFit => {
                    seq.shrink_to_fit().unwrap();
                    prop_assert_eq!(seq.capacity(), model.len());
                }
            }
            prop_assert!(seq.len() <= seq.capacity());
            prop_assert_eq!(seq.as_slice(), model.as_slice());
        }
    }
}
