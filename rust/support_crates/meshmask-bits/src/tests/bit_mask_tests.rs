use itertools::Itertools;

use crate::BitMask;

fn random_bools(len: usize, density: u8) -> Vec<bool> {
    (0..len).map(|_| fastrand::u8(0..100) < density).collect()
}

fn naive_ranges(values: &[bool]) -> Vec<std::ops::Range<usize>> {
    let mut ranges = Vec::new();
    let mut start = None;
    for (i, &b) in values.iter().enumerate() {
        match (b, start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                ranges.push(s..i);
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        ranges.push(s..values.len());
    }
    ranges
}

#[test]
fn test_empty_and_full() {
    let empty = BitMask::empty(130);
    assert_eq!(empty.len(), 130);
    assert_eq!(empty.count_ones(), 0);
    assert!(!empty.contains(0));

    let full = BitMask::full(130);
    assert_eq!(full.count_ones(), 130);
    assert!(full.contains(129));
    assert!(!full.contains(130));
    assert_eq!(full.ranges_iter().collect::<Vec<_>>(), vec![0..130]);

    let zero = BitMask::full(0);
    assert!(zero.is_empty());
    assert_eq!(zero.ranges_iter().count(), 0);
    assert!(zero.to_bools().is_empty());
}

#[test]
fn test_set_contains() {
    let mut mask = BitMask::empty(200);
    mask.set(0);
    mask.set(63);
    mask.set(64);
    mask.set(199);
    assert!(mask.contains(0));
    assert!(mask.contains(63));
    assert!(mask.contains(64));
    assert!(mask.contains(199));
    assert!(!mask.contains(1));
    assert_eq!(mask.count_ones(), 4);

    assert_eq!(
        mask.ranges_iter().collect::<Vec<_>>(),
        vec![0..1, 63..65, 199..200]
    );
}

#[test]
#[should_panic]
fn test_set_out_of_bounds() {
    let mut mask = BitMask::empty(10);
    mask.set(10);
}

#[test]
fn test_set_range_across_words() {
    let mut mask = BitMask::empty(300);
    mask.set_range(10..20);
    mask.set_range(60..200);
    mask.set_range(299..300);
    assert_eq!(
        mask.ranges_iter().collect::<Vec<_>>(),
        vec![10..20, 60..200, 299..300]
    );
    assert_eq!(mask.count_ones(), 10 + 140 + 1);

    // overlapping and touching ranges fuse
    mask.set_range(15..60);
    assert_eq!(
        mask.ranges_iter().collect::<Vec<_>>(),
        vec![10..200, 299..300]
    );

    // empty ranges are ignored
    mask.set_range(5..5);
    assert_eq!(mask.ranges_iter().count(), 2);
}

#[test]
fn test_from_bools_round_trip() {
    let values = [true, true, false, false, true, false, false, false, true, true];
    let mask = BitMask::from_bools(&values);
    assert_eq!(mask.len(), 10);
    assert_eq!(mask.to_bools(), values.to_vec());
    assert_eq!(mask.ranges_iter().collect::<Vec<_>>(), vec![0..2, 4..5, 8..10]);
}

#[test]
fn test_ranges_iter_matches_naive() {
    fastrand::seed(847120093);
    for len in [1usize, 63, 64, 65, 127, 128, 129, 1000, 4097] {
        for density in [0u8, 5, 50, 95, 100] {
            let values = random_bools(len, density);
            let mask = BitMask::from_bools(&values);
            assert_eq!(
                mask.ranges_iter().collect::<Vec<_>>(),
                naive_ranges(&values),
                "len {len} density {density}"
            );
            assert_eq!(mask.count_ones(), values.iter().filter(|&&b| b).count());
            assert_eq!(mask.to_bools(), values);
        }
    }
}

#[test]
fn test_from_positions_and_ranges() {
    let a = BitMask::from_positions([3usize, 1, 3, 70].into_iter(), 80);
    assert_eq!(
        a.to_bools().iter().positions(|&b| b).collect::<Vec<_>>(),
        vec![1, 3, 70]
    );

    let b = BitMask::from_ranges([0usize..2, 64..66].into_iter(), 80);
    assert_eq!(
        b.to_bools().iter().positions(|&b| b).collect::<Vec<_>>(),
        vec![0, 1, 64, 65]
    );
}

#[test]
fn test_bitwise_ops() {
    let a = BitMask::from_ranges([0usize..100].into_iter(), 150);
    let b = BitMask::from_ranges([50usize..150].into_iter(), 150);

    assert_eq!((&a & &b).ranges_iter().collect::<Vec<_>>(), vec![50..100]);
    assert_eq!((&a | &b).ranges_iter().collect::<Vec<_>>(), vec![0..150]);
    assert_eq!((!&a).ranges_iter().collect::<Vec<_>>(), vec![100..150]);

    let mut c = a.clone();
    c.and_not_assign(&b);
    assert_eq!(c.ranges_iter().collect::<Vec<_>>(), vec![0..50]);
}

#[test]
fn test_negate_keeps_tail_clean() {
    let mut mask = BitMask::empty(70);
    mask.negate();
    assert_eq!(mask.count_ones(), 70);
    assert_eq!(mask, BitMask::full(70));
    mask.negate();
    assert_eq!(mask, BitMask::empty(70));
}

#[test]
#[should_panic]
fn test_length_mismatch_panics() {
    let _ = &BitMask::empty(10) & &BitMask::empty(11);
}
