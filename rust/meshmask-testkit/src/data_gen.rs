//! Random membership generators.
//!
//! All generators draw from the thread-local `fastrand` generator; call
//! `fastrand::seed` first to make a test reproducible.

use std::ops::Range;

/// Dense membership of `len` elements where each element is present with a
/// probability of `density_percent` / 100.
pub fn random_membership(len: usize, density_percent: u8) -> Vec<bool> {
    (0..len)
        .map(|_| fastrand::u8(0..100) < density_percent)
        .collect()
}

/// Dense membership of `len` elements made of alternating absent/present runs
/// with lengths drawn from `1..=max_run`.
pub fn clustered_membership(len: usize, max_run: usize) -> Vec<bool> {
    assert!(max_run >= 1);
    let mut values = Vec::with_capacity(len);
    let mut present = fastrand::bool();
    while values.len() < len {
        let run = fastrand::usize(1..=max_run).min(len - values.len());
        values.extend(std::iter::repeat_n(present, run));
        present = !present;
    }
    values
}

/// `count` random indices below `bound`, unsorted and possibly duplicated.
pub fn random_indices(bound: usize, count: usize) -> Vec<i64> {
    assert!(bound > 0);
    (0..count)
        .map(|_| fastrand::usize(0..bound) as i64)
        .collect()
}

/// Ascending, disjoint ranges within `[0, bound)`, where consecutive ranges
/// may touch.
pub fn random_ranges(bound: usize, max_gap: usize, max_len: usize) -> Vec<Range<usize>> {
    assert!(max_len >= 1);
    let mut ranges = Vec::new();
    let mut pos = fastrand::usize(0..=max_gap);
    while pos < bound {
        let end = (pos + fastrand::usize(1..=max_len)).min(bound);
        ranges.push(pos..end);
        pos = end + fastrand::usize(0..=max_gap);
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clustered_membership_len() {
        fastrand::seed(51234);
        for len in [0usize, 1, 17, 1000] {
            assert_eq!(clustered_membership(len, 8).len(), len);
        }
    }

    #[test]
    fn test_random_ranges_are_ordered() {
        fastrand::seed(98765);
        let ranges = random_ranges(500, 3, 10);
        for pair in ranges.windows(2) {
            assert!(pair[0].end <= pair[1].start);
        }
        assert!(ranges.iter().all(|r| !r.is_empty() && r.end <= 500));
    }
}
