use meshmask_testkit::data_gen::{clustered_membership, random_indices, random_membership};

use super::{grid, line};
use crate::{DomainRef, ElementDomain, ElementKind, ExecutionMask};

/// Random masks over a shared domain, mixing sparse, dense and clustered
/// layouts.
fn random_masks(domain: &DomainRef, kind: ElementKind, n: usize) -> Vec<ExecutionMask> {
    let count = domain.element_count(kind);
    (0..n)
        .map(|i| {
            let values = match i % 4 {
                0 => random_membership(count, 5),
                1 => random_membership(count, 60),
                2 => clustered_membership(count, 12),
                _ => {
                    let mut v = vec![false; count];
                    for idx in random_indices(count.max(1), count / 10) {
                        v[idx as usize] = true;
                    }
                    v
                }
            };
            ExecutionMask::from_bools(domain.clone(), kind, &values).unwrap()
        })
        .collect()
}

fn domains() -> Vec<(DomainRef, ElementKind)> {
    vec![
        (line(1), ElementKind::Cells),
        (line(64), ElementKind::Edges),
        (line(1000), ElementKind::Cells),
        (grid(17, 9), ElementKind::Cells),
        (grid(17, 9), ElementKind::Edges),
    ]
}

#[test]
fn test_idempotence() {
    fastrand::seed(120001);
    for (domain, kind) in domains() {
        for a in random_masks(&domain, kind, 8) {
            assert_eq!(a.union(&a).unwrap(), a);
            assert_eq!(a.intersect(&a).unwrap(), a);
            assert!(a.except(&a).unwrap().is_empty());
        }
    }
}

#[test]
fn test_commutativity() {
    fastrand::seed(120002);
    for (domain, kind) in domains() {
        let masks = random_masks(&domain, kind, 6);
        for a in &masks {
            for b in &masks {
                assert_eq!(a.union(b).unwrap(), b.union(a).unwrap());
                assert_eq!(a.intersect(b).unwrap(), b.intersect(a).unwrap());
                assert_eq!(
                    ExecutionMask::union_of(a, b).unwrap(),
                    a.union(b).unwrap()
                );
                assert_eq!(
                    ExecutionMask::intersection_of(a, b).unwrap(),
                    a.intersect(b).unwrap()
                );
            }
        }
    }
}

#[test]
fn test_de_morgan() {
    fastrand::seed(120003);
    for (domain, kind) in domains() {
        let masks = random_masks(&domain, kind, 6);
        for a in &masks {
            for b in &masks {
                let lhs = a.union(b).unwrap().complement();
                let rhs = a.complement().intersect(&b.complement()).unwrap();
                assert_eq!(lhs, rhs);

                let lhs = a.intersect(b).unwrap().complement();
                let rhs = a.complement().union(&b.complement()).unwrap();
                assert_eq!(lhs, rhs);
            }
        }
    }
}

#[test]
fn test_complement_involution_and_cardinality() {
    fastrand::seed(120004);
    for (domain, kind) in domains() {
        let total = domain.element_count(kind);
        for a in random_masks(&domain, kind, 8) {
            let c = a.complement();
            assert_eq!(c.complement(), a);
            assert_eq!(a.no_of_items_locally() + c.no_of_items_locally(), total);
            assert!(a.intersect(&c).unwrap().is_empty());
            assert_eq!(
                a.union(&c).unwrap(),
                ExecutionMask::full(domain.clone(), kind)
            );
        }
    }
}

#[test]
fn test_except_consistency() {
    fastrand::seed(120005);
    for (domain, kind) in domains() {
        let masks = random_masks(&domain, kind, 6);
        for a in &masks {
            for b in &masks {
                assert_eq!(
                    a.except(b).unwrap(),
                    a.intersect(&b.complement()).unwrap()
                );
            }
        }
    }
}

#[test]
fn test_sub_mask_law() {
    fastrand::seed(120006);
    for (domain, kind) in domains() {
        let masks = random_masks(&domain, kind, 6);
        for a in &masks {
            for b in &masks {
                let inter = a.intersect(b).unwrap();
                assert!(inter.is_sub_mask_of(a).unwrap());
                assert!(inter.is_sub_mask_of(b).unwrap());

                let expected = a.items().all(|i| b.bit_mask().contains(i));
                assert_eq!(a.is_sub_mask_of(b).unwrap(), expected);
            }
        }
    }
}

#[test]
fn test_results_are_canonical() {
    fastrand::seed(120007);
    for (domain, kind) in domains() {
        let masks = random_masks(&domain, kind, 6);
        for a in &masks {
            for b in &masks {
                for result in [
                    a.union(b).unwrap(),
                    a.intersect(b).unwrap(),
                    a.except(b).unwrap(),
                    a.complement(),
                ] {
                    let chunks = result.chunks().collect::<Vec<_>>();
                    assert!(chunks.iter().all(|c| c.len >= 1));
                    for pair in chunks.windows(2) {
                        // ascending, disjoint and never touching
                        assert!(pair[0].je() < pair[1].i0);
                    }
                    assert_eq!(result.kind(), kind);
                    assert!(result.imax() < domain.element_count(kind) as i64);
                }
            }
        }
    }
}
