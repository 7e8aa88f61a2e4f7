//! Multi-objective non-domination filter.
//!
//! `a` weakly dominates `b` when it is at least as good on every objective;
//! it strictly dominates when it is also better on at least one. The frontier
//! keeps every item that no other item strictly dominates, in input order.
//! Items equal on every objective do not dominate each other.

use super::candidate::{Objectives, Scored};

fn value<T: Scored>(item: &T, key: &str) -> f64 {
    item.score(key).unwrap_or(f64::NAN)
}

fn weakly_dominates<T: Scored>(a: &T, b: &T, objectives: &Objectives) -> bool {
    objectives
        .maximize
        .iter()
        .all(|k| value(a, k) >= value(b, k))
        && objectives
            .minimize
            .iter()
            .all(|k| value(a, k) <= value(b, k))
}

/// True when `a` strictly dominates `b`.
pub fn dominates<T: Scored>(a: &T, b: &T, objectives: &Objectives) -> bool {
    weakly_dominates(a, b, objectives)
        && (objectives.maximize.iter().any(|k| value(a, k) > value(b, k))
            || objectives.minimize.iter().any(|k| value(a, k) < value(b, k)))
}

/// Positions of the non-dominated items, ascending. O(n²).
pub fn pareto_indices<T: Scored>(items: &[T], objectives: &Objectives) -> Vec<usize> {
    (0..items.len())
        .filter(|&i| {
            !items
                .iter()
                .enumerate()
                .any(|(j, other)| j != i && dominates(other, &items[i], objectives))
        })
        .collect()
}

pub fn pareto_frontier<'a, T: Scored>(items: &'a [T], objectives: &Objectives) -> Vec<&'a T> {
    pareto_indices(items, objectives)
        .into_iter()
        .map(|i| &items[i])
        .collect()
}
