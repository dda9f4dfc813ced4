//! Exhaustive subset search used by the approximate-optimal policy.
//!
//! Picks the subset of candidates with the highest total utility whose total
//! model weight stays within a budget (a 0/1 knapsack). The search is
//! exponential, so the candidate count is capped.

use std::collections::BTreeMap;

use super::CheckerError;

/// Largest candidate set the search accepts.
pub const MAX_SEARCH_CANDIDATES: usize = 9;

/// Returns the best subset of `utilities` keys whose summed `weight` is at
/// most `budget`, or an empty subset when no non-empty subset fits.
///
/// Subsets are visited smallest first and, within a size, in key order; on a
/// utility tie the first one visited wins.
pub fn most_valuable_under_budget<F>(
    utilities: &BTreeMap<String, f64>,
    weight: F,
    budget: f64,
) -> Result<Vec<String>, CheckerError>
where
    F: Fn(&str) -> f64,
{
    let n = utilities.len();
    if n > MAX_SEARCH_CANDIDATES {
        return Err(CheckerError::SearchSpaceTooLarge {
            candidates: n,
            limit: MAX_SEARCH_CANDIDATES,
        });
    }

    let items: Vec<(&String, f64, f64)> = utilities
        .iter()
        .map(|(pw, utility)| (pw, weight(pw), *utility))
        .collect();

    let mut best: Option<(u32, f64)> = None;
    for size in 1..=n as u32 {
        for mask in 1u32..(1 << n) {
            if mask.count_ones() != size {
                continue;
            }
            let total_weight: f64 = members(&items, mask).map(|(_, w, _)| w).sum();
            if total_weight > budget {
                continue;
            }
            let total_utility: f64 = members(&items, mask).map(|(_, _, u)| u).sum();
            if best.is_none_or(|(_, u)| total_utility > u) {
                best = Some((mask, total_utility));
            }
        }
    }

    Ok(match best {
        Some((mask, _)) => members(&items, mask)
            .map(|(pw, _, _)| (*pw).clone())
            .collect(),
        None => Vec::new(),
    })
}

fn members<T>(items: &[T], mask: u32) -> impl Iterator<Item = &T> {
    items
        .iter()
        .enumerate()
        .filter(move |(i, _)| mask & (1 << *i) != 0)
        .map(|(_, item)| item)
}
