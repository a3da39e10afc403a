//! Small aggregation helpers shared by the summary pass and the
//! insight engine. Grouping is explicit — a key paired with the rows
//! that carry it — so every reduction stays readable and every
//! division is guarded at the call site.

use std::collections::HashMap;
use std::hash::Hash;

/// Mean of a slice, 0.0 when empty. Empty tables must degrade to
/// zero-valued metrics rather than NaN.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Linearly interpolated percentile (q in [0, 1]) over unsorted data.
/// 0.0 when empty.
pub fn percentile(values: &[f64], q: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let rank = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let frac = rank - lo as f64;
        sorted[lo] + (sorted[hi] - sorted[lo]) * frac
    }
}

/// Round to `places` decimal places. Display contract only — stored
/// values stay full precision until the report boundary.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Group rows by key, preserving first-encounter order of the keys.
/// Tie-breaks downstream ("first encountered in iteration order")
/// depend on this ordering, so it must stay insertion-stable. A
/// hashed index keeps the pass linear even with one group per row,
/// as the per-customer deal grouping produces.
pub fn group_by<'a, T, K, F>(rows: &'a [T], key: F) -> Vec<(K, Vec<&'a T>)>
where
    K: Eq + Hash + Clone,
    F: Fn(&T) -> K,
{
    let mut groups: Vec<(K, Vec<&T>)> = Vec::new();
    let mut index: HashMap<K, usize> = HashMap::new();
    for row in rows {
        let k = key(row);
        match index.get(&k) {
            Some(&slot) => groups[slot].1.push(row),
            None => {
                index.insert(k.clone(), groups.len());
                groups.push((k, vec![row]));
            }
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_empty_is_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[2.0, 4.0]), 3.0);
    }

    #[test]
    fn percentile_interpolates_linearly() {
        let values = [10.0, 20.0, 30.0, 40.0, 50.0];
        assert_eq!(percentile(&values, 0.0), 10.0);
        assert_eq!(percentile(&values, 1.0), 50.0);
        assert_eq!(percentile(&values, 0.5), 30.0);
        // Rank 3.2 between 40 and 50.
        assert!((percentile(&values, 0.8) - 42.0).abs() < 1e-9);
    }

    #[test]
    fn rounding_is_per_place() {
        assert_eq!(round_to(1.23456, 3), 1.235);
        assert_eq!(round_to(1.25, 1), 1.3);
        assert_eq!(round_to(99.4, 0), 99.0);
    }

    #[test]
    fn group_by_preserves_first_encounter_order() {
        let rows = ["b", "a", "b", "c", "a"];
        let groups = group_by(&rows, |r| *r);
        let keys: Vec<&str> = groups.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
        assert_eq!(groups[0].1.len(), 2);
    }

    #[test]
    fn group_by_stays_stable_over_many_distinct_keys() {
        // One group per customer, the shape the deal grouping produces.
        let rows: Vec<String> = (0..1000).map(|i| format!("CUST_{:05}", i % 400)).collect();
        let groups = group_by(&rows, |r| r.clone());
        assert_eq!(groups.len(), 400);
        assert_eq!(groups[0].0, "CUST_00000");
        assert_eq!(groups[399].0, "CUST_00399");
        let total: usize = groups.iter().map(|(_, m)| m.len()).sum();
        assert_eq!(total, 1000);
    }
}
