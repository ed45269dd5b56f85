//! Missing value imputation statistics

use std::collections::BTreeMap;

/// Median of the observed values, ignoring missing entries.
///
/// Returns `None` when no value is observed. For an even count the two middle
/// values are averaged.
pub fn median(values: &[Option<f64>]) -> Option<f64> {
    let mut observed: Vec<f64> = values.iter().flatten().copied().collect();
    if observed.is_empty() {
        return None;
    }

    observed.sort_by(|a, b| a.total_cmp(b));
    let mid = observed.len() / 2;

    if observed.len() % 2 == 0 {
        Some((observed[mid - 1] + observed[mid]) / 2.0)
    } else {
        Some(observed[mid])
    }
}

/// Most frequent observed value, ignoring missing entries.
///
/// Ties resolve to the lexicographically smallest value so the result does not
/// depend on row order.
pub fn most_frequent(values: &[Option<String>]) -> Option<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for value in values.iter().flatten() {
        *counts.entry(value.as_str()).or_insert(0) += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for (value, count) in counts {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((value, count)),
        }
    }

    best.map(|(value, _)| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&[Some(3.0), Some(1.0), Some(2.0)]), Some(2.0));
        assert_eq!(median(&[Some(4.0), Some(1.0), Some(3.0), Some(2.0)]), Some(2.5));
    }

    #[test]
    fn test_median_ignores_missing() {
        assert_eq!(median(&[None, Some(10.0), None, Some(20.0), Some(30.0)]), Some(20.0));
        assert_eq!(median(&[None, None]), None);
    }

    #[test]
    fn test_most_frequent_tie_breaks_lexicographically() {
        let values = vec![
            Some("standard".to_string()),
            Some("free/reduced".to_string()),
            None,
            Some("standard".to_string()),
            Some("free/reduced".to_string()),
        ];
        assert_eq!(most_frequent(&values), Some("free/reduced".to_string()));
    }

    #[test]
    fn test_most_frequent_picks_mode() {
        let values = vec![
            Some("b".to_string()),
            Some("a".to_string()),
            Some("b".to_string()),
        ];
        assert_eq!(most_frequent(&values), Some("b".to_string()));
        assert_eq!(most_frequent(&[None]), None);
    }
}
