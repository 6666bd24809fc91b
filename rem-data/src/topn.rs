//! Stable top-N extraction.

use std::cmp::Ordering;

/// Sort descending by `key` and keep the first `n`. The sort is stable:
/// entries with equal keys keep their input order, so running the
/// extraction twice yields the same result.
pub fn top_n_by_desc<T: Clone>(items: &[T], n: usize, key: impl Fn(&T) -> f64) -> Vec<T> {
    let mut sorted: Vec<T> = items.to_vec();
    sorted.sort_by(|a, b| key(b).partial_cmp(&key(a)).unwrap_or(Ordering::Equal));
    sorted.truncate(n);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takes_the_n_largest_in_descending_order() {
        let values = vec![3.0, 9.0, 1.0, 7.0, 5.0];
        assert_eq!(top_n_by_desc(&values, 3, |v| *v), vec![9.0, 7.0, 5.0]);
    }

    #[test]
    fn ties_preserve_input_order() {
        let values = vec![("a", 5.0), ("b", 7.0), ("c", 5.0), ("d", 5.0)];
        let top = top_n_by_desc(&values, 4, |(_, v)| *v);
        let names: Vec<&str> = top.iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["b", "a", "c", "d"]);
    }

    #[test]
    fn is_idempotent() {
        let values = vec![("a", 2.0), ("b", 2.0), ("c", 9.0), ("d", 2.0)];
        let once = top_n_by_desc(&values, 3, |(_, v)| *v);
        let twice = top_n_by_desc(&once, 3, |(_, v)| *v);
        assert_eq!(once, twice);
    }

    #[test]
    fn n_larger_than_input_returns_everything() {
        let values = vec![1.0, 2.0];
        assert_eq!(top_n_by_desc(&values, 10, |v| *v).len(), 2);
    }
}
