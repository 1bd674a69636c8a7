//! Re-orders results that arrive out of order from parallel workers
//!
//! Two min-heaps: the keys still expected, and the results received but not
//! yet released. A result is released once it is the smallest key still
//! expected, so output streams in `(year, day, part)` order.

use crate::executor::SolverResult;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Key for ordering results (year, day, part) - ordered ascending
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Clone, Copy)]
pub struct ResultKey {
    pub year: u16,
    pub day: u8,
    pub part: u8,
}

/// Anything the aggregator can order
pub trait Keyed {
    fn key(&self) -> ResultKey;
}

impl Keyed for SolverResult {
    fn key(&self) -> ResultKey {
        ResultKey {
            year: self.year,
            day: self.day,
            part: self.part,
        }
    }
}

/// Heap entry ordered smallest key first
struct Pending<T>(T);

impl<T: Keyed> Ord for Pending<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.0.key().cmp(&self.0.key())
    }
}

impl<T: Keyed> PartialOrd for Pending<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Keyed> Eq for Pending<T> {}

impl<T: Keyed> PartialEq for Pending<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0.key() == other.0.key()
    }
}

pub struct ResultAggregator<T> {
    expected: BinaryHeap<Reverse<ResultKey>>,
    pending: BinaryHeap<Pending<T>>,
}

impl<T: Keyed> ResultAggregator<T> {
    pub fn new(expected_keys: impl IntoIterator<Item = ResultKey>) -> Self {
        Self {
            expected: expected_keys.into_iter().map(Reverse).collect(),
            pending: BinaryHeap::new(),
        }
    }

    /// Add a result and return every result now ready, in order
    pub fn add(&mut self, result: T) -> Vec<T> {
        self.pending.push(Pending(result));

        let mut ready = Vec::new();
        while let (Some(Reverse(next_expected)), Some(top)) =
            (self.expected.peek(), self.pending.peek())
        {
            if top.0.key() != *next_expected {
                break;
            }
            self.expected.pop();
            if let Some(Pending(result)) = self.pending.pop() {
                ready.push(result);
            }
        }
        ready
    }

    /// Remaining buffered results in key order
    pub fn drain(&mut self) -> Vec<T> {
        let mut results: Vec<T> = self.pending.drain().map(|p| p.0).collect();
        results.sort_by_key(Keyed::key);
        results
    }

    pub fn is_complete(&self) -> bool {
        self.expected.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, PartialEq)]
    struct Tagged(ResultKey);

    impl Keyed for Tagged {
        fn key(&self) -> ResultKey {
            self.0
        }
    }

    fn key(year: u16, day: u8, part: u8) -> ResultKey {
        ResultKey { year, day, part }
    }

    fn keys_of(results: &[Tagged]) -> Vec<ResultKey> {
        results.iter().map(Keyed::key).collect()
    }

    #[test]
    fn test_in_order_results() {
        let mut agg = ResultAggregator::new([key(2025, 12, 1), key(2025, 12, 2)]);

        assert_eq!(keys_of(&agg.add(Tagged(key(2025, 12, 1)))), vec![key(2025, 12, 1)]);
        assert_eq!(keys_of(&agg.add(Tagged(key(2025, 12, 2)))), vec![key(2025, 12, 2)]);
        assert!(agg.is_complete());
    }

    #[test]
    fn test_out_of_order_results() {
        let mut agg =
            ResultAggregator::new([key(2024, 1, 1), key(2024, 1, 2), key(2025, 12, 1)]);

        assert!(agg.add(Tagged(key(2025, 12, 1))).is_empty());
        assert!(agg.add(Tagged(key(2024, 1, 2))).is_empty());

        let ready = agg.add(Tagged(key(2024, 1, 1)));
        assert_eq!(
            keys_of(&ready),
            vec![key(2024, 1, 1), key(2024, 1, 2), key(2025, 12, 1)]
        );
        assert!(agg.is_complete());
    }

    #[test]
    fn test_drain_remaining() {
        let mut agg = ResultAggregator::new([key(2025, 1, 1), key(2025, 1, 2), key(2025, 2, 1)]);

        agg.add(Tagged(key(2025, 2, 1)));
        agg.add(Tagged(key(2025, 1, 2)));

        assert_eq!(
            keys_of(&agg.drain()),
            vec![key(2025, 1, 2), key(2025, 2, 1)]
        );
        assert!(!agg.is_complete());
    }

    proptest! {
        /// Whatever order results arrive in, they come out sorted and all
        /// of them come out
        #[test]
        fn prop_any_arrival_order_is_released_sorted(
            order in Just((0..12usize).collect::<Vec<_>>()).prop_shuffle()
        ) {
            let all: Vec<ResultKey> = (0..12usize)
                .map(|i| key(2020 + (i / 4) as u16, (i % 4 / 2) as u8 + 1, (i % 2) as u8 + 1))
                .collect();
            let mut agg = ResultAggregator::new(all.clone());

            let mut released = Vec::new();
            for i in order {
                released.extend(keys_of(&agg.add(Tagged(all[i]))));
            }

            prop_assert!(agg.is_complete());
            prop_assert!(agg.drain().is_empty());
            prop_assert_eq!(released, all);
        }
    }

    #[test]
    fn test_solver_result_key() {
        let result = SolverResult {
            year: 2025,
            day: 12,
            part: 1,
            answer: Ok("2".to_string()),
            verdict: aoc_solver::Verdict::Unchecked,
            solve_duration: chrono::TimeDelta::milliseconds(10),
            parse_duration: Some(chrono::TimeDelta::milliseconds(5)),
        };
        assert_eq!(result.key(), key(2025, 12, 1));
    }
}
