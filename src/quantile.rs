use std::collections::HashMap;

use crate::config::Percentile;
use crate::model::GroupKey;

/// Rounds to whole currency units, halves going up (`2.5 -> 3`, `-2.5 -> -2`).
/// `amount - floor` is exact, so values just below a half stay down.
pub fn round_half_up(amount: f64) -> i64 {
    let floor = amount.floor();
    let rounded = if amount - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded as i64
}

/// 1-based nearest rank `ceil(p * n / 100)`, clamped to `[1, n]`.
pub fn nearest_rank(percentile: Percentile, n: usize) -> usize {
    assert!(n > 0, "nearest rank of an empty group");
    let p = percentile.get() as usize;
    ((p * n + 99) / 100).clamp(1, n)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupSnapshot {
    pub percentile_value: i64,
    pub running_total: i128,
    pub running_count: usize,
}

/// Rounded contributions of one group, kept in ascending order.
#[derive(Debug, Default)]
pub struct ContributionGroup {
    sum: i128,
    values: Vec<i64>,
}

impl ContributionGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts after every equal value already present, so ties keep
    /// arrival order.
    pub fn insert(&mut self, amount: i64) {
        let idx = self.values.partition_point(|&v| v <= amount);
        self.values.insert(idx, amount);
        self.sum += i128::from(amount);
    }

    pub fn value_at_rank(&self, percentile: Percentile) -> i64 {
        self.values[nearest_rank(percentile, self.values.len()) - 1]
    }

    pub fn snapshot(&self, percentile: Percentile) -> GroupSnapshot {
        GroupSnapshot {
            percentile_value: self.value_at_rank(percentile),
            running_total: self.sum,
            running_count: self.values.len(),
        }
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }

    pub fn count(&self) -> usize {
        self.values.len()
    }

    pub fn total(&self) -> i128 {
        self.sum
    }
}

/// Running contribution groups keyed by (recipient, postal code, year).
#[derive(Debug)]
pub struct GroupAggregator {
    percentile: Percentile,
    groups: HashMap<GroupKey, ContributionGroup>,
}

impl GroupAggregator {
    pub fn new(percentile: Percentile) -> Self {
        Self {
            percentile,
            groups: HashMap::new(),
        }
    }

    pub fn percentile(&self) -> Percentile {
        self.percentile
    }

    pub fn insert_and_query(&mut self, key: GroupKey, amount: f64) -> GroupSnapshot {
        let group = self.groups.entry(key).or_insert_with(ContributionGroup::new);
        group.insert(round_half_up(amount));
        group.snapshot(self.percentile)
    }

    pub fn get(&self, key: &GroupKey) -> Option<&ContributionGroup> {
        self.groups.get(key)
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pct(p: i64) -> Percentile {
        Percentile::new(p).unwrap()
    }

    fn key(year: i32) -> GroupKey {
        GroupKey {
            recipient_id: "C001".to_string(),
            postal_code: "12345".to_string(),
            year,
        }
    }

    #[test]
    fn test_nearest_rank() {
        assert_eq!(nearest_rank(pct(30), 1), 1);
        assert_eq!(nearest_rank(pct(30), 2), 1);
        assert_eq!(nearest_rank(pct(30), 4), 2);
        assert_eq!(nearest_rank(pct(50), 4), 2);
        assert_eq!(nearest_rank(pct(50), 5), 3);
        assert_eq!(nearest_rank(pct(0), 1), 1);
        assert_eq!(nearest_rank(pct(0), 7), 1);
        assert_eq!(nearest_rank(pct(100), 7), 7);
        for n in 1..200 {
            for p in [0, 1, 33, 50, 99, 100] {
                let r = nearest_rank(pct(p), n);
                assert!(r >= 1 && r <= n);
            }
        }
    }

    #[test]
    #[should_panic]
    fn test_empty_group_rank_panics() {
        nearest_rank(pct(50), 0);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(0.0), 0);
        assert_eq!(round_half_up(2.49), 2);
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(333.0), 333);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.51), -3);
        assert_eq!(round_half_up(0.49999999999999994), 0);
        assert_eq!(round_half_up(1.4999999999999998), 1);
        assert_eq!(round_half_up(9_007_199_254_740_991.0), 9_007_199_254_740_991);
    }

    #[test]
    fn test_group_running_stats() {
        let mut agg = GroupAggregator::new(pct(30));
        assert_eq!(
            agg.insert_and_query(key(2017), 100.0),
            GroupSnapshot {
                percentile_value: 100,
                running_total: 100,
                running_count: 1
            }
        );
        assert_eq!(
            agg.insert_and_query(key(2017), 200.0),
            GroupSnapshot {
                percentile_value: 100,
                running_total: 300,
                running_count: 2
            }
        );
        let s = agg.insert_and_query(key(2017), 50.4);
        assert_eq!(s.percentile_value, 50);
        assert_eq!(s.running_total, 350);
        assert_eq!(s.running_count, 3);

        agg.insert_and_query(key(2018), 7.0);
        assert_eq!(agg.group_count(), 2);
        assert_eq!(agg.get(&key(2017)).unwrap().values(), &[50, 100, 200]);
    }

    #[test]
    fn test_values_stay_sorted_and_total_matches() {
        let mut agg = GroupAggregator::new(pct(75));
        let amounts = [40.0, 10.0, 90.0, 10.0, 55.5, 0.0, 90.0, 12.0];
        let mut expected_total = 0;
        for (i, a) in amounts.iter().enumerate() {
            let s = agg.insert_and_query(key(2017), *a);
            expected_total += i128::from(round_half_up(*a));
            assert_eq!(s.running_count, i + 1);
            assert_eq!(s.running_total, expected_total);
            let group = agg.get(&key(2017)).unwrap();
            assert!(group.values().windows(2).all(|w| w[0] <= w[1]));
            assert!(group.values().contains(&s.percentile_value));
        }
        assert_eq!(agg.get(&key(2017)).unwrap().total(), expected_total);
    }

    #[test]
    fn test_total_of_large_amounts_keeps_growing() {
        let mut agg = GroupAggregator::new(pct(50));
        let big = 9_007_199_254_740_991.0;
        let mut prev = 0i128;
        for n in 1..=2048usize {
            let s = agg.insert_and_query(key(2017), big);
            assert_eq!(s.running_count, n);
            assert!(s.running_total > prev);
            prev = s.running_total;
        }
        assert_eq!(prev, 2048 * 9_007_199_254_740_991i128);
    }
}
