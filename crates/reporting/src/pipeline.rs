//! Generic filter-and-reduce pipeline over borrowed records.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use stonedesk_finance::Transaction;
use stonedesk_inventory::Material;
use stonedesk_purchasing::Purchase;
use stonedesk_sales::Sale;

use crate::period::{DateRange, MonthWindow};

/// Records that carry a calendar date used for period filters.
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

impl Dated for Sale {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Dated for Purchase {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Dated for Transaction {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Dated for Material {
    fn date(&self) -> NaiveDate {
        self.entry_date
    }
}

/// Count and summed value of one group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct GroupTotal {
    pub count: usize,
    pub total: f64,
}

impl GroupTotal {
    pub fn add(&mut self, value: f64) {
        self.count += 1;
        self.total += value;
    }
}

/// A filtered view over a slice of records.
///
/// Filters narrow the view; reducers never mutate it, so the same pipeline
/// can feed several reducers.
///
/// ```
/// use stonedesk_reporting::Pipeline;
///
/// let amounts = [120.0, 80.0, 300.0];
/// let p = Pipeline::new(&amounts[..]).filter(|a| *a > 100.0);
/// assert_eq!(p.count(), 2);
/// assert_eq!(p.sum_by(|a| *a), 420.0);
/// ```
#[derive(Debug, Clone)]
pub struct Pipeline<'a, T> {
    records: Vec<&'a T>,
}

impl<'a, T> Pipeline<'a, T> {
    pub fn new(records: &'a [T]) -> Self {
        Self {
            records: records.iter().collect(),
        }
    }

    pub fn filter(mut self, predicate: impl Fn(&T) -> bool) -> Self {
        self.records.retain(|r| predicate(*r));
        self
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn sum_by(&self, value: impl Fn(&T) -> f64) -> f64 {
        self.records.iter().map(|r| value(*r)).sum()
    }

    /// The `k` records with the largest `key`, descending.
    ///
    /// Ties keep input order. NaN keys sort last.
    pub fn top_n(&self, k: usize, key: impl Fn(&T) -> f64) -> Vec<&'a T> {
        let mut ranked = self.records.clone();
        ranked.sort_by(|a, b| {
            let (ka, kb) = (key(*a), key(*b));
            match (ka.is_nan(), kb.is_nan()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => kb.partial_cmp(&ka).unwrap_or(Ordering::Equal),
            }
        });
        ranked.truncate(k);
        ranked
    }

    pub fn group_by<K: Ord>(
        &self,
        key: impl Fn(&T) -> K,
        value: impl Fn(&T) -> f64,
    ) -> BTreeMap<K, GroupTotal> {
        let mut groups: BTreeMap<K, GroupTotal> = BTreeMap::new();
        for r in &self.records {
            groups.entry(key(*r)).or_default().add(value(*r));
        }
        groups
    }

    pub fn records(&self) -> &[&'a T] {
        &self.records
    }

    pub fn into_records(self) -> Vec<&'a T> {
        self.records
    }
}

impl<'a, T: Dated> Pipeline<'a, T> {
    /// Keep records dated inside `range` (bounds included).
    pub fn within(self, range: DateRange) -> Self {
        self.filter(|r| range.contains(r.date()))
    }

    pub fn in_month(self, month: MonthWindow) -> Self {
        self.within(month.range())
    }
}

impl<'a, T> FromIterator<&'a T> for Pipeline<'a, T> {
    fn from_iter<I: IntoIterator<Item = &'a T>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}
