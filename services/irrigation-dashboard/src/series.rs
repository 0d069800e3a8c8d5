//! Bounded humidity time series backing the chart

use std::collections::VecDeque;

/// Default number of points kept on the chart
pub const DEFAULT_CAPACITY: usize = 15;

/// A single chart point
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// FIFO series of labelled humidity values.
///
/// Labels and values are stored together, so both sides always have the
/// same length and are evicted in lockstep.
#[derive(Debug, Clone)]
pub struct HumiditySeries {
    points: VecDeque<ChartPoint>,
    capacity: usize,
}

impl Default for HumiditySeries {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl HumiditySeries {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            points: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Append a point, returning the evicted oldest point if the series was full
    pub fn push(&mut self, label: impl Into<String>, value: f64) -> Option<ChartPoint> {
        self.points.push_back(ChartPoint {
            label: label.into(),
            value,
        });
        if self.points.len() > self.capacity {
            self.points.pop_front()
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn points(&self) -> impl Iterator<Item = &ChartPoint> {
        self.points.iter()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.points.iter().map(|p| p.label.as_str()).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn latest(&self) -> Option<&ChartPoint> {
        self.points.back()
    }
}
