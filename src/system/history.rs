use std::collections::VecDeque;

pub const DEFAULT_CAPACITY: usize = 25;

/// Rolling window of the most recent system CPU percentages, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct CpuHistory {
    samples: VecDeque<f64>,
    capacity: usize,
}

impl CpuHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, cpu: f64) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(cpu);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }

    /// Chart points as `(slot, value)`, slot 0 being the oldest sample.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.samples
            .iter()
            .enumerate()
            .map(|(i, v)| (i as f64, *v))
            .collect()
    }
}

impl Default for CpuHistory {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
