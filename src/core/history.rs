use std::collections::VecDeque;
use crate::error::ConfigurationError;
use crate::Result;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// A timestamped tuple of derived quantities, sampled once per tick
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum HistorySample {
    /// Mechanical energy split of a pendulum
    Energy {
        t: f64,
        pe: f64,
        ke: f64,
        total: f64,
    },

    /// Instantaneous power delivered by the applied force
    Power {
        t: f64,
        power: f64,
        velocity: f64,
    },

    /// Rotational kinematics of a spinning disk
    Rotation {
        t: f64,
        angle: f64,
        angular_velocity: f64,
        angular_acceleration: f64,
    },
}

impl HistorySample {
    /// Returns the simulated time the sample was taken at
    pub fn time(&self) -> f64 {
        match *self {
            Self::Energy { t, .. } | Self::Power { t, .. } | Self::Rotation { t, .. } => t,
        }
    }
}

/// A positional sample used for fading motion paths
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct TrailPoint {
    pub x: f64,
    pub y: f64,
}

impl TrailPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Fixed-capacity FIFO log that discards its oldest entry once full
#[derive(Debug, Clone)]
pub struct HistoryBuffer<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> HistoryBuffer<T> {
    /// Creates an empty buffer holding at most `capacity` entries
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(ConfigurationError::InvalidCapacity.into());
        }
        Ok(Self {
            items: VecDeque::with_capacity(capacity + 1),
            capacity,
        })
    }

    /// Appends an entry, evicting from the front when over capacity
    pub fn push(&mut self, item: T) {
        self.items.push_back(item);
        while self.items.len() > self.capacity {
            self.items.pop_front();
        }
    }

    /// Removes every entry
    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterates from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.items.iter()
    }

    /// The most recent entry
    pub fn latest(&self) -> Option<&T> {
        self.items.back()
    }
}

impl<'a, T> IntoIterator for &'a HistoryBuffer<T> {
    type Item = &'a T;
    type IntoIter = std::collections::vec_deque::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_last_entries_in_order() {
        let mut buffer = HistoryBuffer::new(150).unwrap();
        for i in 0..400 {
            buffer.push(i);
        }
        assert_eq!(buffer.len(), 150);
        let kept: Vec<i32> = buffer.iter().copied().collect();
        let expected: Vec<i32> = (250..400).collect();
        assert_eq!(kept, expected);
    }

    #[test]
    fn below_capacity_nothing_is_evicted() {
        let mut buffer = HistoryBuffer::new(3).unwrap();
        buffer.push('a');
        buffer.push('b');
        assert_eq!(buffer.iter().collect::<String>(), "ab");
        assert_eq!(buffer.latest(), Some(&'b'));
    }

    #[test]
    fn clear_empties_buffer() {
        let mut buffer = HistoryBuffer::new(2).unwrap();
        buffer.push(TrailPoint::new(1.0, 2.0));
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.capacity(), 2);
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert!(HistoryBuffer::<f64>::new(0).is_err());
    }
}
