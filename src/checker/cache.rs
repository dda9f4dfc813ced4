//! Bounded memo of acceptance sets, keyed by typed password.
//!
//! Not synchronized; it lives inside a [`Checker`](super::Checker) and is
//! only reached through `&mut self`.

use std::collections::{HashMap, VecDeque};

use super::Candidates;

/// Default number of typed passwords remembered.
pub const DEFAULT_CACHE_CAPACITY: usize = 4096;

/// First-in first-out cache; a capacity of zero disables it.
#[derive(Debug, Clone)]
pub struct DecisionCache {
    entries: HashMap<String, Candidates>,
    order: VecDeque<String>,
    capacity: usize,
}

impl DecisionCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity,
        }
    }

    pub fn get(&self, tpw: &str) -> Option<&Candidates> {
        self.entries.get(tpw)
    }

    pub fn insert(&mut self, tpw: &str, candidates: Candidates) {
        if self.capacity == 0 || self.entries.contains_key(tpw) {
            return;
        }
        while self.entries.len() >= self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            #[cfg(feature = "tracing")]
            tracing::trace!("decision cache full ({}), evicting oldest entry", self.capacity);
            self.entries.remove(&oldest);
        }
        self.order.push_back(tpw.to_string());
        self.entries.insert(tpw.to_string(), candidates);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
