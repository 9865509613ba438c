//! A binary heap keyed by `(priority, randomised_tiebreak, insertion_serial)`.
//!
//! Elements are never compared directly — only the key tuple is, so the
//! payload doesn't need `Ord`. A randomised secondary key diversifies which
//! of several equal-priority entries pops first; the serial guarantees a
//! total order so the heap never needs to fall back to comparing payloads.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::collections::HashMap;
use std::hash::Hash;

use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Key {
    priority: i64,
    tiebreak: i64,
    serial: u64,
}

struct Entry<T> {
    key: Key,
    value: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}
impl<T> Eq for Entry<T> {}
impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

/// A unique-push priority queue over elements of type `T: Eq + Hash + Clone`.
pub struct PriorityQueue<T> {
    heap: BinaryHeap<Reverse<Entry<T>>>,
    best_priority: HashMap<T, i64>,
    next_serial: u64,
    rng: rand::rngs::StdRng,
}

impl<T: Eq + Hash + Clone> PriorityQueue<T> {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self {
            heap: BinaryHeap::new(),
            best_priority: HashMap::new(),
            next_serial: 0,
            rng: rand::rngs::StdRng::seed_from_u64(seed),
        }
    }

    fn next_key(&mut self, priority: i64) -> Key {
        let serial = self.next_serial;
        self.next_serial += 1;
        let lo = serial / 2;
        let tiebreak = if lo >= serial {
            lo as i64
        } else {
            self.rng.random_range(lo..=serial) as i64
        };
        Key {
            priority,
            tiebreak,
            serial,
        }
    }

    /// Unconditionally push `value` with `priority`.
    pub fn push(&mut self, value: T, priority: i64) {
        let key = self.next_key(priority);
        self.best_priority
            .entry(value.clone())
            .and_modify(|p| {
                if priority < *p {
                    *p = priority;
                }
            })
            .or_insert(priority);
        self.heap.push(Reverse(Entry { key, value }));
    }

    /// Push `value` only if it's new or improves on its best known priority.
    /// A worse-or-equal existing priority leaves the queue untouched. Returns
    /// whether the value was (re-)pushed.
    pub fn unique_push(&mut self, value: T, priority: i64) -> bool {
        if let Some(&existing) = self.best_priority.get(&value) {
            if priority >= existing {
                return false;
            }
        }
        self.push(value, priority);
        true
    }

    pub fn contains(&self, value: &T) -> bool {
        self.best_priority.contains_key(value)
    }

    /// Pop the lowest-priority element, skipping stale entries left behind
    /// by `unique_push` replacing a worse one.
    pub fn pop(&mut self) -> Option<T> {
        while let Some(Reverse(entry)) = self.heap.pop() {
            let current_best = self.best_priority.get(&entry.value).copied();
            if current_best == Some(entry.key.priority) {
                self.best_priority.remove(&entry.value);
                return Some(entry.value);
            }
            // Stale: a cheaper priority for this value was pushed later.
        }
        None
    }

    pub fn is_empty(&self) -> bool {
        self.best_priority.is_empty()
    }

    pub fn len(&self) -> usize {
        self.best_priority.len()
    }
}
