//! Named periodic tasks on a virtual timeline.
//!
//! Time is a `Duration` since the scheduler's origin. The runtime feeds it
//! elapsed wall-clock time; tests feed it whatever they like.

use std::time::Duration;

/// Shortest accepted period. Zero would fire forever in one poll.
const MIN_PERIOD: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodicTask<K> {
    pub key: K,
    pub period: Duration,
    pub last_fired: Option<Duration>,
    pub next_fire: Duration,
}

#[derive(Debug, Clone)]
pub struct Scheduler<K> {
    tasks: Vec<PeriodicTask<K>>,
}

impl<K> Default for Scheduler<K> {
    fn default() -> Self {
        Self { tasks: Vec::new() }
    }
}

impl<K: Copy + PartialEq> Scheduler<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Scheduler::add`].
    pub fn every(mut self, key: K, period: Duration) -> Self {
        self.add(key, period);
        self
    }

    /// Registers `key` to fire every `period`, first one period after the
    /// origin. Tasks are independent of each other.
    pub fn add(&mut self, key: K, period: Duration) {
        let period = period.max(MIN_PERIOD);
        self.tasks.push(PeriodicTask {
            key,
            period,
            last_fired: None,
            next_fire: period,
        });
    }

    pub fn task(&self, key: K) -> Option<&PeriodicTask<K>> {
        self.tasks.iter().find(|t| t.key == key)
    }

    /// Earliest pending fire time.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.tasks.iter().map(|t| t.next_fire).min()
    }

    /// Every fire due at or before `now`, in time order. A task that missed
    /// several periods fires once per period so none are dropped; ties go to
    /// the task registered first.
    pub fn poll(&mut self, now: Duration) -> Vec<K> {
        let mut fired = Vec::new();

        while let Some(task) = self
            .tasks
            .iter_mut()
            .filter(|t| t.next_fire <= now)
            .min_by_key(|t| t.next_fire)
        {
            fired.push(task.key);
            task.last_fired = Some(task.next_fire);
            task.next_fire += task.period;
        }

        fired
    }
}
