//! Shared refresh clock: a list of `(interval, callback)` jobs driven from the
//! single UI thread.
//!
//! The scheduler owns no clock of its own. The event loop feeds it elapsed time
//! through [`Scheduler::advance`]; tests call [`Scheduler::tick_all`] to drive
//! N ticks deterministically.

use std::time::Duration;

type Job<C> = Box<dyn FnMut(&mut C)>;

struct Entry<C> {
    name: &'static str,
    interval: Duration,
    remaining: Duration,
    job: Job<C>,
}

pub struct Scheduler<C> {
    entries: Vec<Entry<C>>,
}

impl<C> Default for Scheduler<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Scheduler<C> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register a job. Jobs fire in registration order within one tick.
    pub fn every<F>(&mut self, name: &'static str, interval: Duration, job: F)
    where
        F: FnMut(&mut C) + 'static,
    {
        self.entries.push(Entry {
            name,
            interval,
            remaining: interval,
            job: Box::new(job),
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.name).collect()
    }

    /// Let `elapsed` pass and fire every job that came due. Returns how many fired.
    ///
    /// A job fires at most once per call. Overshoot past the due time is taken
    /// off the next period, so frame-sized lateness does not accumulate. A stall
    /// of a whole interval or more is not replayed; the period restarts instead.
    pub fn advance(&mut self, ctx: &mut C, elapsed: Duration) -> usize {
        let mut fired = 0;
        for e in &mut self.entries {
            if elapsed < e.remaining {
                e.remaining -= elapsed;
                continue;
            }
            let overshoot = elapsed - e.remaining;
            (e.job)(ctx);
            e.remaining = if overshoot < e.interval {
                e.interval - overshoot
            } else {
                e.interval
            };
            fired += 1;
        }
        fired
    }

    /// Fire every job once right now and restart their intervals.
    pub fn tick_all(&mut self, ctx: &mut C) {
        for e in &mut self.entries {
            (e.job)(ctx);
            e.remaining = e.interval;
        }
    }

    /// Time until the next job is due.
    pub fn next_due(&self) -> Option<Duration> {
        self.entries.iter().map(|e| e.remaining).min()
    }
}
