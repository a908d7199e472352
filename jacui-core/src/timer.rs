// SPDX-License-Identifier: MIT

//! Fixed-size timer table multiplexed onto the event stream.

use std::time::{Duration, Instant};

use crate::error::Error;
use crate::Result;

/// Number of timer slots. Slot 0 is reserved, so at most `MAX_TIMERS - 1` timers can exist.
pub const MAX_TIMERS: usize = 128;

/// Shortest interval period. Shorter periods would flood the queue.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Identifies a timer. Never 0 for a live timer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u32);

impl TimerId {
    /// The slot index.
    pub fn get(&self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    /// `None` once a one-shot timer has fired.
    deadline: Option<Instant>,
    /// `Some` for repeating timers.
    period: Option<Duration>,
}

/// Timer slots with round-robin allocation.
///
/// Allocation starts after the most recently allocated slot so that a just-cleared id
/// isn't handed out again right away.
#[derive(Debug, Clone)]
pub struct TimerTable {
    slots: Vec<Option<Slot>>,
    last: usize,
}

impl Default for TimerTable {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            slots: vec![None; MAX_TIMERS],
            last: 0,
        }
    }

    fn allocate(&mut self, slot: Slot) -> Result<TimerId> {
        for i in 1..MAX_TIMERS {
            let n = (self.last + i) % MAX_TIMERS;
            if n != 0 && self.slots[n].is_none() {
                self.slots[n] = Some(slot);
                self.last = n;
                return Ok(TimerId(n as u32));
            }
        }
        Err(Error::TimerLimit)
    }

    /// Start a one-shot timer firing `delay` after `now`.
    pub fn set_timeout(&mut self, delay: Duration, now: Instant) -> Result<TimerId> {
        let id = self.allocate(Slot {
            deadline: Some(now + delay),
            period: None,
        })?;
        log::debug!("timeout {} set for {:?}", id.0, delay);
        Ok(id)
    }

    /// Start a repeating timer firing every `period` after `now`.
    pub fn set_interval(&mut self, period: Duration, now: Instant) -> Result<TimerId> {
        let period = period.max(MIN_PERIOD);
        let id = self.allocate(Slot {
            deadline: Some(now + period),
            period: Some(period),
        })?;
        log::debug!("interval {} set for {:?}", id.0, period);
        Ok(id)
    }

    /// Remove a timer. Returns `false` if `id` doesn't name an allocated timer.
    pub fn clear(&mut self, id: TimerId) -> bool {
        if id.0 == 0 {
            return false;
        }
        match self.slots.get_mut(id.0 as usize) {
            Some(slot) if slot.is_some() => {
                *slot = None;
                log::debug!("timer {} cleared", id.0);
                true
            }
            _ => false,
        }
    }

    /// Whether `id` names an allocated timer (including a fired one-shot timer whose
    /// event hasn't been retired yet).
    pub fn is_allocated(&self, id: TimerId) -> bool {
        id.0 != 0 && matches!(self.slots.get(id.0 as usize), Some(Some(_)))
    }

    /// Whether `id` names a repeating timer.
    pub fn is_interval(&self, id: TimerId) -> bool {
        matches!(
            self.slots.get(id.0 as usize),
            Some(Some(Slot { period: Some(_), .. }))
        )
    }

    /// Number of allocated timers.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Whether no timer is allocated.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.slots.iter().flatten().filter_map(|s| s.deadline).min()
    }

    /// Collect the timers due at `now`, earliest first.
    ///
    /// One-shot timers stay allocated until cleared. Repeating timers are rescheduled; a
    /// timer that has fallen more than one period behind fires once and restarts from `now`.
    pub fn expire(&mut self, now: Instant) -> Vec<TimerId> {
        let mut due: Vec<(Instant, TimerId)> = Vec::new();

        for (index, slot) in self.slots.iter_mut().enumerate() {
            let Some(slot) = slot else { continue };
            let Some(deadline) = slot.deadline else { continue };
            if deadline > now {
                continue;
            }

            due.push((deadline, TimerId(index as u32)));
            slot.deadline = slot.period.map(|period| {
                let next = deadline + period;
                if next <= now {
                    now + period
                } else {
                    next
                }
            });
        }

        due.sort();
        due.into_iter().map(|(_, id)| id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_start_at_one_and_round_robin() {
        let now = Instant::now();
        let mut table = TimerTable::new();

        let a = table.set_timeout(Duration::from_millis(10), now).unwrap();
        let b = table.set_timeout(Duration::from_millis(10), now).unwrap();
        assert_eq!(a, TimerId(1));
        assert_eq!(b, TimerId(2));

        // a cleared id isn't reused by the next allocation
        assert!(table.clear(a));
        let c = table.set_interval(Duration::from_millis(10), now).unwrap();
        assert_eq!(c, TimerId(3));
    }

    #[test]
    fn test_limit() {
        let now = Instant::now();
        let mut table = TimerTable::new();
        for _ in 1..MAX_TIMERS {
            table.set_timeout(Duration::from_secs(1), now).unwrap();
        }
        assert_eq!(table.len(), MAX_TIMERS - 1);
        let err = table.set_timeout(Duration::from_secs(1), now).unwrap_err();
        assert_eq!(err.to_string(), "maximum number of timers exceeded");

        // freeing one slot makes room again, and the allocation wraps around
        assert!(table.clear(TimerId(5)));
        assert_eq!(table.set_timeout(Duration::from_secs(1), now).unwrap(), TimerId(5));
    }

    #[test]
    fn test_clear_invalid() {
        let mut table = TimerTable::new();
        assert!(!table.clear(TimerId(0)));
        assert!(!table.clear(TimerId(7)));
        assert!(!table.clear(TimerId(MAX_TIMERS as u32)));
    }

    #[test]
    fn test_expire_one_shot_stays_allocated() {
        let now = Instant::now();
        let mut table = TimerTable::new();
        let id = table.set_timeout(Duration::from_millis(5), now).unwrap();

        assert!(table.expire(now).is_empty());
        assert_eq!(table.expire(now + Duration::from_millis(5)), vec![id]);
        assert!(table.is_allocated(id));
        assert_eq!(table.next_deadline(), None);
        assert!(table.expire(now + Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn test_expire_interval_reschedules() {
        let now = Instant::now();
        let mut table = TimerTable::new();
        let id = table.set_interval(Duration::from_millis(10), now).unwrap();
        assert!(table.is_interval(id));

        assert_eq!(table.expire(now + Duration::from_millis(10)), vec![id]);
        assert_eq!(table.next_deadline(), Some(now + Duration::from_millis(20)));

        // far behind: fires once, then restarts from the current time
        let late = now + Duration::from_millis(100);
        assert_eq!(table.expire(late), vec![id]);
        assert_eq!(table.next_deadline(), Some(late + Duration::from_millis(10)));
    }

    #[test]
    fn test_expire_orders_by_deadline() {
        let now = Instant::now();
        let mut table = TimerTable::new();
        let slow = table.set_timeout(Duration::from_millis(20), now).unwrap();
        let fast = table.set_timeout(Duration::from_millis(10), now).unwrap();
        assert_eq!(table.expire(now + Duration::from_millis(30)), vec![fast, slow]);
    }
}
