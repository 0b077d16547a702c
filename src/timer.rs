//! Virtual-time scheduler for repeating page tasks.
//!
//! The page runs single-threaded: timer callbacks and event listeners never
//! overlap. [`Scheduler::advance`] moves the virtual clock forward and fires
//! every due callback in time order, one at a time, each against the same
//! `&mut Document`. Intervals are cancellable through their [`TimerHandle`].
//!
//! The clock saturates at `u64::MAX`. An interval whose next due time would
//! pass the end of the clock stays registered but never fires again.

use crate::dom::Document;
use std::fmt;
use std::rc::Rc;

/// Handle returned by [`Scheduler::set_interval`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

type TimerCallback = Rc<dyn Fn(&mut Document)>;

struct Interval {
    handle: TimerHandle,
    period_ms: u64,
    /// `None` once the next firing would overflow the clock.
    next_due_ms: Option<u64>,
    callback: TimerCallback,
}

#[derive(Default)]
pub struct Scheduler {
    now_ms: u64,
    next_handle: u64,
    intervals: Vec<Interval>,
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("now_ms", &self.now_ms)
            .field("active", &self.intervals.len())
            .finish()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds of virtual time elapsed since creation.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Schedule `callback` every `period_ms`, first firing one period from now.
    ///
    /// A zero period is raised to 1 ms so `advance` always terminates.
    pub fn set_interval<F>(&mut self, period_ms: u64, callback: F) -> TimerHandle
    where
        F: Fn(&mut Document) + 'static,
    {
        let period_ms = period_ms.max(1);
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.intervals.push(Interval {
            handle,
            period_ms,
            next_due_ms: self.now_ms.checked_add(period_ms),
            callback: Rc::new(callback),
        });
        handle
    }

    /// Cancel an interval. Returns `false` if it was not active.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.intervals.len();
        self.intervals.retain(|i| i.handle != handle);
        self.intervals.len() != before
    }

    pub fn is_active(&self, handle: TimerHandle) -> bool {
        self.intervals.iter().any(|i| i.handle == handle)
    }

    pub fn active_count(&self) -> usize {
        self.intervals.len()
    }

    /// Advance the clock by `elapsed_ms`, firing due callbacks in order.
    ///
    /// Callbacks due at the same instant fire in registration order.
    /// Every due period runs its callback, so the work done is linear in the
    /// number of firings. Returns the number of callbacks fired.
    pub fn advance(&mut self, doc: &mut Document, elapsed_ms: u64) -> usize {
        let target = self.now_ms.saturating_add(elapsed_ms);
        let mut fired = 0;

        while let Some((index, due_ms)) = self.next_due(target) {
            let interval = &mut self.intervals[index];
            self.now_ms = due_ms;
            interval.next_due_ms = due_ms.checked_add(interval.period_ms);
            let callback = Rc::clone(&interval.callback);
            callback(doc);
            fired += 1;
        }

        self.now_ms = target;
        fired
    }

    fn next_due(&self, target: u64) -> Option<(usize, u64)> {
        self.intervals
            .iter()
            .enumerate()
            .filter_map(|(index, i)| {
                let due_ms = i.next_due_ms.filter(|due| *due <= target)?;
                Some((index, due_ms, i.handle.0))
            })
            .min_by_key(|(_, due_ms, handle)| (*due_ms, *handle))
            .map(|(index, due_ms, _)| (index, due_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, Document) {
        (Rc::new(RefCell::new(Vec::new())), Document::new())
    }

    #[test]
    fn interval_fires_once_per_period() {
        let (log, mut doc) = recorder();
        let mut scheduler = Scheduler::new();
        let seen = Rc::clone(&log);
        scheduler.set_interval(5000, move |_| seen.borrow_mut().push("tick"));

        assert_eq!(scheduler.advance(&mut doc, 4999), 0);
        assert_eq!(scheduler.advance(&mut doc, 1), 1);
        assert_eq!(scheduler.advance(&mut doc, 15000), 3);
        assert_eq!(log.borrow().len(), 4);
        assert_eq!(scheduler.now_ms(), 20000);
    }

    #[test]
    fn cancelled_interval_never_fires_again() {
        let (log, mut doc) = recorder();
        let mut scheduler = Scheduler::new();
        let seen = Rc::clone(&log);
        let handle = scheduler.set_interval(100, move |_| seen.borrow_mut().push("tick"));

        scheduler.advance(&mut doc, 100);
        assert!(scheduler.cancel(handle));
        assert!(!scheduler.is_active(handle));
        assert!(!scheduler.cancel(handle));
        scheduler.advance(&mut doc, 1000);
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn callbacks_fire_in_time_order() {
        let (log, mut doc) = recorder();
        let mut scheduler = Scheduler::new();
        let slow = Rc::clone(&log);
        scheduler.set_interval(300, move |_| slow.borrow_mut().push("slow"));
        let fast = Rc::clone(&log);
        scheduler.set_interval(200, move |_| fast.borrow_mut().push("fast"));

        scheduler.advance(&mut doc, 600);
        assert_eq!(*log.borrow(), vec!["fast", "slow", "fast", "slow", "fast"]);
    }

    #[test]
    fn callbacks_can_mutate_document() {
        let mut doc = Document::new();
        let mut scheduler = Scheduler::new();
        let target = doc.append_new(doc.body(), "div");
        scheduler.set_interval(10, move |doc| {
            doc.toggle_class(target, "on", None);
        });
        scheduler.advance(&mut doc, 10);
        assert!(doc.has_class(target, "on"));
        scheduler.advance(&mut doc, 10);
        assert!(!doc.has_class(target, "on"));
    }

    #[test]
    fn zero_period_is_raised() {
        let (log, mut doc) = recorder();
        let mut scheduler = Scheduler::new();
        let seen = Rc::clone(&log);
        scheduler.set_interval(0, move |_| seen.borrow_mut().push("tick"));
        assert_eq!(scheduler.advance(&mut doc, 3), 3);
    }

    #[test]
    fn clock_saturates_instead_of_overflowing() {
        let mut doc = Document::new();
        let mut scheduler = Scheduler::new();
        scheduler.advance(&mut doc, 1);
        assert_eq!(scheduler.advance(&mut doc, u64::MAX), 0);
        assert_eq!(scheduler.now_ms(), u64::MAX);
        assert_eq!(scheduler.advance(&mut doc, 10), 0);
        assert_eq!(scheduler.now_ms(), u64::MAX);
    }

    #[test]
    fn interval_past_end_of_clock_stops_firing() {
        let (log, mut doc) = recorder();
        let mut scheduler = Scheduler::new();
        let seen = Rc::clone(&log);
        let handle = scheduler.set_interval(u64::MAX / 2 + 1, move |_| {
            seen.borrow_mut().push("tick")
        });

        assert_eq!(scheduler.advance(&mut doc, u64::MAX), 1);
        assert_eq!(scheduler.now_ms(), u64::MAX);
        assert!(scheduler.is_active(handle));
        assert_eq!(scheduler.advance(&mut doc, u64::MAX), 0);
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn interval_registered_at_end_of_clock_never_fires() {
        let (log, mut doc) = recorder();
        let mut scheduler = Scheduler::new();
        scheduler.advance(&mut doc, u64::MAX);
        let seen = Rc::clone(&log);
        scheduler.set_interval(5000, move |_| seen.borrow_mut().push("tick"));
        assert_eq!(scheduler.advance(&mut doc, 5000), 0);
        assert!(log.borrow().is_empty());
    }
}
