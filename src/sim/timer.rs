//! Deterministic delayed-action queue
//!
//! Stands in for the host's timer facility: actions are scheduled relative to
//! the current simulation time and handed back by `pop_due` in due-time
//! order. Timers with the same due time fire in scheduling order.

/// Handle to a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone)]
struct Timer<A> {
    handle: TimerHandle,
    due: f64,
    /// Repeat interval (None = one-shot)
    interval: Option<f64>,
    /// Firings left, including the next one
    remaining: u32,
    action: A,
}

/// Queue of pending one-shot and repeating actions
#[derive(Debug, Clone)]
pub struct TimerQueue<A> {
    timers: Vec<Timer<A>>,
    next_handle: u64,
}

impl<A> Default for TimerQueue<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> TimerQueue<A> {
    pub fn new() -> Self {
        Self {
            timers: Vec::new(),
            next_handle: 1,
        }
    }

    fn allocate(&mut self) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        handle
    }

    /// Fire `action` once, `delay` seconds after `now`
    pub fn once(&mut self, now: f64, delay: f64, action: A) -> TimerHandle {
        let handle = self.allocate();
        self.timers.push(Timer {
            handle,
            due: now + delay,
            interval: None,
            remaining: 1,
            action,
        });
        handle
    }

    /// Fire `action` every `interval` seconds, `times` times in total
    pub fn repeat(&mut self, now: f64, interval: f64, times: u32, action: A) -> TimerHandle {
        let handle = self.allocate();
        if times > 0 {
            self.timers.push(Timer {
                handle,
                due: now + interval,
                interval: Some(interval),
                remaining: times,
                action,
            });
        }
        handle
    }

    /// Cancel a timer. Returns false if it already finished or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.handle != handle);
        let removed = self.timers.len() != before;
        if removed {
            log::debug!("Cancelled timer {:?}", handle);
        }
        removed
    }

    pub fn is_active(&self, handle: TimerHandle) -> bool {
        self.timers.iter().any(|t| t.handle == handle)
    }

    /// Next due time of an active timer
    pub fn due_at(&self, handle: TimerHandle) -> Option<f64> {
        self.timers.iter().find(|t| t.handle == handle).map(|t| t.due)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Pending timers as (handle, due time, action), in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (TimerHandle, f64, &A)> {
        self.timers.iter().map(|t| (t.handle, t.due, &t.action))
    }
}

impl<A: Clone> TimerQueue<A> {
    /// Take the earliest action due at or before `now`.
    ///
    /// Repeating timers are rescheduled one interval later; call in a loop
    /// to drain everything that is due.
    pub fn pop_due(&mut self, now: f64) -> Option<(TimerHandle, A)> {
        let idx = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= now)
            .min_by(|(_, a), (_, b)| {
                a.due
                    .partial_cmp(&b.due)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(a.handle.cmp(&b.handle))
            })
            .map(|(i, _)| i)?;

        let timer = &mut self.timers[idx];
        let fired = (timer.handle, timer.action.clone());
        timer.remaining -= 1;
        match (timer.interval, timer.remaining) {
            (Some(interval), remaining) if remaining > 0 => timer.due += interval,
            _ => {
                self.timers.remove(idx);
            }
        }
        Some(fired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(queue: &mut TimerQueue<&'static str>, now: f64) -> Vec<&'static str> {
        let mut fired = Vec::new();
        while let Some((_, action)) = queue.pop_due(now) {
            fired.push(action);
        }
        fired
    }

    #[test]
    fn test_once_fires_at_due_time() {
        let mut queue = TimerQueue::new();
        let handle = queue.once(10.0, 1.0, "destroy");
        assert_eq!(queue.due_at(handle), Some(11.0));

        assert!(drain(&mut queue, 10.5).is_empty());
        assert_eq!(drain(&mut queue, 11.0), vec!["destroy"]);
        assert!(queue.is_empty());
        assert!(!queue.is_active(handle));
    }

    #[test]
    fn test_due_order_then_schedule_order() {
        let mut queue = TimerQueue::new();
        queue.once(0.0, 2.0, "create");
        queue.once(0.0, 1.0, "destroy");
        queue.once(0.0, 2.0, "report");

        assert_eq!(drain(&mut queue, 5.0), vec!["destroy", "create", "report"]);
    }

    #[test]
    fn test_repeat_bounded() {
        let mut queue = TimerQueue::new();
        let handle = queue.repeat(0.0, 30.0, 3, "report");

        assert_eq!(drain(&mut queue, 30.0), vec!["report"]);
        assert_eq!(queue.due_at(handle), Some(60.0));
        assert_eq!(drain(&mut queue, 60.0), vec!["report"]);
        assert_eq!(drain(&mut queue, 90.0), vec!["report"]);
        assert!(drain(&mut queue, 1000.0).is_empty());
        assert!(!queue.is_active(handle));
    }

    #[test]
    fn test_repeat_zero_times_is_inert() {
        let mut queue: TimerQueue<&'static str> = TimerQueue::new();
        let handle = queue.repeat(0.0, 1.0, 0, "never");
        assert!(!queue.is_active(handle));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_cancel() {
        let mut queue = TimerQueue::new();
        let handle = queue.repeat(0.0, 1.0, 5, "report");
        queue.once(0.0, 1.0, "destroy");

        assert!(queue.cancel(handle));
        assert!(!queue.cancel(handle));
        assert_eq!(drain(&mut queue, 10.0), vec!["destroy"]);
    }
}
