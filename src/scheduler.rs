//! Delayed tasks with explicit cancellation handles.
//!
//! Stands in for `setTimeout`: callers schedule a payload at `now + delay`
//! and get a [`TaskHandle`] back. The owner advances the queue from the draw
//! loop with [`Scheduler::take_due`] and must cancel outstanding handles when
//! it is torn down.

/// Identifies one scheduled task. Cancelling a fired or unknown handle is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

struct Task<T> {
    id: u64,
    due_ms: f64,
    payload: T,
}

pub struct Scheduler<T> {
    tasks: Vec<Task<T>>,
    next_id: u64,
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 0,
        }
    }

    /// Schedule `payload` to become due `delay_ms` after `now_ms`.
    pub fn schedule(&mut self, now_ms: f64, delay_ms: f64, payload: T) -> TaskHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.tasks.push(Task {
            id,
            due_ms: now_ms + delay_ms.max(0.0),
            payload,
        });
        TaskHandle(id)
    }

    /// Cancel a pending task. Returns true if it was still pending.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != handle.0);
        self.tasks.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.tasks.clear();
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.tasks.iter().any(|t| t.id == handle.0)
    }

    /// Number of tasks not yet fired or cancelled.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Remove and return every task due at `now_ms`, earliest deadline first.
    /// Tasks with equal deadlines come out in scheduling order.
    pub fn take_due(&mut self, now_ms: f64) -> Vec<T> {
        let mut due: Vec<Task<T>> = Vec::new();
        let mut i = 0;
        while i < self.tasks.len() {
            if self.tasks[i].due_ms <= now_ms {
                due.push(self.tasks.swap_remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms).then(a.id.cmp(&b.id)));
        due.into_iter().map(|t| t.payload).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_due_before_deadline() {
        let mut s = Scheduler::new();
        s.schedule(0.0, 1500.0, 'a');
        assert!(s.take_due(1499.9).is_empty());
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn fires_at_deadline_once() {
        let mut s = Scheduler::new();
        s.schedule(0.0, 1500.0, 'a');
        assert_eq!(s.take_due(1500.0), vec!['a']);
        assert!(s.take_due(5000.0).is_empty());
    }

    #[test]
    fn due_tasks_come_out_in_deadline_order() {
        let mut s = Scheduler::new();
        s.schedule(0.0, 300.0, 'c');
        s.schedule(0.0, 100.0, 'a');
        s.schedule(0.0, 200.0, 'b');
        s.schedule(0.0, 200.0, 'd');
        assert_eq!(s.take_due(1000.0), vec!['a', 'b', 'd', 'c']);
    }

    #[test]
    fn cancelled_task_never_fires() {
        let mut s = Scheduler::new();
        let h = s.schedule(0.0, 100.0, 'a');
        s.schedule(0.0, 100.0, 'b');
        assert!(s.is_pending(h));
        assert!(s.cancel(h));
        assert!(!s.is_pending(h));
        assert_eq!(s.take_due(200.0), vec!['b']);
    }

    #[test]
    fn cancel_after_fire_is_noop() {
        let mut s = Scheduler::new();
        let h = s.schedule(0.0, 10.0, 'a');
        s.take_due(10.0);
        assert!(!s.cancel(h));
    }

    #[test]
    fn cancel_all_clears_queue() {
        let mut s = Scheduler::new();
        s.schedule(0.0, 10.0, 1);
        s.schedule(0.0, 20.0, 2);
        s.cancel_all();
        assert_eq!(s.len(), 0);
        assert!(s.take_due(100.0).is_empty());
    }

    #[test]
    fn negative_delay_is_due_immediately() {
        let mut s = Scheduler::new();
        s.schedule(50.0, -10.0, 'a');
        assert_eq!(s.take_due(50.0), vec!['a']);
    }
}
