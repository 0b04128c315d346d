//! Cancellable repeating tasks.
//!
//! The render loop and the level ticker are both registered through a
//! [`TaskHost`]. Spawning hands back an owned handle and cancelling consumes
//! it, so a task cannot be stopped twice or forgotten without the compiler
//! noticing an unused value.

use crate::constants::FRAME_INTERVAL_MS;
use std::cell::{Cell, RefCell};
use std::time::Duration;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cadence {
    /// Fixed-period timer.
    Interval(Duration),
    /// Once per display refresh.
    AnimationFrame,
}

impl Cadence {
    pub fn kind(&self) -> TaskKind {
        match self {
            Cadence::Interval(_) => TaskKind::Interval,
            Cadence::AnimationFrame => TaskKind::AnimationFrame,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskKind {
    Interval,
    AnimationFrame,
}

/// Callback receiving the host timestamp in milliseconds.
pub type RepeatingTask = Box<dyn FnMut(f64)>;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("no scheduling environment available")]
    Unavailable,
    #[error("scheduling {kind:?} failed: {detail}")]
    Schedule { kind: TaskKind, detail: String },
}

pub trait TaskHost {
    type Handle;

    fn spawn_repeating(&self, cadence: Cadence, task: RepeatingTask) -> Result<Self::Handle, HostError>;

    /// Stop a task. No callback for it runs after this returns.
    fn cancel(&self, handle: Self::Handle);
}

// ---------------- Deterministic host for tests and headless runs ----------------

/// Handle issued by [`ManualHost`].
#[derive(Debug, PartialEq, Eq)]
pub struct ManualTask {
    id: u64,
}

struct Slot {
    id: u64,
    kind: TaskKind,
    period_ms: f64,
    next_due_ms: f64,
    task: Option<RepeatingTask>,
}

/// Single-threaded host driven by an explicit clock.
pub struct ManualHost {
    now_ms: Cell<f64>,
    frame_interval_ms: f64,
    next_id: Cell<u64>,
    slots: RefCell<Vec<Slot>>,
    fired: Cell<u64>,
}

impl Default for ManualHost {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualHost {
    pub fn new() -> Self {
        Self::with_frame_interval(FRAME_INTERVAL_MS)
    }

    pub fn with_frame_interval(frame_interval_ms: f64) -> Self {
        Self {
            now_ms: Cell::new(0.0),
            frame_interval_ms,
            next_id: Cell::new(1),
            slots: RefCell::new(Vec::new()),
            fired: Cell::new(0),
        }
    }

    #[inline]
    pub fn now_ms(&self) -> f64 {
        self.now_ms.get()
    }

    /// Total callbacks run so far.
    #[inline]
    pub fn fired(&self) -> u64 {
        self.fired.get()
    }

    pub fn live_tasks(&self) -> usize {
        self.slots.borrow().len()
    }

    /// Move the clock forward, running every callback that falls due in
    /// timestamp order.
    pub fn advance(&self, ms: f64) {
        let target = self.now_ms.get() + ms.max(0.0);
        loop {
            let due = {
                let slots = self.slots.borrow();
                slots
                    .iter()
                    .filter(|s| s.next_due_ms <= target)
                    .min_by(|a, b| a.next_due_ms.total_cmp(&b.next_due_ms))
                    .map(|s| (s.id, s.next_due_ms))
            };
            let Some((id, at)) = due else { break };
            self.now_ms.set(at);
            self.run(id);
        }
        self.now_ms.set(target);
    }

    /// Run every live task of `kind` once at the current clock.
    pub fn fire(&self, kind: TaskKind) -> usize {
        let ids: Vec<u64> = self
            .slots
            .borrow()
            .iter()
            .filter(|s| s.kind == kind)
            .map(|s| s.id)
            .collect();
        ids.into_iter().filter(|id| self.run(*id)).count()
    }

    /// Advance by one frame interval and fire animation-frame tasks.
    pub fn step_frame(&self) -> usize {
        self.now_ms.set(self.now_ms.get() + self.frame_interval_ms);
        self.fire(TaskKind::AnimationFrame)
    }

    fn run(&self, id: u64) -> bool {
        // Take the callback out so it may run without holding the borrow.
        let taken = {
            let mut slots = self.slots.borrow_mut();
            slots.iter_mut().find(|s| s.id == id).and_then(|s| {
                s.next_due_ms += s.period_ms;
                s.task.take()
            })
        };
        let Some(mut task) = taken else { return false };
        task(self.now_ms.get());
        self.fired.set(self.fired.get() + 1);
        if let Some(slot) = self.slots.borrow_mut().iter_mut().find(|s| s.id == id) {
            slot.task = Some(task);
        }
        true
    }
}

impl TaskHost for ManualHost {
    type Handle = ManualTask;

    fn spawn_repeating(&self, cadence: Cadence, task: RepeatingTask) -> Result<ManualTask, HostError> {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let period_ms = match cadence {
            Cadence::Interval(d) => (d.as_micros() as f64 / 1000.0).max(f64::EPSILON),
            Cadence::AnimationFrame => self.frame_interval_ms,
        };
        self.slots.borrow_mut().push(Slot {
            id,
            kind: cadence.kind(),
            period_ms,
            next_due_ms: self.now_ms.get() + period_ms,
            task: Some(task),
        });
        Ok(ManualTask { id })
    }

    fn cancel(&self, handle: ManualTask) {
        self.slots.borrow_mut().retain(|s| s.id != handle.id);
    }
}
