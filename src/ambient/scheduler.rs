//! Independently cancellable timers driven by a host-supplied clock.
//!
//! The host calls `tick(now_ms)` from a `requestAnimationFrame` or interval
//! loop. A repeating task that missed several periods (tab in background,
//! slow frame) fires once and is rescheduled on its original cadence.

use serde::Serialize;

/// Handle for cancelling a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TaskId(pub u32);

/// The cosmetic loops the dashboard runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "task", rename_all = "snake_case")]
pub enum AmbientTask {
    QuoteRotation,
    WeatherRotation,
    FeaturedRotation,
    NuclearGlow,
    NuclearGlowFade,
    WindowFlicker { building: usize, window: usize },
    CloudSpawn,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Cadence {
    Repeat(f64),
    Once,
}

#[derive(Debug, Clone)]
struct Scheduled {
    id: TaskId,
    task: AmbientTask,
    cadence: Cadence,
    due_at: f64,
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    tasks: Vec<Scheduled>,
    next_id: u32,
    paused_at: Option<f64>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, task: AmbientTask, cadence: Cadence, due_at: f64) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push(Scheduled { id, task, cadence, due_at });
        id
    }

    /// Run `task` every `interval_ms`, first firing one interval after `now`.
    pub fn every(&mut self, task: AmbientTask, interval_ms: f64, now: f64) -> TaskId {
        let interval = interval_ms.max(1.0);
        self.push(task, Cadence::Repeat(interval), now + interval)
    }

    /// Run `task` once, `delay_ms` after `now`.
    pub fn once(&mut self, task: AmbientTask, delay_ms: f64, now: f64) -> TaskId {
        self.push(task, Cadence::Once, now + delay_ms.max(0.0))
    }

    /// Cancel a task. Returns false if it already finished or never existed.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    /// Cancel every task.
    pub fn clear(&mut self) {
        self.tasks.clear();
        self.paused_at = None;
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|t| t.id == id)
    }

    /// Pending tasks in schedule order.
    pub fn tasks(&self) -> impl Iterator<Item = (TaskId, AmbientTask)> + '_ {
        self.tasks.iter().map(|t| (t.id, t.task))
    }

    /// Stop firing until `resume`. Idempotent.
    pub fn pause(&mut self, now: f64) {
        if self.paused_at.is_none() {
            self.paused_at = Some(now);
        }
    }

    /// Shift every deadline by the time spent paused.
    pub fn resume(&mut self, now: f64) {
        if let Some(paused_at) = self.paused_at.take() {
            let shift = (now - paused_at).max(0.0);
            for t in &mut self.tasks {
                t.due_at += shift;
            }
        }
    }

    /// Collect tasks due at `now`, in schedule order. One-shot tasks are
    /// dropped after firing; repeating tasks advance past `now`.
    pub fn tick(&mut self, now: f64) -> Vec<(TaskId, AmbientTask)> {
        if self.is_paused() {
            return Vec::new();
        }
        let mut fired = Vec::new();
        for t in &mut self.tasks {
            if t.due_at > now {
                continue;
            }
            fired.push((t.id, t.task));
            if let Cadence::Repeat(interval) = t.cadence {
                let missed = ((now - t.due_at) / interval).floor() + 1.0;
                t.due_at += missed * interval;
            }
        }
        self.tasks
            .retain(|t| !(t.cadence == Cadence::Once && t.due_at <= now));
        fired
    }
}
