//! One-shot delayed tasks on the simulation clock
//!
//! A task may name the entity it acts on. Removing that entity early cancels
//! the task, so nothing fires against a dead entity.

use super::arena::EntityId;

/// Handle for a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(u64);

/// What a task does when it comes due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// Remove a bullet at the end of its lifetime
    ExpireBullet(EntityId),
    /// Spawn one replacement fuel pickup
    SpawnFuel,
    /// Begin the next mission
    StartMission,
    /// Take down the low-fuel warning
    DismissLowFuel,
}

impl TaskKind {
    /// Entity this task is bound to, if any
    pub fn target(&self) -> Option<EntityId> {
        match self {
            TaskKind::ExpireBullet(id) => Some(*id),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
struct Scheduled {
    id: TaskId,
    due_ms: f64,
    kind: TaskKind,
}

/// Pending one-shot tasks plus the clock they run on
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now_ms: f64,
    next_id: u64,
    tasks: Vec<Scheduled>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current clock (ms since the scene started)
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Schedule `kind` to run `delay_ms` from now
    pub fn schedule(&mut self, delay_ms: f64, kind: TaskKind) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push(Scheduled {
            id,
            due_ms: self.now_ms + delay_ms.max(0.0),
            kind,
        });
        id
    }

    /// Cancel one task. Returns false if it already ran or was cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    /// Cancel every task bound to `entity`
    pub fn cancel_for(&mut self, entity: EntityId) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.kind.target() != Some(entity));
        before - self.tasks.len()
    }

    pub fn is_pending(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|t| t.id == id)
    }

    /// Pending tasks bound to `entity`
    pub fn pending_for(&self, entity: EntityId) -> usize {
        self.tasks
            .iter()
            .filter(|t| t.kind.target() == Some(entity))
            .count()
    }

    /// Advance the clock and pop every task now due, earliest first
    /// (ties run in scheduling order).
    pub fn advance(&mut self, dt_ms: f64) -> Vec<TaskKind> {
        self.now_ms += dt_ms;
        let now = self.now_ms;

        let mut due: Vec<Scheduled> = Vec::new();
        self.tasks.retain(|t| {
            if t.due_ms <= now {
                due.push(t.clone());
                false
            } else {
                true
            }
        });
        due.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms).then(a.id.cmp(&b.id)));
        due.into_iter().map(|t| t.kind).collect()
    }
}
