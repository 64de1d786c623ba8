use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rand::Rng;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::RunnerConfig;
use crate::error::TaskError;
use crate::helpers::{elapsed_seconds, format_duration};

use super::store::TaskStore;
use super::types::{Task, TaskStatus};

/// Source of simulated work durations, one draw per execution unit.
///
/// Injected so tests can force short deterministic work instead of waiting
/// on the production range.
pub trait WorkDuration: Send + Sync {
    fn next(&self) -> Duration;
}

/// Uniform draw from an inclusive range of seconds, modeling unpredictable
/// I/O latency.
pub struct RandomWork {
    min_secs: u64,
    max_secs: u64,
}

impl RandomWork {
    pub fn new(min_secs: u64, max_secs: u64) -> Self {
        Self {
            min_secs,
            max_secs: max_secs.max(min_secs),
        }
    }
}

impl WorkDuration for RandomWork {
    fn next(&self) -> Duration {
        let secs = rand::thread_rng().gen_range(self.min_secs..=self.max_secs);
        Duration::from_secs(secs)
    }
}

/// Creates tasks, launches one detached execution unit per task, and reports
/// task state with freshened elapsed-time accounting.
///
/// The store is the single source of truth; the runner re-reads every
/// observation and writes every mutation back through it.
pub struct TaskRunner {
    store: Arc<TaskStore>,
    work: Arc<dyn WorkDuration>,
    shutdown: CancellationToken,
}

impl TaskRunner {
    pub fn new(store: Arc<TaskStore>, mut config: RunnerConfig) -> Self {
        if config.max_work_secs == 0 {
            let defaults = RunnerConfig::default();
            config.min_work_secs = defaults.min_work_secs;
            config.max_work_secs = defaults.max_work_secs;
        }
        Self::with_work_source(
            store,
            Arc::new(RandomWork::new(config.min_work_secs, config.max_work_secs)),
        )
    }

    pub fn with_work_source(store: Arc<TaskStore>, work: Arc<dyn WorkDuration>) -> Self {
        Self {
            store,
            work,
            shutdown: CancellationToken::new(),
        }
    }

    /// Creates a pending task and launches its execution unit.
    ///
    /// The unit's cancellation scope is a child of the runner's own root, not
    /// of the calling request, so it keeps running after this call returns.
    pub fn create_task(&self, name: &str) -> Result<Task, TaskError> {
        let task = self.store.insert(name)?;

        let store = self.store.clone();
        let work = self.work.clone();
        let cancel = self.shutdown.child_token();
        let task_id = task.id.clone();
        tokio::spawn(async move {
            run_task(store, work, cancel, task_id).await;
        });

        Ok(task)
    }

    pub fn get_task(&self, id: &str) -> Result<Task, TaskError> {
        let mut task = self.store.get(id)?;
        self.refresh_duration(&mut task);
        Ok(task)
    }

    pub fn list_tasks(&self) -> Vec<Task> {
        let mut tasks = self.store.list();
        for task in &mut tasks {
            self.refresh_duration(task);
        }
        tasks
    }

    /// Removes the record. The in-flight execution unit is left alone; its
    /// eventual terminal write-back will miss and be dropped.
    pub fn delete_task(&self, id: &str) -> Result<(), TaskError> {
        self.store.delete(id)
    }

    /// Returns the full record once execution has reached a terminal state.
    pub fn task_result(&self, id: &str) -> Result<Task, TaskError> {
        let task = self.store.get(id)?;
        if !task.is_terminal() {
            return Err(TaskError::NotReady);
        }
        Ok(task)
    }

    /// Cancels the root token; every in-flight execution unit observes it and
    /// records its task as failed.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    fn refresh_duration(&self, task: &mut Task) {
        if task.status != TaskStatus::Running {
            return;
        }
        let Some(started_at) = task.started_at else {
            return;
        };
        task.duration = Some(format_duration(elapsed_seconds(Utc::now() - started_at)));
        // Opportunistic write; a concurrent delete makes it miss and the
        // caller still gets the freshly computed value.
        if let Err(err) = self.store.update(task.clone()) {
            debug!(task_id = %task.id, %err, "duration refresh dropped");
        }
    }
}

/// The execution unit: stamps the running transition, races the simulated
/// work against cancellation, and writes the terminal state back.
async fn run_task(
    store: Arc<TaskStore>,
    work: Arc<dyn WorkDuration>,
    cancel: CancellationToken,
    task_id: String,
) {
    let Ok(mut task) = store.get(&task_id) else {
        return;
    };

    let started_at = Utc::now();
    task.started_at = Some(started_at);
    task.status = TaskStatus::Running;
    if store.update(task.clone()).is_err() {
        return;
    }

    let duration = work.next();
    debug!(task_id = %task_id, work_secs = duration.as_secs(), "task running");

    tokio::select! {
        _ = tokio::time::sleep(duration) => {
            let finished_at = Utc::now();
            task.finished_at = Some(finished_at);
            task.status = TaskStatus::Completed;
            task.result = Some(format!(
                "Task completed successfully after {}",
                format_duration(duration.as_secs())
            ));
            task.duration = Some(format_duration(elapsed_seconds(finished_at - started_at)));
            if let Err(err) = store.update(task) {
                debug!(task_id = %task_id, %err, "terminal write dropped");
            }
        }
        _ = cancel.cancelled() => {
            let finished_at = Utc::now();
            task.finished_at = Some(finished_at);
            task.status = TaskStatus::Failed;
            task.error = Some("Task was cancelled".to_string());
            task.duration = Some(format_duration(elapsed_seconds(finished_at - started_at)));
            if let Err(err) = store.update(task) {
                debug!(task_id = %task_id, %err, "terminal write dropped");
            }
        }
    }
}
