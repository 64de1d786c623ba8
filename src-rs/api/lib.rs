pub use crate::config::RunnerConfig;
pub use crate::error::TaskError;
pub use crate::task::{RandomWork, Task, TaskRunner, TaskStatus, TaskStore, WorkDuration};

pub mod handlers;
pub mod server;
