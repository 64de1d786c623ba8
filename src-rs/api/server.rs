use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tracing::info;

use crate::api::handlers::{
    handle_create_task, handle_delete_task, handle_get_task, handle_health, handle_list_tasks,
    handle_task_result,
};
use crate::config::RunnerConfig;
use crate::task::{TaskRunner, TaskStore};

pub struct TaskServer {
    pub port: u16,
    pub runner: Arc<TaskRunner>,
}

impl TaskServer {
    pub fn new(port: u16, runner: Option<Arc<TaskRunner>>) -> Self {
        let runner = runner.unwrap_or_else(|| {
            Arc::new(TaskRunner::new(
                Arc::new(TaskStore::new()),
                RunnerConfig::default(),
            ))
        });
        Self { port, runner }
    }

    pub async fn start(&self) -> Result<(), String> {
        let app = Router::new()
            .route("/health", get(handle_health))
            .route("/tasks", get(handle_list_tasks).post(handle_create_task))
            .route(
                "/tasks/:id",
                get(handle_get_task).delete(handle_delete_task),
            )
            .route("/tasks/:id/result", get(handle_task_result))
            .with_state(self.runner.clone());

        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        info!(%addr, "workmate listening");

        let runner = self.runner.clone();
        axum::Server::bind(&addr)
            .serve(app.into_make_service())
            .with_graceful_shutdown(async move {
                let _ = tokio::signal::ctrl_c().await;
                info!("shutdown signal received, cancelling running tasks");
                runner.shutdown();
            })
            .await
            .map_err(|err| err.to_string())
    }
}
