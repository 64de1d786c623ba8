use std::io;

use crate::client::HTTPClient;
use crate::models::CLIConfig;
use crate::render;

pub struct REPL {
    pub config: CLIConfig,
    pub client: HTTPClient,
}

impl REPL {
    pub fn new(config: CLIConfig, client: HTTPClient) -> Self {
        Self { config, client }
    }

    pub fn run(&mut self) {
        render::banner(&self.config);
        loop {
            render::prompt();
            let mut line = String::new();
            if io::stdin().read_line(&mut line).is_err() {
                break;
            }
            let line = line.trim().to_string();
            if line.is_empty() {
                continue;
            }
            if self.handle_command(&line) {
                break;
            }
        }
    }

    fn handle_command(&mut self, line: &str) -> bool {
        let mut parts = line.splitn(2, ' ');
        let cmd = parts.next().unwrap_or("").trim_start_matches('/');
        let rest = parts.next().unwrap_or("").trim();
        match cmd {
            "exit" | "quit" => return true,
            "help" => render::help(),
            "create" => {
                if rest.is_empty() {
                    render::error("usage: create <name>");
                } else {
                    match self.client.create_task(rest) {
                        Ok(task) => render::task(&task),
                        Err(err) => render::error(&err),
                    }
                }
            }
            "list" => match self.client.list_tasks() {
                Ok(tasks) => render::tasks(&tasks),
                Err(err) => render::error(&err),
            },
            "get" => {
                if rest.is_empty() {
                    render::error("usage: get <id>");
                } else {
                    match self.client.get_task(rest) {
                        Ok(task) => render::task(&task),
                        Err(err) => render::error(&err),
                    }
                }
            }
            "result" => {
                if rest.is_empty() {
                    render::error("usage: result <id>");
                } else {
                    match self.client.task_result(rest) {
                        Ok(task) => render::task(&task),
                        Err(err) => render::error(&err),
                    }
                }
            }
            "delete" => {
                if rest.is_empty() {
                    render::error("usage: delete <id>");
                } else {
                    match self.client.delete_task(rest) {
                        Ok(()) => render::info("task deleted"),
                        Err(err) => render::error(&err),
                    }
                }
            }
            "base" => {
                if rest.is_empty() {
                    render::info(&format!("base: {}", self.config.base_url));
                } else {
                    self.config.base_url = rest.to_string();
                    self.client = HTTPClient::new(&self.config.base_url);
                    render::info("base url updated");
                }
            }
            _ => render::info("unknown command, type help"),
        }
        false
    }
}
