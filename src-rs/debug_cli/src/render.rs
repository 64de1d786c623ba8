use std::io::{self, Write};

use crate::models::{CLIConfig, TaskInfo};

pub fn banner(cfg: &CLIConfig) {
    println!("WorkMate Debug CLI");
    println!("API: {}", cfg.base_url);
    println!("Type help for commands.");
}

pub fn prompt() {
    print!("> ");
    let _ = io::stdout().flush();
}

pub fn help() {
    println!("Commands:");
    println!("  help               Show commands");
    println!("  exit | quit        Exit");
    println!("  create <name>      Create a task and start it");
    println!("  list               List all tasks");
    println!("  get <id>           Show one task");
    println!("  result <id>        Show a finished task's result");
    println!("  delete <id>        Delete a task");
    println!("  base [url]         Show or set the API base url");
}

pub fn info(message: &str) {
    println!("{}", message);
}

pub fn error(message: &str) {
    eprintln!("error: {}", message);
}

pub fn task(task: &TaskInfo) {
    println!("{}  {}  {}", task.id, task.status, task.name);
    println!("  created:  {}", task.created_at);
    if let Some(started) = &task.started_at {
        println!("  started:  {}", started);
    }
    if let Some(finished) = &task.finished_at {
        println!("  finished: {}", finished);
    }
    if let Some(duration) = &task.duration {
        println!("  duration: {}", duration);
    }
    if let Some(result) = &task.result {
        println!("  result:   {}", result);
    }
    if let Some(err) = &task.error {
        println!("  error:    {}", err);
    }
}

pub fn tasks(tasks: &[TaskInfo]) {
    if tasks.is_empty() {
        println!("no tasks");
        return;
    }
    for task in tasks {
        println!(
            "{}  {:9}  {}  {}",
            task.id,
            task.status,
            task.duration.clone().unwrap_or_default(),
            task.name
        );
    }
}
