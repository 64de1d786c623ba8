use reqwest::blocking::{Client, Response};

use crate::models::{CreateTaskRequest, TaskInfo};

pub struct HTTPClient {
    pub base_url: String,
    client: Client,
}

impl HTTPClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("reqwest client"),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    pub fn create_task(&self, name: &str) -> Result<TaskInfo, String> {
        let req = CreateTaskRequest {
            name: name.to_string(),
        };
        let resp = self
            .client
            .post(self.url("/tasks"))
            .json(&req)
            .send()
            .map_err(|err| err.to_string())?;
        parse_task(resp)
    }

    pub fn list_tasks(&self) -> Result<Vec<TaskInfo>, String> {
        let resp = self
            .client
            .get(self.url("/tasks"))
            .send()
            .map_err(|err| err.to_string())?;
        if !resp.status().is_success() {
            return Err(http_error(resp));
        }
        let value = resp
            .json::<serde_json::Value>()
            .map_err(|err| err.to_string())?;
        let tasks = value
            .get("tasks")
            .and_then(|v| v.as_array())
            .cloned()
            .unwrap_or_default();
        let mut out = Vec::new();
        for item in tasks {
            if let Ok(task) = serde_json::from_value::<TaskInfo>(item) {
                out.push(task);
            }
        }
        Ok(out)
    }

    pub fn get_task(&self, id: &str) -> Result<TaskInfo, String> {
        let resp = self
            .client
            .get(self.url(&format!("/tasks/{}", id)))
            .send()
            .map_err(|err| err.to_string())?;
        parse_task(resp)
    }

    pub fn task_result(&self, id: &str) -> Result<TaskInfo, String> {
        let resp = self
            .client
            .get(self.url(&format!("/tasks/{}/result", id)))
            .send()
            .map_err(|err| err.to_string())?;
        parse_task(resp)
    }

    pub fn delete_task(&self, id: &str) -> Result<(), String> {
        let resp = self
            .client
            .delete(self.url(&format!("/tasks/{}", id)))
            .send()
            .map_err(|err| err.to_string())?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(http_error(resp))
        }
    }
}

fn parse_task(resp: Response) -> Result<TaskInfo, String> {
    if resp.status().is_success() {
        resp.json::<TaskInfo>().map_err(|err| err.to_string())
    } else {
        Err(http_error(resp))
    }
}

fn http_error(resp: Response) -> String {
    let status = resp.status();
    let body = resp.text().unwrap_or_default();
    format!("http {}: {}", status.as_u16(), body)
}
