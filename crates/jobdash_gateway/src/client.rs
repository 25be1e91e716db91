use std::time::Duration;

use dash_logging::dash_debug;
use jobdash_core::{Job, Task, TaskStatusSnapshot, TrackAddItem, TrackPatch, TrackedJob};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::types::{
    ExportFormat, JobWire, ReceiptWire, TaskStatusWire, TaskWire, TrackAddRequest, TrackIdRequest,
    TrackUpdateRequest, TrackedJobWire, UrlsRequest,
};
use crate::GatewayError;

#[derive(Debug, Clone)]
pub struct GatewaySettings {
    /// Root of the backend API, e.g. `http://127.0.0.1:8000/api`.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/api".to_owned(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// The backend API surface, one method per route. Everything the client
/// does to remote state goes through this seam, which also makes the bulk
/// executor and the effect runner testable against a scripted double.
#[async_trait::async_trait]
pub trait Gateway: Send + Sync {
    async fn task_status(&self) -> Result<TaskStatusSnapshot, GatewayError>;
    async fn failed_tasks(&self) -> Result<Vec<Task>, GatewayError>;
    /// Returns the backend's receipt message.
    async fn submit_tasks(&self, urls: &[String]) -> Result<String, GatewayError>;
    async fn retry_tasks(&self, urls: &[String]) -> Result<(), GatewayError>;
    async fn jobs(&self) -> Result<Vec<Job>, GatewayError>;
    /// Batch-capable: one call, all-or-nothing.
    async fn delete_jobs(&self, urls: &[String]) -> Result<(), GatewayError>;
    async fn tracked_jobs(&self) -> Result<Vec<TrackedJob>, GatewayError>;
    async fn add_track(&self, item: &TrackAddItem) -> Result<(), GatewayError>;
    async fn update_track(&self, job_id: &str, patch: &TrackPatch) -> Result<(), GatewayError>;
    async fn delete_track(&self, job_id: &str) -> Result<(), GatewayError>;
    async fn undo_track_delete(&self, job_id: &str) -> Result<(), GatewayError>;
    /// Download link for the export endpoint; fire-and-forget, never fetched
    /// by the client itself.
    fn export_url(&self, format: ExportFormat) -> String;
}

/// Production gateway over reqwest.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(settings: GatewaySettings) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| GatewayError::Network(err.to_string()))?;
        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_owned(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(GatewayError::from_reqwest)?;
        Self::check_status(&response)?;
        response
            .json::<T>()
            .await
            .map_err(|err| GatewayError::InvalidBody(err.to_string()))
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, GatewayError> {
        dash_debug!("{} {}", method, path);
        let response = self
            .client
            .request(method, self.url(path))
            .json(body)
            .send()
            .await
            .map_err(GatewayError::from_reqwest)?;
        Self::check_status(&response)?;
        Ok(response)
    }

    fn check_status(response: &reqwest::Response) -> Result<(), GatewayError> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(GatewayError::Http(status.as_u16()))
        }
    }
}

#[async_trait::async_trait]
impl Gateway for HttpGateway {
    async fn task_status(&self) -> Result<TaskStatusSnapshot, GatewayError> {
        let wire: TaskStatusWire = self.get_json("tasks/status").await?;
        Ok(wire.into_domain())
    }

    async fn failed_tasks(&self) -> Result<Vec<Task>, GatewayError> {
        let wire: Vec<TaskWire> = self.get_json("tasks/failed").await?;
        Ok(wire.into_iter().filter_map(TaskWire::into_domain).collect())
    }

    async fn submit_tasks(&self, urls: &[String]) -> Result<String, GatewayError> {
        let response = self
            .send_json(reqwest::Method::POST, "tasks/submit", &UrlsRequest { urls })
            .await?;
        let receipt: ReceiptWire = response
            .json()
            .await
            .map_err(|err| GatewayError::InvalidBody(err.to_string()))?;
        Ok(receipt.message)
    }

    async fn retry_tasks(&self, urls: &[String]) -> Result<(), GatewayError> {
        self.send_json(reqwest::Method::POST, "tasks/retry", &UrlsRequest { urls })
            .await?;
        Ok(())
    }

    async fn jobs(&self) -> Result<Vec<Job>, GatewayError> {
        let wire: Vec<JobWire> = self.get_json("jobs").await?;
        Ok(wire.into_iter().map(JobWire::into_domain).collect())
    }

    async fn delete_jobs(&self, urls: &[String]) -> Result<(), GatewayError> {
        self.send_json(reqwest::Method::POST, "jobs/delete", &UrlsRequest { urls })
            .await?;
        Ok(())
    }

    async fn tracked_jobs(&self) -> Result<Vec<TrackedJob>, GatewayError> {
        let wire: Vec<TrackedJobWire> = self.get_json("track/list").await?;
        Ok(wire
            .into_iter()
            .filter_map(TrackedJobWire::into_domain)
            .collect())
    }

    async fn add_track(&self, item: &TrackAddItem) -> Result<(), GatewayError> {
        self.send_json(
            reqwest::Method::POST,
            "track/add",
            &TrackAddRequest {
                job_url: &item.job_url,
                job_title: &item.job_title,
                company_name: &item.company_name,
            },
        )
        .await?;
        Ok(())
    }

    async fn update_track(&self, job_id: &str, patch: &TrackPatch) -> Result<(), GatewayError> {
        self.send_json(
            reqwest::Method::PUT,
            "track/update",
            &TrackUpdateRequest::new(job_id, patch),
        )
        .await?;
        Ok(())
    }

    async fn delete_track(&self, job_id: &str) -> Result<(), GatewayError> {
        self.send_json(
            reqwest::Method::DELETE,
            "track/delete",
            &TrackIdRequest { job_id },
        )
        .await?;
        Ok(())
    }

    async fn undo_track_delete(&self, job_id: &str) -> Result<(), GatewayError> {
        self.send_json(
            reqwest::Method::POST,
            "track/undo",
            &TrackIdRequest { job_id },
        )
        .await?;
        Ok(())
    }

    fn export_url(&self, format: ExportFormat) -> String {
        format!("{}?format={}", self.url("export"), format.as_str())
    }
}
