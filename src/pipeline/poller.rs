//! Waits for a fine-tuning job to leave the running states.
//!
//! Each poll scans one page of job events. The completion message ends the
//! wait without another request; otherwise the job itself is fetched and its
//! status decides. Failure and cancellation end the wait with an error.

use crate::client::OpenAIClient;
use crate::pipeline::config::PipelineConfig;
use crate::pipeline::error::{PipelineError, PipelineResult};
use crate::services::fine_tuning::FineTuningJobStatus;
use std::collections::HashSet;
use std::time::Duration;
use tokio::time::sleep;

/// Event text the service emits once training has finished
pub const COMPLETION_MESSAGE: &str = "The job has successfully completed";

const DEFAULT_FAILURE_MESSAGE: &str = "fine-tuning job failed";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobState {
    Running,
    Succeeded,
    Failed { message: String },
    Cancelled,
}

impl From<&FineTuningJobStatus> for JobState {
    fn from(status: &FineTuningJobStatus) -> Self {
        if !status.is_terminal() {
            return JobState::Running;
        }
        match status {
            FineTuningJobStatus::Succeeded => JobState::Succeeded,
            FineTuningJobStatus::Failed => JobState::Failed {
                message: DEFAULT_FAILURE_MESSAGE.to_string(),
            },
            _ => JobState::Cancelled,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PollSettings {
    pub interval: Duration,
    pub page_size: u32,
    pub max_polls: Option<u32>,
    pub cancel_on_timeout: bool,
}

impl From<&PipelineConfig> for PollSettings {
    fn from(config: &PipelineConfig) -> Self {
        Self {
            interval: config.poll_interval,
            page_size: config.events_page_size,
            max_polls: config.max_polls,
            cancel_on_timeout: config.cancel_on_timeout,
        }
    }
}

pub struct JobPoller<'a> {
    client: &'a dyn OpenAIClient,
    settings: PollSettings,
    seen_events: HashSet<String>,
}

impl<'a> JobPoller<'a> {
    pub fn new(client: &'a dyn OpenAIClient, settings: PollSettings) -> Self {
        Self {
            client,
            settings,
            seen_events: HashSet::new(),
        }
    }

    /// One scan of the job's events, then its status if the events were inconclusive.
    pub async fn poll_once(&mut self, job_id: &str) -> PipelineResult<JobState> {
        let events = self
            .client
            .fine_tuning()
            .events(job_id, Some(self.settings.page_size), None)
            .await?;

        // Pages arrive newest first
        for event in events.data.iter().rev() {
            if self.seen_events.insert(event.id.clone()) {
                tracing::info!(job_id, level = %event.level, "{}", event.message);
            }
        }

        if events.data.iter().any(|e| e.message == COMPLETION_MESSAGE) {
            return Ok(JobState::Succeeded);
        }

        let job = self.client.fine_tuning().retrieve(job_id).await?;
        let state = match JobState::from(&job.status) {
            JobState::Failed { message } => JobState::Failed {
                message: job
                    .error
                    .map(|e| e.message)
                    .filter(|m| !m.is_empty())
                    .unwrap_or(message),
            },
            state => state,
        };
        Ok(state)
    }

    /// Polls until the job succeeds, then returns the fine-tuned model id.
    ///
    /// Without `max_polls` a job that never leaves the running states is
    /// polled forever.
    pub async fn wait_for_model(&mut self, job_id: &str) -> PipelineResult<String> {
        let mut polls = 0u32;

        loop {
            match self.poll_once(job_id).await? {
                JobState::Succeeded => break,
                JobState::Failed { message } => {
                    return Err(PipelineError::JobFailed {
                        job_id: job_id.to_string(),
                        message,
                    })
                }
                JobState::Cancelled => {
                    return Err(PipelineError::JobCancelled {
                        job_id: job_id.to_string(),
                    })
                }
                JobState::Running => {
                    polls += 1;
                    if let Some(max_polls) = self.settings.max_polls {
                        if polls >= max_polls {
                            return Err(self.give_up(job_id, polls).await);
                        }
                    }
                    tracing::debug!(job_id, polls, "Job still running");
                    sleep(self.settings.interval).await;
                }
            }
        }

        tracing::info!(job_id, "Training has completed successfully");

        let job = self.client.fine_tuning().retrieve(job_id).await?;
        job.fine_tuned_model
            .filter(|id| !id.is_empty())
            .ok_or_else(|| PipelineError::MissingModelId {
                job_id: job_id.to_string(),
            })
    }

    async fn give_up(&self, job_id: &str, polls: u32) -> PipelineError {
        if self.settings.cancel_on_timeout {
            match self.client.fine_tuning().cancel(job_id).await {
                Ok(job) => tracing::warn!(job_id, status = ?job.status, "Cancelled job after poll limit"),
                Err(err) => tracing::warn!(job_id, error = %err, "Failed to cancel job after poll limit"),
            }
        }
        PipelineError::PollLimitExceeded {
            job_id: job_id.to_string(),
            polls,
        }
    }
}
