//! CLI runner - executes commands

use crate::api::{CloudApi, JobApi, SelfHostedApi};
use crate::cli::commands::{Cli, Commands};
use crate::config::{AuthSection, TaskFile};
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::tasks::{CheckStatusTask, SyncTask};
use serde::Serialize;
use std::time::Duration;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let task_file = self.resolve_task_file()?;

        match &self.cli.command {
            Commands::Sync {
                connection_id,
                no_wait,
                allow_active_sync,
                poll_interval,
                max_wait,
            } => {
                let api = self.connect(&task_file, resolve_connection(connection_id, &task_file)?)?;
                let mut task = SyncTask::sync()
                    .wait(!no_wait && task_file.wait)
                    .fail_on_active_sync(!allow_active_sync && task_file.fail_on_active_sync);
                task = apply_poll_flags(task, &task_file, *poll_interval, *max_wait);
                let output = task.run(api.as_ref()).await?;
                print_output(&output)
            }
            Commands::Reset {
                connection_id,
                no_wait,
                poll_interval,
                max_wait,
            } => {
                let api = self.connect(&task_file, resolve_connection(connection_id, &task_file)?)?;
                let mut task = SyncTask::reset().wait(!no_wait && task_file.wait);
                task = apply_poll_flags(task, &task_file, *poll_interval, *max_wait);
                let output = task.run(api.as_ref()).await?;
                print_output(&output)
            }
            Commands::Status {
                job_id,
                poll_interval,
                max_wait,
            } => {
                let job_id = job_id
                    .or(task_file.job_id)
                    .ok_or_else(|| Error::missing_field("job_id"))?;
                // Status polls an existing job; no connection id needed
                let api =
                    self.connect(&task_file, task_file.connection_id.clone().unwrap_or_default())?;

                let poll = task_file.poll_config();
                let task = CheckStatusTask::new(job_id)
                    .poll_interval(
                        poll_interval.map_or(poll.interval, Duration::from_secs),
                    )
                    .max_wait(max_wait.map_or(poll.max_wait, Duration::from_secs));
                let output = task.run(api.as_ref()).await?;
                print_output(&output)
            }
        }
    }

    /// Merge the optional task file with global connection flags
    fn resolve_task_file(&self) -> Result<TaskFile> {
        let mut task = match &self.cli.file {
            Some(path) => TaskFile::from_path(path)?,
            None => TaskFile {
                url: String::new(),
                cloud: false,
                auth: AuthSection::default(),
                http_timeout_secs: 10,
                connection_id: None,
                job_id: None,
                wait: true,
                poll_interval_secs: 1,
                max_wait_secs: 3600,
                fail_on_active_sync: true,
            },
        };

        if let Some(url) = &self.cli.url {
            task.url = url.clone();
        }
        if self.cli.cloud {
            task.cloud = true;
        }
        if let Some(token) = &self.cli.token {
            task.auth.token = Some(token.clone());
        }
        if let Some(username) = &self.cli.username {
            task.auth.username = Some(username.clone());
        }
        if let Some(password) = &self.cli.password {
            task.auth.password = Some(password.clone());
        }
        if let Some(client_id) = &self.cli.client_id {
            task.auth.client_id = Some(client_id.clone());
        }
        if let Some(client_secret) = &self.cli.client_secret {
            task.auth.client_secret = Some(client_secret.clone());
        }
        if let Some(token_url) = &self.cli.token_url {
            task.auth.token_url = Some(token_url.clone());
        }
        if let Some(timeout) = self.cli.http_timeout {
            task.http_timeout_secs = timeout;
        }

        if task.url.is_empty() {
            return Err(Error::missing_field("url"));
        }
        task.validate()?;
        Ok(task)
    }

    /// Build the job client for the selected API variant
    fn connect(&self, task_file: &TaskFile, connection_id: String) -> Result<Box<dyn JobApi>> {
        let client = HttpClient::with_auth(task_file.http_config(), task_file.auth_config())?;

        Ok(if task_file.cloud {
            Box::new(CloudApi::new(client, connection_id))
        } else {
            Box::new(SelfHostedApi::new(client, connection_id))
        })
    }
}

/// Pick the connection id from the subcommand flag or the task file
fn resolve_connection(flag: &Option<String>, task_file: &TaskFile) -> Result<String> {
    flag.clone()
        .or_else(|| task_file.connection_id.clone())
        .ok_or_else(|| Error::missing_field("connection_id"))
}

/// Apply poll-cadence flags on top of the task file defaults
fn apply_poll_flags(
    task: SyncTask,
    task_file: &TaskFile,
    poll_interval: Option<u64>,
    max_wait: Option<u64>,
) -> SyncTask {
    let poll = task_file.poll_config();
    task.poll_interval(poll_interval.map_or(poll.interval, Duration::from_secs))
        .max_wait(max_wait.map_or(poll.max_wait, Duration::from_secs))
}

/// Print a task output as pretty JSON on stdout
fn print_output<T: Serialize>(output: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(output)?);
    Ok(())
}
