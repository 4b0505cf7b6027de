use crate::api::base::DashboardApi;
use crate::config::Config;
use crate::errors::{DashboardError, Result};
use crate::models::status::UpdateStatus;
use crate::view::{labels, DashboardView, TriggerGuard, TriggerState};
use log::{debug, error, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{self, MissedTickBehavior};

/// How a manual update ended. The trigger is idle again in every case.
#[derive(Debug)]
pub enum UpdateOutcome {
    /// Backend finished; a reload was requested after `polls` status checks
    Completed { polls: u32 },
    Failed(DashboardError),
}

impl UpdateOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, UpdateOutcome::Completed { .. })
    }
}

/// 手动触发后台数据更新，并轮询进度直到完成、出错或超时
pub struct UpdatePoller {
    api: Arc<dyn DashboardApi + Send + Sync>,
    poll_interval: Duration,
    max_poll_ticks: u32,
    reload_delay: Duration,
}

impl UpdatePoller {
    pub fn new(api: Arc<dyn DashboardApi + Send + Sync>, config: &Config) -> Self {
        Self {
            api,
            poll_interval: config.poll_interval,
            max_poll_ticks: config.max_poll_ticks,
            reload_delay: config.reload_delay,
        }
    }

    pub async fn trigger_update(&self, view: &mut dyn DashboardView) -> UpdateOutcome {
        let mut control = TriggerGuard::engage(view, labels::UPDATE_STARTING);

        match self.run(&mut *control).await {
            Ok(polls) => UpdateOutcome::Completed { polls },
            Err(e) => {
                error!("Manual update failed: {}", e);
                control.notify(&e.user_message());
                UpdateOutcome::Failed(e)
            }
        }
    }

    async fn run(&self, view: &mut dyn DashboardView) -> Result<u32> {
        let response = self.api.manual_update().await?.ensure_success()?;

        let polls = if response.in_progress()? {
            info!("Background update started, polling every {:?}", self.poll_interval);
            self.poll(view).await?
        } else {
            info!("Data is already up to date");
            0
        };

        self.finish(view).await;
        Ok(polls)
    }

    /// Returns the number of status checks it took to see `updated`
    async fn poll(&self, view: &mut dyn DashboardView) -> Result<u32> {
        let mut ticker = time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // 第一次 tick 立即完成，跳过
        ticker.tick().await;

        for tick in 1..=self.max_poll_ticks {
            ticker.tick().await;

            let data = match self.api.turtle_data().await {
                Ok(data) => data,
                Err(e) => {
                    warn!("Status poll {}/{} failed: {}", tick, self.max_poll_ticks, e);
                    continue;
                }
            };

            let status = data.update_status();
            debug!("Status poll {}/{}: {:?}", tick, self.max_poll_ticks, status);
            match status {
                UpdateStatus::Updated => return Ok(tick),
                UpdateStatus::Error => {
                    return Err(DashboardError::ApplicationError(
                        data.status_message
                            .unwrap_or_else(|| "data collection error".to_string()),
                    ));
                }
                UpdateStatus::Collecting => {
                    view.set_trigger(TriggerState::busy(labels::UPDATE_COLLECTING));
                }
                UpdateStatus::Initializing => {
                    view.set_trigger(TriggerState::busy(labels::UPDATE_INITIALIZING));
                }
            }
        }

        Err(DashboardError::Timeout(self.max_poll_ticks))
    }

    async fn finish(&self, view: &mut dyn DashboardView) {
        view.set_trigger(TriggerState::busy(labels::UPDATE_DONE));
        time::sleep(self.reload_delay).await;
        view.request_reload();
    }
}
