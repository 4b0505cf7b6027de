use crate::api::base::DashboardApi;
use crate::config::Config;
use crate::errors::{DashboardError, Result};
use crate::services::table_renderer::TableRenderer;
use crate::services::update_poller::{UpdateOutcome, UpdatePoller};
use crate::view::html::HtmlPage;
use crate::view::{labels, DashboardView, TriggerState};
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{self, MissedTickBehavior};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Refresh,
    Update,
    Quit,
}

impl Command {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "r" | "refresh" => Some(Command::Refresh),
            "u" | "update" => Some(Command::Update),
            "q" | "quit" | "exit" => Some(Command::Quit),
            _ => None,
        }
    }
}

/// 看板主循环：一次只处理一个操作，定时刷新与手动更新互斥
pub struct Dashboard {
    renderer: TableRenderer,
    poller: UpdatePoller,
    page: HtmlPage,
    auto_refresh: Option<Duration>,
}

impl Dashboard {
    pub fn new(config: &Config, api: Arc<dyn DashboardApi + Send + Sync>) -> Self {
        Self {
            renderer: TableRenderer::new(api.clone()),
            poller: UpdatePoller::new(api, config),
            page: HtmlPage::new(config.output_path.clone()),
            auto_refresh: config.auto_refresh,
        }
    }

    pub fn page(&self) -> &HtmlPage {
        &self.page
    }

    /// Full reload: re-fetch the snapshot and reset the trigger
    pub async fn reload(&mut self) -> Result<()> {
        self.page.clear_notices();
        self.page.set_trigger(TriggerState::idle(labels::REFRESH_IDLE));
        if let Err(e) = self.renderer.reload(&mut self.page).await {
            warn!("Reload failed: {}", e);
            self.page.notify(&e.user_message());
            self.page.save()?;
            return Err(e);
        }
        self.page.save()
    }

    pub async fn refresh(&mut self) -> Result<()> {
        let result = self.renderer.refresh_and_render(&mut self.page).await;
        self.page.save()?;
        result
    }

    pub async fn update(&mut self) -> Result<UpdateOutcome> {
        let outcome = self.poller.trigger_update(&mut self.page).await;
        if self.page.take_reload_request() {
            self.reload().await?;
        } else {
            self.page.save()?;
        }
        Ok(outcome)
    }

    /// Serve commands until `Quit` or the sender side closes.
    pub async fn run(&mut self, mut commands: mpsc::Receiver<Command>) -> Result<()> {
        if let Err(e) = self.reload().await {
            warn!("Initial load failed: {}", e);
        }

        let mut ticker = self.auto_refresh.map(|period| {
            let mut ticker = time::interval_at(time::Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            ticker
        });

        loop {
            tokio::select! {
                command = commands.recv() => {
                    match command {
                        Some(Command::Refresh) => self.handle_refresh().await?,
                        Some(Command::Update) => self.handle_update().await?,
                        Some(Command::Quit) | None => break,
                    }
                }
                _ = tick(&mut ticker) => {
                    debug!("Auto refresh tick");
                    self.handle_refresh().await?;
                }
            }
        }

        info!("Dashboard stopped");
        Ok(())
    }

    async fn handle_refresh(&mut self) -> Result<()> {
        info!("Handling refresh");
        self.page.clear_notices();
        let result = self.refresh().await;
        keep_running(result)
    }

    async fn handle_update(&mut self) -> Result<()> {
        info!("Handling update");
        self.page.clear_notices();
        let result = self.update().await.map(|_| ());
        keep_running(result)
    }
}

// 操作失败已提示用户，只有写文件失败才终止循环
fn keep_running(result: Result<()>) -> Result<()> {
    match result {
        Err(DashboardError::IoError(e)) => Err(e.into()),
        _ => Ok(()),
    }
}

async fn tick(ticker: &mut Option<time::Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending().await,
    }
}
