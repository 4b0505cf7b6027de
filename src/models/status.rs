use crate::errors::{DashboardError, Result};
use crate::models::stock::SystemSnapshot;
use serde::Deserialize;

/// 后端数据更新进度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateStatus {
    Collecting,
    Updated,
    Error,
    // 未知状态按初始化处理
    #[serde(other)]
    Initializing,
}

/// `data_status` of a manual-update response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataStatus {
    Initializing,
    Collecting,
    Error,
    // updated、completed 等其它取值都表示数据已是最新
    #[serde(other)]
    Done,
}

/// `GET /api/refresh`
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl RefreshResponse {
    pub fn ensure_success(self) -> Result<Self> {
        ensure_success(&self.status, self.message.as_deref())?;
        Ok(self)
    }
}

/// `POST /api/manual-update`
#[derive(Debug, Clone, Deserialize)]
pub struct ManualUpdateResponse {
    pub status: String,
    #[serde(default)]
    pub data_status: Option<DataStatus>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ManualUpdateResponse {
    pub fn ensure_success(self) -> Result<Self> {
        ensure_success(&self.status, self.message.as_deref())?;
        Ok(self)
    }

    /// `Ok(true)` while the backend is still working, `Ok(false)` once the
    /// data is current, and the server's message when collection failed.
    pub fn in_progress(&self) -> Result<bool> {
        match self.data_status {
            Some(DataStatus::Initializing) | Some(DataStatus::Collecting) => Ok(true),
            Some(DataStatus::Error) => Err(DashboardError::ApplicationError(
                self.message
                    .clone()
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| "data collection error".to_string()),
            )),
            Some(DataStatus::Done) | None => Ok(false),
        }
    }
}

/// `GET /api/turtle-data`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TurtleDataResponse {
    #[serde(flatten)]
    pub snapshot: SystemSnapshot,
    #[serde(default)]
    pub status: Option<UpdateStatus>,
    #[serde(default)]
    pub status_message: Option<String>,
}

impl TurtleDataResponse {
    pub fn update_status(&self) -> UpdateStatus {
        self.status.unwrap_or(UpdateStatus::Initializing)
    }
}

fn ensure_success(status: &str, message: Option<&str>) -> Result<()> {
    if status == "success" {
        Ok(())
    } else {
        Err(DashboardError::ApplicationError(
            message
                .filter(|m| !m.is_empty())
                .unwrap_or(status)
                .to_string(),
        ))
    }
}
