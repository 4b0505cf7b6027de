use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("HTTP error: status {status}")]
    HttpError { status: u16 },

    #[error("Bad response format: {0}")]
    MalformedResponse(String),

    #[error("Server reported failure: {0}")]
    ApplicationError(String),

    #[error("Update timed out after {0} status polls")]
    Timeout(u32),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl DashboardError {
    /// 展示给用户的提示文本
    pub fn user_message(&self) -> String {
        match self {
            DashboardError::NetworkError(e) => format!("Network error: {}", e),
            DashboardError::HttpError { status } => {
                format!("Server returned HTTP {}", status)
            }
            DashboardError::MalformedResponse(detail) => {
                format!("Bad response format from server ({})", detail)
            }
            DashboardError::ApplicationError(message) => format!("Update failed: {}", message),
            DashboardError::Timeout(_) => {
                "The update is taking too long. Please check again later.".to_string()
            }
            DashboardError::IoError(e) => format!("Could not write the dashboard: {}", e),
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;

// JSON 解析失败一律视为响应格式错误
impl From<serde_json::Error> for DashboardError {
    fn from(e: serde_json::Error) -> Self {
        DashboardError::MalformedResponse(e.to_string())
    }
}
