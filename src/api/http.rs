use crate::api::base::DashboardApi;
use crate::config::Config;
use crate::errors::{DashboardError, Result};
use crate::models::status::{ManualUpdateResponse, RefreshResponse, TurtleDataResponse};
use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

/// 基于 reqwest 的后端客户端
pub struct HttpDashboardApi {
    client: Client,
    base_url: String,
}

impl HttpDashboardApi {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(DashboardError::NetworkError)?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// 先读取原始文本，再按预期结构解析
    async fn read_body<T: DeserializeOwned>(&self, path: &str, response: Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(DashboardError::HttpError {
                status: status.as_u16(),
            });
        }

        let text = response.text().await?;
        debug!("{} responded with {} bytes", path, text.len());
        parse_body(&text)
    }
}

/// Parse a response body, mapping anything unexpected to `MalformedResponse`
pub fn parse_body<T: DeserializeOwned>(text: &str) -> Result<T> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(DashboardError::MalformedResponse("empty body".to_string()));
    }
    Ok(serde_json::from_str(trimmed)?)
}

#[async_trait]
impl DashboardApi for HttpDashboardApi {
    async fn refresh(&self) -> Result<RefreshResponse> {
        let response = self.client.get(self.url("/api/refresh")).send().await?;
        self.read_body("/api/refresh", response).await
    }

    async fn turtle_data(&self) -> Result<TurtleDataResponse> {
        let response = self.client.get(self.url("/api/turtle-data")).send().await?;
        self.read_body("/api/turtle-data", response).await
    }

    async fn manual_update(&self) -> Result<ManualUpdateResponse> {
        let response = self
            .client
            .post(self.url("/api/manual-update"))
            .send()
            .await?;
        self.read_body("/api/manual-update", response).await
    }
}
