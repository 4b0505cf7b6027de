use crate::errors::Result;
use crate::models::status::{ManualUpdateResponse, RefreshResponse, TurtleDataResponse};
use async_trait::async_trait;

/// Backend endpoints consumed by the dashboard
#[async_trait]
pub trait DashboardApi {
    /// `GET /api/refresh`: synchronous data refresh on the server
    async fn refresh(&self) -> Result<RefreshResponse>;

    /// `GET /api/turtle-data`: current snapshot plus update status
    async fn turtle_data(&self) -> Result<TurtleDataResponse>;

    /// `POST /api/manual-update`: starts a background update
    async fn manual_update(&self) -> Result<ManualUpdateResponse>;
}
