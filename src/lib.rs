// 公开导出的模块，供外部使用
pub mod api;
pub mod config;
pub mod errors;
pub mod models;
pub mod services;
pub mod view;

#[doc(hidden)]
pub mod util;

// 重新导出常用类型，方便使用
pub use api::base::DashboardApi;
pub use api::http::HttpDashboardApi;
pub use config::Config;
pub use errors::{DashboardError, Result};
pub use models::stock::{StockRow, SystemSnapshot, TurtleSystem};
pub use models::status::UpdateStatus;
pub use services::dashboard::{Command, Dashboard};
pub use services::update_poller::UpdateOutcome;
