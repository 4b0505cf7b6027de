pub mod dashboard;
pub mod table_renderer;
pub mod update_poller;
