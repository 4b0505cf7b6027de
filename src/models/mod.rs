pub mod stock;
pub mod status;
