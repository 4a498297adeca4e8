//! Port traits decoupling the domain from its adapters.

pub mod config_port;
pub mod data_port;
pub mod report_port;
