pub mod config;
pub mod export;
pub mod status;

pub use config::show_config;
pub use export::run_export;
pub use status::show_status;
