pub mod config;

pub use config::DesignerConfig;
