pub mod config;

pub use config::{AppConfig, ClusterConfig, OutputConfig, PipelineConfig};
