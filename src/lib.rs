//! podgen: build a single-container Kubernetes Pod description and either
//! create it in a cluster or render it as JSON/YAML.

pub mod config;
pub mod error;
pub mod pod;
pub mod sink;
pub mod telemetry;

pub use crate::config::ClusterConfig;
pub use crate::error::{Error, Result};
pub use crate::pod::{build, PodParams, PodSpecDescription};
pub use crate::sink::{ClusterSink, OutputFormat, ResourceHandle, ResourceSink, SinkReport, TextSink};
