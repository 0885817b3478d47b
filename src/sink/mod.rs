//! Resource sinks
//!
//! A sink consumes a [`PodSpecDescription`] and produces an external effect:
//! [`ClusterSink`] creates the pod through the Kubernetes API, [`TextSink`]
//! renders it as JSON or YAML.

use std::fmt;

use async_trait::async_trait;

use crate::error::Result;
use crate::pod::PodSpecDescription;

pub mod cluster;
pub mod text;

pub use cluster::{ClusterSink, FIELD_MANAGER};
pub use text::{render, OutputFormat, TextSink};

/// Handle to a resource created by the cluster
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceHandle {
    pub kind: String,
    pub name: String,
    pub namespace: Option<String>,
    pub uid: Option<String>,
    pub dry_run: bool,
}

impl fmt::Display for ResourceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} created", self.kind.to_lowercase(), self.name)?;
        if self.dry_run {
            write!(f, " (server dry run)")?;
        }
        Ok(())
    }
}

/// Outcome of a successful sink call
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SinkReport {
    Created(ResourceHandle),
    Rendered { bytes: usize },
}

#[async_trait]
pub trait ResourceSink {
    /// Hand the description to the sink. Called once per run.
    async fn send(&mut self, description: &PodSpecDescription) -> Result<SinkReport>;
}
