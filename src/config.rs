//! Cluster configuration
//!
//! Loads a [`kube::Config`] from an explicit kubeconfig path, a named
//! context, or the standard inference chain (in-cluster service account,
//! then `$KUBECONFIG` / `~/.kube/config`).

use std::path::PathBuf;

use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::Config;
use tracing::debug;

use crate::error::{Error, Result};

/// Where to find the cluster and which namespace to use
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClusterConfig {
    pub kubeconfig: Option<PathBuf>,
    pub context: Option<String>,
    pub namespace: Option<String>,
}

impl ClusterConfig {
    /// Load the client configuration
    pub async fn load(&self) -> Result<Config> {
        let options = KubeConfigOptions {
            context: self.context.clone(),
            ..Default::default()
        };

        let config = match (&self.kubeconfig, &self.context) {
            (Some(path), _) => {
                debug!("Loading kubeconfig from {}", path.display());
                let kubeconfig = Kubeconfig::read_from(path).map_err(|e| {
                    Error::ConfigError(format!(
                        "Failed to read kubeconfig {}: {e}",
                        path.display()
                    ))
                })?;
                Config::from_custom_kubeconfig(kubeconfig, &options)
                    .await
                    .map_err(|e| Error::ConfigError(format!("Failed to load kubeconfig: {e}")))?
            }
            (None, Some(context)) => {
                debug!("Loading kubeconfig context {}", context);
                Config::from_kubeconfig(&options)
                    .await
                    .map_err(|e| Error::ConfigError(format!("Failed to load kubeconfig: {e}")))?
            }
            (None, None) => Config::infer().await.map_err(|e| {
                Error::ConfigError(format!("Failed to infer cluster configuration: {e}"))
            })?,
        };

        debug!(cluster_url = %config.cluster_url, "Loaded cluster configuration");
        Ok(config)
    }

    /// Explicit namespace, else the context's default namespace
    pub fn resolve_namespace(&self, config: &Config) -> String {
        self.namespace
            .clone()
            .unwrap_or_else(|| config.default_namespace.clone())
    }
}
