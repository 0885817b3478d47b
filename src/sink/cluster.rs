//! Create pods through the Kubernetes API

use async_trait::async_trait;
use k8s_openapi::api::core::v1::Pod;
use kube::api::{Api, PostParams};
use kube::{Client, Config, Resource, ResourceExt};
use tracing::{info, instrument, warn};

use crate::error::{Error, Result};
use crate::pod::PodSpecDescription;
use crate::sink::{ResourceHandle, ResourceSink, SinkReport};

/// Field manager recorded on every object this sink creates
pub const FIELD_MANAGER: &str = "podgen";

/// Sink that submits the description to a cluster
///
/// The sink issues exactly one create request per call and never retries;
/// transport, auth and admission failures are all returned as
/// [`Error::SinkError`].
#[derive(Clone)]
pub struct ClusterSink {
    client: Client,
    namespace: String,
    dry_run: bool,
}

impl ClusterSink {
    /// Build a sink from an explicit cluster configuration
    pub fn new(config: Config) -> Result<Self> {
        let namespace = config.default_namespace.clone();
        let client = Client::try_from(config)
            .map_err(|e| Error::ConfigError(format!("Failed to build Kubernetes client: {e}")))?;
        Ok(Self {
            client,
            namespace,
            dry_run: false,
        })
    }

    pub fn from_client(client: Client) -> Self {
        let namespace = client.default_namespace().to_string();
        Self {
            client,
            namespace,
            dry_run: false,
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Ask the API server to validate the request without persisting it
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Create the pod in `namespace`
    #[instrument(skip(self, description), fields(name = %description.name(), namespace = %namespace))]
    pub async fn submit(
        &self,
        description: &PodSpecDescription,
        namespace: &str,
    ) -> Result<ResourceHandle> {
        let api: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
        let params = PostParams {
            dry_run: self.dry_run,
            field_manager: Some(FIELD_MANAGER.to_string()),
        };

        info!(dry_run = self.dry_run, "Creating pod {}", description.name());

        let created = api
            .create(&params, &description.to_pod())
            .await
            .map_err(|source| {
                warn!("Create request for pod {} failed: {}", description.name(), source);
                Error::SinkError {
                    kind: description.kind().to_string(),
                    name: description.name().to_string(),
                    namespace: namespace.to_string(),
                    source,
                }
            })?;

        let handle = ResourceHandle {
            kind: description.kind().to_string(),
            name: created
                .meta()
                .name
                .clone()
                .unwrap_or_else(|| description.name().to_string()),
            namespace: created.namespace().or_else(|| Some(namespace.to_string())),
            uid: created.uid(),
            dry_run: self.dry_run,
        };

        info!(uid = ?handle.uid, "Created pod {}", handle.name);
        Ok(handle)
    }
}

#[async_trait]
impl ResourceSink for ClusterSink {
    async fn send(&mut self, description: &PodSpecDescription) -> Result<SinkReport> {
        let handle = self.submit(description, &self.namespace).await?;
        Ok(SinkReport::Created(handle))
    }
}
