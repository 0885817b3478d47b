//! Pod description builder
//!
//! Turns a small set of named parameters into an immutable
//! [`PodSpecDescription`], and converts that description into the
//! `k8s_openapi` wire type shared by every sink.

use k8s_openapi::api::core::v1::{Container, EnvVar, Pod, PodSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

pub const API_VERSION: &str = "v1";
pub const KIND: &str = "Pod";

pub const DEFAULT_POD_NAME: &str = "test-pod";
pub const DEFAULT_CONTAINER_NAME: &str = "test-container";
pub const DEFAULT_IMAGE: &str = "nginx";
pub const DEFAULT_ENV_VAR_NAME: &str = "ENV";

/// A single environment variable carried by the container
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnvVarPair {
    pub name: String,
    pub value: String,
}

impl EnvVarPair {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Parameters accepted by the builder
///
/// `PodParams::new` fills every field except `environment` with the fixed
/// defaults; the `with_*` setters override them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PodParams {
    pub name: String,
    pub container_name: String,
    pub image: String,
    pub env_var_name: String,
    pub environment: String,
}

impl PodParams {
    pub fn new(environment: impl Into<String>) -> Self {
        Self {
            name: DEFAULT_POD_NAME.to_string(),
            container_name: DEFAULT_CONTAINER_NAME.to_string(),
            image: DEFAULT_IMAGE.to_string(),
            env_var_name: DEFAULT_ENV_VAR_NAME.to_string(),
            environment: environment.into(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_container_name(mut self, container_name: impl Into<String>) -> Self {
        self.container_name = container_name.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Build the description. Pure and infallible.
    pub fn build(self) -> PodSpecDescription {
        PodSpecDescription {
            name: self.name,
            container_name: self.container_name,
            image: self.image,
            environment_variables: vec![EnvVarPair::new(self.env_var_name, self.environment)],
        }
    }
}

/// Build the default pod description with `ENV=<environment>`
pub fn build(environment: &str) -> PodSpecDescription {
    PodParams::new(environment).build()
}

/// Immutable description of a single-container pod
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PodSpecDescription {
    name: String,
    container_name: String,
    image: String,
    environment_variables: Vec<EnvVarPair>,
}

impl PodSpecDescription {
    pub fn api_version(&self) -> &'static str {
        API_VERSION
    }

    pub fn kind(&self) -> &'static str {
        KIND
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn container_name(&self) -> &str {
        &self.container_name
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn environment_variables(&self) -> &[EnvVarPair] {
        &self.environment_variables
    }

    /// Convert into the wire type submitted to, and rendered from, the API
    pub fn to_pod(&self) -> Pod {
        let env = self
            .environment_variables
            .iter()
            .map(|var| EnvVar {
                name: var.name.clone(),
                value: Some(var.value.clone()),
                value_from: None,
            })
            .collect();

        Pod {
            metadata: ObjectMeta {
                name: Some(self.name.clone()),
                ..Default::default()
            },
            spec: Some(PodSpec {
                containers: vec![Container {
                    name: self.container_name.clone(),
                    image: Some(self.image.clone()),
                    env: Some(env),
                    ..Default::default()
                }],
                ..Default::default()
            }),
            status: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_dev_environment() {
        let desc = build("dev");

        assert_eq!(desc.name(), "test-pod");
        assert_eq!(desc.container_name(), "test-container");
        assert_eq!(desc.image(), "nginx");
        assert_eq!(desc.api_version(), "v1");
        assert_eq!(desc.kind(), "Pod");
        assert_eq!(
            desc.environment_variables(),
            &[EnvVarPair::new("ENV", "dev")]
        );
    }

    #[test]
    fn test_environment_is_passed_through_verbatim() {
        for env in ["", "production", "  padded  ", "ünïcødé", "a=b;c\n"] {
            let desc = build(env);
            assert_eq!(desc.environment_variables().len(), 1);
            assert_eq!(desc.environment_variables()[0].name, "ENV");
            assert_eq!(desc.environment_variables()[0].value, env);
            assert_eq!(desc.name(), DEFAULT_POD_NAME);
            assert_eq!(desc.image(), DEFAULT_IMAGE);
        }
    }

    #[test]
    fn test_build_is_deterministic() {
        assert_eq!(build("staging"), build("staging"));
    }

    #[test]
    fn test_params_overrides() {
        let desc = PodParams::new("prod")
            .with_name("web")
            .with_container_name("app")
            .with_image("registry.example.com/app:1.2.3")
            .build();

        assert_eq!(desc.name(), "web");
        assert_eq!(desc.container_name(), "app");
        assert_eq!(desc.image(), "registry.example.com/app:1.2.3");
        assert_eq!(desc.environment_variables()[0].value, "prod");
    }

    #[test]
    fn test_to_pod_has_exactly_one_container() {
        let pod = build("dev").to_pod();

        assert_eq!(pod.metadata.name.as_deref(), Some("test-pod"));
        assert!(pod.status.is_none());

        let spec = pod.spec.expect("pod spec");
        assert_eq!(spec.containers.len(), 1);

        let container = &spec.containers[0];
        assert_eq!(container.name, "test-container");
        assert_eq!(container.image.as_deref(), Some("nginx"));

        let env = container.env.as_ref().expect("env");
        assert_eq!(env.len(), 1);
        assert_eq!(env[0].name, "ENV");
        assert_eq!(env[0].value.as_deref(), Some("dev"));
    }

    #[test]
    fn test_to_pod_keeps_empty_value() {
        let pod = build("").to_pod();
        let env = pod.spec.unwrap().containers[0].env.clone().unwrap();
        assert_eq!(env[0].value.as_deref(), Some(""));
    }

    #[test]
    fn test_to_pod_does_not_mutate_description() {
        let desc = build("dev");
        let before = desc.clone();
        let _ = desc.to_pod();
        let _ = desc.to_pod();
        assert_eq!(desc, before);
    }
}
