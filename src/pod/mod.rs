//! Pod resource description

mod builder;

pub use builder::{
    build, EnvVarPair, PodParams, PodSpecDescription, API_VERSION, DEFAULT_CONTAINER_NAME,
    DEFAULT_ENV_VAR_NAME, DEFAULT_IMAGE, DEFAULT_POD_NAME, KIND,
};
