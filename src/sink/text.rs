//! Render pod descriptions as JSON or YAML

use std::io::{self, Write};

use async_trait::async_trait;
use clap::ValueEnum;

use crate::error::Result;
use crate::pod::PodSpecDescription;
use crate::sink::{ResourceSink, SinkReport};

/// Text formats supported by [`TextSink`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Compact, single-line JSON
    #[default]
    Json,
    /// Indented JSON
    JsonPretty,
    Yaml,
}

/// Serialize the description using the same schema the API server accepts
///
/// Output is deterministic for a given description and format.
pub fn render(description: &PodSpecDescription, format: OutputFormat) -> Result<String> {
    let pod = description.to_pod();
    let text = match format {
        OutputFormat::Json => serde_json::to_string(&pod)?,
        OutputFormat::JsonPretty => serde_json::to_string_pretty(&pod)?,
        OutputFormat::Yaml => serde_yaml::to_string(&pod)?,
    };
    Ok(text)
}

/// Sink that writes the rendered description to a writer
pub struct TextSink<W> {
    writer: W,
    format: OutputFormat,
}

impl TextSink<io::Stdout> {
    pub fn stdout(format: OutputFormat) -> Self {
        Self::new(io::stdout(), format)
    }
}

impl<W: Write> TextSink<W> {
    pub fn new(writer: W, format: OutputFormat) -> Self {
        Self { writer, format }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn emit(&mut self, description: &PodSpecDescription) -> Result<usize> {
        let mut text = render(description, self.format)?;
        if !text.ends_with('\n') {
            text.push('\n');
        }
        self.writer.write_all(text.as_bytes())?;
        self.writer.flush()?;
        Ok(text.len())
    }
}

#[async_trait]
impl<W: Write + Send> ResourceSink for TextSink<W> {
    async fn send(&mut self, description: &PodSpecDescription) -> Result<SinkReport> {
        let bytes = self.emit(description)?;
        Ok(SinkReport::Rendered { bytes })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;
    use crate::pod::{build, PodParams};

    #[test]
    fn test_render_dev_json_matches_wire_document() {
        let text = render(&build("dev"), OutputFormat::Json).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(
            value,
            json!({
                "apiVersion": "v1",
                "kind": "Pod",
                "metadata": {"name": "test-pod"},
                "spec": {
                    "containers": [{
                        "name": "test-container",
                        "image": "nginx",
                        "env": [{"name": "ENV", "value": "dev"}]
                    }]
                }
            })
        );
    }

    #[test]
    fn test_render_json_is_single_line() {
        let text = render(&build("dev"), OutputFormat::Json).unwrap();
        assert!(!text.contains('\n'));
    }

    #[test]
    fn test_render_is_deterministic() {
        let desc = build("production");
        for format in [OutputFormat::Json, OutputFormat::JsonPretty, OutputFormat::Yaml] {
            let first = render(&desc, format).unwrap();
            let second = render(&desc, format).unwrap();
            assert_eq!(first, second, "{format:?} output differs between calls");
        }
        assert_eq!(
            render(&build("production"), OutputFormat::Json).unwrap(),
            render(&desc, OutputFormat::Json).unwrap()
        );
    }

    #[test]
    fn test_render_does_not_mutate_description() {
        let desc = build("dev");
        let before = desc.clone();
        render(&desc, OutputFormat::Yaml).unwrap();
        assert_eq!(desc, before);
    }

    #[test]
    fn test_rendered_json_parses_back_into_pod() {
        for env in ["dev", "", "with \"quotes\" and \\ backslash"] {
            let text = render(&build(env), OutputFormat::Json).unwrap();
            let pod: k8s_openapi::api::core::v1::Pod = serde_json::from_str(&text).unwrap();

            assert_eq!(pod.metadata.name.as_deref(), Some("test-pod"));
            let container = &pod.spec.as_ref().unwrap().containers[0];
            assert_eq!(container.image.as_deref(), Some("nginx"));
            assert_eq!(
                container.env.as_ref().unwrap()[0].value.as_deref(),
                Some(env)
            );
        }
    }

    #[test]
    fn test_rendered_yaml_parses_back_into_pod() {
        let text = render(&build("staging"), OutputFormat::Yaml).unwrap();
        let value: Value = serde_yaml::from_str(&text).unwrap();

        assert_eq!(value["apiVersion"], "v1");
        assert_eq!(value["kind"], "Pod");
        assert_eq!(value["metadata"]["name"], "test-pod");
        assert_eq!(value["spec"]["containers"][0]["env"][0]["value"], "staging");
    }

    #[test]
    fn test_pretty_json_matches_compact_json() {
        let desc = PodParams::new("qa").with_image("nginx:1.27").build();
        let compact: Value =
            serde_json::from_str(&render(&desc, OutputFormat::Json).unwrap()).unwrap();
        let pretty: Value =
            serde_json::from_str(&render(&desc, OutputFormat::JsonPretty).unwrap()).unwrap();
        assert_eq!(compact, pretty);
    }

    #[tokio::test]
    async fn test_text_sink_writes_one_line() {
        let mut sink = TextSink::new(Vec::new(), OutputFormat::Json);
        let report = sink.send(&build("dev")).await.unwrap();

        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(report, SinkReport::Rendered { bytes: out.len() });
        assert!(out.ends_with('\n'));
        assert_eq!(out.lines().count(), 1);
        assert_eq!(
            out.trim_end(),
            render(&build("dev"), OutputFormat::Json).unwrap()
        );
    }

    #[tokio::test]
    async fn test_text_sink_yaml_single_trailing_newline() {
        let mut sink = TextSink::new(Vec::new(), OutputFormat::Yaml);
        sink.send(&build("dev")).await.unwrap();

        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert!(out.ends_with('\n'));
        assert!(!out.ends_with("\n\n"));
    }
}
