use std::path::PathBuf;

use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};
use podgen::sink::{ClusterSink, OutputFormat, ResourceSink, TextSink};
use podgen::{telemetry, ClusterConfig, PodParams};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true, env = "PODGEN_LOG_JSON")]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create the pod in the cluster
    Create(CreateArgs),
    /// Print the pod description without contacting a cluster
    Generate(GenerateArgs),
    /// Show version information
    Version,
}

#[derive(ClapArgs, Debug)]
struct PodArgs {
    /// Value of the ENV variable inside the container
    #[arg(long, short, default_value = "dev")]
    environment: String,

    /// Pod name
    #[arg(long, default_value = podgen::pod::DEFAULT_POD_NAME)]
    name: String,

    /// Container image
    #[arg(long, default_value = podgen::pod::DEFAULT_IMAGE)]
    image: String,
}

impl PodArgs {
    fn params(&self) -> PodParams {
        PodParams::new(self.environment.clone())
            .with_name(self.name.clone())
            .with_image(self.image.clone())
    }
}

#[derive(ClapArgs, Debug)]
struct CreateArgs {
    #[command(flatten)]
    pod: PodArgs,

    /// Target namespace (defaults to the kubeconfig context's namespace)
    #[arg(long, short, env = "POD_NAMESPACE")]
    namespace: Option<String>,

    /// Kubeconfig context to use
    #[arg(long, env = "KUBE_CONTEXT")]
    context: Option<String>,

    /// Path to a kubeconfig file (`$KUBECONFIG` is honoured when unset)
    #[arg(long)]
    kubeconfig: Option<PathBuf>,

    /// Validate the request on the API server without persisting it
    #[arg(long)]
    dry_run: bool,
}

#[derive(ClapArgs, Debug)]
struct GenerateArgs {
    #[command(flatten)]
    pod: PodArgs,

    /// Output format
    #[arg(long, short, value_enum, default_value_t = OutputFormat::Json)]
    output: OutputFormat,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    telemetry::init_tracing(args.log_json);

    match args.command {
        Commands::Version => {
            println!("podgen v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Generate(generate_args) => run_generate(generate_args).await,
        Commands::Create(create_args) => run_create(create_args).await,
    }
}

async fn run_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let description = args.pod.params().build();
    let mut sink = TextSink::stdout(args.output);
    sink.send(&description)
        .await
        .context("Failed to render pod description")?;
    Ok(())
}

async fn run_create(args: CreateArgs) -> anyhow::Result<()> {
    let cluster = ClusterConfig {
        kubeconfig: args.kubeconfig,
        context: args.context,
        namespace: args.namespace,
    };
    let config = cluster.load().await?;
    let namespace = cluster.resolve_namespace(&config);

    info!("Using namespace {}", namespace);

    let description = args.pod.params().build();
    let sink = ClusterSink::new(config)?.with_dry_run(args.dry_run);

    let handle = sink.submit(&description, &namespace).await?;
    println!("{handle}");
    Ok(())
}
