use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use cloudconf_core::resolver::supported_services;
use cloudconf_core::{ClientOpts, CloudResolver, FileCloudsLoader, ProcessEnv};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cloudconf")]
#[command(about = "Show how clouds.yaml, clouds-public.yaml and secure.yaml resolve", long_about = None)]
struct Cli {
    /// Cloud entry to resolve (defaults to $OS_CLOUD, or the only entry)
    #[arg(short, long, global = true)]
    cloud: Option<String>,

    /// Prefix of the environment variables to read
    #[arg(long, global = true, default_value = "OS_")]
    env_prefix: String,

    /// Region whose per-region overrides are applied
    #[arg(short, long, global = true)]
    region: Option<String>,

    /// Endpoint interface: public, internal or admin
    #[arg(short, long, global = true)]
    interface: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the merged cloud entry as YAML (secrets masked)
    Show,
    /// Print the authentication options as JSON (secrets masked)
    Auth,
    /// Print service type, endpoint options and TLS settings for a service
    Endpoint {
        /// Service name, e.g. compute, network, volume
        service: String,
    },
    /// List the service names `endpoint` accepts
    Services,
    /// Print the clouds.yaml that would be read
    Path,
}

impl Cli {
    fn client_opts(&self) -> ClientOpts {
        let mut opts = ClientOpts::new().with_env_prefix(self.env_prefix.clone());
        opts.cloud = self.cloud.clone();
        opts.region_name = self.region.clone();
        opts.endpoint_type = self.interface.clone();
        opts
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let opts = cli.client_opts();

    let env = Arc::new(ProcessEnv::new());
    let loader = Arc::new(FileCloudsLoader::with_env(env.clone()));
    let resolver = CloudResolver::new(loader.clone(), env);

    match &cli.command {
        Commands::Show => {
            let cloud = resolver.resolve_cloud(&opts)?;
            print!("{}", serde_yaml::to_string(&cloud.redacted())?);
        }
        Commands::Auth => {
            let auth = resolver
                .auth_options(&opts)
                .context("failed to build authentication options")?;
            println!("{}", auth.redacted().to_json()?);
        }
        Commands::Endpoint { service } => {
            let endpoint = resolver
                .service_endpoint(service, &opts)
                .with_context(|| format!("failed to resolve the {} endpoint", service))?;
            println!("{}", serde_json::to_string_pretty(&endpoint)?);
        }
        Commands::Services => {
            for name in supported_services() {
                println!("{}", name);
            }
        }
        Commands::Path => match loader.clouds_path() {
            Some(path) => println!("{}", path.display()),
            None => {
                let searched: Vec<_> = loader
                    .search_dirs()
                    .iter()
                    .map(|d| d.display().to_string())
                    .collect();
                anyhow::bail!("no clouds.yaml found in {}", searched.join(", "));
            }
        },
    }

    Ok(())
}
