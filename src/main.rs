use clap::{Args, Parser, Subcommand};
use parcel_link::config::{self, GeocoderConfig, ServerConfig};
use parcel_link::geocode::GeocodeResolver;
use parcel_link::http::UreqTransport;
use parcel_link::link::resolve_link;
use parcel_link::{server, smoke};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Parcel Link: find the property-search page for a US address.
///
/// Examples:
///   parcel-link serve --port 3000
///   parcel-link resolve "308 Chippendale Ave, Austin, TX 78745"
///   parcel-link lookup TX 453
///   parcel-link smoke --base http://localhost:3000
#[derive(Parser)]
#[command(name = "parcel-link", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (GET /api/link?address=...).
    Serve {
        /// Interface to bind.
        #[arg(long, env = "PARCEL_LINK_HOST", default_value = config::DEFAULT_HOST)]
        host: String,

        /// Port to bind.
        #[arg(long, short = 'p', env = "PORT", default_value_t = config::DEFAULT_PORT)]
        port: u16,

        #[command(flatten)]
        registry: RegistryArgs,

        #[command(flatten)]
        geocoder: GeocoderArgs,
    },

    /// Resolve one address and print the JSON answer.
    Resolve {
        /// Free-text address; multiple words are joined with spaces.
        #[arg(required = true, num_args = 1..)]
        address: Vec<String>,

        #[command(flatten)]
        registry: RegistryArgs,

        #[command(flatten)]
        geocoder: GeocoderArgs,
    },

    /// Look up a jurisdiction in the registry without geocoding.
    Lookup {
        /// Two-letter state code (any case).
        state: String,

        /// County FIPS, padded or not (e.g. 453, 53).
        county: String,

        #[command(flatten)]
        registry: RegistryArgs,
    },

    /// Check a running server end to end with a known Travis County address.
    Smoke {
        /// Server base URL.
        #[arg(long, env = "SMOKE_BASE", default_value = "http://localhost:3000")]
        base: String,
    },
}

#[derive(Args)]
struct RegistryArgs {
    /// Registry JSON to use instead of the built-in one.
    #[arg(long, env = "PARCEL_LINK_REGISTRY")]
    registry: Option<PathBuf>,
}

#[derive(Args)]
struct GeocoderArgs {
    /// Census geocoder base URL.
    #[arg(long, env = "PARCEL_LINK_GEOCODER_URL", default_value = config::CENSUS_GEOCODER_URL)]
    geocoder_url: String,

    /// Census benchmark.
    #[arg(long, env = "PARCEL_LINK_BENCHMARK", default_value = config::DEFAULT_BENCHMARK)]
    benchmark: String,

    /// Census vintage for the coordinate lookup.
    #[arg(long, env = "PARCEL_LINK_VINTAGE", default_value = config::DEFAULT_VINTAGE)]
    vintage: String,

    /// Per-call timeout in seconds.
    #[arg(long, env = "PARCEL_LINK_TIMEOUT_SECS", default_value_t = config::HTTP_TIMEOUT_SECS)]
    timeout_secs: u64,
}

impl From<GeocoderArgs> for GeocoderConfig {
    fn from(args: GeocoderArgs) -> Self {
        Self {
            base_url: args.geocoder_url,
            benchmark: args.benchmark,
            vintage: args.vintage,
            timeout: Duration::from_secs(args.timeout_secs),
        }
    }
}

impl RegistryArgs {
    fn server_config(self) -> ServerConfig {
        ServerConfig {
            registry: self.registry,
            ..ServerConfig::default()
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("parcel_link=info,tower_http=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { host, port, registry, geocoder } => {
            let config = ServerConfig {
                host,
                port,
                ..registry.server_config()
            };
            server::start(config, geocoder.into()).await;
        }

        Command::Resolve { address, registry, geocoder } => {
            let registry = load_registry_or_exit(registry);
            let resolver = GeocodeResolver::new(geocoder.into());
            let address = address.join(" ");
            let response = tokio::task::spawn_blocking(move || {
                resolve_link(&resolver, &registry, &address)
            })
            .await
            .unwrap_or_else(|e| {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            });
            print_json(&response);
            if response.url.is_none() {
                std::process::exit(1);
            }
        }

        Command::Lookup { state, county, registry } => {
            let registry = load_registry_or_exit(registry);
            match registry.lookup(&state, &county) {
                Some(result) => print_json(&result),
                None => {
                    eprintln!("Error: No link for {}:{}", state.to_uppercase(), county);
                    std::process::exit(1);
                }
            }
        }

        Command::Smoke { base } => {
            let transport = UreqTransport::new(Duration::from_secs(config::HTTP_TIMEOUT_SECS * 3));
            let outcome = tokio::task::spawn_blocking(move || smoke::run(&transport, &base)).await;
            match outcome {
                Ok(Ok(url)) => println!("Smoke OK: Travis County link returned ({})", url),
                Ok(Err(e)) => {
                    eprintln!("Smoke failed: {}", e);
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("Smoke failed: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}

fn load_registry_or_exit(args: RegistryArgs) -> parcel_link::registry::Registry {
    server::load_registry(&args.server_config()).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    })
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
