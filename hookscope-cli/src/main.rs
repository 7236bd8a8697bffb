use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use hookscope_core::logging;
use hookscope_core::serde_utils::to_pretty_json;
use hookscope_protocol::table::SortDirection;
use hookscope_protocol::webhook::LogsQueryParams;

mod output;
mod source;

use output::{print_attempts, print_filter_options, print_metrics, print_page};
use source::{CliError, FileSource, HttpSource, LogSource};

#[derive(Parser)]
#[command(name = "hookscope")]
#[command(about = "Browse webhook delivery logs and their retry history", long_about = None)]
struct Cli {
    /// Base URL of a running hookscope-logs service
    #[arg(
        long,
        global = true,
        env = "HOOKSCOPE_SERVER_URL",
        default_value = "http://127.0.0.1:8086"
    )]
    server: String,
    /// Read logs from a local NDJSON export instead of the service
    #[arg(long, global = true)]
    file: Option<PathBuf>,
    /// Print raw JSON instead of formatted output
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List one page of webhook logs
    List(ListArgs),
    /// Show the reconstructed delivery attempts of a log
    Attempts {
        #[arg(long)]
        api: String,
        request_id: String,
    },
    /// Show the typed additional metrics of a log
    Metrics {
        #[arg(long)]
        api: String,
        request_id: String,
    },
    /// List the applications and callback URLs available as filters
    Options {
        #[arg(long)]
        api: String,
    },
    /// Show version information
    Version,
}

#[derive(Args)]
struct ListArgs {
    #[arg(long)]
    api: String,
    /// Free-text search over callback URL, request id and application
    #[arg(long)]
    search: Option<String>,
    /// HTTP status to keep; comma-separated or repeated
    #[arg(long = "status", value_delimiter = ',')]
    statuses: Vec<u16>,
    /// Application id to keep; comma-separated or repeated
    #[arg(long = "app", value_delimiter = ',')]
    applications: Vec<String>,
    /// Callback URL to keep; comma-separated or repeated
    #[arg(long = "callback", value_delimiter = ',')]
    callbacks: Vec<String>,
    /// Relative window such as `-5m`, `-1h` or `-1d`; `0` disables it
    #[arg(long)]
    timeframe: Option<String>,
    #[arg(long)]
    page: Option<usize>,
    #[arg(long)]
    per_page: Option<usize>,
    /// Column to sort by (timestamp, status, gatewayResponseTime, ...)
    #[arg(long)]
    sort: Option<String>,
    #[arg(long, value_parser = parse_direction)]
    order: Option<SortDirection>,
}

impl ListArgs {
    fn to_query(&self) -> LogsQueryParams {
        fn joined<T: ToString>(values: &[T]) -> Option<String> {
            if values.is_empty() {
                None
            } else {
                Some(
                    values
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(","),
                )
            }
        }

        LogsQueryParams {
            search: self.search.clone(),
            statuses: joined(&self.statuses),
            application_ids: joined(&self.applications),
            callback_urls: joined(&self.callbacks),
            timeframe: self.timeframe.clone(),
            page: self.page,
            per_page: self.per_page,
            sort: self.sort.clone(),
            order: self.order,
        }
    }
}

fn parse_direction(value: &str) -> Result<SortDirection, String> {
    match value.to_ascii_lowercase().as_str() {
        "asc" => Ok(SortDirection::Asc),
        "desc" => Ok(SortDirection::Desc),
        other => Err(format!("expected `asc` or `desc`, got `{other}`")),
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    if let Err(err) = logging::init_tracing(Some("warn")) {
        eprintln!("failed to initialise tracing: {err}");
    }

    let cli = Cli::parse();

    if let Commands::Version = cli.command {
        println!("hookscope {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let source: Box<dyn LogSource + Send + Sync> = match &cli.file {
        Some(path) => Box::new(FileSource::open(path).await?),
        None => Box::new(HttpSource::new(&cli.server)?),
    };

    let json = cli.json;
    match cli.command {
        Commands::List(args) => {
            let response = source.list(&args.api, &args.to_query()).await?;
            if json {
                println!("{}", to_pretty_json(&response)?);
            } else {
                print_page(&response);
            }
        }
        Commands::Attempts { api, request_id } => {
            let detail = source.detail(&api, &request_id).await?;
            if json {
                println!("{}", to_pretty_json(&detail.attempts)?);
            } else {
                print_attempts(&detail);
            }
        }
        Commands::Metrics { api, request_id } => {
            let detail = source.detail(&api, &request_id).await?;
            if json {
                println!("{}", to_pretty_json(&detail.metrics)?);
            } else {
                print_metrics(&detail);
            }
        }
        Commands::Options { api } => {
            let options = source.options(&api).await?;
            if json {
                println!("{}", to_pretty_json(&options)?);
            } else {
                print_filter_options(&options);
            }
        }
        Commands::Version => {}
    }

    Ok(())
}
