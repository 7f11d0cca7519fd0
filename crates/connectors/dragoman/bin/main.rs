use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{DateTime, Utc};
use clap::Parser;
use dragoman::query::{self, ReadRequest};
use dragoman::state::create_state;
use dragoman_configuration::environment::ProcessEnvironment;
use dragoman_configuration::{make_runtime_configuration, parse_configuration};
use futures::TryStreamExt;
use query_engine_metadata::metadata::Dataset;

/// Read a dataset through the gateway and print one JSON envelope per line.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Directory holding configuration.json.
    #[arg(long, env = "DRAGOMAN_CONFIGURATION_DIRECTORY", default_value = ".")]
    configuration: PathBuf,
    /// An HTTP URL or `<database>:<collection>`.
    #[arg(long)]
    source: String,
    #[arg(long, default_value = "dragoman")]
    owner: String,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    select: Option<String>,
    #[arg(long = "where")]
    where_clause: Option<String>,
    #[arg(long)]
    order_by: Option<String>,
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    max_results: i64,
    /// Only read records changed after this time, see `--control-field`.
    #[arg(long, requires = "control_field")]
    since: Option<DateTime<Utc>>,
    #[arg(long)]
    control_field: Option<String>,
    #[arg(long)]
    control_field_pattern: Option<String>,
}

impl Args {
    fn into_request(self) -> ReadRequest {
        let name = self.name.unwrap_or_else(|| self.source.clone());
        let mut dataset = Dataset::new(self.owner, name, self.source);
        if let Some(field) = self.control_field {
            dataset = dataset.with_subscription(field, self.control_field_pattern);
        }

        ReadRequest {
            select: self.select,
            where_clause: self.where_clause,
            order_by: self.order_by,
            max_results: self.max_results,
            since: self.since,
            ..ReadRequest::new(dataset)
        }
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let parsed = parse_configuration(&args.configuration).await?;
    let configuration = make_runtime_configuration(parsed, &ProcessEnvironment)?;
    let state = create_state(&configuration, &mut prometheus::Registry::new()).await?;

    let mut envelopes = query::read(&state, &args.into_request())?;
    while let Some(envelope) = envelopes.try_next().await? {
        println!("{}", serde_json::to_string(&envelope)?);
    }
    Ok(())
}

#[tokio::main]
pub async fn main() -> ExitCode {
    env_logger::init();

    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}
