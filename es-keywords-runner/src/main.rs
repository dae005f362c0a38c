use std::process::ExitCode;

use clap::{Parser, Subcommand};
use dotenv::dotenv;
use es_keywords::LIBRARY_VERSION;
use es_keywords_runner::{execute, keyword_listing, LogFormat, RunnerConfig};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "es-keywords")]
#[command(version = LIBRARY_VERSION)]
#[command(about = "Run Elasticsearch test keywords from the command line", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one keyword and print its result as JSON
    Run {
        /// Keyword name, e.g. "Es Count" or es_count
        keyword: String,

        /// Keyword arguments: host, port, index, then keyword-specific values
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// List the available keywords
    List,
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Plain => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv().ok();

    let config = match RunnerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(config.log_format);

    let cli = Cli::parse();

    match cli.command {
        Commands::List => {
            println!("{}", keyword_listing());
            ExitCode::SUCCESS
        }
        Commands::Run { keyword, args } => match execute(&config, &keyword, &args).await {
            Ok(output) => {
                println!("{}", output);
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!(keyword = %keyword, error = %e, "Keyword failed");
                eprintln!("{}", e);
                ExitCode::FAILURE
            }
        },
    }
}
