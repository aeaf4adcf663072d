mod formatter;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use formatter::{ColorMode, OutputFormat};
use stardog_client::{
    ConnectionConfig, OnlineStrategy, QueryClient, QueryRequest, ReasoningLevel, ENV_DATABASE,
    ENV_ENDPOINT, ENV_MAX_CONCURRENT_REQUESTS, ENV_PASS, ENV_REASONING, ENV_TIMEOUT_SECS,
    ENV_USER,
};
use std::io::Read;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sdq")]
#[command(about = "Stardog query CLI - run SPARQL queries and manage databases", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ConnectionArgs {
    /// Stardog server URL
    #[arg(long, global = true, env = ENV_ENDPOINT, default_value = ConnectionConfig::DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Username for authentication
    #[arg(long, global = true, env = ENV_USER, default_value = ConnectionConfig::DEFAULT_USER)]
    user: String,

    /// Password for authentication
    #[arg(long, global = true, env = ENV_PASS, default_value = ConnectionConfig::DEFAULT_PASS, hide_env_values = true)]
    password: String,

    /// Reasoning level: NONE, QL, RL or EL
    #[arg(long, global = true, env = ENV_REASONING)]
    reasoning: Option<ReasoningLevel>,

    /// Per-request timeout in seconds (none by default)
    #[arg(long, global = true, env = ENV_TIMEOUT_SECS)]
    timeout_secs: Option<u64>,

    /// Maximum number of requests in flight at once
    #[arg(long, global = true, env = ENV_MAX_CONCURRENT_REQUESTS)]
    max_concurrent_requests: Option<usize>,
}

impl ConnectionArgs {
    fn client(&self) -> Result<QueryClient> {
        let mut config = ConnectionConfig::new(&self.endpoint, &self.user, &self.password)?
            .with_reasoning(self.reasoning);
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        if let Some(max) = self.max_concurrent_requests {
            config = config.with_max_concurrent_requests(max);
        }
        debug!("using {:?}", config);
        QueryClient::from_config(config)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run a SPARQL query and print its solutions
    Query {
        /// Database to query
        #[arg(long, short, env = ENV_DATABASE)]
        database: String,

        /// Maximum number of solutions
        #[arg(long, default_value_t = QueryRequest::DEFAULT_LIMIT)]
        limit: u64,

        /// Number of solutions to skip
        #[arg(long, default_value_t = 0)]
        offset: u64,

        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,

        /// Color output for tables
        #[arg(long, value_enum, default_value = "auto")]
        color: ColorMode,

        /// Query text, or `-` to read it from stdin
        query: String,
    },

    /// List the databases on the server
    ListDbs,

    /// Bring a database online
    Online {
        database: String,

        /// Wait for open connections instead of proceeding immediately
        #[arg(long)]
        wait: bool,
    },

    /// Take a database offline
    Offline {
        database: String,

        /// Wait for open connections instead of proceeding immediately
        #[arg(long)]
        wait: bool,

        /// How long to wait for open connections, in seconds
        #[arg(long, default_value_t = 3)]
        wait_secs: u64,
    },

    /// Print the number of triples in a database
    Size { database: String },
}

fn strategy(wait: bool) -> OnlineStrategy {
    if wait {
        OnlineStrategy::Wait
    } else {
        OnlineStrategy::NoWait
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing (logs to stderr, keeping stdout clean for data)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let client = cli.connection.client()?;

    match cli.command {
        Commands::Query {
            database,
            limit,
            offset,
            format,
            color,
            query,
        } => run_query(client, database, query, limit, offset, format, color).await,
        Commands::ListDbs => run_list_dbs(client).await,
        Commands::Online { database, wait } => {
            client.online_db(&database, strategy(wait)).await?;
            println!("{} is online", database);
            Ok(())
        }
        Commands::Offline {
            database,
            wait,
            wait_secs,
        } => {
            client
                .offline_db(&database, strategy(wait), Duration::from_secs(wait_secs))
                .await?;
            println!("{} is offline", database);
            Ok(())
        }
        Commands::Size { database } => {
            println!("{}", client.get_db_size(&database).await?);
            Ok(())
        }
    }
}

async fn run_query(
    client: QueryClient,
    database: String,
    query: String,
    limit: u64,
    offset: u64,
    format: OutputFormat,
    color: ColorMode,
) -> Result<()> {
    let query = if query == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read query from stdin")?;
        text
    } else {
        query
    };

    let request = QueryRequest::new(database, query).limit(limit).offset(offset);
    let result = client.query(&request).await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Table => println!(
            "{}",
            formatter::format_table(&result, color.should_colorize())
        ),
    }
    Ok(())
}

async fn run_list_dbs(client: QueryClient) -> Result<()> {
    for db in client.list_dbs().await? {
        println!("{}", db);
    }
    Ok(())
}
