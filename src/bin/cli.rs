//! riakwire CLI Client
//!
//! Command-line interface for talking to a Riak node over protocol buffers.

use clap::{Parser, Subcommand};
use riakwire::command::bucket::ListBuckets;
use riakwire::command::kv::{Delete, Get, ListKeys, Put};
use riakwire::command::server::{GetServerInfo, Ping};
use riakwire::message::{
    Content, DeleteRequest, GetRequest, ListBucketsRequest, ListKeysRequest, PutRequest,
};
use riakwire::{ClientConfig, Exchange, ProtoClient};
use tracing_subscriber::{fmt, EnvFilter};

/// riakwire CLI
#[derive(Parser, Debug)]
#[command(name = "riak-cli")]
#[command(about = "CLI for a Riak node's protocol buffers interface")]
#[command(version)]
struct Args {
    /// Node host
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Node protocol buffers port
    #[arg(short, long, default_value = "8087")]
    port: u16,

    /// Socket timeout in seconds
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Bucket type
    #[arg(long = "type")]
    bucket_type: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ping the node
    Ping,

    /// Show node name and version
    Info,

    /// Get a value by key
    Get {
        bucket: String,
        key: String,
    },

    /// Store a value
    Put {
        bucket: String,
        key: String,
        value: String,

        /// Content type of the value
        #[arg(long, default_value = "text/plain")]
        content_type: String,
    },

    /// Delete a key
    Del {
        bucket: String,
        key: String,
    },

    /// List the keys of a bucket
    ListKeys {
        bucket: String,
    },

    /// List buckets
    ListBuckets,
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,riakwire=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut builder = ClientConfig::builder().host(&args.host).port(args.port);
    if let Some(secs) = args.timeout {
        builder = builder.timeout_secs(secs);
    }
    let config = builder.build();

    let mut client = match ProtoClient::from_config(&config) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };

    tracing::debug!("Using node {}", config.address());

    if let Err(e) = run(&mut client, args.bucket_type, args.command) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(
    client: &mut ProtoClient,
    bucket_type: Option<String>,
    command: Commands,
) -> riakwire::Result<()> {
    match command {
        Commands::Ping => {
            client.execute::<Ping>(&())?;
            println!("PONG");
        }
        Commands::Info => {
            let info = client.execute::<GetServerInfo>(&())?;
            println!(
                "{} {}",
                info.node.unwrap_or_default(),
                info.server_version.unwrap_or_default()
            );
        }
        Commands::Get { bucket, key } => {
            let request = GetRequest {
                bucket_type,
                ..GetRequest::new(bucket, key)
            };
            let response = client.execute::<Get>(&request)?;
            if response.is_not_found() {
                println!("(not found)");
            }
            for content in response.content {
                println!("{}", String::from_utf8_lossy(&content.value));
            }
        }
        Commands::Put {
            bucket,
            key,
            value,
            content_type,
        } => {
            let content = Content::new(value).with_content_type(content_type);
            let request = PutRequest {
                bucket_type,
                ..PutRequest::new(bucket, Some(key), content)
            };
            client.execute::<Put>(&request)?;
            println!("OK");
        }
        Commands::Del { bucket, key } => {
            let request = DeleteRequest {
                bucket_type,
                ..DeleteRequest::new(bucket, key)
            };
            client.execute::<Delete>(&request)?;
            println!("OK");
        }
        Commands::ListKeys { bucket } => {
            let request = ListKeysRequest {
                bucket_type,
                ..ListKeysRequest::new(bucket)
            };
            for key in client.execute::<ListKeys>(&request)?.keys {
                println!("{}", key);
            }
        }
        Commands::ListBuckets => {
            let request = ListBucketsRequest {
                bucket_type,
                ..ListBucketsRequest::default()
            };
            for bucket in client.execute::<ListBuckets>(&request)?.buckets {
                println!("{}", bucket);
            }
        }
    }

    Ok(())
}
