//! # GeoDNS
//!
//! Diagnostic front end for the geo-aware resolution engine: one lookup per
//! run, printed to stdout.

mod bootstrap;
mod di;

use bootstrap::{discover_resolvers, init_logging, init_record_store, load_config};
use clap::{Parser, Subcommand};
use di::{build_resolver, UseCases};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "geodns")]
#[command(version)]
#[command(about = "Geo-aware DNS resolution with EDNS client-subnet")]
struct Cli {
    /// Path to configuration file
    #[arg(short = 'c', long)]
    config: Option<String>,

    /// Log level or filter directive
    #[arg(short = 'l', long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// A records of a domain as seen from a client address
    Resolve {
        domain: String,

        /// Client IPv4 address the answer is tailored to
        #[arg(long, default_value = "127.0.0.1")]
        client: String,
    },
    /// Name servers of the closest enclosing zone
    Ns { domain: String },
    /// SOA and NS set of the zone a domain belongs to
    Soa { domain: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref(), cli.log_level.as_deref())?;
    init_logging(&config);

    let store = init_record_store(&config.backend).await?;
    let resolvers = discover_resolvers(&config.upstream).await;
    if resolvers.is_empty() {
        anyhow::bail!("no recursive resolvers configured or found in {}", config.upstream.resolv_conf);
    }

    let resolver = build_resolver(&config, store, resolvers);
    let use_cases = UseCases::new(Arc::new(resolver));
    info!("GeoDNS engine ready");

    match cli.command {
        Command::Resolve { domain, client } => {
            let records = use_cases.resolve_address.execute(&domain, &client).await?;
            for record in records {
                if let Some(addr) = record.ipv4() {
                    println!("{}\t{}\tIN\tA\t{}", record.name, record.ttl, addr);
                }
            }
        }
        Command::Ns { domain } => {
            let servers = use_cases.resolve_name_servers.execute(&domain).await?;
            for server in servers {
                println!("{}\t{}", server.host, server.ttl);
            }
        }
        Command::Soa { domain } => {
            let delegation = use_cases.get_zone_delegation.execute(&domain).await?;
            let soa = &delegation.soa;
            println!(
                "{}\tSOA\t{} {} {} {} {} {} {}",
                delegation.zone_key,
                soa.mname,
                soa.rname,
                soa.serial,
                soa.refresh,
                soa.retry,
                soa.expire,
                soa.minimum
            );
            for host in delegation.name_server_hosts() {
                println!("{}\tNS\t{}", delegation.zone_key, host);
            }
        }
    }

    Ok(())
}
