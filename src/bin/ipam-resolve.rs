// Copyright (c) 2025 - Cowboy AI, Inc.
//! IPAM Resolve
//!
//! Loads a JSON snapshot, builds the resolution indexes and prints query
//! results as JSON on stdout. Logs go to stderr.
//!
//! Run with: cargo run --bin ipam-resolve -- --snapshot dump.json vlans --site 3
//!
//! Configuration:
//! - `IPAM_SNAPSHOT` - snapshot path (overridden by `--snapshot`)
//! - `IPAM_STRICT` - validate references before building (disabled by `--no-strict`)
//! - `IPAM_PRETTY` - pretty-print output (enabled by `--pretty`)
//! - `RUST_LOG` - log filter

use anyhow::{bail, Context, Result};
use cim_ipam::domain::{DeviceId, ScopeRef, SiteId, VirtualMachineId};
use cim_ipam::service::{IpamQueryService, SnapshotIpamService, VlanQuery};
use cim_ipam::store::Snapshot;
use cim_ipam::ResolverConfig;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "ipam-resolve", version, about = "Resolve IPAM hierarchy and visibility queries")]
struct Cli {
    /// Path to the JSON snapshot
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// Skip reference validation when loading the snapshot
    #[arg(long, global = true)]
    no_strict: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Annotate every prefix with depth and child count
    Prefixes,
    /// List VLANs visible from a site, device or virtual machine
    Vlans(VlansArgs),
    /// List the ancestors of a topology scope
    Scopes(ScopesArgs),
    /// Count ASNs in every ASN range
    AsnRanges,
    /// Report VLAN group utilization
    VlanGroups,
}

#[derive(Debug, Args)]
struct VlansArgs {
    #[arg(long, conflicts_with_all = ["device", "vm"])]
    site: Option<u32>,
    #[arg(long, conflicts_with = "vm")]
    device: Option<u32>,
    #[arg(long)]
    vm: Option<u32>,
    /// Include the matched scope set in the output
    #[arg(long)]
    explain: bool,
}

#[derive(Debug, Args)]
struct ScopesArgs {
    /// Scope kind, e.g. `region`, `dcim.sitegroup`, `virtualization.cluster`
    #[arg(long)]
    kind: String,
    #[arg(long)]
    id: u32,
    #[arg(long)]
    include_self: bool,
}

impl VlansArgs {
    fn query(&self) -> Result<VlanQuery> {
        match (self.site, self.device, self.vm) {
            (Some(id), None, None) => Ok(VlanQuery::Site(SiteId(id))),
            (None, Some(id), None) => Ok(VlanQuery::Device(DeviceId(id))),
            (None, None, Some(id)) => Ok(VlanQuery::VirtualMachine(VirtualMachineId(id))),
            _ => bail!("exactly one of --site, --device or --vm is required"),
        }
    }
}

#[derive(Serialize)]
struct VlansOutput<'a> {
    query: VlanQuery,
    vlans: Vec<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scopes: Option<&'a [ScopeRef]>,
}

fn load_config(cli: &Cli) -> Result<ResolverConfig> {
    let mut config = ResolverConfig::from_env().context("Invalid IPAM environment configuration")?;
    if let Some(path) = &cli.snapshot {
        config.snapshot_path = path.clone();
    }
    if cli.pretty {
        config.pretty_output = true;
    }
    if cli.no_strict {
        config.strict_references = false;
    }
    Ok(config)
}

fn emit(value: &impl Serialize, pretty: bool) -> Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("Failed to serialize output")?;
    println!("{}", rendered);
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    info!(
        snapshot = %config.snapshot_path.display(),
        strict = config.strict_references,
        "Loading snapshot"
    );
    let snapshot = Snapshot::from_path(&config.snapshot_path)
        .with_context(|| format!("Failed to load snapshot {}", config.snapshot_path.display()))?;
    let service = SnapshotIpamService::build(snapshot, config.strict_references)
        .context("Failed to build IPAM indexes")?;

    let pretty = config.pretty_output;
    match &cli.command {
        Command::Prefixes => emit(&service.prefix_hierarchy(), pretty),
        Command::Vlans(args) => {
            let query = args.query()?;
            let vlans = service.vlans_for(query)?;
            let scopes: Option<Vec<ScopeRef>> = if args.explain {
                Some(service.visible_scopes(query)?.scopes.into_iter().collect())
            } else {
                None
            };
            emit(
                &VlansOutput {
                    query,
                    vlans: vlans.into_iter().map(|id| id.value()).collect(),
                    scopes: scopes.as_deref(),
                },
                pretty,
            )
        }
        Command::Scopes(args) => {
            let scope = ScopeRef::from_parts(&args.kind, args.id)?;
            let ancestors = service.ancestors(scope, args.include_self)?;
            emit(&ancestors, pretty)
        }
        Command::AsnRanges => emit(&service.asn_range_counts(), pretty),
        Command::VlanGroups => emit(&service.vlan_group_utilization(), pretty),
    }
}
