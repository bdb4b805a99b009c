use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;

use dynamic_config_engine::{Cluster, Node, Stripe};

/// dynamic-config - apply configuration expressions to a cluster topology
#[derive(Parser)]
#[command(name = "dynamic-config")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose (debug-level) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply every expression in a property file to a freshly shaped cluster
    Apply {
        /// Path to a file of newline-separated expressions
        file: PathBuf,

        /// Number of stripes in the topology
        #[arg(long, default_value_t = 1)]
        stripes: usize,

        /// Number of nodes per stripe
        #[arg(long, default_value_t = 1)]
        nodes_per_stripe: usize,

        /// Stop at the first error instead of reporting all and continuing
        #[arg(long)]
        fail_fast: bool,

        /// Print the resulting topology as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Parse every expression in a file and report validation errors, without applying them
    Check {
        /// Path to a file of newline-separated expressions
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Apply { file, stripes, nodes_per_stripe, fail_fast, json } => {
            apply_command(&file, stripes, nodes_per_stripe, fail_fast, json)
        }
        Commands::Check { file } => check_command(&file),
    }
}

fn read_expressions(file: &PathBuf) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

fn apply_command(
    file: &PathBuf,
    stripes: usize,
    nodes_per_stripe: usize,
    fail_fast: bool,
    json: bool,
) -> Result<()> {
    let lines = read_expressions(file)?;
    let mut cluster = Cluster::with_shape(stripes, nodes_per_stripe);

    let mut applied = 0;
    let mut failed = 0;

    for line in &lines {
        match dynamic_config_parser::parse(line).and_then(|expr| {
            dynamic_config_engine::apply(&mut cluster, &expr)?;
            Ok(expr)
        }) {
            Ok(expr) => {
                applied += 1;
                tracing::debug!(expr = %expr.to_text(), "applied");
            }
            Err(err) => {
                failed += 1;
                eprintln!("{} {}: {}", "error:".red().bold(), line, err);
                if fail_fast {
                    anyhow::bail!("aborting after first error ({} applied)", applied);
                }
            }
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&cluster)?);
    } else {
        print_cluster_summary(&cluster);
    }

    println!();
    println!("{} {} applied, {} failed", "Summary:".bold(), applied.to_string().green(), failed.to_string().red());

    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn check_command(file: &PathBuf) -> Result<()> {
    let lines = read_expressions(file)?;
    let mut ok = 0;
    let mut failed = 0;

    for line in &lines {
        match dynamic_config_parser::parse(line) {
            Ok(expr) => {
                ok += 1;
                println!("{} {}", "ok:".green(), expr.to_text());
            }
            Err(err) => {
                failed += 1;
                println!("{} {}: {}", "error:".red().bold(), line, err);
            }
        }
    }

    println!();
    println!("{} {} ok, {} failed", "Summary:".bold(), ok.to_string().green(), failed.to_string().red());

    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn print_cluster_summary(cluster: &Cluster) {
    println!("{}", "Cluster".bold().cyan());
    if let Some(name) = &cluster.name {
        println!("  name: {name}");
    }
    if !cluster.offheap_resources.is_empty() {
        println!("  offheap-resources:");
        for (key, value) in &cluster.offheap_resources {
            println!("    {key} = {value}");
        }
    }
    for (i, stripe) in cluster.stripes.iter().enumerate() {
        print_stripe_summary(i + 1, stripe);
    }
}

fn print_stripe_summary(stripe_id: usize, stripe: &Stripe) {
    println!("  {} {stripe_id}", "Stripe".bold());
    for (i, node) in stripe.nodes.iter().enumerate() {
        print_node_summary(i + 1, node);
    }
}

fn print_node_summary(node_id: usize, node: &Node) {
    println!("    {} {node_id}", "Node".bold());
    if let Some(name) = &node.name {
        println!("      node-name: {name}");
    }
    if let Some(backup_dir) = &node.backup_dir {
        println!("      backup-dir: {backup_dir}");
    }
    if let Some(metadata_dir) = &node.metadata_dir {
        println!("      metadata-dir: {metadata_dir}");
    }
    if !node.data_dirs.is_empty() {
        println!("      data-dirs:");
        for (key, value) in &node.data_dirs {
            println!("        {key} = {value}");
        }
    }
}
