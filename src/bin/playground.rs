//! Playground CLI - run and prove stack assembly programs
//!
//! Usage:
//!   playground <file> [--inputs <json>] [--prove] [--url <url>] [--verbose]
//!
//! Example:
//!   playground add.masm --inputs '{"operand_stack": ["10", "20"]}'
//!   playground fib.masm --prove --url http://localhost:3000

use anyhow::{bail, Context, Result};
use colored::Colorize;
use playground::{PlaygroundClient, PlaygroundConfig};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn print_usage() {
    eprintln!(
        r#"
{} - Run and prove stack assembly programs against a playground service

{}
    playground <FILE> [OPTIONS]
    playground --list-examples [OPTIONS]

{}
    <FILE>     Path to the assembly program to run

{}
    -i, --inputs <JSON>     Initial operand stack, e.g. '{{"operand_stack": ["10", "20"]}}'
    -p, --prove             Generate an execution proof instead of just running
    -u, --url <URL>         Service base URL (default: http://localhost:3000)
    -c, --config <PATH>     TOML config file
    -l, --list-examples     List the example catalog and exit
    -v, --verbose           Show debug logging
    -h, --help              Print this help message

{}
    playground add.masm
    playground add.masm -i '{{"operand_stack": ["10", "20"]}}'
    playground fib.masm --prove -u http://localhost:3000
"#,
        "Playground CLI".bold(),
        "USAGE:".bold(),
        "ARGS:".bold(),
        "OPTIONS:".bold(),
        "EXAMPLES:".bold(),
    );
}

struct CliArgs {
    file: Option<PathBuf>,
    inputs: String,
    prove: bool,
    url: Option<String>,
    config: Option<PathBuf>,
    list_examples: bool,
    verbose: bool,
}

fn parse_args() -> Result<CliArgs> {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        std::process::exit(0);
    }

    let mut file = None;
    let mut inputs = String::new();
    let mut prove = false;
    let mut url = None;
    let mut config = None;
    let mut list_examples = false;
    let mut verbose = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--inputs" | "-i" => {
                i += 1;
                inputs = args
                    .get(i)
                    .context("--inputs requires a JSON argument")?
                    .clone();
            }
            "--url" | "-u" => {
                i += 1;
                url = Some(args.get(i).context("--url requires an argument")?.clone());
            }
            "--config" | "-c" => {
                i += 1;
                config = Some(PathBuf::from(
                    args.get(i).context("--config requires a path")?,
                ));
            }
            "--prove" | "-p" => prove = true,
            "--list-examples" | "-l" => list_examples = true,
            "--verbose" | "-v" => verbose = true,
            other if file.is_none() && !other.starts_with('-') => {
                file = Some(PathBuf::from(other));
            }
            other => bail!("Unknown argument: {other}"),
        }
        i += 1;
    }

    if file.is_none() && !list_examples {
        print_usage();
        std::process::exit(1);
    }

    Ok(CliArgs {
        file,
        inputs,
        prove,
        url,
        config,
        list_examples,
        verbose,
    })
}

fn load_config(args: &CliArgs) -> Result<PlaygroundConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        }
        None => PlaygroundConfig::default(),
    };
    if let Some(url) = &args.url {
        config.base_url = url.clone();
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = parse_args()?;

    let level = if args.verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = load_config(&args)?;
    let client = PlaygroundClient::new(&config, None);

    if config.probe_on_startup && !client.probe_connectivity().await {
        bail!(
            "Cannot reach the playground service at {} (is it running?)",
            config.base_url
        );
    }

    if args.list_examples {
        let examples = client.load_examples().await;
        println!("{}", "Available examples:".bold());
        for entry in &examples {
            if entry.inputs.is_empty() {
                println!("  {}", entry.name);
            } else {
                println!(
                    "  {} {}",
                    entry.name,
                    format!("(inputs: {:?})", entry.inputs.operand_stack).dimmed()
                );
            }
        }
        return Ok(());
    }

    let file = args.file.expect("checked in parse_args");
    let program = std::fs::read_to_string(&file)
        .with_context(|| format!("Failed to read program file: {}", file.display()))?;

    if args.prove {
        let result = client.prove(&program, &args.inputs).await;
        if !result.success {
            bail!(
                "Proof generation failed: {}",
                result.error.unwrap_or_default()
            );
        }
        println!("{}", "Proof generated".green().bold());
        print_stack(result.stack_outputs.as_deref());
        if let Some(hash) = &result.program_hash {
            println!("{} {hash}", "Program hash:".bold());
        }
        if let Some(bytes) = &result.proof_bytes {
            println!("{} {} bytes", "Proof size:".bold(), bytes.len());
            println!("{} {}", "Proof data:".bold(), hex_preview(bytes));
        }
        print_timing("Compilation", result.compilation_time_ms);
        print_timing("Proving", result.proving_time_ms);
        print_timing("Total", result.total_time_ms);
    } else {
        let result = client.run(&program, &args.inputs).await;
        if !result.success {
            bail!("Execution failed: {}", result.error.unwrap_or_default());
        }
        println!("{}", "Execution succeeded".green().bold());
        print_stack(result.stack_outputs.as_deref());
        if let Some(hash) = &result.program_hash {
            println!("{} {hash}", "Program hash:".bold());
        }
        if let Some(cycles) = result.cycles {
            println!("{} {cycles}", "Cycles:".bold());
        }
        print_timing("Compilation", result.compilation_time_ms);
        print_timing("Execution", result.execution_time_ms);
        print_timing("Total", result.total_time_ms);
    }

    Ok(())
}

fn print_stack(outputs: Option<&[String]>) {
    match outputs {
        Some(values) if !values.is_empty() => {
            println!("{}", "Stack outputs:".bold());
            for (idx, value) in values.iter().enumerate() {
                println!("  [{idx}] {value}");
            }
        }
        _ => println!("{}", "Stack is empty".dimmed()),
    }
}

fn print_timing(label: &str, time_ms: Option<f64>) {
    if let Some(ms) = time_ms {
        println!("{} {ms:.2}ms", format!("{label}:").bold());
    }
}

/// First 64 hex chars of the proof, matching the playground's preview
fn hex_preview(bytes: &[u8]) -> String {
    let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    if hex.len() > 64 {
        format!("{}...", &hex[..64])
    } else {
        hex
    }
}
