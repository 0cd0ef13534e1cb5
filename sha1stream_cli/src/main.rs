use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use colored::*;
use sha1stream_cli::config::{AppConfig, ConfigManager, get_config};
use sha1stream_cli::error::{CliError, CliResult, ExitCode};
use sha1stream_cli::output::{OutputFormat, create_formatter, group_digest};
use sha1stream_cli::{progress, terminal};
use sha1stream_core::progress::{NullProvider, ProgressProvider};
use sha1stream_core::{Digest, FileProcessingResult, FileProcessor};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Path argument that selects standard input
const STDIN_PATH: &str = "-";

#[derive(Parser)]
#[command(name = "sha1stream")]
#[command(author, version, about = "Streaming SHA-1 digests for files of any size", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the SHA-1 digest of each file
    Hash {
        /// Files to hash ('-' reads standard input)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output format (defaults to output.default_format)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Bytes read per page (defaults to hashing.buffer_size)
        #[arg(short, long, value_name = "BYTES")]
        buffer_size: Option<usize>,

        /// Print the digest as one unbroken hex string
        #[arg(long)]
        no_group: bool,

        /// Report elapsed time and throughput on stderr
        #[arg(short, long)]
        time: bool,

        /// Disable progress bar display
        #[arg(long)]
        no_progress: bool,
    },

    /// Check a file against an expected digest
    Verify {
        /// File to hash ('-' reads standard input)
        file: PathBuf,

        /// Expected digest, 40 hex digits (spaces allowed)
        expected: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Get a configuration value
    Get {
        /// Configuration key (e.g., hashing.buffer_size)
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., hashing.buffer_size)
        key: String,

        /// Value to set
        value: String,
    },

    /// List all configuration values
    List,

    /// Print the configuration file path
    Path,
}

/// Options of the hash command after config and flags are merged
struct HashOptions {
    format: OutputFormat,
    grouped: bool,
    show_timing: bool,
    show_progress: bool,
    use_color: bool,
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    if cli.debug {
        env_logger::Builder::from_env(env_logger::Env::default())
            .filter_level(log::LevelFilter::Debug)
            .filter_module("sha1stream_core", log::LevelFilter::Debug)
            .filter_module("sha1stream_cli", log::LevelFilter::Debug)
            .format_timestamp_millis()
            .init();
        eprintln!("Debug logging enabled");
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    match run(cli.command).await {
        Ok(code) => code.into(),
        Err(error) => {
            eprint!("{}", error.format_for_user(cli.debug));
            error.exit_code().into()
        }
    }
}

async fn run(command: Commands) -> CliResult<ExitCode> {
    match command {
        Commands::Hash {
            files,
            format,
            buffer_size,
            no_group,
            time,
            no_progress,
        } => {
            let mut config = load_config()?;
            config.apply_cli_overrides(buffer_size);
            config.hashing.validate()?;

            let format = match format {
                Some(format) => format,
                None => OutputFormat::from_string(&config.output.default_format)
                    .map_err(|e| CliError::misuse(&format!("output.default_format: {e}")))?,
            };
            let options = HashOptions {
                format,
                grouped: config.output.group_digest && !no_group,
                show_timing: time || config.output.show_timing,
                show_progress: !no_progress
                    && config.output.progress_enabled
                    && terminal::should_show_progress_by_default(),
                use_color: terminal::should_use_color(config.output.color_enabled),
            };
            hash_command(&config, &files, &options).await
        }
        Commands::Verify { file, expected } => verify_command(&file, &expected).await,
        Commands::Config { command } => {
            config_command(command).map_err(|e| CliError::misuse(&format!("{e:#}")))?;
            Ok(ExitCode::Success)
        }
        Commands::Completions { shell } => {
            generate_completions(shell);
            Ok(ExitCode::Success)
        }
    }
}

fn load_config() -> CliResult<AppConfig> {
    get_config().map_err(|e| CliError::misuse(&format!("{e:#}")))
}

async fn hash_command(
    config: &AppConfig,
    files: &[PathBuf],
    options: &HashOptions,
) -> CliResult<ExitCode> {
    if !options.use_color {
        colored::control::set_override(false);
    }

    let processor = FileProcessor::new(config.hashing.clone());

    let (progress_provider, progress_rx) = if options.show_progress {
        let (provider, rx) = progress::create_progress_infrastructure();
        (provider, Some(rx))
    } else {
        (Arc::new(NullProvider) as Arc<dyn ProgressProvider>, None)
    };
    let progress_handle = progress_rx.map(|rx| tokio::spawn(progress::render_progress(rx)));

    let total_start = Instant::now();
    let mut results = Vec::with_capacity(files.len());
    let mut failure = None;

    for file in files {
        match hash_one(&processor, file, progress_provider.as_ref()).await {
            Ok(result) => results.push(result),
            Err(error) => {
                failure = Some(error);
                break;
            }
        }
    }

    // Signal completion so the renderer can exit its loop
    progress_provider.complete();
    if let Some(handle) = progress_handle {
        let _ = handle.await;
    }

    if let Some(error) = failure {
        return Err(error);
    }

    let formatter = create_formatter(options.format, options.use_color, options.grouped);
    let rendered = match options.format {
        OutputFormat::Json if results.len() == 1 => formatter.format_single(&results[0])?,
        _ => formatter.format_batch(&results)?,
    };
    println!("{rendered}");

    if options.show_timing {
        report_timing(&results, total_start.elapsed());
    }

    Ok(ExitCode::Success)
}

async fn hash_one(
    processor: &FileProcessor,
    file: &Path,
    progress_provider: &dyn ProgressProvider,
) -> CliResult<FileProcessingResult> {
    if file.as_os_str() == STDIN_PATH {
        let start = Instant::now();
        let config = processor.config().clone();
        // Stdin has no async reader; keep the blocking loop off the runtime workers
        let (digest, file_size) = tokio::task::spawn_blocking(move || {
            FileProcessor::new(config).process_reader(std::io::stdin().lock())
        })
        .await
        .context("Standard input reader task failed")?
        .context("Failed to read standard input")?;
        return Ok(FileProcessingResult {
            file_path: PathBuf::from(STDIN_PATH),
            file_size,
            digest,
            processing_time: start.elapsed(),
        });
    }

    log::debug!("Hashing {}", file.display());
    Ok(processor.process_file(file, progress_provider).await?)
}

fn report_timing(results: &[FileProcessingResult], total: Duration) {
    for result in results {
        let throughput = result
            .throughput_mbps()
            .map(progress::format_rate)
            .unwrap_or_else(|| "n/a".to_string());
        eprintln!(
            "{}: {} in {} ({})",
            result.file_path.display(),
            progress::format_size(result.file_size),
            progress::format_elapsed(result.processing_time),
            throughput
        );
    }

    if results.len() > 1 {
        let total_size: u64 = results.iter().map(|r| r.file_size).sum();
        eprintln!(
            "{} {} file(s), {} in {}",
            "Total:".bold(),
            results.len(),
            progress::format_size(total_size),
            progress::format_elapsed(total)
        );
    }
}

async fn verify_command(file: &Path, expected: &str) -> CliResult<ExitCode> {
    let expected: Digest = expected.parse()?;
    let config = load_config()?;
    config.hashing.validate()?;

    let processor = FileProcessor::new(config.hashing);
    let result = hash_one(&processor, file, &NullProvider).await?;

    if result.digest == expected {
        println!("{}: {}", file.display(), "OK".green());
        Ok(ExitCode::Success)
    } else {
        println!("{}: {}", file.display(), "FAILED".red());
        eprintln!("  expected: {}", group_digest(&expected, true));
        eprintln!("  actual:   {}", group_digest(&result.digest, true));
        Ok(ExitCode::GeneralError)
    }
}

fn config_command(command: ConfigCommand) -> anyhow::Result<()> {
    let mut manager = ConfigManager::new();

    match command {
        ConfigCommand::Get { key } => {
            println!("{}", manager.get(&key)?);
        }
        ConfigCommand::Set { key, value } => {
            manager.set(&key, &value)?;
            eprintln!("{}", format!("Set {key} = {value}").green());
            eprintln!(
                "Configuration saved to: {}",
                manager.get_config_path().display()
            );
        }
        ConfigCommand::List => {
            eprintln!("{}", "Configuration:".bold().blue());
            eprintln!("Config file: {}", manager.get_config_path().display());

            // Items arrive sorted, so sections stay together
            let mut current_section: Option<String> = None;
            for (key, value) in manager.list()? {
                let (section, name) = key.split_once('.').unwrap_or(("general", key.as_str()));
                if current_section.as_deref() != Some(section) {
                    println!("[{}]", section.yellow());
                    current_section = Some(section.to_string());
                }
                println!("  {} = {}", name.cyan(), value);
            }
        }
        ConfigCommand::Path => {
            println!("{}", manager.get_config_path().display());
        }
    }

    Ok(())
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();

    generate(shell, &mut cmd, name, &mut std::io::stdout());
}
