//! bedrock-infer - batch inference against AWS Bedrock
//!
//! Runs a prompt batch through the Bedrock adapter and prints one JSON line
//! per output, in prompt order.

#![allow(missing_docs)]

use anyhow::{Context, Result, bail};
use bedrock_extract::{
    EnvSettings, ModelConfig, PROVIDER_NAME, create_model,
    register_bedrock_provider_globally,
};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Batch inference against AWS Bedrock
#[derive(Debug, Parser)]
#[command(name = "bedrock-infer", version, about)]
struct Cli {
    /// `.env` file with AWS_PROFILE, AWS_REGION, BEDROCK_MODEL_ID and keys
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Bedrock model id, e.g. bedrock:anthropic.claude-3-haiku-20240307-v1:0
    #[arg(long, env = "BEDROCK_MODEL_ID")]
    model: Option<String>,

    /// AWS region
    #[arg(long)]
    region: Option<String>,

    /// Named AWS profile
    #[arg(long)]
    profile: Option<String>,

    #[arg(long)]
    temperature: Option<f32>,

    #[arg(long)]
    max_tokens: Option<u32>,

    #[arg(long)]
    top_p: Option<f32>,

    /// JSON Schema file; implies --structured
    #[arg(long)]
    schema: Option<PathBuf>,

    /// Return JSON instead of text
    #[arg(long)]
    structured: bool,

    /// Read prompts from a file, one per line
    #[arg(long)]
    prompts_file: Option<PathBuf>,

    /// Prompts to run
    prompts: Vec<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so stdout stays JSONL
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let settings = match &cli.env_file {
        Some(path) => EnvSettings::from_path(path)?,
        None => EnvSettings::default(),
    };

    let config = build_config(&cli, &settings).await?;
    let prompts = collect_prompts(&cli).await?;
    if prompts.is_empty() {
        bail!("no prompts given; pass them as arguments or with --prompts-file");
    }

    register_bedrock_provider_globally()?;
    let model = create_model(config).await?;
    info!(model_id = model.model_id(), prompts = prompts.len(), "Running batch");

    let outputs = model.infer(&prompts, None).await?;
    for output in &outputs {
        println!("{}", serde_json::to_string(output)?);
    }
    Ok(())
}

async fn build_config(cli: &Cli, settings: &EnvSettings) -> Result<ModelConfig> {
    let mut config = match &cli.model {
        Some(model_id) => {
            let mut config = ModelConfig::new(model_id);
            config.region = settings.region().map(str::to_string);
            config.profile = settings.profile().map(str::to_string);
            if let (Some(access_key), Some(secret_key)) =
                (settings.access_key_id(), settings.secret_access_key())
            {
                config = config.with_static_credentials(
                    access_key,
                    secret_key,
                    settings.session_token().map(str::to_string),
                );
            }
            config
        }
        None => ModelConfig::from_env_settings(settings)
            .context("no model id; pass --model or set BEDROCK_MODEL_ID")?,
    };

    // The binary only serves Bedrock, so route by name rather than pattern
    config.provider = Some(PROVIDER_NAME.to_string());

    if let Some(region) = &cli.region {
        config.region = Some(region.clone());
    }
    if let Some(profile) = &cli.profile {
        config.profile = Some(profile.clone());
    }
    if let Some(temperature) = cli.temperature {
        config.temperature = temperature;
    }
    if let Some(max_tokens) = cli.max_tokens {
        config.max_output_tokens = max_tokens;
    }
    if let Some(top_p) = cli.top_p {
        config.top_p = top_p;
    }

    if let Some(path) = &cli.schema {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read schema file {}", path.display()))?;
        let schema = serde_json::from_str(&content)
            .with_context(|| format!("schema file {} is not valid JSON", path.display()))?;
        config = config.with_structured_output(Some(schema));
    } else if cli.structured {
        config = config.with_structured_output(None);
    }

    config.check()?;
    debug!(?config, "Model configuration");
    Ok(config)
}

async fn collect_prompts(cli: &Cli) -> Result<Vec<String>> {
    let mut prompts = cli.prompts.clone();
    if let Some(path) = &cli.prompts_file {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read prompts file {}", path.display()))?;
        prompts.extend(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string),
        );
    }
    Ok(prompts)
}
