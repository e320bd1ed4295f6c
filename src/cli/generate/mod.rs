//! One-shot generation from the command line

use anyhow::{bail, Context};
use clap::Args;

use crate::config::AppConfig;
use crate::domain::{ContextValue, PromptContext};

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Template id, e.g. character_description
    #[arg(long, short)]
    pub template: String,

    /// Context field as name=value; repeatable
    #[arg(long = "field", short = 'f', value_name = "NAME=VALUE")]
    pub fields: Vec<String>,

    /// Configured provider name (defaults to the configured default)
    #[arg(long, short)]
    pub provider: Option<String>,
}

/// Runs the pipeline once and prints the result as JSON
pub async fn run(config: &AppConfig, args: GenerateArgs) -> anyhow::Result<()> {
    let context = parse_fields(&args.fields)?;
    let service = crate::create_generation_service(config)?;
    let registry = config.provider_registry()?;
    let provider = registry.resolve(args.provider.as_deref())?;

    let result = service.generate(&context, &args.template, provider).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}

/// Builds a context from `name=value` pairs; later pairs win
pub fn parse_fields(fields: &[String]) -> anyhow::Result<PromptContext> {
    fields
        .iter()
        .map(|field| {
            let (name, value) = field
                .split_once('=')
                .with_context(|| format!("Field '{}' is not in NAME=VALUE form", field))?;

            let name = name.trim();
            if name.is_empty() {
                bail!("Field '{}' has an empty name", field);
            }

            Ok((name.to_string(), parse_value(value)))
        })
        .collect()
}

fn parse_value(raw: &str) -> ContextValue {
    let trimmed = raw.trim();

    if let Ok(n) = trimmed.parse::<i64>() {
        return ContextValue::Integer(n);
    }

    match trimmed.parse::<f64>() {
        Ok(f) if f.is_finite() => ContextValue::Float(f),
        _ => ContextValue::Text(raw.to_string()),
    }
}
