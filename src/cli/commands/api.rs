use clap::Args;
use reqwest::header::{HeaderName, HeaderValue};
use reqwest::Method;
use serde_json::json;

use crate::api::{format, RequestOptions};
use crate::cli::{Context, OutputFormat};

#[derive(Args)]
pub struct ApiArgs {
    #[arg(help = "HTTP method (GET, POST, PUT, PATCH, DELETE)")]
    pub method: String,
    #[arg(help = "Path relative to the API base, or an absolute URL")]
    pub target: String,
    #[arg(long, help = "JSON request body")]
    pub data: Option<String>,
    #[arg(short = 'H', long = "header", help = "Extra header as 'Name: value' (repeatable)")]
    pub headers: Vec<String>,
}

fn parse_header(raw: &str) -> anyhow::Result<(HeaderName, HeaderValue)> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| anyhow::anyhow!("Header '{}' must look like 'Name: value'", raw))?;
    Ok((
        HeaderName::from_bytes(name.trim().as_bytes())?,
        HeaderValue::from_str(value.trim())?,
    ))
}

pub fn build_options(args: &ApiArgs) -> anyhow::Result<RequestOptions> {
    let method = Method::from_bytes(args.method.to_ascii_uppercase().as_bytes())?;
    let mut options = RequestOptions::new(method);

    if let Some(data) = &args.data {
        let body: serde_json::Value = serde_json::from_str(data)?;
        options = options.json(&body)?;
    }

    for raw in &args.headers {
        let (name, value) = parse_header(raw)?;
        options = options.header(name, value);
    }

    Ok(options)
}

pub async fn handle(args: ApiArgs, ctx: &Context, output_format: OutputFormat) -> anyhow::Result<()> {
    let options = build_options(&args)?;
    let response = ctx.client.fetch(&args.target, options).await?;
    let status = response.status();
    let body = response.text().await?;

    match output_format {
        OutputFormat::Json => {
            let parsed = format::parse_lenient(body.as_bytes());
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({ "status": status.as_u16(), "body": parsed }))?
            );
        }
        OutputFormat::Text => {
            println!("HTTP {}", status);
            if !body.is_empty() {
                println!("{}", body);
            }
        }
    }

    if !status.is_success() {
        anyhow::bail!("Request failed with status {}", status);
    }
    Ok(())
}
