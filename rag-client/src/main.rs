//! Command-line client for the document Q&A service.

mod cli;
mod output;
mod progress;
mod requests;

use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use serde_json::Value;

use crate::cli::{Cli, Command};
use crate::progress::Spinner;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Command::MockEvent {
        path,
        filename,
        output,
    } = &cli.command
    {
        requests::write_mock_event(path, filename, output)?;
        println!("Event written to {}", output.display());
        return Ok(());
    }

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(cli.timeout_secs))
        .build()
        .context("building HTTP client")?;
    let base = cli.api_url.trim_end_matches('/');

    if let Command::Heartbeat = cli.command {
        let res = client
            .get(format!("{base}{}", requests::HEARTBEAT))
            .send()
            .await
            .with_context(|| format!("GET {base}{}", requests::HEARTBEAT))?;
        let data: Value = res.json().await.context("decoding heartbeat response")?;
        println!("{data}");
        return Ok(());
    }

    let (route, payload, request_body) = match &cli.command {
        Command::Ask { query, k } => (requests::ASK, requests::ask(query, *k), query.clone()),
        Command::AskNoRef { query } => {
            (requests::ASK_NO_REF, requests::ask_no_ref(query), query.clone())
        }
        Command::Add { path } => (
            requests::ADD,
            requests::add_file(path, None)?,
            path.display().to_string(),
        ),
        Command::Heartbeat | Command::MockEvent { .. } => bail!("handled above"),
    };

    let url = format!("{base}{route}");
    let spinner = Spinner::start(&format!("POST {url}"));
    let sent = client.post(&url).json(&payload).send().await;
    spinner.finish();

    let res = sent.with_context(|| format!("POST {url}"))?;
    let status = res.status();
    let mut data: Value = res
        .json()
        .await
        .with_context(|| format!("decoding response from {url} (HTTP {status})"))?;
    output::normalize_references(&mut data);

    output::print_response(&data);
    let saved = output::save_response(
        &cli.responses_dir,
        data,
        cli.command.request_type(),
        &request_body,
    )?;
    println!("Response saved to {}", saved.display().to_string().bold());

    if !status.is_success() {
        bail!("request failed with HTTP {status}");
    }
    Ok(())
}
