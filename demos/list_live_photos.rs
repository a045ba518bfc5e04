/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

extern crate onfido;

use anyhow::Result;
use dotenvy::dotenv;
use onfido::v2::{Client, Config, LivePhoto};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

// Lists the live photos of an applicant and downloads the first one found.
// Expects ONFIDO_API_TOKEN and ONFIDO_APPLICANT_ID (optionally ONFIDO_DOWNLOAD_DIR) in the
// environment or a .env file.
#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();

    let client = Client::new(Config::from_env()?)?;
    let applicant_id = std::env::var("ONFIDO_APPLICANT_ID")?;
    let download_dir = std::env::var("ONFIDO_DOWNLOAD_DIR").ok().map(PathBuf::from);

    // Ctrl-C stops whatever request is in flight
    let cancel = CancellationToken::new();
    let ctrl_c_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c_token.cancel();
        }
    });

    let mut photos = LivePhoto::list(client.clone(), &applicant_id)?;
    let mut first_id = None;
    while photos.advance(&cancel).await {
        let photo = photos.current()?;
        println!(
            "Found live photo: {} name: {} size: {}",
            photo.id,
            photo.file_name.as_deref().unwrap_or("-"),
            photo.file_size.unwrap_or_default()
        );
        first_id.get_or_insert_with(|| photo.id.clone());
    }
    if let Some(err) = photos.err() {
        anyhow::bail!("Listing live photos failed: {err}");
    }
    println!("Live photos listed: {}", photos.consumed());

    if let (Some(id), Some(dir)) = (first_id, download_dir) {
        let data = LivePhoto::download(client.clone(), &id, &cancel).await?;
        let path = dir.join(format!("{id}.jpg"));
        std::fs::write(&path, &data)?;
        println!("Downloaded {} bytes to {}", data.len(), path.display());
    }
    Ok(())
}
