/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! # Onfido
//!
//! This library was created for working with the Onfido API v2 identity verification interface.
//!
//! For further details on the Rest API refer to the [Onfido API Docs](https://documentation.onfido.com/v2/)
//!
//! ## Features
//!
//! - Live photos
//!     - Upload a live photo for an applicant
//!     - Retrieve a live photo and download its file
//!     - List the live photos of an applicant
//! - Generic pager for the paginated list endpoints
//! - Lower level interface for handling the raw communication
//!
//! *Every call takes a [`tokio_util::sync::CancellationToken`]. Cancelling it aborts the request in
//! flight and the call returns [`v2::OnfidoError::Cancelled`].*
//!
//! *If you want to use this library for more that is currently implemented, the
//! [`v2::ApiClient`] is a way to make request/responses in a more direct way*
//!
//! ## Installation
//!
//! ```toml
//! [dependencies]
//! onfido = "0.1.0"
//! ```
//!
//! ## Usage
//!
//! **You will need an API token from the Onfido dashboard prior to using the API**
//!
//! ```rust,no_run
//! use onfido::v2::{Client, Config, LivePhoto, LivePhotoFile, LivePhotoUpload};
//! use tokio_util::sync::CancellationToken;
//!
//!async fn upload_and_list(api_token: &str, applicant_id: &str) -> anyhow::Result<()> {
//!    let client = Client::new(Config::from_token(api_token))?;
//!    let cancel = CancellationToken::new();
//!
//!    // Upload a selfie for the applicant
//!    let file = LivePhotoFile::from_reader("selfie.jpg", std::fs::File::open("selfie.jpg")?)?;
//!    let photo = LivePhoto::upload(client.clone(), LivePhotoUpload::new(applicant_id, file), &cancel).await?;
//!    println!("Uploaded: {}", photo.id);
//!
//!    // Walk all the live photos of the applicant
//!    let mut photos = LivePhoto::list(client.clone(), applicant_id)?;
//!    while photos.advance(&cancel).await {
//!        let photo = photos.current()?;
//!        println!("{} {:?} {:?}", photo.id, photo.file_name, photo.file_size);
//!    }
//!    if let Some(err) = photos.err() {
//!        anyhow::bail!("listing failed: {err}");
//!    }
//!    Ok(())
//!}
//! ```
//!
pub mod v2;
