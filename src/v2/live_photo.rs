/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v2::errors::OnfidoError;
use crate::v2::macros::{list_envelope, obj_url};
use crate::v2::pager::{Pager, decode_envelope};
use crate::v2::parsers::from_empty_str_to_none;
use crate::v2::{Client, FilePart, MultipartForm};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use tokio_util::sync::CancellationToken;

/// Holds information returned from the Live Photo API.
///
/// See [Onfido API Docs](https://documentation.onfido.com/v2/#live-photos) for more
/// details on the individual fields.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct LivePhoto {
    #[serde(default)]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(
        default,
        deserialize_with = "from_empty_str_to_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub href: Option<String>,

    #[serde(
        default,
        deserialize_with = "from_empty_str_to_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub download_href: Option<String>,

    #[serde(
        default,
        deserialize_with = "from_empty_str_to_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub file_name: Option<String>,

    #[serde(
        default,
        deserialize_with = "from_empty_str_to_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub file_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u32>,
}

/// Pager over the live photos of an applicant
pub type LivePhotoPager = Pager<LivePhoto>;

list_envelope!(LivePhotosEnvelope, "live_photos", LivePhoto);

impl LivePhoto {
    const BASE_URI: &'static str = "live_photos";

    /// Uploads a live photo for an applicant
    pub async fn upload(
        client: Client,
        upload: LivePhotoUpload,
        cancel: &CancellationToken,
    ) -> Result<Self, OnfidoError> {
        let form = upload.into_form()?;
        let req_url = client.api().url_for(Self::BASE_URI)?;
        let photo: LivePhoto = client.api().post_multipart(req_url, form, cancel).await?;
        debug!("Uploaded live photo {}", photo.id);
        Ok(photo)
    }

    /// Returns information for the specified live photo id
    pub async fn from_id(
        client: Client,
        id: &str,
        cancel: &CancellationToken,
    ) -> Result<Self, OnfidoError> {
        let req_url = obj_url!(client, Self::BASE_URI, id)?;
        client.api().get(req_url, cancel).await
    }

    /// Retrieves the file content of the specified live photo
    pub async fn download(
        client: Client,
        id: &str,
        cancel: &CancellationToken,
    ) -> Result<Bytes, OnfidoError> {
        let req_url = obj_url!(client, Self::BASE_URI, id, "download")?;
        client.api().get_bytes(req_url, cancel).await
    }

    /// Lists the live photos of an applicant. Pages are fetched as the pager advances.
    pub fn list(client: Client, applicant_id: &str) -> Result<LivePhotoPager, OnfidoError> {
        if applicant_id.is_empty() {
            return Err(OnfidoError::Encoding("applicant id is empty".into()));
        }
        let mut req_url = client.api().url_for(Self::BASE_URI)?;
        req_url
            .query_pairs_mut()
            .append_pair("applicant_id", applicant_id);
        Ok(Pager::new(
            client,
            req_url,
            decode_envelope::<LivePhotosEnvelope>,
        ))
    }
}

/// File content of a live photo to upload
#[derive(Clone)]
pub struct LivePhotoFile {
    pub file_name: String,
    /// Guessed from the file name when not set
    pub content_type: Option<String>,
    pub content: Bytes,
}

impl LivePhotoFile {
    pub fn new(file_name: &str, content: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            content: content.into(),
        }
    }

    /// Reads the whole content from the reader
    pub fn from_reader(file_name: &str, mut reader: impl Read) -> Result<Self, OnfidoError> {
        let mut content = Vec::new();
        reader.read_to_end(&mut content)?;
        Ok(Self::new(file_name, content))
    }

    pub fn with_content_type(mut self, content_type: &str) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    fn resolved_content_type(&self) -> String {
        if let Some(content_type) = &self.content_type {
            return content_type.clone();
        }
        let ext = Path::new(&self.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("png") => "image/png",
            _ => "application/octet-stream",
        }
        .to_string()
    }
}

impl std::fmt::Debug for LivePhotoFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LivePhotoFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.content.len())
            .finish()
    }
}

/// Properties used when uploading a live photo
#[derive(Debug, Clone)]
pub struct LivePhotoUpload {
    pub applicant_id: String,
    pub file: LivePhotoFile,
    /// Asks the service to validate that the photo contains exactly one face
    pub advanced_validation: Option<bool>,
}

impl LivePhotoUpload {
    pub fn new(applicant_id: &str, file: LivePhotoFile) -> Self {
        Self {
            applicant_id: applicant_id.into(),
            file,
            advanced_validation: None,
        }
    }

    fn into_form(self) -> Result<MultipartForm, OnfidoError> {
        if self.applicant_id.is_empty() {
            return Err(OnfidoError::Encoding("applicant id is empty".into()));
        }
        if self.file.file_name.is_empty() {
            return Err(OnfidoError::Encoding("file name is empty".into()));
        }
        let content_type = self.file.resolved_content_type();
        let mut form = MultipartForm::default()
            .file(FilePart {
                name: "file".into(),
                file_name: self.file.file_name,
                content_type,
                content: self.file.content,
            })
            .text("applicant_id", self.applicant_id);
        if let Some(advanced_validation) = self.advanced_validation {
            form = form.text("advanced_validation", advanced_validation.to_string());
        }
        Ok(form)
    }
}
