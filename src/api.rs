//! HTTP client for the montage service.
//!
//! Every endpoint answers with a JSON object carrying a `success` flag. Except
//! for the image listing, the status code is not inspected: a 400 or 401 with
//! a JSON body is an application-level failure, not a transport error.

use crate::session::mask_token;
use crate::utils::file_validation::image_mime_type;
use crate::video::{AudioMood, Resolution};
use anyhow::{Context, Result};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, error, info};

/// Body of `/signup` and `/login`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SignupResponse {
    pub success: bool,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoginResponse {
    pub success: bool,
    pub access_token: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ImagesResponse {
    pub success: bool,
    pub images: Vec<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UploadResponse {
    pub success: bool,
    pub image_url: Option<String>,
    pub message: Option<String>,
}

/// Body of `/create_video`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVideoRequest {
    pub image_urls: Vec<String>,
    pub resolution: Resolution,
    pub audio_mood: AudioMood,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateVideoResponse {
    pub success: bool,
    pub video_url: Option<String>,
    pub message: Option<String>,
}

/// A local file picked for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    path: PathBuf,
    name: String,
}

impl UploadFile {
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Self {
            path: path.to_path_buf(),
            name,
        }
    }

    /// File name the extension check and the multipart part use
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Remote operations the controller needs.
///
/// `Err` means the round trip itself failed (network, unreadable body, or a
/// non-2xx listing); `success:false` answers come back as `Ok`.
#[allow(async_fn_in_trait)]
pub trait Backend {
    async fn signup(&self, credentials: &Credentials) -> Result<SignupResponse>;

    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse>;

    async fn get_images(&self, token: &str) -> Result<ImagesResponse>;

    async fn upload(&self, token: &str, file: &UploadFile) -> Result<UploadResponse>;

    async fn create_video(
        &self,
        token: &str,
        request: &CreateVideoRequest,
    ) -> Result<CreateVideoResponse>;
}

/// `reqwest` implementation of [`Backend`]
#[derive(Debug, Clone)]
pub struct ApiClient {
    http_client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the service at `base_url` (e.g. `http://127.0.0.1:5000`)
    pub fn new(base_url: &str) -> Result<Self> {
        let http_client = Client::builder()
            .user_agent(concat!("montage/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        info!("Creating API client for {}", base_url);
        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of an endpoint path
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn bearer(token: &str) -> String {
        format!("Bearer {}", token)
    }

    /// Parse a `{success, ...}` body regardless of the status code
    async fn read_json<T: DeserializeOwned>(response: Response, endpoint: &str) -> Result<T> {
        let status = response.status();
        debug!("{} answered {}", endpoint, status);

        let body = response
            .text()
            .await
            .with_context(|| format!("Failed to read {} response", endpoint))?;

        serde_json::from_str(&body).with_context(|| {
            let preview: String = body.chars().take(200).collect();
            error!("{} returned a non-JSON body ({}): {}", endpoint, status, preview);
            format!("Unexpected response from {} ({})", endpoint, status)
        })
    }

    /// Stream a rendered video to `dest`, returning the number of bytes written
    pub async fn download(&self, url: &str, dest: &Path) -> Result<u64> {
        info!("Downloading {} to {:?}", url, dest);
        let mut response = self
            .http_client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to download {}", url))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Download failed ({}): {}", status, url);
        }

        if let Some(parent) = dest.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("Failed to create directory: {:?}", parent))?;
            }
        }

        // `dest` only changes once the whole body has arrived
        let partial = partial_path(dest);
        let written = match Self::stream_to_file(&mut response, &partial).await {
            Ok(written) => written,
            Err(e) => {
                if let Err(remove_err) = tokio::fs::remove_file(&partial).await {
                    debug!("No partial file to remove at {:?}: {}", partial, remove_err);
                }
                return Err(e);
            }
        };

        tokio::fs::rename(&partial, dest)
            .await
            .with_context(|| format!("Failed to move {:?} to {:?}", partial, dest))?;

        info!("Downloaded {} bytes", written);
        Ok(written)
    }

    async fn stream_to_file(response: &mut Response, path: &Path) -> Result<u64> {
        let mut file = tokio::fs::File::create(path)
            .await
            .with_context(|| format!("Failed to create file: {:?}", path))?;

        let mut written = 0u64;
        while let Some(chunk) = response
            .chunk()
            .await
            .context("Connection dropped during download")?
        {
            file.write_all(&chunk)
                .await
                .with_context(|| format!("Failed to write to {:?}", path))?;
            written += chunk.len() as u64;
        }
        file.flush().await?;
        Ok(written)
    }
}

/// `<dest>.part`, the file a download is streamed into
fn partial_path(dest: &Path) -> PathBuf {
    let mut name = dest
        .file_name()
        .map(std::ffi::OsStr::to_os_string)
        .unwrap_or_default();
    name.push(".part");
    dest.with_file_name(name)
}

impl Backend for ApiClient {
    async fn signup(&self, credentials: &Credentials) -> Result<SignupResponse> {
        info!("POST /signup (username={})", credentials.username);
        let response = self
            .http_client
            .post(self.url("/signup"))
            .json(credentials)
            .send()
            .await
            .context("Failed to reach /signup")?;

        Self::read_json(response, "/signup").await
    }

    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        info!("POST /login (username={})", credentials.username);
        let response = self
            .http_client
            .post(self.url("/login"))
            .json(credentials)
            .send()
            .await
            .context("Failed to reach /login")?;

        Self::read_json(response, "/login").await
    }

    async fn get_images(&self, token: &str) -> Result<ImagesResponse> {
        info!("GET /get_images (token {})", mask_token(token));
        let response = self
            .http_client
            .get(self.url("/get_images"))
            .header("Authorization", Self::bearer(token))
            .send()
            .await
            .context("Failed to reach /get_images")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("HTTP error! Status: {}", status.as_u16());
        }

        response
            .json()
            .await
            .context("Failed to parse /get_images response")
    }

    async fn upload(&self, token: &str, file: &UploadFile) -> Result<UploadResponse> {
        let bytes = tokio::fs::read(file.path())
            .await
            .with_context(|| format!("Failed to read file: {:?}", file.path()))?;

        info!(
            "POST /upload ({}, {} bytes, token {})",
            file.name(),
            bytes.len(),
            mask_token(token)
        );

        let part = Part::bytes(bytes)
            .file_name(file.name().to_string())
            .mime_str(image_mime_type(file.name()))
            .context("Invalid MIME type")?;
        let form = Form::new().part("file", part);

        let response = self
            .http_client
            .post(self.url("/upload"))
            .header("Authorization", Self::bearer(token))
            .multipart(form)
            .send()
            .await
            .context("Failed to reach /upload")?;

        Self::read_json(response, "/upload").await
    }

    async fn create_video(
        &self,
        token: &str,
        request: &CreateVideoRequest,
    ) -> Result<CreateVideoResponse> {
        info!(
            "POST /create_video ({} images, {}, {})",
            request.image_urls.len(),
            request.resolution,
            request.audio_mood
        );

        let response = self
            .http_client
            .post(self.url("/create_video"))
            .header("Authorization", Self::bearer(token))
            .json(request)
            .send()
            .await
            .context("Failed to reach /create_video")?;

        Self::read_json(response, "/create_video").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_video_request_wire_shape() {
        let request = CreateVideoRequest {
            image_urls: vec!["a.png".to_string()],
            resolution: Resolution::P720,
            audio_mood: AudioMood::Epic,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"imageUrls": ["a.png"], "resolution": "720p", "audioMood": "Epic"})
        );
    }

    #[test]
    fn test_responses_tolerate_missing_fields() {
        let login: LoginResponse = serde_json::from_str(r#"{"msg": "Missing Authorization Header"}"#).unwrap();
        assert!(!login.success);
        assert!(login.access_token.is_none());

        let video: CreateVideoResponse =
            serde_json::from_str(r#"{"success": true, "videoUrl": "http://h/v.mp4"}"#).unwrap();
        assert_eq!(video.video_url.as_deref(), Some("http://h/v.mp4"));
    }

    #[test]
    fn test_url_joining() {
        let client = ApiClient::new("http://localhost:5000/").unwrap();
        assert_eq!(client.url("/login"), "http://localhost:5000/login");
        assert_eq!(client.url("get_images"), "http://localhost:5000/get_images");
    }

    #[test]
    fn test_partial_path_is_a_sibling() {
        assert_eq!(
            partial_path(Path::new("/tmp/out/YourVideo.mp4")),
            PathBuf::from("/tmp/out/YourVideo.mp4.part")
        );
        assert_eq!(partial_path(Path::new("v.mp4")), PathBuf::from("v.mp4.part"));
    }

    #[test]
    fn test_upload_file_name() {
        let file = UploadFile::from_path(Path::new("/tmp/pics/Beach.PNG"));
        assert_eq!(file.name(), "Beach.PNG");
    }
}
