//! Vimeo API client.
//!
//! `VideoHostClient` exposes one async method per supported operation
//! (uploads, metadata, content rating, folders, tags, domain whitelisting,
//! embed hash extraction). Each method returns an [`ApiResponse`] carrying
//! the value together with the HTTP status of the call.
//!
//! ```no_run
//! use vimeo_kit::{ClientConfig, VideoHostClient};
//!
//! # async fn run() -> vimeo_kit::Result<()> {
//! let client = VideoHostClient::new(ClientConfig::new("access-token"))?;
//! let tagged = client.tag_video("/videos/42", "demo").await?;
//! assert!(tagged.is_success());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod error_severity;
pub mod logging;
pub mod sdk;

pub use api::types::{ApiResponse, CommonVideoInformation, PictureUpload};
pub use client::VideoHostClient;
pub use config::{ClientConfig, UserConfig};
pub use domain::validator::ContentRating;
pub use error::{Error, Result};
pub use error_severity::ErrorSeverity;
pub use sdk::{TusUploader, UploadSdk};
