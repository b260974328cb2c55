//! Jobline client — authenticated HTTP access layer for the Jobline
//! platform (job listings, employer dashboards, forum, mentorship).
//!
//! Domain services consume only the [`client::ApiClient`] facade. The crate
//! handles the request lifecycle around it: bearer-header attachment from a
//! [`auth::TokenStore`], 401 detection, a single coalesced refresh exchange,
//! retry-once semantics, and normalization of every failure into
//! [`error::ClientError`].
//!
//! # Quick Start
//!
//! ```no_run
//! use jobline_client::prelude::*;
//!
//! # async fn example() -> jobline_client::error::Result<()> {
//! let client = ApiClient::builder("https://api.jobline.example")
//!     .on_session_expired(std::sync::Arc::new(|| {
//!         // navigate to the login entry point
//!     }))
//!     .build()?;
//! let jobs: ApiResponse<serde_json::Value> = client.get("/jobs", None).await?;
//! println!("{}", jobs.data);
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod prelude;
