//! Server-side core of a personal portfolio site.
//!
//! The portfolio keeps its content in an external backend service. This
//! crate holds everything the gateway in front of it needs, independent of
//! the HTTP framework serving it:
//!
//! - **Backend client**: a single `Backend` seam with a reqwest implementation
//! - **Proxy policies**: how backend replies become caller-facing replies
//! - **Chat relay**: forwards questions and always produces displayable text
//! - **Public content**: project and certificate reads with bundled fallback data
//! - **SEO metadata**: per-route records with a home fallback
//! - **Motion**: lifecycle of delayed UI animations
//! - **Configuration**: YAML file plus environment overrides

pub mod backend;
pub mod chat;
pub mod config;
pub mod content;
pub mod errors;
pub mod models;
pub mod motion;
pub mod proxy;
pub mod seo;
pub mod sitemap;

pub use backend::{Backend, BackendRequest, BackendResponse, HttpBackend, RequestBody};
pub use chat::{ChatRequest, ChatResponse, ChatService};
pub use config::*;
pub use content::{ContentService, DataSource, FallbackCatalog, Sourced};
pub use errors::{FolioError, Result};
pub use proxy::{PassthroughPolicy, ProxyReply};
pub use seo::{SeoPayload, SeoRecord, SeoTable};
