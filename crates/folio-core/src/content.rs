//! Public content reads with bundled fallback data
//!
//! The public surface must render even when the backend is missing or
//! down, so project and certificate reads fall back to the demo catalog in
//! `data/fallback.yaml`. Every answer reports where it came from.

use crate::backend::{Backend, BackendRequest};
use crate::config::SiteConfig;
use crate::errors::Result;
use crate::models::{Certificate, Project};
use crate::sitemap::ProjectLink;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use urlencoding::encode;

pub const CONTENT_CACHE_CONTROL: &str = "public, s-maxage=3600, stale-while-revalidate=7200";
pub const DATA_SOURCE_HEADER: &str = "x-data-source";

pub const PROJECTS_PATH: &str = "/api/v1/projects";
pub const CERTIFICATES_PATH: &str = "/api/v1/certificates";

const BUNDLED_FALLBACK: &str = include_str!("../data/fallback.yaml");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Backend,
    Fallback,
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Backend => "backend",
            DataSource::Fallback => "fallback",
        }
    }
}

/// JSON body tagged with its origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Sourced {
    pub source: DataSource,
    pub body: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FallbackCatalog {
    pub projects: Vec<Project>,
    pub certificates: Vec<Certificate>,
}

impl FallbackCatalog {
    /// Demo catalog shipped with the crate, personalised for `site`.
    pub fn bundled(site: &SiteConfig) -> Result<Self> {
        let mut catalog: FallbackCatalog = serde_yaml::from_str(BUNDLED_FALLBACK)?;
        for project in &mut catalog.projects {
            if let Some(description) = &mut project.description {
                description.overview = description.overview.replace("{owner}", &site.owner_name);
            }
        }
        Ok(catalog)
    }

    pub fn project(&self, slug: &str) -> Option<&Project> {
        self.projects
            .iter()
            .find(|p| p.slug.as_deref() == Some(slug))
    }
}

#[derive(Clone)]
pub struct ContentService {
    backend: Arc<dyn Backend>,
    fallback: Arc<FallbackCatalog>,
    timeout: Duration,
}

impl ContentService {
    pub fn new(backend: Arc<dyn Backend>, fallback: Arc<FallbackCatalog>, timeout: Duration) -> Self {
        Self {
            backend,
            fallback,
            timeout,
        }
    }

    pub async fn projects(&self) -> Sourced {
        match self.fetch("projects", PROJECTS_PATH.to_string()).await {
            Some(body) => Sourced {
                source: DataSource::Backend,
                body,
            },
            None => fallback_body(&self.fallback.projects),
        }
    }

    pub async fn certificates(&self) -> Sourced {
        match self.fetch("certificates", CERTIFICATES_PATH.to_string()).await {
            Some(body) => Sourced {
                source: DataSource::Backend,
                body,
            },
            None => fallback_body(&self.fallback.certificates),
        }
    }

    /// One project by slug; `None` when neither the backend nor the demo
    /// catalog has it.
    pub async fn project(&self, slug: &str) -> Option<Sourced> {
        let path = format!("{}/{}", PROJECTS_PATH, encode(slug));
        if let Some(body) = self.fetch("project", path).await {
            return Some(Sourced {
                source: DataSource::Backend,
                body,
            });
        }

        let project = self.fallback.project(slug)?;
        serde_json::to_value(project).ok().map(|body| Sourced {
            source: DataSource::Fallback,
            body,
        })
    }

    /// Links to projects known to the backend, for sitemap generation.
    /// Empty when the backend is missing or failing. Elements without a
    /// usable slug are skipped one by one.
    pub async fn backend_projects(&self) -> Vec<ProjectLink> {
        let Some(body) = self.fetch("sitemap projects", PROJECTS_PATH.to_string()).await else {
            return Vec::new();
        };

        let list = match &body {
            Value::Array(items) => items,
            Value::Object(fields) => match fields.get("projects") {
                Some(Value::Array(items)) => items,
                _ => {
                    log::error!("Backend project list has no projects array");
                    return Vec::new();
                }
            },
            _ => {
                log::error!("Backend project list is not an array");
                return Vec::new();
            }
        };

        let links: Vec<ProjectLink> = list.iter().filter_map(ProjectLink::from_value).collect();
        if links.len() < list.len() {
            log::warn!(
                "Skipped {} backend projects without a slug",
                list.len() - links.len()
            );
        }
        links
    }

    async fn fetch(&self, what: &str, path: String) -> Option<Value> {
        if !self.backend.is_configured() {
            log::info!("No backend configured, using fallback {}", what);
            return None;
        }

        let request = BackendRequest::get(path).with_timeout(self.timeout);
        match self.backend.send(request).await {
            Ok(response) if response.is_success() => match response.json::<Value>() {
                Ok(body) => {
                    log::debug!("Fetched {} from backend", what);
                    Some(body)
                }
                Err(e) => {
                    log::error!("Backend {} reply unreadable, using fallback: {}", what, e);
                    None
                }
            },
            Ok(response) => {
                log::error!(
                    "Backend error {} for {}, using fallback",
                    response.status,
                    what
                );
                None
            }
            Err(e) => {
                log::error!("Fetching {} failed, using fallback: {}", what, e);
                None
            }
        }
    }
}

fn fallback_body<T: serde::Serialize>(items: &[T]) -> Sourced {
    Sourced {
        source: DataSource::Fallback,
        body: serde_json::to_value(items).unwrap_or_else(|_| Value::Array(Vec::new())),
    }
}
