//! Static per-route SEO metadata

use crate::config::SiteConfig;
use serde::Serialize;
use std::collections::HashMap;
use urlencoding::encode;

pub const HOME_ROUTE: &str = "home";
pub const DEFAULT_LOCALE: &str = "en_US";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoRecord {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub og_image: String,
    pub canonical_url: String,
}

/// Record plus site-wide identity, as served by the SEO route.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoPayload {
    #[serde(flatten)]
    pub record: SeoRecord,
    pub site_name: String,
    pub site_url: String,
    pub author: String,
    pub locale: String,
}

/// Immutable route-key to record table, built once at startup.
#[derive(Debug, Clone)]
pub struct SeoTable {
    records: HashMap<String, SeoRecord>,
    home: SeoRecord,
    site_name: String,
    site_url: String,
    author: String,
}

impl SeoTable {
    pub fn from_site(site: &SiteConfig) -> Self {
        let base = site.base_url();
        let owner = site.owner_name.as_str();
        let chat_title = site.chat_page_title();

        let home = SeoRecord {
            title: format!("{} | {}", owner, site.owner_title),
            description: site.site_description.clone(),
            keywords: keywords(&[owner, "Portfolio", "Developer", "Projects"]),
            og_image: format!(
                "/api/og?title={}&subtitle={}&theme=default",
                encode(owner),
                encode(&site.owner_title)
            ),
            canonical_url: site.site_url.clone(),
        };

        let mut records = HashMap::new();
        records.insert(HOME_ROUTE.to_string(), home.clone());
        records.insert(
            "about".to_string(),
            SeoRecord {
                title: format!("About {}", owner),
                description: site.owner_bio.clone(),
                keywords: keywords(&["About", owner, "Background", "Experience"]),
                og_image: format!("/api/og?title=About&subtitle={}&theme=default", encode(owner)),
                canonical_url: format!("{}/about", base),
            },
        );
        records.insert(
            "projects".to_string(),
            SeoRecord {
                title: format!("Projects | {}", owner),
                description: format!("Explore projects and work by {}", owner),
                keywords: keywords(&["Projects", "Portfolio", "Work", "Applications"]),
                og_image: "/api/og?title=Projects&subtitle=Portfolio%20Showcase&theme=projects"
                    .to_string(),
                canonical_url: format!("{}/projects", base),
            },
        );
        records.insert(
            "contact".to_string(),
            SeoRecord {
                title: format!("Contact {}", owner),
                description: format!(
                    "Get in touch with {} for collaboration and opportunities",
                    owner
                ),
                keywords: keywords(&["Contact", "Hire", "Collaboration", "Get in Touch"]),
                og_image: "/api/og?title=Contact&subtitle=Let's%20Connect&theme=contact"
                    .to_string(),
                canonical_url: format!("{}/contact", base),
            },
        );
        records.insert(
            "ask".to_string(),
            SeoRecord {
                title: chat_title.clone(),
                description: site.chat_page_description(),
                keywords: keywords(&["Chat", "AI Assistant", "Q&A", "Ask"]),
                og_image: format!(
                    "/api/og?title={}&subtitle=AI-Powered%20Q%26A&theme=default",
                    encode(&chat_title)
                ),
                canonical_url: format!("{}{}", base, site.chat_path),
            },
        );

        Self {
            records,
            home,
            site_name: site.site_name.clone(),
            site_url: site.site_url.clone(),
            author: site.owner_name.clone(),
        }
    }

    /// Record for `route`, or the home record when the key is unknown.
    pub fn lookup(&self, route: &str) -> &SeoRecord {
        self.records.get(route).unwrap_or(&self.home)
    }

    pub fn payload(&self, route: Option<&str>) -> SeoPayload {
        let route = route.filter(|r| !r.is_empty()).unwrap_or(HOME_ROUTE);
        SeoPayload {
            record: self.lookup(route).clone(),
            site_name: self.site_name.clone(),
            site_url: self.site_url.clone(),
            author: self.author.clone(),
            locale: DEFAULT_LOCALE.to_string(),
        }
    }

    pub fn routes(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }
}

fn keywords(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}
