//! sitemap.xml and robots.txt generation

use crate::config::SiteConfig;
use chrono::NaiveDate;
use serde_json::Value;

pub const SITEMAP_CACHE_CONTROL: &str = "no-store, must-revalidate";

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub path: String,
    pub lastmod: String,
    pub changefreq: &'static str,
    pub priority: &'static str,
}

/// The two fields of a backend project the sitemap needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectLink {
    pub slug: String,
    pub date: Option<String>,
}

impl ProjectLink {
    /// Reads one element of the backend project list. Other fields are
    /// never looked at, so documents with unexpected shapes still link.
    pub fn from_value(project: &Value) -> Option<Self> {
        let slug = project.get("slug").and_then(Value::as_str)?.trim();
        if slug.is_empty() {
            return None;
        }
        let date = project
            .get("date")
            .and_then(Value::as_str)
            .filter(|d| !d.is_empty())
            .map(str::to_string);
        Some(Self {
            slug: slug.to_string(),
            date,
        })
    }
}

/// Static routes first, then one entry per project link.
pub fn sitemap_entries(site: &SiteConfig, projects: &[ProjectLink], today: NaiveDate) -> Vec<SitemapEntry> {
    let today = today.format("%Y-%m-%d").to_string();
    let static_routes = [
        ("/", "daily", "1.0"),
        ("/about", "weekly", "0.8"),
        ("/projects", "weekly", "0.9"),
        (site.chat_path.as_str(), "weekly", "0.9"),
        ("/contact", "monthly", "0.7"),
    ];

    let mut entries: Vec<SitemapEntry> = static_routes
        .iter()
        .map(|&(path, changefreq, priority)| SitemapEntry {
            path: path.to_string(),
            lastmod: today.clone(),
            changefreq,
            priority,
        })
        .collect();

    entries.extend(projects.iter().map(|project| SitemapEntry {
        path: format!("/projects/{}", project.slug),
        lastmod: project.date.clone().unwrap_or_else(|| today.clone()),
        changefreq: "monthly",
        priority: "0.8",
    }));

    entries
}

pub fn render_sitemap(site: &SiteConfig, entries: &[SitemapEntry]) -> String {
    let base = site.base_url();
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for entry in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!(
            "    <loc>{}</loc>\n",
            escape_xml(&format!("{}{}", base, entry.path))
        ));
        xml.push_str(&format!("    <lastmod>{}</lastmod>\n", escape_xml(&entry.lastmod)));
        xml.push_str(&format!("    <changefreq>{}</changefreq>\n", entry.changefreq));
        xml.push_str(&format!("    <priority>{}</priority>\n", entry.priority));
        xml.push_str("  </url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}

pub fn render_robots(site: &SiteConfig) -> String {
    let base = site.base_url();
    let chat = site.chat_path.trim_end_matches('/');
    format!(
        "User-agent: *\n\
         Allow: /\n\
         Allow: /projects/\n\
         Allow: /about/\n\
         Allow: /contact/\n\
         Allow: {chat}/\n\
         Disallow: /api/\n\
         Disallow: /private/\n\
         \n\
         Host: {base}\n\
         Sitemap: {base}/sitemap.xml\n"
    )
}

fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    fn link(slug: &str, date: Option<&str>) -> ProjectLink {
        ProjectLink {
            slug: slug.to_string(),
            date: date.map(str::to_string),
        }
    }

    #[test]
    fn test_project_link_reads_slug_and_date_only() {
        let link = ProjectLink::from_value(&json!({
            "_id": {"$oid": "64f0"},
            "slug": "gateway",
            "date": "2024-02-02",
            "images": null
        }))
        .unwrap();
        assert_eq!(link.slug, "gateway");
        assert_eq!(link.date.as_deref(), Some("2024-02-02"));

        let undated = ProjectLink::from_value(&json!({"slug": "b", "date": null})).unwrap();
        assert!(undated.date.is_none());

        assert!(ProjectLink::from_value(&json!({"title": "no slug"})).is_none());
        assert!(ProjectLink::from_value(&json!({"slug": "  "})).is_none());
        assert!(ProjectLink::from_value(&json!("gateway")).is_none());
    }

    #[test]
    fn test_static_and_project_entries() {
        let site = SiteConfig::default();
        let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let entries = sitemap_entries(
            &site,
            &[link("gateway", Some("2024-02-02")), link("undated", None)],
            today,
        );

        assert_eq!(entries.len(), 7);
        assert_eq!(entries[0].path, "/");
        assert_eq!(entries[0].priority, "1.0");
        assert_eq!(entries[3].path, "/Ask-Username");
        assert_eq!(entries[5].path, "/projects/gateway");
        assert_eq!(entries[5].lastmod, "2024-02-02");
        assert_eq!(entries[6].lastmod, "2026-03-01");
    }

    #[test]
    fn test_render_sitemap_escapes_locations() {
        let site = SiteConfig {
            site_url: "https://folio.test/".to_string(),
            ..SiteConfig::default()
        };
        let entries = vec![SitemapEntry {
            path: "/projects/a&b".to_string(),
            lastmod: "2024-01-01".to_string(),
            changefreq: "monthly",
            priority: "0.8",
        }];

        let xml = render_sitemap(&site, &entries);
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<loc>https://folio.test/projects/a&amp;b</loc>"));
        assert!(xml.trim_end().ends_with("</urlset>"));
    }

    #[test]
    fn test_robots_points_at_sitemap() {
        let robots = render_robots(&SiteConfig::default());
        assert!(robots.contains("Disallow: /api/"));
        assert!(robots.contains("Allow: /Ask-Username/"));
        assert!(robots.contains("Sitemap: https://example.com/sitemap.xml"));
    }
}
