use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::config::MarketplaceConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FooterLink {
    pub text: &'static str,
    pub href: String,
}

/// Marketplace-wide copy and limits the front end renders on every page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteInfo {
    pub contact_email: String,
    pub gov_name_short: String,
    pub gov_name_long: String,
    pub region_name_short: String,
    pub region_name_long: String,
    pub cwu_max_budget: u32,
    pub swu_max_budget: u32,
    /// Identity-provider suffixes on usernames, for routing sign-in by user type.
    pub gov_idp_suffix: String,
    pub vendor_idp_suffix: String,
    pub ownership_notice: String,
    pub footer_links: Vec<FooterLink>,
}

impl SiteInfo {
    pub fn from_config(config: &MarketplaceConfig) -> Self {
        let content = |text: &'static str, slug: &str| FooterLink {
            text,
            href: format!("/content/{slug}"),
        };

        Self {
            contact_email: config.contact_email.clone(),
            gov_name_short: config.copy.gov_name_short.clone(),
            gov_name_long: config.copy.gov_name_long.clone(),
            region_name_short: config.copy.region_name_short.clone(),
            region_name_long: config.copy.region_name_long.clone(),
            cwu_max_budget: config.cwu_max_budget,
            swu_max_budget: config.swu_max_budget,
            gov_idp_suffix: config.gov_idp_suffix.clone(),
            vendor_idp_suffix: config.vendor_idp_suffix.clone(),
            ownership_notice: format!("Owned and operated by the {}.", config.copy.gov_name_long),
            footer_links: vec![
                FooterLink {
                    text: "Home",
                    href: "/".to_string(),
                },
                content("About", "about"),
                content("Disclaimer", "disclaimer"),
                content("Privacy", "privacy"),
                content("Accessibility", "accessibility"),
                content("Copyright", "copyright"),
                FooterLink {
                    text: "Contact Us",
                    href: format!("mailto:{}", config.contact_email),
                },
            ],
        }
    }
}

pub fn site_router(info: SiteInfo) -> Router {
    Router::new().route("/api/v1/site", get(move || async move { Json(info) }))
}
