use crate::analytics::TrackEvent;
use serde::Serialize;

pub const SITE_URL: &str = "https://typicalmitul.com";
pub const PAGE_PATH: &str = "/montreal-in-motion";

const DESCRIPTION: &str = "A documentation of the brutalist and distinctly designed Montreal metro stations. Captured by photographer Mitul Shah.";

// Metro emoji as an inline SVG favicon
const FAVICON: &str = "data:image/svg+xml,<svg xmlns=%22http://www.w3.org/2000/svg%22 viewBox=%220 0 100 100%22><text y=%22.9em%22 font-size=%2290%22>🚇</text></svg>";

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SocialLink {
    pub network: &'static str,
    pub href: &'static str,
    pub aria_label: &'static str,
    pub new_tab: bool,
    pub event: TrackEvent,
}

impl SocialLink {
    fn new(
        network: &'static str,
        href: &'static str,
        aria_label: &'static str,
        new_tab: bool,
    ) -> Self {
        Self {
            network,
            href,
            aria_label,
            new_tab,
            event: TrackEvent::social_click(network),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct OpenGraphImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub alt: String,
    pub mime_type: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Seo {
    pub title: String,
    pub description: String,
    pub canonical: String,
    pub og_title: String,
    pub og_image: OpenGraphImage,
    pub favicon: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SiteContent {
    pub title_lines: Vec<&'static str>,
    pub subtitle: &'static str,
    pub credit_name: &'static str,
    pub credit_href: &'static str,
    pub portfolio_href: &'static str,
    pub portfolio_label: &'static str,
    pub project_lead: &'static str,
    pub project_paragraphs: Vec<&'static str>,
    pub informational: Vec<&'static str>,
    pub about_me: Vec<&'static str>,
    pub portrait_src: String,
    pub social_links: Vec<SocialLink>,
    pub seo: Seo,
}

impl SiteContent {
    pub fn montreal_in_motion() -> Self {
        let canonical = format!("{}{}", SITE_URL, PAGE_PATH);

        Self {
            title_lines: vec!["Montreal", "in Motion"],
            subtitle: "A documentation of the Montreal metro system. All photos were captured between December 2021 and January 2022, while the city was under lockdown and curfew.",
            credit_name: "Mitul Shah (@typicalmitul)",
            credit_href: "https://twitter.com/typicalmitul",
            portfolio_href: "/",
            portfolio_label: "typicalmitul.com",
            project_lead: "Montreal in Motion is a documentation of the metro, and an invitation to discover beauty within the architectural designs of each station.",
            project_paragraphs: vec![
                "Montreal has forever been one of my favourite cities, for it's food, arts and most notably, the Metro system. Since my first visit, I've been fascinated by distinct architectural differences and art installations in each station.",
                "At the end of 2021, I made the decisions to spend 30 days through the new year to capture the essence of both the city itself and my favourite metro stations.",
                "This project captures the stations from my perspective, from a time where the city was quieter and the streets were less crowded. Each station tells a unique story through its designs and artwork, mirroring the rich cultural diversity of Montreal.",
            ],
            informational: vec![
                "All photos were taken on a Sony A7C with a Sigma 24-70m f/2.8 lens. Any long exposure was hand-held.",
                "This website was designed and built by myself, with the intention to stay with the theme of Montreal's brutalist stations.",
            ],
            about_me: vec![
                "My name is Mitul Shah, I am a photographer based out of Toronto, Canada dedicated to defining thoughtful and memorable experiences through every capture.",
                "My work has consistently drawn inspiration from our ever-changing environments, aiming to preserve them in a manner that will be remembered for years to come.",
            ],
            portrait_src: "/images/me.jpeg".to_string(),
            social_links: vec![
                SocialLink::new(
                    "Twitter",
                    "https://twitter.com/typicalmitul",
                    "Twitter profile",
                    true,
                ),
                SocialLink::new(
                    "Instagram",
                    "https://instagram.com/typicalmitul",
                    "Instagram profile",
                    true,
                ),
                SocialLink::new(
                    "TikTok",
                    "https://tiktok.com/@typicalmitul",
                    "TikTok profile",
                    true,
                ),
                SocialLink::new(
                    "Email",
                    "mailto:typicalmitul@gmail.com",
                    "Email me",
                    false,
                ),
            ],
            seo: Seo {
                title: "Montreal in Motion".to_string(),
                description: DESCRIPTION.to_string(),
                canonical: canonical.clone(),
                og_title: "Montreal in Motion by Mitul Shah".to_string(),
                og_image: OpenGraphImage {
                    url: format!("{}/images/og-mtl.png", SITE_URL),
                    width: 1200,
                    height: 630,
                    alt: "Montreal in Motion by Mitul Shah".to_string(),
                    mime_type: "image/png".to_string(),
                },
                favicon: FAVICON.to_string(),
            },
        }
    }

    pub fn with_portrait(mut self, src: impl Into<String>) -> Self {
        self.portrait_src = src.into();
        self
    }
}

impl Default for SiteContent {
    fn default() -> Self {
        Self::montreal_in_motion()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_social_link_is_tracked() {
        let content = SiteContent::default();
        let networks: Vec<_> =
            content.social_links.iter().map(|l| l.network).collect();
        assert_eq!(networks, ["Twitter", "Instagram", "TikTok", "Email"]);

        for link in &content.social_links {
            assert_eq!(link.event, TrackEvent::social_click(link.network));
        }
    }

    #[test]
    fn test_email_stays_in_the_same_tab() {
        let content = SiteContent::default();
        let email = content
            .social_links
            .iter()
            .find(|l| l.network == "Email")
            .unwrap();
        assert!(!email.new_tab);
        assert!(email.href.starts_with("mailto:"));
    }

    #[test]
    fn test_canonical_url() {
        let content = SiteContent::default();
        assert_eq!(
            content.seo.canonical,
            "https://typicalmitul.com/montreal-in-motion"
        );
        assert_eq!(content.seo.og_image.width, 1200);
        assert_eq!(content.seo.og_image.height, 630);
    }
}
