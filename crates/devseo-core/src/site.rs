//! Site-level configuration: supported locales, theme preference, navigation
//! and the generated sitemap.

use chrono::NaiveDate;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("unsupported locale \"{0}\"")]
    UnsupportedLocale(String),

    #[error("unknown theme \"{0}\"")]
    UnknownTheme(String),

    #[error("sitemap generation failed: {0}")]
    Sitemap(String),
}

/// A locale the site is translated into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Zh,
    Ja,
    Fr,
    De,
    Es,
}

impl Locale {
    pub const ALL: [Locale; 6] = [
        Locale::En,
        Locale::Zh,
        Locale::Ja,
        Locale::Fr,
        Locale::De,
        Locale::Es,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Zh => "zh",
            Self::Ja => "ja",
            Self::Fr => "fr",
            Self::De => "de",
            Self::Es => "es",
        }
    }

    /// Thousands separator used when formatting integers for this locale.
    #[must_use]
    pub fn group_separator(self) -> char {
        match self {
            Self::En | Self::Zh | Self::Ja => ',',
            Self::De | Self::Es => '.',
            Self::Fr => '\u{202f}',
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Locale {
    type Err = SiteError;

    /// Accepts bare codes (`de`) and region-qualified tags (`de-DE`, `zh_CN`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let primary = s
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        Locale::ALL
            .into_iter()
            .find(|locale| locale.as_str() == primary)
            .ok_or_else(|| SiteError::UnsupportedLocale(s.to_string()))
    }
}

/// Colour scheme preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Theme {
    type Err = SiteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "system" => Ok(Self::System),
            _ => Err(SiteError::UnknownTheme(s.to_string())),
        }
    }
}

/// Pick the locale for a request.
///
/// An explicit, supported cookie value wins. Otherwise the `Accept-Language`
/// entries are tried from highest to lowest `q`; ties keep header order.
#[must_use]
pub fn negotiate_locale(
    cookie: Option<&str>,
    accept_language: Option<&str>,
    default: Locale,
) -> Locale {
    if let Some(locale) = cookie.and_then(|c| c.parse::<Locale>().ok()) {
        return locale;
    }

    let Some(header) = accept_language else {
        return default;
    };

    let mut ranked: Vec<(f32, &str)> = header
        .split(',')
        .filter_map(|entry| {
            let mut parts = entry.split(';');
            let tag = parts.next()?.trim();
            if tag.is_empty() {
                return None;
            }
            let q = parts
                .find_map(|p| p.trim().strip_prefix("q="))
                .and_then(|q| q.parse::<f32>().ok())
                .unwrap_or(1.0);
            Some((q, tag))
        })
        .filter(|(q, _)| *q > 0.0)
        .collect();
    ranked.sort_by(|a, b| b.0.total_cmp(&a.0));

    ranked
        .into_iter()
        .find_map(|(_, tag)| tag.parse::<Locale>().ok())
        .unwrap_or(default)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub name: &'static str,
    pub href: &'static str,
}

/// Public-facing site metadata.
#[derive(Debug, Clone, Serialize)]
pub struct SiteConfig {
    pub name: String,
    pub description: String,
    pub base_url: String,
    pub locales: Vec<Locale>,
    pub default_locale: Locale,
    pub navigation: Vec<NavItem>,
}

impl SiteConfig {
    #[must_use]
    pub fn new(base_url: &str, default_locale: Locale) -> Self {
        Self {
            name: "DevSEO.Click".to_string(),
            description: "Developer-focused SEO keyword research tool with usage-based pricing"
                .to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            locales: Locale::ALL.to_vec(),
            default_locale,
            navigation: vec![
                NavItem {
                    name: "Home",
                    href: "/",
                },
                NavItem {
                    name: "Pricing",
                    href: "/pricing",
                },
                NavItem {
                    name: "About",
                    href: "/about",
                },
            ],
        }
    }
}

/// Render the sitemap: one entry per locale home page, then the bare base
/// URL (which redirects to the default locale) at a lower priority.
///
/// # Errors
///
/// Returns [`SiteError::Sitemap`] if the XML writer fails.
pub fn sitemap_xml(config: &SiteConfig, lastmod: NaiveDate) -> Result<String, SiteError> {
    let lastmod = lastmod.format("%Y-%m-%d").to_string();
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    let mut entries: Vec<(String, &str)> = config
        .locales
        .iter()
        .map(|locale| (format!("{}/{locale}", config.base_url), "1.0"))
        .collect();
    entries.push((config.base_url.clone(), "0.8"));

    write_event(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
    )?;
    write_event(
        &mut writer,
        Event::Start(BytesStart::new("urlset").with_attributes([("xmlns", SITEMAP_NS)])),
    )?;
    for (loc, priority) in &entries {
        write_event(&mut writer, Event::Start(BytesStart::new("url")))?;
        write_text_element(&mut writer, "loc", loc)?;
        write_text_element(&mut writer, "lastmod", &lastmod)?;
        write_text_element(&mut writer, "changefreq", "daily")?;
        write_text_element(&mut writer, "priority", priority)?;
        write_event(&mut writer, Event::End(BytesEnd::new("url")))?;
    }
    write_event(&mut writer, Event::End(BytesEnd::new("urlset")))?;

    String::from_utf8(writer.into_inner()).map_err(|e| SiteError::Sitemap(e.to_string()))
}

fn write_text_element(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    text: &str,
) -> Result<(), SiteError> {
    write_event(writer, Event::Start(BytesStart::new(name)))?;
    write_event(writer, Event::Text(BytesText::new(text)))?;
    write_event(writer, Event::End(BytesEnd::new(name)))
}

fn write_event(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), SiteError> {
    writer
        .write_event(event)
        .map_err(|e| SiteError::Sitemap(e.to_string()))
}
