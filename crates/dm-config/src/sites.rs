//! Per-site export info with compiled series patterns

use crate::schema::{SiteSettings, TagInfo};
use regex::Regex;
use serde::{Serialize, Serializer};

/// A site's `ExportInfo` table with its patterns compiled.
#[derive(Debug, Clone)]
pub struct SiteExportInfo {
    site: String,
    settings: SiteSettings,
    compiled: Vec<Vec<Regex>>,
}

impl SiteExportInfo {
    /// Compile every tag pattern for `site`.
    ///
    /// Returns a description of the first invalid pattern on failure.
    pub fn compile(site: &str, settings: SiteSettings) -> std::result::Result<Self, String> {
        let mut compiled = Vec::with_capacity(settings.export_info.len());
        for (tag, info) in settings.export_info.iter() {
            let patterns = info
                .pattern
                .iter()
                .map(|p| {
                    Regex::new(p).map_err(|e| {
                        format!("Sites.{site}.ExportInfo.{tag}: invalid pattern '{p}': {e}")
                    })
                })
                .collect::<std::result::Result<Vec<_>, _>>()?;
            compiled.push(patterns);
        }

        Ok(Self {
            site: site.to_string(),
            settings,
            compiled,
        })
    }

    pub fn site(&self) -> &str {
        &self.site
    }

    /// XNAT project for this site, if configured.
    pub fn xnat_archive(&self) -> Option<&str> {
        self.settings.xnat_archive.as_deref()
    }

    /// Tags in declaration order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.settings.export_info.keys().map(String::as_str)
    }

    pub fn tag_info(&self, tag: &str) -> Option<&TagInfo> {
        self.settings.export_info.get(tag)
    }

    /// Number of series expected for `tag`, or 0 if the tag is not listed.
    pub fn expected_count(&self, tag: &str) -> u32 {
        self.tag_info(tag).map_or(0, |info| info.count)
    }

    /// First tag (in declaration order) with a pattern found in `description`.
    pub fn classify(&self, description: &str) -> Option<&str> {
        self.settings
            .export_info
            .keys()
            .map(String::as_str)
            .zip(&self.compiled)
            .find(|(_, patterns)| patterns.iter().any(|re| re.is_match(description)))
            .map(|(tag, _)| tag)
    }
}

impl PartialEq for SiteExportInfo {
    fn eq(&self, other: &Self) -> bool {
        self.site == other.site && self.settings == other.settings
    }
}

impl Serialize for SiteExportInfo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.settings.serialize(serializer)
    }
}
