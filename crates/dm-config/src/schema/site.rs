//! Per-site acquisition settings from the `Sites` section
//!
//! ```yaml
//! Sites:
//!   CMH:
//!     XNAT_Archive: 'SPINS_CMH'
//!     ExportInfo:
//!       - T1:  {Pattern: {'T1', 'BRAVO'}, Count: 1}
//!       - DTI: {Pattern: 'DTI-60', Count: 2, Order: [3, 5]}
//! ```

use super::keyed;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Acquisition settings for one scanning site.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SiteSettings {
    /// XNAT project holding this site's sessions
    #[serde(rename = "XNAT_Archive", default, skip_serializing_if = "Option::is_none")]
    pub xnat_archive: Option<String>,

    /// Expected series per tag, in classification order
    #[serde(rename = "ExportInfo", default, deserialize_with = "keyed::ordered")]
    pub export_info: IndexMap<String, TagInfo>,
}

/// Expected series for one tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagInfo {
    /// Regular expressions matched against the series description
    #[serde(rename = "Pattern", deserialize_with = "patterns")]
    pub pattern: Vec<String>,

    /// Number of series expected per session
    #[serde(rename = "Count", default = "default_count")]
    pub count: u32,

    /// Expected acquisition positions, one per expected series
    #[serde(
        rename = "Order",
        default,
        deserialize_with = "one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub order: Vec<u32>,
}

fn default_count() -> u32 {
    1
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> From<OneOrMany<T>> for Vec<T> {
    fn from(value: OneOrMany<T>) -> Self {
        match value {
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }
    }
}

fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    OneOrMany::deserialize(deserializer).map(Vec::from)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPatterns {
    One(String),
    Many(Vec<String>),
    Set(IndexMap<String, serde::de::IgnoredAny>),
}

// Accepts a string, a list, or YAML set syntax `{'a', 'b'}`.
fn patterns<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match RawPatterns::deserialize(deserializer)? {
        RawPatterns::One(p) => vec![p],
        RawPatterns::Many(ps) => ps,
        RawPatterns::Set(set) => set.into_keys().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_export_info_list_form() {
        let yaml = r#"
XNAT_Archive: SPINS_CMH
ExportInfo:
  - T1:  {Pattern: {'T1', 'BRAVO'}, Count: 1}
  - DTI: {Pattern: 'DTI-60', Count: 2, Order: [3, 5]}
"#;
        let site: SiteSettings = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(site.xnat_archive.as_deref(), Some("SPINS_CMH"));
        assert_eq!(site.export_info.keys().collect::<Vec<_>>(), vec!["T1", "DTI"]);

        let t1 = site.export_info.get("T1").unwrap();
        assert_eq!(t1.pattern, vec!["T1", "BRAVO"]);
        assert!(t1.order.is_empty());

        let dti = site.export_info.get("DTI").unwrap();
        assert_eq!(dti.pattern, vec!["DTI-60"]);
        assert_eq!(dti.count, 2);
        assert_eq!(dti.order, vec![3, 5]);
    }

    #[test]
    fn count_defaults_to_one_and_order_accepts_scalar() {
        let info: TagInfo = serde_yaml::from_str("Pattern: [RST]\nOrder: 4\n").unwrap();
        assert_eq!(info.count, 1);
        assert_eq!(info.order, vec![4]);
    }
}
