//! Export format tags and format sets
//!
//! `ExportSettings` maps a series identifier to the formats the conversion
//! tools must produce for it:
//!
//! ```yaml
//! ExportSettings:
//!   T1:       [nii, dcm, mnc]
//!   DTI60:    {nii, dcm}
//!   RST:      nii
//!   Software:
//! ```
//!
//! A null value (as for `Software` above) is an empty set: the series is
//! known but never exported.

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::collections::BTreeSet;
use std::collections::btree_set;
use std::fmt;
use std::str::FromStr;

/// Output format tag, drawn from a closed enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// NIfTI volumes
    Nii,
    /// DICOM series as exported by the scanner
    Dcm,
    /// MINC volumes
    Mnc,
    /// NRRD volumes
    Nrrd,
    /// Raw DICOM archive copy
    Dicom,
}

impl ExportFormat {
    /// All known formats, in canonical order.
    pub const ALL: [ExportFormat; 5] = [
        ExportFormat::Nii,
        ExportFormat::Dcm,
        ExportFormat::Mnc,
        ExportFormat::Nrrd,
        ExportFormat::Dicom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Nii => "nii",
            ExportFormat::Dcm => "dcm",
            ExportFormat::Mnc => "mnc",
            ExportFormat::Nrrd => "nrrd",
            ExportFormat::Dicom => "dicom",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ExportFormat::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "unknown export format '{s}', expected one of: nii, dcm, mnc, nrrd, dicom"
                )
            })
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A set of export formats.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatSet(BTreeSet<ExportFormat>);

impl FormatSet {
    /// The empty set, returned for series with no export policy.
    pub const EMPTY: FormatSet = FormatSet(BTreeSet::new());

    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, format: ExportFormat) -> bool {
        self.0.contains(&format)
    }

    pub fn insert(&mut self, format: ExportFormat) -> bool {
        self.0.insert(format)
    }

    pub fn iter(&self) -> btree_set::Iter<'_, ExportFormat> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<ExportFormat> for FormatSet {
    fn from_iter<I: IntoIterator<Item = ExportFormat>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a FormatSet {
    type Item = &'a ExportFormat;
    type IntoIter = btree_set::Iter<'a, ExportFormat>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for FormatSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tags: Vec<&str> = self.0.iter().map(ExportFormat::as_str).collect();
        write!(f, "{{{}}}", tags.join(", "))
    }
}

impl Serialize for FormatSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for format in &self.0 {
            seq.serialize_element(format)?;
        }
        seq.end()
    }
}

struct FormatSetVisitor;

impl FormatSetVisitor {
    fn parse<E: de::Error>(tag: &str) -> Result<ExportFormat, E> {
        tag.parse().map_err(E::custom)
    }
}

impl<'de> Visitor<'de> for FormatSetVisitor {
    type Value = FormatSet;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a format tag, a list of format tags, or null")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(FormatSet::new())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(FormatSet::new())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_str<E: de::Error>(self, tag: &str) -> Result<Self::Value, E> {
        Ok(std::iter::once(Self::parse(tag)?).collect())
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut set = FormatSet::new();
        while let Some(tag) = access.next_element::<String>()? {
            set.insert(Self::parse(&tag)?);
        }
        Ok(set)
    }

    // YAML set syntax `{nii, dcm}` arrives as a mapping with null values.
    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut set = FormatSet::new();
        while let Some((tag, _)) = access.next_entry::<String, de::IgnoredAny>()? {
            set.insert(Self::parse(&tag)?);
        }
        Ok(set)
    }
}

impl<'de> Deserialize<'de> for FormatSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FormatSetVisitor)
    }
}
