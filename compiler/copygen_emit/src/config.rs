//! Generation settings.

/// Marker comment written as the first line of every generated file.
pub const DEFAULT_MARKER: &str = "// Code generated by copygen for copy struct. DO NOT EDIT.";

/// Settings for one generation run.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GenerateConfig {
    /// Name of the generated copy method.
    pub method: String,
    /// Struct tag key whose boolean value excludes a field from the copy.
    pub skip_tag: String,
    /// First line of the generated file.
    pub marker: String,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            method: "Copy".to_string(),
            skip_tag: "noCopy".to_string(),
            marker: DEFAULT_MARKER.to_string(),
        }
    }
}
