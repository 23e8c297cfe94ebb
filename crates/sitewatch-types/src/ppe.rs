//! PPE item identifiers, detection flag sets, and classification enums.

use serde::{Deserialize, Serialize};

/// The six PPE items a detector reports on.
///
/// Required items force a Non-Compliant verdict when absent; optional
/// items only lower the compliance score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PpeItem {
    Helmet,
    Vest,
    Gloves,
    Goggles,
    Boots,
    Mask,
}

impl PpeItem {
    /// Items whose absence makes an event Non-Compliant.
    pub const REQUIRED: [PpeItem; 3] = [PpeItem::Helmet, PpeItem::Vest, PpeItem::Gloves];

    /// Items whose absence only lowers the compliance score.
    pub const OPTIONAL: [PpeItem; 3] = [PpeItem::Goggles, PpeItem::Boots, PpeItem::Mask];

    /// All six items, required first.
    pub const ALL: [PpeItem; 6] = [
        PpeItem::Helmet,
        PpeItem::Vest,
        PpeItem::Gloves,
        PpeItem::Goggles,
        PpeItem::Boots,
        PpeItem::Mask,
    ];

    /// Returns the canonical snake_case key for this item, as used in
    /// detector payloads and database columns.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Helmet => "helmet",
            Self::Vest => "vest",
            Self::Gloves => "gloves",
            Self::Goggles => "goggles",
            Self::Boots => "boots",
            Self::Mask => "mask",
        }
    }

    /// Returns the human-readable violation label used in alert records.
    pub fn violation_label(self) -> &'static str {
        match self {
            Self::Helmet => "No Helmet",
            Self::Vest => "No Safety Vest",
            Self::Gloves => "No Gloves",
            Self::Goggles => "No Goggles",
            Self::Boots => "No Boots",
            Self::Mask => "No Mask",
        }
    }
}

impl std::fmt::Display for PpeItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PpeItem {
    type Err = ParsePpeItemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "helmet" => Ok(Self::Helmet),
            "vest" => Ok(Self::Vest),
            "gloves" => Ok(Self::Gloves),
            "goggles" => Ok(Self::Goggles),
            "boots" => Ok(Self::Boots),
            "mask" => Ok(Self::Mask),
            _ => Err(ParsePpeItemError(s.to_string())),
        }
    }
}

/// Error returned when parsing an unknown PPE item key.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown PPE item: {0}")]
pub struct ParsePpeItemError(pub String);

/// Presence flags for one detection event.
///
/// Each field defaults to `false` on deserialization: detector feeds may
/// omit items, and an absent key means "not detected", never an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PpeFlags {
    #[serde(default)]
    pub helmet: bool,
    #[serde(default)]
    pub vest: bool,
    #[serde(default)]
    pub gloves: bool,
    #[serde(default)]
    pub goggles: bool,
    #[serde(default)]
    pub boots: bool,
    #[serde(default)]
    pub mask: bool,
}

impl PpeFlags {
    /// Returns whether the given item was detected as present.
    pub fn get(self, item: PpeItem) -> bool {
        match item {
            PpeItem::Helmet => self.helmet,
            PpeItem::Vest => self.vest,
            PpeItem::Gloves => self.gloves,
            PpeItem::Goggles => self.goggles,
            PpeItem::Boots => self.boots,
            PpeItem::Mask => self.mask,
        }
    }

    /// Returns whether every required item (helmet, vest, gloves) is present.
    pub fn all_required_present(self) -> bool {
        PpeItem::REQUIRED.iter().all(|&item| self.get(item))
    }
}

/// Compliance verdict classification for a single detection event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplianceStatus {
    /// All required items present and score at or above 80.
    #[serde(rename = "Compliant")]
    Compliant,
    /// All required items present but score below 80.
    #[serde(rename = "Partially Compliant")]
    PartiallyCompliant,
    /// At least one required item missing.
    #[serde(rename = "Non-Compliant")]
    NonCompliant,
}

impl ComplianceStatus {
    /// Returns the canonical display label for this status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Compliant => "Compliant",
            Self::PartiallyCompliant => "Partially Compliant",
            Self::NonCompliant => "Non-Compliant",
        }
    }
}

impl std::fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ComplianceStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Compliant" => Ok(Self::Compliant),
            "Partially Compliant" => Ok(Self::PartiallyCompliant),
            "Non-Compliant" => Ok(Self::NonCompliant),
            _ => Err(ParseStatusError(s.to_string())),
        }
    }
}

/// Error returned when parsing an unknown compliance status label.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown compliance status: {0}")]
pub struct ParseStatusError(pub String);

/// Severity of a violation alert.
///
/// High is reserved for missing helmets; every other required-item
/// violation is Medium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    High,
    Medium,
}

impl Severity {
    /// Returns the canonical string label for this severity.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "High" => Ok(Self::High),
            "Medium" => Ok(Self::Medium),
            _ => Err(ParseSeverityError(s.to_string())),
        }
    }
}

/// Error returned when parsing an unknown severity label.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown alert severity: {0}")]
pub struct ParseSeverityError(pub String);
