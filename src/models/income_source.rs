//! Income source model
//!
//! The channels through which a user receives money. The set is closed: a
//! user declares a subset of these once, during onboarding.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of income channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeSourceType {
    /// Government social grant
    SocialGrant,
    /// Informal trading, piece work, gig income
    SideHustle,
    /// Money sent by relatives
    FamilySupport,
    /// Salaried employment
    FormalJob,
}

impl IncomeSourceType {
    /// Every income source type, in catalog order
    pub const ALL: [IncomeSourceType; 4] = [
        Self::SocialGrant,
        Self::SideHustle,
        Self::FamilySupport,
        Self::FormalJob,
    ];

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::SocialGrant => "Social Grant",
            Self::SideHustle => "Side Hustle",
            Self::FamilySupport => "Family Support",
            Self::FormalJob => "Formal Job",
        }
    }

    /// Parse an income source type from user text
    ///
    /// Accepts the display name or an identifier in snake/kebab case,
    /// ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();

        match normalized.as_str() {
            "socialgrant" | "grant" => Some(Self::SocialGrant),
            "sidehustle" | "hustle" => Some(Self::SideHustle),
            "familysupport" | "family" => Some(Self::FamilySupport),
            "formaljob" | "job" => Some(Self::FormalJob),
            _ => None,
        }
    }
}

impl fmt::Display for IncomeSourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A declared income source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeSource {
    /// Stable identifier from the closed enumeration
    pub id: IncomeSourceType,

    /// Display name
    pub name: String,
}

impl IncomeSource {
    /// Create the income source for a given type
    pub fn new(id: IncomeSourceType) -> Self {
        Self {
            id,
            name: id.display_name().to_string(),
        }
    }

    /// All selectable income sources, in catalog order
    pub fn catalog() -> Vec<IncomeSource> {
        IncomeSourceType::ALL.iter().copied().map(Self::new).collect()
    }
}

impl From<IncomeSourceType> for IncomeSource {
    fn from(id: IncomeSourceType) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for IncomeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
