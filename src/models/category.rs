//! Category model
//!
//! Records are classified with one label from a fixed set. The set is closed:
//! there is no user-defined category management.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A category label from the fixed set
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Housing,
    Transportation,
    Business,
    Entertainment,
    Healthcare,
    Income,
    Shopping,
    Utilities,
    Insurance,
    Education,
    Travel,
    #[serde(rename = "Personal Care")]
    PersonalCare,
    #[serde(rename = "Gifts & Donations")]
    GiftsAndDonations,
    Investment,
    Taxes,
    Other,
}

impl Category {
    /// Every category, in display order
    pub const ALL: [Category; 17] = [
        Category::Food,
        Category::Housing,
        Category::Transportation,
        Category::Business,
        Category::Entertainment,
        Category::Healthcare,
        Category::Income,
        Category::Shopping,
        Category::Utilities,
        Category::Insurance,
        Category::Education,
        Category::Travel,
        Category::PersonalCare,
        Category::GiftsAndDonations,
        Category::Investment,
        Category::Taxes,
        Category::Other,
    ];

    /// The label used for display, filtering and interchange
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Housing => "Housing",
            Self::Transportation => "Transportation",
            Self::Business => "Business",
            Self::Entertainment => "Entertainment",
            Self::Healthcare => "Healthcare",
            Self::Income => "Income",
            Self::Shopping => "Shopping",
            Self::Utilities => "Utilities",
            Self::Insurance => "Insurance",
            Self::Education => "Education",
            Self::Travel => "Travel",
            Self::PersonalCare => "Personal Care",
            Self::GiftsAndDonations => "Gifts & Donations",
            Self::Investment => "Investment",
            Self::Taxes => "Taxes",
            Self::Other => "Other",
        }
    }

    /// Look up a category by label, ignoring case and surrounding whitespace
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.label().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| UnknownCategory(s.trim().to_string()))
    }
}

/// Error returned when a label is not in the fixed set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown category '{}'", self.0)
    }
}

impl std::error::Error for UnknownCategory {}
