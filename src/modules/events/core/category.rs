use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Awareness,
    Fundraising,
    Volunteering,
    Meeting,
}

impl Category {
    /// Display order used by the category filter.
    pub const ALL: [Category; 4] = [
        Category::Awareness,
        Category::Fundraising,
        Category::Volunteering,
        Category::Meeting,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Awareness => "Awareness",
            Category::Fundraising => "Fundraising",
            Category::Volunteering => "Volunteering",
            Category::Meeting => "Meeting",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
