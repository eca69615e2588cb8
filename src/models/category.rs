//! Budget categories
//!
//! Four categories are built in. Earnings holds income rather than spending
//! but is stored and summed the same way as the expense categories. Names
//! outside the built-in set can still appear in the ledger or in documents
//! written by other tools; those load as [`Category::Other`] so nothing is
//! dropped or rejected.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::TallyError;

/// A budget category
///
/// The derived ordering follows declaration order, which is also the order
/// categories appear in persisted documents and reports. `Other` categories
/// sort after the built-in ones, alphabetically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Shopping,
    Utilities,
    Home,
    Earnings,
    /// A category name that is not one of the built-in four
    Other(String),
}

impl Category {
    /// Every built-in category, in display order
    pub const ALL: [Category; 4] = [
        Category::Shopping,
        Category::Utilities,
        Category::Home,
        Category::Earnings,
    ];

    /// Resolve a stored or recorded name, keeping unknown names as `Other`
    pub fn from_name(name: &str) -> Self {
        let trimmed = name.trim();
        trimmed
            .parse()
            .unwrap_or_else(|_| Category::Other(trimmed.to_string()))
    }

    /// The name used in documents and the ledger
    pub fn as_str(&self) -> &str {
        match self {
            Category::Shopping => "Shopping",
            Category::Utilities => "Utilities",
            Category::Home => "Home",
            Category::Earnings => "Earnings",
            Category::Other(name) => name,
        }
    }

    /// Whether this is one of the built-in categories
    pub fn is_builtin(&self) -> bool {
        !matches!(self, Category::Other(_))
    }

    /// Whether this category records income
    pub fn is_earnings(&self) -> bool {
        matches!(self, Category::Earnings)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = TallyError;

    /// Case-insensitive match against the built-in names only
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| TallyError::UnknownCategory(trimmed.to_string()))
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Category::from_name(&name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("Shopping".parse::<Category>().unwrap(), Category::Shopping);
        assert_eq!("utilities".parse::<Category>().unwrap(), Category::Utilities);
        assert_eq!(" HOME ".parse::<Category>().unwrap(), Category::Home);
        assert!(matches!(
            "Travel".parse::<Category>(),
            Err(TallyError::UnknownCategory(name)) if name == "Travel"
        ));
    }

    #[test]
    fn test_ordering_matches_all() {
        let mut sorted = Category::ALL.to_vec();
        sorted.sort();
        assert_eq!(sorted, Category::ALL.to_vec());
    }

    #[test]
    fn test_serde_uses_canonical_name() {
        assert_eq!(serde_json::to_string(&Category::Earnings).unwrap(), "\"Earnings\"");
        let c: Category = serde_json::from_str("\"Home\"").unwrap();
        assert_eq!(c, Category::Home);
    }

    #[test]
    fn test_from_name_keeps_unknown() {
        assert_eq!(Category::from_name("earnings"), Category::Earnings);
        let travel = Category::from_name(" Travel ");
        assert_eq!(travel, Category::Other("Travel".into()));
        assert_eq!(travel.as_str(), "Travel");
        assert!(!travel.is_builtin());
        assert!(!travel.is_earnings());
    }

    #[test]
    fn test_unknown_name_survives_serde() {
        let c: Category = serde_json::from_str("\"Travel\"").unwrap();
        assert_eq!(c, Category::Other("Travel".into()));
        assert_eq!(serde_json::to_string(&c).unwrap(), "\"Travel\"");
    }

    #[test]
    fn test_other_sorts_after_builtin() {
        let mut cats = vec![
            Category::Other("Alpha".into()),
            Category::Earnings,
            Category::Shopping,
        ];
        cats.sort();
        assert_eq!(
            cats,
            vec![Category::Shopping, Category::Earnings, Category::Other("Alpha".into())]
        );
    }

    #[test]
    fn test_only_earnings_is_income() {
        let income: Vec<Category> = Category::ALL
            .into_iter()
            .filter(|c| c.is_earnings())
            .collect();
        assert_eq!(income, vec![Category::Earnings]);
    }
}
