use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{Display, Formatter};

/// The category given to transactions that were entered without one.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// The category of a transaction, e.g. `food` or `salary`.
///
/// This is the only place where a blank or missing category is folded into [`UNCATEGORIZED`].
/// Both the constructor and the deserializer go through [`Category::new`], so every `Category`
/// that exists is already normalized.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            Self::uncategorized()
        } else if trimmed.len() == name.len() {
            Self(name)
        } else {
            Self(trimmed.to_string())
        }
    }

    /// Normalizes an optional category, as supplied by a caller.
    pub fn from_input(name: Option<&str>) -> Self {
        name.map(Category::new).unwrap_or_default()
    }

    pub fn uncategorized() -> Self {
        Self(UNCATEGORIZED.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::uncategorized()
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Category {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Category::new(value)
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = Option::<String>::deserialize(deserializer)?;
        Ok(s.map(Category::new).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_is_uncategorized() {
        assert_eq!(Category::new("").as_str(), UNCATEGORIZED);
        assert_eq!(Category::new("   ").as_str(), UNCATEGORIZED);
        assert_eq!(Category::from_input(None).as_str(), UNCATEGORIZED);
        assert_eq!(Category::from_input(Some("\t")).as_str(), UNCATEGORIZED);
    }

    #[test]
    fn test_trimmed() {
        assert_eq!(Category::new(" food ").as_str(), "food");
        assert_eq!(Category::from_input(Some("bills")).as_str(), "bills");
    }

    #[test]
    fn test_deserialize_null_and_blank() {
        let c: Category = serde_json::from_str("null").unwrap();
        assert_eq!(c, Category::uncategorized());
        let c: Category = serde_json::from_str("\" \"").unwrap();
        assert_eq!(c, Category::uncategorized());
        let c: Category = serde_json::from_str("\"rent\"").unwrap();
        assert_eq!(c.as_str(), "rent");
    }

    #[test]
    fn test_serialize_transparent() {
        let json = serde_json::to_string(&Category::new("food")).unwrap();
        assert_eq!(json, "\"food\"");
    }
}
