use serde::{Deserialize, Serialize};

use crate::scripture::{Verse, VERSE_CATALOG};

/// Curated verse groups, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    Love,
    Faith,
    Hope,
    Peace,
    Strength,
    Wisdom,
    Forgiveness,
    Anxiety,
}

impl Topic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Love => "love",
            Topic::Faith => "faith",
            Topic::Hope => "hope",
            Topic::Peace => "peace",
            Topic::Strength => "strength",
            Topic::Wisdom => "wisdom",
            Topic::Forgiveness => "forgiveness",
            Topic::Anxiety => "anxiety",
        }
    }

    /// Exact match against [`Topic::as_str`]; no trimming or case folding.
    pub fn from_key(key: &str) -> Option<Self> {
        Topic::all().iter().copied().find(|t| t.as_str() == key)
    }

    /// Lenient parse for user input: trims and ignores case.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "love" => Some(Topic::Love),
            "faith" => Some(Topic::Faith),
            "hope" => Some(Topic::Hope),
            "peace" => Some(Topic::Peace),
            "strength" => Some(Topic::Strength),
            "wisdom" => Some(Topic::Wisdom),
            "forgiveness" => Some(Topic::Forgiveness),
            "anxiety" => Some(Topic::Anxiety),
            _ => None,
        }
    }

    pub fn all() -> &'static [Topic] {
        &[
            Topic::Love,
            Topic::Faith,
            Topic::Hope,
            Topic::Peace,
            Topic::Strength,
            Topic::Wisdom,
            Topic::Forgiveness,
            Topic::Anxiety,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Topic::Love => "Love",
            Topic::Faith => "Faith",
            Topic::Hope => "Hope",
            Topic::Peace => "Peace",
            Topic::Strength => "Strength",
            Topic::Wisdom => "Wisdom",
            Topic::Forgiveness => "Forgiveness",
            Topic::Anxiety => "Anxiety",
        }
    }

    /// The curated verses for this topic, in curation order.
    pub fn verses(&self) -> &'static [Verse] {
        VERSE_CATALOG
            .iter()
            .find(|(topic, _)| topic == self)
            .map(|(_, verses)| *verses)
            .unwrap_or(&[])
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_round_trips_every_topic() {
        for topic in Topic::all() {
            assert_eq!(Topic::from_str(topic.as_str()), Some(*topic));
        }
    }

    #[test]
    fn test_from_str_ignores_case_and_padding() {
        assert_eq!(Topic::from_str("  Peace "), Some(Topic::Peace));
        assert_eq!(Topic::from_str("ANXIETY"), Some(Topic::Anxiety));
        assert_eq!(Topic::from_str("joy"), None);
    }

    #[test]
    fn test_from_key_is_exact() {
        assert_eq!(Topic::from_key("peace"), Some(Topic::Peace));
        assert_eq!(Topic::from_key("Peace"), None);
        assert_eq!(Topic::from_key(" peace"), None);
        assert_eq!(Topic::from_key(""), None);
    }

    #[test]
    fn test_all_follows_catalog_order() {
        let catalog_order: Vec<Topic> = VERSE_CATALOG.iter().map(|(t, _)| *t).collect();
        assert_eq!(Topic::all(), catalog_order.as_slice());
    }
}
