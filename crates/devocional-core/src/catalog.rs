//! Startup checks over the compiled-in catalogs.
//!
//! The engines assume every catalog is non-empty and keyed consistently.
//! Call [`validate_catalogs`] once before serving a session; a failure is a
//! build-time data mistake, not something a session can recover from.

use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use crate::devotion::{Devotion, DEVOTIONS};
use crate::research::{ResearchEntry, RESEARCH_CATALOG, SUGGESTED_TOPICS};
use crate::scripture::{Verse, VERSE_CATALOG};
use crate::topic::Topic;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("verse catalog is empty")]
    NoVerses,

    #[error("topic '{0}' has no verses")]
    EmptyTopic(Topic),

    #[error("topic '{topic}' lists {reference} more than once")]
    DuplicateInTopic { topic: Topic, reference: String },

    #[error("reference {0} has conflicting records across topics")]
    ConflictingReference(String),

    #[error("devotion catalog is empty")]
    NoDevotions,

    #[error("research catalog is empty")]
    NoResearch,

    #[error("research key '{0}' is not normalized")]
    UnnormalizedKey(String),

    #[error("research key '{0}' is defined more than once")]
    DuplicateResearchKey(String),

    #[error("need at least three suggested topics, found {0}")]
    TooFewSuggestions(usize),
}

pub fn validate_catalogs() -> Result<(), CatalogError> {
    validate_verses(VERSE_CATALOG)?;
    validate_devotions(DEVOTIONS)?;
    validate_research(RESEARCH_CATALOG, SUGGESTED_TOPICS)?;
    debug!(
        topics = VERSE_CATALOG.len(),
        devotions = DEVOTIONS.len(),
        research = RESEARCH_CATALOG.len(),
        "catalogs validated"
    );
    Ok(())
}

fn validate_verses(catalog: &[(Topic, &[Verse])]) -> Result<(), CatalogError> {
    if catalog.is_empty() {
        return Err(CatalogError::NoVerses);
    }

    // A verse may sit under several topics, but only as the same record.
    let mut by_reference: HashMap<&str, &Verse> = HashMap::new();

    for (topic, verses) in catalog {
        if verses.is_empty() {
            return Err(CatalogError::EmptyTopic(*topic));
        }

        for (i, verse) in verses.iter().enumerate() {
            if verses[..i].iter().any(|v| v.reference == verse.reference) {
                return Err(CatalogError::DuplicateInTopic {
                    topic: *topic,
                    reference: verse.reference.to_string(),
                });
            }

            match by_reference.get(verse.reference) {
                Some(existing) if *existing != verse => {
                    return Err(CatalogError::ConflictingReference(
                        verse.reference.to_string(),
                    ));
                }
                Some(_) => {}
                None => {
                    by_reference.insert(verse.reference, verse);
                }
            }
        }
    }

    Ok(())
}

fn validate_devotions(devotions: &[Devotion]) -> Result<(), CatalogError> {
    if devotions.is_empty() {
        return Err(CatalogError::NoDevotions);
    }
    Ok(())
}

fn validate_research(entries: &[ResearchEntry], suggested: &[&str]) -> Result<(), CatalogError> {
    if entries.is_empty() {
        return Err(CatalogError::NoResearch);
    }

    for (i, entry) in entries.iter().enumerate() {
        if entry.key != entry.key.trim().to_lowercase() {
            return Err(CatalogError::UnnormalizedKey(entry.key.to_string()));
        }
        if entries[..i].iter().any(|e| e.key == entry.key) {
            return Err(CatalogError::DuplicateResearchKey(entry.key.to_string()));
        }
    }

    if suggested.len() < 3 {
        return Err(CatalogError::TooFewSuggestions(suggested.len()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PSALM: Verse = Verse {
        reference: "Psalm 1:1",
        text: "Blessed is the one",
        book: "Psalm",
        chapter: 1,
        verse: 1,
    };

    fn entry(key: &'static str) -> ResearchEntry {
        ResearchEntry {
            key,
            title: "Title",
            summary: "Summary",
            source: "Source",
            key_points: &[],
        }
    }

    #[test]
    fn test_builtin_catalogs_are_valid() {
        assert_eq!(validate_catalogs(), Ok(()));
    }

    #[test]
    fn test_empty_catalogs_rejected() {
        assert_eq!(validate_verses(&[]), Err(CatalogError::NoVerses));
        assert_eq!(validate_devotions(&[]), Err(CatalogError::NoDevotions));
        assert_eq!(
            validate_research(&[], SUGGESTED_TOPICS),
            Err(CatalogError::NoResearch)
        );
    }

    #[test]
    fn test_empty_topic_rejected() {
        let catalog: &[(Topic, &[Verse])] = &[(Topic::Hope, &[])];
        assert_eq!(
            validate_verses(catalog),
            Err(CatalogError::EmptyTopic(Topic::Hope))
        );
    }

    #[test]
    fn test_shared_reference_must_match() {
        let same: &[(Topic, &[Verse])] = &[(Topic::Hope, &[PSALM]), (Topic::Peace, &[PSALM])];
        assert_eq!(validate_verses(same), Ok(()));

        let altered = Verse {
            text: "Something else",
            ..PSALM
        };
        let conflicting: &[(Topic, &[Verse])] =
            &[(Topic::Hope, &[PSALM]), (Topic::Peace, &[altered])];
        assert_eq!(
            validate_verses(conflicting),
            Err(CatalogError::ConflictingReference("Psalm 1:1".to_string()))
        );
    }

    #[test]
    fn test_duplicate_in_topic_rejected() {
        let catalog: &[(Topic, &[Verse])] = &[(Topic::Love, &[PSALM, PSALM])];
        assert!(matches!(
            validate_verses(catalog),
            Err(CatalogError::DuplicateInTopic { topic: Topic::Love, .. })
        ));
    }

    #[test]
    fn test_research_keys_checked() {
        assert_eq!(
            validate_research(&[entry("Creation")], SUGGESTED_TOPICS),
            Err(CatalogError::UnnormalizedKey("Creation".to_string()))
        );
        assert_eq!(
            validate_research(&[entry("creation"), entry("creation")], SUGGESTED_TOPICS),
            Err(CatalogError::DuplicateResearchKey("creation".to_string()))
        );
        assert_eq!(
            validate_research(&[entry("creation")], &["one", "two"]),
            Err(CatalogError::TooFewSuggestions(2))
        );
    }
}
