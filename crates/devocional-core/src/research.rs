//! Keyword lookup over curated research summaries.
//!
//! Matching runs in three steps: exact key, then substring containment in
//! either direction (first key in catalog order wins), then a synthesized
//! study-guidance record. Every query resolves to a record.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Artificial wait before a research result is produced, so the UI can show
/// its "searching" state.
pub const DEFAULT_RESEARCH_DELAY: Duration = Duration::from_millis(800);

pub static SUGGESTED_TOPICS: &[&str] = &[
    "Sermon on the Mount",
    "Parables of Jesus",
    "Ten Commandments",
    "Fruits of the Spirit",
    "Book of Psalms",
    "Apostle Paul",
    "Creation",
    "Resurrection",
];

const FALLBACK_SUMMARY: &str = "While this specific topic is not in our local database, we encourage you to explore this subject through prayer, Scripture reading, and trusted commentaries. The Bible has much to say about every aspect of life and faith.";

const FALLBACK_KEY_POINTS: &[&str] = &[
    "Start with prayer for understanding and wisdom",
    "Use a concordance to find related Scripture passages",
    "Consider the historical and cultural context",
    "Compare interpretations from trusted scholars",
    "Allow the Holy Spirit to guide your study",
];

/// Catalog row. `key` is the lowercase lookup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResearchEntry {
    pub key: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    pub source: &'static str,
    pub key_points: &'static [&'static str],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchRecord {
    pub title: String,
    pub summary: String,
    pub source: String,
    pub key_points: Vec<String>,
}

impl From<&ResearchEntry> for ResearchRecord {
    fn from(entry: &ResearchEntry) -> Self {
        Self {
            title: entry.title.to_string(),
            summary: entry.summary.to_string(),
            source: entry.source.to_string(),
            key_points: entry.key_points.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// How a query was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "key", rename_all = "lowercase")]
pub enum ResearchMatch {
    Exact(&'static str),
    Contains(&'static str),
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResearchResult {
    pub record: ResearchRecord,
    pub matched: ResearchMatch,
}

impl ResearchResult {
    pub fn is_fallback(&self) -> bool {
        self.matched == ResearchMatch::Fallback
    }
}

pub static RESEARCH_CATALOG: &[ResearchEntry] = &[
    ResearchEntry {
        key: "sermon on the mount",
        title: "The Sermon on the Mount",
        summary: "The Sermon on the Mount is a collection of teachings and sayings of Jesus Christ found in the Gospel of Matthew (chapters 5-7). It is considered one of the most important passages in the New Testament and contains some of the most well-known teachings of Jesus.",
        source: "Matthew 5-7",
        key_points: &[
            "The Beatitudes (Matthew 5:3-12) - Blessings for the poor in spirit, those who mourn, the meek, etc.",
            "Salt and Light (Matthew 5:13-16) - Believers are called to be a positive influence in the world",
            "The Lord's Prayer (Matthew 6:9-13) - A model for how to pray",
            "Do not judge (Matthew 7:1-5) - Warning against hypocritical judgment",
            "The Golden Rule (Matthew 7:12) - Treat others as you would want to be treated",
        ],
    },
    ResearchEntry {
        key: "parables of jesus",
        title: "The Parables of Jesus",
        summary: "Jesus used parables—short stories with spiritual lessons—as a primary teaching method. The Gospels record over 30 distinct parables, each designed to illustrate truths about the Kingdom of God and Christian living.",
        source: "Synoptic Gospels",
        key_points: &[
            "Parable of the Sower (Matthew 13) - Different responses to God's Word",
            "Parable of the Prodigal Son (Luke 15) - God's unconditional love and forgiveness",
            "Parable of the Good Samaritan (Luke 10) - Love your neighbor without boundaries",
            "Parable of the Talents (Matthew 25) - Faithful stewardship of God's gifts",
            "Parable of the Mustard Seed (Matthew 13) - The Kingdom of God starts small but grows",
        ],
    },
    ResearchEntry {
        key: "ten commandments",
        title: "The Ten Commandments",
        summary: "The Ten Commandments, also known as the Decalogue, are a set of biblical principles relating to ethics and worship. Given by God to Moses on Mount Sinai, they form the foundation of moral law in Judaism and Christianity.",
        source: "Exodus 20:1-17, Deuteronomy 5:4-21",
        key_points: &[
            "Commandments 1-4 focus on our relationship with God",
            "Commandments 5-10 focus on our relationships with others",
            "Jesus summarized them as loving God and loving neighbor (Matthew 22:37-40)",
            "They reveal God's character and His standard of righteousness",
            "Christians view them not as a means of salvation but as a guide for righteous living",
        ],
    },
    ResearchEntry {
        key: "fruits of the spirit",
        title: "The Fruit of the Spirit",
        summary: "The Fruit of the Spirit is a biblical term that sums up nine attributes of a person living in accord with the Holy Spirit. These qualities contrast with the \"works of the flesh\" and represent the character of Christ being formed in believers.",
        source: "Galatians 5:22-23",
        key_points: &[
            "Love - Unconditional, self-sacrificing love (agape)",
            "Joy - Deep-seated gladness independent of circumstances",
            "Peace - Inner tranquility and harmony with God and others",
            "Patience - Longsuffering and endurance",
            "Kindness, Goodness, Faithfulness, Gentleness, Self-control - Character traits reflecting Christ",
        ],
    },
    ResearchEntry {
        key: "book of psalms",
        title: "The Book of Psalms",
        summary: "The Book of Psalms is a collection of 150 Hebrew poems and hymns used in ancient Israelite and Jewish worship. Written by various authors including David, it covers the full range of human emotions and experiences before God.",
        source: "Old Testament, Book of Psalms",
        key_points: &[
            "Psalms of Praise - Celebrating God's greatness and works",
            "Psalms of Lament - Honest cries for help in times of trouble",
            "Wisdom Psalms - Teaching about righteous living",
            "Messianic Psalms - Prophetically pointing to Jesus Christ",
            "The longest chapter in the Bible is Psalm 119, celebrating God's Word",
        ],
    },
    ResearchEntry {
        key: "apostle paul",
        title: "The Apostle Paul",
        summary: "Paul of Tarsus, originally named Saul, was a first-century apostle who wrote much of the New Testament. After his dramatic conversion on the road to Damascus, he became Christianity's most influential missionary and theologian.",
        source: "Acts 9-28, Pauline Epistles",
        key_points: &[
            "Wrote 13 epistles that comprise a significant portion of the New Testament",
            "Key theological contributions: justification by faith, the body of Christ, grace",
            "Established churches throughout the Roman Empire on three missionary journeys",
            "Transformed from persecutor of Christians to their greatest advocate",
            "His letters address practical Christian living and foundational doctrine",
        ],
    },
    ResearchEntry {
        key: "creation",
        title: "The Creation Account",
        summary: "The creation narrative in Genesis describes God creating the universe, Earth, and all living things. It establishes fundamental truths about God's sovereignty, the goodness of creation, and humanity's unique role as image-bearers of God.",
        source: "Genesis 1-2",
        key_points: &[
            "God created everything from nothing (ex nihilo) by His word",
            "Creation was declared \"very good\" by God",
            "Humans are created in God's image (imago Dei)",
            "The Sabbath rest is established as a pattern for humanity",
            "Creation reveals God's power and divine nature (Romans 1:20)",
        ],
    },
    ResearchEntry {
        key: "resurrection",
        title: "The Resurrection of Jesus",
        summary: "The resurrection of Jesus Christ is the central event of Christianity. According to the New Testament, Jesus rose from the dead on the third day after his crucifixion, demonstrating His victory over sin and death.",
        source: "Matthew 28, Mark 16, Luke 24, John 20, 1 Corinthians 15",
        key_points: &[
            "The empty tomb was discovered on the first day of the week",
            "Jesus appeared to many witnesses over 40 days",
            "Paul calls the resurrection essential to faith (1 Corinthians 15:14)",
            "It confirms Jesus' identity as the Son of God",
            "Believers share in resurrection hope (1 Corinthians 15:20-22)",
        ],
    },
];

fn find_entry(normalized: &str) -> Option<(&'static ResearchEntry, ResearchMatch)> {
    if let Some(entry) = RESEARCH_CATALOG.iter().find(|e| e.key == normalized) {
        return Some((entry, ResearchMatch::Exact(entry.key)));
    }

    RESEARCH_CATALOG
        .iter()
        .find(|e| e.key.contains(normalized) || normalized.contains(e.key))
        .map(|entry| (entry, ResearchMatch::Contains(entry.key)))
}

/// Study-guidance record for terms with no catalog entry. The title embeds
/// the term exactly as the user typed it.
pub fn fallback_record(raw_term: &str) -> ResearchRecord {
    ResearchRecord {
        title: format!("Research: \"{}\"", raw_term),
        summary: FALLBACK_SUMMARY.to_string(),
        source: format!("Try searching for: {}", SUGGESTED_TOPICS[..3].join(", ")),
        key_points: FALLBACK_KEY_POINTS.iter().map(|p| p.to_string()).collect(),
    }
}

/// Resolve a research term without any delay.
pub fn lookup(raw_term: &str) -> ResearchResult {
    let normalized = raw_term.trim().to_lowercase();

    let found = if normalized.is_empty() {
        None
    } else {
        find_entry(&normalized)
    };

    let result = match found {
        Some((entry, matched)) => ResearchResult {
            record: entry.into(),
            matched,
        },
        None => ResearchResult {
            record: fallback_record(raw_term),
            matched: ResearchMatch::Fallback,
        },
    };

    info!(term = raw_term, matched = ?result.matched, "research query resolved");
    result
}

/// Research lookup with a configurable artificial latency.
#[derive(Debug, Clone, Copy)]
pub struct ResearchEngine {
    delay: Duration,
}

impl Default for ResearchEngine {
    fn default() -> Self {
        Self::new(DEFAULT_RESEARCH_DELAY)
    }
}

impl ResearchEngine {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// No artificial wait. Used by one-shot commands and tests.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub async fn query(&self, raw_term: &str) -> ResearchResult {
        if !self.delay.is_zero() {
            debug!(delay_ms = self.delay.as_millis() as u64, "simulating research latency");
            tokio::time::sleep(self.delay).await;
        }
        lookup(raw_term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_any_case() {
        for term in ["Sermon on the Mount", "sermon on the mount", "SERMON ON THE MOUNT"] {
            let result = lookup(term);
            assert_eq!(result.matched, ResearchMatch::Exact("sermon on the mount"));
            assert_eq!(result.record.title, "The Sermon on the Mount");
            assert_eq!(result.record.source, "Matthew 5-7");
        }
    }

    #[test]
    fn test_exact_match_trims_term() {
        let result = lookup("  creation  ");
        assert_eq!(result.matched, ResearchMatch::Exact("creation"));
        assert_eq!(result.record.source, "Genesis 1-2");
    }

    #[test]
    fn test_key_contains_term() {
        let result = lookup("Psalms");
        assert_eq!(result.matched, ResearchMatch::Contains("book of psalms"));
        assert_eq!(result.record.title, "The Book of Psalms");
    }

    #[test]
    fn test_term_contains_key() {
        let result = lookup("the resurrection of christ");
        assert_eq!(result.matched, ResearchMatch::Contains("resurrection"));
        assert_eq!(result.record.title, "The Resurrection of Jesus");
    }

    #[test]
    fn test_containment_first_key_wins() {
        // "the" is inside several keys; catalog order decides
        let result = lookup("the");
        assert_eq!(result.matched, ResearchMatch::Contains("sermon on the mount"));
    }

    #[test]
    fn test_fallback_record() {
        let result = lookup("nonexistent-topic-xyz");
        assert!(result.is_fallback());
        assert!(result.record.title.contains("nonexistent-topic-xyz"));
        assert_eq!(result.record.key_points.len(), 5);
        assert_eq!(
            result.record.source,
            "Try searching for: Sermon on the Mount, Parables of Jesus, Ten Commandments"
        );
    }

    #[test]
    fn test_fallback_title_keeps_raw_term() {
        let result = lookup("Gifts Of Tongues");
        assert_eq!(result.record.title, "Research: \"Gifts Of Tongues\"");
    }

    #[test]
    fn test_blank_term_falls_back() {
        assert!(lookup("   ").is_fallback());
    }

    #[test]
    fn test_every_suggested_topic_resolves() {
        for topic in SUGGESTED_TOPICS {
            assert!(!lookup(topic).is_fallback(), "{} fell back", topic);
        }
    }

    #[tokio::test]
    async fn test_instant_engine_resolves() {
        let engine = ResearchEngine::instant();
        let result = engine.query("apostle paul").await;
        assert_eq!(result.record.source, "Acts 9-28, Pauline Epistles");
    }

    #[tokio::test]
    async fn test_engine_waits_for_delay() {
        let engine = ResearchEngine::new(Duration::from_millis(20));
        let started = tokio::time::Instant::now();
        let result = engine.query("ten commandments").await;
        assert!(started.elapsed() >= Duration::from_millis(20));
        assert_eq!(result.record.title, "The Ten Commandments");
    }
}
