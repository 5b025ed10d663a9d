use std::collections::HashSet;

use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::topic::Topic;

/// A single curated verse. `reference` is the identity key everywhere
/// (search dedup, saved verses).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Verse {
    pub reference: &'static str,
    pub text: &'static str,
    pub book: &'static str,
    pub chapter: u32,
    pub verse: u32,
}

impl Verse {
    fn matches(&self, query_lower: &str) -> bool {
        self.text.to_lowercase().contains(query_lower)
            || self.reference.to_lowercase().contains(query_lower)
            || self.book.to_lowercase().contains(query_lower)
    }
}

const fn verse(
    reference: &'static str,
    text: &'static str,
    book: &'static str,
    chapter: u32,
    verse: u32,
) -> Verse {
    Verse {
        reference,
        text,
        book,
        chapter,
        verse,
    }
}

/// Topic -> verses, in topic order then curation order.
pub static VERSE_CATALOG: &[(Topic, &[Verse])] = &[
    (Topic::Love, LOVE),
    (Topic::Faith, FAITH),
    (Topic::Hope, HOPE),
    (Topic::Peace, PEACE),
    (Topic::Strength, STRENGTH),
    (Topic::Wisdom, WISDOM),
    (Topic::Forgiveness, FORGIVENESS),
    (Topic::Anxiety, ANXIETY),
];

/// Every verse in scan order, duplicates across topics included.
pub fn all_verses() -> impl Iterator<Item = &'static Verse> {
    VERSE_CATALOG.iter().flat_map(|(_, verses)| verses.iter())
}

/// Exact, case-sensitive topic lookup. Unknown keys yield an empty slice.
pub fn by_topic(topic: &str) -> &'static [Verse] {
    let verses = Topic::from_key(topic).map(|t| t.verses()).unwrap_or(&[]);
    debug!(topic, count = verses.len(), "topic lookup");
    verses
}

/// Case-insensitive substring search over text, reference and book.
///
/// Results keep first-occurrence scan order and never repeat a reference.
/// A blank query returns nothing; callers are expected not to issue one.
pub fn search(query: &str) -> Vec<&'static Verse> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    let query_lower = query.to_lowercase();
    let mut seen = HashSet::new();

    let results: Vec<&'static Verse> = all_verses()
        .filter(|verse| verse.matches(&query_lower))
        .filter(|verse| seen.insert(verse.reference))
        .collect();

    debug!(query, count = results.len(), "verse search");
    results
}

/// Uniform pick over the flattened catalog using the thread-local RNG.
pub fn random_verse() -> &'static Verse {
    random_verse_with(&mut rand::thread_rng())
}

/// Uniform pick over the flattened catalog. Duplicates across topics are
/// not collapsed, so each catalog slot is equally likely.
pub fn random_verse_with<R: Rng + ?Sized>(rng: &mut R) -> &'static Verse {
    let pool: Vec<&'static Verse> = all_verses().collect();
    let picked = pool[rng.gen_range(0..pool.len())];
    debug!(reference = picked.reference, "random verse");
    picked
}

const LOVE: &[Verse] = &[
    verse(
        "John 3:16",
        "For God so loved the world that he gave his one and only Son, that whoever believes in him shall not perish but have eternal life.",
        "John",
        3,
        16,
    ),
    verse(
        "1 Corinthians 13:4-7",
        "Love is patient, love is kind. It does not envy, it does not boast, it is not proud. It does not dishonor others, it is not self-seeking, it is not easily angered, it keeps no record of wrongs. Love does not delight in evil but rejoices with the truth. It always protects, always trusts, always hopes, always perseveres.",
        "1 Corinthians",
        13,
        4,
    ),
    verse(
        "1 John 4:19",
        "We love because he first loved us.",
        "1 John",
        4,
        19,
    ),
    verse(
        "Romans 8:38-39",
        "For I am convinced that neither death nor life, neither angels nor demons, neither the present nor the future, nor any powers, neither height nor depth, nor anything else in all creation, will be able to separate us from the love of God that is in Christ Jesus our Lord.",
        "Romans",
        8,
        38,
    ),
];

const FAITH: &[Verse] = &[
    verse(
        "Hebrews 11:1",
        "Now faith is confidence in what we hope for and assurance about what we do not see.",
        "Hebrews",
        11,
        1,
    ),
    verse(
        "Matthew 17:20",
        "He replied, 'Because you have so little faith. Truly I tell you, if you have faith as small as a mustard seed, you can say to this mountain, \"Move from here to there,\" and it will move. Nothing will be impossible for you.'",
        "Matthew",
        17,
        20,
    ),
    verse(
        "Romans 10:17",
        "Consequently, faith comes from hearing the message, and the message is heard through the word about Christ.",
        "Romans",
        10,
        17,
    ),
    verse(
        "James 2:17",
        "In the same way, faith by itself, if it is not accompanied by action, is dead.",
        "James",
        2,
        17,
    ),
];

const HOPE: &[Verse] = &[
    verse(
        "Romans 15:13",
        "May the God of hope fill you with all joy and peace as you trust in him, so that you may overflow with hope by the power of the Holy Spirit.",
        "Romans",
        15,
        13,
    ),
    verse(
        "Jeremiah 29:11",
        "For I know the plans I have for you, declares the LORD, plans to prosper you and not to harm you, plans to give you hope and a future.",
        "Jeremiah",
        29,
        11,
    ),
    verse(
        "Isaiah 40:31",
        "But those who hope in the LORD will renew their strength. They will soar on wings like eagles; they will run and not grow weary, they will walk and not be faint.",
        "Isaiah",
        40,
        31,
    ),
    verse(
        "Psalm 42:11",
        "Why, my soul, are you downcast? Why so disturbed within me? Put your hope in God, for I will yet praise him, my Savior and my God.",
        "Psalm",
        42,
        11,
    ),
];

const PEACE: &[Verse] = &[
    verse(
        "Philippians 4:6-7",
        "Do not be anxious about anything, but in every situation, by prayer and petition, with thanksgiving, present your requests to God. And the peace of God, which transcends all understanding, will guard your hearts and your minds in Christ Jesus.",
        "Philippians",
        4,
        6,
    ),
    verse(
        "John 14:27",
        "Peace I leave with you; my peace I give you. I do not give to you as the world gives. Do not let your hearts be troubled and do not be afraid.",
        "John",
        14,
        27,
    ),
    verse(
        "Isaiah 26:3",
        "You will keep in perfect peace those whose minds are steadfast, because they trust in you.",
        "Isaiah",
        26,
        3,
    ),
    verse(
        "Psalm 46:10",
        "Be still, and know that I am God; I will be exalted among the nations, I will be exalted in the earth.",
        "Psalm",
        46,
        10,
    ),
];

const STRENGTH: &[Verse] = &[
    verse(
        "Philippians 4:13",
        "I can do all this through him who gives me strength.",
        "Philippians",
        4,
        13,
    ),
    verse(
        "Isaiah 41:10",
        "So do not fear, for I am with you; do not be dismayed, for I am your God. I will strengthen you and help you; I will uphold you with my righteous right hand.",
        "Isaiah",
        41,
        10,
    ),
    verse(
        "2 Corinthians 12:9",
        "But he said to me, 'My grace is sufficient for you, for my power is made perfect in weakness.' Therefore I will boast all the more gladly about my weaknesses, so that Christ's power may rest on me.",
        "2 Corinthians",
        12,
        9,
    ),
    verse(
        "Nehemiah 8:10",
        "Do not grieve, for the joy of the LORD is your strength.",
        "Nehemiah",
        8,
        10,
    ),
];

const WISDOM: &[Verse] = &[
    verse(
        "James 1:5",
        "If any of you lacks wisdom, you should ask God, who gives generously to all without finding fault, and it will be given to you.",
        "James",
        1,
        5,
    ),
    verse(
        "Proverbs 3:5-6",
        "Trust in the LORD with all your heart and lean not on your own understanding; in all your ways submit to him, and he will make your paths straight.",
        "Proverbs",
        3,
        5,
    ),
    verse(
        "Proverbs 9:10",
        "The fear of the LORD is the beginning of wisdom, and knowledge of the Holy One is understanding.",
        "Proverbs",
        9,
        10,
    ),
    verse(
        "Colossians 3:16",
        "Let the message of Christ dwell among you richly as you teach and admonish one another with all wisdom through psalms, hymns, and songs from the Spirit, singing to God with gratitude in your hearts.",
        "Colossians",
        3,
        16,
    ),
];

const FORGIVENESS: &[Verse] = &[
    verse(
        "1 John 1:9",
        "If we confess our sins, he is faithful and just and will forgive us our sins and purify us from all unrighteousness.",
        "1 John",
        1,
        9,
    ),
    verse(
        "Ephesians 4:32",
        "Be kind and compassionate to one another, forgiving each other, just as in Christ God forgave you.",
        "Ephesians",
        4,
        32,
    ),
    verse(
        "Matthew 6:14",
        "For if you forgive other people when they sin against you, your heavenly Father will also forgive you.",
        "Matthew",
        6,
        14,
    ),
    verse(
        "Psalm 103:12",
        "As far as the east is from the west, so far has he removed our transgressions from us.",
        "Psalm",
        103,
        12,
    ),
];

const ANXIETY: &[Verse] = &[
    verse(
        "Matthew 6:34",
        "Therefore do not worry about tomorrow, for tomorrow will worry about itself. Each day has enough trouble of its own.",
        "Matthew",
        6,
        34,
    ),
    verse(
        "1 Peter 5:7",
        "Cast all your anxiety on him because he cares for you.",
        "1 Peter",
        5,
        7,
    ),
    verse(
        "Psalm 55:22",
        "Cast your cares on the LORD and he will sustain you; he will never let the righteous be shaken.",
        "Psalm",
        55,
        22,
    ),
    verse(
        "Matthew 11:28-30",
        "Come to me, all you who are weary and burdened, and I will give you rest. Take my yoke upon you and learn from me, for I am gentle and humble in heart, and you will find rest for your souls. For my yoke is easy and my burden is light.",
        "Matthew",
        11,
        28,
    ),
];
#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    #[test]
    fn test_love_topic_in_curation_order() {
        let refs: Vec<&str> = by_topic("love").iter().map(|v| v.reference).collect();
        assert_eq!(
            refs,
            vec!["John 3:16", "1 Corinthians 13:4-7", "1 John 4:19", "Romans 8:38-39"]
        );
    }

    #[test]
    fn test_unknown_topic_is_empty() {
        assert!(by_topic("gratitude").is_empty());
        assert!(by_topic("").is_empty());
    }

    #[test]
    fn test_topic_key_must_match_exactly() {
        assert!(by_topic("LOVE").is_empty());
        assert!(by_topic(" love").is_empty());
        assert!(by_topic("love ").is_empty());
        assert!(by_topic("Love").is_empty());
    }

    #[test]
    fn test_every_topic_has_four_verses() {
        for topic in Topic::all() {
            assert_eq!(topic.verses().len(), 4, "topic {}", topic);
        }
    }

    #[test]
    fn test_blank_search_returns_nothing() {
        assert!(search("").is_empty());
        assert!(search("   ").is_empty());
    }

    #[test]
    fn test_search_matches_text_reference_and_book() {
        let by_text = search("mustard seed");
        assert_eq!(by_text.len(), 1);
        assert_eq!(by_text[0].reference, "Matthew 17:20");

        let by_reference = search("3:16");
        assert!(by_reference.iter().any(|v| v.reference == "John 3:16"));

        let by_book = search("NEHEMIAH");
        assert_eq!(by_book.len(), 1);
        assert_eq!(by_book[0].book, "Nehemiah");
    }

    #[test]
    fn test_search_results_are_unique_and_match() {
        for query in ["love", "the", "peace", "Psalm", "lord"] {
            let results = search(query);
            let lower = query.to_lowercase();
            let mut seen = HashSet::new();
            for verse in &results {
                assert!(seen.insert(verse.reference), "duplicate {}", verse.reference);
                assert!(
                    verse.text.to_lowercase().contains(&lower)
                        || verse.reference.to_lowercase().contains(&lower)
                        || verse.book.to_lowercase().contains(&lower)
                );
            }
        }
    }

    #[test]
    fn test_search_keeps_scan_order() {
        let results = search("matthew");
        let refs: Vec<&str> = results.iter().map(|v| v.reference).collect();
        assert_eq!(
            refs,
            vec!["Matthew 17:20", "Matthew 6:14", "Matthew 6:34", "Matthew 11:28-30"]
        );
    }

    #[test]
    fn test_search_no_match() {
        assert!(search("zebulun").is_empty());
    }

    #[test]
    fn test_random_verse_is_uniform() {
        let pool: Vec<&Verse> = all_verses().collect();
        let slots = pool.len();
        let trials = 10_000;
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut counts: HashMap<&str, usize> = HashMap::new();

        for _ in 0..trials {
            *counts.entry(random_verse_with(&mut rng).reference).or_default() += 1;
        }

        let expected = trials as f64 / slots as f64;
        assert_eq!(counts.len(), slots);
        for (reference, count) in counts {
            let ratio = count as f64 / expected;
            assert!(
                (0.65..=1.35).contains(&ratio),
                "{} drawn {} times, expected about {}",
                reference,
                count,
                expected
            );
        }
    }

    #[test]
    fn test_random_verse_comes_from_catalog() {
        let picked = random_verse();
        assert!(all_verses().any(|v| v == picked));
    }
}
