//! Devotion of the day.
//!
//! The devotion is picked from the calendar day alone, so every view on the
//! same local day shows the same entry.

use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone, Timelike};
use serde::Serialize;

pub const APP_TITLE: &str = "Making Time for the Lord";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Devotion {
    pub verse: &'static str,
    pub reference: &'static str,
    pub reflection: &'static str,
    pub prayer: &'static str,
}

pub static DEVOTIONS: &[Devotion] = &[
    Devotion {
        verse: "Be still, and know that I am God; I will be exalted among the nations, I will be exalted in the earth.",
        reference: "Psalm 46:10",
        reflection: "In the chaos of daily life, God calls us to stillness. Not passivity, but a confident rest in His sovereignty. Today, find moments to pause, breathe, and remember that the Creator of the universe holds you in His hands.",
        prayer: "Lord, quiet my restless heart. Help me to trust in Your perfect timing and Your unfailing love. May I find peace in Your presence today.",
    },
    Devotion {
        verse: "Trust in the LORD with all your heart and lean not on your own understanding; in all your ways submit to him, and he will make your paths straight.",
        reference: "Proverbs 3:5-6",
        reflection: "Our human wisdom is limited, but God sees the full picture. When we surrender our plans to Him, we discover a path we never could have charted ourselves—one that leads to abundant life.",
        prayer: "Father, I release my need to control. Guide my steps today, and give me faith to follow where You lead, even when the path is unclear.",
    },
    Devotion {
        verse: "Come to me, all you who are weary and burdened, and I will give you rest.",
        reference: "Matthew 11:28",
        reflection: "Jesus doesn't call the strong—He calls the tired, the overwhelmed, the broken. His invitation is not to try harder, but to come closer. Today, lay your burdens at His feet.",
        prayer: "Jesus, I come to You with all my weariness. Thank You for accepting me as I am. Fill me with Your rest and renew my strength.",
    },
    Devotion {
        verse: "For I know the plans I have for you, declares the LORD, plans to prosper you and not to harm you, plans to give you hope and a future.",
        reference: "Jeremiah 29:11",
        reflection: "Even in exile, God promised restoration to His people. Whatever wilderness you find yourself in today, know that God's plans for you are good. He is working all things together for your benefit.",
        prayer: "Lord, when I cannot see the way forward, help me to trust Your plans. Thank You for the hope and future You have prepared for me.",
    },
    Devotion {
        verse: "The Lord is my shepherd; I shall not want. He makes me lie down in green pastures. He leads me beside still waters. He restores my soul.",
        reference: "Psalm 23:1-3",
        reflection: "Like a shepherd who knows each sheep by name, God tends to your every need. He leads you to places of nourishment and peace. Let Him restore what life has depleted.",
        prayer: "Good Shepherd, lead me today to the places of rest my soul needs. Restore what is broken and fill what is empty within me.",
    },
    Devotion {
        verse: "But seek first his kingdom and his righteousness, and all these things will be given to you as well.",
        reference: "Matthew 6:33",
        reflection: "When we prioritize God's kingdom above our anxieties, something shifts. Our worries don't disappear, but they are reordered. What we need is provided as we pursue what matters most.",
        prayer: "Father, help me to put You first today—before my worries, before my ambitions, before my fears. May Your kingdom be my priority.",
    },
    Devotion {
        verse: "I can do all this through him who gives me strength.",
        reference: "Philippians 4:13",
        reflection: "This is not a promise of worldly success, but of spiritual sufficiency. Whatever you face today—abundance or need, triumph or trial—Christ's strength is enough to carry you through.",
        prayer: "Lord Jesus, be my strength today. Not for my own glory, but so that Your power may be displayed in my weakness.",
    },
];

/// Index into a catalog of `len` devotions for the given date.
/// January 1st is day 1, so it maps to index `1 % len`.
///
/// # Panics
///
/// Panics if `len` is zero. An empty catalog is rejected at startup by
/// [`crate::catalog::validate_catalogs`].
pub fn devotion_index(date: NaiveDate, len: usize) -> usize {
    date.ordinal() as usize % len
}

pub fn select_devotion(date: NaiveDate, catalog: &[Devotion]) -> &Devotion {
    &catalog[devotion_index(date, catalog.len())]
}

pub fn devotion_for(date: NaiveDate) -> &'static Devotion {
    select_devotion(date, DEVOTIONS)
}

/// Devotion for the calendar day `when` falls on, in its own timezone.
pub fn devotion_at<Tz: TimeZone>(when: &DateTime<Tz>) -> &'static Devotion {
    devotion_for(when.date_naive())
}

pub fn todays_devotion() -> &'static Devotion {
    devotion_at(&Local::now())
}

pub fn greeting(hour: u32) -> &'static str {
    if hour < 12 {
        "Good Morning"
    } else if hour < 17 {
        "Good Afternoon"
    } else {
        "Good Evening"
    }
}

pub fn current_greeting() -> &'static str {
    greeting(Local::now().hour())
}

/// e.g. "Friday, October 16"
pub fn date_header(date: NaiveDate) -> String {
    date.format("%A, %B %-d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_january_first_is_day_one() {
        assert_eq!(devotion_index(date(2026, 1, 1), DEVOTIONS.len()), 1);
        assert_eq!(devotion_for(date(2026, 1, 1)).reference, "Proverbs 3:5-6");
    }

    #[test]
    fn test_index_wraps_around_catalog() {
        assert_eq!(devotion_for(date(2026, 1, 7)).reference, "Psalm 46:10");
        // 2024 is a leap year: Dec 31 is day 366
        assert_eq!(devotion_index(date(2024, 12, 31), 7), 2);
        assert_eq!(devotion_for(date(2026, 10, 16)).reference, "Matthew 11:28");
    }

    #[test]
    fn test_index_always_in_range() {
        let mut day = date(2024, 1, 1);
        for len in 1..=10 {
            for _ in 0..400 {
                assert!(devotion_index(day, len) < len);
                day = day.succ_opt().unwrap();
            }
        }
    }

    #[test]
    fn test_same_local_day_same_devotion() {
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        let morning = tz.with_ymd_and_hms(2026, 3, 9, 0, 0, 1).unwrap();
        let night = tz.with_ymd_and_hms(2026, 3, 9, 23, 59, 59).unwrap();
        assert_eq!(devotion_at(&morning), devotion_at(&night));

        let next = tz.with_ymd_and_hms(2026, 3, 10, 0, 0, 0).unwrap();
        assert_ne!(devotion_at(&night), devotion_at(&next));
    }

    #[test]
    fn test_select_uses_given_catalog() {
        let single = [DEVOTIONS[3]];
        assert_eq!(select_devotion(date(2026, 5, 5), &single), &DEVOTIONS[3]);
    }

    #[test]
    fn test_greeting_boundaries() {
        assert_eq!(greeting(0), "Good Morning");
        assert_eq!(greeting(11), "Good Morning");
        assert_eq!(greeting(12), "Good Afternoon");
        assert_eq!(greeting(16), "Good Afternoon");
        assert_eq!(greeting(17), "Good Evening");
        assert_eq!(greeting(23), "Good Evening");
    }

    #[test]
    fn test_date_header() {
        assert_eq!(date_header(date(2026, 10, 16)), "Friday, October 16");
        assert_eq!(date_header(date(2026, 1, 4)), "Sunday, January 4");
    }
}
