//! One-shot commands that print straight to stdout.

use chrono::{Local, NaiveDate, Timelike};
use colored::*;

use devocional_core::devotion::{self, APP_TITLE};
use devocional_core::research::SUGGESTED_TOPICS;
use devocional_core::{scripture, ResearchEngine, ResearchState, Session, Topic, Verse};

fn print_verse(index: usize, verse: &Verse) {
    println!(
        "{}. {} - {}",
        index.to_string().bold().blue(),
        verse.reference.bold().yellow(),
        verse.book.dimmed()
    );
    println!("   {}\n", verse.text);
}

fn print_verses(verses: &[Verse]) {
    for (i, verse) in verses.iter().enumerate() {
        print_verse(i + 1, verse);
    }
}

pub fn show_devotion(date: Option<NaiveDate>) {
    let now = Local::now();
    let date = date.unwrap_or_else(|| now.date_naive());
    let devotion = devotion::devotion_for(date);

    println!("\n{}", format!("✝ {}", APP_TITLE).bold().yellow());
    println!(
        "{} — {}",
        devotion::greeting(now.hour()),
        devotion::date_header(date).dimmed()
    );
    println!("{}", "=".repeat(50).dimmed());

    println!("\n\"{}\"", devotion.verse.italic());
    println!("  — {}", devotion.reference.bold().green());

    println!("\n{}", "Reflection".bold().blue());
    println!("{}", devotion.reflection);

    println!("\n{}", "Prayer".bold().blue());
    println!("{}", devotion.prayer.italic());
    println!("{}\n", "Amen.".dimmed());
}

pub fn list_topics() {
    println!("\n{}", "📖 Scripture Topics".bold().blue());
    println!("{}", "=".repeat(30).dimmed());

    for topic in Topic::all() {
        println!(
            "  • {} ({} verses)",
            topic.as_str().green(),
            topic.verses().len().to_string().dimmed()
        );
    }
}

pub fn show_topic(name: &str) {
    // Accept "Peace" or " peace " on the command line
    let verses = Topic::from_str(name)
        .map(|topic| scripture::by_topic(topic.as_str()))
        .unwrap_or(&[]);

    if verses.is_empty() {
        println!("{} '{}'", "No verses for topic".red(), name);
        println!("Available topics: {}", topic_names().dimmed());
        return;
    }

    println!("\n{}\n", format!("📖 {}", name.to_lowercase()).bold().green());
    print_verses(verses);
}

fn topic_names() -> String {
    Topic::all()
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn search_verses(query: &str) {
    let mut session = Session::new();
    if !session.search(query) {
        println!("{}", "Enter something to search for".yellow());
        return;
    }

    println!("🔍 Searching for: {}", query.bold().cyan());

    let results = session.results();
    if results.is_empty() {
        println!("{}", "No results found".red());
        return;
    }

    println!("\n{} results found:\n", results.len().to_string().bold().green());
    print_verses(results);
}

pub fn random_verse() {
    let verse = scripture::random_verse();
    println!("\n{}\n", "✦ Random Verse".bold().yellow());
    print_verse(1, verse);
}

pub async fn research(engine: &ResearchEngine, term: &str) {
    let mut session = Session::new();
    let Some(term) = session.begin_research(term) else {
        println!("{}", "Enter a topic to research".yellow());
        return;
    };

    if !engine.delay().is_zero() {
        println!("{}", "Searching the Scriptures...".dimmed());
    }
    let result = engine.query(&term).await;
    session.finish_research(result);

    let ResearchState::Ready(result) = session.research_state() else {
        return;
    };
    let record = &result.record;

    println!("\n{}", record.title.bold().yellow());
    println!("📜 {}", record.source.green());
    println!("{}", "=".repeat(50).dimmed());
    println!("\n{}", record.summary);

    println!("\n{}", "Key Points".bold().blue());
    for point in &record.key_points {
        println!("  ✦ {}", point);
    }

    if result.is_fallback() {
        println!("\n{}", "Try one of the suggested topics: devocional suggested".dimmed());
    }
    println!();
}

pub fn list_suggested() {
    println!("\n{}", "🔍 Suggested Research Topics".bold().blue());
    println!("{}", "=".repeat(30).dimmed());

    for topic in SUGGESTED_TOPICS {
        println!("  • {}", topic.green());
    }
}
