use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs, Wrap},
};

use crate::app::{App, FinderPane, InputMode, ResearchPane, Tab};
use devocional_core::devotion::{self, APP_TITLE};
use devocional_core::research::SUGGESTED_TOPICS;
use devocional_core::{ResearchState, Topic, Verse};

const GOLD: Color = Color::Rgb(212, 168, 83);

const STUDY_VERSE: &str = "\"Study to shew thyself approved unto God, a workman that needeth not to be ashamed, rightly dividing the word of truth.\"";
const LAMP_VERSE: &str = "\"Your word is a lamp for my feet, a light on my path.\" — Psalm 119:105";

fn border_style(focused: bool) -> Style {
    Style::default().fg(if focused { Color::Cyan } else { Color::DarkGray })
}

fn highlight_style() -> Style {
    Style::default()
        .bg(Color::Blue)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: header, tabs, body, footer
    let [header_area, tabs_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area);
    render_tabs(app, frame, tabs_area);

    match app.tab {
        Tab::Devotion => render_devotion(app, frame, body_area),
        Tab::Finder => render_finder(app, frame, body_area),
        Tab::Research => render_research(app, frame, body_area),
    }

    render_footer(app, frame, footer_area);
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let saved = app.session.saved().len();
    let saved_indicator = if saved > 0 {
        format!(" [{} saved]", saved)
    } else {
        String::new()
    };

    let title = Line::from(vec![
        Span::styled(format!(" ✝ {} ", APP_TITLE), Style::default().fg(GOLD).bold()),
        Span::styled(
            format!(
                "{} — {}",
                devotion::current_greeting(),
                devotion::date_header(app.today)
            ),
            Style::default().fg(Color::White),
        ),
        Span::styled(saved_indicator, Style::default().fg(Color::Gray)),
        Span::raw(" "),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::Gray),
        ),
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

fn render_tabs(app: &App, frame: &mut Frame, area: Rect) {
    let titles: Vec<Line> = Tab::all()
        .iter()
        .enumerate()
        .map(|(i, tab)| Line::from(format!(" {} {} ", i + 1, tab.title())))
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.tab.index())
        .style(Style::default().fg(Color::Gray))
        .highlight_style(Style::default().fg(GOLD).add_modifier(Modifier::BOLD))
        .divider("│");

    frame.render_widget(tabs, area);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let mode_style = match app.input_mode {
        InputMode::Normal => Style::default().bg(Color::Blue).fg(Color::White),
        InputMode::Editing => Style::default().bg(Color::Yellow).fg(Color::Black),
    };

    let mode_text = match app.tab {
        Tab::Devotion => " DEVOTION ",
        Tab::Finder => " FINDER ",
        Tab::Research => " RESEARCH ",
    };

    // Key style: dark background with bright text for visibility on both light/dark terminals
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);
    let hint = |key: &'static str, label: &'static str| {
        [Span::styled(key, key_style), Span::styled(label, label_style)]
    };

    let mut hints: Vec<Span> = Vec::new();
    match (app.tab, app.input_mode) {
        (tab, InputMode::Editing) => {
            let action = if tab == Tab::Research { " research " } else { " search " };
            hints.extend(hint(" Enter ", action));
            hints.extend(hint(" Esc ", " cancel "));
        }
        (Tab::Devotion, InputMode::Normal) => {
            hints.extend(hint(" j/k ", " scroll "));
        }
        (Tab::Finder, InputMode::Normal) => {
            hints.extend(hint(" j/k ", " nav "));
            hints.extend(hint(" h/l ", " pane "));
            match app.finder_focus {
                FinderPane::Topics => hints.extend(hint(" Enter ", " topic ")),
                FinderPane::Results => hints.extend(hint(" s ", " save ")),
                FinderPane::Saved => hints.extend(hint(" d ", " remove ")),
            }
            hints.extend(hint(" / ", " search "));
            hints.extend(hint(" r ", " random "));
        }
        (Tab::Research, InputMode::Normal) => {
            hints.extend(hint(" j/k ", " nav "));
            hints.extend(hint(" h/l ", " list "));
            hints.extend(hint(" Enter ", " research "));
            hints.extend(hint(" / ", " topic "));
        }
    }
    if app.input_mode == InputMode::Normal {
        hints.extend(hint(" Tab ", " next "));
        hints.extend(hint(" q ", " quit "));
    }

    let mut spans = vec![
        Span::styled(mode_text, mode_style),
        Span::styled(" ", label_style),
    ];
    spans.extend(hints);
    if let Some(status) = &app.status {
        spans.push(Span::styled(format!("  {}", status), Style::default().fg(Color::Yellow)));
    }

    let footer = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(footer, area);
}

fn render_devotion(app: &mut App, frame: &mut Frame, area: Rect) {
    let devotion = app.devotion;
    let heading = Style::default().fg(GOLD).add_modifier(Modifier::BOLD);

    let text = Text::from(vec![
        Line::default(),
        Line::from(Span::styled(
            format!("\"{}\"", devotion.verse),
            Style::default().fg(Color::White).add_modifier(Modifier::ITALIC),
        )),
        Line::default(),
        Line::from(Span::styled(
            format!("— {}", devotion.reference),
            Style::default().fg(Color::Yellow),
        )),
        Line::default(),
        Line::from(Span::styled("Reflection", heading)),
        Line::from(devotion.reflection),
        Line::default(),
        Line::from(Span::styled("Prayer", heading)),
        Line::from(Span::styled(
            devotion.prayer,
            Style::default().add_modifier(Modifier::ITALIC),
        )),
        Line::default(),
        Line::from(Span::styled("Amen.", Style::default().fg(Color::DarkGray))),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(GOLD))
        .title(" Today's Devotion ");

    let paragraph = Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: true })
        .scroll((app.devotion_scroll, 0));

    frame.render_widget(paragraph, area);
}

fn render_finder(app: &mut App, frame: &mut Frame, area: Rect) {
    let [side_area, main_area] = Layout::horizontal([
        Constraint::Percentage(30),
        Constraint::Percentage(70),
    ])
    .areas(area);

    let [topics_area, saved_area] = Layout::vertical([
        Constraint::Length(Topic::all().len() as u16 + 2),
        Constraint::Min(0),
    ])
    .areas(side_area);

    let [input_area, results_area, preview_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Percentage(45),
        Constraint::Min(0),
    ])
    .areas(main_area);

    // Topics
    let active_topic = app.session.selected_topic();
    let topic_items: Vec<ListItem> = Topic::all()
        .iter()
        .map(|topic| {
            let style = if Some(*topic) == active_topic {
                Style::default().fg(GOLD).bold()
            } else {
                Style::default()
            };
            ListItem::new(Span::styled(format!(" {} ", topic.display_name()), style))
        })
        .collect();
    let topics = List::new(topic_items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style(app.finder_focus == FinderPane::Topics))
                .title(" Topics "),
        )
        .highlight_style(highlight_style())
        .highlight_symbol("> ");
    frame.render_stateful_widget(topics, topics_area, &mut app.topic_state);

    // Saved verses
    let saved_items: Vec<ListItem> = app
        .session
        .saved()
        .iter()
        .map(|v| ListItem::new(format!(" ★ {} ", v.reference)))
        .collect();
    let saved = List::new(saved_items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style(app.finder_focus == FinderPane::Saved))
                .title(format!(" Saved Verses ({}) ", app.session.saved().len())),
        )
        .highlight_style(highlight_style())
        .highlight_symbol("> ");
    frame.render_stateful_widget(saved, saved_area, &mut app.saved_state);

    // Search input
    let editing = app.input_mode == InputMode::Editing;
    let input = Paragraph::new(app.search_input.as_str())
        .style(Style::default().fg(Color::Cyan))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(if editing { Color::Yellow } else { Color::DarkGray }))
                .title(" Search verses, books or references "),
        );
    frame.render_widget(input, input_area);
    if editing {
        frame.set_cursor_position((
            input_area.x + app.search_input.chars().count() as u16 + 1,
            input_area.y + 1,
        ));
    }

    // Results
    let result_items: Vec<ListItem> = app
        .session
        .results()
        .iter()
        .map(|v| {
            let star = if app.session.is_saved(v.reference) { " ★" } else { "" };
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {}", v.reference), Style::default().fg(Color::Yellow)),
                Span::styled(star, Style::default().fg(GOLD)),
            ]))
        })
        .collect();
    let results_title = match active_topic {
        Some(topic) => format!(" {} ({}) ", topic.display_name(), result_items.len()),
        None => format!(" Results ({}) ", result_items.len()),
    };
    let results = List::new(result_items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style(app.finder_focus == FinderPane::Results))
                .title(results_title),
        )
        .highlight_style(highlight_style())
        .highlight_symbol("> ");
    frame.render_stateful_widget(results, results_area, &mut app.results_state);

    // Preview of the verse under the cursor
    let previewed = match app.finder_focus {
        FinderPane::Saved => app.selected_saved(),
        _ => app.selected_result(),
    };
    let preview_text = match previewed {
        Some(verse) => verse_text(verse),
        None => Text::from(Span::styled(
            "Choose a topic, search, or press r for a random verse",
            Style::default().fg(Color::DarkGray),
        )),
    };
    let preview = Paragraph::new(preview_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Verse "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(preview, preview_area);
}

fn verse_text(verse: &Verse) -> Text<'static> {
    Text::from(vec![
        Line::from(Span::styled(
            verse.reference,
            Style::default().fg(Color::Yellow).bold(),
        )),
        Line::default(),
        Line::from(format!("\"{}\"", verse.text)),
        Line::default(),
        Line::from(Span::styled(
            format!("{}, chapter {}, verse {}", verse.book, verse.chapter, verse.verse),
            Style::default().fg(Color::DarkGray),
        )),
    ])
}

fn render_research(app: &mut App, frame: &mut Frame, area: Rect) {
    let [side_area, result_area] = Layout::horizontal([
        Constraint::Percentage(35),
        Constraint::Percentage(65),
    ])
    .areas(area);

    let [input_area, suggested_area, history_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(SUGGESTED_TOPICS.len() as u16 + 2),
        Constraint::Min(0),
    ])
    .areas(side_area);

    // Term input
    let editing = app.input_mode == InputMode::Editing;
    let input_title = if app.session.is_researching() {
        " Searching... "
    } else {
        " Research a topic "
    };
    let input = Paragraph::new(app.research_input.as_str())
        .style(Style::default().fg(Color::Cyan))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(if editing { Color::Yellow } else { Color::DarkGray }))
                .title(input_title),
        );
    frame.render_widget(input, input_area);
    if editing {
        frame.set_cursor_position((
            input_area.x + app.research_input.chars().count() as u16 + 1,
            input_area.y + 1,
        ));
    }

    render_term_list(
        frame,
        suggested_area,
        " Suggested Topics ",
        SUGGESTED_TOPICS.iter().map(|t| t.to_string()).collect(),
        app.research_focus == ResearchPane::Suggested,
        &mut app.suggested_state,
    );
    render_term_list(
        frame,
        history_area,
        " Recent Searches ",
        app.session.history().to_vec(),
        app.research_focus == ResearchPane::History,
        &mut app.history_state,
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(GOLD))
        .title(" Research ");

    let text = match app.session.research_state() {
        ResearchState::Idle => Text::from(vec![
            Line::default(),
            Line::from("Select a topic or enter your own to begin researching."),
            Line::default(),
            Line::from(Span::styled(
                LAMP_VERSE,
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            )),
        ]),
        ResearchState::Searching { term } => {
            let dots = ".".repeat(app.animation_frame as usize + 1);
            Text::from(vec![
                Line::default(),
                Line::from(Span::styled(
                    format!("Searching the Scriptures{}", dots),
                    Style::default().fg(GOLD),
                )),
                Line::from(Span::styled(
                    format!("\"{}\"", term),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        }
        ResearchState::Ready(result) => {
            let record = &result.record;
            let mut lines = vec![
                Line::from(Span::styled(
                    record.title.clone(),
                    Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    format!("📜 {}", record.source),
                    Style::default().fg(Color::Yellow),
                )),
                Line::default(),
                Line::from(record.summary.clone()),
                Line::default(),
                Line::from(Span::styled("Key Points", Style::default().bold())),
            ];
            lines.extend(
                record
                    .key_points
                    .iter()
                    .map(|point| Line::from(format!("  ✦ {}", point))),
            );
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                STUDY_VERSE,
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            )));
            Text::from(lines)
        }
    };

    let paragraph = Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: true })
        .scroll((app.research_scroll, 0));
    frame.render_widget(paragraph, result_area);
}

fn render_term_list(
    frame: &mut Frame,
    area: Rect,
    title: &'static str,
    terms: Vec<String>,
    focused: bool,
    state: &mut ListState,
) {
    let items: Vec<ListItem> = terms
        .into_iter()
        .map(|term| ListItem::new(format!(" {} ", term)))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style(focused))
                .title(title),
        )
        .highlight_style(highlight_style())
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use devocional_core::{Config, ResearchEngine};
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_devotion_tab_shows_reference() {
        let mut app = App::new(&Config::default(), ResearchEngine::instant());
        let screen = draw(&mut app);
        assert!(screen.contains(app.devotion.reference));
        assert!(screen.contains("Reflection"));
    }

    #[test]
    fn test_finder_tab_lists_topics_and_results() {
        let mut app = App::new(&Config::default(), ResearchEngine::instant());
        app.set_tab(Tab::Finder);
        app.load_selected_topic();
        let screen = draw(&mut app);
        assert!(screen.contains("Forgiveness"));
        assert!(screen.contains("John 3:16"));
    }

    #[test]
    fn test_research_tab_idle() {
        let mut app = App::new(&Config::default(), ResearchEngine::instant());
        app.set_tab(Tab::Research);
        let screen = draw(&mut app);
        assert!(screen.contains("Suggested Topics"));
        assert!(screen.contains("Sermon on the Mount"));
    }

    #[test]
    fn test_editing_footer_names_tab_action() {
        let mut app = App::new(&Config::default(), ResearchEngine::instant());
        app.set_tab(Tab::Research);
        app.input_mode = InputMode::Editing;
        let screen = draw(&mut app);
        assert!(screen.contains(" Enter  research "));

        app.set_tab(Tab::Finder);
        app.input_mode = InputMode::Editing;
        let screen = draw(&mut app);
        assert!(screen.contains(" Enter  search "));
    }
}
