use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use crate::app::{App, FinderPane, InputMode, Tab};
use crate::tui::AppEvent;

pub async fn handle_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Resize(_, _) => {}
        AppEvent::Tick => app.tick(),
    }

    // Pick up research results as soon as their task completes
    app.poll_research().await;
    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keys that work in any mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Editing => handle_editing_mode(app, key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('1') => return app.set_tab(Tab::Devotion),
        KeyCode::Char('2') => return app.set_tab(Tab::Finder),
        KeyCode::Char('3') => return app.set_tab(Tab::Research),
        KeyCode::Tab => return app.set_tab(app.tab.next()),
        KeyCode::BackTab => return app.set_tab(app.tab.prev()),
        _ => {}
    }

    match app.tab {
        Tab::Devotion => handle_devotion_normal(app, key),
        Tab::Finder => handle_finder_normal(app, key),
        Tab::Research => handle_research_normal(app, key),
    }
}

fn handle_devotion_normal(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.scroll_down(),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_up(),
        KeyCode::Char('g') => app.devotion_scroll = 0,
        _ => {}
    }
}

fn handle_finder_normal(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.finder_down(),
        KeyCode::Char('k') | KeyCode::Up => app.finder_up(),
        KeyCode::Char('l') | KeyCode::Right => app.finder_focus = app.finder_focus.right(),
        KeyCode::Char('h') | KeyCode::Left => app.finder_focus = app.finder_focus.left(),

        KeyCode::Enter if app.finder_focus == FinderPane::Topics => app.load_selected_topic(),

        // Search input
        KeyCode::Char('/') | KeyCode::Char('i') => {
            app.input_mode = InputMode::Editing;
        }

        KeyCode::Char('r') => app.random_verse(),
        KeyCode::Char('s') | KeyCode::Char('x') if app.finder_focus == FinderPane::Results => {
            app.save_selected_result();
        }
        KeyCode::Char('d') if app.finder_focus == FinderPane::Saved => {
            app.remove_selected_saved();
        }
        KeyCode::Char('C') => app.clear_results(),
        _ => {}
    }
}

fn handle_research_normal(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.research_down(),
        KeyCode::Char('k') | KeyCode::Up => app.research_up(),
        KeyCode::Char('h') | KeyCode::Left | KeyCode::Char('l') | KeyCode::Right => {
            app.toggle_research_focus();
        }
        KeyCode::Enter => {
            if let Some(term) = app.highlighted_research_term() {
                app.start_research(&term);
            }
        }
        KeyCode::Char('/') | KeyCode::Char('i') => {
            app.input_mode = InputMode::Editing;
        }

        // Half-page scroll of the result
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.research_scroll = app.research_scroll.saturating_add(5);
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.research_scroll = app.research_scroll.saturating_sub(5);
        }
        _ => {}
    }
}

fn handle_editing_mode(app: &mut App, key: KeyEvent) {
    let input = match app.tab {
        Tab::Finder => &mut app.search_input,
        Tab::Research => &mut app.research_input,
        Tab::Devotion => {
            app.input_mode = InputMode::Normal;
            return;
        }
    };

    match key.code {
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => {
            app.input_mode = InputMode::Normal;
            match app.tab {
                Tab::Finder => app.perform_search(),
                Tab::Research => {
                    let term = app.research_input.clone();
                    app.start_research(&term);
                }
                Tab::Devotion => {}
            }
        }
        KeyCode::Backspace => {
            input.pop();
        }
        KeyCode::Char(c) => {
            input.push(c);
        }
        _ => {}
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollDown => app.scroll_down(),
        MouseEventKind::ScrollUp => app.scroll_up(),
        _ => {}
    }
}
