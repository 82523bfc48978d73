use crate::app::App;
use crate::ui::widgets::radial_tree::render_radial_tree;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

pub fn render_radial(app: &App, f: &mut Frame<'_>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),    // Tree canvas
            Constraint::Length(3), // Search box / status
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(f.area().inner(Margin::new(1, 0)));

    render_tree_panel(app, f, layout[0]);
    render_search_panel(app, f, layout[1]);
    render_shortcuts(app, f, layout[2]);
}

fn render_tree_panel(app: &App, f: &mut Frame<'_>, area: Rect) {
    let title = format!(" Radial Taxonomy (zoom {:.2}x) ", app.radial_zoom);
    let block = Block::default()
        .title(title)
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    f.render_widget(block, area);
    render_radial_tree(app, f, inner);
}

fn render_search_panel(app: &App, f: &mut Frame<'_>, area: Rect) {
    if !app.search_active {
        let hint = Paragraph::new(TextLine::from(Span::styled(
            "Press / to search fish by name",
            Style::default().fg(Color::Gray),
        )))
        .block(Block::default().borders(Borders::ALL).border_style(
            Style::default().fg(Color::DarkGray),
        ));
        f.render_widget(hint, area);
        return;
    }

    let match_summary = if app.search_input.is_empty() {
        String::new()
    } else if app.search_matches.is_empty() {
        "  (no matches)".to_string()
    } else {
        let current = app
            .search_matches
            .get(app.search_match_index)
            .and_then(|&row| app.records().get(row))
            .map_or_else(String::new, |record| record.common_name.clone());
        format!(
            "  ({}/{}: {current})",
            app.search_match_index + 1,
            app.search_matches.len()
        )
    };

    let blink = (app.animation_counter * 2.0).sin() > 0.0;
    let cursor = if blink { "\u{2588}" } else { " " };

    let search_line = TextLine::from(vec![
        Span::styled("/ ", Style::default().fg(Color::Yellow)),
        Span::styled(
            format!("{}{cursor}", app.search_input),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(match_summary, Style::default().fg(Color::Gray)),
    ]);

    let search_paragraph = Paragraph::new(search_line).block(
        Block::default()
            .title(" Search ")
            .title_style(Style::default().fg(Color::Yellow))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    f.render_widget(search_paragraph, area);
}

fn render_shortcuts(app: &App, f: &mut Frame<'_>, area: Rect) {
    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(Color::Gray);

    let shortcuts = if app.search_active {
        TextLine::from(vec![
            Span::styled("Up/Down", key_style),
            Span::styled(": Cycle matches | ", text_style),
            Span::styled("Enter", key_style),
            Span::styled(": Open match | ", text_style),
            Span::styled("Esc", key_style),
            Span::styled(": Close search", text_style),
        ])
    } else {
        TextLine::from(vec![
            Span::styled("/", key_style),
            Span::styled(": Search | ", text_style),
            Span::styled("+/-", key_style),
            Span::styled(": Zoom | ", text_style),
            Span::styled("Arrows", key_style),
            Span::styled(": Pan | ", text_style),
            Span::styled("0", key_style),
            Span::styled(": Reset | ", text_style),
            Span::styled("b", key_style),
            Span::styled(": Browse | ", text_style),
            Span::styled("q", key_style),
            Span::styled(": Quit", text_style),
        ])
    };

    let shortcuts_paragraph = Paragraph::new(shortcuts).alignment(Alignment::Center);
    f.render_widget(shortcuts_paragraph, area);
}
