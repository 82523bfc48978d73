use crate::app::App;
use crate::domain::Level;
use crate::ui::widgets::radial_tree::render_mini_radial;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_browse(app: &App, f: &mut Frame<'_>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Title area
            Constraint::Length(1), // Breadcrumb
            Constraint::Min(5),    // Columns
            Constraint::Length(3), // Status area
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(f.area().inner(Margin::new(2, 1)));

    render_title_section(app, f, layout[0]);
    render_breadcrumb(app, f, layout[1]);
    render_columns(app, f, layout[2]);
    render_status_section(app, f, layout[3]);
    render_shortcuts(f, layout[4]);
}

fn render_title_section(app: &App, f: &mut Frame<'_>, area: Rect) {
    let title_block = Block::default()
        .title("== Fish Atlas ==")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    f.render_widget(title_block, area);

    let title_inner = area.inner(Margin::new(1, 1));
    let title_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(title_inner);

    let fish_count = app.records().len();
    let title_paragraph = Paragraph::new(Text::from(vec![
        TextLine::from(vec![
            Span::styled(
                "Fish ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "Atlas",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        TextLine::from(Span::styled(
            format!("{fish_count} fish in the water"),
            Style::default().fg(Color::Gray),
        )),
    ]))
    .alignment(Alignment::Left);
    f.render_widget(title_paragraph, title_chunks[0]);

    render_mini_radial(f, title_chunks[1], app.animation_counter);
}

fn render_breadcrumb(app: &App, f: &mut Frame<'_>, area: Rect) {
    let Some(cursor) = app.navigator.as_ref().map(crate::data::Navigator::cursor) else {
        return;
    };

    let mut spans = vec![Span::styled("All oceans", Style::default().fg(Color::Gray))];
    for part in [&cursor.ocean, &cursor.species, &cursor.archetype]
        .into_iter()
        .flatten()
    {
        spans.push(Span::styled(" > ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(
            part.clone(),
            Style::default().fg(Color::Yellow),
        ));
    }

    // Scientific name of the highlighted fish, when the fish column is open.
    if app.active_level == Level::Fish {
        if let Some(record) = highlighted_fish(app) {
            spans.push(Span::styled(" > ", Style::default().fg(Color::DarkGray)));
            spans.push(Span::styled(
                record.common_name.clone(),
                Style::default().fg(Color::White),
            ));
            spans.push(Span::styled(
                format!(" ({})", record.title),
                Style::default()
                    .fg(Color::Gray)
                    .add_modifier(Modifier::ITALIC),
            ));
        }
    }

    f.render_widget(Paragraph::new(TextLine::from(spans)), area);
}

fn highlighted_fish(app: &App) -> Option<&crate::domain::FishRecord> {
    let navigator = app.navigator.as_ref()?;
    let row = *navigator.fish_rows().get(app.index_at(Level::Fish))?;
    navigator.records().get(row)
}

fn render_columns(app: &App, f: &mut Frame<'_>, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    for (slot, level) in [
        Level::Ocean,
        Level::Species,
        Level::Archetype,
        Level::Fish,
    ]
    .into_iter()
    .enumerate()
    {
        render_level_column(app, f, columns[slot], level);
    }
}

fn render_level_column(app: &App, f: &mut Frame<'_>, area: Rect, level: Level) {
    let items = column_items(app, level);
    let is_active = app.active_level == level;

    let border_style = if is_active {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .title(format!(" {} ({}) ", level.label(), items.len()))
        .title_style(border_style.add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(border_style);

    let highlight_style = if is_active {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow)
    };

    let list = List::new(items)
        .block(block)
        .highlight_style(highlight_style)
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(app.index_at(level)));
    f.render_stateful_widget(list, area, &mut state);
}

fn column_items(app: &App, level: Level) -> Vec<ListItem<'static>> {
    let Some(navigator) = app.navigator.as_ref() else {
        return Vec::new();
    };

    if level == Level::Fish {
        // Fish carry their depth so the sort order reads at a glance.
        return navigator
            .fish_rows()
            .iter()
            .filter_map(|&row| navigator.records().get(row))
            .map(|record| {
                ListItem::new(TextLine::from(vec![
                    Span::styled(
                        record.common_name.clone(),
                        Style::default().fg(Color::White),
                    ),
                    Span::styled(
                        format!("  {} m", record.depth),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]))
            })
            .collect();
    }

    navigator
        .options_at(level)
        .iter()
        .map(|name| ListItem::new(name.clone()))
        .collect()
}

fn render_status_section(app: &App, f: &mut Frame<'_>, area: Rect) {
    let status_block = Block::default()
        .title(" Status ")
        .title_style(Style::default().fg(Color::Yellow))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let status_text = if app.status_message.is_empty() {
        Text::from(Span::styled(
            if app.animation_paused {
                "Animation paused"
            } else {
                ""
            },
            Style::default().fg(Color::Gray),
        ))
    } else {
        let style = if app.status_message.starts_with("Error") {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Green)
        };

        Text::from(Span::styled(&app.status_message, style))
    };

    let status_paragraph = Paragraph::new(status_text)
        .block(status_block)
        .wrap(Wrap { trim: true });
    f.render_widget(status_paragraph, area);
}

fn render_shortcuts(f: &mut Frame<'_>, area: Rect) {
    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(Color::Gray);

    let shortcuts = TextLine::from(vec![
        Span::styled("?", key_style),
        Span::styled(": Help | ", text_style),
        Span::styled("Arrows", key_style),
        Span::styled(": Navigate | ", text_style),
        Span::styled("Enter", key_style),
        Span::styled(": Select | ", text_style),
        Span::styled("r", key_style),
        Span::styled(": Radial view | ", text_style),
        Span::styled("Space", key_style),
        Span::styled(": Pause | ", text_style),
        Span::styled("q", key_style),
        Span::styled(": Quit", text_style),
    ]);

    let shortcuts_paragraph = Paragraph::new(shortcuts).alignment(Alignment::Center);
    f.render_widget(shortcuts_paragraph, area);
}
