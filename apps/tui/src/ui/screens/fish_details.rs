use crate::app::state::AppScreen;
use crate::app::App;
use crate::ui::widgets::map::render_world_map;
use crate::ui::widgets::popup::{centered_rect, ClearWidget};
use ratatui::layout::{Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use tachyonfx::EffectRenderer;

pub fn render_fish_details(app: &mut App, f: &mut Frame<'_>) {
    // The popup floats over whichever screen opened it.
    match app.previous_screen {
        AppScreen::Radial => super::radial::render_radial(app, f),
        _ => super::browse::render_browse(app, f),
    }

    let Some((row, habitat)) = app
        .detail
        .as_ref()
        .map(|detail| (detail.row, detail.habitat.clone()))
    else {
        return;
    };
    let Some(record) = app.records().get(row).cloned() else {
        return;
    };

    let popup_area = centered_rect(70, 70, f.area());
    f.render_widget(ClearWidget, popup_area);

    let block = Block::default()
        .title(format!(" {} ", record.common_name))
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(popup_area);
    f.render_widget(block, popup_area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8), // Fact sheet
            Constraint::Min(5),    // Map
            Constraint::Length(1), // Hint
        ])
        .split(inner.inner(Margin::new(1, 0)));

    render_fact_sheet(&record, habitat.as_deref(), f, layout[0]);
    render_world_map(f, layout[1], record.coordinates(), app.animation_counter);

    let hint = Paragraph::new(TextLine::from(Span::styled(
        "Press Esc to close",
        Style::default().fg(Color::Gray),
    )))
    .alignment(ratatui::layout::Alignment::Center);
    f.render_widget(hint, layout[2]);

    // Fade the popup in.
    if let Ok(mut effect) = app.detail_fx.lock() {
        if let Some(effect) = effect.as_mut() {
            let buffer = f.buffer_mut();
            buffer.render_effect(effect, popup_area, app.last_tick);
        }
    }
}

fn render_fact_sheet(
    record: &crate::domain::FishRecord,
    habitat: Option<&str>,
    f: &mut Frame<'_>,
    area: Rect,
) {
    let label_style = Style::default().fg(Color::Gray);
    let value_style = Style::default().fg(Color::White);

    let coordinates = record.coordinates().map_or_else(
        || "unknown".to_string(),
        |(lat, lon)| format!("{lat:.4}, {lon:.4}"),
    );

    let habitat_line = habitat.map_or_else(
        || {
            TextLine::from(vec![
                Span::styled("Habitat: ", label_style),
                Span::styled("looking up...", Style::default().fg(Color::DarkGray)),
            ])
        },
        |name| {
            TextLine::from(vec![
                Span::styled("Habitat: ", label_style),
                Span::styled(name.to_string(), Style::default().fg(Color::Green)),
            ])
        },
    );

    let mut lines = vec![
        TextLine::from(vec![
            Span::styled("Scientific name: ", label_style),
            Span::styled(
                record.title.clone(),
                value_style.add_modifier(Modifier::ITALIC),
            ),
        ]),
        TextLine::from(vec![
            Span::styled("Taxonomy: ", label_style),
            Span::styled(
                format!(
                    "{} > {} > {}",
                    record.ocean, record.species, record.archetype
                ),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        TextLine::from(vec![
            Span::styled("Depth: ", label_style),
            Span::styled(format!("{} m", record.depth), value_style),
        ]),
        TextLine::from(vec![
            Span::styled("Coordinates: ", label_style),
            Span::styled(coordinates, value_style),
        ]),
        habitat_line,
    ];

    if let Some(thumbnail) = &record.thumbnail {
        lines.push(TextLine::from(vec![
            Span::styled("Image: ", label_style),
            Span::styled(thumbnail.clone(), Style::default().fg(Color::Blue)),
        ]));
    }

    let paragraph = Paragraph::new(Text::from(lines)).wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}
