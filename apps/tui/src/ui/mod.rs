// UI module for fish-atlas-tui
// Handles all UI rendering functions

pub mod screens;
pub mod widgets;

use crate::app::state::AppScreen;
use crate::app::App;
use ratatui::layout::{Alignment, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use widgets::popup::{centered_rect, ClearWidget};

pub fn ui(app: &mut App, f: &mut Frame<'_>) {
    match app.screen {
        AppScreen::Loading => screens::loading::render_loading(app, f),
        AppScreen::Browse => screens::browse::render_browse(app, f),
        AppScreen::Radial => screens::radial::render_radial(app, f),
        AppScreen::FishDetails => screens::fish_details::render_fish_details(app, f),
    }

    if app.show_help {
        render_help_popup(f);
    }
}

fn render_help_popup(f: &mut Frame<'_>) {
    let popup_area = centered_rect(80, 80, f.area().inner(Margin::new(2, 1)));
    f.render_widget(ClearWidget, popup_area);

    let help_block = Block::default()
        .title("== Help & Keyboard Shortcuts ==")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let help_paragraph = Paragraph::new(Text::from(build_help_lines()))
        .block(help_block)
        .wrap(Wrap { trim: true });

    f.render_widget(help_paragraph, popup_area);

    let hint = Paragraph::new(Text::from(TextLine::from(vec![Span::styled(
        "Press ? or Esc to close",
        Style::default().fg(Color::Gray),
    )])))
    .alignment(Alignment::Center);

    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height.saturating_sub(2),
        width: popup_area.width,
        height: 1,
    };

    f.render_widget(hint, hint_area);
}

fn key_line(key: &'static str, text: &'static str) -> TextLine<'static> {
    TextLine::from(vec![
        Span::styled(
            format!("  {key}"),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" - {text}"), Style::default()),
    ])
}

fn build_help_lines() -> Vec<TextLine<'static>> {
    let mut lines = vec![
        TextLine::from(vec![Span::styled(
            "Fish Atlas",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )]),
        TextLine::from(""),
        TextLine::from(
            "Browse a fish dataset by ocean, species group and archetype, explore the taxonomy as a radial tree and open per-fish details.",
        ),
        TextLine::from(""),
        TextLine::from(vec![Span::styled(
            "Keyboard Shortcuts:",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        key_line("?", "Toggle this help popup"),
        key_line("Space", "Pause/resume animations"),
        key_line("Arrows", "Move between and within columns / pan the radial view"),
        key_line("Enter", "Select the highlighted entry / open fish details"),
        key_line("Esc", "Go back / close popup"),
        key_line("r", "Open the radial taxonomy view"),
        key_line("/", "Search fish by name (radial view)"),
        key_line("+ / -", "Zoom the radial view"),
        key_line("0", "Reset radial zoom and pan"),
        key_line("q", "Quit application"),
        TextLine::from(""),
        TextLine::from(vec![Span::styled(
            "Taxonomy Levels:",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        TextLine::from("  1 - Ocean: Where the fish was recorded"),
        TextLine::from("  2 - Species Group: Reef, pelagic, eel-like, demersal and others"),
        TextLine::from("  3 - Archetype: Predator, prey or others"),
        TextLine::from("  4 - Fish: Individual records, shallowest first"),
        TextLine::from(""),
        TextLine::from(vec![Span::styled(
            "CLI Options:",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
    ];

    let help_text = crate::cli::CliArgs::help_text();
    for line in help_text.lines() {
        if line.starts_with("Usage") || line.starts_with("Options") || line.trim().is_empty() {
            continue;
        }
        lines.push(TextLine::from(line.to_string()));
    }

    lines
}
