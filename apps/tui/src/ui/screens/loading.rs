use crate::app::App;
use crate::ui::widgets::popup::centered_rect;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use throbber_widgets_tui::Throbber;

pub fn render_loading(app: &mut App, f: &mut Frame<'_>) {
    if let Some(error) = app.load_error.clone() {
        render_load_error(f, &error);
        return;
    }

    let area = centered_rect(50, 30, f.area());
    let block = Block::default()
        .title("== Fish Atlas ==")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let throbber = Throbber::default()
        .label(format!("Loading {} ...", app.dataset_source))
        .style(Style::default().fg(Color::White))
        .throbber_style(Style::default().fg(Color::Cyan))
        .throbber_set(throbber_widgets_tui::BRAILLE_SIX)
        .use_type(throbber_widgets_tui::WhichUse::Spin);
    f.render_stateful_widget(throbber, rows[0], &mut app.throbber_state);

    let hint = Paragraph::new(Text::from(Span::styled(
        "Press q to quit",
        Style::default().fg(Color::Gray),
    )))
    .alignment(Alignment::Left);
    f.render_widget(hint, rows[1]);
}

/// Fallback panel for a dataset that failed to load or validate. The app
/// stays here; there is nothing to browse.
fn render_load_error(f: &mut Frame<'_>, error: &str) {
    let area = centered_rect(60, 40, f.area());
    let block = Block::default()
        .title(" Dataset Error ")
        .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let lines = vec![
        TextLine::from(Span::styled(
            "The dataset could not be loaded:",
            Style::default().fg(Color::White),
        )),
        TextLine::from(""),
        TextLine::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        )),
        TextLine::from(""),
        TextLine::from(Span::styled(
            "Fix the dataset and restart. Press q to quit.",
            Style::default().fg(Color::Gray),
        )),
    ];

    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}
