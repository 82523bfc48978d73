mod animation;

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use animation::{advance_swim_phase, SwimMode};
use ratzilla::ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line as TextLine, Span, Text},
    widgets::{
        Bar, BarChart, BarGroup, Block, Borders, Cell, Paragraph, Row, Scrollbar,
        ScrollbarOrientation, ScrollbarState, Table, Wrap,
    },
    Terminal,
};
use ratzilla::{DomBackend, WebRenderer};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Request, RequestInit, RequestMode, Response};

const SPECIES_ORDER: [&str; 5] = [
    "Reef Fish",
    "Pelagic Fish",
    "Eel-like Fish",
    "Demersal Fish",
    "Others",
];

const ARCHETYPE_ORDER: [&str; 3] = ["Predator", "Prey", "Others"];

#[derive(serde::Deserialize, Clone)]
#[allow(dead_code)]
struct FishExport {
    ocean: String,
    species: String,
    archetype: String,
    common_name: String,
    title: String,
    depth: String,
    latitude: String,
    longitude: String,
    #[serde(default)]
    thumbnail: Option<String>,
}

impl FishExport {
    fn depth_value(&self) -> f64 {
        self.depth.trim().parse().unwrap_or(f64::MAX)
    }
}

fn main() -> io::Result<()> {
    let data = Rc::new(RefCell::new(None::<Vec<FishExport>>));
    let tab_index = Rc::new(RefCell::new(0_usize));
    let row_offset = Rc::new(RefCell::new(0_usize));
    let swim = Rc::new(RefCell::new((0.0_f64, None::<f64>)));
    let swim_mode = Rc::new(RefCell::new(SwimMode::Swimming));

    spawn_local(fetch_fishes(data.clone()));

    let backend = DomBackend::new()?;
    let mut terminal = Terminal::new(backend)?;

    terminal.on_key_event({
        let tab_index = tab_index.clone();
        let row_offset = row_offset.clone();
        let swim_mode = swim_mode.clone();
        move |event| match event.code {
            ratzilla::event::KeyCode::Left => {
                let mut index = tab_index.borrow_mut();
                *index = if *index == 0 { 2 } else { *index - 1 };
                *row_offset.borrow_mut() = 0;
            }
            ratzilla::event::KeyCode::Right => {
                let mut index = tab_index.borrow_mut();
                *index = (*index + 1) % 3;
                *row_offset.borrow_mut() = 0;
            }
            ratzilla::event::KeyCode::Up => {
                let mut offset = row_offset.borrow_mut();
                *offset = offset.saturating_sub(1);
            }
            ratzilla::event::KeyCode::Down => {
                let mut offset = row_offset.borrow_mut();
                *offset = (*offset + 1).min(2000);
            }
            ratzilla::event::KeyCode::Char('1') => {
                *tab_index.borrow_mut() = 0;
                *row_offset.borrow_mut() = 0;
            }
            ratzilla::event::KeyCode::Char('2') => {
                *tab_index.borrow_mut() = 1;
                *row_offset.borrow_mut() = 0;
            }
            ratzilla::event::KeyCode::Char('3') => {
                *tab_index.borrow_mut() = 2;
                *row_offset.borrow_mut() = 0;
            }
            ratzilla::event::KeyCode::Char(' ') => {
                let mut mode = swim_mode.borrow_mut();
                *mode = match *mode {
                    SwimMode::Swimming => SwimMode::Paused,
                    SwimMode::Paused => SwimMode::Swimming,
                };
            }
            _ => {}
        }
    });

    terminal.draw_web(move |f| {
        let area = f.area();
        let block = Block::default()
            .title("Fish Atlas")
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Gray));
        let inner = block.inner(area).inner(Margin::new(1, 1));
        f.render_widget(block, area);

        let now_seconds = js_sys::Date::now() / 1000.0;
        let phase = {
            let mut swim = swim.borrow_mut();
            let (next, tick) =
                advance_swim_phase(swim.0, swim.1, now_seconds, *swim_mode.borrow());
            *swim = (next, tick);
            next
        };

        let data = data.borrow();
        if let Some(fishes) = data.as_ref() {
            let index = *tab_index.borrow();
            let row_offset = *row_offset.borrow();
            render_dashboard(fishes, index, row_offset, phase, f, inner);
        } else {
            let paragraph = Paragraph::new(Text::from(TextLine::from("Loading fishes.json...")))
                .alignment(Alignment::Center);
            f.render_widget(paragraph, inner);
        }
    });

    Ok(())
}

fn render_dashboard(
    fishes: &[FishExport],
    tab_index: usize,
    row_offset: usize,
    phase: f64,
    f: &mut ratzilla::ratatui::Frame<'_>,
    area: Rect,
) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(12),
            Constraint::Length(8),
        ])
        .split(area);

    render_header(fishes, f, main_layout[0]);
    render_gap(f, main_layout[1]);

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
        .split(main_layout[2]);

    render_taxonomy_panel(fishes, phase, f, content[0]);

    let charts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(content[1]);

    render_species_chart(fishes, f, charts[0]);
    render_archetype_chart(fishes, f, charts[1]);

    render_footer(fishes, tab_index, row_offset, f, main_layout[3]);
}

fn first_seen_oceans(fishes: &[FishExport]) -> Vec<&str> {
    let mut oceans = Vec::new();
    for fish in fishes {
        if !oceans.contains(&fish.ocean.as_str()) {
            oceans.push(fish.ocean.as_str());
        }
    }
    oceans
}

fn render_header(fishes: &[FishExport], f: &mut ratzilla::ratatui::Frame<'_>, area: Rect) {
    let total_fish = fishes.len();
    let oceans = first_seen_oceans(fishes).len();
    let species = {
        let mut seen = Vec::new();
        for fish in fishes {
            if !seen.contains(&fish.species.as_str()) {
                seen.push(fish.species.as_str());
            }
        }
        seen.len()
    };

    let line = TextLine::from(vec![Span::styled(
        format!("Fish: {total_fish}  Oceans: {oceans}  Species groups: {species}"),
        Style::default().fg(Color::White),
    )]);

    let block = Block::default()
        .title("Overview")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(Text::from(line))
        .block(block)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, area);
}

fn render_gap(f: &mut ratzilla::ratatui::Frame<'_>, area: Rect) {
    let paragraph = Paragraph::new("")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    f.render_widget(paragraph, area);
}

fn render_footer(
    fishes: &[FishExport],
    tab_index: usize,
    row_offset: usize,
    f: &mut ratzilla::ratatui::Frame<'_>,
    area: Rect,
) {
    let total_fish = fishes.len();

    let tabs = ["By ocean", "All fish", "Deepest fish"];
    let tab_titles = tabs
        .iter()
        .map(|title| TextLine::from(*title))
        .collect::<Vec<_>>();

    let info = TextLine::from(vec![
        Span::styled("Tables", Style::default().fg(Color::Gray)),
        Span::raw("  "),
        Span::raw(format!("{total_fish} fish")),
        Span::raw("  "),
        Span::styled("1-3", Style::default().fg(Color::Gray)),
        Span::raw("  "),
        Span::styled("Arrows", Style::default().fg(Color::Gray)),
    ]);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    let tabs = ratzilla::ratatui::widgets::Tabs::new(tab_titles)
        .select(tab_index)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::White)
                .bg(Color::Rgb(0, 70, 140))
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::raw("|"));

    let info_paragraph = Paragraph::new(Text::from(info)).alignment(Alignment::Center);
    f.render_widget(info_paragraph, layout[0]);
    f.render_widget(tabs, layout[1]);
    render_gap(f, layout[2]);

    let table_area = layout[3];

    match tab_index {
        0 => render_by_ocean(fishes, row_offset, f, table_area),
        1 => render_all_fish(fishes, row_offset, f, table_area),
        2 => render_deepest_fish(fishes, row_offset, f, table_area),
        _ => {}
    }
}

fn render_taxonomy_panel(
    fishes: &[FishExport],
    phase: f64,
    f: &mut ratzilla::ratatui::Frame<'_>,
    area: Rect,
) {
    let block = Block::default()
        .title("Radial Taxonomy")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if fishes.is_empty() {
        let paragraph = Paragraph::new("No fish available")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(paragraph, inner);
        return;
    }

    let size = inner.width.min(inner.height);
    let square = Rect {
        x: inner.x + (inner.width - size) / 2,
        y: inner.y + (inner.height - size) / 2,
        width: size,
        height: size,
    };

    let oceans = first_seen_oceans(fishes);
    let sector = std::f64::consts::TAU / oceans.len().max(1) as f64;

    // One dot per fish: ocean picks the sector, species picks the ring,
    // a name hash spreads dots within the sector.
    let points = fishes
        .iter()
        .filter_map(|fish| {
            let ocean_index = oceans.iter().position(|o| *o == fish.ocean)?;
            let ring = SPECIES_ORDER
                .iter()
                .position(|s| *s == fish.species)
                .unwrap_or(SPECIES_ORDER.len());

            let hash = fish
                .common_name
                .bytes()
                .fold(0_u64, |acc, b| acc.wrapping_mul(31) + u64::from(b));
            let jitter = f64::from((hash % 100) as u8) / 100.0;

            let angle = (ocean_index as f64).mul_add(sector, (jitter - 0.5) * sector * 0.8);
            let radius = 0.25 + (ring as f64 * 0.13) + (jitter * 0.08);
            let wiggle = (phase + jitter * std::f64::consts::TAU).sin() * 0.015;

            Some((angle, radius + wiggle, species_color(&fish.species)))
        })
        .collect::<Vec<_>>();

    f.render_widget(
        ratzilla::ratatui::widgets::canvas::Canvas::default()
            .paint(|ctx| {
                let width = f64::from(square.width);
                let height = f64::from(square.height);
                let center_x = width / 2.0;
                let center_y = height / 2.0;
                let max_radius = width.min(height) / 2.0 * 0.9;

                for i in 1..=4 {
                    let ring_radius = max_radius * (f64::from(i) / 4.0);
                    ctx.draw(&ratzilla::ratatui::widgets::canvas::Circle {
                        x: center_x,
                        y: center_y,
                        radius: ring_radius,
                        color: Color::Gray,
                    });
                }

                for (index, _) in oceans.iter().enumerate() {
                    let angle = index as f64 * sector;
                    ctx.draw(&ratzilla::ratatui::widgets::canvas::Line {
                        x1: center_x,
                        y1: center_y,
                        x2: angle.sin().mul_add(max_radius, center_x),
                        y2: angle.cos().mul_add(max_radius, center_y),
                        color: Color::Gray,
                    });
                }

                for (angle, radius, color) in &points {
                    let x = angle.sin().mul_add(max_radius * radius, center_x);
                    let y = angle.cos().mul_add(max_radius * radius, center_y);

                    ctx.draw(&ratzilla::ratatui::widgets::canvas::Circle {
                        x,
                        y,
                        radius: max_radius * 0.03,
                        color: *color,
                    });
                }
            })
            .x_bounds([0.0, f64::from(square.width)])
            .y_bounds([0.0, f64::from(square.height)]),
        square,
    );
}

fn render_species_chart(fishes: &[FishExport], f: &mut ratzilla::ratatui::Frame<'_>, area: Rect) {
    let block = Block::default()
        .title("Species Groups")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chart_split = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(68), Constraint::Percentage(32)])
        .split(inner);

    let chart_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(chart_split[0])[1];

    let legend_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(chart_split[1])[1];

    let mut counts = [0_u64; SPECIES_ORDER.len()];
    for fish in fishes {
        if let Some(index) = SPECIES_ORDER.iter().position(|s| *s == fish.species) {
            counts[index] += 1;
        }
    }

    let bars: Vec<Bar<'_>> = counts
        .iter()
        .enumerate()
        .map(|(index, value)| {
            Bar::default()
                .value(*value)
                .label(TextLine::from(SPECIES_ORDER[index]))
                .style(Style::default().fg(species_color(SPECIES_ORDER[index])))
                .value_style(Style::default().fg(Color::White))
        })
        .collect();

    let max_value = counts.iter().copied().max().unwrap_or(0).max(1);

    let chart = BarChart::default()
        .block(Block::default())
        .data(BarGroup::default().bars(&bars))
        .max(max_value)
        .bar_gap(1)
        .bar_width(6);

    f.render_widget(chart, chart_area);

    let total = counts.iter().sum::<u64>().max(1);
    let mut legend_lines = vec![
        TextLine::from(Span::styled("Legend", Style::default().fg(Color::Gray))),
        TextLine::from(""),
    ];

    for (index, label) in SPECIES_ORDER.iter().enumerate() {
        let count = counts[index];
        let percent = (count as f64 / total as f64) * 100.0;
        legend_lines.push(TextLine::from(vec![
            Span::styled(
                "\u{25a0} ",
                Style::default()
                    .fg(species_color(label))
                    .add_modifier(Modifier::DIM),
            ),
            Span::styled(
                *label,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::DIM),
            ),
            Span::styled(
                format!("  {count} ({percent:.1}%)"),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::DIM),
            ),
        ]));
        if index + 1 < SPECIES_ORDER.len() {
            legend_lines.push(TextLine::from(""));
        }
    }

    let legend = Paragraph::new(Text::from(legend_lines))
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true });
    f.render_widget(legend, legend_area);
}

fn render_archetype_chart(fishes: &[FishExport], f: &mut ratzilla::ratatui::Frame<'_>, area: Rect) {
    let block = Block::default()
        .title("Archetype Distribution")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chart_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner)[1];

    let mut counts = [0_u64; ARCHETYPE_ORDER.len()];
    for fish in fishes {
        if let Some(index) = ARCHETYPE_ORDER.iter().position(|a| *a == fish.archetype) {
            counts[index] += 1;
        }
    }

    let colors = [Color::Red, Color::Cyan, Color::Gray];

    let mut lines = Vec::new();
    for (index, label) in ARCHETYPE_ORDER.iter().enumerate() {
        let count = counts[index];
        let width = chart_area.width.max(1) - 2;
        let max_value = counts.iter().copied().max().unwrap_or(1) as f64;
        let ratio = count as f64 / max_value;
        let fill = ((ratio * f64::from(width)).round()).clamp(1.0, f64::from(width)) as usize;
        let empty = width as usize - fill;

        let bar = format!("{}{}", "\u{2588}".repeat(fill), "\u{2591}".repeat(empty));
        lines.push(TextLine::from(vec![
            Span::styled(*label, Style::default().fg(colors[index])),
            Span::raw(" "),
            Span::styled(bar, Style::default().fg(colors[index])),
            Span::raw(format!("  {count}")),
        ]));
    }

    let total = counts.iter().sum::<u64>().max(1);
    lines.push(TextLine::from(Span::styled(
        "Legend",
        Style::default().fg(Color::Gray),
    )));
    lines.push(TextLine::from(""));

    for (index, label) in ARCHETYPE_ORDER.iter().enumerate() {
        let count = counts[index];
        let percent = (count as f64 / total as f64) * 100.0;
        lines.push(TextLine::from(vec![
            Span::styled(
                "\u{25a0} ",
                Style::default()
                    .fg(colors[index])
                    .add_modifier(Modifier::DIM),
            ),
            Span::styled(
                *label,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::DIM),
            ),
            Span::styled(
                format!("  {count} ({percent:.1}%)"),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::DIM),
            ),
        ]));
        if index + 1 < ARCHETYPE_ORDER.len() {
            lines.push(TextLine::from(""));
        }
    }

    let paragraph = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, chart_area);
}

fn render_deepest_fish(
    fishes: &[FishExport],
    row_offset: usize,
    f: &mut ratzilla::ratatui::Frame<'_>,
    area: Rect,
) {
    let mut fishes = fishes.to_vec();
    fishes.sort_by(|a, b| b.depth_value().total_cmp(&a.depth_value()));

    render_fish_rows(&fishes, row_offset, f, area, 8);
}

fn render_by_ocean(
    fishes: &[FishExport],
    row_offset: usize,
    f: &mut ratzilla::ratatui::Frame<'_>,
    area: Rect,
) {
    // Grouped by ocean in first-seen order, shallowest first within a group.
    let oceans = first_seen_oceans(fishes);
    let mut fishes = fishes.to_vec();
    fishes.sort_by(|a, b| {
        let ocean_a = oceans.iter().position(|o| *o == a.ocean);
        let ocean_b = oceans.iter().position(|o| *o == b.ocean);
        ocean_a
            .cmp(&ocean_b)
            .then_with(|| a.depth_value().total_cmp(&b.depth_value()))
    });

    render_fish_rows(&fishes, row_offset, f, area, 18);
}

fn render_all_fish(
    fishes: &[FishExport],
    row_offset: usize,
    f: &mut ratzilla::ratatui::Frame<'_>,
    area: Rect,
) {
    render_fish_rows(fishes, row_offset, f, area, 18);
}

fn render_fish_rows(
    fishes: &[FishExport],
    row_offset: usize,
    f: &mut ratzilla::ratatui::Frame<'_>,
    area: Rect,
    max_rows: usize,
) {
    if fishes.is_empty() {
        let paragraph = Paragraph::new("No fish available")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Name"),
        Cell::from("Ocean"),
        Cell::from("Species"),
        Cell::from("Archetype"),
        Cell::from("Depth (m)"),
    ])
    .style(
        Style::default()
            .fg(Color::Rgb(0, 70, 140))
            .bg(Color::Rgb(200, 200, 200))
            .add_modifier(Modifier::BOLD),
    );

    let rows = std::iter::once(Row::new(vec![
        Cell::from(" "),
        Cell::from(" "),
        Cell::from(" "),
        Cell::from(" "),
        Cell::from(" "),
    ]))
    .chain(fishes.iter().skip(row_offset).take(max_rows).map(|fish| {
        Row::new(vec![
            Cell::from(fish.common_name.clone()),
            Cell::from(fish.ocean.clone()),
            Cell::from(fish.species.clone()),
            Cell::from(fish.archetype.clone()),
            Cell::from(fish.depth.clone()),
        ])
        .style(Style::default().fg(Color::White))
    }));

    let table = Table::new(
        rows,
        [
            Constraint::Length(20),
            Constraint::Length(16),
            Constraint::Length(14),
            Constraint::Length(10),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .column_spacing(1);

    f.render_widget(table, area);

    let mut scrollbar_state = ScrollbarState::new(fishes.len())
        .position(row_offset)
        .viewport_content_length(max_rows.min(area.height.saturating_sub(1) as usize));
    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .thumb_style(Style::default().fg(Color::Rgb(0, 70, 140)));
    let scroll_area = Rect {
        x: area.x,
        y: area.y.saturating_add(1),
        width: area.width,
        height: area.height.saturating_sub(1),
    };
    f.render_stateful_widget(scrollbar, scroll_area, &mut scrollbar_state);
}

fn species_color(species: &str) -> Color {
    match species {
        "Reef Fish" => Color::Rgb(0, 70, 140),
        "Pelagic Fish" => Color::Cyan,
        "Eel-like Fish" => Color::Yellow,
        "Demersal Fish" => Color::Magenta,
        _ => Color::Gray,
    }
}

async fn fetch_fishes(store: Rc<RefCell<Option<Vec<FishExport>>>>) {
    let Some(window) = web_sys::window() else {
        return;
    };

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::SameOrigin);

    let Ok(request) = Request::new_with_str_and_init("fishes.json", &opts) else {
        return;
    };

    let Ok(response_value) =
        wasm_bindgen_futures::JsFuture::from(window.fetch_with_request(&request)).await
    else {
        return;
    };

    let Ok(response) = response_value.dyn_into::<Response>() else {
        web_sys::console::error_1(&"Failed to read response".into());
        return;
    };

    let Ok(json_promise) = response.json() else {
        web_sys::console::error_1(&"Failed to read fishes.json body".into());
        return;
    };

    let Ok(json) = wasm_bindgen_futures::JsFuture::from(json_promise).await else {
        web_sys::console::error_1(&"Failed to read fishes.json body".into());
        return;
    };

    let data = match serde_wasm_bindgen::from_value::<Vec<FishExport>>(json) {
        Ok(data) => data,
        Err(error) => {
            web_sys::console::error_1(&format!("Failed to parse fishes.json: {error}").into());
            return;
        }
    };

    *store.borrow_mut() = Some(data);
}
