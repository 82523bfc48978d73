use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::widgets::canvas::{Canvas, Circle, Map, MapResolution};
use ratatui::Frame;

/// World map for the detail popup. The marker pulses on the fish's recorded
/// coordinates; without coordinates only the coastline renders.
pub fn render_world_map(
    f: &mut Frame<'_>,
    area: Rect,
    marker: Option<(f64, f64)>,
    animation: f64,
) {
    if area.width < 10 || area.height < 5 {
        return;
    }

    f.render_widget(
        Canvas::default()
            .paint(|ctx| {
                ctx.draw(&Map {
                    resolution: MapResolution::High,
                    color: Color::DarkGray,
                });

                if let Some((latitude, longitude)) = marker {
                    let pulse = (animation * 3.0).sin().mul_add(0.35, 1.0);
                    ctx.draw(&Circle {
                        x: longitude,
                        y: latitude,
                        radius: 3.0 * pulse,
                        color: Color::LightRed,
                    });
                    ctx.draw(&Circle {
                        x: longitude,
                        y: latitude,
                        radius: 0.8,
                        color: Color::Red,
                    });
                }
            })
            .x_bounds([-180.0, 180.0])
            .y_bounds([-90.0, 90.0]),
        area,
    );
}
