use std::collections::HashMap;

use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::widgets::canvas::{Canvas, Circle, Line as CanvasLine, Rectangle};
use ratatui::Frame;

use crate::app::App;
use crate::data::{HierarchyNode, ROOT_ID};

/// A hierarchy node placed in polar coordinates. Radius runs 0 (root) to 1
/// (fish leaves), angle from the top of the circle, clockwise.
struct PlacedNode {
    index: usize,
    angle: f64,
    radius: f64,
}

const MAX_DEPTH: f64 = 4.0;

fn polar_point(angle: f64, radius: f64) -> (f64, f64) {
    (angle.sin() * radius, angle.cos() * radius)
}

const fn depth_color(depth: usize) -> Color {
    match depth {
        0 => Color::White,
        1 => Color::Cyan,
        2 => Color::Blue,
        3 => Color::Magenta,
        _ => Color::Gray,
    }
}

/// Spreads the leaves evenly around the circle and hangs every interior node
/// at the mean angle of its children, the way a cluster layout does.
fn compute_layout(hierarchy: &[HierarchyNode]) -> Vec<PlacedNode> {
    let leaf_count = hierarchy.iter().filter(|node| node.is_leaf_id()).count();
    if leaf_count == 0 {
        return Vec::new();
    }

    let mut angles: HashMap<&str, f64> = HashMap::new();
    let mut next_leaf = 0.0_f64;
    #[allow(clippy::cast_precision_loss)]
    let slice = std::f64::consts::TAU / leaf_count as f64;

    for node in hierarchy {
        if node.is_leaf_id() {
            angles.insert(node.id.as_str(), next_leaf * slice);
            next_leaf += 1.0;
        }
    }

    // Interior angles resolve bottom-up from the leaves.
    for depth in (1..=3).rev() {
        for node in hierarchy {
            if node.depth() != depth {
                continue;
            }
            let (sum, count) = hierarchy
                .iter()
                .filter(|child| child.parent_id.as_deref() == Some(node.id.as_str()))
                .filter_map(|child| angles.get(child.id.as_str()))
                .fold((0.0, 0_usize), |(sum, count), angle| {
                    (sum + angle, count + 1)
                });
            if count > 0 {
                #[allow(clippy::cast_precision_loss)]
                angles.insert(node.id.as_str(), sum / count as f64);
            }
        }
    }
    angles.insert(ROOT_ID, 0.0);

    hierarchy
        .iter()
        .enumerate()
        .filter_map(|(index, node)| {
            let angle = *angles.get(node.id.as_str())?;
            #[allow(clippy::cast_precision_loss)]
            let radius = node.depth() as f64 / MAX_DEPTH;
            Some(PlacedNode {
                index,
                angle,
                radius,
            })
        })
        .collect()
}

/// Ids along the current drill path, root first.
fn selected_path(app: &App) -> Vec<String> {
    let mut path = vec![ROOT_ID.to_string()];
    let Some(cursor) = app.navigator.as_ref().map(crate::data::Navigator::cursor) else {
        return path;
    };

    if let Some(ocean) = &cursor.ocean {
        path.push(format!("{ROOT_ID}.{ocean}"));
        if let Some(species) = &cursor.species {
            path.push(format!("{ROOT_ID}.{ocean}.{species}"));
            if let Some(archetype) = &cursor.archetype {
                path.push(format!("{ROOT_ID}.{ocean}.{species}.{archetype}"));
            }
        }
    }
    path
}

fn leaf_row(node: &HierarchyNode) -> Option<usize> {
    if !node.is_leaf_id() {
        return None;
    }
    node.id.rsplit('.').next()?.parse().ok()
}

pub fn render_radial_tree(app: &App, f: &mut Frame<'_>, area: Rect) {
    if area.width < 8 || area.height < 6 {
        return;
    }

    let placed = compute_layout(&app.hierarchy);
    let path = selected_path(app);
    let selected_match = app
        .search_matches
        .get(app.search_match_index)
        .copied()
        .filter(|_| app.search_active);

    let extent = 1.15 / app.radial_zoom;
    let (pan_x, pan_y) = app.radial_pan;

    f.render_widget(
        Canvas::default()
            .paint(|ctx| {
                // Depth guides
                for depth in 1..=4 {
                    ctx.draw(&Circle {
                        x: 0.0,
                        y: 0.0,
                        radius: f64::from(depth) / MAX_DEPTH,
                        color: Color::DarkGray,
                    });
                }

                for node in &placed {
                    let hierarchy_node = &app.hierarchy[node.index];
                    let Some(parent_id) = hierarchy_node.parent_id.as_deref() else {
                        continue;
                    };
                    let Some(parent) = placed
                        .iter()
                        .find(|p| app.hierarchy[p.index].id == parent_id)
                    else {
                        continue;
                    };

                    let on_path = path.contains(&hierarchy_node.id)
                        || path.last().map(String::as_str)
                            == hierarchy_node.parent_id.as_deref();
                    let (x1, y1) = polar_point(parent.angle, parent.radius);
                    let (x2, y2) = polar_point(node.angle, node.radius);
                    ctx.draw(&CanvasLine {
                        x1,
                        y1,
                        x2,
                        y2,
                        color: if on_path { Color::Cyan } else { Color::DarkGray },
                    });
                }

                ctx.layer();

                for node in &placed {
                    let hierarchy_node = &app.hierarchy[node.index];
                    let (x, y) = polar_point(node.angle, node.radius);
                    let depth = hierarchy_node.depth();
                    let row = leaf_row(hierarchy_node);

                    let color = if row.is_some_and(|r| Some(r) == selected_match) {
                        Color::LightYellow
                    } else if row.is_some_and(|r| app.search_matches.contains(&r)) {
                        Color::Yellow
                    } else if path.contains(&hierarchy_node.id) {
                        Color::LightCyan
                    } else {
                        depth_color(depth)
                    };

                    ctx.draw(&Circle {
                        x,
                        y,
                        radius: if depth == 4 { 0.012 } else { 0.022 },
                        color,
                    });

                    // Labels only where they stay legible: oceans, the drill
                    // path, and the highlighted search match.
                    let labeled = depth == 1
                        || path.contains(&hierarchy_node.id)
                        || row.is_some_and(|r| Some(r) == selected_match);
                    if labeled {
                        ctx.print(x + 0.03, y, hierarchy_node.display_name.clone());
                    }
                }
            })
            .x_bounds([pan_x - extent, pan_x + extent])
            .y_bounds([pan_y - extent, pan_y + extent]),
        area,
    );

    if app.radial_zoom > 1.0 {
        render_minimap(app, f, area, extent);
    }
}

/// Inset overview in the bottom right corner showing where the viewport sits
/// inside the full circle.
fn render_minimap(app: &App, f: &mut Frame<'_>, area: Rect, extent: f64) {
    const MINIMAP_WIDTH: u16 = 18;
    const MINIMAP_HEIGHT: u16 = 9;

    if area.width < MINIMAP_WIDTH + 4 || area.height < MINIMAP_HEIGHT + 2 {
        return;
    }

    let inset = Rect {
        x: area.x + area.width - MINIMAP_WIDTH - 1,
        y: area.y + area.height - MINIMAP_HEIGHT - 1,
        width: MINIMAP_WIDTH,
        height: MINIMAP_HEIGHT,
    };

    let (pan_x, pan_y) = app.radial_pan;

    f.render_widget(
        Canvas::default()
            .paint(|ctx| {
                ctx.draw(&Circle {
                    x: 0.0,
                    y: 0.0,
                    radius: 1.0,
                    color: Color::DarkGray,
                });
                ctx.draw(&Rectangle {
                    x: pan_x - extent,
                    y: pan_y - extent,
                    width: extent * 2.0,
                    height: extent * 2.0,
                    color: Color::Yellow,
                });
            })
            .x_bounds([-1.2, 1.2])
            .y_bounds([-1.2, 1.2]),
        inset,
    );
}

/// Small decorative radial in the browse header: depth rings and a fish dot
/// swimming around the outer ring.
pub fn render_mini_radial(f: &mut Frame<'_>, area: Rect, animation: f64) {
    if area.width < 4 || area.height < 4 {
        return;
    }

    let size = area.width.min(area.height);
    let square = Rect {
        x: area.x + (area.width - size) / 2,
        y: area.y + (area.height - size) / 2,
        width: size,
        height: size,
    };

    f.render_widget(
        Canvas::default()
            .paint(|ctx| {
                let width = f64::from(square.width);
                let height = f64::from(square.height);
                let center_x = width / 2.0;
                let center_y = height / 2.0;
                let radius = width.min(height) / 2.0 * 0.8;

                for i in 1..=4 {
                    ctx.draw(&Circle {
                        x: center_x,
                        y: center_y,
                        radius: radius * (f64::from(i) / MAX_DEPTH),
                        color: Color::DarkGray,
                    });
                }

                let angle = animation;
                let fish_x = angle.cos().mul_add(radius, center_x);
                let fish_y = angle.sin().mul_add(radius, center_y);

                let trail_angle = angle - (std::f64::consts::PI / 14.0);
                let trail_x = trail_angle.cos().mul_add(radius * 0.97, center_x);
                let trail_y = trail_angle.sin().mul_add(radius * 0.97, center_y);

                ctx.draw(&CanvasLine {
                    x1: trail_x,
                    y1: trail_y,
                    x2: fish_x,
                    y2: fish_y,
                    color: Color::LightCyan,
                });

                ctx.draw(&Circle {
                    x: fish_x,
                    y: fish_y,
                    radius: radius * 0.08,
                    color: Color::Cyan,
                });

                ctx.draw(&Circle {
                    x: center_x,
                    y: center_y,
                    radius: radius * 0.05,
                    color: Color::White,
                });
            })
            .x_bounds([0.0, f64::from(square.width)])
            .y_bounds([0.0, f64::from(square.height)]),
        square,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, parent: Option<&str>, name: &str) -> HierarchyNode {
        HierarchyNode {
            id: id.to_string(),
            parent_id: parent.map(str::to_string),
            display_name: name.to_string(),
            scientific_name: name.to_string(),
        }
    }

    // Same shape build_hierarchy emits: leaves hang off the species node.
    fn sample() -> Vec<HierarchyNode> {
        vec![
            node("Root", None, "Root"),
            node("Root.Pacific", Some("Root"), "Pacific"),
            node(
                "Root.Pacific.Reef Fish",
                Some("Root.Pacific"),
                "Reef Fish",
            ),
            node(
                "Root.Pacific.Reef Fish.Predator.0",
                Some("Root.Pacific.Reef Fish"),
                "Grouper",
            ),
            node(
                "Root.Pacific.Reef Fish.Prey.1",
                Some("Root.Pacific.Reef Fish"),
                "Sardine",
            ),
            node(
                "Root.Pacific.Reef Fish.Prey.2",
                Some("Root.Pacific.Reef Fish"),
                "Damselfish",
            ),
        ]
    }

    fn angle_of<'a>(
        placed: &'a [PlacedNode],
        hierarchy: &[HierarchyNode],
        id: &str,
    ) -> &'a PlacedNode {
        placed
            .iter()
            .find(|p| hierarchy[p.index].id == id)
            .unwrap()
    }

    #[test]
    fn leaves_are_evenly_spaced_around_the_circle() {
        let hierarchy = sample();
        let placed = compute_layout(&hierarchy);

        let slice = std::f64::consts::TAU / 3.0;
        let a = angle_of(&placed, &hierarchy, "Root.Pacific.Reef Fish.Predator.0");
        let b = angle_of(&placed, &hierarchy, "Root.Pacific.Reef Fish.Prey.1");
        let c = angle_of(&placed, &hierarchy, "Root.Pacific.Reef Fish.Prey.2");

        assert!((a.angle - 0.0).abs() < 1e-9);
        assert!((b.angle - slice).abs() < 1e-9);
        assert!((c.angle - 2.0 * slice).abs() < 1e-9);
    }

    #[test]
    fn interior_nodes_sit_at_the_mean_angle_of_their_children() {
        let hierarchy = sample();
        let placed = compute_layout(&hierarchy);

        let slice = std::f64::consts::TAU / 3.0;
        let species = angle_of(&placed, &hierarchy, "Root.Pacific.Reef Fish");
        assert!((species.angle - slice).abs() < 1e-9);
    }

    #[test]
    fn radius_grows_with_depth() {
        let hierarchy = sample();
        let placed = compute_layout(&hierarchy);

        assert!((angle_of(&placed, &hierarchy, "Root").radius - 0.0).abs() < 1e-9);
        assert!((angle_of(&placed, &hierarchy, "Root.Pacific").radius - 0.25).abs() < 1e-9);
        assert!(
            (angle_of(&placed, &hierarchy, "Root.Pacific.Reef Fish.Prey.1").radius - 1.0).abs()
                < 1e-9
        );
    }

    #[test]
    fn empty_hierarchy_places_nothing() {
        assert!(compute_layout(&[]).is_empty());
    }

    #[test]
    fn leaf_rows_parse_from_the_last_id_segment() {
        let leaf = node(
            "Root.Pacific.Reef Fish.Prey.7",
            Some("Root.Pacific.Reef Fish"),
            "Sardine",
        );
        assert_eq!(leaf_row(&leaf), Some(7));
        assert_eq!(leaf_row(&node("Root.Pacific", Some("Root"), "Pacific")), None);
    }
}
