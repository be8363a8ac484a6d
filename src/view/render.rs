use std::f64::consts::TAU;

use crate::model::spinner::HUB_RADIUS;
use crate::model::{Oscillator, Spinner};

use super::surface::{Color, DrawSurface};

/// Number of zig-zag segments in the drawn spring
pub const SPRING_SEGMENTS: usize = 10;
/// Horizontal swing of each spring segment in pixels
pub const SPRING_SWING: f64 = 10.0;

/// Draw both demos in their current state
pub fn draw_scene(surface: &mut dyn DrawSurface, oscillator: &Oscillator, spinner: &Spinner) {
    draw_oscillator(surface, oscillator);
    draw_spinner(surface, spinner);
}

/// Mass block, anchor block and the spring between them
pub fn draw_oscillator(surface: &mut dyn DrawSurface, osc: &Oscillator) {
    surface.begin_path();
    surface.rect(osc.body.x(), osc.body.y(), osc.width, osc.height);
    surface.rect(
        osc.center.x - osc.width / 2.0,
        osc.center.y - osc.amplitude - osc.height,
        osc.width * 2.0,
        osc.height,
    );
    surface.set_fill_style(Color::GREY);
    surface.fill();
    draw_spring(surface, osc);
}

// Strokes the whole current path, outlines of both blocks included.
fn draw_spring(surface: &mut dyn DrawSurface, osc: &Oscillator) {
    let start = osc.anchor_bottom();
    let half_step = osc.spring_length() / (2 * SPRING_SEGMENTS) as f64;
    let x = start.x;
    let mut y = start.y;

    for i in 0..SPRING_SEGMENTS {
        let swing_x = if i % 2 == 0 { x - SPRING_SWING } else { x + SPRING_SWING };
        surface.move_to(x, y);
        y += half_step;
        surface.line_to(swing_x, y);
        surface.move_to(swing_x, y);
        y += half_step;
        surface.line_to(x, y);
    }
    surface.set_stroke_style(Color::BLACK);
    surface.stroke();
    surface.close_path();
}

/// Orbit guide, bob, hub and the arm joining them
pub fn draw_spinner(surface: &mut dyn DrawSurface, sp: &Spinner) {
    let (x, y) = (sp.body.x(), sp.body.y());
    let (cx, cy) = (sp.center.x, sp.center.y);

    surface.begin_path();
    surface.arc(cx, cy, sp.amplitude, 0.0, TAU);
    surface.set_stroke_style(Color::LIGHT_GREY);
    surface.stroke();

    surface.begin_path();
    surface.arc(x, y, sp.radius, 0.0, TAU);
    surface.move_to(cx + HUB_RADIUS, cy);
    surface.arc(cx, cy, HUB_RADIUS, 0.0, TAU);
    surface.set_fill_style(Color::SPINNER_BLUE);
    surface.fill();
    surface.move_to(cx, cy);
    surface.line_to(x, y);
    surface.set_stroke_style(Color::BLACK);
    surface.stroke();
    surface.close_path();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::surface::{DisplayList, DrawCommand};
    use glam::DVec2;

    fn line_targets(list: &DisplayList) -> Vec<(f64, f64)> {
        list.commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::LineTo { x, y } => Some((*x, *y)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_oscillator_blocks() {
        let osc = Oscillator::new(DVec2::new(200.0, 300.0), 100.0, 4.0);
        let mut list = DisplayList::new();
        draw_oscillator(&mut list, &osc);

        let cmds = list.commands();
        assert_eq!(cmds[0], DrawCommand::BeginPath);
        assert_eq!(cmds[1], DrawCommand::Rect { x: 200.0, y: 300.0, w: 120.0, h: 60.0 });
        assert_eq!(cmds[2], DrawCommand::Rect { x: 140.0, y: 140.0, w: 240.0, h: 60.0 });
        assert_eq!(cmds[3], DrawCommand::FillStyle(Color::GREY));
        assert_eq!(cmds[4], DrawCommand::Fill);
    }

    #[test]
    fn test_spring_zigzag_spans_anchor_to_mass() {
        let mut osc = Oscillator::new(DVec2::new(200.0, 300.0), 100.0, 4.0);
        osc.body.pos.y = 340.0;
        let mut list = DisplayList::new();
        draw_oscillator(&mut list, &osc);

        let lines = line_targets(&list);
        assert_eq!(lines.len(), 2 * SPRING_SEGMENTS);

        let anchor = osc.anchor_bottom();
        for (i, pair) in lines.chunks(2).enumerate() {
            let expected_swing = if i % 2 == 0 { -SPRING_SWING } else { SPRING_SWING };
            assert_eq!(pair[0].0 - anchor.x, expected_swing, "segment {i} swings the wrong way");
            assert_eq!(pair[1].0, anchor.x);
        }

        let (_, end_y) = lines[lines.len() - 1];
        assert!((end_y - osc.body.y()).abs() < 1e-9, "spring should end on top of the mass");
        assert_eq!(list.count(|c| matches!(c, DrawCommand::Stroke)), 1);
    }

    #[test]
    fn test_spinner_shapes() {
        let sp = Spinner::new(DVec2::new(400.0, 250.0), 100.0, 4.0);
        let mut list = DisplayList::new();
        draw_spinner(&mut list, &sp);

        let arcs: Vec<_> = list
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Arc { cx, cy, radius, .. } => Some((*cx, *cy, *radius)),
                _ => None,
            })
            .collect();
        assert_eq!(arcs, vec![(400.0, 250.0, 100.0), (500.0, 250.0, 30.0), (400.0, 250.0, HUB_RADIUS)]);

        assert_eq!(line_targets(&list), vec![(500.0, 250.0)]);
        assert!(list.commands().contains(&DrawCommand::FillStyle(Color::SPINNER_BLUE)));
    }

    #[test]
    fn test_scene_draws_both() {
        let osc = Oscillator::new(DVec2::new(100.0, 100.0), 50.0, 1.0);
        let sp = Spinner::new(DVec2::new(300.0, 100.0), 50.0, 1.0);
        let mut list = DisplayList::new();
        draw_scene(&mut list, &osc, &sp);
        assert_eq!(list.count(|c| matches!(c, DrawCommand::Fill)), 2);
        assert_eq!(list.count(|c| matches!(c, DrawCommand::BeginPath)), 3);
    }
}
