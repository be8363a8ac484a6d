//! Replays a recorded [`DrawCommand`] list as egui shapes.
//!
//! Follows the canvas path model closely enough for the demo: rects become
//! closed subpaths, arcs are tessellated and joined to the current subpath,
//! `fill` fills every subpath with at least three points (all of ours are
//! convex) and `stroke` outlines every subpath.

use std::f64::consts::TAU;

use egui::{Color32, Pos2, Rect, Shape, Stroke};

use super::surface::{Color, DrawCommand};

const STROKE_WIDTH: f32 = 1.0;
/// Arc tessellation density: segments per full turn
const ARC_SEGMENTS: f64 = 48.0;

fn color32(c: Color) -> Color32 {
    Color32::from_rgb(c.r, c.g, c.b)
}

#[derive(Default)]
struct SubPath {
    points: Vec<Pos2>,
    closed: bool,
}

struct PathState {
    origin: Pos2,
    subpaths: Vec<SubPath>,
    fill: Color32,
    stroke: Color32,
}

impl PathState {
    fn new(origin: Pos2) -> Self {
        Self {
            origin,
            subpaths: Vec::new(),
            fill: Color32::BLACK,
            stroke: Color32::BLACK,
        }
    }

    fn pos(&self, x: f64, y: f64) -> Pos2 {
        Pos2::new(self.origin.x + x as f32, self.origin.y + y as f32)
    }

    fn current(&mut self) -> &mut SubPath {
        if self.subpaths.last().map_or(true, |s| s.closed) {
            self.subpaths.push(SubPath::default());
        }
        // just pushed if it was missing
        let last = self.subpaths.len() - 1;
        &mut self.subpaths[last]
    }

    fn move_to(&mut self, x: f64, y: f64) {
        let p = self.pos(x, y);
        self.subpaths.push(SubPath { points: vec![p], closed: false });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        let p = self.pos(x, y);
        self.current().points.push(p);
    }

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        let points = vec![
            self.pos(x, y),
            self.pos(x + w, y),
            self.pos(x + w, y + h),
            self.pos(x, y + h),
        ];
        self.subpaths.push(SubPath { points, closed: true });
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64) {
        let sweep = (end - start).clamp(-TAU, TAU);
        let steps = ((sweep.abs() / TAU) * ARC_SEGMENTS).ceil().max(1.0) as usize;
        let points: Vec<Pos2> = (0..=steps)
            .map(|i| {
                let a = start + sweep * i as f64 / steps as f64;
                self.pos(cx + radius * a.cos(), cy + radius * a.sin())
            })
            .collect();
        self.current().points.extend(points);
    }

    fn close(&mut self) {
        if let Some(last) = self.subpaths.last_mut() {
            last.closed = true;
        }
    }

    fn fill_shapes(&self) -> impl Iterator<Item = Shape> + '_ {
        self.subpaths
            .iter()
            .filter(|s| s.points.len() >= 3)
            .map(|s| Shape::convex_polygon(s.points.clone(), self.fill, Stroke::NONE))
    }

    fn stroke_shapes(&self) -> impl Iterator<Item = Shape> + '_ {
        let stroke = Stroke::new(STROKE_WIDTH, self.stroke);
        self.subpaths.iter().filter(|s| s.points.len() >= 2).map(move |s| {
            if s.closed {
                Shape::closed_line(s.points.clone(), stroke)
            } else {
                Shape::line(s.points.clone(), stroke)
            }
        })
    }
}

/// Translate `commands` into shapes, offsetting every coordinate by `origin`
pub fn to_shapes(commands: &[DrawCommand], origin: Pos2) -> Vec<Shape> {
    let mut state = PathState::new(origin);
    let mut shapes = Vec::new();

    for cmd in commands {
        match *cmd {
            DrawCommand::ClearRect { x, y, w, h } => {
                let rect = Rect::from_two_pos(state.pos(x, y), state.pos(x + w, y + h));
                shapes.push(Shape::rect_filled(rect, 0.0, Color32::WHITE));
            }
            DrawCommand::BeginPath => state.subpaths.clear(),
            DrawCommand::ClosePath => state.close(),
            DrawCommand::Rect { x, y, w, h } => state.rect(x, y, w, h),
            DrawCommand::Arc { cx, cy, radius, start, end } => state.arc(cx, cy, radius, start, end),
            DrawCommand::MoveTo { x, y } => state.move_to(x, y),
            DrawCommand::LineTo { x, y } => state.line_to(x, y),
            DrawCommand::Fill => shapes.extend(state.fill_shapes()),
            DrawCommand::Stroke => shapes.extend(state.stroke_shapes()),
            DrawCommand::FillStyle(c) => state.fill = color32(c),
            DrawCommand::StrokeStyle(c) => state.stroke = color32(c),
        }
    }
    shapes
}
