/// Platform-agnostic 2D drawing surface.
///
/// Mirrors the path model of an HTML canvas: shapes are accumulated into the
/// current path and only hit pixels on `fill` or `stroke`.
pub trait DrawSurface {
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn begin_path(&mut self);
    fn close_path(&mut self);
    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    /// Arc around `(cx, cy)` from `start` to `end` radians, clockwise on screen
    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn fill(&mut self);
    fn stroke(&mut self);
    fn set_fill_style(&mut self, color: Color);
    fn set_stroke_style(&mut self, color: Color);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const GREY: Color = Color::rgb(128, 128, 128);
    pub const LIGHT_GREY: Color = Color::rgb(211, 211, 211);
    pub const SPINNER_BLUE: Color = Color::rgb(0x00, 0x95, 0xdd);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS hex notation, e.g. `#0095dd`
    pub fn to_css(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// One recorded surface call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    ClearRect { x: f64, y: f64, w: f64, h: f64 },
    BeginPath,
    ClosePath,
    Rect { x: f64, y: f64, w: f64, h: f64 },
    Arc { cx: f64, cy: f64, radius: f64, start: f64, end: f64 },
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    Fill,
    Stroke,
    FillStyle(Color),
    StrokeStyle(Color),
}

/// Surface that records every call instead of drawing.
///
/// Used headlessly in tests and by the native host, which replays the list
/// into egui shapes once per frame.
#[derive(Debug, Default, Clone)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Hand over the recorded commands, leaving the list empty
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn count(&self, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }
}

impl DrawSurface for DisplayList {
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.commands.push(DrawCommand::ClearRect { x, y, w, h });
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn close_path(&mut self) {
        self.commands.push(DrawCommand::ClosePath);
    }

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.commands.push(DrawCommand::Rect { x, y, w, h });
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64) {
        self.commands.push(DrawCommand::Arc { cx, cy, radius, start, end });
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::LineTo { x, y });
    }

    fn fill(&mut self) {
        self.commands.push(DrawCommand::Fill);
    }

    fn stroke(&mut self) {
        self.commands.push(DrawCommand::Stroke);
    }

    fn set_fill_style(&mut self, color: Color) {
        self.commands.push(DrawCommand::FillStyle(color));
    }

    fn set_stroke_style(&mut self, color: Color) {
        self.commands.push(DrawCommand::StrokeStyle(color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_css() {
        assert_eq!(Color::SPINNER_BLUE.to_css(), "#0095dd");
        assert_eq!(Color::GREY.to_css(), "#808080");
        assert_eq!(Color::BLACK.to_css(), "#000000");
    }

    #[test]
    fn test_display_list_records_and_takes() {
        let mut list = DisplayList::new();
        list.begin_path();
        list.rect(1.0, 2.0, 3.0, 4.0);
        list.fill();
        assert_eq!(list.commands().len(), 3);
        assert_eq!(list.count(|c| matches!(c, DrawCommand::Fill)), 1);

        let taken = list.take();
        assert_eq!(taken[1], DrawCommand::Rect { x: 1.0, y: 2.0, w: 3.0, h: 4.0 });
        assert!(list.is_empty());
    }
}
