//! Reads the four demo parameters from user-editable fields, clamps them and
//! builds the two models from the viewport geometry.
//!
//! Bad input is never rejected: it is replaced by a default or a bound and the
//! replacement is written back to the field. This is a usability compromise
//! (the user gets no explanation, just a changed number) kept on purpose.

use glam::DVec2;

use crate::model::{Oscillator, Spinner};

pub const DEFAULT_AMPLITUDE: f64 = 100.0;
pub const MAX_AMPLITUDE: f64 = 200.0;
pub const MIN_AMPLITUDE: f64 = 1.0;

/// `omega_squared = omega^2 / OMEGA_SCALE`
pub const OMEGA_SCALE: f64 = 2500.0;
pub const DEFAULT_OMEGA_SQUARED: f64 = 4.0;
pub const MAX_OMEGA_SQUARED: f64 = 100.0;
// Shown text and stored value diverge for the omega fallbacks; kept as observed.
pub const DEFAULT_OMEGA_DISPLAY: &str = "100";
pub const MAX_OMEGA_DISPLAY: &str = "500";

/// Height in pixels reserved below the drawing area for the input controls
pub const CONTROL_STRIP_HEIGHT: f64 = 150.0;

/// The four user-editable parameter fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    OscillatorAmplitude,
    OscillatorOmega,
    SpinnerAmplitude,
    SpinnerOmega,
}

impl Field {
    pub const ALL: [Field; 4] = [
        Field::OscillatorAmplitude,
        Field::OscillatorOmega,
        Field::SpinnerAmplitude,
        Field::SpinnerOmega,
    ];

    /// DOM id of the matching `<input>` element
    pub fn element_id(self) -> &'static str {
        match self {
            Field::OscillatorAmplitude => "oscillatorAmplitude",
            Field::OscillatorOmega => "oscillatorOmega",
            Field::SpinnerAmplitude => "spinnerAmplitude",
            Field::SpinnerOmega => "spinnerOmega",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::OscillatorAmplitude => "Oscillator amplitude",
            Field::OscillatorOmega => "Oscillator omega",
            Field::SpinnerAmplitude => "Spinner amplitude",
            Field::SpinnerOmega => "Spinner omega",
        }
    }

    fn index(self) -> usize {
        match self {
            Field::OscillatorAmplitude => 0,
            Field::OscillatorOmega => 1,
            Field::SpinnerAmplitude => 2,
            Field::SpinnerOmega => 3,
        }
    }
}

/// Read/write access to the parameter fields of whatever UI hosts them
pub trait ConfigFields {
    fn read(&self, field: Field) -> String;
    fn write(&mut self, field: Field, value: &str);
}

/// Plain in-memory field values (native egui text edits, tests)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldBuffers {
    values: [String; 4],
}

impl Default for FieldBuffers {
    fn default() -> Self {
        Self {
            values: std::array::from_fn(|_| "100".to_string()),
        }
    }
}

impl FieldBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: Field, value: &str) -> Self {
        self.write(field, value);
        self
    }

    pub fn get(&self, field: Field) -> &str {
        &self.values[field.index()]
    }

    pub fn get_mut(&mut self, field: Field) -> &mut String {
        &mut self.values[field.index()]
    }
}

impl ConfigFields for FieldBuffers {
    fn read(&self, field: Field) -> String {
        self.get(field).to_string()
    }

    fn write(&mut self, field: Field, value: &str) {
        self.values[field.index()] = value.to_string();
    }
}

/// A parsed parameter plus the text to show in its field, if it was corrected
#[derive(Debug, Clone, PartialEq)]
pub struct Intake {
    pub value: f64,
    pub correction: Option<String>,
}

impl Intake {
    fn accepted(value: f64) -> Self {
        Self { value, correction: None }
    }

    fn corrected(value: f64, shown: impl Into<String>) -> Self {
        Self {
            value,
            correction: Some(shown.into()),
        }
    }
}

/// Lenient integer parse with browser `parseInt` semantics: leading whitespace,
/// an optional sign, then the longest run of digits. A `0x` prefix switches to
/// hex. Trailing garbage is ignored. `None` when no digit was found.
pub fn parse_int(raw: &str) -> Option<f64> {
    let s = raw.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}');
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let (radix, digits) = match s.get(..2) {
        Some("0x") | Some("0X") => (16, &s[2..]),
        _ => (10, s),
    };

    let mut value = 0.0_f64;
    let mut seen = false;
    for c in digits.chars() {
        match c.to_digit(radix) {
            Some(d) => {
                value = value * radix as f64 + d as f64;
                seen = true;
            }
            None => break,
        }
    }

    if !seen {
        return None;
    }
    Some(if negative { -value } else { value })
}

/// Amplitude in pixels: default 100, clamped to `[1, 200]`
pub fn intake_amplitude(raw: &str) -> Intake {
    match parse_int(raw) {
        None => Intake::corrected(DEFAULT_AMPLITUDE, "100"),
        Some(a) if a > MAX_AMPLITUDE => Intake::corrected(MAX_AMPLITUDE, "200"),
        Some(a) if a < MIN_AMPLITUDE => Intake::corrected(MIN_AMPLITUDE, "1"),
        Some(a) => Intake::accepted(a),
    }
}

/// `omega^2 / 2500`, default 4, capped at 100. No lower bound.
pub fn intake_omega_squared(raw: &str) -> Intake {
    let omega_squared = parse_int(raw).map(|w| w * w / OMEGA_SCALE);
    match omega_squared {
        None => Intake::corrected(DEFAULT_OMEGA_SQUARED, DEFAULT_OMEGA_DISPLAY),
        Some(w2) if w2.is_nan() => Intake::corrected(DEFAULT_OMEGA_SQUARED, DEFAULT_OMEGA_DISPLAY),
        Some(w2) if w2 > MAX_OMEGA_SQUARED => Intake::corrected(MAX_OMEGA_SQUARED, MAX_OMEGA_DISPLAY),
        Some(w2) => Intake::accepted(w2),
    }
}

/// Drawing area in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Drawing area left in a host window once the control strip is taken off
    pub fn from_host(window_width: f64, window_height: f64) -> Self {
        Self {
            width: window_width.max(0.0),
            height: (window_height - CONTROL_STRIP_HEIGHT).max(0.0),
        }
    }

    pub fn oscillator_center(&self) -> DVec2 {
        let (w, h) = (self.width, self.height);
        DVec2::new(w / 3.0 - w / 21.0, h / 2.0 - h / 43.0)
    }

    pub fn spinner_center(&self) -> DVec2 {
        DVec2::new(self.width * 2.0 / 3.0, self.height / 2.0)
    }
}

/// Why the host surface had to be reconfigured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceChange {
    /// The window changed size: the drawing area and both models follow
    WindowResized,
    /// The GPU surface was lost at the same size: only the surface is rebuilt
    SurfaceLost,
}

impl SurfaceChange {
    pub fn needs_intake(self) -> bool {
        matches!(self, SurfaceChange::WindowResized)
    }
}

/// Clamped parameters of both demos
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemoParams {
    pub oscillator_amplitude: f64,
    pub oscillator_omega_squared: f64,
    pub spinner_amplitude: f64,
    pub spinner_omega_squared: f64,
}

/// Freshly built models, ready to hand to the frame loop
#[derive(Debug, Clone, PartialEq)]
pub struct DemoScene {
    pub viewport: Viewport,
    pub oscillator: Oscillator,
    pub spinner: Spinner,
}

/// Read every field, write corrections back, return the clamped parameters
pub fn read_params(fields: &mut dyn ConfigFields) -> DemoParams {
    let mut take = |field: Field, intake: fn(&str) -> Intake| {
        let raw = fields.read(field);
        let Intake { value, correction } = intake(&raw);
        if let Some(shown) = correction {
            tracing::debug!(field = field.element_id(), raw = %raw, value, shown = %shown, "corrected field");
            fields.write(field, &shown);
        }
        value
    };

    DemoParams {
        oscillator_amplitude: take(Field::OscillatorAmplitude, intake_amplitude),
        oscillator_omega_squared: take(Field::OscillatorOmega, intake_omega_squared),
        spinner_amplitude: take(Field::SpinnerAmplitude, intake_amplitude),
        spinner_omega_squared: take(Field::SpinnerOmega, intake_omega_squared),
    }
}

pub fn build_scene(params: &DemoParams, viewport: Viewport) -> DemoScene {
    DemoScene {
        viewport,
        oscillator: Oscillator::new(
            viewport.oscillator_center(),
            params.oscillator_amplitude,
            params.oscillator_omega_squared,
        ),
        spinner: Spinner::new(
            viewport.spinner_center(),
            params.spinner_amplitude,
            params.spinner_omega_squared,
        ),
    }
}

/// Full intake pass: fields in, models out
pub fn intake(fields: &mut dyn ConfigFields, viewport: Viewport) -> DemoScene {
    let params = read_params(fields);
    tracing::info!(
        width = viewport.width,
        height = viewport.height,
        ?params,
        "applying configuration"
    );
    build_scene(&params, viewport)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int_like_browser() {
        assert_eq!(parse_int("42"), Some(42.0));
        assert_eq!(parse_int("  17px"), Some(17.0));
        assert_eq!(parse_int("-5"), Some(-5.0));
        assert_eq!(parse_int("+8"), Some(8.0));
        assert_eq!(parse_int("3.9"), Some(3.0));
        assert_eq!(parse_int("0x1A"), Some(26.0));
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("abc"), None);
        assert_eq!(parse_int("-"), None);
        assert_eq!(parse_int("0x"), None);
    }

    #[test]
    fn test_parse_int_skips_byte_order_mark() {
        assert_eq!(parse_int("\u{FEFF}42"), Some(42.0));
        assert_eq!(parse_int(" \u{FEFF}\t-7"), Some(-7.0));
        assert_eq!(intake_amplitude("\u{FEFF}42"), Intake::accepted(42.0));
    }

    #[test]
    fn test_only_window_resize_rebuilds_models() {
        assert!(SurfaceChange::WindowResized.needs_intake());
        assert!(!SurfaceChange::SurfaceLost.needs_intake());
    }

    #[test]
    fn test_amplitude_clamps() {
        assert_eq!(intake_amplitude("9999"), Intake::corrected(200.0, "200"));
        assert_eq!(intake_amplitude("abc"), Intake::corrected(100.0, "100"));
        assert_eq!(intake_amplitude("0"), Intake::corrected(1.0, "1"));
        assert_eq!(intake_amplitude("-30"), Intake::corrected(1.0, "1"));
        assert_eq!(intake_amplitude("150"), Intake::accepted(150.0));
        assert_eq!(intake_amplitude("200"), Intake::accepted(200.0));
    }

    #[test]
    fn test_omega_clamps() {
        assert_eq!(intake_omega_squared("abc"), Intake::corrected(4.0, "100"));
        assert_eq!(intake_omega_squared("1000"), Intake::corrected(100.0, "500"));
        assert_eq!(intake_omega_squared("500"), Intake::accepted(100.0));
        assert_eq!(intake_omega_squared("50"), Intake::accepted(1.0));
        assert_eq!(intake_omega_squared("-100"), Intake::accepted(4.0));
        assert_eq!(intake_omega_squared("0"), Intake::accepted(0.0));
    }

    #[test]
    fn test_read_params_writes_corrections_back() {
        let mut fields = FieldBuffers::new()
            .with(Field::OscillatorAmplitude, "9999")
            .with(Field::OscillatorOmega, "abc")
            .with(Field::SpinnerAmplitude, "0")
            .with(Field::SpinnerOmega, "100000");

        let params = read_params(&mut fields);
        assert_eq!(params.oscillator_amplitude, 200.0);
        assert_eq!(params.oscillator_omega_squared, 4.0);
        assert_eq!(params.spinner_amplitude, 1.0);
        assert_eq!(params.spinner_omega_squared, 100.0);

        assert_eq!(fields.get(Field::OscillatorAmplitude), "200");
        assert_eq!(fields.get(Field::OscillatorOmega), "100");
        assert_eq!(fields.get(Field::SpinnerAmplitude), "1");
        assert_eq!(fields.get(Field::SpinnerOmega), "500");
    }

    #[test]
    fn test_valid_input_left_untouched() {
        let mut fields = FieldBuffers::new().with(Field::OscillatorAmplitude, "120 px");
        let params = read_params(&mut fields);
        assert_eq!(params.oscillator_amplitude, 120.0);
        assert_eq!(fields.get(Field::OscillatorAmplitude), "120 px");
    }

    #[test]
    fn test_viewport_geometry() {
        let vp = Viewport::from_host(1050.0, 1010.0);
        assert_eq!(vp, Viewport::new(1050.0, 860.0));
        assert_eq!(vp.oscillator_center(), DVec2::new(300.0, 410.0));
        assert_eq!(vp.spinner_center(), DVec2::new(700.0, 430.0));
        assert_eq!(Viewport::from_host(300.0, 100.0).height, 0.0);
    }

    #[test]
    fn test_intake_builds_models() {
        let mut fields = FieldBuffers::new()
            .with(Field::OscillatorAmplitude, "100")
            .with(Field::OscillatorOmega, "50");
        let scene = intake(&mut fields, Viewport::new(1050.0, 860.0));

        assert_eq!(scene.oscillator.body.vel.y, 100.0);
        assert_eq!(scene.oscillator.center, DVec2::new(300.0, 410.0));
        assert_eq!(scene.spinner.omega_squared, 4.0);
        assert_eq!(scene.spinner.body.pos, DVec2::new(800.0, 430.0));
    }
}
