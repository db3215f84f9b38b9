use crate::config::UiConfig;
use crate::core::input_router::{FormField, FormHit};
use crate::data::ui_state::{CharClass, MAX_LENGTH, MIN_LENGTH};
use crate::data::view_model::{ViewModel, EMPTY_POOL_WARNING, GENERATE_LABEL};
use crossterm::event::{MouseButton, MouseEventKind};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Clear, Widget},
};

const FORM_WIDTH: u16 = 48;
const FORM_HEIGHT: u16 = 21;

const FOCUS_COLOR: Color = Color::Rgb(255, 215, 0);
const WARNING_COLOR: Color = Color::Rgb(255, 120, 80);
const HELP_TEXT: &str = "g:Generate c:Copy Tab:Next q:Quit";

/// Screen regions of the form, derived from the area it is drawn in
#[derive(Debug, Clone, PartialEq)]
pub struct FormLayout {
    pub outer: Rect,
    pub result: Rect,
    pub slider_track: Rect,
    pub toggles: Vec<(CharClass, Rect)>,
    pub generate: Rect,
    inner_x: u16,
    inner_width: u16,
}

impl FormLayout {
    /// Center the form in `area`. None when the terminal is too small.
    pub fn compute(area: Rect) -> Option<Self> {
        if area.width < FORM_WIDTH || area.height < FORM_HEIGHT {
            return None;
        }

        let x = area.x + (area.width - FORM_WIDTH) / 2;
        let y = area.y + (area.height - FORM_HEIGHT) / 2;
        let inner_x = x + 2;
        let inner_width = FORM_WIDTH - 4;

        let toggles = CharClass::DISPLAY_ORDER
            .iter()
            .enumerate()
            .map(|(i, class)| (*class, Rect::new(inner_x, y + 11 + i as u16, inner_width, 1)))
            .collect();

        let button_width = GENERATE_LABEL.len() as u16 + 4;
        Some(Self {
            outer: Rect::new(x, y, FORM_WIDTH, FORM_HEIGHT),
            result: Rect::new(inner_x, y + 3, inner_width, 3),
            // "4 " before the track, " 32" after it
            slider_track: Rect::new(inner_x + 3, y + 8, inner_width - 7, 1),
            toggles,
            generate: Rect::new(
                inner_x + (inner_width - button_width) / 2,
                y + 16,
                button_width,
                1,
            ),
            inner_x,
            inner_width,
        })
    }

    fn row(&self, offset: u16) -> u16 {
        self.outer.y + offset
    }

    /// Slider value under a column of the track
    pub fn length_at(&self, col: u16) -> i64 {
        let track = self.slider_track;
        if track.width <= 1 {
            return MIN_LENGTH as i64;
        }
        let offset = col.saturating_sub(track.x).min(track.width - 1) as f64;
        let fraction = offset / (track.width - 1) as f64;
        MIN_LENGTH as i64 + (fraction * (MAX_LENGTH - MIN_LENGTH) as f64).round() as i64
    }

    pub fn hit_test(&self, col: u16, row: u16) -> Option<FormHit> {
        if contains(self.slider_track, col, row) {
            return Some(FormHit::Slider(self.length_at(col)));
        }
        if contains(self.result, col, row) {
            return Some(FormHit::Result);
        }
        if contains(self.generate, col, row) {
            return Some(FormHit::Generate);
        }
        self.toggles
            .iter()
            .find(|(_, rect)| contains(*rect, col, row))
            .map(|(class, _)| FormHit::Toggle(*class))
    }
}

fn contains(rect: Rect, col: u16, row: u16) -> bool {
    col >= rect.x && col < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}

/// Password generator form widget
///
/// Draws a [`ViewModel`] and remembers where it drew it so mouse events can be
/// mapped back to form elements.
#[derive(Default)]
pub struct GeneratorForm {
    layout: Option<FormLayout>,
    dragging_slider: bool,
}

impl GeneratorForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translate a mouse event into a form hit, tracking slider drags
    pub fn handle_mouse(&mut self, kind: MouseEventKind, col: u16, row: u16) -> Option<FormHit> {
        let layout = self.layout.as_ref()?;

        match kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let hit = layout.hit_test(col, row);
                self.dragging_slider = matches!(hit, Some(FormHit::Slider(_)));
                hit
            }
            MouseEventKind::Drag(MouseButton::Left) if self.dragging_slider => {
                // Follow the pointer along the track even if it leaves the row
                Some(FormHit::Slider(layout.length_at(col)))
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.dragging_slider = false;
                None
            }
            _ => None,
        }
    }

    pub fn render(
        &mut self,
        area: Rect,
        buf: &mut Buffer,
        view: &ViewModel,
        focus: FormField,
        ui: &UiConfig,
    ) {
        let Some(layout) = FormLayout::compute(area) else {
            self.layout = None;
            let msg = "Terminal too small";
            if area.height > 0 && area.width as usize >= msg.len() {
                buf.set_string(area.x, area.y, msg, Style::default().fg(WARNING_COLOR));
            }
            return;
        };

        let accent = parse_hex_color(&ui.accent).unwrap_or(Color::Cyan);
        let text = parse_hex_color(&ui.text).unwrap_or(Color::White);
        let base = Style::default().fg(text).bg(Color::Black);

        Clear.render(layout.outer, buf);
        Block::bordered()
            .title(format!(" {} ", view.title))
            .border_style(Style::default().fg(accent))
            .style(base)
            .render(layout.outer, buf);

        self.render_result(&layout, buf, view, focus, accent, base);
        self.render_slider(&layout, buf, view, focus, accent, base, ui);
        self.render_toggles(&layout, buf, view, focus, accent, base);

        // Generate button
        let button_style = if focus == FormField::Generate {
            base.fg(Color::Black).bg(FOCUS_COLOR).add_modifier(Modifier::BOLD)
        } else {
            base.fg(accent).add_modifier(Modifier::BOLD)
        };
        buf.set_string(
            layout.generate.x,
            layout.generate.y,
            format!("[ {} ]", GENERATE_LABEL),
            button_style,
        );

        if view.pool_empty {
            buf.set_string(
                layout.inner_x,
                layout.row(18),
                EMPTY_POOL_WARNING,
                base.fg(WARNING_COLOR),
            );
        }
        buf.set_string(layout.inner_x, layout.row(19), HELP_TEXT, base.fg(Color::DarkGray));

        self.layout = Some(layout);
    }

    fn render_result(
        &self,
        layout: &FormLayout,
        buf: &mut Buffer,
        view: &ViewModel,
        focus: FormField,
        accent: Color,
        base: Style,
    ) {
        buf.set_string(layout.inner_x, layout.row(2), view.result_title, base.fg(accent));

        if let Some(hint) = view.feedback_text() {
            let hint_x = layout.inner_x + layout.inner_width - hint.len() as u16;
            buf.set_string(hint_x, layout.row(2), hint, base.fg(Color::Gray));
        }

        let border = if focus == FormField::Result {
            FOCUS_COLOR
        } else {
            Color::DarkGray
        };
        Block::bordered()
            .border_style(Style::default().fg(border))
            .style(base)
            .render(layout.result, buf);

        let value_style = if view.copy_enabled {
            base.add_modifier(Modifier::BOLD)
        } else {
            base.fg(Color::DarkGray)
        };
        buf.set_string(layout.result.x + 2, layout.result.y + 1, &view.result_text, value_style);
    }

    #[allow(clippy::too_many_arguments)]
    fn render_slider(
        &self,
        layout: &FormLayout,
        buf: &mut Buffer,
        view: &ViewModel,
        focus: FormField,
        accent: Color,
        base: Style,
        ui: &UiConfig,
    ) {
        let label_color = if focus == FormField::Slider {
            FOCUS_COLOR
        } else {
            accent
        };
        buf.set_string(layout.inner_x, layout.row(7), &view.length_label, base.fg(label_color));

        let track = layout.slider_track;
        buf.set_string(layout.inner_x, track.y, view.slider_min.to_string(), base);
        buf.set_string(track.x + track.width + 1, track.y, view.slider_max.to_string(), base);

        let fill = parse_hex_color(&ui.slider_fill).unwrap_or(Color::Blue);
        let empty = parse_hex_color(&ui.slider_background).unwrap_or(Color::DarkGray);
        let filled = filled_cells(view.slider_fill_percent, track.width);

        for col in 0..track.width {
            let bg = if col < filled { fill } else { empty };
            buf[(track.x + col, track.y)].set_char(' ').set_bg(bg);
        }

        // Knob sits on the last filled cell
        let knob = filled.saturating_sub(1).min(track.width - 1);
        buf[(track.x + knob, track.y)].set_char('█').set_fg(label_color).set_bg(fill);
    }

    fn render_toggles(
        &self,
        layout: &FormLayout,
        buf: &mut Buffer,
        view: &ViewModel,
        focus: FormField,
        accent: Color,
        base: Style,
    ) {
        buf.set_string(layout.inner_x, layout.row(10), "settings", base.fg(accent));

        for (row, (class, rect)) in view.toggles.iter().zip(layout.toggles.iter()) {
            debug_assert_eq!(row.class, *class);
            let color = if focus == FormField::Toggle(*class) {
                FOCUS_COLOR
            } else {
                accent
            };
            let mark = if row.checked { "[X]" } else { "[ ]" };
            buf.set_string(rect.x, rect.y, format!("{} {}", mark, row.label), base.fg(color));
        }
    }
}

/// Number of track cells covered by the fill
fn filled_cells(percent: f64, width: u16) -> u16 {
    ((percent / 100.0) * width as f64).round().clamp(0.0, width as f64) as u16
}

/// Parse hex color string to ratatui Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    // Byte length alone would let a multibyte char split a slice below
    if hex.starts_with('#') && hex.len() == 7 && hex.is_ascii() {
        let r = u8::from_str_radix(hex.get(1..3)?, 16).ok()?;
        let g = u8::from_str_radix(hex.get(3..5)?, 16).ok()?;
        let b = u8::from_str_radix(hex.get(5..7)?, 16).ok()?;
        Some(Color::Rgb(r, g, b))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ui_state::{GeneratedPassword, Phase, UiState};

    fn area() -> Rect {
        Rect::new(0, 0, 60, 24)
    }

    fn buffer_lines(buf: &Buffer) -> Vec<String> {
        let area = buf.area;
        (0..area.height)
            .map(|y| (0..area.width).map(|x| buf[(x, y)].symbol()).collect::<String>())
            .collect()
    }

    fn render(state: &UiState, focus: FormField) -> (GeneratorForm, Vec<String>) {
        let mut form = GeneratorForm::new();
        let mut buf = Buffer::empty(area());
        form.render(area(), &mut buf, &ViewModel::from_state(state), focus, &UiConfig::default());
        (form, buffer_lines(&buf))
    }

    fn screen_contains(lines: &[String], needle: &str) -> bool {
        lines.iter().any(|l| l.contains(needle))
    }

    #[test]
    fn test_initial_render() {
        let (_, lines) = render(&UiState::default(), FormField::Slider);
        assert!(screen_contains(&lines, "Password Generator"));
        assert!(screen_contains(&lines, "Generated Password"));
        assert!(screen_contains(&lines, "CLICK GENERATE"));
        assert!(screen_contains(&lines, "length: 8"));
        assert!(screen_contains(&lines, "[X] Include Uppercase"));
        assert!(screen_contains(&lines, "[X] Include Lowercase"));
        assert!(screen_contains(&lines, "[X] Include Numbers"));
        assert!(screen_contains(&lines, "[ ] Include Symbols"));
        assert!(screen_contains(&lines, "[ Generate Password ]"));
        assert!(!screen_contains(&lines, "click to copy"));
        assert!(!screen_contains(&lines, EMPTY_POOL_WARNING));
    }

    #[test]
    fn test_render_generated_and_copied() {
        let mut state = UiState::default();
        state.password = Some(GeneratedPassword::new("q7Rt2mZx".to_string()));
        state.phase = Phase::Generated;

        let (_, lines) = render(&state, FormField::Result);
        assert!(screen_contains(&lines, "q7Rt2mZx"));
        assert!(!screen_contains(&lines, "CLICK GENERATE"));
        assert!(screen_contains(&lines, "click to copy"));

        state.phase = Phase::Copied;
        let (_, lines) = render(&state, FormField::Result);
        assert!(screen_contains(&lines, "copied"));
        assert!(!screen_contains(&lines, "click to copy"));
    }

    #[test]
    fn test_empty_pool_warning() {
        let mut state = UiState::default();
        state.config.include_lowercase = false;
        state.config.include_uppercase = false;
        state.config.include_digits = false;
        let (_, lines) = render(&state, FormField::Slider);
        assert!(screen_contains(&lines, EMPTY_POOL_WARNING));
    }

    #[test]
    fn test_too_small_terminal() {
        let mut form = GeneratorForm::new();
        let small = Rect::new(0, 0, 30, 10);
        let mut buf = Buffer::empty(small);
        form.render(
            small,
            &mut buf,
            &ViewModel::from_state(&UiState::default()),
            FormField::Slider,
            &UiConfig::default(),
        );
        assert!(buffer_lines(&buf)[0].starts_with("Terminal too small"));
        assert_eq!(form.handle_mouse(MouseEventKind::Down(MouseButton::Left), 1, 1), None);
    }

    #[test]
    fn test_hit_test_regions() {
        let layout = FormLayout::compute(area()).unwrap();

        let track = layout.slider_track;
        assert_eq!(layout.hit_test(track.x, track.y), Some(FormHit::Slider(4)));
        assert_eq!(
            layout.hit_test(track.x + track.width - 1, track.y),
            Some(FormHit::Slider(32))
        );

        let gen = layout.generate;
        assert_eq!(layout.hit_test(gen.x + 1, gen.y), Some(FormHit::Generate));

        let result = layout.result;
        assert_eq!(layout.hit_test(result.x + 3, result.y + 1), Some(FormHit::Result));

        let (class, rect) = layout.toggles[0];
        assert_eq!(class, CharClass::Uppercase);
        assert_eq!(layout.hit_test(rect.x, rect.y), Some(FormHit::Toggle(CharClass::Uppercase)));

        assert_eq!(layout.hit_test(layout.outer.x, layout.outer.y), None);
    }

    #[test]
    fn test_slider_drag_follows_pointer() {
        let (mut form, _) = render(&UiState::default(), FormField::Slider);
        let track = FormLayout::compute(area()).unwrap().slider_track;

        let down = form.handle_mouse(MouseEventKind::Down(MouseButton::Left), track.x, track.y);
        assert_eq!(down, Some(FormHit::Slider(4)));

        // Drag below the row still moves the slider
        let drag = form.handle_mouse(
            MouseEventKind::Drag(MouseButton::Left),
            track.x + track.width + 5,
            track.y + 3,
        );
        assert_eq!(drag, Some(FormHit::Slider(32)));

        assert_eq!(form.handle_mouse(MouseEventKind::Up(MouseButton::Left), 0, 0), None);
        assert_eq!(
            form.handle_mouse(MouseEventKind::Drag(MouseButton::Left), track.x, track.y),
            None
        );
    }

    #[test]
    fn test_filled_cells() {
        assert_eq!(filled_cells(0.0, 37), 0);
        assert_eq!(filled_cells(100.0, 37), 37);
        assert_eq!(filled_cells(50.0, 10), 5);
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#0B1EDF"), Some(Color::Rgb(11, 30, 223)));
        assert_eq!(parse_hex_color("0B1EDF"), None);
        assert_eq!(parse_hex_color("#zzzzzz"), None);
        // Seven bytes, but not seven chars
        assert_eq!(parse_hex_color("#a\u{e9}123"), None);
        assert_eq!(parse_hex_color("#\u{e9}\u{e9}\u{e9}"), None);
    }

    #[test]
    fn test_non_ascii_colors_fall_back() {
        let ui = UiConfig {
            accent: "#a\u{e9}123".to_string(),
            text: "#\u{e9}\u{e9}\u{e9}".to_string(),
            slider_fill: "#\u{1f511}12".to_string(),
            slider_background: "#12\u{e9}34".to_string(),
            ..UiConfig::default()
        };
        let mut form = GeneratorForm::new();
        let mut buf = Buffer::empty(area());
        form.render(
            area(),
            &mut buf,
            &ViewModel::from_state(&UiState::default()),
            FormField::Slider,
            &ui,
        );
        assert!(screen_contains(&buffer_lines(&buf), "CLICK GENERATE"));
    }
}
