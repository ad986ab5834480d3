//! Duration inputs, the start/pause toggle glyph and key bindings.

use winit::keyboard::NamedKey;

/// Longest accepted entry for either input field.
const MAX_FIELD_LEN: usize = 4;

/// Parses a field the lenient way: skip leading whitespace, read an optional
/// sign and the leading digits, stop at anything else. No digits yields 0.
pub fn parse_lenient(input: &str) -> i64 {
    let trimmed = input.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let value = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, d| {
            acc.saturating_mul(10).saturating_add(i64::from(d - b'0'))
        });
    if negative {
        -value
    } else {
        value
    }
}

/// Glyph shown by the start/pause toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleGlyph {
    /// Shown while the countdown is not running.
    Play,
    /// Shown while the countdown is running.
    Pause,
}

impl ToggleGlyph {
    pub const fn as_str(self) -> &'static str {
        match self {
            ToggleGlyph::Play => "▶",
            ToggleGlyph::Pause => "⏸",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Minutes,
    Seconds,
}

/// The minutes and seconds inputs, read only when a fresh countdown starts.
#[derive(Debug, Clone)]
pub struct DurationInputs {
    minutes: String,
    seconds: String,
    focus: Field,
}

impl Default for DurationInputs {
    fn default() -> Self {
        Self::new("", "")
    }
}

impl DurationInputs {
    pub fn new(minutes: &str, seconds: &str) -> Self {
        Self {
            minutes: minutes.to_string(),
            seconds: seconds.to_string(),
            focus: Field::Minutes,
        }
    }

    pub fn focus(&self) -> Field {
        self.focus
    }

    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            Field::Minutes => Field::Seconds,
            Field::Seconds => Field::Minutes,
        };
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            Field::Minutes => &mut self.minutes,
            Field::Seconds => &mut self.seconds,
        }
    }

    /// Appends a digit to the focused field. Other characters are ignored.
    pub fn push_digit(&mut self, c: char) -> bool {
        let field = self.focused_mut();
        if !c.is_ascii_digit() || field.len() >= MAX_FIELD_LEN {
            return false;
        }
        field.push(c);
        true
    }

    pub fn backspace(&mut self) -> bool {
        self.focused_mut().pop().is_some()
    }

    pub fn minutes_text(&self) -> &str {
        &self.minutes
    }

    pub fn seconds_text(&self) -> &str {
        &self.seconds
    }

    pub fn minutes(&self) -> i64 {
        parse_lenient(&self.minutes)
    }

    pub fn seconds(&self) -> i64 {
        parse_lenient(&self.seconds)
    }
}

/// What a key press asks the controls to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    Toggle,
    Reset,
    NextField,
    Backspace,
    Digit(char),
}

pub fn action_for_named(key: NamedKey) -> Option<ControlAction> {
    match key {
        NamedKey::Space | NamedKey::Enter => Some(ControlAction::Toggle),
        NamedKey::Escape => Some(ControlAction::Reset),
        NamedKey::Tab => Some(ControlAction::NextField),
        NamedKey::Backspace => Some(ControlAction::Backspace),
        _ => None,
    }
}

pub fn action_for_text(text: &str) -> Option<ControlAction> {
    let mut chars = text.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    match c {
        '0'..='9' => Some(ControlAction::Digit(c)),
        'r' | 'R' => Some(ControlAction::Reset),
        ' ' => Some(ControlAction::Toggle),
        _ => None,
    }
}
