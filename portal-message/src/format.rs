//! Formatting codes: classification, render-time state, and the final
//! translation into display escape sequences.
//!
//! A formatting code is the directive marker `&` followed by one code
//! character:
//!
//! | class  | codes              |
//! |--------|--------------------|
//! | color  | `0-9`, `a-f`       |
//! | format | `k`, `l`, `m`, `n`, `o` |
//! | reset  | `r`                |
//!
//! Codes are case-insensitive. The display layer understands the same codes
//! prefixed with `§` instead of `&`; [`translate`] performs that substitution.

/// Marker introducing a formatting code inside template text.
pub const DIRECTIVE_MARKER: char = '&';

/// Marker the display layer expects in front of a code.
pub const DISPLAY_MARKER: char = '\u{00A7}';

/// Code that clears every active color and format downstream.
pub const RESET: &str = "&r";

/// Every code character [`translate`] rewrites. `x` introduces hex colors on
/// the display side; it is translated but not tracked.
const TRANSLATABLE: &str = "0123456789AaBbCcDdEeFfKkLlMmNnOoRrXx";

/// Classification of a single code character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeClass {
    Color,
    Format,
    Reset,
}

impl CodeClass {
    /// Classify `code`, or `None` when it is not a tracked code.
    pub fn of(code: char) -> Option<CodeClass> {
        match code.to_ascii_lowercase() {
            '0'..='9' | 'a'..='f' => Some(CodeClass::Color),
            'k'..='o' => Some(CodeClass::Format),
            'r' => Some(CodeClass::Reset),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// FormattingState
// ---------------------------------------------------------------------------

/// Color and formats active at the current point of a render.
///
/// Created fresh for every render and dropped at its end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormattingState {
    current_color: Option<String>,
    active_formats: Vec<String>,
}

impl FormattingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent color code, as written (e.g. `&c`).
    pub fn current_color(&self) -> Option<&str> {
        self.current_color.as_deref()
    }

    /// Format codes seen since the last color change, in insertion order.
    pub fn active_formats(&self) -> &[String] {
        &self.active_formats
    }

    /// Apply a single code (marker included, e.g. `&l`).
    pub fn apply(&mut self, code: &str, class: CodeClass) {
        match class {
            CodeClass::Color => {
                self.current_color = Some(code.to_string());
                self.active_formats.clear();
            }
            CodeClass::Format => {
                if !self.active_formats.iter().any(|f| f.eq_ignore_ascii_case(code)) {
                    self.active_formats.push(code.to_string());
                }
            }
            CodeClass::Reset => {
                self.current_color = None;
                self.active_formats.clear();
            }
        }
    }

    /// Update the state from every code occurring in `text`.
    pub fn scan(&mut self, text: &str) {
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            if c != DIRECTIVE_MARKER {
                continue;
            }
            let Some(&code) = chars.peek() else { break };
            if let Some(class) = CodeClass::of(code) {
                let mut written = String::with_capacity(2);
                written.push(DIRECTIVE_MARKER);
                written.push(code);
                self.apply(&written, class);
                chars.next();
            }
        }
    }

    /// Color followed by formats: the codes that re-establish this state
    /// after a reset.
    pub fn restore_prefix(&self) -> String {
        let mut out = String::new();
        if let Some(color) = &self.current_color {
            out.push_str(color);
        }
        for format in &self.active_formats {
            out.push_str(format);
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Translation pass
// ---------------------------------------------------------------------------

/// Replace every `&<code>` pair with `§<code>` (code lowercased). All other
/// characters, including lone or doubled markers, are copied unchanged.
pub fn translate(text: &str) -> String {
    translate_with(DIRECTIVE_MARKER, text)
}

/// [`translate`] with a caller-chosen marker character.
pub fn translate_with(marker: char, text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match chars.peek() {
            Some(&code) if c == marker && TRANSLATABLE.contains(code) => {
                out.push(DISPLAY_MARKER);
                out.push(code.to_ascii_lowercase());
                chars.next();
            }
            _ => out.push(c),
        }
    }
    out
}

/// Inverse of [`translate`] for inspection: `§<code>` back to `&<code>`.
pub fn untranslate(text: &str) -> String {
    text.replace(DISPLAY_MARKER, &DIRECTIVE_MARKER.to_string())
}

/// Remove every display sequence (`§` plus the following character).
pub fn strip(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == DISPLAY_MARKER {
            chars.next();
        } else {
            out.push(c);
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
