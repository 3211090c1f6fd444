//! SubStation override tag parsing.
//!
//! Splits subtitle text such as `Hello, {\i1}world{\i0}!` into fragments, each
//! paired with the style in effect for it. Only the tags that matter when
//! projecting a line onto a simpler format are interpreted:
//!
//! - `\i`, `\b`, `\u`, `\s` followed by exactly `0` or `1` (weights such as
//!   `\b700` leave bold untouched)
//! - `\p` with a numeric argument (non-zero enables drawing mode)
//! - `\r` (reset to the line style) and `\r<name>` (reset to a named style)
//!
//! Everything else inside braces is ignored. Parsing never fails.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use super::types::SubtitleStyle;

/// A brace-delimited override block (no nesting).
static OVERRIDE_SEQUENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{[^}]*\}").expect("invalid override sequence regex"));

/// Override tags that affect the computed style.
static STYLE_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\[ibus][0-9]+|\\p[0-9]+|\\r[a-zA-Z_0-9 ]*").expect("invalid style tag regex")
});

/// Named style lookup used to resolve `\r<name>`.
pub trait StyleLookup {
    /// Find a style by exact name.
    fn lookup_style(&self, name: &str) -> Option<&SubtitleStyle>;
}

impl StyleLookup for [SubtitleStyle] {
    fn lookup_style(&self, name: &str) -> Option<&SubtitleStyle> {
        self.iter().find(|s| s.name == name)
    }
}

impl StyleLookup for Vec<SubtitleStyle> {
    fn lookup_style(&self, name: &str) -> Option<&SubtitleStyle> {
        self.as_slice().lookup_style(name)
    }
}

impl StyleLookup for HashMap<String, SubtitleStyle> {
    fn lookup_style(&self, name: &str) -> Option<&SubtitleStyle> {
        self.get(name)
    }
}

/// Style in effect for a run of text.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleOverrideState {
    /// Computed style.
    pub style: SubtitleStyle,
    /// Text is vector drawing commands rather than prose.
    pub drawing: bool,
}

impl StyleOverrideState {
    /// State for a line before any override.
    pub fn new(style: SubtitleStyle) -> Self {
        Self {
            style,
            drawing: false,
        }
    }
}

/// A run of text and the style it is rendered with.
#[derive(Debug, Clone, PartialEq)]
pub struct TextFragment<'a> {
    /// Text between two override blocks (may be empty).
    pub text: &'a str,
    /// Style in effect for `text`.
    pub state: StyleOverrideState,
}

/// Split `text` into fragments with their computed styles.
///
/// Returns one fragment per literal run around the override blocks, so a text
/// with `N` blocks always yields `N + 1` fragments (some possibly empty). Each
/// fragment's state is `base` modified by every block before it.
pub fn parse_tags<'a, S>(text: &'a str, base: &SubtitleStyle, styles: &S) -> Vec<TextFragment<'a>>
where
    S: StyleLookup + ?Sized,
{
    let initial = StyleOverrideState::new(base.clone());
    if !OVERRIDE_SEQUENCE.is_match(text) {
        return vec![TextFragment {
            text,
            state: initial,
        }];
    }

    let mut fragments = Vec::new();
    let mut state = initial;
    let mut last_end = 0;

    for block in OVERRIDE_SEQUENCE.find_iter(text) {
        fragments.push(TextFragment {
            text: &text[last_end..block.start()],
            state: state.clone(),
        });
        state = apply_overrides(state, block.as_str(), base, styles);
        last_end = block.end();
    }

    fragments.push(TextFragment {
        text: &text[last_end..],
        state,
    });

    fragments
}

/// Fold the tags of one override block onto `state`.
fn apply_overrides<S>(
    mut state: StyleOverrideState,
    block: &str,
    base: &SubtitleStyle,
    styles: &S,
) -> StyleOverrideState
where
    S: StyleLookup + ?Sized,
{
    for tag in STYLE_TAG.find_iter(block) {
        let tag = tag.as_str();
        let name = &tag[2..];

        match tag.as_bytes()[1] {
            b'r' if name.is_empty() => state = StyleOverrideState::new(base.clone()),
            b'r' => {
                if let Some(named) = styles.lookup_style(name) {
                    state = StyleOverrideState::new(named.clone());
                }
            }
            b'p' => state.drawing = name.bytes().any(|b| b != b'0'),
            flag => {
                let enabled = match name {
                    "1" => true,
                    "0" => false,
                    _ => continue,
                };
                match flag {
                    b'i' => state.style = state.style.with_italic(enabled),
                    b'b' => state.style = state.style.with_bold(enabled),
                    b'u' => state.style = state.style.with_underline(enabled),
                    b's' => state.style = state.style.with_strikeout(enabled),
                    _ => {}
                }
            }
        }
    }
    state
}

/// Remove every override block from `text`.
pub fn strip_overrides(text: &str) -> String {
    OVERRIDE_SEQUENCE.replace_all(text, "").into_owned()
}
