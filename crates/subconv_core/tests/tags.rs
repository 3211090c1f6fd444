//! Override tag parsing through the public API.

use std::collections::HashMap;

use subconv_core::subtitles::{
    parse_tags, strip_overrides, SubtitleData, SubtitleEvent, SubtitleStyle,
};

fn flags(text: &str, base: &SubtitleStyle, styles: &[SubtitleStyle]) -> Vec<(String, bool, bool, bool)> {
    parse_tags(text, base, styles)
        .into_iter()
        .map(|f| {
            (
                f.text.to_string(),
                f.state.style.italic,
                f.state.style.bold,
                f.state.drawing,
            )
        })
        .collect()
}

#[test]
fn italic_run() {
    let base = SubtitleStyle::default();
    let fragments = parse_tags(r"Hello, {\i1}world{\i0}!", &base, &[] as &[SubtitleStyle]);

    assert_eq!(fragments.len(), 3);
    assert_eq!(fragments[0].text, "Hello, ");
    assert!(!fragments[0].state.style.italic);
    assert_eq!(fragments[1].text, "world");
    assert!(fragments[1].state.style.italic);
    assert_eq!(fragments[2].text, "!");
    assert!(!fragments[2].state.style.italic);
}

#[test]
fn bare_reset_returns_to_base() {
    let base = SubtitleStyle::default().with_bold(true);
    let result = flags(r"{\i1\b0}Hello, {\r}world!", &base, &[]);
    assert_eq!(
        result,
        [
            (String::new(), false, true, false),
            ("Hello, ".to_string(), true, false, false),
            ("world!".to_string(), false, true, false),
        ]
    );
}

#[test]
fn named_reset_uses_lookup() {
    let mut data = SubtitleData::new();
    data.set_style(SubtitleStyle::new("Sign").with_italic(true).with_bold(true));

    let event = SubtitleEvent::new(0, 1000, r"plain {\rSign}sign {\rMissing}still sign");
    let base = data.style_for(&event);
    let fragments = parse_tags(&event.text, &base, &data);

    assert_eq!(fragments.len(), 3);
    assert!(!fragments[0].state.style.italic);
    assert_eq!(fragments[1].state.style.name, "Sign");
    assert!(fragments[1].state.style.bold);
    // Unknown names leave the state alone
    assert_eq!(fragments[2].state, fragments[1].state);

    let mut by_name = HashMap::new();
    by_name.insert("Sign".to_string(), SubtitleStyle::new("Sign").with_italic(true));
    let fragments = parse_tags(r"{\rSign}x", &base, &by_name);
    assert!(fragments[1].state.style.italic);
}

#[test]
fn drawing_mode_and_inert_tags() {
    let base = SubtitleStyle::default();
    let result = flags(
        r"{\pos(10,20)\p1}m 0 0 l 10 10{\p0\fad(100,200)}text{\I1\bord2}more",
        &base,
        &[],
    );
    assert_eq!(
        result,
        [
            (String::new(), false, false, false),
            ("m 0 0 l 10 10".to_string(), false, false, true),
            ("text".to_string(), false, false, false),
            ("more".to_string(), false, false, false),
        ]
    );
}

#[test]
fn overrides_do_not_touch_base() {
    let base = SubtitleStyle::default();
    let before = base.clone();
    let _ = parse_tags(r"{\i1\b1\u1\s1}x", &base, &[] as &[SubtitleStyle]);
    assert_eq!(base, before);
}

#[test]
fn strip_removes_all_blocks() {
    assert_eq!(strip_overrides(r"{\an8}Top {\i1}line{\i0}"), "Top line");
    assert_eq!(strip_overrides("no tags"), "no tags");
}
