//! Format conversions through `SubtitleData::load` and `save`.

use std::fs;
use std::path::Path;

use subconv_core::subtitles::{
    LoadOptions, SubtitleData, SubtitleError, SubtitleEvent, SubtitleFormat, WriteOptions,
};
use tempfile::tempdir;

const ASS: &str = r"[Script Info]
ScriptType: v4.00+
Title: Demo

[V4+ Styles]
Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding
Style: Default,Arial,20,&H00FFFFFF,&H000000FF,&H00000000,&H00000000,0,0,0,0,100,100,0,0,1,2,2,2,10,10,10,1
Style: Thoughts,Arial,20,&H00FFFFFF,&H000000FF,&H00000000,&H00000000,0,-1,0,0,100,100,0,0,1,2,2,2,10,10,10,1

[Events]
Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text
Dialogue: 0,0:00:01.00,0:00:02.50,Default,,0,0,0,,Hello {\b1}there{\b0}\Nfriend
Dialogue: 0,0:00:03.00,0:00:04.00,Thoughts,,0,0,0,,I wonder
Comment: 0,0:00:05.00,0:00:06.00,Default,,0,0,0,,a note
Dialogue: 0,0:00:07.00,0:00:08.00,Default,,0,0,0,,{\p1}m 0 0 l 1 1{\p0}
";

fn write_file(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn ass_to_srt_and_back() {
    let dir = tempdir().unwrap();
    let input = write_file(dir.path(), "demo.ass", ASS);

    let data = SubtitleData::load(&input, &LoadOptions::default()).unwrap();
    assert_eq!(data.format, SubtitleFormat::Ass);
    assert_eq!(data.events.len(), 4);
    assert_eq!(data.dialogue_count(), 3);

    let srt_path = dir.path().join("demo.srt");
    data.save(&srt_path, &WriteOptions::default()).unwrap();
    assert_eq!(
        fs::read_to_string(&srt_path).unwrap(),
        "1\n00:00:01,000 --> 00:00:02,500\nHello <b>there</b>\nfriend\n\n\
         2\n00:00:03,000 --> 00:00:04,000\n<i>I wonder</i>\n\n"
    );

    let srt = SubtitleData::load(&srt_path, &LoadOptions::default()).unwrap();
    assert_eq!(srt.format, SubtitleFormat::Srt);
    let texts: Vec<_> = srt.events.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(texts, [r"Hello {\b1}there{\b0}\Nfriend", r"{\i1}I wonder{\i0}"]);
    assert_eq!((srt.events[0].start_ms, srt.events[0].end_ms), (1000, 2500));
}

#[test]
fn ass_to_ssa_keeps_events() {
    let dir = tempdir().unwrap();
    let input = write_file(dir.path(), "demo.ass", ASS);
    let data = SubtitleData::load(&input, &LoadOptions::default()).unwrap();

    let ssa_path = dir.path().join("demo.ssa");
    data.save(&ssa_path, &WriteOptions::default()).unwrap();

    let content = fs::read_to_string(&ssa_path).unwrap();
    assert!(content.contains("ScriptType: v4.00\n"));
    assert!(content.contains("[V4 Styles]"));
    assert!(content.contains("Marked=0"));

    let ssa = SubtitleData::load(&ssa_path, &LoadOptions::default()).unwrap();
    assert_eq!(ssa.format, SubtitleFormat::Ssa);
    assert_eq!(ssa.events, data.events);
    assert!(ssa.get_style("Thoughts").unwrap().italic);
}

#[test]
fn json_is_lossless() {
    let dir = tempdir().unwrap();
    let input = write_file(dir.path(), "demo.ass", ASS);
    let data = SubtitleData::load(&input, &LoadOptions::default()).unwrap();

    let json_path = dir.path().join("demo.json");
    data.save(&json_path, &WriteOptions::default()).unwrap();

    let json = SubtitleData::load(&json_path, &LoadOptions::default()).unwrap();
    assert_eq!(json.format, SubtitleFormat::Json);
    assert_eq!(json.events, data.events);
    assert_eq!(json.styles, data.styles);
    assert_eq!(json.metadata, data.metadata);
}

#[test]
fn microdvd_round_trip_keeps_frames() {
    let dir = tempdir().unwrap();
    let content = "{0}{0}25\n{25}{50}Hello|world\n";
    let input = write_file(dir.path(), "movie.sub", content);

    let data = SubtitleData::load(&input, &LoadOptions::default()).unwrap();
    assert_eq!(data.format, SubtitleFormat::MicroDvd);
    assert_eq!(data.fps, Some(25.0));
    assert_eq!((data.events[0].start_ms, data.events[0].end_ms), (980, 2020));
    assert_eq!(data.events[0].text, r"Hello\Nworld");

    let output = dir.path().join("copy.sub");
    data.save(&output, &WriteOptions::default()).unwrap();
    assert_eq!(fs::read_to_string(&output).unwrap(), content);
}

#[test]
fn microdvd_without_frame_rate() {
    let dir = tempdir().unwrap();
    let input = write_file(dir.path(), "movie.sub", "{1}{2}text\n");

    let result = SubtitleData::load(&input, &LoadOptions::default());
    assert!(matches!(result, Err(SubtitleError::UnknownFps)));

    let data = SubtitleData::load(&input, &LoadOptions::with_fps(1000.0)).unwrap();
    assert_eq!((data.events[0].start_ms, data.events[0].end_ms), (1, 3));
}

#[test]
fn mpl2_to_srt() {
    let dir = tempdir().unwrap();
    let input = write_file(dir.path(), "movie.mpl", "[10][25] /Italic|Normal\n");

    let data = SubtitleData::load(&input, &LoadOptions::default()).unwrap();
    assert_eq!(data.format, SubtitleFormat::Mpl2);

    let srt = data
        .to_string(SubtitleFormat::Srt, &WriteOptions::default())
        .unwrap();
    assert_eq!(srt, "1\n00:00:01,000 --> 00:00:02,500\n<i>Italic</i>\nNormal\n\n");
}

#[test]
fn vtt_round_trip() {
    let dir = tempdir().unwrap();
    let mut data = SubtitleData::new();
    data.events
        .push(SubtitleEvent::new(3_723_004, 3_725_000, r"{\u1}under{\u0}lined"));
    data.events.push(SubtitleEvent::new(500, 1500, "first"));

    let path = dir.path().join("cues.vtt");
    data.save(&path, &WriteOptions::default()).unwrap();

    let vtt = SubtitleData::load(&path, &LoadOptions::default()).unwrap();
    assert_eq!(vtt.format, SubtitleFormat::WebVtt);
    // Cues come back in start order
    assert_eq!(vtt.events[0].text, "first");
    assert_eq!(vtt.events[1].text, r"{\u1}under{\u0}lined");
    assert_eq!(vtt.events[1].start_ms, 3_723_004);
}

#[test]
fn shift_and_save_clamps_negative_times() {
    let mut data = SubtitleData::new();
    data.events.push(SubtitleEvent::new(500, 1500, "early"));
    data.shift(-1000);

    assert_eq!(data.events[0].start_ms, -500);
    let srt = data
        .to_string(SubtitleFormat::Srt, &WriteOptions::default())
        .unwrap();
    assert_eq!(srt, "1\n00:00:00,000 --> 00:00:00,500\nearly\n\n");
}

#[test]
fn forced_format_overrides_detection() {
    let data = SubtitleData::from_string(
        "00:00:01:Hello|world\n",
        &LoadOptions::with_format(SubtitleFormat::Tmp),
    )
    .unwrap();
    assert_eq!(data.format, SubtitleFormat::Tmp);
    assert_eq!(data.events[0].start_ms, 1000);
    assert_eq!(data.events[0].text, r"Hello\Nworld");
}
