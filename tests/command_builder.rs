//! Command synthesis tests.
//!
//! Most tests use an in-memory file set so Windows-style paths such as
//! `C:\clip.mov` can be exercised on any platform. The tests at the end use
//! real files from a temporary directory.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use movmux::{
    ArgGroup, CommandBuilder, FileProbe, MuxError, MuxOptions, MuxRequest, NumberLocale,
    OffsetTarget, SampleRate, SourceKind, TrackLabel,
};

struct FakeFiles(HashSet<PathBuf>);

impl FakeFiles {
    fn with(paths: &[&str]) -> Arc<Self> {
        Arc::new(Self(paths.iter().map(PathBuf::from).collect()))
    }
}

impl FileProbe for FakeFiles {
    fn is_file(&self, path: &Path) -> bool {
        self.0.contains(path)
    }
}

fn builder() -> CommandBuilder {
    let options = MuxOptions::new().with_number_locale(NumberLocale::invariant());
    CommandBuilder::with_options(options)
        .with_probe(FakeFiles::with(&[r"C:\clip.mov", r"C:\a.wav", r"C:\b.wav"]))
}

fn single_track_request() -> MuxRequest {
    MuxRequest::new(r"C:\clip.mov", r"C:\a.wav")
}

fn dual_track_request() -> MuxRequest {
    single_track_request()
        .with_audio2(r"C:\b.wav")
        .with_audio1_label(TrackLabel::new(SourceKind::Analog, SampleRate::Rate48k))
        .with_audio2_label(TrackLabel::new(SourceKind::Digital, SampleRate::Rate44_1k))
}

fn flag_values(groups: &[ArgGroup], wanted: &str) -> Vec<String> {
    groups
        .iter()
        .filter_map(|group| match group {
            ArgGroup::Flag { flag, value } if *flag == wanted => Some(value.raw().to_string()),
            _ => None,
        })
        .collect()
}

fn has_switch(groups: &[ArgGroup], wanted: &str) -> bool {
    groups
        .iter()
        .any(|group| matches!(group, ArgGroup::Switch(flag) if *flag == wanted))
}

// ── End to end ─────────────────────────────────────────────────────

#[test]
fn single_track_command() {
    let command = builder().build(&single_track_request()).unwrap();

    assert_eq!(
        command.to_string(),
        r#"ffmpeg -i "C:\clip.mov" -i "C:\a.wav" -map 0:v -map 1:a -c copy -movflags +faststart -avoid_negative_ts make_zero -shortest "C:\clip_mux.mov""#,
    );
    assert_eq!(command.output_path(), Path::new(r"C:\clip_mux.mov"));
    assert!(!command.is_dual_track());
    assert!(!command.to_string().contains("-ss"));
}

#[test]
fn dual_track_command() {
    let request = dual_track_request()
        .with_video_offset("1.5")
        .with_audio2_offset("0.25");
    let command = builder().build(&request).unwrap();

    assert_eq!(
        command.to_string(),
        concat!(
            r#"ffmpeg -ss 1.5 -i "C:\clip.mov" -i "C:\a.wav" -ss 0.25 -i "C:\b.wav" "#,
            r#"-map 0:v -map 1:a -map 2:a -c copy -copyinkf "#,
            r#"-metadata:s:a:0 title="Analog 48 kHz" -metadata:s:a:0 handler_name="Analog 48 kHz" "#,
            r#"-metadata:s:a:1 title="Digital 44.1 kHz" -metadata:s:a:1 handler_name="Digital 44.1 kHz" "#,
            r#"-movflags +use_metadata_tags+faststart -avoid_negative_ts make_zero -shortest "#,
            r#""C:\clip_mux.mov""#,
        ),
    );
    assert!(command.is_dual_track());
}

// ── Shape ──────────────────────────────────────────────────────────

#[test]
fn single_track_shape() {
    let command = builder().build(&single_track_request()).unwrap();
    let groups = command.groups();

    assert_eq!(flag_values(groups, "-i").len(), 2);
    assert_eq!(flag_values(groups, "-map"), vec!["0:v", "1:a"]);
    assert_eq!(flag_values(groups, "-movflags"), vec!["+faststart"]);
    assert!(flag_values(groups, "-metadata:s:a:0").is_empty());
    assert!(flag_values(groups, "-metadata:s:a:1").is_empty());
    assert!(!has_switch(groups, "-copyinkf"));
}

#[test]
fn dual_track_shape() {
    let command = builder().build(&dual_track_request()).unwrap();
    let groups = command.groups();

    assert_eq!(flag_values(groups, "-i").len(), 3);
    assert_eq!(flag_values(groups, "-map"), vec!["0:v", "1:a", "2:a"]);
    assert_eq!(
        flag_values(groups, "-movflags"),
        vec!["+use_metadata_tags+faststart"],
    );
    assert_eq!(
        flag_values(groups, "-metadata:s:a:0"),
        vec!["title=Analog 48 kHz", "handler_name=Analog 48 kHz"],
    );
    assert_eq!(
        flag_values(groups, "-metadata:s:a:1"),
        vec!["title=Digital 44.1 kHz", "handler_name=Digital 44.1 kHz"],
    );
    assert!(has_switch(groups, "-copyinkf"));
}

#[test]
fn empty_titles_are_still_emitted() {
    let request = single_track_request().with_audio2(r"C:\b.wav");
    let command = builder().build(&request).unwrap();
    let rendered = command.to_string();

    assert!(rendered.contains(r#"-metadata:s:a:0 title="" -metadata:s:a:0 handler_name="""#));
    assert!(rendered.contains(r#"-metadata:s:a:1 title="" -metadata:s:a:1 handler_name="""#));
}

#[test]
fn missing_second_audio_falls_back_to_single_track() {
    let request = single_track_request()
        .with_audio2(r"C:\missing.wav")
        .with_audio2_offset("4");
    let command = builder().build(&request).unwrap();

    assert!(!command.is_dual_track());
    assert_eq!(flag_values(command.groups(), "-i").len(), 2);
    assert!(!command.to_string().contains("missing.wav"));
    assert!(!command.to_string().contains("-ss"));
}

#[test]
fn blank_second_audio_falls_back_to_single_track() {
    let request = single_track_request().with_audio2("   ");
    let command = builder().build(&request).unwrap();
    assert!(!command.is_dual_track());
}

#[test]
fn offsets_precede_their_inputs() {
    let request = single_track_request()
        .with_video_offset("2")
        .with_audio1_offset("0.3333");
    let command = builder().build(&request).unwrap();

    assert!(command.to_string().starts_with(
        r#"ffmpeg -ss 2 -i "C:\clip.mov" -ss 0.333 -i "C:\a.wav" -map 0:v"#
    ));
}

#[test]
fn zero_offset_is_omitted() {
    let request = single_track_request().with_video_offset("0");
    let command = builder().build(&request).unwrap();
    assert!(!command.to_string().contains("-ss"));
}

// ── Output path ────────────────────────────────────────────────────

#[test]
fn explicit_output_is_used_verbatim() {
    let request = single_track_request().with_output(r"D:\renders\final.mov");
    let command = builder().build(&request).unwrap();

    assert!(command.to_string().ends_with(r#"-shortest "D:\renders\final.mov""#));
    assert_eq!(command.output_path(), Path::new(r"D:\renders\final.mov"));
}

#[test]
fn blank_output_is_derived() {
    let request = single_track_request().with_output("  ");
    let command = builder().build(&request).unwrap();
    assert_eq!(command.output_path(), Path::new(r"C:\clip_mux.mov"));
}

#[test]
fn build_does_not_modify_the_request() {
    let request = single_track_request();
    let before = request.clone();
    builder().build(&request).unwrap();
    assert_eq!(request, before);
}

#[test]
fn filled_default_output_builds_the_same_command() {
    let builder = builder();
    let mut request = single_track_request();
    let derived = builder.build(&request).unwrap();

    assert!(request.fill_default_output(builder.options()));
    assert_eq!(request.output_path.as_deref(), Some(Path::new(r"C:\clip_mux.mov")));
    assert!(!request.fill_default_output(builder.options()));

    let filled = builder.build(&request).unwrap();
    assert_eq!(derived.to_string(), filled.to_string());
}

#[test]
fn identical_requests_give_identical_commands() {
    let builder = builder();
    let request = dual_track_request()
        .with_output(r"C:\out.mov")
        .with_audio1_offset("7.125");

    let first = builder.build(&request).unwrap().to_string();
    let second = builder.build(&request).unwrap().to_string();
    assert_eq!(first, second);
}

// ── Validation order ───────────────────────────────────────────────

#[test]
fn video_is_checked_first() {
    let request = MuxRequest {
        audio1_path: Some(PathBuf::from(r"C:\missing.wav")),
        video_offset: Some("abc".to_string()),
        ..MuxRequest::default()
    };
    let error = builder().build(&request).unwrap_err();

    assert!(matches!(error, MuxError::MissingOrInvalidVideoInput));
    assert_eq!(error.to_string(), "Select a valid video input.");
}

#[test]
fn missing_video_file_is_rejected() {
    let request = MuxRequest::new(r"C:\other.mov", r"C:\a.wav");
    let error = builder().build(&request).unwrap_err();
    assert!(matches!(error, MuxError::MissingOrInvalidVideoInput));
}

#[test]
fn audio1_is_checked_before_offsets() {
    let request = MuxRequest::new(r"C:\clip.mov", "  ").with_video_offset("-5");
    let error = builder().build(&request).unwrap_err();

    assert!(matches!(error, MuxError::MissingOrInvalidAudio1Input));
    assert_eq!(error.to_string(), "Select a valid Audio 1 input.");
}

#[test]
fn offsets_are_checked_in_order() {
    let request = single_track_request()
        .with_video_offset("abc")
        .with_audio1_offset("-1");
    let error = builder().build(&request).unwrap_err();
    assert!(matches!(
        error,
        MuxError::InvalidOffsetFormat {
            which: OffsetTarget::Video
        }
    ));

    let request = single_track_request()
        .with_audio1_offset("-1")
        .with_audio2_offset("abc");
    let error = builder().build(&request).unwrap_err();
    assert!(matches!(
        error,
        MuxError::NegativeOffset {
            which: OffsetTarget::Audio1
        }
    ));
}

#[test]
fn audio2_offset_is_checked_without_audio2() {
    let request = single_track_request().with_audio2_offset("two");
    let error = builder().build(&request).unwrap_err();

    assert_eq!(error.offset_target(), Some(OffsetTarget::Audio2));
    assert_eq!(
        error.to_string(),
        "The -ss value must be a number (e.g. 2 or 2.5) or blank.",
    );
}

// ── Program token and arguments ────────────────────────────────────

#[test]
fn custom_program_with_spaces_is_quoted() {
    let options = MuxOptions::new()
        .with_program(r"C:\Program Files\ffmpeg\bin\ffmpeg.exe")
        .with_number_locale(NumberLocale::invariant());
    let builder = CommandBuilder::with_options(options)
        .with_probe(FakeFiles::with(&[r"C:\clip.mov", r"C:\a.wav"]));
    let command = builder.build(&single_track_request()).unwrap();

    assert!(command
        .to_string()
        .starts_with(r#""C:\Program Files\ffmpeg\bin\ffmpeg.exe" -i "C:\clip.mov""#));
    assert_eq!(command.program(), r"C:\Program Files\ffmpeg\bin\ffmpeg.exe");
}

#[test]
fn arguments_are_unquoted_and_exclude_program() {
    let request = single_track_request().with_video_offset("2.5");
    let command = builder().build(&request).unwrap();

    assert_eq!(command.program(), "ffmpeg");
    assert_eq!(
        command.arguments(),
        vec![
            "-ss",
            "2.5",
            "-i",
            r"C:\clip.mov",
            "-i",
            r"C:\a.wav",
            "-map",
            "0:v",
            "-map",
            "1:a",
            "-c",
            "copy",
            "-movflags",
            "+faststart",
            "-avoid_negative_ts",
            "make_zero",
            "-shortest",
            r"C:\clip_mux.mov",
        ],
    );
}

#[test]
fn arguments_line_strips_program_token() {
    let command = builder().build(&single_track_request()).unwrap();
    let full = command.to_string();
    let arguments = command.arguments_line();

    assert_eq!(full, format!("ffmpeg {arguments}"));
    assert!(arguments.starts_with(r#"-i "C:\clip.mov""#));
}

// ── Real files ─────────────────────────────────────────────────────

#[test]
fn builds_against_real_files() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let video = directory.path().join("clip.mov");
    let audio = directory.path().join("take.wav");
    std::fs::write(&video, b"video").expect("Failed to write video");
    std::fs::write(&audio, b"audio").expect("Failed to write audio");

    let options = MuxOptions::new().with_number_locale(NumberLocale::invariant());
    let command = CommandBuilder::with_options(options)
        .build(&MuxRequest::new(&video, &audio))
        .expect("Failed to build command");

    let expected_output = directory.path().join("clip_mux.mov");
    assert_eq!(command.output_path(), expected_output.as_path());
    assert_eq!(
        command.to_string(),
        format!(
            "ffmpeg -i \"{}\" -i \"{}\" -map 0:v -map 1:a -c copy -movflags +faststart -avoid_negative_ts make_zero -shortest \"{}\"",
            video.display(),
            audio.display(),
            expected_output.display(),
        ),
    );
}

#[test]
fn directories_are_not_files() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let audio = directory.path().join("take.wav");
    std::fs::write(&audio, b"audio").expect("Failed to write audio");

    let result = CommandBuilder::new().build(&MuxRequest::new(directory.path(), &audio));
    assert!(matches!(result, Err(MuxError::MissingOrInvalidVideoInput)));
}
