use super::*;

const SAMPLE: &str = r#"
[defaults]
crossfade = 1
out_dir = "out"
layout = "extracted"

[defaults.title]
font_size = 72

[[video]]
first_line = "Nishant Dash"
second_line = "PA1"
source = "nishant.MP4"
segments = [[27, 95], [106, 112]]
output = "nishant_poomsae"

[[video]]
first_line = "Colin Gordon"
second_line = "Mens A1"
source = "/media/colin.MP4"
segments = [[0, 85], [125.5, 137]]
"#;

#[test]
fn parses_jobs_and_defaults() {
    let m = Manifest::from_toml_str(SAMPLE, Path::new("/jobs")).unwrap();
    assert_eq!(m.videos.len(), 2);
    assert_eq!(m.defaults.crossfade, Secs(1.0));
    assert_eq!(m.defaults.title_duration, Secs(3.0));
    assert_eq!(m.defaults.layout, SourceLayout::Extracted);
    assert_eq!(m.defaults.title.font_size, 72);
    assert_eq!(m.defaults.title.width, 1920);
    assert_eq!(m.defaults.out_dir, PathBuf::from("/jobs/out"));

    let nishant = &m.videos[0];
    assert_eq!(nishant.segments, vec![(27.0, 95.0), (106.0, 112.0)]);
    assert_eq!(nishant.source, PathBuf::from("/jobs/nishant.MP4"));
    assert_eq!(nishant.output_name(), "nishant_poomsae");

    let colin = &m.videos[1];
    assert_eq!(colin.source, PathBuf::from("/media/colin.MP4"));
    assert_eq!(colin.segments[1], (125.5, 137.0));
}

#[test]
fn output_name_defaults_to_second_then_first_line() {
    let m = Manifest::from_toml_str(SAMPLE, Path::new("/jobs")).unwrap();
    assert_eq!(m.videos[1].output_name(), "Mens_A1_Colin_Gordon");
}

#[test]
fn windows_and_title_card_come_from_job() {
    let m = Manifest::from_toml_str(SAMPLE, Path::new(".")).unwrap();
    let job = &m.videos[0];
    let ws = job.windows();
    assert_eq!(ws.len(), 2);
    assert!(ws.iter().all(|w| !w.synthetic));
    assert_eq!(job.title_card().second_line, "PA1");
}

#[test]
fn empty_manifest_is_rejected() {
    let err = Manifest::from_toml_str("[defaults]\ncrossfade = 1\n", Path::new(".")).unwrap_err();
    assert!(matches!(err, SplicerError::Config(_)));
}

#[test]
fn duplicate_output_names_are_rejected() {
    let text = r#"
[[video]]
first_line = "A"
source = "a.mp4"
output = "same"

[[video]]
first_line = "B"
source = "b.mp4"
output = "same"
"#;
    let err = Manifest::from_toml_str(text, Path::new(".")).unwrap_err();
    assert!(err.to_string().contains("more than once"));
}

#[test]
fn unknown_keys_are_a_serialization_error() {
    let text = r#"
[[video]]
first_line = "A"
source = "a.mp4"
segmnets = [[0, 10]]
"#;
    let err = Manifest::from_toml_str(text, Path::new(".")).unwrap_err();
    assert!(matches!(err, SplicerError::Serde(_)));
}

#[test]
fn invalid_crossfade_is_rejected() {
    let text = r#"
[defaults]
crossfade = 0

[[video]]
first_line = "A"
source = "a.mp4"
"#;
    assert!(Manifest::from_toml_str(text, Path::new(".")).is_err());
}

#[test]
fn load_reads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jobs.toml");
    std::fs::write(&path, SAMPLE).unwrap();
    let m = Manifest::load(&path).unwrap();
    assert_eq!(m.videos[0].source, dir.path().join("nishant.MP4"));
}

#[test]
fn load_missing_file_has_context() {
    let err = Manifest::load(Path::new("/definitely/not/here.toml")).unwrap_err();
    assert!(err.to_string().contains("failed to read manifest"));
}
