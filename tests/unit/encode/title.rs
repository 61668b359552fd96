use super::*;

fn card() -> TitleCard {
    TitleCard {
        first_line: "Nishant Dash".to_string(),
        second_line: "A1 Poomsae".to_string(),
    }
}

#[test]
fn filter_draws_two_centred_lines() {
    let f = title_filter(&card(), &TitleCardOpts::default());
    assert_eq!(
        f,
        "[0:v]drawtext=text=Nishant Dash:x=(w-text_w)/2:y=(h-4*text_h)/2:fontcolor=white:fontsize=96[firstline];\
         [firstline]drawtext=text=A1 Poomsae:x=(w-text_w)/2:y=(h-text_h)/2:fontcolor=white:fontsize=96[titlev];\
         [1:a]anull[titlea]"
    );
}

#[test]
fn drawtext_escaping_covers_both_levels() {
    assert_eq!(escape_drawtext("plain text"), "plain text");
    assert_eq!(escape_drawtext("a:b"), r"a\\:b");
    assert_eq!(escape_drawtext("50%"), r"50\\%");
    assert_eq!(escape_drawtext("x,y"), r"x\,y");
    assert_eq!(escape_drawtext("it's"), r"it\\\'s");
}

#[test]
fn command_uses_lavfi_sources_and_maps_title_pads() {
    let cmd = title_card_command(
        &card(),
        &TitleCardOpts::default(),
        Secs(3.0),
        "scratch/segment_0.mp4",
        &EncodeSettings::default(),
    )
    .unwrap();
    let args: Vec<String> = cmd
        .to_args()
        .into_iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    assert!(args.contains(&"color=black:1920x1080".to_string()));
    assert!(args.contains(&"anullsrc=channel_layout=stereo:sample_rate=48000".to_string()));
    assert!(args.windows(2).any(|w| w[0] == "-t" && w[1] == "3"));
    assert!(args.windows(2).any(|w| w[0] == "-r" && w[1] == "30"));
    assert!(args.windows(2).any(|w| w[0] == "-map" && w[1] == "[titlev]"));
    assert!(args.windows(2).any(|w| w[0] == "-map" && w[1] == "[titlea]"));
    assert_eq!(args.last().unwrap(), "scratch/segment_0.mp4");
}

#[test]
fn odd_dimensions_are_rejected() {
    let opts = TitleCardOpts {
        width: 1921,
        ..TitleCardOpts::default()
    };
    assert!(opts.validate().is_err());
}

#[test]
fn colors_with_filter_syntax_are_rejected() {
    let opts = TitleCardOpts {
        background: "black[x]".to_string(),
        ..TitleCardOpts::default()
    };
    assert!(opts.validate().is_err());
    assert!(TitleCardOpts::default().validate().is_ok());
}

#[test]
fn non_positive_duration_is_rejected() {
    let err = title_card_command(
        &card(),
        &TitleCardOpts::default(),
        Secs(0.0),
        "t.mp4",
        &EncodeSettings::default(),
    )
    .unwrap_err();
    assert!(matches!(err, SplicerError::Config(_)));
}
