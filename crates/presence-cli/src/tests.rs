use super::*;

#[test]
fn parses_options_command() {
    let cli = Cli::try_parse_from(["presence-cli", "options"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Options)));
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["presence-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_score_with_repeated_competitors() {
    let cli = Cli::try_parse_from([
        "presence-cli",
        "score",
        "--frequency",
        "3-5",
        "--engagement",
        "50-100",
        "--competitor",
        "Acme:6-10:100-250",
        "--competitor",
        "Globex:10+:250+",
        "--json",
    ])
    .expect("expected valid cli args");

    let Some(Commands::Score {
        frequency,
        engagement,
        competitors,
        json,
    }) = cli.command
    else {
        panic!("expected score command");
    };
    assert_eq!(frequency, FrequencyBucket::Mid);
    assert_eq!(engagement, EngagementBucket::FiftyToHundred);
    assert_eq!(competitors.len(), 2);
    assert_eq!(competitors[1].name, "Globex");
    assert!(json);
}

#[test]
fn score_accepts_exact_labels() {
    let cli = Cli::try_parse_from([
        "presence-cli",
        "score",
        "--frequency",
        "1–2",
        "--engagement",
        "<20 likes",
    ])
    .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Score {
            frequency: FrequencyBucket::Low,
            engagement: EngagementBucket::UnderTwenty,
            ref competitors,
            json: false,
        }) if competitors.is_empty()
    ));
}

#[test]
fn score_rejects_unknown_frequency() {
    let result = Cli::try_parse_from([
        "presence-cli",
        "score",
        "--frequency",
        "daily",
        "--engagement",
        "<20",
    ]);
    assert!(result.is_err());
}

#[test]
fn score_rejects_malformed_competitor() {
    let result = Cli::try_parse_from([
        "presence-cli",
        "score",
        "--frequency",
        "0",
        "--engagement",
        "<20",
        "--competitor",
        "Acme",
    ]);
    assert!(result.is_err());
}

#[test]
fn parses_analyze_with_input_path() {
    let cli = Cli::try_parse_from(["presence-cli", "analyze", "--input", "survey.yaml"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Analyze { ref input, json: false }) if input.ends_with("survey.yaml")
    ));
}

#[test]
fn analyze_requires_input() {
    assert!(Cli::try_parse_from(["presence-cli", "analyze"]).is_err());
}

#[test]
fn log_level_flag_is_global() {
    let cli = Cli::try_parse_from(["presence-cli", "options", "--log-level", "debug"])
        .expect("expected valid cli args");
    assert_eq!(cli.log_level, "debug");
}
