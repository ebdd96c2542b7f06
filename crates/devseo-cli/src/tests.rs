use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["devseo-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_locations_filter() {
    let cli = Cli::try_parse_from(["devseo-cli", "locations", "--filter", "united"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Locations { filter: Some(ref f) }) if f == "united"
    ));
}

#[test]
fn related_maps_to_search_input() {
    let cli = Cli::try_parse_from([
        "devseo-cli",
        "related",
        "seo tools",
        "--location",
        "Germany",
        "--language",
        "German",
        "--depth",
        "2",
        "--limit",
        "50",
    ])
    .expect("expected valid cli args");

    let command = cli.command.expect("command");
    let (kind, input, output) = command.search().expect("search command");
    assert_eq!(kind, QueryKind::Related);
    assert_eq!(
        input,
        SearchInput {
            keyword: Some("seo tools".to_string()),
            location: Some("Germany".to_string()),
            language: Some("German".to_string()),
            depth: Some(2),
            limit: Some(50),
            ..SearchInput::default()
        }
    );
    assert_eq!(output, &OutputArgs::default());
}

#[test]
fn suggestions_toggles_default_on() {
    let cli = Cli::try_parse_from(["devseo-cli", "suggestions", "rust"])
        .expect("expected valid cli args");
    let command = cli.command.expect("command");
    let (_, input, _) = command.search().expect("search command");
    assert_eq!(input.include_serp_info, Some(true));
    assert_eq!(input.include_seed_keyword, Some(true));

    let cli = Cli::try_parse_from([
        "devseo-cli",
        "suggestions",
        "rust",
        "--no-serp-info",
        "--no-seed-keyword",
    ])
    .expect("expected valid cli args");
    let command = cli.command.expect("command");
    let (_, input, _) = command.search().expect("search command");
    assert_eq!(input.include_serp_info, Some(false));
    assert_eq!(input.include_seed_keyword, Some(false));
}

#[test]
fn ideas_requires_at_least_one_keyword() {
    assert!(Cli::try_parse_from(["devseo-cli", "ideas"]).is_err());

    let cli = Cli::try_parse_from(["devseo-cli", "ideas", "coffee", "espresso"])
        .expect("expected valid cli args");
    let command = cli.command.expect("command");
    let (kind, input, _) = command.search().expect("search command");
    assert_eq!(kind, QueryKind::Ideas);
    assert_eq!(input.keywords, ["coffee", "espresso"]);
    assert_eq!(input.keyword, None);
}

#[test]
fn csv_flag_without_value_uses_current_directory() {
    let cli = Cli::try_parse_from(["devseo-cli", "related", "seo", "--csv"])
        .expect("expected valid cli args");
    let command = cli.command.expect("command");
    let (_, _, output) = command.search().expect("search command");
    assert_eq!(output.csv.as_deref(), Some(std::path::Path::new(".")));
}

#[test]
fn json_conflicts_with_csv() {
    assert!(
        Cli::try_parse_from(["devseo-cli", "related", "seo", "--csv", "out.csv", "--json"])
            .is_err()
    );
}

#[test]
fn locale_flag_parses_region_tags() {
    let cli = Cli::try_parse_from(["devseo-cli", "related", "seo", "--locale", "de-DE"])
        .expect("expected valid cli args");
    let command = cli.command.expect("command");
    let (_, _, output) = command.search().expect("search command");
    assert_eq!(output.locale, Some(Locale::De));

    assert!(Cli::try_parse_from(["devseo-cli", "related", "seo", "--locale", "pt"]).is_err());
}

#[test]
fn locations_is_not_a_search() {
    let cli = Cli::try_parse_from(["devseo-cli", "locations"]).expect("expected valid cli args");
    assert!(cli.command.expect("command").search().is_none());
}
