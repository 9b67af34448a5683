use super::*;

fn args(method: &str, data: Option<&str>) -> RequestArgs {
    RequestArgs { method: method.to_owned(), path: "/api/test".to_owned(), data: data.map(str::to_owned) }
}

#[test]
fn request_options_parse_method_and_body() {
    let options = request_options(&args("post", Some(r#"{"test":"data"}"#))).unwrap();
    assert_eq!(options.method, Method::Post);
    assert_eq!(options.body, Some(serde_json::json!({ "test": "data" })));

    let options = request_options(&args("GET", None)).unwrap();
    assert_eq!(options, RequestOptions::new(Method::Get));
}

#[test]
fn request_options_reject_bad_input() {
    assert!(matches!(request_options(&args("HEAD", None)), Err(CliError::InvalidMethod(_))));
    assert!(matches!(request_options(&args("POST", Some("{nope"))), Err(CliError::InvalidJson(_))));
}

#[test]
fn cli_parses_request_subcommand() {
    let cli = Cli::try_parse_from([
        "floworx",
        "--base-url",
        "http://localhost:5001",
        "request",
        "PATCH",
        "/api/user/settings",
        "--data",
        "{}",
    ])
    .unwrap();
    assert_eq!(cli.base_url, "http://localhost:5001");
    assert!(matches!(cli.command, Command::Request(RequestArgs { ref method, .. }) if method == "PATCH"));
}

#[test]
fn cli_parses_settings_set() {
    let cli = Cli::try_parse_from(["floworx", "settings", "set", "--data", r#"{"autoReply":true}"#]).unwrap();
    assert!(matches!(
        cli.command,
        Command::Settings(SettingsCommand { command: SettingsSubcommand::Set { .. } })
    ));
}
