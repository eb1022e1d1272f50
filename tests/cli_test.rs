//! CLI Command Tests
//!
//! Tests for CLI argument parsing and command handlers against a mocked
//! movie service. Covers exit codes and input validation.

// =============================================================================
// CLI Argument Parsing Tests
// =============================================================================

mod cli_parsing {
    use clap::Parser;
    use movierec::cli::{Cli, Command};
    use std::path::PathBuf;

    #[test]
    fn test_search_command_basic() {
        let cli = Cli::parse_from(["movierec", "search", "alien"]);
        assert!(cli.is_cli_mode());
        match cli.command {
            Some(Command::Search(cmd)) => {
                assert_eq!(cmd.query, "alien");
                assert_eq!(cmd.limit, 10);
            }
            _ => panic!("Expected Search command"),
        }
    }

    #[test]
    fn test_aliases() {
        let cli = Cli::parse_from(["movierec", "s", "alien"]);
        assert!(matches!(cli.command, Some(Command::Search(_))));

        let cli = Cli::parse_from(["movierec", "ls"]);
        match cli.command {
            Some(Command::Catalog(cmd)) => assert_eq!(cmd.limit, 20),
            _ => panic!("Expected Catalog command"),
        }

        let cli = Cli::parse_from(["movierec", "rec", "1", "2", "3", "4", "5"]);
        match cli.command {
            Some(Command::Recommend(cmd)) => assert_eq!(cmd.ids.len(), 5),
            _ => panic!("Expected Recommend command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "movierec",
            "catalog",
            "-l",
            "3",
            "--json",
            "--url",
            "http://recs.local:8080",
            "--config",
            "/tmp/movierec.toml",
        ]);
        assert!(cli.json);
        assert_eq!(cli.url.as_deref(), Some("http://recs.local:8080"));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/movierec.toml")));
        match cli.command {
            Some(Command::Catalog(cmd)) => assert_eq!(cmd.limit, 3),
            _ => panic!("Expected Catalog command"),
        }
    }

    #[test]
    fn test_config_command_flags() {
        let cli = Cli::parse_from([
            "movierec",
            "config",
            "--set-url",
            "http://x",
            "--set-timeout",
            "5",
        ]);
        match cli.command {
            Some(Command::Config(cmd)) => {
                assert_eq!(cmd.set_url.as_deref(), Some("http://x"));
                assert_eq!(cmd.set_timeout, Some(5));
            }
            _ => panic!("Expected Config command"),
        }
    }

    #[test]
    fn test_missing_required_args_fail() {
        assert!(Cli::try_parse_from(["movierec", "search"]).is_err());
        assert!(Cli::try_parse_from(["movierec", "recommend"]).is_err());
        assert!(Cli::try_parse_from(["movierec", "catalog", "--limit", "many"]).is_err());
    }
}

// =============================================================================
// Command Handler Tests
// =============================================================================

mod command_handlers {
    use mockito::{Matcher, Mock, Server, ServerGuard};
    use movierec::cli::{CatalogCmd, ConfigCmd, ExitCode, Output, RecommendCmd, SearchCmd};
    use movierec::commands::{self, Context};
    use movierec::config::Config;
    use serde_json::json;

    const CATALOG: &str = r#"[
        {"movieId": 1, "name": "Alien", "year": 1979, "popularity": 30},
        {"movieId": 2, "name": "Aliens", "year": 1986, "popularity": 40},
        {"movieId": 3, "name": "Heat", "year": 1995, "popularity": 20}
    ]"#;

    fn quiet_output() -> Output {
        Output {
            json: true,
            quiet: true,
        }
    }

    fn context(server: &ServerGuard) -> Context {
        Context::new(Config::default(), None, Some(server.url().as_str()))
    }

    async fn catalog_server() -> (ServerGuard, Mock) {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/movies")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(CATALOG)
            .create_async()
            .await;
        (server, mock)
    }

    fn ids(list: &[&str]) -> RecommendCmd {
        RecommendCmd {
            ids: list.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_catalog_cmd_success() {
        let (server, _mock) = catalog_server().await;
        let ctx = context(&server);
        let code = commands::catalog_cmd(CatalogCmd { limit: 2 }, &ctx, &quiet_output()).await;
        assert_eq!(code, ExitCode::Success);
    }

    #[tokio::test]
    async fn test_search_cmd_matches_and_no_results() {
        let (server, _mock) = catalog_server().await;
        let ctx = context(&server);

        let found = SearchCmd {
            query: "ALIEN".into(),
            limit: 10,
        };
        assert_eq!(commands::search_cmd(found, &ctx, &quiet_output()).await, ExitCode::Success);

        let missing = SearchCmd {
            query: "zzz".into(),
            limit: 10,
        };
        assert_eq!(commands::search_cmd(missing, &ctx, &quiet_output()).await, ExitCode::NoResults);
    }

    #[tokio::test]
    async fn test_catalog_cmd_service_down() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/movies")
            .with_status(500)
            .create_async()
            .await;

        let ctx = context(&server);
        let code = commands::catalog_cmd(CatalogCmd { limit: 5 }, &ctx, &quiet_output()).await;
        assert_eq!(code, ExitCode::NetworkError);
    }

    #[tokio::test]
    async fn test_recommend_cmd_validates_before_request() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/recommend")
            .expect(0)
            .create_async()
            .await;
        let ctx = context(&server);

        let code = commands::recommend_cmd(ids(&["1", "2", "3"]), &ctx, &quiet_output()).await;
        assert_eq!(code, ExitCode::InvalidArgs);

        let duplicate = ids(&["1", "1", "2", "3", "4"]);
        let code = commands::recommend_cmd(duplicate, &ctx, &quiet_output()).await;
        assert_eq!(code, ExitCode::InvalidArgs);

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_recommend_cmd_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/recommend")
            .match_body(Matcher::Json(json!({"movies": ["1", "2", "3", "4", "5"]})))
            .with_status(200)
            .with_body(r#"{"recommendations":[{"movieId":9,"name":"X","year":1999}]}"#)
            .create_async()
            .await;

        let code = commands::recommend_cmd(
            ids(&["1", "2", "3", "4", "5"]),
            &context(&server),
            &quiet_output(),
        )
        .await;

        mock.assert_async().await;
        assert_eq!(code, ExitCode::Success);
    }

    #[tokio::test]
    async fn test_recommend_cmd_rejected_and_empty() {
        let mut server = Server::new_async().await;
        let _rejected = server
            .mock("POST", "/recommend")
            .with_status(404)
            .with_body(r#"{"error":"No recommendations found for selected movies"}"#)
            .create_async()
            .await;

        let ctx = context(&server);
        let five = ids(&["1", "2", "3", "4", "5"]);
        let code = commands::recommend_cmd(five, &ctx, &quiet_output()).await;
        assert_eq!(code, ExitCode::ServiceRejected);

        let mut server = Server::new_async().await;
        let _empty = server
            .mock("POST", "/recommend")
            .with_status(200)
            .with_body(r#"{"recommendations":[]}"#)
            .create_async()
            .await;

        let ctx = context(&server);
        let five = ids(&["1", "2", "3", "4", "5"]);
        let code = commands::recommend_cmd(five, &ctx, &quiet_output()).await;
        assert_eq!(code, ExitCode::NoResults);
    }

    #[test]
    fn test_config_cmd_saves_to_explicit_file() {
        let dir = std::env::temp_dir().join(format!("movierec-cli-{}", std::process::id()));
        let path = dir.join("config.toml");

        let ctx = Context::new(Config::default(), Some(path.clone()), None);
        let cmd = ConfigCmd {
            set_url: Some("http://recs.local:8080/".into()),
            set_timeout: Some(7),
        };
        assert_eq!(commands::config_cmd(cmd, &ctx, &quiet_output()), ExitCode::Success);

        let saved = Config::load_from(&path).unwrap();
        assert_eq!(saved.service_url.as_deref(), Some("http://recs.local:8080"));
        assert_eq!(saved.request_timeout_secs, Some(7));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_config_report_prefers_url_flag() {
        let config = Config {
            service_url: Some("http://file:1".into()),
            request_timeout_secs: Some(3),
        };
        let ctx = Context::new(config, None, Some("http://flag:2/"));

        let report = commands::config_report(&ctx.config, &ctx);
        assert_eq!(report.service_url, "http://flag:2");
        assert_eq!(report.service_url, ctx.service_url);
        assert_eq!(report.request_timeout_secs, Some(3));
    }

    #[test]
    fn test_config_report_after_save_keeps_url_flag() {
        let dir = std::env::temp_dir().join(format!("movierec-flag-{}", std::process::id()));
        let path = dir.join("config.toml");

        let ctx = Context::new(Config::default(), Some(path.clone()), Some("http://flag:2"));
        let cmd = ConfigCmd {
            set_url: Some("http://saved:3".into()),
            set_timeout: None,
        };
        assert_eq!(commands::config_cmd(cmd, &ctx, &quiet_output()), ExitCode::Success);

        let saved = Config::load_from(&path).unwrap();
        assert_eq!(saved.service_url.as_deref(), Some("http://saved:3"));
        assert_eq!(commands::config_report(&saved, &ctx).service_url, "http://flag:2");

        let _ = std::fs::remove_dir_all(&dir);
    }
}

// =============================================================================
// Output Helper Tests
// =============================================================================

mod output_helpers {
    use clap::Parser;
    use movierec::cli::{Cli, ExitCode, JsonOutput, Output};
    use movierec::models::Movie;

    #[test]
    fn test_output_json_flag() {
        let cli = Cli::parse_from(["movierec", "--json", "catalog"]);
        let output = Output::new(&cli);
        assert!(output.json);
    }

    #[test]
    fn test_output_quiet_flag() {
        let cli = Cli::parse_from(["movierec", "-q", "catalog"]);
        let output = Output::new(&cli);
        assert!(output.quiet);
    }

    #[test]
    fn test_error_returns_code() {
        let output = Output {
            json: false,
            quiet: true,
        };
        assert_eq!(output.error("boom", ExitCode::NoResults), ExitCode::NoResults);
    }

    #[test]
    fn test_movie_list_json_shape() {
        let movies = vec![Movie::new(1u64, "Alien", 1979).with_popularity(3.5)];
        let value = serde_json::to_value(JsonOutput::success(&movies)).unwrap();
        assert_eq!(value["data"][0]["movieId"], "1");
        assert_eq!(value["data"][0]["name"], "Alien");
        assert!(value.get("exit_code").is_none());
    }
}
