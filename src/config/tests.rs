use super::*;
use serial_test::serial;
use std::env;
use std::net::IpAddr;

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_cinesearch_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        env::remove_var("CINESEARCH_PORT");
        env::remove_var("CINESEARCH_BIND_ADDR");
        env::remove_var("CINESEARCH_TMDB_API_KEY");
        env::remove_var("CINESEARCH_LASTFM_API_KEY");
        env::remove_var("CINESEARCH_OPENAI_API_KEY");
        env::remove_var("CINESEARCH_OPENAI_MODEL");
        env::remove_var("CINESEARCH_HTTP_TIMEOUT_SECS");
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.port, 8080);
    assert_eq!(
        config.bind_addr,
        IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1))
    );
    assert!(config.tmdb_api_key.is_none());
    assert!(config.lastfm_api_key.is_none());
    assert!(config.openai_api_key.is_none());
    assert_eq!(config.openai_model, "gpt-4o");
    assert_eq!(config.http_timeout_secs, 10);
}

#[test]
fn test_socket_addr() {
    let config = Config::default();
    assert_eq!(config.socket_addr(), "127.0.0.1:8080");

    let config = Config {
        port: 3000,
        ..Config::default()
    };
    assert_eq!(config.socket_addr(), "127.0.0.1:3000");
}

#[test]
#[serial]
fn test_from_env_defaults_when_unset() {
    clear_cinesearch_env();

    let config = Config::from_env().expect("defaults load");
    assert_eq!(config.port, 8080);
    assert!(config.tmdb_api_key.is_none());
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_cinesearch_env();

    let config = with_env_vars(
        &[
            ("CINESEARCH_PORT", "3000"),
            ("CINESEARCH_BIND_ADDR", "0.0.0.0"),
            ("CINESEARCH_TMDB_API_KEY", "tmdb-key"),
            ("CINESEARCH_OPENAI_MODEL", "gpt-4o-mini"),
            ("CINESEARCH_HTTP_TIMEOUT_SECS", "30"),
        ],
        || Config::from_env().expect("overrides load"),
    );

    assert_eq!(config.port, 3000);
    assert_eq!(config.bind_addr, IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED));
    assert_eq!(config.tmdb_api_key.as_deref(), Some("tmdb-key"));
    assert_eq!(config.openai_model, "gpt-4o-mini");
    assert_eq!(config.http_timeout_secs, 30);
}

#[test]
#[serial]
fn test_from_env_rejects_bad_port() {
    clear_cinesearch_env();

    let result = with_env_vars(&[("CINESEARCH_PORT", "not-a-port")], Config::from_env);
    assert!(matches!(result, Err(ConfigError::PortParseError { .. })));

    let result = with_env_vars(&[("CINESEARCH_PORT", "0")], Config::from_env);
    assert!(matches!(result, Err(ConfigError::InvalidPort { .. })));
}

#[test]
#[serial]
fn test_from_env_rejects_bad_bind_addr() {
    clear_cinesearch_env();

    let result = with_env_vars(&[("CINESEARCH_BIND_ADDR", "nope")], Config::from_env);
    assert!(matches!(result, Err(ConfigError::InvalidBindAddr { .. })));
}

#[test]
#[serial]
fn test_blank_api_key_counts_as_missing() {
    clear_cinesearch_env();

    let config = with_env_vars(&[("CINESEARCH_TMDB_API_KEY", "  ")], || {
        Config::from_env().expect("loads")
    });
    assert!(config.tmdb_api_key.is_none());
}

#[test]
fn test_validate_requires_tmdb_key() {
    let config = Config::default();
    assert!(matches!(
        config.validate(),
        Err(ConfigError::MissingEnvVar {
            name: "CINESEARCH_TMDB_API_KEY"
        })
    ));

    let config = Config {
        tmdb_api_key: Some("key".to_string()),
        ..Config::default()
    };
    assert!(config.validate().is_ok());
}

#[test]
fn test_http_timeout_duration() {
    let config = Config {
        http_timeout_secs: 25,
        ..Config::default()
    };
    assert_eq!(config.http_timeout(), std::time::Duration::from_secs(25));
}
