//! Integration tests for TOML and environment layering.
//!
//! Uses `figment::Jail` for sandboxed cwd and env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use gatepass_config::{ConfigError, GatepassConfig};

#[test]
fn loads_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[server]
host = "127.0.0.1"
port = 8080
cors_max_age_secs = 120

[database]
path = "/var/lib/gatepass/gatepass.db"

[general]
guard_log_limit = 25
"#,
        )?;

        let config: GatepassConfig = Figment::from(Serialized::defaults(GatepassConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.server.address(), "127.0.0.1:8080");
        assert_eq!(config.server.cors_max_age_secs, 120);
        assert_eq!(config.database.path, "/var/lib/gatepass/gatepass.db");
        assert_eq!(config.general.guard_log_limit, 25);
        assert_eq!(config.general.query_log_limit, 1000);
        Ok(())
    });
}

#[test]
fn env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[server]
port = 8080
"#,
        )?;
        jail.set_env("GATEPASS_SERVER__PORT", "9090");
        jail.set_env("GATEPASS_DATABASE__PATH", ":memory:");

        let config: GatepassConfig = Figment::from(Serialized::defaults(GatepassConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("GATEPASS_").split("__"))
            .extract()?;

        assert_eq!(config.server.port, 9090);
        assert!(config.database.is_in_memory());
        Ok(())
    });
}

#[test]
fn project_local_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".gatepass")?;
        jail.create_file(
            ".gatepass/config.toml",
            r#"
[database]
path = "local.db"
"#,
        )?;

        let config = GatepassConfig::load().expect("config loads");
        assert_eq!(config.database.path, "local.db");
        Ok(())
    });
}

#[test]
fn load_rejects_invalid_port() {
    Jail::expect_with(|jail| {
        jail.set_env("GATEPASS_SERVER__PORT", "0");
        let err = GatepassConfig::load().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }), "{err}");
        Ok(())
    });
}

#[test]
fn load_reports_unparseable_values() {
    Jail::expect_with(|jail| {
        jail.set_env("GATEPASS_SERVER__PORT", "not-a-port");
        let err = GatepassConfig::load().unwrap_err();
        assert!(matches!(err, ConfigError::Figment(_)), "{err}");
        Ok(())
    });
}

#[test]
fn defaults_without_any_source() {
    Jail::expect_with(|_jail| {
        let config = GatepassConfig::load().expect("defaults load");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.general.guard_log_limit, 50);
        Ok(())
    });
}
