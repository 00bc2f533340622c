use std::path::Path;

use secrecy::ExposeSecret;

use crate::Config;

/// Environment variable overriding `bedrock.region`
pub const REGION_ENV: &str = "BEDROCK_REGION";

/// Environment variable overriding `bedrock.model_id`
pub const MODEL_ID_ENV: &str = "MODEL_ID";

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, deserializes,
    /// applies the `BEDROCK_REGION`/`MODEL_ID` overrides and validates the
    /// result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let mut config = Self::parse(&raw)?;
        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Build configuration without a file
    ///
    /// Starts from defaults and applies environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the overridden values fail validation
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Load from `path` when given, otherwise from the environment alone
    ///
    /// # Errors
    ///
    /// See [`Config::load`] and [`Config::from_env`]
    pub fn load_or_env(path: Option<&Path>) -> anyhow::Result<Self> {
        path.map_or_else(Self::from_env, Self::load)
    }

    /// Parse raw TOML text after placeholder expansion
    ///
    /// # Errors
    ///
    /// Returns an error if expansion or TOML parsing fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))
    }

    /// Apply `BEDROCK_REGION` and `MODEL_ID` on top of the current values
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // Runs before logging is set up; the resolved values are logged at startup
        if let Some(region) = lookup(REGION_ENV) {
            self.bedrock.region = region;
        }

        if let Some(model_id) = lookup(MODEL_ID_ENV) {
            self.bedrock.model_id = model_id;
        }
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting found
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_bedrock_config()?;
        self.validate_server_config()?;
        Ok(())
    }

    fn validate_bedrock_config(&self) -> anyhow::Result<()> {
        let bedrock = &self.bedrock;

        if bedrock.region.trim().is_empty() {
            anyhow::bail!("bedrock.region must not be empty");
        }

        if bedrock.model_id.trim().is_empty() {
            anyhow::bail!("bedrock.model_id must not be empty");
        }

        match (&bedrock.access_key_id, &bedrock.secret_access_key) {
            (Some(_), None) | (None, Some(_)) => {
                anyhow::bail!("bedrock.access_key_id and bedrock.secret_access_key must be set together");
            }
            (Some(key), Some(_)) if key.expose_secret().is_empty() => {
                anyhow::bail!("bedrock.access_key_id must not be empty");
            }
            _ => {}
        }

        bedrock.timeout_duration()?;

        Ok(())
    }

    fn validate_server_config(&self) -> anyhow::Result<()> {
        let health = &self.server.health;

        if health.enabled && !health.path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/': `{}`", health.path);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::time::Duration;

    use super::*;
    use crate::{DEFAULT_LISTEN_ADDRESS, DEFAULT_MODEL_ID, DEFAULT_REGION, LogFormat};

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::parse("").unwrap();

        assert_eq!(config.bedrock.region, DEFAULT_REGION);
        assert_eq!(config.bedrock.model_id, DEFAULT_MODEL_ID);
        assert_eq!(config.server.listen_address(), DEFAULT_LISTEN_ADDRESS);
        assert!(config.server.health.enabled);
        assert_eq!(config.server.health.path, "/health");
        assert_eq!(config.telemetry.log_filter, "info");
        assert_eq!(config.telemetry.log_format, LogFormat::Text);
        config.validate().unwrap();
    }

    #[test]
    fn parses_full_file() {
        let raw = r#"
            [server]
            listen_address = "127.0.0.1:8088"

            [server.health]
            path = "/healthz"

            [bedrock]
            region = "eu-central-1"
            model_id = "cohere.command-r-plus-v1:0"
            access_key_id = "AKIDEXAMPLE"
            secret_access_key = "secret"
            endpoint_url = "http://127.0.0.1:4566"
            timeout = "45s"

            [telemetry]
            log_filter = "foreman=debug"
            log_format = "json"
        "#;

        let config = Config::parse(raw).unwrap();
        config.validate().unwrap();

        assert_eq!(config.server.listen_address().port(), 8088);
        assert_eq!(config.server.health.path, "/healthz");
        assert_eq!(config.bedrock.region, "eu-central-1");
        assert_eq!(config.bedrock.model_id, "cohere.command-r-plus-v1:0");
        assert_eq!(
            config.bedrock.endpoint_url.as_ref().map(url::Url::as_str),
            Some("http://127.0.0.1:4566/")
        );
        assert_eq!(config.bedrock.timeout_duration().unwrap(), Some(Duration::from_secs(45)));
        assert_eq!(config.telemetry.log_format, LogFormat::Json);
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = Config::parse("[bedrock]\nmodel = \"x\"").unwrap_err();
        assert!(err.to_string().contains("failed to parse config"));
    }

    #[test]
    fn env_overrides_win_over_file_values() {
        let mut config = Config::parse("[bedrock]\nregion = \"eu-west-1\"\nmodel_id = \"from-file\"").unwrap();

        config.apply_overrides(|name| match name {
            REGION_ENV => Some("us-east-1".to_owned()),
            MODEL_ID_ENV => Some("from-env".to_owned()),
            _ => None,
        });

        assert_eq!(config.bedrock.region, "us-east-1");
        assert_eq!(config.bedrock.model_id, "from-env");
    }

    #[test]
    fn absent_overrides_keep_file_values() {
        let mut config = Config::parse("[bedrock]\nmodel_id = \"from-file\"").unwrap();
        config.apply_overrides(|_| None);

        assert_eq!(config.bedrock.model_id, "from-file");
        assert_eq!(config.bedrock.region, DEFAULT_REGION);
    }

    #[test]
    fn from_env_reads_process_environment() {
        temp_env::with_vars([(REGION_ENV, Some("ca-central-1")), (MODEL_ID_ENV, None)], || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.bedrock.region, "ca-central-1");
            assert_eq!(config.bedrock.model_id, DEFAULT_MODEL_ID);
        });
    }

    #[test]
    fn load_reads_file_and_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[bedrock]\nmodel_id = \"from-file\"").unwrap();

        temp_env::with_vars([(REGION_ENV, None::<&str>), (MODEL_ID_ENV, Some("from-env"))], || {
            let config = Config::load(file.path()).unwrap();
            assert_eq!(config.bedrock.model_id, "from-env");
        });
    }

    #[test]
    fn load_missing_file_names_path() {
        let err = Config::load(Path::new("/nonexistent/foreman.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/foreman.toml"));
    }

    #[test]
    fn empty_model_id_is_invalid() {
        let config = Config::parse("[bedrock]\nmodel_id = \"  \"").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("model_id"));
    }

    #[test]
    fn credentials_must_be_paired() {
        let config = Config::parse("[bedrock]\naccess_key_id = \"AKIDEXAMPLE\"").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("must be set together"));
    }

    #[test]
    fn invalid_timeout_is_rejected() {
        let config = Config::parse("[bedrock]\ntimeout = \"soon\"").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("bedrock.timeout"));
    }

    #[test]
    fn health_path_needs_leading_slash() {
        let config = Config::parse("[server.health]\npath = \"health\"").unwrap();
        assert!(config.validate().is_err());
    }
}
