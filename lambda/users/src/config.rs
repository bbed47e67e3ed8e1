pub(crate) const DEFAULT_REGION: &str = "us-east-1";
pub(crate) const DEFAULT_ALLOWED_ORIGIN: &str = "*";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub(crate) enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    pub table_name: String,
    pub region: String,
    /// Custom endpoint URL (for local DynamoDB).
    pub endpoint_url: Option<String>,
    pub allowed_origin: String,
}

impl Config {
    pub(crate) fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    // Blank values count as unset.
    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        Ok(Self {
            table_name: var("TABLE_NAME").ok_or(ConfigError::Missing("TABLE_NAME"))?,
            region: var("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
            endpoint_url: var("AWS_ENDPOINT_URL"),
            allowed_origin: var("ALLOWED_ORIGIN")
                .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGIN.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_only_table_is_set() {
        let config = Config::from_lookup(lookup(&[("TABLE_NAME", "CRUD-ITEMS")])).unwrap();

        assert_eq!(config.table_name, "CRUD-ITEMS");
        assert_eq!(config.region, "us-east-1");
        assert_eq!(config.endpoint_url, None);
        assert_eq!(config.allowed_origin, "*");
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = Config::from_lookup(lookup(&[
            ("TABLE_NAME", "users"),
            ("AWS_REGION", "eu-west-1"),
            ("AWS_ENDPOINT_URL", "http://localhost:8000"),
            ("ALLOWED_ORIGIN", "https://app.example.com"),
        ]))
        .unwrap();

        assert_eq!(config.region, "eu-west-1");
        assert_eq!(config.endpoint_url.as_deref(), Some("http://localhost:8000"));
        assert_eq!(config.allowed_origin, "https://app.example.com");
    }

    #[test]
    fn missing_or_blank_table_name_is_an_error() {
        assert_eq!(
            Config::from_lookup(lookup(&[])),
            Err(ConfigError::Missing("TABLE_NAME"))
        );
        assert_eq!(
            Config::from_lookup(lookup(&[("TABLE_NAME", "  ")])),
            Err(ConfigError::Missing("TABLE_NAME"))
        );
    }
}
