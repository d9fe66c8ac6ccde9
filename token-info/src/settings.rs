use crate::{cli::Args, ClientConfig};
use config::{Config, Environment, File, Map};
use serde::Deserialize;
use std::ffi::OsString;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default)]
    pub node_url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    /// Per request timeout in seconds.
    #[serde(default = "defaults::timeout")]
    pub timeout: u64,
    #[serde(default = "defaults::contract_address")]
    pub contract_address: String,
    #[serde(default)]
    pub group: i32,
    /// Request node info once before the multicall, failing early on an unreachable node.
    #[serde(default)]
    pub probe: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            node_url: None,
            api_key: None,
            timeout: defaults::timeout(),
            contract_address: defaults::contract_address(),
            group: 0,
            probe: false,
        }
    }
}

impl Settings {
    pub const SERVICE_NAME: &'static str = "TOKEN_INFO";

    /// Reads the optional config file named by `TOKEN_INFO__CONFIG`, then `TOKEN_INFO__*`
    /// environment variables.
    pub fn build() -> anyhow::Result<Self> {
        let config_path_name = format!("{}__CONFIG", Self::SERVICE_NAME);
        let config_path = std::env::var(&config_path_name).ok();
        let env = unicode_env(std::env::vars_os(), &config_path_name);
        Self::build_from(config_path.as_deref(), Some(env))
    }

    /// Same as [`Settings::build`], but environment variables are taken from `env` when provided.
    pub fn build_from(
        config_path: Option<&str>,
        env: Option<Map<String, String>>,
    ) -> anyhow::Result<Self> {
        let mut builder = Config::builder();
        if let Some(config_path) = config_path {
            builder = builder.add_source(File::with_name(config_path));
        }
        // Use `__` so that it would be possible to address keys with underscores in names (e.g. `api_key`)
        builder = builder.add_source(
            Environment::with_prefix(Self::SERVICE_NAME)
                .separator("__")
                .source(env),
        );

        let settings: Self = builder.build()?.try_deserialize()?;
        settings.validate()?;

        Ok(settings)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.timeout == 0 {
            anyhow::bail!("timeout must be a positive number of seconds");
        }
        Ok(())
    }

    /// Command line arguments take precedence over file and environment values.
    pub fn with_args(mut self, args: Args) -> anyhow::Result<Self> {
        if let Some(node_url) = args.node_url {
            self.node_url = Some(node_url);
        }
        if let Some(api_key) = args.api_key {
            self.api_key = Some(api_key);
        }
        if let Some(timeout) = args.timeout {
            self.timeout = timeout;
        }
        if let Some(contract_address) = args.contract_address {
            self.contract_address = contract_address;
        }
        if let Some(group) = args.group {
            self.group = group;
        }
        if args.probe {
            self.probe = true;
        }
        self.validate()?;

        Ok(self)
    }

    /// `None` if no node url was given.
    pub fn client_config(&self) -> Option<ClientConfig> {
        let node_url = self.node_url.as_deref()?;
        let config = ClientConfig::new(
            node_url,
            self.api_key.as_deref().unwrap_or_default(),
            self.timeout,
        );
        Some(config.probe(self.probe))
    }
}

/// Variables that are not valid unicode cannot be settings and are skipped, as is the config
/// path variable which shares the prefix.
fn unicode_env(
    vars: impl Iterator<Item = (OsString, OsString)>,
    config_path_name: &str,
) -> Map<String, String> {
    vars.filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
        .filter(|(key, _)| key != config_path_name)
        .collect()
}

mod defaults {
    pub fn timeout() -> u64 {
        10
    }

    pub fn contract_address() -> String {
        "27HxXZJBTPjhHXwoF1Ue8sLMcSxYdxefoN2U6d8TKmZsm".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn env(vars: &[(&str, &str)]) -> Option<Map<String, String>> {
        Some(
            vars.iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        )
    }

    #[test]
    fn defaults_without_sources() {
        let settings = Settings::build_from(None, env(&[])).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.timeout, 10);
        assert_eq!(
            settings.contract_address,
            "27HxXZJBTPjhHXwoF1Ue8sLMcSxYdxefoN2U6d8TKmZsm"
        );
        assert_eq!(settings.group, 0);
        assert_eq!(settings.client_config(), None);
    }

    #[test]
    fn environment_values_are_read() {
        let settings = Settings::build_from(
            None,
            env(&[
                ("TOKEN_INFO__NODE_URL", "http://127.0.0.1:12973"),
                ("TOKEN_INFO__API_KEY", "secret"),
                ("TOKEN_INFO__TIMEOUT", "3"),
                ("TOKEN_INFO__GROUP", "1"),
                ("TOKEN_INFO__PROBE", "true"),
            ]),
        )
        .unwrap();
        assert_eq!(settings.node_url.as_deref(), Some("http://127.0.0.1:12973"));
        assert_eq!(settings.api_key.as_deref(), Some("secret"));
        assert_eq!(settings.timeout, 3);
        assert_eq!(settings.group, 1);
        assert!(settings.probe);
        assert!(settings.client_config().unwrap().probe);
    }

    #[cfg(unix)]
    #[test]
    fn non_unicode_environment_is_skipped() {
        use std::os::unix::ffi::OsStringExt;

        let vars = vec![
            (OsString::from("TOKEN_INFO__GROUP"), OsString::from("3")),
            (OsString::from("TOKEN_INFO__CONFIG"), OsString::from("token-info.toml")),
            (OsString::from("UNRELATED"), OsString::from_vec(vec![0x66, 0x80, 0xff])),
            (OsString::from_vec(vec![0xc3, 0x28]), OsString::from("value")),
        ];
        let env = unicode_env(vars.into_iter(), "TOKEN_INFO__CONFIG");
        assert_eq!(env.len(), 1);

        let settings = Settings::build_from(None, Some(env)).unwrap();
        assert_eq!(settings.group, 3);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        assert!(Settings::build_from(None, env(&[("TOKEN_INFO__TIMEOUT", "0")])).is_err());
        let args = Args {
            timeout: Some(0),
            ..Default::default()
        };
        assert!(Settings::default().with_args(args).is_err());
    }

    #[test]
    fn args_override_other_sources() {
        let settings = Settings::build_from(
            None,
            env(&[
                ("TOKEN_INFO__NODE_URL", "http://127.0.0.1:12973"),
                ("TOKEN_INFO__API_KEY", "from-env"),
            ]),
        )
        .unwrap()
        .with_args(Args {
            node_url: Some("https://node.testnet.alephium.org".to_string()),
            group: Some(2),
            probe: true,
            ..Default::default()
        })
        .unwrap();

        let client_config = settings.client_config().unwrap();
        assert_eq!(client_config.host, "node.testnet.alephium.org");
        assert_eq!(client_config.api_key.as_deref(), Some("from-env"));
        assert_eq!(client_config.timeout, Duration::from_secs(10));
        assert_eq!(settings.group, 2);
        assert!(client_config.probe);
    }
}
