//! Site configuration.
//!
//! Values are layered: built-in defaults, then an optional TOML file at
//! ~/.config/nyx/config.toml (or an explicit path), then `NYX_*` environment
//! variables with `__` between nested keys (`NYX_CONTACT__EMAIL`).

use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_TIMEZONE,
    MAX_OCCURRENCES,
};
use crate::contact::{Address, ContactInfo};
use crate::error::{NyxError, NyxResult};
use crate::recurrence::ExpandOptions;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Root of the content API, without the `/api` suffix
    pub api_base_url: String,
    /// IANA name of the timezone day comparisons are made in
    pub timezone: String,
    pub max_occurrences: u16,
    pub request_timeout_secs: u64,
    pub map_url: String,
    pub social: SocialLinks,
    pub contact: ContactInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLinks {
    pub instagram: String,
    pub fetlife: String,
}

impl Default for SocialLinks {
    fn default() -> Self {
        SocialLinks {
            instagram: "https://www.instagram.com/nyx_club_madrid".to_string(),
            fetlife: "https://fetlife.com/NYX_BDSM_CLUB".to_string(),
        }
    }
}

impl Default for ContactInfo {
    fn default() -> Self {
        ContactInfo {
            email: "nyxclubmadrid@gmail.com".to_string(),
            phone: "+34 602 08 30 14".to_string(),
            address: Address {
                street: "Calle de Amaniel 13".to_string(),
                city: "Madrid".to_string(),
                country: "España".to_string(),
                postal_code: "28015".to_string(),
            },
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timezone: DEFAULT_TIMEZONE.to_string(),
            max_occurrences: MAX_OCCURRENCES,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            map_url: "https://maps.app.goo.gl/oP7T5a6UUCnnvdPZ7".to_string(),
            social: SocialLinks::default(),
            contact: ContactInfo::default(),
        }
    }
}

impl SiteConfig {
    pub fn config_path() -> NyxResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| NyxError::Config("Could not determine config directory".into()))?
            .join("nyx");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the layered configuration. A missing file is not an error.
    pub fn load(path: Option<&Path>) -> NyxResult<Self> {
        Self::load_with(path, Self::environment())
    }

    /// `NYX_` variables, `__` between nested keys.
    fn environment() -> Environment {
        Environment::with_prefix("NYX")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn load_with(path: Option<&Path>, environment: Environment) -> NyxResult<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        // Seed with the defaults so partially specified tables are filled in
        let defaults =
            Config::try_from(&SiteConfig::default()).map_err(|e| NyxError::Config(e.to_string()))?;

        let config: SiteConfig = Config::builder()
            .add_source(defaults)
            .add_source(File::from(path).required(false))
            .add_source(environment)
            .build()
            .map_err(|e| NyxError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| NyxError::Config(e.to_string()))?;

        config.timezone()?;
        Ok(config)
    }

    /// The reference timezone.
    pub fn timezone(&self) -> NyxResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| NyxError::Config(format!("Unknown timezone '{}': {}", self.timezone, e)))
    }

    pub fn expand_options(&self) -> NyxResult<ExpandOptions> {
        Ok(ExpandOptions {
            max_occurrences: self.max_occurrences,
            tz: self.timezone()?,
        })
    }

    /// The effective configuration as TOML.
    pub fn to_toml(&self) -> NyxResult<String> {
        toml::to_string_pretty(self).map_err(|e| NyxError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_isolated(path: &Path, vars: &[(&str, &str)]) -> NyxResult<SiteConfig> {
        let vars: ::config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        SiteConfig::load_with(Some(path), SiteConfig::environment().source(Some(vars)))
    }

    fn temp_config(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("nyx-config-test-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("nyx-config-test-definitely-missing/config.toml");
        let config = load_isolated(&path, &[]).unwrap();

        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.max_occurrences, 260);
        assert_eq!(config.timezone().unwrap(), chrono_tz::Europe::Madrid);
        assert_eq!(config.contact.address.city, "Madrid");
    }

    #[test]
    fn file_overrides_nested_values() {
        let path = temp_config(
            "override",
            r#"
api_base_url = "http://localhost:1337"
max_occurrences = 52

[contact]
email = "hola@example.com"
"#,
        );

        let config = load_isolated(&path, &[]).unwrap();

        assert_eq!(config.api_base_url, "http://localhost:1337");
        assert_eq!(config.max_occurrences, 52);
        assert_eq!(config.contact.email, "hola@example.com");
        // Untouched nested values keep their defaults
        assert_eq!(config.contact.phone, "+34 602 08 30 14");
        assert_eq!(config.social, SocialLinks::default());
    }

    #[test]
    fn unknown_timezone_is_a_config_error() {
        let path = temp_config("bad-tz", "timezone = \"Mars/Olympus_Mons\"\n");
        let err = load_isolated(&path, &[]).unwrap_err();
        assert!(matches!(err, NyxError::Config(msg) if msg.contains("Mars/Olympus_Mons")));
    }

    #[test]
    fn toml_output_reloads() {
        let config = SiteConfig::default();
        let path = temp_config("roundtrip", &config.to_toml().unwrap());
        assert_eq!(load_isolated(&path, &[]).unwrap(), config);
    }

    #[test]
    fn environment_overrides_file() {
        let path = temp_config("env", "max_occurrences = 52\n");

        let config = load_isolated(
            &path,
            &[
                ("NYX_MAX_OCCURRENCES", "7"),
                ("NYX_CONTACT__EMAIL", "env@example.com"),
                ("OTHER_MAX_OCCURRENCES", "9"),
            ],
        )
        .unwrap();

        assert_eq!(config.max_occurrences, 7);
        assert_eq!(config.contact.email, "env@example.com");
        assert_eq!(config.contact.phone, "+34 602 08 30 14");
    }

    #[test]
    fn expand_options_follow_config() {
        let config = SiteConfig {
            timezone: "America/Mexico_City".to_string(),
            max_occurrences: 10,
            ..SiteConfig::default()
        };

        let options = config.expand_options().unwrap();
        assert_eq!(options.tz, chrono_tz::America::Mexico_City);
        assert_eq!(options.max_occurrences, 10);
    }
}
