use std::fs;
use std::path::Path;
use std::str::FromStr;

use ::ini::{Ini, ParseOption, Properties};

use crate::error::ConfigError;

/// Section whose keys are visible from every other section.
pub const DEFAULT_SECTION: &str = "default";

/// Sectioned key/value configuration backed by `rust-ini`.
///
/// Accepts `[section]` headers, `key = value` or `key: value` pairs and
/// full-line `#` / `;` comments. Keys and section names are matched
/// case-insensitively; values keep their case and are taken verbatim
/// (no quote stripping or escapes). Keys in `[DEFAULT]` act as fallbacks
/// for every section. Keys outside a section, repeated sections and
/// repeated keys are rejected at load time.
#[derive(Debug, Clone)]
pub struct IniConfig {
    ini: Ini,
}

impl IniConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        text.parse()
    }

    pub fn has_section(&self, section: &str) -> bool {
        !section.eq_ignore_ascii_case(DEFAULT_SECTION) && self.section(section).is_some()
    }

    /// Raw value, `None` when the key is absent from both the section and
    /// `[DEFAULT]`.
    pub fn get(&self, section: &str, key: &str) -> Result<Option<&str>, ConfigError> {
        let props = self
            .section(section)
            .ok_or_else(|| ConfigError::MissingSection(section.to_string()))?;
        Ok(lookup(props, key).or_else(|| {
            self.section(DEFAULT_SECTION).and_then(|defaults| lookup(defaults, key))
        }))
    }

    pub fn get_string(&self, section: &str, key: &str) -> Result<String, ConfigError> {
        self.get(section, key)?
            .map(str::to_string)
            .ok_or_else(|| ConfigError::MissingKey {
                section: section.to_string(),
                key: key.to_string(),
            })
    }

    pub fn get_float(&self, section: &str, key: &str) -> Result<f64, ConfigError> {
        let value: f64 = self.parse_value(section, key, "a number")?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(invalid(section, key, &value.to_string(), "a finite number"))
        }
    }

    pub fn get_int(&self, section: &str, key: &str) -> Result<i64, ConfigError> {
        self.parse_value(section, key, "an integer")
    }

    fn section(&self, name: &str) -> Option<&Properties> {
        self.ini.iter().find_map(|(section, props)| match section {
            Some(s) if s.eq_ignore_ascii_case(name) => Some(props),
            _ => None,
        })
    }

    fn parse_value<T: FromStr>(
        &self,
        section: &str,
        key: &str,
        expected: &'static str,
    ) -> Result<T, ConfigError> {
        let raw = self.get_string(section, key)?;
        raw.parse().map_err(|_| invalid(section, key, &raw, expected))
    }
}

fn lookup<'a>(props: &'a Properties, key: &str) -> Option<&'a str> {
    props.iter().find_map(|(k, v)| k.eq_ignore_ascii_case(key).then_some(v))
}

fn invalid(section: &str, key: &str, value: &str, expected: &'static str) -> ConfigError {
    ConfigError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        expected,
    }
}

fn parse_options() -> ParseOption {
    ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..ParseOption::default()
    }
}

/// Reject what `rust-ini` tolerates but a strict INI reader does not.
fn check_structure(ini: &Ini) -> Result<(), ConfigError> {
    let mut sections: Vec<String> = Vec::new();

    for (name, props) in ini.iter() {
        let Some(name) = name else {
            // Keys before the first header land in the unnamed section
            if let Some((key, _)) = props.iter().next() {
                return Err(ConfigError::MissingSectionHeader { key: key.to_string() });
            }
            continue;
        };

        let name = name.to_ascii_lowercase();
        if sections.contains(&name) {
            return Err(ConfigError::DuplicateSection(name));
        }

        let mut keys: Vec<String> = Vec::new();
        for (key, _) in props.iter() {
            let key = key.to_ascii_lowercase();
            if keys.contains(&key) {
                return Err(ConfigError::DuplicateKey { section: name, key });
            }
            keys.push(key);
        }
        sections.push(name);
    }

    Ok(())
}

impl FromStr for IniConfig {
    type Err = ConfigError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let ini = Ini::load_from_str_opt(text, parse_options()).map_err(|e| ConfigError::Syntax {
            line: e.line,
            message: e.msg.to_string(),
        })?;
        check_structure(&ini)?;
        Ok(IniConfig { ini })
    }
}
