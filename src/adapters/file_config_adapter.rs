//! INI file configuration adapter.

use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.trim().to_lowercase().as_str() {
            "true" | "yes" | "1" | "on" => Some(true),
            "false" | "no" | "0" | "off" => Some(false),
            _ => None,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.config
            .get(section, key)
            .as_deref()
            .and_then(Self::parse_bool)
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CHART_INI: &str = r#"
[data]
dir = /srv/prices

[chart]
code = 005930
ndays = 60
style = binance
volume = false
bollinger = yes
rsi = 1
macd = off
output = out/chart.json
"#;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn from_string_parses_config() {
        let adapter = FileConfigAdapter::from_string(CHART_INI).unwrap();
        assert_eq!(
            adapter.get_string("data", "dir"),
            Some("/srv/prices".to_string())
        );
        assert_eq!(
            adapter.get_string("chart", "code"),
            Some("005930".to_string())
        );
        assert_eq!(
            adapter.get_string("chart", "output"),
            Some("out/chart.json".to_string())
        );
    }

    #[test]
    fn get_string_returns_none_for_missing_key() {
        let adapter = FileConfigAdapter::from_string("[chart]\nndays = 30\n").unwrap();
        assert_eq!(adapter.get_string("chart", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "key"), None);
    }

    #[test]
    fn values_are_returned_as_written() {
        let adapter = FileConfigAdapter::from_string(CHART_INI).unwrap();
        assert_eq!(adapter.get_string("chart", "ndays"), Some("60".to_string()));
    }

    #[test]
    fn get_bool_accepts_common_spellings() {
        let adapter = FileConfigAdapter::from_string(CHART_INI).unwrap();
        assert!(!adapter.get_bool("chart", "volume", true));
        assert!(adapter.get_bool("chart", "bollinger", false));
        assert!(adapter.get_bool("chart", "rsi", false));
        assert!(!adapter.get_bool("chart", "macd", true));
    }

    #[test]
    fn get_bool_returns_default_for_missing_or_garbage() {
        let adapter = FileConfigAdapter::from_string("[chart]\nvolume = maybe\n").unwrap();
        assert!(adapter.get_bool("chart", "volume", true));
        assert!(!adapter.get_bool("chart", "missing", false));
    }

    #[test]
    fn from_file_reads_config() {
        let file = create_temp_config(CHART_INI);
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("chart", "style"),
            Some("binance".to_string())
        );
    }

    #[test]
    fn from_file_returns_error_for_missing_file() {
        let result = FileConfigAdapter::from_file("/nonexistent/path/config.ini");
        assert!(result.is_err());
    }
}
