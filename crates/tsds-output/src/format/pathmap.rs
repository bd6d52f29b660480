use std::collections::HashMap;

use tsds_counter::error::{Result, TsdsError};

/// Split a sensor string `"alias /resource/path"` into `(alias, path)`.
pub fn parse_sensor(sensor: &str) -> Result<(&str, &str)> {
    let mut parts = sensor.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(alias), Some(path), None) => Ok((alias, path)),
        _ => Err(TsdsError::InvalidConfig(format!(
            "malformed sensor {sensor:?}; expected \"alias /resource/path\""
        ))),
    }
}

/// Resource path (tag or field name) -> TSDS alias.
#[derive(Debug, Clone, Default)]
pub struct PathMap {
    by_path: HashMap<String, String>,
}

impl PathMap {
    pub fn from_sensors(sensors: &[String]) -> Result<Self> {
        let mut by_path = HashMap::with_capacity(sensors.len());
        for sensor in sensors {
            let (alias, path) = parse_sensor(sensor)?;
            if by_path.insert(path.to_string(), alias.to_string()).is_some() {
                return Err(TsdsError::InvalidConfig(format!(
                    "resource path {path} is listed twice in sensors"
                )));
            }
        }
        Ok(Self { by_path })
    }

    pub fn alias(&self, path: &str) -> Option<&str> {
        self.by_path.get(path).map(String::as_str)
    }

    pub fn has_alias(&self, alias: &str) -> bool {
        self.by_path.values().any(|a| a == alias)
    }

    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }
}
