//! String-keyed configuration maps
//!
//! Module options travel as string->string maps; values parse through the
//! natural textual representation of their type. Boolean flags also accept
//! a `no-<name>` key to force false. Each module owns an explicit typed
//! configuration struct with `Default` providing the process-level
//! defaults; there is no global mutable state.

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::DecodingError;

pub type ConfigMap = BTreeMap<String, String>;

/// Parse `name` from the map if present; type errors name the option.
pub fn parse_option<T: FromStr>(
    map: &ConfigMap,
    module: &'static str,
    name: &str,
) -> Result<Option<T>, DecodingError> {
    match map.get(name) {
        None => Ok(None),
        Some(raw) => raw.parse::<T>().map(Some).map_err(|_| {
            DecodingError::config(module, format!("cannot parse option {}={:?}", name, raw))
        }),
    }
}

/// Boolean option: `name` (empty value or true/false/1/0) sets it, and a
/// `no-<name>` key forces false. `no-<name>` wins when both appear.
pub fn parse_bool_option(
    map: &ConfigMap,
    module: &'static str,
    name: &str,
) -> Result<Option<bool>, DecodingError> {
    if map.contains_key(&format!("no-{}", name)) {
        return Ok(Some(false));
    }
    match map.get(name) {
        None => Ok(None),
        Some(raw) => match raw.as_str() {
            "" | "1" | "true" => Ok(Some(true)),
            "0" | "false" => Ok(Some(false)),
            other => Err(DecodingError::config(
                module,
                format!("cannot parse boolean option {}={:?}", name, other),
            )),
        },
    }
}

pub fn save_option(map: &mut ConfigMap, name: &str, value: impl ToString) {
    map.insert(name.to_string(), value.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_option() {
        let mut map = ConfigMap::new();
        map.insert("p".into(), "4".into());
        assert_eq!(parse_option::<u32>(&map, "test", "p").unwrap(), Some(4));
        assert_eq!(parse_option::<u32>(&map, "test", "l").unwrap(), None);
        map.insert("p".into(), "four".into());
        assert!(parse_option::<u32>(&map, "test", "p").is_err());
    }

    #[test]
    fn test_bool_option_forms() {
        let mut map = ConfigMap::new();
        assert_eq!(parse_bool_option(&map, "t", "verifysolution").unwrap(), None);
        map.insert("verifysolution".into(), "".into());
        assert_eq!(parse_bool_option(&map, "t", "verifysolution").unwrap(), Some(true));
        map.insert("no-verifysolution".into(), "".into());
        assert_eq!(parse_bool_option(&map, "t", "verifysolution").unwrap(), Some(false));
    }
}
