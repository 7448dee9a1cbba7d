//! Dotted-path access into YAML mappings.
//!
//! Parse operations address their outputs as paths like
//! `metadata.company`; these helpers create intermediate mappings on
//! write and resolve reads without panicking.

use serde_yaml::{Mapping, Value};

/// Look up a key in a mapping by string.
pub fn get<'a>(map: &'a Mapping, key: &str) -> Option<&'a Value> {
    map.iter()
        .find(|(k, _)| k.as_str() == Some(key))
        .map(|(_, v)| v)
}

fn get_mut<'a>(map: &'a mut Mapping, key: &str) -> Option<&'a mut Value> {
    map.iter_mut()
        .find(|(k, _)| k.as_str() == Some(key))
        .map(|(_, v)| v)
}

/// Set `map[path] = value`, creating intermediate mappings as needed.
pub fn set_path(map: &mut Mapping, path: &str, value: Value) {
    match path.split_once('.') {
        None => {
            map.insert(Value::String(path.to_string()), value);
        }
        Some((head, rest)) => {
            if !matches!(get(map, head), Some(Value::Mapping(_))) {
                map.insert(
                    Value::String(head.to_string()),
                    Value::Mapping(Mapping::new()),
                );
            }
            if let Some(Value::Mapping(inner)) = get_mut(map, head) {
                set_path(inner, rest, value);
            }
        }
    }
}

/// Read the value at a dotted path, if present.
pub fn get_path<'a>(map: &'a Mapping, path: &str) -> Option<&'a Value> {
    let mut keys = path.split('.');
    let first = keys.next()?;
    let mut current = get(map, first)?;

    for key in keys {
        current = match current {
            Value::Mapping(inner) => get(inner, key)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Read the string at a dotted path, if present.
pub fn get_path_str<'a>(map: &'a Mapping, path: &str) -> Option<&'a str> {
    get_path(map, path).and_then(Value::as_str)
}
