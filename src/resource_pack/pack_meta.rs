//! `pack.mcmeta` parsing and pack format versions.

use crate::error::{EditorError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// A `pack_format` number and the game versions that accept it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackFormat {
    /// Human-readable game version range, e.g. "1.16.2-1.16.5".
    pub versions: &'static str,
    /// Value written to `pack.pack_format`.
    pub format: u32,
    first: [u32; 3],
    last: [u32; 3],
}

/// Known pack formats, oldest first.
pub const PACK_FORMATS: &[PackFormat] = &[
    PackFormat {
        versions: "1.6.1-1.8.9",
        format: 1,
        first: [1, 6, 1],
        last: [1, 8, 9],
    },
    PackFormat {
        versions: "1.9-1.10.2",
        format: 2,
        first: [1, 9, 0],
        last: [1, 10, 2],
    },
    PackFormat {
        versions: "1.11-1.12.2",
        format: 3,
        first: [1, 11, 0],
        last: [1, 12, 2],
    },
    PackFormat {
        versions: "1.13-1.14.4",
        format: 4,
        first: [1, 13, 0],
        last: [1, 14, 4],
    },
    PackFormat {
        versions: "1.15-1.16.1",
        format: 5,
        first: [1, 15, 0],
        last: [1, 16, 1],
    },
    PackFormat {
        versions: "1.16.2-1.16.5",
        format: 6,
        first: [1, 16, 2],
        last: [1, 16, 5],
    },
    PackFormat {
        versions: "1.17.x",
        format: 7,
        first: [1, 17, 0],
        last: [1, 17, u32::MAX],
    },
    PackFormat {
        versions: "1.18.x",
        format: 8,
        first: [1, 18, 0],
        last: [1, 18, u32::MAX],
    },
];

impl PackFormat {
    /// The newest known format.
    pub fn latest() -> &'static PackFormat {
        &PACK_FORMATS[PACK_FORMATS.len() - 1]
    }

    pub fn from_number(format: u32) -> Option<&'static PackFormat> {
        PACK_FORMATS.iter().find(|f| f.format == format)
    }

    pub fn from_versions(label: &str) -> Option<&'static PackFormat> {
        PACK_FORMATS.iter().find(|f| f.versions.eq_ignore_ascii_case(label))
    }

    /// The format accepted by a specific game version, e.g. "1.16.5".
    pub fn for_game_version(version: &str) -> Option<&'static PackFormat> {
        let version = parse_game_version(version)?;
        PACK_FORMATS
            .iter()
            .find(|f| f.first <= version && version <= f.last)
    }

    /// Resolve a format number, a version range label or a game version.
    pub fn parse(input: &str) -> Result<&'static PackFormat> {
        let input = input.trim();
        input
            .parse::<u32>()
            .ok()
            .and_then(Self::from_number)
            .or_else(|| Self::from_versions(input))
            .or_else(|| Self::for_game_version(input))
            .ok_or_else(|| EditorError::UnknownPackFormat(input.to_string()))
    }
}

fn parse_game_version(version: &str) -> Option<[u32; 3]> {
    let mut parts = [0u32; 3];
    let mut count = 0;

    for (i, part) in version.split('.').enumerate() {
        if i >= 3 {
            return None;
        }
        parts[i] = part.parse().ok()?;
        count += 1;
    }

    if count < 2 {
        return None;
    }
    Some(parts)
}

/// The `pack` object of a `pack.mcmeta` file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackMetadata {
    pub pack_format: u32,
    /// Plain string or text component.
    #[serde(default)]
    pub description: Value,
}

impl PackMetadata {
    /// Description flattened to plain text.
    pub fn description_text(&self) -> String {
        component_text(&self.description)
    }
}

fn component_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(parts) => parts.iter().map(component_text).collect(),
        Value::Object(object) => {
            let mut text = object
                .get("text")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            if let Some(extra) = object.get("extra") {
                text.push_str(&component_text(extra));
            }
            text
        }
        _ => String::new(),
    }
}

/// Parse the contents of a `pack.mcmeta` file.
pub fn parse_pack_mcmeta(contents: &str) -> std::result::Result<PackMetadata, serde_json::Error> {
    #[derive(Deserialize)]
    struct McMeta {
        pack: PackMetadata,
    }

    let meta: McMeta = serde_json::from_str(contents)?;
    Ok(meta.pack)
}

pub(crate) fn pack_mcmeta_document(format: &PackFormat, description: &str) -> Value {
    json!({
        "pack": {
            "pack_format": format.format,
            "description": description
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(PackFormat::latest().format, 8);
        assert_eq!(PackFormat::from_number(3).unwrap().versions, "1.11-1.12.2");
        assert_eq!(PackFormat::from_versions("1.17.X").unwrap().format, 7);
        assert!(PackFormat::from_number(42).is_none());
    }

    #[test]
    fn test_for_game_version() {
        assert_eq!(PackFormat::for_game_version("1.8.9").unwrap().format, 1);
        assert_eq!(PackFormat::for_game_version("1.9").unwrap().format, 2);
        assert_eq!(PackFormat::for_game_version("1.16.1").unwrap().format, 5);
        assert_eq!(PackFormat::for_game_version("1.16.5").unwrap().format, 6);
        assert_eq!(PackFormat::for_game_version("1.18.2").unwrap().format, 8);
        assert!(PackFormat::for_game_version("1.5.2").is_none());
        assert!(PackFormat::for_game_version("1").is_none());
        assert!(PackFormat::for_game_version("latest").is_none());
    }

    #[test]
    fn test_parse() {
        assert_eq!(PackFormat::parse("6").unwrap().format, 6);
        assert_eq!(PackFormat::parse("1.13-1.14.4").unwrap().format, 4);
        assert_eq!(PackFormat::parse(" 1.17.1 ").unwrap().format, 7);
        assert!(matches!(
            PackFormat::parse("99"),
            Err(EditorError::UnknownPackFormat(_))
        ));
    }

    #[test]
    fn test_parse_pack_mcmeta() {
        let meta =
            parse_pack_mcmeta(r#"{"pack":{"pack_format":6,"description":"Hello"}}"#).unwrap();
        assert_eq!(meta.pack_format, 6);
        assert_eq!(meta.description_text(), "Hello");

        let meta = parse_pack_mcmeta(
            r#"{"pack":{"pack_format":8,"description":[{"text":"A"},{"text":"B","extra":["C"]}]}}"#,
        )
        .unwrap();
        assert_eq!(meta.description_text(), "ABC");

        let meta = parse_pack_mcmeta(r#"{"pack":{"pack_format":1}}"#).unwrap();
        assert_eq!(meta.description_text(), "");
    }
}
