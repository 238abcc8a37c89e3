//! Fixture loading and argument decoding.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use posfmt_core::{FormatError, FormatValue};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown argument type `{0}`")]
    UnknownType(String),
    #[error("value `{value}` is not a valid `{ty}`")]
    BadValue { ty: String, value: String },
    #[error("case `{0}` must set exactly one of expected_output / expected_error")]
    Expectation(String),
}

/// Argument as written in a fixture file.
///
/// Plain JSON scalars pick a natural type (`i64`, `u64`, `f64`, `bool`,
/// string). `{ "type": "u8", "value": 255 }` selects an exact type; 128-bit
/// values are written as strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawArg {
    Typed {
        #[serde(rename = "type")]
        ty: String,
        value: serde_json::Value,
    },
    Plain(serde_json::Value),
}

/// A decoded, typed argument.
#[derive(Debug, Clone, PartialEq)]
pub enum FixtureArg {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(i128),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    Usize(usize),
    F64(f64),
    Bool(bool),
    Char(char),
    Str(String),
}

fn parse_as<T: FromStr>(ty: &str, text: &str) -> Result<T, FixtureError> {
    text.trim().parse().map_err(|_| FixtureError::BadValue {
        ty: ty.to_string(),
        value: text.to_string(),
    })
}

impl FixtureArg {
    /// Parse `text` as the named type.
    pub fn parse_typed(ty: &str, text: &str) -> Result<Self, FixtureError> {
        Ok(match ty {
            "i8" => Self::I8(parse_as(ty, text)?),
            "i16" => Self::I16(parse_as(ty, text)?),
            "i32" => Self::I32(parse_as(ty, text)?),
            "i64" => Self::I64(parse_as(ty, text)?),
            "i128" => Self::I128(parse_as(ty, text)?),
            "isize" => Self::Isize(parse_as(ty, text)?),
            "u8" => Self::U8(parse_as(ty, text)?),
            "u16" => Self::U16(parse_as(ty, text)?),
            "u32" => Self::U32(parse_as(ty, text)?),
            "u64" => Self::U64(parse_as(ty, text)?),
            "u128" => Self::U128(parse_as(ty, text)?),
            "usize" => Self::Usize(parse_as(ty, text)?),
            "f64" => Self::F64(parse_as(ty, text)?),
            "bool" => Self::Bool(parse_as(ty, text)?),
            // No trimming: a space is a valid char.
            "char" => Self::Char(text.parse().map_err(|_| FixtureError::BadValue {
                ty: ty.to_string(),
                value: text.to_string(),
            })?),
            "str" | "string" => Self::Str(text.to_string()),
            other => return Err(FixtureError::UnknownType(other.to_string())),
        })
    }

    /// Parse a command-line argument: `TYPE:VALUE`, or a plain string when the
    /// prefix is not a known type name.
    pub fn parse_cli(arg: &str) -> Result<Self, FixtureError> {
        match arg.split_once(':') {
            Some((ty, value)) => match Self::parse_typed(ty, value) {
                Err(FixtureError::UnknownType(_)) => Ok(Self::Str(arg.to_string())),
                other => other,
            },
            None => Ok(Self::Str(arg.to_string())),
        }
    }

    /// Decode a fixture argument.
    pub fn from_raw(raw: &RawArg) -> Result<Self, FixtureError> {
        match raw {
            RawArg::Typed { ty, value } => {
                let text = match value {
                    serde_json::Value::String(s) => s.clone(),
                    serde_json::Value::Number(n) => n.to_string(),
                    serde_json::Value::Bool(b) => b.to_string(),
                    other => {
                        return Err(FixtureError::BadValue {
                            ty: ty.clone(),
                            value: other.to_string(),
                        });
                    }
                };
                Self::parse_typed(ty, &text)
            }
            RawArg::Plain(serde_json::Value::Number(n)) => {
                if let Some(v) = n.as_i64() {
                    Ok(Self::I64(v))
                } else if let Some(v) = n.as_u64() {
                    Ok(Self::U64(v))
                } else {
                    n.as_f64().map(Self::F64).ok_or_else(|| FixtureError::BadValue {
                        ty: "number".to_string(),
                        value: n.to_string(),
                    })
                }
            }
            RawArg::Plain(serde_json::Value::Bool(b)) => Ok(Self::Bool(*b)),
            RawArg::Plain(serde_json::Value::String(s)) => Ok(Self::Str(s.clone())),
            RawArg::Plain(other) => Err(FixtureError::BadValue {
                ty: "scalar".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

impl FormatValue for FixtureArg {
    fn append_to(&self, out: &mut String) -> Result<(), FormatError> {
        match self {
            Self::I8(v) => v.append_to(out),
            Self::I16(v) => v.append_to(out),
            Self::I32(v) => v.append_to(out),
            Self::I64(v) => v.append_to(out),
            Self::I128(v) => v.append_to(out),
            Self::Isize(v) => v.append_to(out),
            Self::U8(v) => v.append_to(out),
            Self::U16(v) => v.append_to(out),
            Self::U32(v) => v.append_to(out),
            Self::U64(v) => v.append_to(out),
            Self::U128(v) => v.append_to(out),
            Self::Usize(v) => v.append_to(out),
            Self::F64(v) => v.append_to(out),
            Self::Bool(v) => v.append_to(out),
            Self::Char(v) => v.append_to(out),
            Self::Str(v) => v.append_to(out),
        }
    }
}

/// Expected outcome of a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation<'a> {
    Output(&'a str),
    /// A `FormatError::kind_name()`.
    Error(&'a str),
}

/// A single fixture test case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureCase {
    /// Case identifier.
    pub name: String,
    pub template: String,
    #[serde(default)]
    pub args: Vec<RawArg>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_output: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_error: Option<String>,
    /// `strict`, `lenient`, or `both`.
    #[serde(default = "default_policy")]
    pub policy: String,
}

fn default_policy() -> String {
    "both".to_string()
}

impl FixtureCase {
    /// Decode all arguments.
    pub fn resolve_args(&self) -> Result<Vec<FixtureArg>, FixtureError> {
        self.args.iter().map(FixtureArg::from_raw).collect()
    }

    pub fn expectation(&self) -> Result<Expectation<'_>, FixtureError> {
        match (&self.expected_output, &self.expected_error) {
            (Some(out), None) => Ok(Expectation::Output(out)),
            (None, Some(kind)) => Ok(Expectation::Error(kind)),
            _ => Err(FixtureError::Expectation(self.name.clone())),
        }
    }
}

/// A collection of fixture cases for one family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureSet {
    /// Schema version.
    pub version: String,
    pub family: String,
    pub captured_at: String,
    pub cases: Vec<FixtureCase>,
}

impl FixtureSet {
    /// Load fixture set from JSON string.
    pub fn from_json(json: &str) -> Result<Self, FixtureError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize fixture set to JSON string.
    pub fn to_json(&self) -> Result<String, FixtureError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load fixture set from a file path.
    pub fn from_file(path: &Path) -> Result<Self, FixtureError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

/// Sorted `*.json` paths in `dir`.
pub fn fixture_paths(dir: &Path) -> Result<Vec<PathBuf>, FixtureError> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("json"))
        .collect();
    paths.sort();
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_scalars_pick_natural_types() {
        let raw: Vec<RawArg> = serde_json::from_str(r#"[-1, 18446744073709551615, 1.5, true, "s"]"#).unwrap();
        let args: Vec<FixtureArg> = raw.iter().map(|r| FixtureArg::from_raw(r).unwrap()).collect();
        assert_eq!(
            args,
            vec![
                FixtureArg::I64(-1),
                FixtureArg::U64(u64::MAX),
                FixtureArg::F64(1.5),
                FixtureArg::Bool(true),
                FixtureArg::Str("s".into()),
            ]
        );
    }

    #[test]
    fn typed_values_select_exact_width() {
        let raw: RawArg = serde_json::from_str(r#"{"type": "i8", "value": -128}"#).unwrap();
        assert_eq!(FixtureArg::from_raw(&raw).unwrap(), FixtureArg::I8(i8::MIN));

        let raw: RawArg =
            serde_json::from_str(r#"{"type": "u128", "value": "340282366920938463463374607431768211455"}"#)
                .unwrap();
        assert_eq!(FixtureArg::from_raw(&raw).unwrap(), FixtureArg::U128(u128::MAX));
    }

    #[test]
    fn typed_value_out_of_range_is_rejected() {
        let raw: RawArg = serde_json::from_str(r#"{"type": "u8", "value": 256}"#).unwrap();
        assert!(matches!(
            FixtureArg::from_raw(&raw),
            Err(FixtureError::BadValue { .. })
        ));
    }

    #[test]
    fn unknown_type_is_rejected() {
        assert!(matches!(
            FixtureArg::parse_typed("u256", "1"),
            Err(FixtureError::UnknownType(t)) if t == "u256"
        ));
    }

    #[test]
    fn cli_arguments() {
        assert_eq!(FixtureArg::parse_cli("i16:-300").unwrap(), FixtureArg::I16(-300));
        assert_eq!(FixtureArg::parse_cli("char: ").unwrap(), FixtureArg::Char(' '));
        assert_eq!(FixtureArg::parse_cli("hello").unwrap(), FixtureArg::Str("hello".into()));
        assert_eq!(
            FixtureArg::parse_cli("key:value").unwrap(),
            FixtureArg::Str("key:value".into())
        );
        assert!(FixtureArg::parse_cli("u8:-1").is_err());
    }

    #[test]
    fn fixture_args_render() {
        let args = [
            FixtureArg::I128(i128::MIN),
            FixtureArg::Char('x'),
            FixtureArg::Str("y".into()),
        ];
        assert_eq!(
            posfmt_core::format("{0}|{1}|{2}", args.as_slice()).unwrap(),
            format!("{}|x|y", i128::MIN)
        );
    }

    #[test]
    fn expectation_requires_exactly_one() {
        let mut case = FixtureCase {
            name: "c".into(),
            template: "{0}".into(),
            args: vec![],
            expected_output: Some("x".into()),
            expected_error: Some("Render".into()),
            policy: default_policy(),
        };
        assert!(case.expectation().is_err());
        case.expected_error = None;
        assert_eq!(case.expectation().unwrap(), Expectation::Output("x"));
    }

    #[test]
    fn fixture_set_roundtrips_through_json() {
        let json = r#"{
            "version": "1",
            "family": "demo",
            "captured_at": "2026-01-01T00:00:00Z",
            "cases": [
                {"name": "hello", "template": "{1} {0}!", "args": ["world", "hello"], "expected_output": "hello world!"}
            ]
        }"#;
        let set = FixtureSet::from_json(json).unwrap();
        assert_eq!(set.cases[0].policy, "both");
        let again = FixtureSet::from_json(&set.to_json().unwrap()).unwrap();
        assert_eq!(again.cases[0].template, "{1} {0}!");
    }
}
