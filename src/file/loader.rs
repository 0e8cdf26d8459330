//! Document loading functionality.
//!
//! This module loads YAML or JSON documents from files or stdin and converts
//! them into `Value` trees the generator can walk. JSON is read through the
//! YAML parser, JSON Lines files become a sequence of their lines, and gzipped
//! input is decompressed transparently.

use crate::value::node::{Key, Value};
use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_yaml::Value as YamlValue;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// How plain document data is mapped onto richer value kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadOptions {
    /// Turn string mapping keys into symbols (`h[:name]` instead of `h['name']`)
    pub symbolize_keys: bool,
    /// Turn RFC 3339 strings into timestamps and `YYYY-MM-DD` strings into dates
    pub detect_dates: bool,
}

/// Loads and parses a YAML, JSON or JSON Lines file from the filesystem.
///
/// # Examples
///
/// ```no_run
/// use assertgen::file::loader::{load_value_file, LoadOptions};
///
/// let value = load_value_file("fixtures/response.json", &LoadOptions::default()).unwrap();
/// ```
///
/// # Errors
///
/// This function will return an error if:
/// - The file path does not exist or cannot be read
/// - A `.gz` file is not valid gzip data
/// - The contents are not valid YAML/JSON, or use unsupported mapping keys
pub fn load_value_file<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<Value> {
    let path_ref = path.as_ref();

    let is_gzipped = path_ref
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    let content = if is_gzipped {
        read_gzipped_file(path_ref)?
    } else {
        fs::read_to_string(path_ref).context("Failed to read file")?
    };

    debug!(path = %path_ref.display(), bytes = content.len(), "loaded document");

    if determine_jsonl_format(path_ref) {
        parse_jsonl_content(&content, options)
    } else {
        parse_value_str(&content, options)
            .with_context(|| format!("Failed to parse {}", path_ref.display()))
    }
}

/// Loads and parses a document from standard input.
///
/// Gzipped input is detected by its magic bytes. Regular YAML/JSON is tried
/// first, then JSON Lines.
pub fn load_value_from_stdin(options: &LoadOptions) -> Result<Value> {
    use std::io::{self, Read};

    let mut buffer = Vec::new();
    io::stdin()
        .read_to_end(&mut buffer)
        .context("Failed to read from stdin")?;

    let content = if buffer.starts_with(&[0x1f, 0x8b]) {
        decompress_gzip_bytes(&buffer)?
    } else {
        String::from_utf8(buffer).context("Invalid UTF-8 in stdin")?
    };

    if let Ok(value) = parse_value_str(&content, options) {
        return Ok(value);
    }

    parse_jsonl_content(&content, options)
        .context("Failed to parse stdin: input is neither valid YAML/JSON nor valid JSON Lines")
}

/// Parses a YAML (or JSON) stream.
///
/// A single document is returned as-is, several documents become a sequence,
/// and an empty stream is `Null`.
///
/// # Example
///
/// ```
/// use assertgen::file::loader::{parse_value_str, LoadOptions};
/// use assertgen::value::node::{Key, Value};
///
/// let options = LoadOptions { symbolize_keys: true, ..LoadOptions::default() };
/// let value = parse_value_str("a: 100\ns: Hello\n", &options).unwrap();
/// assert_eq!(
///     value,
///     Value::mapping([(Key::symbol("a"), Value::Integer(100)), (Key::symbol("s"), Value::from("Hello"))])
/// );
/// ```
pub fn parse_value_str(content: &str, options: &LoadOptions) -> Result<Value> {
    let mut documents = Vec::new();
    for document in serde_yaml::Deserializer::from_str(content) {
        let raw = YamlValue::deserialize(document).context("Invalid YAML document")?;
        documents.push(convert_yaml_value(raw, options)?);
    }

    debug!(documents = documents.len(), "parsed document stream");

    Ok(match documents.len() {
        0 => Value::Null,
        1 => documents.pop().unwrap_or(Value::Null),
        _ => Value::Sequence(documents),
    })
}

/// Parses JSON Lines content into a sequence, one element per line.
///
/// Blank lines are skipped.
pub fn parse_jsonl_content(content: &str, options: &LoadOptions) -> Result<Value> {
    let mut lines = Vec::new();

    for (line_num, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let raw: YamlValue = serde_yaml::from_str(line)
            .with_context(|| format!("Invalid JSON on line {}", line_num + 1))?;
        lines.push(convert_yaml_value(raw, options)?);
    }

    if lines.is_empty() {
        anyhow::bail!("No valid JSON found in JSON Lines content");
    }

    Ok(Value::Sequence(lines))
}

/// Converts a parsed YAML value into a `Value` tree.
///
/// Recognised tags: `!set` (mapping keys or sequence items become a set),
/// `!symbol` / `!ruby/symbol`, `!decimal`, and `!range` (two-element
/// sequence). Other tags are ignored.
pub fn convert_yaml_value(raw: YamlValue, options: &LoadOptions) -> Result<Value> {
    Ok(match raw {
        YamlValue::Null => Value::Null,
        YamlValue::Bool(b) => Value::Bool(b),
        YamlValue::Number(n) => convert_number(&n),
        YamlValue::String(s) => convert_string(s, options),
        YamlValue::Sequence(items) => Value::Sequence(
            items
                .into_iter()
                .map(|item| convert_yaml_value(item, options))
                .collect::<Result<_>>()?,
        ),
        YamlValue::Mapping(mapping) => {
            let mut map = IndexMap::with_capacity(mapping.len());
            for (key, value) in mapping {
                map.insert(convert_key(key, options)?, convert_yaml_value(value, options)?);
            }
            Value::Mapping(map)
        }
        YamlValue::Tagged(tagged) => {
            let tag = tag_name(&tagged.tag.to_string());
            convert_tagged(&tag, tagged.value, options)?
        }
    })
}

fn convert_number(n: &serde_yaml::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Integer(i128::from(i))
    } else if let Some(u) = n.as_u64() {
        Value::Integer(i128::from(u))
    } else {
        Value::Float(n.as_f64().unwrap_or(f64::NAN))
    }
}

fn convert_string(s: String, options: &LoadOptions) -> Value {
    if options.detect_dates {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&s) {
            return Value::DateTime(dt);
        }
        if let Ok(d) = NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
            return Value::Date(d);
        }
    }
    Value::String(s)
}

fn convert_key(key: YamlValue, options: &LoadOptions) -> Result<Key> {
    Ok(match key {
        YamlValue::String(s) if options.symbolize_keys => Key::Symbol(s),
        YamlValue::String(s) => Key::String(s),
        YamlValue::Bool(b) => Key::String(b.to_string()),
        YamlValue::Number(n) => match convert_number(&n) {
            Value::Integer(i) => Key::Integer(i),
            _ => Key::String(n.to_string()),
        },
        YamlValue::Tagged(tagged) if is_symbol_tag(&tag_name(&tagged.tag.to_string())) => {
            match tagged.value {
                YamlValue::String(s) => Key::Symbol(s),
                other => anyhow::bail!("Symbol key must be a string, got {:?}", other),
            }
        }
        other => anyhow::bail!("Unsupported mapping key: {:?}", other),
    })
}

fn convert_tagged(tag: &str, inner: YamlValue, options: &LoadOptions) -> Result<Value> {
    match (tag, inner) {
        ("set", YamlValue::Mapping(mapping)) => Ok(Value::Set(
            mapping
                .into_iter()
                .map(|(key, _)| convert_yaml_value(key, options))
                .collect::<Result<_>>()?,
        )),
        ("set", YamlValue::Sequence(items)) => Ok(Value::Set(
            items
                .into_iter()
                .map(|item| convert_yaml_value(item, options))
                .collect::<Result<_>>()?,
        )),
        (tag, YamlValue::String(s)) if is_symbol_tag(tag) => Ok(Value::Symbol(s)),
        ("decimal", YamlValue::String(s)) => Decimal::from_str(s.trim())
            .map(Value::Decimal)
            .with_context(|| format!("Invalid decimal: {}", s)),
        ("decimal", YamlValue::Number(n)) => {
            let text = n.to_string();
            Decimal::from_str(&text)
                .or_else(|_| Decimal::from_scientific(&text))
                .map(Value::Decimal)
                .with_context(|| format!("Invalid decimal: {}", n))
        }
        ("range", YamlValue::Sequence(bounds)) => {
            let [first, last]: [YamlValue; 2] = bounds
                .try_into()
                .map_err(|b: Vec<YamlValue>| {
                    anyhow::anyhow!("!range needs exactly two bounds, got {}", b.len())
                })?;
            Ok(Value::range(
                convert_yaml_value(first, options)?,
                convert_yaml_value(last, options)?,
            ))
        }
        (_, inner) => convert_yaml_value(inner, options),
    }
}

/// Normalises `!set`, `!!set` and `tag:yaml.org,2002:set` to `set`.
fn tag_name(raw: &str) -> String {
    let name = raw.trim_start_matches('!');
    let name = name.strip_prefix("tag:yaml.org,2002:").unwrap_or(name);
    name.to_string()
}

fn is_symbol_tag(tag: &str) -> bool {
    matches!(tag, "symbol" | "sym" | "ruby/symbol" | "ruby/sym")
}

/// Determines if file is JSON Lines based on filename.
///
/// Checks for .jsonl or .ndjson extension, handling .gz suffix correctly.
fn determine_jsonl_format<P: AsRef<Path>>(path: P) -> bool {
    let path_str = path.as_ref().to_string_lossy();

    let base = if let Some(stripped) = path_str.strip_suffix(".gz") {
        stripped
    } else {
        &path_str
    };

    base.ends_with(".jsonl") || base.ends_with(".ndjson")
}

/// Reads and decompresses a gzipped file.
fn read_gzipped_file<P: AsRef<Path>>(path: P) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let file = fs::File::open(path).context("Failed to open gzipped file")?;
    let mut decoder = GzDecoder::new(file);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped file - file may be corrupted")?;
    Ok(content)
}

/// Decompresses gzip-encoded bytes to a UTF-8 string.
fn decompress_gzip_bytes(bytes: &[u8]) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let mut decoder = GzDecoder::new(bytes);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped stdin")?;
    Ok(content)
}
