//! # Secret Payload Resolution
//!
//! Turns the optional `secret_value` argument into the string sent to the
//! service.
//!
//! Values ending in `.json` are treated as paths: the file is parsed and
//! re-encoded as a single line of JSON with `", "` / `": "` separators, keys
//! in file order and non-ASCII characters escaped as `\uXXXX`. Anything else
//! is passed through unchanged.

use crate::constants::JSON_FILE_SUFFIX;
use serde::Serialize;
use serde_json::ser::Formatter;
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;
use tracing::debug;
use zeroize::Zeroizing;

/// Secret payload, wiped from memory on drop
pub type SecretValue = Zeroizing<String>;

/// Errors raised while resolving a payload file
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("File {path} not found.")]
    NotFound { path: String },

    #[error("Failed to read file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("File {path} is not valid JSON: {source}")]
    InvalidJson {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode JSON from {path}: {source}")]
    Encode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Whether a value names a JSON payload file
pub fn is_json_file_reference(value: &str) -> bool {
    value.ends_with(JSON_FILE_SUFFIX)
}

/// Resolve the optional command-line value into the payload to send
///
/// # Errors
///
/// Returns a [`PayloadError`] when the value names a JSON file that is
/// missing, unreadable or not valid JSON.
pub fn resolve_secret_value(value: Option<&str>) -> Result<Option<SecretValue>, PayloadError> {
    match value {
        Some(value) if is_json_file_reference(value) => load_json_file(value).map(Some),
        Some(value) => Ok(Some(Zeroizing::new(value.to_string()))),
        None => Ok(None),
    }
}

/// Read a JSON file and re-encode it as a single-line string
///
/// # Errors
///
/// See [`resolve_secret_value`].
pub fn load_json_file(path: &str) -> Result<SecretValue, PayloadError> {
    let contents = match std::fs::read_to_string(Path::new(path)) {
        Ok(contents) => Zeroizing::new(contents),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(PayloadError::NotFound {
                path: path.to_string(),
            });
        }
        Err(source) => {
            return Err(PayloadError::Read {
                path: path.to_string(),
                source,
            });
        }
    };

    let parsed: serde_json::Value =
        serde_json::from_str(&contents).map_err(|source| PayloadError::InvalidJson {
            path: path.to_string(),
            source,
        })?;

    let encoded = encode_json(&parsed).map_err(|source| PayloadError::Encode {
        path: path.to_string(),
        source,
    })?;
    debug!(path = path, bytes = encoded.len(), "Loaded secret payload from JSON file");
    Ok(encoded)
}

/// Encode a JSON value on one line with spaced separators and ASCII-only output
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn encode_json(value: &serde_json::Value) -> Result<SecretValue, serde_json::Error> {
    let mut out = Zeroizing::new(Vec::<u8>::new());
    let mut serializer = serde_json::Serializer::with_formatter(&mut *out, SpacedAsciiFormatter);
    value.serialize(&mut serializer)?;
    // Every byte written is ASCII
    Ok(Zeroizing::new(String::from_utf8_lossy(&out).into_owned()))
}

/// `", "` and `": "` separators, non-ASCII and DEL escaped as UTF-16 `\uXXXX` units
#[derive(Debug, Clone, Copy, Default)]
struct SpacedAsciiFormatter;

impl Formatter for SpacedAsciiFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if fragment.bytes().all(|b| b.is_ascii() && b != 0x7f) {
            return writer.write_all(fragment.as_bytes());
        }

        let mut utf8 = [0u8; 4];
        let mut utf16 = [0u16; 2];
        for ch in fragment.chars() {
            if ch.is_ascii() && ch != '\x7f' {
                writer.write_all(ch.encode_utf8(&mut utf8).as_bytes())?;
            } else {
                for unit in ch.encode_utf16(&mut utf16) {
                    write!(writer, "\\u{unit:04x}")?;
                }
            }
        }
        Ok(())
    }
}
