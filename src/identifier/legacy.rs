//! Adapters for the two older identifier formats.
//!
//! * bracketed: `[engine:ENGINE_ID]/[class:org.example.Outer]/[class:Inner]/[method:m()]`
//! * flat: `ENGINE_ID:org.example.Outer$Inner#m()`
//!
//! Neither is accepted by [`Identifier::parse`]. Callers holding persisted
//! legacy text convert it here explicitly. The flat form cannot tell a nested
//! container apart from a class whose binary name contains `$`, so
//! [`parse_flat`] always produces a single container segment for the class
//! part and [`to_flat`] is a display rendering only.

use super::{Identifier, SegmentType};
use crate::error::IdentifierError;

const CLASS_SEPARATOR: char = '#';
const NESTING_SEPARATOR: char = '$';

fn legacy_segment_type(tag: &str) -> Option<SegmentType> {
    match tag {
        "engine" => Some(SegmentType::Engine),
        "class" | "nested-class" | "container" => Some(SegmentType::Container),
        "method" | "executable" => Some(SegmentType::Executable),
        _ => None,
    }
}

fn legacy_tag(segment_type: SegmentType) -> &'static str {
    match segment_type {
        SegmentType::Engine => "engine",
        SegmentType::Container => "class",
        SegmentType::Executable => "method",
    }
}

pub fn parse_bracketed(text: &str) -> Result<Identifier, IdentifierError> {
    let inner = text
        .strip_prefix('[')
        .and_then(|t| t.strip_suffix(']'))
        .ok_or_else(|| IdentifierError::malformed(text, "expected '[type:value]' segments"))?;

    let mut parts = inner.split("]/[");
    let root = parts.next().unwrap_or_default();
    let engine_id = root
        .strip_prefix("engine:")
        .ok_or_else(|| IdentifierError::malformed(text, "first segment must be the engine"))?;

    let mut identifier = Identifier::for_engine(engine_id)
        .map_err(|e| IdentifierError::malformed(text, e.to_string()))?;

    for part in parts {
        let (tag, value) = part.split_once(':').ok_or_else(|| {
            IdentifierError::malformed(text, format!("segment '{part}' has no type tag"))
        })?;
        let segment_type = legacy_segment_type(tag).ok_or_else(|| {
            IdentifierError::malformed(text, format!("unknown segment type '{tag}'"))
        })?;
        identifier = identifier
            .append(segment_type, value)
            .map_err(|e| IdentifierError::malformed(text, e.to_string()))?;
    }

    Ok(identifier)
}

pub fn parse_flat(text: &str) -> Result<Identifier, IdentifierError> {
    let (engine_id, rest) = text
        .split_once(':')
        .ok_or_else(|| IdentifierError::malformed(text, "expected 'engine:class'"))?;

    let root = Identifier::for_engine(engine_id)
        .map_err(|e| IdentifierError::malformed(text, e.to_string()))?;

    let (class_name, executable) = match rest.split_once(CLASS_SEPARATOR) {
        Some((class_name, executable)) => (class_name, Some(executable)),
        None => (rest, None),
    };

    let mut identifier = root
        .append_container(class_name)
        .map_err(|e| IdentifierError::malformed(text, e.to_string()))?;
    if let Some(executable) = executable {
        identifier = identifier
            .append(SegmentType::Executable, executable)
            .map_err(|e| IdentifierError::malformed(text, e.to_string()))?;
    }

    Ok(identifier)
}

pub fn to_bracketed(identifier: &Identifier) -> String {
    identifier
        .segments()
        .into_iter()
        .map(|s| format!("[{}:{}]", legacy_tag(s.segment_type()), s.value()))
        .collect::<Vec<_>>()
        .join("/")
}

pub fn to_flat(identifier: &Identifier) -> String {
    let mut containers = Vec::new();
    let mut executable = None;
    for segment in identifier.segments().into_iter().skip(1) {
        match segment.segment_type() {
            SegmentType::Executable => executable = Some(segment.value()),
            _ => containers.push(segment.value()),
        }
    }

    let mut out = identifier.engine_id().to_string();
    if !containers.is_empty() {
        out.push(':');
        out.push_str(&containers.join(&NESTING_SEPARATOR.to_string()));
    }
    if let Some(executable) = executable {
        out.push(CLASS_SEPARATOR);
        out.push_str(executable);
    }
    out
}
