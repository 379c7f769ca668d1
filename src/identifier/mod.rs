//! Hierarchical identifiers for testable artifacts.
//!
//! An identifier is a path of typed segments rooted at an engine:
//!
//! ```text
//! ENGINE_ID/container:org.example.ATestClass/container:Inner/executable:test4(java.lang.String)
//! ```
//!
//! The root is the bare engine id. Every other segment renders as
//! `tag:value`, with `/ : [ ] %` inside values percent-escaped.

pub mod escape;
pub mod legacy;
pub mod signature;

pub use signature::Signature;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

use crate::error::IdentifierError;

pub const SEGMENT_DELIMITER: char = '/';
pub const TAG_DELIMITER: char = ':';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentType {
    Engine,
    Container,
    Executable,
}

impl SegmentType {
    pub fn tag(&self) -> &'static str {
        match self {
            SegmentType::Engine => "engine",
            SegmentType::Container => "container",
            SegmentType::Executable => "executable",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "engine" => Some(SegmentType::Engine),
            "container" => Some(SegmentType::Container),
            "executable" => Some(SegmentType::Executable),
            _ => None,
        }
    }
}

impl fmt::Display for SegmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Segment {
    #[serde(rename = "type")]
    segment_type: SegmentType,
    value: String,
}

impl Segment {
    pub fn segment_type(&self) -> SegmentType {
        self.segment_type
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

struct Link {
    segment: Segment,
    parent: Option<Arc<Link>>,
    len: usize,
}

impl Drop for Link {
    // Unlinks iteratively so long chains cannot overflow the stack.
    fn drop(&mut self) {
        let mut parent = self.parent.take();
        while let Some(link) = parent {
            parent = match Arc::try_unwrap(link) {
                Ok(mut link) => link.parent.take(),
                Err(_) => None,
            };
        }
    }
}

/// Immutable, cheaply cloneable path of segments. Appending shares the
/// parent's segments instead of copying them.
#[derive(Clone)]
pub struct Identifier {
    tail: Arc<Link>,
}

impl Identifier {
    /// Root identifier for an engine. Engine ids are never escaped, so they
    /// may not contain reserved characters at all.
    pub fn for_engine(engine_id: impl Into<String>) -> Result<Self, IdentifierError> {
        let engine_id = engine_id.into();
        escape::validate_value(&engine_id)?;
        if let Some(c) = engine_id.chars().find(|c| escape::is_reserved(*c)) {
            return Err(IdentifierError::invalid_segment_value(
                engine_id.clone(),
                format!("engine id contains reserved character '{c}'"),
            ));
        }

        Ok(Self {
            tail: Arc::new(Link {
                segment: Segment {
                    segment_type: SegmentType::Engine,
                    value: engine_id,
                },
                parent: None,
                len: 1,
            }),
        })
    }

    /// Returns a new identifier one segment longer. Segment ordering is not
    /// checked here.
    pub fn append(
        &self,
        segment_type: SegmentType,
        value: impl Into<String>,
    ) -> Result<Self, IdentifierError> {
        let value = value.into();
        escape::validate_value(&value)?;

        Ok(Self {
            tail: Arc::new(Link {
                segment: Segment {
                    segment_type,
                    value,
                },
                parent: Some(Arc::clone(&self.tail)),
                len: self.tail.len + 1,
            }),
        })
    }

    pub fn append_container(&self, name: impl Into<String>) -> Result<Self, IdentifierError> {
        self.append(SegmentType::Container, name)
    }

    pub fn append_executable(&self, signature: &Signature) -> Result<Self, IdentifierError> {
        self.append(SegmentType::Executable, signature.to_string())
    }

    pub fn parse(text: &str) -> Result<Self, IdentifierError> {
        if text.is_empty() {
            return Err(IdentifierError::malformed(text, "identifier is empty"));
        }

        let mut parts = text.split(SEGMENT_DELIMITER);
        let engine = parts.next().unwrap_or_default();
        if engine.is_empty() {
            return Err(IdentifierError::malformed(text, "missing engine id"));
        }
        if engine.contains(escape::is_reserved) {
            return Err(IdentifierError::malformed(
                text,
                format!("engine id '{engine}' contains a reserved character"),
            ));
        }

        let mut identifier =
            Self::for_engine(engine).map_err(|e| IdentifierError::malformed(text, e.to_string()))?;

        for (position, part) in parts.enumerate() {
            if part.is_empty() {
                return Err(IdentifierError::malformed(
                    text,
                    format!("empty segment at position {}", position + 1),
                ));
            }
            let (tag, raw_value) = part.split_once(TAG_DELIMITER).ok_or_else(|| {
                IdentifierError::malformed(text, format!("segment '{part}' has no type tag"))
            })?;
            let segment_type = SegmentType::from_tag(tag).ok_or_else(|| {
                IdentifierError::malformed(text, format!("unknown segment type '{tag}'"))
            })?;
            let value = escape::unescape(text, raw_value)?;

            identifier = identifier
                .append(segment_type, value)
                .map_err(|e| IdentifierError::malformed(text, e.to_string()))?;
        }

        Ok(identifier)
    }

    pub fn serialize(&self) -> String {
        self.to_string()
    }

    /// Segments from the engine root to the last one.
    pub fn segments(&self) -> Vec<&Segment> {
        let mut segments: Vec<&Segment> = self.links().map(|link| &link.segment).collect();
        segments.reverse();
        segments
    }

    pub fn engine_id(&self) -> &str {
        self.links()
            .last()
            .map(|link| link.segment.value.as_str())
            .unwrap_or_default()
    }

    pub fn last_segment(&self) -> &Segment {
        &self.tail.segment
    }

    pub fn len(&self) -> usize {
        self.tail.len
    }

    /// Always false: the engine root is always present.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn parent(&self) -> Option<Identifier> {
        self.tail.parent.as_ref().map(|link| Identifier {
            tail: Arc::clone(link),
        })
    }

    pub fn is_engine_root(&self) -> bool {
        self.tail.parent.is_none()
    }

    pub fn starts_with(&self, prefix: &Identifier) -> bool {
        if prefix.len() > self.len() {
            return false;
        }
        let mut ancestor = self.clone();
        while ancestor.len() > prefix.len() {
            match ancestor.parent() {
                Some(parent) => ancestor = parent,
                None => return false,
            }
        }
        ancestor == *prefix
    }

    /// Segments following `prefix`, or `None` when `prefix` is not a prefix.
    pub fn segments_after(&self, prefix: &Identifier) -> Option<Vec<&Segment>> {
        if !self.starts_with(prefix) {
            return None;
        }
        Some(self.segments().split_off(prefix.len()))
    }

    fn links(&self) -> impl Iterator<Item = &Link> {
        std::iter::successors(Some(self.tail.as_ref()), |link| link.parent.as_deref())
    }
}

impl PartialEq for Identifier {
    fn eq(&self, other: &Self) -> bool {
        if Arc::ptr_eq(&self.tail, &other.tail) {
            return true;
        }
        self.len() == other.len()
            && self
                .links()
                .zip(other.links())
                .all(|(a, b)| a.segment == b.segment)
    }
}

impl Eq for Identifier {}

impl Hash for Identifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for link in self.links() {
            link.segment.hash(state);
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments().into_iter().enumerate() {
            if i == 0 {
                f.write_str(&segment.value)?;
            } else {
                write!(
                    f,
                    "{SEGMENT_DELIMITER}{}{TAG_DELIMITER}{}",
                    segment.segment_type.tag(),
                    escape::escape(&segment.value)
                )?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Identifier").field(&self.to_string()).finish()
    }
}

impl FromStr for Identifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}
