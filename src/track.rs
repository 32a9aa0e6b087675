use serde::de::{self, Deserializer, Visitor};
use serde_derive::{Deserialize, Serialize};
use std::fmt;

use crate::bbox::{BBox, Ltrb};

/// Identifier the tracker assigns to one physical object for the lifetime
/// of its track. Trackers hand out either numbers or strings, both end up
/// here as text.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct ObjectId(String);

struct ObjectIdVisitor;

impl<'de> Visitor<'de> for ObjectIdVisitor {
    type Value = ObjectId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a track id as string or integer")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<ObjectId, E> {
        Ok(ObjectId::from(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<ObjectId, E> {
        Ok(ObjectId::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<ObjectId, E> {
        Ok(ObjectId(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<ObjectId, E> {
        Ok(ObjectId(v.to_string()))
    }
}

impl<'de> serde::Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ObjectIdVisitor)
    }
}

impl ObjectId {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ObjectId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u32> for ObjectId {
    fn from(id: u32) -> Self {
        Self(id.to_string())
    }
}

impl From<i32> for ObjectId {
    fn from(id: i32) -> Self {
        Self(id.to_string())
    }
}

/// A confirmed track as reported by the tracker for one frame
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Track {
    pub track_id: ObjectId,
    pub bbox: BBox<Ltrb>,

    // None when the track was coasted without a matching detection
    #[serde(default)]
    pub confidence: Option<f32>,
    pub class: i32,
}

impl Track {
    pub fn new(
        track_id: impl Into<ObjectId>,
        bbox: BBox<Ltrb>,
        confidence: Option<f32>,
        class: i32,
    ) -> Self {
        Self {
            track_id: track_id.into(),
            bbox,
            confidence,
            class,
        }
    }
}
