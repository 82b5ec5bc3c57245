//! # Serde module for Accuracy
//!
//! This module provides serde-based (serialization and deserialization) features for
//! `Accuracy`, so that accuracy targets can be stored in configuration files or sent along with
//! requests. `Summary` derives serde traits directly.
//!
//! `Accuracy` is serialized as a tuple `(epsilon, delta)`. During deserialization the tuple is
//! validated with `Accuracy::try_new`, so out of range values are rejected rather than clamped.
//!
//! Sketch state itself is never serialized.
use serde::de::Error;
use serde::ser::SerializeTuple;
use serde::{Deserialize, Serialize};

use crate::threshold::Accuracy;

impl Serialize for Accuracy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut tup = serializer.serialize_tuple(2)?;
        tup.serialize_element(&self.epsilon())?;
        tup.serialize_element(&self.delta())?;
        tup.end()
    }
}

impl<'de> Deserialize<'de> for Accuracy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let (epsilon, delta): (f64, f64) = Deserialize::deserialize(deserializer)?;
        Accuracy::try_new(epsilon, delta).map_err(Error::custom)
    }
}
