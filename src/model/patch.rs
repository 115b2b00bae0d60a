use serde::{Serialize, Serializer};
use serde_json::Value;
use crate::error::ClientError;
use crate::rest::JsonBody;

/// One field of an edit request.
///
/// `Option` can't tell "leave it alone" apart from "clear it", so edit
/// structs use this instead:
///
/// - [`Unset`](Patch::Unset) (the default) leaves the key out of the body.
/// - [`Null`](Patch::Null) asks the server to clear or reset the field.
/// - [`Set`](Patch::Set) sends the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    Unset,
    Null,
    Set(T),
}

impl<T> Patch<T> {
    pub fn is_unset(&self) -> bool {
        matches!(self, Patch::Unset)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Patch::Null)
    }

    /// `None` becomes [`Null`](Patch::Null), never [`Unset`](Patch::Unset).
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => Patch::Set(v),
            None => Patch::Null,
        }
    }

    pub fn as_ref(&self) -> Patch<&T> {
        match self {
            Patch::Unset => Patch::Unset,
            Patch::Null => Patch::Null,
            Patch::Set(v) => Patch::Set(v),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Patch<U> {
        match self {
            Patch::Unset => Patch::Unset,
            Patch::Null => Patch::Null,
            Patch::Set(v) => Patch::Set(f(v)),
        }
    }

    /// Replaces an explicit null with the value the server expects for "clear".
    pub fn null_as(self, value: T) -> Self {
        match self {
            Patch::Null => Patch::Set(value),
            other => other,
        }
    }
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Unset
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        Patch::from_option(value)
    }
}

impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Patch::Set(v) => v.serialize(serializer),
            Patch::Null | Patch::Unset => serializer.serialize_none(),
        }
    }
}

/// Serializes an edit struct into the request body. Fields left
/// [`Unset`](Patch::Unset) are skipped by the struct's serde attributes.
pub(crate) fn to_body<T: Serialize>(edit: &T) -> Result<JsonBody, ClientError> {
    match serde_json::to_value(edit)? {
        Value::Object(map) => Ok(map),
        _ => Ok(JsonBody::new()),
    }
}
