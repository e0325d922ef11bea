//! Free-text fields of request bodies.
//!
//! [`TextInput`] deserializes from any JSON value, so an absent key, an
//! explicit `null` or a value of the wrong type is reported by validation
//! against its field instead of rejecting the whole body.

use std::borrow::Cow;
use std::fmt;

use serde::de::{self, Deserialize, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Serialize, Serializer};
use validator::ValidationError;

/// Maximum length of a user handle, in characters.
pub const USER_MAX_CHARS: usize = 100;

/// Maximum length of a discussion title, in characters.
pub const TITLE_MAX_CHARS: usize = 280;

/// A free-text request field as the client sent it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TextInput {
    /// The key was not present (use with `#[serde(default)]`).
    #[default]
    Missing,
    Null,
    /// A boolean, array or object.
    Invalid,
    /// A string, or a number taken as its decimal text.
    Text(String),
}

impl TextInput {
    /// The text, or `""` for anything that is not text.
    pub fn as_str(&self) -> &str {
        match self {
            TextInput::Text(text) => text,
            _ => "",
        }
    }

    /// Strip surrounding whitespace in place.
    pub fn trim(&mut self) {
        if let TextInput::Text(text) = self {
            let trimmed = text.trim();
            if trimmed.len() != text.len() {
                *text = trimmed.to_string();
            }
        }
    }

    /// Require non-blank text of at most `max_chars` characters, if given.
    pub fn check(&self, max_chars: Option<usize>) -> Result<(), ValidationError> {
        let text = match self {
            TextInput::Missing => return Err(invalid("required", "this field is required")),
            TextInput::Null => return Err(invalid("null", "may not be null")),
            TextInput::Invalid => return Err(invalid("type", "must be a string")),
            TextInput::Text(text) => text,
        };

        if text.trim().is_empty() {
            return Err(invalid("blank", "may not be blank"));
        }
        if let Some(max) = max_chars {
            if text.chars().count() > max {
                return Err(invalid(
                    "max_length",
                    format!("must be at most {max} characters"),
                ));
            }
        }
        Ok(())
    }
}

impl From<&str> for TextInput {
    fn from(text: &str) -> Self {
        TextInput::Text(text.to_string())
    }
}

impl From<String> for TextInput {
    fn from(text: String) -> Self {
        TextInput::Text(text)
    }
}

fn invalid(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

/* --------------------------------------------------------------------------
Field validators (for `#[validate(custom(function = ...))]`)
-------------------------------------------------------------------------- */

pub fn validate_user(value: &TextInput) -> Result<(), ValidationError> {
    value.check(Some(USER_MAX_CHARS))
}

pub fn validate_title(value: &TextInput) -> Result<(), ValidationError> {
    value.check(Some(TITLE_MAX_CHARS))
}

pub fn validate_content(value: &TextInput) -> Result<(), ValidationError> {
    value.check(None)
}

/* --------------------------------------------------------------------------
Serde
-------------------------------------------------------------------------- */

/// Text serializes as a string, everything else as `null`. Validation
/// attaches the offending value to its error through this impl.
impl Serialize for TextInput {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TextInput::Text(text) => serializer.serialize_str(text),
            _ => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for TextInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TextInputVisitor)
    }
}

struct TextInputVisitor;

impl<'de> Visitor<'de> for TextInputVisitor {
    type Value = TextInput;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<TextInput, E> {
        Ok(TextInput::Text(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<TextInput, E> {
        Ok(TextInput::Text(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<TextInput, E> {
        Ok(TextInput::Text(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<TextInput, E> {
        Ok(TextInput::Text(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<TextInput, E> {
        Ok(TextInput::Text(v.to_string()))
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<TextInput, E> {
        Ok(TextInput::Invalid)
    }

    fn visit_unit<E: de::Error>(self) -> Result<TextInput, E> {
        Ok(TextInput::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<TextInput, E> {
        Ok(TextInput::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<TextInput, D::Error> {
        TextInput::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<TextInput, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(TextInput::Invalid)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<TextInput, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(TextInput::Invalid)
    }
}
