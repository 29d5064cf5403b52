use crate::field::Field;
use crate::types::{Limit, TextLimits};

pub const UID_MAX_LENGTH: usize = 9;

/// Text truncated to at most `max_length` characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextField {
    value: String,
    max_length: Limit<usize>,
}

impl TextField {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            max_length: Limit::Unbounded,
        }
    }

    pub fn with_max_length(mut self, max_length: Limit<usize>) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn with_limits(self, limits: TextLimits) -> Self {
        self.with_max_length(limits.max_length)
    }

    pub fn max_length(&self) -> Limit<usize> {
        self.max_length
    }
}

impl Field for TextField {
    type Raw = str;
    type Output<'a> = &'a str;

    fn raw(&self) -> &str {
        &self.value
    }

    /// Returns the first `max_length` characters, or the whole value when it
    /// is shorter or the field is unbounded.
    fn adjust(&self) -> &str {
        let Limit::Max(max_length) = self.max_length else {
            return &self.value;
        };

        match self.value.char_indices().nth(max_length) {
            Some((end, _)) => &self.value[..end],
            None => &self.value,
        }
    }
}

impl From<String> for TextField {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for TextField {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Identifier text, capped at [`UID_MAX_LENGTH`] characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UidField(TextField);

impl UidField {
    pub fn new(value: impl Into<String>) -> Self {
        Self(TextField::new(value).with_max_length(Limit::Max(UID_MAX_LENGTH)))
    }
}

impl Field for UidField {
    type Raw = str;
    type Output<'a> = &'a str;

    fn raw(&self) -> &str {
        self.0.raw()
    }

    fn adjust(&self) -> &str {
        self.0.adjust()
    }
}
