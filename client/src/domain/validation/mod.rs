//! Form validation: raw field sets, rule tables and the error mapper.
//!
//! A [`Schema`] is an explicit table of [`Rule`]s evaluated in one pass, in
//! table order, without stopping at the first failure. The resulting
//! [`ValidationErrors`] keep that order so [`FieldErrorMap::from_violations`]
//! can apply last-write-wins per field.

mod schema;

use std::collections::BTreeMap;
use std::fmt;

pub use schema::{Constraint, Rule, Schema};

/// Raw string values submitted by a form, keyed by field name.
///
/// Absent fields read as the empty string, which is how an untouched input
/// arrives from the view layer.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct FieldSet(BTreeMap<String, String>);

impl FieldSet {
    /// Empty field set.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    /// Set `field` to `value`, replacing any previous value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    /// Value for `field`, or `""` when it was never filled in.
    #[must_use]
    pub fn value(&self, field: &str) -> &str {
        self.0.get(field).map_or("", String::as_str)
    }
}

// Values are frequently passwords.
impl fmt::Debug for FieldSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.0.keys()).finish()
    }
}

/// One failed rule for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    path: String,
    message: String,
}

impl FieldViolation {
    /// Violation of the field at `path`.
    #[must_use]
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Field name the rule checked.
    #[must_use]
    pub const fn path(&self) -> &str {
        self.path.as_str()
    }

    /// Message shown beside the field.
    #[must_use]
    pub const fn message(&self) -> &str {
        self.message.as_str()
    }
}

/// Ordered list of violations collected by a schema pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldViolation>);

impl ValidationErrors {
    /// Wrap violations in evaluation order.
    #[must_use]
    pub const fn new(violations: Vec<FieldViolation>) -> Self {
        Self(violations)
    }

    /// `true` when every rule passed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of violations, duplicates per field included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Violations in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldViolation> {
        self.0.iter()
    }
}

impl FromIterator<FieldViolation> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = FieldViolation>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} field(s) failed validation", self.0.len())
    }
}

impl std::error::Error for ValidationErrors {}

/// Field name to message, as displayed beside each input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrorMap(BTreeMap<String, String>);

impl FieldErrorMap {
    /// Flatten violations into one message per field; later entries win.
    ///
    /// # Examples
    /// ```
    /// use barber_client::domain::{FieldErrorMap, FieldViolation, ValidationErrors};
    ///
    /// let errors = ValidationErrors::new(vec![
    ///     FieldViolation::new("email", "E-mail is required"),
    ///     FieldViolation::new("email", "Enter a valid e-mail"),
    ///     FieldViolation::new("password", "Password is required"),
    /// ]);
    /// let map = FieldErrorMap::from_violations(&errors);
    /// assert_eq!(map.len(), 2);
    /// assert_eq!(map.get("email"), Some("Enter a valid e-mail"));
    /// ```
    #[must_use]
    pub fn from_violations(errors: &ValidationErrors) -> Self {
        let mut map = BTreeMap::new();
        for violation in errors.iter() {
            map.insert(violation.path.clone(), violation.message.clone());
        }
        Self(map)
    }

    /// Message for `field`, if it failed.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// `true` when no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failed fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Fields in sorted order with their message.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<&ValidationErrors> for FieldErrorMap {
    fn from(value: &ValidationErrors) -> Self {
        Self::from_violations(value)
    }
}
