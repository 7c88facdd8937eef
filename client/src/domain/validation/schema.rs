//! Declarative rule tables.

use std::sync::LazyLock;

use regex::Regex;

use super::{FieldSet, FieldViolation, ValidationErrors};

// Local part, one @, and a dotted domain; no whitespace anywhere.
#[expect(clippy::expect_used, reason = "constant pattern is covered by unit tests")]
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

/// Check applied to one field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// Value must be non-empty once trimmed.
    Required,
    /// Value must look like an email address. Empty values pass.
    Email,
    /// Value must have at least `n` characters. Empty values pass.
    MinLength(usize),
    /// Value must equal the named field's value.
    EqualsField(&'static str),
}

impl Constraint {
    fn holds(self, value: &str, fields: &FieldSet) -> bool {
        match self {
            Self::Required => !value.trim().is_empty(),
            Self::Email => value.is_empty() || EMAIL_RE.is_match(value),
            Self::MinLength(min) => value.is_empty() || value.chars().count() >= min,
            Self::EqualsField(other) => value == fields.value(other),
        }
    }
}

/// Guard deciding whether a rule applies to the current submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Condition {
    Always,
    FieldFilled(&'static str),
}

impl Condition {
    fn applies(self, fields: &FieldSet) -> bool {
        match self {
            Self::Always => true,
            Self::FieldFilled(field) => !fields.value(field).is_empty(),
        }
    }
}

/// One row of a schema: `field` must satisfy `constraint`, else `message`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    field: &'static str,
    constraint: Constraint,
    condition: Condition,
    message: &'static str,
}

impl Rule {
    /// Rule that always applies.
    #[must_use]
    pub const fn new(field: &'static str, constraint: Constraint, message: &'static str) -> Self {
        Self {
            field,
            constraint,
            condition: Condition::Always,
            message,
        }
    }

    /// Only evaluate this rule when `other` has a non-empty value.
    #[must_use]
    pub const fn when_filled(mut self, other: &'static str) -> Self {
        self.condition = Condition::FieldFilled(other);
        self
    }

    /// Field the rule reads and reports under.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        self.field
    }

    /// `true` when the rule is skipped or satisfied.
    #[must_use]
    pub fn check(&self, fields: &FieldSet) -> bool {
        !self.condition.applies(fields) || self.constraint.holds(fields.value(self.field), fields)
    }
}

/// Ordered rule table for one form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    rules: Vec<Rule>,
}

impl Schema {
    /// Empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a row.
    #[must_use]
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Evaluate every rule and collect all violations in table order.
    ///
    /// # Examples
    /// ```
    /// use barber_client::domain::validation::{Constraint, Rule, Schema};
    /// use barber_client::domain::FieldSet;
    ///
    /// let schema = Schema::new()
    ///     .rule(Rule::new("email", Constraint::Required, "E-mail is required"))
    ///     .rule(Rule::new("password", Constraint::Required, "Password is required"));
    /// let errors = schema.validate(&FieldSet::new()).unwrap_err();
    /// assert_eq!(errors.len(), 2);
    /// ```
    pub fn validate(&self, fields: &FieldSet) -> Result<(), ValidationErrors> {
        let violations: ValidationErrors = self
            .rules
            .iter()
            .filter(|rule| !rule.check(fields))
            .map(|rule| FieldViolation::new(rule.field, rule.message))
            .collect();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}
