//! Field-level validation reports.
//!
//! Form inputs are validated as a whole: every failing field is collected so
//! the dashboard can show the messages inline, next to each field.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{DomainError, DomainResult};

/// One failed constraint on one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Collected field errors, keyed by field name (ordered for stable output).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.values().map(Vec::len).sum()
    }

    /// Messages recorded for `field` (empty when the field is valid).
    pub fn messages(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn fields(&self) -> &BTreeMap<String, Vec<String>> {
        &self.fields
    }

    pub fn iter(&self) -> impl Iterator<Item = FieldError> + '_ {
        self.fields.iter().flat_map(|(field, msgs)| {
            msgs.iter().map(move |m| FieldError {
                field: field.clone(),
                message: m.clone(),
            })
        })
    }
}

impl core::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut first = true;
        for err in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", err.field, err.message)?;
            first = false;
        }
        Ok(())
    }
}

/// Accumulating validator.
///
/// ```
/// use stonedesk_core::Validator;
///
/// let mut v = Validator::new();
/// v.positive("quantity", 0.0);
/// v.min_chars("name", "ab", 3);
/// assert!(v.finish().is_err());
/// ```
#[derive(Debug, Default)]
pub struct Validator {
    errors: ValidationErrors,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` against `field` when `ok` is false.
    pub fn check(&mut self, ok: bool, field: &str, message: impl Into<String>) -> &mut Self {
        if !ok {
            self.errors.add(field, message);
        }
        self
    }

    pub fn positive(&mut self, field: &str, value: f64) -> &mut Self {
        self.check(value.is_finite() && value > 0.0, field, "must be positive")
    }

    pub fn non_negative(&mut self, field: &str, value: f64) -> &mut Self {
        self.check(value.is_finite() && value >= 0.0, field, "must not be negative")
    }

    pub fn min_chars(&mut self, field: &str, value: &str, min: usize) -> &mut Self {
        self.check(
            value.trim().chars().count() >= min,
            field,
            format!("must be {min}+ characters"),
        )
    }

    pub fn required(&mut self, field: &str, value: &str) -> &mut Self {
        self.check(!value.trim().is_empty(), field, "is required")
    }

    pub fn email(&mut self, field: &str, value: &str) -> &mut Self {
        let value = value.trim();
        let ok = match value.split_once('@') {
            Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.ends_with('.'),
            None => false,
        };
        self.check(ok, field, "must be a valid email address")
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// `Ok(())` when nothing failed, otherwise the collected report.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }

    /// Like [`Validator::into_result`], lifted into a `DomainError::Validation`.
    pub fn finish(self) -> DomainResult<()> {
        self.into_result().map_err(DomainError::Validation)
    }
}
