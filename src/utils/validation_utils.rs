use crate::error::{AppError, FieldErrors};

/// Collects field-level form errors; the caller gets either a clean pass or
/// one `Validation` error carrying every message at once.
#[derive(Default)]
pub struct Validator {
    errors: FieldErrors,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn require(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.errors
                .insert(field.to_string(), format!("{field} is required"));
        }
        self
    }

    pub fn length(&mut self, field: &str, value: &str, min: usize, max: usize) -> &mut Self {
        let len = value.chars().count();
        if len < min || len > max {
            self.errors.insert(
                field.to_string(),
                format!("{field} must be between {min} and {max} characters"),
            );
        }
        self
    }

    /// Optional fields are only measured when present and non-empty.
    pub fn length_opt(
        &mut self,
        field: &str,
        value: Option<&str>,
        min: usize,
        max: usize,
    ) -> &mut Self {
        if let Some(v) = value {
            if !v.is_empty() {
                self.length(field, v, min, max);
            }
        }
        self
    }

    pub fn check(&mut self, field: &str, ok: bool, message: &str) -> &mut Self {
        if !ok {
            self.errors.insert(field.to_string(), message.to_string());
        }
        self
    }

    pub fn finish(&mut self) -> Result<(), AppError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(std::mem::take(&mut self.errors)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_form_passes() {
        let mut v = Validator::new();
        v.require("title", "My song").length("username", "charly", 1, 15);
        assert!(v.finish().is_ok());
    }

    #[test]
    fn all_errors_are_reported_together() {
        let mut v = Validator::new();
        v.require("title", "  ")
            .require("url_song", "")
            .length("bio", "short", 10, 225);
        match v.finish() {
            Err(AppError::Validation(fields)) => {
                assert_eq!(fields.len(), 3);
                assert!(fields.contains_key("title"));
                assert!(fields.contains_key("url_song"));
                assert!(fields.contains_key("bio"));
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn optional_empty_values_are_skipped() {
        let mut v = Validator::new();
        v.length_opt("bio", None, 10, 225)
            .length_opt("bio", Some(""), 10, 225);
        assert!(v.finish().is_ok());
    }
}
