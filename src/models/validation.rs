use thiserror::Error;

/// A document failed its schema constraints.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{model} validation failed: {}", .violations.join(", "))]
pub struct ValidationError {
    pub model: &'static str,
    pub violations: Vec<String>,
}

/**
 * collects required-field violations for one document
 * and reports them all at once
 */
pub struct Validator {
    model: &'static str,
    violations: Vec<String>,
}

impl Validator {
    pub fn new(model: &'static str) -> Self {
        Self {
            model,
            violations: Vec::new(),
        }
    }

    pub fn require(&mut self, path: &str, value: &str) -> &mut Self {
        if value.is_empty() {
            self.violations
                .push(format!("{path}: Path `{path}` is required."));
        }
        self
    }

    pub fn finish(&mut self) -> Result<(), ValidationError> {
        if self.violations.is_empty() {
            return Ok(());
        }
        Err(ValidationError {
            model: self.model,
            violations: std::mem::take(&mut self.violations),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_when_every_required_field_is_present() {
        let mut validator = Validator::new("Project");
        validator.require("slug", "job-finder-app").require("title", "Job Finder");
        assert!(validator.finish().is_ok());
    }

    #[test]
    fn lists_every_missing_path() {
        let mut validator = Validator::new("BlogPost");
        validator
            .require("slug", "")
            .require("title", "ok")
            .require("content", "");
        let err = validator.finish().unwrap_err();
        assert_eq!(
            err.to_string(),
            "BlogPost validation failed: slug: Path `slug` is required., content: Path `content` is required."
        );
    }
}
