//! Port for resolving the name this running binary is known by.
//!
//! The returned name is the comparison key for clone detection, so it must be
//! the same string the process table reports for this executable.

use super::ExecutableNameError;

/// Resolves this process's own executable display name.
pub trait ExecutableNamePort: Send + Sync {
    fn executable_name(&self) -> Result<String, ExecutableNameError>;
}

/// Fixed name, for hosts that already know how they are listed.
#[derive(Debug, Clone)]
pub struct StaticExecutableName(String);

impl StaticExecutableName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl ExecutableNamePort for StaticExecutableName {
    fn executable_name(&self) -> Result<String, ExecutableNameError> {
        if self.0.is_empty() {
            return Err(ExecutableNameError::Empty);
        }
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_name_is_returned() {
        let names = StaticExecutableName::new("appexit");
        assert_eq!(names.executable_name().unwrap(), "appexit");
    }

    #[test]
    fn empty_static_name_is_rejected() {
        let names = StaticExecutableName::new("");
        assert!(matches!(
            names.executable_name(),
            Err(ExecutableNameError::Empty)
        ));
    }
}
