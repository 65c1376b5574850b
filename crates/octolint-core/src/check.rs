//! The contract every check implements.

use crate::context::CheckContext;
use crate::error::CheckError;
use crate::types::{Category, CheckResult};

/// A unit of best-practice analysis over a space.
///
/// Checks are read-only: they fetch fresh snapshots through the context's
/// client and never modify the platform.
///
/// # Example
///
/// ```ignore
/// use octolint_core::{Category, Check, CheckContext, CheckError, CheckResult, Severity};
///
/// pub struct NoEnvironments;
///
/// impl Check for NoEnvironments {
///     fn id(&self) -> &'static str { "OctoLintNoEnvironments" }
///     fn category(&self) -> Category { Category::Organization }
///
///     fn execute(&self, ctx: &CheckContext) -> Result<Option<CheckResult>, CheckError> {
///         let count = ctx.client()?.environments()?.len();
///         let severity = if count == 0 { Severity::Warning } else { Severity::Ok };
///         Ok(Some(CheckResult::new(self.id(), severity, self.category(), "...")))
///     }
/// }
/// ```
pub trait Check: Send + Sync {
    /// Returns the stable identifier of this check (e.g. `OctoLintTooManySteps`).
    ///
    /// Identifiers are unique across the registry and are what skip/only
    /// lists and configuration tables refer to.
    fn id(&self) -> &'static str;

    /// Returns a brief description of what this check looks for.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the category results of this check are filed under.
    fn category(&self) -> Category;

    /// Runs the check.
    ///
    /// Returns `Ok(None)` when the check does not apply (for example, an
    /// optional pattern is not configured).
    ///
    /// # Errors
    ///
    /// Returns an error when the analysis cannot complete and the failure is
    /// fatal for this check.
    fn execute(&self, ctx: &CheckContext) -> Result<Option<CheckResult>, CheckError>;
}

/// Type alias for boxed Check trait objects.
pub type CheckBox = Box<dyn Check>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Severity;

    struct TestCheck;

    impl Check for TestCheck {
        fn id(&self) -> &'static str {
            "TestCheck"
        }

        fn description(&self) -> &'static str {
            "A test check"
        }

        fn category(&self) -> Category {
            Category::Naming
        }

        fn execute(&self, ctx: &CheckContext) -> Result<Option<CheckResult>, CheckError> {
            ctx.client()?;
            Ok(Some(CheckResult::new(
                self.id(),
                Severity::Ok,
                self.category(),
                "fine",
            )))
        }
    }

    #[test]
    fn test_check_trait() {
        let check = TestCheck;
        assert_eq!(check.id(), "TestCheck");
        assert_eq!(check.description(), "A test check");
        assert!(check.execute(&CheckContext::new()).is_err());
    }
}
