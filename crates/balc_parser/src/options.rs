//! Parser configuration.

use thiserror::Error;

/// Limits that bound the work done on malformed input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserOptions {
    /// Nesting depth at which a rule gives up and reports
    /// `ERROR_EXPRESSION_TOO_DEEPLY_NESTED`.
    pub max_recursion_depth: u32,
    /// Inserts allowed at one token position before recovery removes the
    /// token instead.
    pub max_inserts_per_token: u32,
    /// Recovery steps allowed per source character. Past the budget recovery
    /// stops inserting.
    pub recovery_step_budget_factor: u32,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_recursion_depth: 200,
            max_inserts_per_token: 8,
            recovery_step_budget_factor: 64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
    #[error("max_recursion_depth must be at least 1")]
    ZeroRecursionDepth,
    #[error("max_inserts_per_token must be at least 1")]
    ZeroInsertFuel,
    #[error("recovery_step_budget_factor must be at least 1, got {0}")]
    StepBudgetTooSmall(u32),
}

impl ParserOptions {
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.max_recursion_depth == 0 {
            return Err(OptionsError::ZeroRecursionDepth);
        }
        if self.max_inserts_per_token == 0 {
            return Err(OptionsError::ZeroInsertFuel);
        }
        if self.recovery_step_budget_factor == 0 {
            return Err(OptionsError::StepBudgetTooSmall(self.recovery_step_budget_factor));
        }
        Ok(())
    }

    /// Total recovery steps allowed for a source of `source_len` characters.
    pub fn step_budget(&self, source_len: usize) -> u64 {
        u64::from(self.recovery_step_budget_factor) * (source_len as u64 + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(ParserOptions::default().validate(), Ok(()));
    }

    #[test]
    fn test_zero_limits_rejected() {
        let options = ParserOptions {
            max_recursion_depth: 0,
            ..ParserOptions::default()
        };
        assert_eq!(options.validate(), Err(OptionsError::ZeroRecursionDepth));

        let options = ParserOptions {
            recovery_step_budget_factor: 0,
            ..ParserOptions::default()
        };
        assert_eq!(
            options.validate().map_err(|e| e.to_string()),
            Err("recovery_step_budget_factor must be at least 1, got 0".to_string())
        );
    }
}
