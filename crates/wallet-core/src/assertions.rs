//! Assertion engine shared by the validators and the wallet backends.
//!
//! Every public wallet-backend entrypoint funnels its precondition checks
//! through an [`Asserter`]: a small evaluation engine that either aborts with
//! a typed error (high severity) or downgrades the failure to a logged
//! warning plus a boolean result (low severity).
//!
//! Verbosity is not read from a process-wide flag. The [`Environment`] is
//! injected at construction time, so tests can configure it per-case without
//! leaking state across each other.
//!
//! # Example
//!
//! ```
//! use evm_wallet_core::assertions::{Asserter, Assertion, Environment, Severity};
//!
//! let asserter = Asserter::new(Environment::Development);
//!
//! // A failing low-severity assertion warns and reports `false`
//! let result = asserter
//!     .evaluate(
//!         &[Assertion::new(false, "gas price looks unusually low").level(Severity::Low)],
//!         "argument check failed",
//!     )
//!     .unwrap();
//! assert!(!result);
//!
//! // A failing high-severity assertion aborts
//! let result = asserter.evaluate(
//!     &[Assertion::new(false, "derivation path is malformed")],
//!     "argument check failed",
//! );
//! assert!(result.is_err());
//! ```

use tracing::{error, warn};

use crate::error::{Error, Result};

/// The runtime environment the library is configured for.
///
/// Controls diagnostic verbosity: warnings are only emitted in
/// [`Environment::Development`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    /// Local development. Warnings are emitted.
    #[default]
    Development,

    /// Test runs. Warnings are suppressed to keep output clean.
    Testing,

    /// Production builds. Warnings are suppressed.
    Production,
}

/// The severity of an [`Assertion`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Severity {
    /// A failing assertion is reported as a warning and the evaluation
    /// result becomes `false`; the call does not abort.
    Low,

    /// A failing assertion aborts the evaluation with
    /// [`Error::AssertionFailed`]. This is the default.
    #[default]
    High,
}

/// A single assertion descriptor: an already-evaluated expression, the
/// message (or ordered list of messages, for multi-line diagnostics) to
/// report on failure, and a severity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assertion {
    /// The evaluated expression.
    pub expression: bool,

    /// Messages reported when the expression is false. Joined with newlines
    /// when the assertion aborts.
    pub messages: Vec<String>,

    /// The failure severity. Defaults to [`Severity::High`].
    pub level: Severity,
}

impl Assertion {
    /// Creates a high-severity assertion with a single message.
    #[must_use]
    pub fn new(expression: bool, message: impl Into<String>) -> Self {
        Self {
            expression,
            messages: vec![message.into()],
            level: Severity::High,
        }
    }

    /// Creates a high-severity assertion with an ordered list of messages.
    #[must_use]
    pub fn with_messages(expression: bool, messages: Vec<String>) -> Self {
        Self {
            expression,
            messages,
            level: Severity::High,
        }
    }

    /// Sets the severity.
    #[must_use]
    pub fn level(mut self, level: Severity) -> Self {
        self.level = level;
        self
    }
}

/// The assertion evaluation engine.
///
/// Holds the injected [`Environment`] and exposes the shared
/// evaluate/warn operations used by validators and wallet backends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Asserter {
    environment: Environment,
}

impl Asserter {
    /// Creates an asserter for the given environment.
    #[must_use]
    pub const fn new(environment: Environment) -> Self {
        Self { environment }
    }

    /// Returns the environment this asserter was constructed with.
    #[must_use]
    pub const fn environment(&self) -> Environment {
        self.environment
    }

    /// Whether diagnostics should be emitted.
    ///
    /// True outside [`Environment::Production`] and [`Environment::Testing`].
    #[must_use]
    pub fn verbose(&self) -> bool {
        !matches!(
            self.environment,
            Environment::Production | Environment::Testing
        )
    }

    /// Emits each message as a diagnostic at the given severity.
    ///
    /// Suppressed entirely when [`Asserter::verbose`] is false. Low severity
    /// maps to `tracing::warn!`, high severity to `tracing::error!`.
    pub fn emit(&self, level: Severity, messages: &[String]) {
        if !self.verbose() {
            return;
        }
        for message in messages {
            match level {
                Severity::Low => warn!("{message}"),
                Severity::High => error!("{message}"),
            }
        }
    }

    /// Evaluates a list of assertions.
    ///
    /// The first failing assertion with [`Severity::High`] aborts with that
    /// descriptor's message(s), falling back to `generic_message` when the
    /// descriptor carries none. If every failing assertion is
    /// [`Severity::Low`], each failing message is emitted as a warning and
    /// `Ok(false)` is returned. With no failures the result is `Ok(true)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AssertionFailed`] for the first failing
    /// high-severity assertion.
    pub fn evaluate(&self, assertions: &[Assertion], generic_message: &str) -> Result<bool> {
        let mut all_passed = true;

        for assertion in assertions {
            if assertion.expression {
                continue;
            }
            match assertion.level {
                Severity::High => {
                    let message = if assertion.messages.is_empty() {
                        generic_message.to_string()
                    } else {
                        assertion.messages.join("\n")
                    };
                    return Err(Error::AssertionFailed(message));
                }
                Severity::Low => {
                    self.emit(Severity::Low, &assertion.messages);
                    all_passed = false;
                }
            }
        }

        Ok(all_passed)
    }

    /// Evaluates a single already-computed expression.
    ///
    /// Convenience over [`Asserter::evaluate`] for the common one-assertion
    /// case.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AssertionFailed`] when `expression` is false and
    /// `level` is [`Severity::High`].
    pub fn assert_truth(
        &self,
        expression: bool,
        message: impl Into<String>,
        level: Severity,
    ) -> Result<bool> {
        let message = message.into();
        self.evaluate(&[Assertion::new(expression, message).level(level)], "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passing_assertions_report_true() {
        let asserter = Asserter::new(Environment::Testing);
        let result = asserter
            .evaluate(
                &[
                    Assertion::new(true, "never reported"),
                    Assertion::new(true, "never reported").level(Severity::Low),
                ],
                "generic",
            )
            .unwrap();
        assert!(result);
    }

    #[test]
    fn failing_high_assertion_aborts_with_its_message() {
        let asserter = Asserter::new(Environment::Testing);
        let result = asserter.evaluate(
            &[
                Assertion::new(true, "passes"),
                Assertion::new(false, "address is malformed"),
            ],
            "generic",
        );
        match result {
            Err(Error::AssertionFailed(message)) => assert_eq!(message, "address is malformed"),
            other => panic!("expected AssertionFailed, got {other:?}"),
        }
    }

    #[test]
    fn failing_high_assertion_joins_message_list() {
        let asserter = Asserter::new(Environment::Testing);
        let result = asserter.evaluate(
            &[Assertion::with_messages(
                false,
                vec!["first line".to_string(), "second line".to_string()],
            )],
            "generic",
        );
        match result {
            Err(Error::AssertionFailed(message)) => {
                assert_eq!(message, "first line\nsecond line");
            }
            other => panic!("expected AssertionFailed, got {other:?}"),
        }
    }

    #[test]
    fn empty_message_list_falls_back_to_generic() {
        let asserter = Asserter::new(Environment::Testing);
        let result = asserter.evaluate(
            &[Assertion::with_messages(false, Vec::new())],
            "argument check failed",
        );
        match result {
            Err(Error::AssertionFailed(message)) => assert_eq!(message, "argument check failed"),
            other => panic!("expected AssertionFailed, got {other:?}"),
        }
    }

    #[test]
    fn failing_low_assertions_do_not_abort() {
        let asserter = Asserter::new(Environment::Testing);
        let result = asserter
            .evaluate(
                &[
                    Assertion::new(false, "minor issue").level(Severity::Low),
                    Assertion::new(true, "passes"),
                ],
                "generic",
            )
            .unwrap();
        assert!(!result);
    }

    #[test]
    fn high_failure_wins_over_low_failure() {
        let asserter = Asserter::new(Environment::Testing);
        let result = asserter.evaluate(
            &[
                Assertion::new(false, "minor issue").level(Severity::Low),
                Assertion::new(false, "fatal issue"),
            ],
            "generic",
        );
        assert!(matches!(result, Err(Error::AssertionFailed(_))));
    }

    #[test]
    fn assert_truth_single_expression() {
        let asserter = Asserter::new(Environment::Testing);
        assert!(asserter.assert_truth(true, "ok", Severity::High).unwrap());
        assert!(!asserter
            .assert_truth(false, "warned", Severity::Low)
            .unwrap());
        assert!(asserter
            .assert_truth(false, "aborts", Severity::High)
            .is_err());
    }

    #[test]
    fn verbosity_tracks_environment() {
        assert!(Asserter::new(Environment::Development).verbose());
        assert!(!Asserter::new(Environment::Testing).verbose());
        assert!(!Asserter::new(Environment::Production).verbose());
        // Unset environment defaults to development and stays verbose
        assert!(Asserter::default().verbose());
    }
}
