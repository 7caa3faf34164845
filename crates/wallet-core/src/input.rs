//! Generic argument-shape guard for public wallet-backend entrypoints.
//!
//! Every public entrypoint takes one argument object. Before any domain
//! validation (and long before any network or hardware call), the backend
//! checks that the object is actually a plain key-value shape and that the
//! properties the call depends on are present. That check is the same
//! everywhere, so it lives here once, generic over anything that can report
//! key presence.
//!
//! # Example
//!
//! ```
//! use evm_wallet_core::input::{validate_user_input, Requirements};
//! use serde_json::json;
//!
//! let argument = json!({ "message": "hello", "signature": "0xdeadbeef" });
//! validate_user_input(
//!     Some(&argument),
//!     &Requirements {
//!         required_all: Some(&["message", "signature"]),
//!         ..Default::default()
//!     },
//! )
//! .unwrap();
//! ```

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// The property names an entrypoint requires on its argument object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Requirements<'a> {
    /// Properties that must all be present.
    pub required_all: Option<&'a [&'a str]>,

    /// Properties of which at least one must be present.
    pub required_either: Option<&'a [&'a str]>,
}

impl Requirements<'_> {
    /// Whether any property constraint is configured.
    #[must_use]
    pub fn has_constraints(&self) -> bool {
        self.required_all.is_some_and(|names| !names.is_empty())
            || self.required_either.is_some_and(|names| !names.is_empty())
    }
}

/// Key-presence reporting for argument objects.
///
/// Implemented for [`serde_json::Value`] and [`serde_json::Map`]; backends
/// with typed argument structs implement it to reuse the same guard.
pub trait KeyedInput {
    /// Whether the value is a plain key-value object (not an array or a
    /// primitive).
    fn is_plain_object(&self) -> bool;

    /// Whether the named property is present. An explicit `null` counts as
    /// present.
    fn has_key(&self, key: &str) -> bool;
}

impl KeyedInput for Value {
    fn is_plain_object(&self) -> bool {
        self.is_object()
    }

    fn has_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

impl KeyedInput for Map<String, Value> {
    fn is_plain_object(&self) -> bool {
        true
    }

    fn has_key(&self, key: &str) -> bool {
        self.contains_key(key)
    }
}

/// Validates the argument object of a public entrypoint.
///
/// With no constraints configured, any plain object passes, as does a
/// missing argument. With constraints, the argument must be present, be a
/// plain object, carry every `required_all` property, and carry at least
/// one `required_either` property.
///
/// # Errors
///
/// - [`Error::InvalidType`] when the argument is not a plain object
/// - [`Error::MissingRequiredProperty`] when a constraint is unmet or the
///   argument is missing while constraints are configured
pub fn validate_user_input<T: KeyedInput>(
    first_argument: Option<&T>,
    requirements: &Requirements<'_>,
) -> Result<()> {
    let argument = match first_argument {
        Some(argument) => argument,
        None => {
            if requirements.has_constraints() {
                return Err(Error::MissingRequiredProperty(
                    "expected an argument object, got none".to_string(),
                ));
            }
            return Ok(());
        }
    };

    if !argument.is_plain_object() {
        return Err(Error::InvalidType(
            "expected a plain key-value argument object".to_string(),
        ));
    }

    if let Some(required_all) = requirements.required_all {
        for name in required_all {
            if !argument.has_key(name) {
                return Err(Error::MissingRequiredProperty((*name).to_string()));
            }
        }
    }

    if let Some(required_either) = requirements.required_either {
        if !required_either.is_empty() && !required_either.iter().any(|name| argument.has_key(name))
        {
            return Err(Error::MissingRequiredProperty(format!(
                "expected at least one of: {}",
                required_either.join(", ")
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const NO_REQUIREMENTS: Requirements<'static> = Requirements {
        required_all: None,
        required_either: None,
    };

    #[test]
    fn unconstrained_accepts_any_object_or_no_argument() {
        validate_user_input(Some(&json!({})), &NO_REQUIREMENTS).unwrap();
        validate_user_input(Some(&json!({ "extra": 1 })), &NO_REQUIREMENTS).unwrap();
        validate_user_input::<Value>(None, &NO_REQUIREMENTS).unwrap();
    }

    #[test]
    fn rejects_non_object_arguments() {
        for argument in [json!([1, 2]), json!("text"), json!(42), json!(null)] {
            assert!(matches!(
                validate_user_input(Some(&argument), &NO_REQUIREMENTS),
                Err(Error::InvalidType(_))
            ));
        }
    }

    #[test]
    fn required_all_checks_every_property() {
        let requirements = Requirements {
            required_all: Some(&["message", "signature"]),
            ..Default::default()
        };

        validate_user_input(
            Some(&json!({ "message": "m", "signature": "00" })),
            &requirements,
        )
        .unwrap();

        let result = validate_user_input(Some(&json!({ "message": "m" })), &requirements);
        match result {
            Err(Error::MissingRequiredProperty(name)) => assert_eq!(name, "signature"),
            other => panic!("expected MissingRequiredProperty, got {other:?}"),
        }
    }

    #[test]
    fn explicit_null_counts_as_present() {
        let requirements = Requirements {
            required_all: Some(&["signature"]),
            ..Default::default()
        };
        validate_user_input(Some(&json!({ "signature": null })), &requirements).unwrap();
    }

    #[test]
    fn required_either_needs_one_property() {
        let requirements = Requirements {
            required_either: Some(&["chainId", "chain_id"]),
            ..Default::default()
        };

        validate_user_input(Some(&json!({ "chain_id": 1 })), &requirements).unwrap();
        assert!(matches!(
            validate_user_input(Some(&json!({ "other": 1 })), &requirements),
            Err(Error::MissingRequiredProperty(_))
        ));
    }

    #[test]
    fn missing_argument_with_constraints_fails() {
        let requirements = Requirements {
            required_all: Some(&["message"]),
            ..Default::default()
        };
        assert!(matches!(
            validate_user_input::<Value>(None, &requirements),
            Err(Error::MissingRequiredProperty(_))
        ));
    }

    #[test]
    fn map_arguments_are_supported() {
        let mut map = Map::new();
        map.insert("message".to_string(), json!("m"));

        let requirements = Requirements {
            required_all: Some(&["message"]),
            ..Default::default()
        };
        validate_user_input(Some(&map), &requirements).unwrap();
    }
}
