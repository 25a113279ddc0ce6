//! Error types for board description parsing.
//!
//! Every parser failure is a [`ParseError`]: the identity of the entity being
//! parsed plus the [`ErrorCause`] that stopped it. Field-level failures are
//! produced by the validators in [`crate::field`] and wrapped on the way out.

/// A constraint a configuration field failed to satisfy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Constraint {
    /// Value must be an integer.
    #[error("must be an integer")]
    Integer,
    /// Value must be `true` or `false`.
    #[error("must be a boolean (true or false)")]
    Boolean,
    /// Value must be a string.
    #[error("must be a string")]
    String,
    /// Value must be `>=` the bound.
    #[error("must be >= {0}")]
    AtLeast(i64),
    /// Value must be strictly `>` the bound.
    #[error("must be > {0}")]
    GreaterThan(i64),
    /// Value must lie in the inclusive range.
    #[error("must be between {0} and {1}")]
    InRange(i64, i64),
    /// Value must be one of the listed integers.
    #[error("must be one of [{}]", join_ints(.0))]
    OneOf(&'static [i64]),
    /// Value must be one of the listed strings.
    #[error("must be one of [{}]", join_strs(.0))]
    Choice(&'static [&'static str]),
}

fn join_ints(set: &[i64]) -> String {
    set.iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_strs(set: &[&str]) -> String {
    set.join(", ")
}

/// A single configuration field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("field '{field}' = {value} {constraint}")]
pub struct FieldError {
    /// Field name as written in the `config` mapping.
    pub field: String,
    /// Rendering of the offending value.
    pub value: String,
    /// The violated constraint.
    pub constraint: Constraint,
}

/// Why parsing an entity failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorCause {
    /// A device declared no peripheral references.
    #[error("at least one peripheral reference is required")]
    MissingReference,

    /// A referenced peripheral's name is not in the device's peripheral family.
    #[error("peripheral reference '{reference}' is not a {family} peripheral (name must start with '{family}')")]
    WrongFamily {
        /// The offending reference.
        reference: String,
        /// Required name prefix.
        family: &'static str,
    },

    /// A referenced peripheral is not present in the registry.
    #[error("peripheral reference '{reference}' is not defined")]
    UndefinedReference {
        /// The missing peripheral name.
        reference: String,
    },

    /// A configuration field violated its constraint.
    #[error(transparent)]
    Field(#[from] FieldError),

    /// The raw configuration does not have the expected shape.
    #[error("malformed configuration: {detail}")]
    Malformed {
        /// Description of what was wrong.
        detail: String,
    },

    /// No parser is registered for the entity's type tag.
    #[error("no parser registered for this type")]
    UnknownType,

    /// A peripheral with this name was already registered.
    #[error("peripheral name is already defined")]
    Duplicate,
}

/// A parse failure carrying the identity of the entity that failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} '{entity}': {cause}")]
pub struct ParseError {
    /// Entity name.
    pub entity: String,
    /// Entity type tag.
    pub kind: String,
    /// Underlying cause.
    pub cause: ErrorCause,
}

impl ParseError {
    /// Wrap a cause with the identity of the entity being parsed.
    pub fn new(entity: impl Into<String>, kind: impl Into<String>, cause: ErrorCause) -> Self {
        Self {
            entity: entity.into(),
            kind: kind.into(),
            cause,
        }
    }

    /// Build a malformed-shape error.
    pub fn malformed(
        entity: impl Into<String>,
        kind: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self::new(
            entity,
            kind,
            ErrorCause::Malformed {
                detail: detail.into(),
            },
        )
    }
}

/// Result type for parser operations.
pub type Result<T> = std::result::Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_field_error() {
        let err = FieldError {
            field: "sample_rate_hz".into(),
            value: "0".into(),
            constraint: Constraint::GreaterThan(0),
        };
        assert_eq!(err.to_string(), "field 'sample_rate_hz' = 0 must be > 0");
    }

    #[test]
    fn display_one_of() {
        assert_eq!(
            Constraint::OneOf(&[0, 1]).to_string(),
            "must be one of [0, 1]"
        );
        assert_eq!(
            Constraint::Choice(&["input", "output"]).to_string(),
            "must be one of [input, output]"
        );
    }

    #[test]
    fn display_wraps_identity() {
        let err = ParseError::new(
            "led_red",
            "gpio_ctrl",
            ErrorCause::WrongFamily {
                reference: "ldo1".into(),
                family: "gpio",
            },
        );
        let msg = err.to_string();
        assert!(msg.starts_with("gpio_ctrl 'led_red': "));
        assert!(msg.contains("'ldo1'"));
        assert!(msg.contains("must start with 'gpio'"));
    }

    #[test]
    fn field_error_is_transparent() {
        let cause: ErrorCause = FieldError {
            field: "pull_up".into(),
            value: "1".into(),
            constraint: Constraint::Boolean,
        }
        .into();
        let err = ParseError::new("gpio-0", "gpio", cause);
        assert_eq!(
            err.to_string(),
            "gpio 'gpio-0': field 'pull_up' = 1 must be a boolean (true or false)"
        );
    }

    #[test]
    fn cause_is_inspectable() {
        let err = ParseError::new("btn", "gpio_ctrl", ErrorCause::MissingReference);
        assert!(matches!(err.cause, ErrorCause::MissingReference));
        assert_eq!(err.entity, "btn");
        assert_eq!(err.kind, "gpio_ctrl");
    }
}
