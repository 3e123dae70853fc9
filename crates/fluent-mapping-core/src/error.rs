// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Error type for fluent mapping configuration.
//!
//! Every variant except [`MappingError::Custom`] describes an author error in
//! a mapping definition or a builder type. None of them are retried: they
//! propagate through the installed hooks into the mapper's own error
//! handling and abort the metadata pass that triggered them.
//!
//! An unmatched `property(...)` call is deliberately *not* an error. The
//! builder returned for it is a no-op, see
//! [`PropertyBuilder`](crate::PropertyBuilder).

/// Fatal configuration errors raised while applying fluent mappings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum MappingError {
    /// A member-accessor expression did not have a recognised shape.
    ///
    /// Only a direct member access, or a single conversion node wrapping a
    /// member access, can be resolved to a property name.
    #[error("invalid member expression for `{entity}`: {shape}")]
    InvalidExpression {
        /// Entity type the expression was written against.
        entity: &'static str,
        /// Short description of the rejected expression shape.
        shape:  String
    },

    /// No constructor of a builder type matched any selection tier.
    #[error("no suitable constructor found for `{builder}`")]
    NoSuitableConstructor {
        /// Type name of the builder.
        builder: &'static str
    },

    /// A cached factory was invoked with an argument its constructor
    /// parameter cannot be converted from.
    #[error("constructor of `{builder}` expects an argument of type `{expected}`")]
    ArgumentMismatch {
        /// Type name of the builder.
        builder:  &'static str,
        /// Type name of the constructor parameter.
        expected: &'static str
    },

    /// Two mapping definitions were registered for the same entity type.
    #[error("entity `{entity}` already has a fluent mapping registered")]
    DuplicateMapping {
        /// Type name of the entity.
        entity: &'static str
    },

    /// Error raised by user code inside a `configure` implementation.
    #[error("{0}")]
    Custom(String)
}

impl MappingError {
    /// Create a [`MappingError::Custom`] from any displayable message.
    pub fn custom(message: impl std::fmt::Display) -> Self {
        Self::Custom(message.to_string())
    }

    /// Check if this error was raised by the builder-factory cache.
    pub const fn is_factory_error(&self) -> bool {
        matches!(
            self,
            Self::NoSuitableConstructor { .. } | Self::ArgumentMismatch { .. }
        )
    }
}
