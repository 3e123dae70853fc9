// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Typed member accessors.
//!
//! Mapping definitions select properties through typed accessors instead of
//! string literals. `#[derive(Mappable)]` generates a `{Entity}Members`
//! struct holding one [`Member`] per field, and builders take a closure over
//! that struct:
//!
//! ```rust,ignore
//! builder.property(|m| m.name)?.column_name("full_name");
//! ```
//!
//! The closure returns an [`Expression`]. Only two shapes resolve to a
//! property name: a direct member, and a single [`Expression::Convert`] node
//! wrapping a member. Anything else is rejected with
//! [`MappingError::InvalidExpression`].

use std::{fmt, marker::PhantomData};

use crate::{EntityType, MappingError};

/// Entity type with generated member accessors.
///
/// Implemented by `#[derive(Mappable)]`. Manual implementations only need a
/// `Copy` struct of [`Member`] values and the list of member names.
///
/// ```rust
/// use fluent_mapping_core::{Mappable, Member};
///
/// pub struct Person {
///     pub id:   i64,
///     pub name: String
/// }
///
/// #[derive(Clone, Copy)]
/// pub struct PersonMembers {
///     pub id:   Member<Person>,
///     pub name: Member<Person>
/// }
///
/// impl Mappable for Person {
///     type Members = PersonMembers;
///
///     const MEMBERS: PersonMembers = PersonMembers {
///         id:   Member::new("id"),
///         name: Member::new("name")
///     };
///     const MEMBER_NAMES: &'static [&'static str] = &["id", "name"];
/// }
/// ```
pub trait Mappable: Sized + 'static {
    /// Struct holding one accessor per mapped member.
    type Members: Copy + Send + Sync + 'static;

    /// Accessor values.
    const MEMBERS: Self::Members;

    /// Names of all mapped members, in declaration order.
    const MEMBER_NAMES: &'static [&'static str];
}

/// Accessor for one member of entity `T`.
pub struct Member<T> {
    name:      &'static str,
    type_name: Option<&'static str>,
    doc:       Option<&'static str>,
    _entity:   PhantomData<fn() -> T>
}

impl<T> Member<T> {
    /// Accessor for the member called `name`.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            type_name: None,
            doc: None,
            _entity: PhantomData
        }
    }

    /// Attach the source type of the member.
    pub const fn with_type_name(mut self, type_name: &'static str) -> Self {
        self.type_name = Some(type_name);
        self
    }

    /// Attach the member's doc comment.
    pub const fn with_doc(mut self, doc: &'static str) -> Self {
        self.doc = Some(doc);
        self
    }

    /// Member name.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Source type of the member, as written in the entity.
    pub const fn type_name(&self) -> Option<&'static str> {
        self.type_name
    }

    /// Doc comment of the member.
    pub const fn doc(&self) -> Option<&'static str> {
        self.doc
    }

    /// Wrap the member in a conversion node.
    pub fn convert(self) -> Expression<T> {
        Expression::Convert(Box::new(Expression::Member(self)))
    }

    /// Method call on the member. Never resolvable to a property.
    pub fn call(self, method: &'static str) -> Expression<T> {
        Expression::Call {
            method,
            receiver: Box::new(Expression::Member(self))
        }
    }
}

impl<T> Clone for Member<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Member<T> {}

impl<T> PartialEq for Member<T> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<T> Eq for Member<T> {}

impl<T> fmt::Debug for Member<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Member")
            .field("name", &self.name)
            .field("type_name", &self.type_name)
            .finish()
    }
}

/// Member-accessor expression over entity `T`.
pub enum Expression<T> {
    /// Direct member access.
    Member(Member<T>),

    /// Conversion (cast) node around another expression.
    Convert(Box<Expression<T>>),

    /// Method call on another expression.
    Call {
        /// Method name.
        method:   &'static str,
        /// Expression the method is called on.
        receiver: Box<Expression<T>>
    },

    /// Constant value.
    Constant(String)
}

impl<T> Expression<T> {
    /// Member expression built from a name, for entities without generated
    /// accessors.
    pub fn member_named(name: &'static str) -> Self {
        Self::Member(Member::new(name))
    }

    /// Constant expression.
    pub fn constant(value: impl fmt::Display) -> Self {
        Self::Constant(value.to_string())
    }

    /// Wrap the expression in a conversion node.
    pub fn convert(self) -> Self {
        Self::Convert(Box::new(self))
    }

    fn shape(&self) -> String {
        match self {
            Self::Member(member) => format!("member `{}`", member.name),
            Self::Convert(inner) => format!("conversion of {}", inner.shape()),
            Self::Call {
                method, ..
            } => format!("call to `{method}`"),
            Self::Constant(value) => format!("constant `{value}`")
        }
    }
}

impl<T: 'static> Expression<T> {
    /// Resolve the expression to the member it accesses.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::InvalidExpression`] unless the expression is a
    /// member, or a single conversion node directly wrapping a member.
    pub fn resolve(&self) -> Result<&Member<T>, MappingError> {
        match self {
            Self::Member(member) => Ok(member),
            Self::Convert(inner) => match inner.as_ref() {
                Self::Member(member) => Ok(member),
                other => Err(Self::invalid(other))
            },
            other => Err(Self::invalid(other))
        }
    }

    fn invalid(rejected: &Self) -> MappingError {
        MappingError::InvalidExpression {
            entity: EntityType::of::<T>().short_name(),
            shape:  rejected.shape()
        }
    }
}

impl<T> From<Member<T>> for Expression<T> {
    fn from(member: Member<T>) -> Self {
        Self::Member(member)
    }
}

impl<T> fmt::Debug for Expression<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.shape())
    }
}
