// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Property (column) builder.
//!
//! # Methods
//!
//! | Method | Column field |
//! |--------|--------------|
//! | `column_name` | `db_column_name` |
//! | `is_primary_key` | `is_primary_key = true` |
//! | `is_identity` | `is_identity = true` |
//! | `has_max_length` | `length` |
//! | `is_nullable` / `is_not_null` | `is_nullable` |
//! | `ignore` | `is_ignore = true` |
//! | `is_only_ignored_at_insert` | `is_only_ignore_insert = true` |
//! | `is_only_ignored_at_update` | `is_only_ignore_update = true` |
//! | `column_description` | `column_description` |
//! | `one_to_one` / `one_to_many` / `many_to_many` | `navigation` |
//!
//! Every setter is an assignment, so applying the same chain twice leaves
//! the column as applying it once.

use std::fmt;

use crate::{
    ColumnMetadata, ColumnRecord, Expression, Junction, Mappable, MappingError, Member,
    Navigation, NavigationKind
};

/// Fluent builder over zero or one column record.
///
/// A builder without a record (a *dummy*) accepts every call and changes
/// nothing; it is what [`EntityTypeBuilder::property`](crate::EntityTypeBuilder::property)
/// returns for properties other than the one being visited.
pub struct PropertyBuilder<T> {
    column: Option<ColumnRecord>,
    member: Option<Member<T>>
}

impl<T> PropertyBuilder<T> {
    /// Builder over `column`.
    pub fn new(column: ColumnRecord) -> Self {
        Self {
            column: Some(column),
            member: None
        }
    }

    /// Builder without a record.
    pub fn dummy() -> Self {
        Self {
            column: None,
            member: None
        }
    }

    pub(crate) fn for_member(column: ColumnRecord, member: Member<T>) -> Self {
        Self {
            column: Some(column),
            member: Some(member)
        }
    }

    /// Check if the builder wraps a record.
    pub fn is_live(&self) -> bool {
        self.column.is_some()
    }

    fn apply(self, update: impl FnOnce(&mut ColumnMetadata)) -> Self {
        if let Some(column) = &self.column {
            update(&mut *column.write());
        }
        self
    }

    /// Set the database column name.
    pub fn column_name(self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.apply(|c| c.db_column_name = name)
    }

    /// Mark the column as part of the primary key.
    pub fn is_primary_key(self) -> Self {
        self.apply(|c| c.is_primary_key = true)
    }

    /// Mark the column as generated by the database (auto-increment).
    pub fn is_identity(self) -> Self {
        self.apply(|c| c.is_identity = true)
    }

    /// Set the maximum column length.
    pub fn has_max_length(self, length: u32) -> Self {
        self.apply(|c| c.length = Some(length))
    }

    /// Allow `NULL` values.
    pub fn is_nullable(self) -> Self {
        self.apply(|c| c.is_nullable = true)
    }

    /// Reject `NULL` values.
    pub fn is_not_null(self) -> Self {
        self.apply(|c| c.is_nullable = false)
    }

    /// Do not map the property to any column.
    pub fn ignore(self) -> Self {
        self.apply(|c| c.is_ignore = true)
    }

    /// Skip the column in `INSERT` statements, leaving it to the database
    /// default.
    pub fn is_only_ignored_at_insert(self) -> Self {
        self.apply(|c| c.is_only_ignore_insert = true)
    }

    /// Skip the column in `UPDATE` statements.
    pub fn is_only_ignored_at_update(self) -> Self {
        self.apply(|c| c.is_only_ignore_update = true)
    }

    /// Set the column description stored in the database.
    pub fn column_description(self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.apply(|c| c.column_description = Some(description))
    }

    /// Use the member's doc comment as the column description.
    ///
    /// Does nothing when the member has no doc comment, or when the builder
    /// was not created from a generated accessor.
    pub fn description_from_doc(self) -> Self {
        match self.member.and_then(|m| m.doc()) {
            Some(doc) => self.column_description(doc),
            None => self
        }
    }
}

impl<T: Mappable> PropertyBuilder<T> {
    /// Declare a one-to-one relation keyed on the `peer` property.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::InvalidExpression`] if `peer` is not a member
    /// access. The expression is checked on dummy builders too.
    pub fn one_to_one<E>(
        self,
        peer: impl FnOnce(&T::Members) -> E,
        first_key: &str,
        last_key: Option<&str>
    ) -> Result<Self, MappingError>
    where
        E: Into<Expression<T>>
    {
        let peer = peer(&T::MEMBERS).into();
        self.navigate(NavigationKind::OneToOne, peer, first_key, last_key, None)
    }

    /// Declare a one-to-many relation keyed on the `peer` property.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::InvalidExpression`] if `peer` is not a member
    /// access.
    pub fn one_to_many<E>(
        self,
        peer: impl FnOnce(&T::Members) -> E,
        first_key: &str,
        last_key: Option<&str>
    ) -> Result<Self, MappingError>
    where
        E: Into<Expression<T>>
    {
        let peer = peer(&T::MEMBERS).into();
        self.navigate(NavigationKind::OneToMany, peer, first_key, last_key, None)
    }

    /// Declare a many-to-many relation through junction entity `J`.
    ///
    /// `a_key` is the junction column referencing this entity, `b_key` the
    /// one referencing the related entity.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::InvalidExpression`] if `peer` is not a member
    /// access.
    pub fn many_to_many<J, E>(
        self,
        peer: impl FnOnce(&T::Members) -> E,
        a_key: &str,
        b_key: &str
    ) -> Result<Self, MappingError>
    where
        J: 'static,
        E: Into<Expression<T>>
    {
        let junction = Junction::of::<J>(a_key, b_key);
        self.navigate(
            NavigationKind::ManyToMany,
            peer(&T::MEMBERS).into(),
            a_key,
            Some(b_key),
            Some(junction)
        )
    }

    fn navigate(
        self,
        kind: NavigationKind,
        peer: Expression<T>,
        first_key: &str,
        last_key: Option<&str>,
        junction: Option<Junction>
    ) -> Result<Self, MappingError> {
        let property = peer.resolve()?.name().to_string();
        let navigation = Navigation {
            kind,
            property,
            first_key: first_key.to_string(),
            last_key: last_key.map(str::to_string),
            junction
        };
        Ok(self.apply(|c| c.navigation = Some(navigation)))
    }
}

impl<T> Default for PropertyBuilder<T> {
    fn default() -> Self {
        Self::dummy()
    }
}

impl<T> fmt::Debug for PropertyBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyBuilder")
            .field("column", &self.column.as_ref().map(|c| c.read().property_name().to_string()))
            .field("member", &self.member)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Record;

    struct Person;
    struct Group;
    struct PersonGroup;

    #[derive(Clone, Copy)]
    struct PersonMembers {
        school_id: Member<Person>,
        groups:    Member<Person>
    }

    impl Mappable for Person {
        type Members = PersonMembers;

        const MEMBERS: PersonMembers = PersonMembers {
            school_id: Member::new("school_id"),
            groups:    Member::new("groups")
        };
        const MEMBER_NAMES: &'static [&'static str] = &["school_id", "groups"];
    }

    fn live(name: &str) -> (ColumnRecord, PropertyBuilder<Person>) {
        let record = Record::new(ColumnMetadata::new(name));
        (record.clone(), PropertyBuilder::new(record))
    }

    #[test]
    fn fluent_chain_mutates_column() {
        let (record, builder) = live("name");
        builder
            .column_name("full_name")
            .is_primary_key()
            .is_identity()
            .has_max_length(100)
            .is_not_null()
            .column_description("Full name");

        let column = record.snapshot();
        assert_eq!(column.db_column_name, "full_name");
        assert!(column.is_primary_key);
        assert!(column.is_identity);
        assert_eq!(column.length, Some(100));
        assert!(!column.is_nullable);
        assert_eq!(column.column_description.as_deref(), Some("Full name"));
    }

    #[test]
    fn ignore_flags() {
        let (record, builder) = live("computed");
        builder
            .ignore()
            .is_only_ignored_at_insert()
            .is_only_ignored_at_update();

        let column = record.snapshot();
        assert!(column.is_ignore);
        assert!(column.is_only_ignore_insert);
        assert!(column.is_only_ignore_update);
    }

    #[test]
    fn nullable_last_call_wins() {
        let (record, builder) = live("nickname");
        builder.is_not_null().is_nullable();
        assert!(record.read().is_nullable);
    }

    #[test]
    fn dummy_accepts_everything() {
        let builder = PropertyBuilder::<Person>::dummy()
            .column_name("x")
            .is_primary_key()
            .has_max_length(1)
            .ignore()
            .one_to_one(|m| m.school_id, "school_id", None)
            .unwrap();
        assert!(!builder.is_live());
    }

    #[test]
    fn dummy_still_validates_peer_expression() {
        let err = PropertyBuilder::<Person>::dummy()
            .one_to_many(|_| Expression::<Person>::constant(1), "id", None)
            .unwrap_err();
        assert!(matches!(err, MappingError::InvalidExpression { .. }));
    }

    #[test]
    fn one_to_one_navigation() {
        let (record, builder) = live("school");
        builder
            .one_to_one(|m| m.school_id, "school_id", None)
            .unwrap();

        let navigation = record.snapshot().navigation.unwrap();
        assert_eq!(navigation.kind, NavigationKind::OneToOne);
        assert_eq!(navigation.property, "school_id");
        assert_eq!(navigation.first_key, "school_id");
        assert_eq!(navigation.last_key, None);
        assert!(navigation.junction.is_none());
    }

    #[test]
    fn one_to_many_navigation_with_last_key() {
        let (record, builder) = live("orders");
        builder
            .one_to_many(|m| m.school_id.convert(), "person_id", Some("id"))
            .unwrap();

        let navigation = record.snapshot().navigation.unwrap();
        assert_eq!(navigation.kind, NavigationKind::OneToMany);
        assert_eq!(navigation.last_key.as_deref(), Some("id"));
    }

    #[test]
    fn many_to_many_navigation() {
        let (record, builder) = live("group_list");
        builder
            .many_to_many::<PersonGroup, _>(|m| m.groups, "person_id", "group_id")
            .unwrap();

        let navigation = record.snapshot().navigation.unwrap();
        let junction = navigation.junction.unwrap();
        assert_eq!(navigation.kind, NavigationKind::ManyToMany);
        assert_eq!(navigation.property, "groups");
        assert_eq!(junction.a_key, "person_id");
        assert_eq!(junction.b_key, "group_id");
        assert!(junction.is::<PersonGroup>());
        assert!(!junction.is::<Group>());
    }

    #[test]
    fn description_from_doc() {
        let record = Record::new(ColumnMetadata::new("school_id"));
        let member = Member::<Person>::new("school_id").with_doc("School reference.");
        PropertyBuilder::for_member(record.clone(), member).description_from_doc();
        assert_eq!(
            record.read().column_description.as_deref(),
            Some("School reference.")
        );
    }

    #[test]
    fn description_from_doc_without_doc() {
        let (record, builder) = live("name");
        builder.description_from_doc();
        assert_eq!(record.read().column_description, None);
    }

    #[test]
    fn chain_is_idempotent() {
        let (record, _) = live("name");
        let apply = || {
            PropertyBuilder::<Person>::new(record.clone())
                .column_name("full_name")
                .has_max_length(100)
                .is_not_null();
        };
        apply();
        let once = record.snapshot();
        apply();
        assert_eq!(record.snapshot(), once);
    }
}
