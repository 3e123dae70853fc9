// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Builder-factory cache.
//!
//! Mapping hooks fire once per entity and once per property, so the work of
//! choosing how to construct a builder for a given record is done once per
//! key and cached for the lifetime of the process.
//!
//! # Overview
//!
//! - [`Constructible`] — Builder types list their constructors explicitly
//! - [`Constructor`] — One constructor and its parameter type
//! - [`BuilderFactory`] — Selected constructor plus its prepared invoker
//! - [`BuilderFactories`] — Concurrent cache of factories
//!
//! # Constructor Selection
//!
//! On a cache miss the unary constructors of the builder are tried in order:
//!
//! | Tier | Rule |
//! |------|------|
//! | [`ConstructorTier::ExactArgument`] | Parameter type is the runtime type of the argument |
//! | [`ConstructorTier::EntityRecord`] | Parameter type names the entity-level record |
//! | [`ConstructorTier::AnyUnary`] | First constructor with one parameter |
//!
//! No match is [`MappingError::NoSuitableConstructor`].
//!
//! # Cache Key
//!
//! `(entity type, builder type, argument runtime type)`. A missing argument
//! uses a private placeholder type, so a factory selected without an
//! argument never collides with one selected for a concrete record type.
//!
//! # Concurrency
//!
//! Constructors are selected outside the map's shard locks, so a
//! [`Constructible`] impl may use the cache itself. Concurrent first access
//! for one key may select more than once; the first inserted factory wins
//! through the `DashMap` entry API and every caller receives that same
//! `Arc`. Entries are never evicted.

use std::{
    any::{Any, TypeId},
    fmt,
    sync::{Arc, LazyLock}
};

use dashmap::{DashMap, mapref::entry::Entry};
use tracing::{debug, trace};

use crate::{EntityType, MappingError};

/// Placeholder argument type used when no constructor argument is known.
struct Untyped;

static GLOBAL: LazyLock<BuilderFactories> = LazyLock::new(BuilderFactories::new);

/// Builder type with an explicit list of constructors.
///
/// ```rust
/// use fluent_mapping_core::{Constructible, Constructor};
///
/// #[derive(Clone)]
/// struct Settings(String);
///
/// struct SettingsBuilder(Settings);
///
/// impl Constructible for SettingsBuilder {
///     fn constructors() -> Vec<Constructor<Self>> {
///         vec![Constructor::unary(SettingsBuilder)]
///     }
/// }
/// ```
pub trait Constructible: Sized + 'static {
    /// All constructors of the builder, in declaration order.
    fn constructors() -> Vec<Constructor<Self>>;
}

type Invoker<B> = Arc<dyn Fn(&dyn Any) -> Option<B> + Send + Sync>;

/// Type of one constructor parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamInfo {
    type_id:   TypeId,
    type_name: &'static str
}

impl ParamInfo {
    /// Parameter of type `P`.
    pub fn of<P: 'static>() -> Self {
        Self {
            type_id:   TypeId::of::<P>(),
            type_name: std::any::type_name::<P>()
        }
    }

    /// Parameter [`TypeId`].
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Parameter type name.
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Check if an argument of runtime type `arg` can be passed directly.
    pub fn accepts(&self, arg: TypeId) -> bool {
        self.type_id == arg
    }

    /// Check if the parameter type names the entity-level record.
    pub fn denotes_entity_record(&self) -> bool {
        self.type_name.contains("EntityMetadata")
    }
}

/// One constructor of a builder type.
pub struct Constructor<B> {
    params: Vec<ParamInfo>,
    invoke: Invoker<B>
}

impl<B: 'static> Constructor<B> {
    /// Constructor taking a single parameter of type `P`.
    ///
    /// The argument is converted by downcasting to `P` and cloning it.
    pub fn unary<P>(build: fn(P) -> B) -> Self
    where
        P: Clone + Send + Sync + 'static
    {
        Self {
            params: vec![ParamInfo::of::<P>()],
            invoke: Arc::new(move |arg: &dyn Any| arg.downcast_ref::<P>().cloned().map(build))
        }
    }

    /// Constructor without parameters.
    ///
    /// Never selected by the factory cache; listed so builders can describe
    /// their full constructor set.
    pub fn nullary(build: fn() -> B) -> Self {
        Self {
            params: Vec::new(),
            invoke: Arc::new(move |_: &dyn Any| Some(build()))
        }
    }

    /// Number of parameters.
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// First parameter, if any.
    pub fn param(&self) -> Option<&ParamInfo> {
        self.params.first()
    }

    fn unary_param(&self) -> Option<&ParamInfo> {
        match self.params.as_slice() {
            [param] => Some(param),
            _ => None
        }
    }
}

impl<B> fmt::Debug for Constructor<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Rule that selected a factory's constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstructorTier {
    /// Parameter type equals the runtime argument type.
    ExactArgument,

    /// Parameter type names the entity-level record.
    EntityRecord,

    /// First single-parameter constructor.
    AnyUnary
}

/// Selected constructor of builder `B`, ready to invoke.
pub struct BuilderFactory<B> {
    tier:   ConstructorTier,
    param:  ParamInfo,
    invoke: Invoker<B>
}

impl<B: Constructible> BuilderFactory<B> {
    /// Select a constructor of `B` for an argument of runtime type `arg`.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::NoSuitableConstructor`] if `B` has no
    /// single-parameter constructor.
    pub fn select(arg: Option<TypeId>) -> Result<Self, MappingError> {
        let constructors = B::constructors();
        let unary = || {
            constructors
                .iter()
                .filter_map(|c| c.unary_param().map(|p| (c, p)))
        };

        let chosen = arg
            .and_then(|arg| unary().find(|(_, p)| p.accepts(arg)))
            .map(|found| (ConstructorTier::ExactArgument, found))
            .or_else(|| {
                unary()
                    .find(|(_, p)| p.denotes_entity_record())
                    .map(|found| (ConstructorTier::EntityRecord, found))
            })
            .or_else(|| unary().next().map(|found| (ConstructorTier::AnyUnary, found)));

        let Some((tier, (constructor, param))) = chosen else {
            return Err(MappingError::NoSuitableConstructor {
                builder: std::any::type_name::<B>()
            });
        };

        Ok(Self {
            tier,
            param: *param,
            invoke: Arc::clone(&constructor.invoke)
        })
    }

    /// Construct a builder from a type-erased argument.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::ArgumentMismatch`] if `arg` is not of the
    /// selected constructor's parameter type.
    pub fn build(&self, arg: &dyn Any) -> Result<B, MappingError> {
        (self.invoke)(arg).ok_or(MappingError::ArgumentMismatch {
            builder:  std::any::type_name::<B>(),
            expected: self.param.type_name
        })
    }

    /// Tier that selected the constructor.
    pub const fn tier(&self) -> ConstructorTier {
        self.tier
    }

    /// Parameter of the selected constructor.
    pub const fn param(&self) -> &ParamInfo {
        &self.param
    }
}

impl<B> fmt::Debug for BuilderFactory<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuilderFactory")
            .field("tier", &self.tier)
            .field("param", &self.param)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct FactoryKey {
    entity:   TypeId,
    builder:  TypeId,
    argument: TypeId
}

/// Concurrent, append-only cache of [`BuilderFactory`] values.
#[derive(Default)]
pub struct BuilderFactories {
    entries: DashMap<FactoryKey, Arc<dyn Any + Send + Sync>>
}

impl BuilderFactories {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new()
        }
    }

    /// Process-wide cache used by default.
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Get or create the factory of builder `B` for `entity`.
    ///
    /// `arg` is the constructor argument the factory will be used with; its
    /// runtime type is part of the cache key and drives the first selection
    /// tier.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::NoSuitableConstructor`] on a miss when no
    /// constructor of `B` matches. Failed selections are not cached.
    pub fn factory<B: Constructible>(
        &self,
        entity: EntityType,
        arg: Option<&dyn Any>
    ) -> Result<Arc<BuilderFactory<B>>, MappingError> {
        let runtime = arg.map(<dyn Any>::type_id);
        let key = FactoryKey {
            entity:   entity.id(),
            builder:  TypeId::of::<B>(),
            argument: runtime.unwrap_or_else(TypeId::of::<Untyped>)
        };

        let builder = std::any::type_name::<B>();

        let cached = self.entries.get(&key).map(|hit| Arc::clone(hit.value()));
        let erased = match cached {
            Some(hit) => {
                trace!(entity = %entity, builder, "builder factory cache hit");
                hit
            }
            None => {
                // No shard lock may be held while `B::constructors()` runs.
                let factory = BuilderFactory::<B>::select(runtime)?;
                let tier = factory.tier();
                let param = factory.param().type_name();
                match self.entries.entry(key) {
                    Entry::Occupied(occupied) => Arc::clone(occupied.get()),
                    Entry::Vacant(vacant) => {
                        debug!(
                            entity = %entity,
                            builder,
                            tier = ?tier,
                            param,
                            "compiled builder factory"
                        );
                        let factory: Arc<dyn Any + Send + Sync> = Arc::new(factory);
                        vacant.insert(Arc::clone(&factory));
                        factory
                    }
                }
            }
        };

        // The key carries `TypeId::of::<B>()`, so the entry is always a
        // `BuilderFactory<B>`.
        erased
            .downcast::<BuilderFactory<B>>()
            .map_err(|_| MappingError::NoSuitableConstructor {
                builder
            })
    }

    /// Construct a builder `B` for `entity` from `arg`, through the cache.
    ///
    /// # Errors
    ///
    /// Propagates selection and argument conversion errors.
    pub fn build<B: Constructible>(
        &self,
        entity: EntityType,
        arg: &dyn Any
    ) -> Result<B, MappingError> {
        self.factory::<B>(entity, Some(arg))?.build(arg)
    }

    /// Number of cached factories.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for BuilderFactories {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuilderFactories")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::{
        ColumnMetadata, ColumnRecord, EntityMetadata, EntityRecord, EntityTypeBuilder, Mappable,
        Member, Record
    };

    struct Person;

    #[derive(Clone, Copy)]
    struct PersonMembers {
        name: Member<Person>
    }

    impl Mappable for Person {
        type Members = PersonMembers;

        const MEMBERS: PersonMembers = PersonMembers {
            name: Member::new("name")
        };
        const MEMBER_NAMES: &'static [&'static str] = &["name"];
    }

    #[derive(Clone)]
    struct LegacyRecord(&'static str);

    struct LegacyBuilder(LegacyRecord);

    impl Constructible for LegacyBuilder {
        fn constructors() -> Vec<Constructor<Self>> {
            vec![Constructor::unary(LegacyBuilder)]
        }
    }

    struct CacheAwareBuilder(LegacyRecord);

    impl Constructible for CacheAwareBuilder {
        fn constructors() -> Vec<Constructor<Self>> {
            // Read-locks every shard of the cache.
            let _ = BuilderFactories::global().len();
            vec![Constructor::unary(CacheAwareBuilder)]
        }
    }

    struct NoArgBuilder;

    impl Constructible for NoArgBuilder {
        fn constructors() -> Vec<Constructor<Self>> {
            vec![Constructor::nullary(|| NoArgBuilder)]
        }
    }

    fn person() -> EntityType {
        EntityType::of::<Person>()
    }

    #[test]
    fn exact_argument_tier_for_column_record() {
        let cache = BuilderFactories::new();
        let column: ColumnRecord = Record::new(ColumnMetadata::new("name"));

        let factory = cache
            .factory::<EntityTypeBuilder<Person>>(person(), Some(&column))
            .unwrap();
        assert_eq!(factory.tier(), ConstructorTier::ExactArgument);

        let builder = factory.build(&column).unwrap();
        assert!(builder.is_column_scope());
    }

    #[test]
    fn entity_record_tier_without_argument() {
        let cache = BuilderFactories::new();
        let factory = cache
            .factory::<EntityTypeBuilder<Person>>(person(), None)
            .unwrap();
        assert_eq!(factory.tier(), ConstructorTier::EntityRecord);

        let entity: EntityRecord = Record::new(EntityMetadata::new("Person"));
        assert!(factory.build(&entity).unwrap().is_entity_scope());
    }

    #[test]
    fn any_unary_tier_fallback() {
        let cache = BuilderFactories::new();
        let factory = cache.factory::<LegacyBuilder>(person(), None).unwrap();
        assert_eq!(factory.tier(), ConstructorTier::AnyUnary);

        let builder = factory.build(&LegacyRecord("legacy")).unwrap();
        assert_eq!((builder.0).0, "legacy");
    }

    #[test]
    fn any_unary_tier_with_unrelated_argument() {
        let cache = BuilderFactories::new();
        let column: ColumnRecord = Record::new(ColumnMetadata::new("name"));

        let factory = cache
            .factory::<LegacyBuilder>(person(), Some(&column))
            .unwrap();
        assert_eq!(factory.tier(), ConstructorTier::AnyUnary);

        let err = factory.build(&column).err().unwrap();
        assert!(matches!(err, MappingError::ArgumentMismatch { .. }));
    }

    #[test]
    fn no_suitable_constructor() {
        let cache = BuilderFactories::new();
        let err = cache.factory::<NoArgBuilder>(person(), None).unwrap_err();
        assert!(matches!(err, MappingError::NoSuitableConstructor { .. }));
        assert!(cache.is_empty());
    }

    #[test]
    fn repeated_lookup_hits_cache() {
        let cache = BuilderFactories::new();
        let column: ColumnRecord = Record::new(ColumnMetadata::new("name"));

        let first = cache
            .factory::<EntityTypeBuilder<Person>>(person(), Some(&column))
            .unwrap();
        let second = cache
            .factory::<EntityTypeBuilder<Person>>(person(), Some(&column))
            .unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn argument_type_is_part_of_key() {
        let cache = BuilderFactories::new();
        let column: ColumnRecord = Record::new(ColumnMetadata::new("name"));
        let entity: EntityRecord = Record::new(EntityMetadata::new("Person"));

        cache
            .factory::<EntityTypeBuilder<Person>>(person(), Some(&column))
            .unwrap();
        cache
            .factory::<EntityTypeBuilder<Person>>(person(), Some(&entity))
            .unwrap();
        cache
            .factory::<EntityTypeBuilder<Person>>(person(), None)
            .unwrap();
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn concurrent_first_access_keeps_one_entry() {
        let cache = BuilderFactories::new();

        let factories: Vec<_> = thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|i| {
                    let cache = &cache;
                    scope.spawn(move || {
                        let column: ColumnRecord =
                            Record::new(ColumnMetadata::new(format!("c{i}")));
                        let factory = cache
                            .factory::<EntityTypeBuilder<Person>>(person(), Some(&column))
                            .unwrap();
                        assert!(factory.build(&column).unwrap().is_column_scope());
                        factory
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(cache.len(), 1);
        assert!(factories.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }

    #[test]
    fn constructors_may_use_the_cache() {
        let record = LegacyRecord("legacy");
        let builder = BuilderFactories::global()
            .build::<CacheAwareBuilder>(person(), &record)
            .unwrap();
        assert_eq!((builder.0).0, "legacy");

        let factory = BuilderFactories::global()
            .factory::<CacheAwareBuilder>(person(), Some(&record))
            .unwrap();
        assert_eq!(factory.tier(), ConstructorTier::ExactArgument);
    }

    #[test]
    fn param_info_classification() {
        let entity = ParamInfo::of::<EntityRecord>();
        let column = ParamInfo::of::<ColumnRecord>();
        assert!(entity.denotes_entity_record());
        assert!(!column.denotes_entity_record());
        assert!(column.accepts(TypeId::of::<ColumnRecord>()));
        assert!(!column.accepts(TypeId::of::<EntityRecord>()));
    }

    #[test]
    fn constructor_arity() {
        assert_eq!(Constructor::unary(LegacyBuilder).arity(), 1);
        assert_eq!(Constructor::nullary(|| NoArgBuilder).arity(), 0);
        assert!(Constructor::nullary(|| NoArgBuilder).param().is_none());
    }
}
