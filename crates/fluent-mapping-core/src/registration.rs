// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Registration of fluent mappings on a mapper client.
//!
//! # Overview
//!
//! Registration collects the mappings into a table keyed by entity type and
//! installs two hooks in the client's [`ExternalServices`]:
//!
//! | Hook | Looks up | Runs mapping with |
//! |------|----------|-------------------|
//! | `entity_name_service` | visited entity type | table record |
//! | `entity_service` | declaring type of the visited property | column record |
//!
//! Entities without a mapping, and properties without a declaring type, pass
//! through both hooks untouched.
//!
//! # Example
//!
//! ```rust,ignore
//! let registration = FluentMapping::new()
//!     .with(PersonMap)
//!     .with(OrderMap)
//!     .apply(&mut client)?;
//! assert!(registration.contains::<Person>());
//! ```

use std::{
    any::TypeId,
    collections::{HashMap, hash_map::Entry},
    fmt,
    sync::Arc
};

use tracing::{debug, trace, warn};

use crate::{
    BuilderFactories, ColumnRecord, EntityMapping, EntityNameService, EntityRecord, EntityService,
    EntityType, ErasedMapping, MapperClient, MappingError, MemberInfo, into_erased
};

/// Options controlling how hooks are installed.
#[derive(Debug, Clone, Default)]
pub struct FluentMappingOptions {
    preserve_existing_hooks: bool,
    factories:               Option<Arc<BuilderFactories>>
}

impl FluentMappingOptions {
    /// Default options: replace existing hooks, use the global factory
    /// cache.
    pub const fn new() -> Self {
        Self {
            preserve_existing_hooks: false,
            factories:               None
        }
    }

    /// Run hooks already installed on the client before the fluent hooks,
    /// instead of replacing them.
    pub const fn preserve_existing_hooks(mut self, preserve: bool) -> Self {
        self.preserve_existing_hooks = preserve;
        self
    }

    /// Use `factories` instead of [`BuilderFactories::global`].
    pub fn factories(mut self, factories: Arc<BuilderFactories>) -> Self {
        self.factories = Some(factories);
        self
    }

    /// Check if existing hooks are chained.
    pub const fn preserves_existing_hooks(&self) -> bool {
        self.preserve_existing_hooks
    }

    /// Factory cache override, if any.
    pub fn factory_cache(&self) -> Option<&Arc<BuilderFactories>> {
        self.factories.as_ref()
    }
}

/// Factory cache captured by the installed hooks.
#[derive(Clone)]
enum FactorySource {
    Global,
    Shared(Arc<BuilderFactories>)
}

impl FactorySource {
    fn get(&self) -> &BuilderFactories {
        match self {
            Self::Global => BuilderFactories::global(),
            Self::Shared(factories) => factories
        }
    }
}

type MappingTable = HashMap<TypeId, Box<dyn ErasedMapping>>;

/// Summary of a completed registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    entities: Vec<EntityType>,
    chained:  bool
}

impl Registration {
    /// Mapped entity types, in registration order.
    pub fn entities(&self) -> &[EntityType] {
        &self.entities
    }

    /// Number of mapped entity types.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Check if no mapping was registered.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Check if entity `T` has a mapping.
    pub fn contains<T: 'static>(&self) -> bool {
        self.entities.iter().any(EntityType::is::<T>)
    }

    /// Check if a previously installed hook was chained.
    pub const fn chained(&self) -> bool {
        self.chained
    }
}

/// Register `mappings` on `client`.
///
/// Builds the entity-type table, then installs the entity-level and
/// property-level hooks, creating the client's hook container if it has
/// none.
///
/// # Errors
///
/// Returns [`MappingError::DuplicateMapping`] if two mappings target the
/// same entity type. The client is left untouched in that case.
pub fn apply_fluent_mapping<C, I>(
    client: &mut C,
    mappings: I,
    options: FluentMappingOptions
) -> Result<Registration, MappingError>
where
    C: MapperClient + ?Sized,
    I: IntoIterator<Item = Box<dyn ErasedMapping>>
{
    let mut table = MappingTable::new();
    let mut entities = Vec::new();
    for mapping in mappings {
        let entity = mapping.entity_type();
        match table.entry(entity.id()) {
            Entry::Occupied(_) => {
                return Err(MappingError::DuplicateMapping {
                    entity: entity.name()
                });
            }
            Entry::Vacant(vacant) => {
                vacant.insert(mapping);
                entities.push(entity);
            }
        }
    }

    let table = Arc::new(table);
    let factories = match options.factories {
        Some(factories) => FactorySource::Shared(factories),
        None => FactorySource::Global
    };

    let services = client.current_connection_config().external_services_mut();

    let previous_entity = services.entity_name_service.take();
    let previous_property = services.entity_service.take();
    let chained = options.preserve_existing_hooks
        && (previous_entity.is_some() || previous_property.is_some());
    if chained {
        warn!(
            entity_hook = previous_entity.is_some(),
            property_hook = previous_property.is_some(),
            "chaining fluent mapping hooks after existing hooks"
        );
    }
    let (previous_entity, previous_property) = if options.preserve_existing_hooks {
        (previous_entity, previous_property)
    } else {
        (None, None)
    };

    services.entity_name_service = Some(entity_hook(
        Arc::clone(&table),
        factories.clone(),
        previous_entity
    ));
    services.entity_service = Some(property_hook(table, factories, previous_property));

    debug!(
        mappings = entities.len(),
        entities = ?entities.iter().map(EntityType::short_name).collect::<Vec<_>>(),
        "registered fluent mappings"
    );

    Ok(Registration {
        entities,
        chained
    })
}

fn entity_hook(
    table: Arc<MappingTable>,
    factories: FactorySource,
    previous: Option<EntityNameService>
) -> EntityNameService {
    Arc::new(
        move |entity: &EntityType, record: &EntityRecord| -> Result<(), MappingError> {
            if let Some(previous) = &previous {
                previous(entity, record)?;
            }
            match table.get(&entity.id()) {
                Some(mapping) => mapping.configure(record, factories.get()),
                None => {
                    trace!(entity = %entity, "no fluent mapping for entity");
                    Ok(())
                }
            }
        }
    )
}

fn property_hook(
    table: Arc<MappingTable>,
    factories: FactorySource,
    previous: Option<EntityService>
) -> EntityService {
    Arc::new(
        move |member: &MemberInfo, record: &ColumnRecord| -> Result<(), MappingError> {
            if let Some(previous) = &previous {
                previous(member, record)?;
            }
            let Some(declaring) = &member.declaring_type else {
                trace!(property = %member.name, "property has no declaring type");
                return Ok(());
            };
            match table.get(&declaring.id()) {
                Some(mapping) => mapping.configure(record, factories.get()),
                None => Ok(())
            }
        }
    )
}

/// Collects mappings and registers them in one call.
#[derive(Default)]
pub struct FluentMapping {
    mappings: Vec<Box<dyn ErasedMapping>>,
    options:  FluentMappingOptions
}

impl FluentMapping {
    /// Empty registration with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a typed mapping.
    pub fn with<M: EntityMapping>(mut self, mapping: M) -> Self {
        self.mappings.push(into_erased(mapping));
        self
    }

    /// Add an already erased mapping.
    pub fn with_erased(mut self, mapping: Box<dyn ErasedMapping>) -> Self {
        self.mappings.push(mapping);
        self
    }

    /// Replace the options.
    pub fn options(mut self, options: FluentMappingOptions) -> Self {
        self.options = options;
        self
    }

    /// Register the collected mappings on `client`.
    ///
    /// # Errors
    ///
    /// See [`apply_fluent_mapping`].
    pub fn apply<C: MapperClient + ?Sized>(
        self,
        client: &mut C
    ) -> Result<Registration, MappingError> {
        apply_fluent_mapping(client, self.mappings, self.options)
    }
}

impl fmt::Debug for FluentMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entities: Vec<_> = self.mappings.iter().map(|m| m.entity_type()).collect();
        f.debug_struct("FluentMapping")
            .field("entities", &entities)
            .field("options", &self.options)
            .finish()
    }
}

/// Method form of [`apply_fluent_mapping`] on any [`MapperClient`].
pub trait FluentMappingExt: MapperClient {
    /// Register `mapping` on this client.
    ///
    /// # Errors
    ///
    /// See [`apply_fluent_mapping`].
    fn apply_fluent_mapping(
        &mut self,
        mapping: FluentMapping
    ) -> Result<Registration, MappingError>;
}

impl<C: MapperClient + ?Sized> FluentMappingExt for C {
    fn apply_fluent_mapping(
        &mut self,
        mapping: FluentMapping
    ) -> Result<Registration, MappingError> {
        mapping.apply(self)
    }
}
