// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Hook surface of the external mapper.
//!
//! The mapper owns its metadata records and exposes two hook slots it calls
//! while building them:
//!
//! | Slot | Called with | Called when |
//! |------|-------------|-------------|
//! | `entity_name_service` | entity type, table record | an entity is first described |
//! | `entity_service` | property info, column record | each property is described |
//!
//! A mapper integrates by implementing [`MapperClient`] and calling the
//! hooks through [`ExternalServices::run_entity_name_service`] and
//! [`ExternalServices::run_entity_service`].

use std::{fmt, sync::Arc};

use crate::{ColumnRecord, EntityRecord, EntityType, MappingError, MemberInfo};

/// Entity-level hook.
pub type EntityNameService =
    Arc<dyn Fn(&EntityType, &EntityRecord) -> Result<(), MappingError> + Send + Sync>;

/// Property-level hook.
pub type EntityService =
    Arc<dyn Fn(&MemberInfo, &ColumnRecord) -> Result<(), MappingError> + Send + Sync>;

/// Hook slots of a mapper connection.
#[derive(Clone, Default)]
pub struct ExternalServices {
    /// Entity-level hook.
    pub entity_name_service: Option<EntityNameService>,

    /// Property-level hook.
    pub entity_service: Option<EntityService>
}

impl ExternalServices {
    /// Empty slots.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the entity-level hook, if installed.
    ///
    /// # Errors
    ///
    /// Propagates the hook's error.
    pub fn run_entity_name_service(
        &self,
        entity: &EntityType,
        record: &EntityRecord
    ) -> Result<(), MappingError> {
        match &self.entity_name_service {
            Some(hook) => hook(entity, record),
            None => Ok(())
        }
    }

    /// Run the property-level hook, if installed.
    ///
    /// # Errors
    ///
    /// Propagates the hook's error.
    pub fn run_entity_service(
        &self,
        member: &MemberInfo,
        record: &ColumnRecord
    ) -> Result<(), MappingError> {
        match &self.entity_service {
            Some(hook) => hook(member, record),
            None => Ok(())
        }
    }
}

impl fmt::Debug for ExternalServices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExternalServices")
            .field("entity_name_service", &self.entity_name_service.is_some())
            .field("entity_service", &self.entity_service.is_some())
            .finish()
    }
}

/// Configuration of the mapper's current connection.
#[derive(Debug, Clone, Default)]
pub struct ConnectionConfig {
    /// Hook container, created on demand by registration.
    pub configure_external_services: Option<ExternalServices>
}

impl ConnectionConfig {
    /// Hook container, created if absent.
    pub fn external_services_mut(&mut self) -> &mut ExternalServices {
        self.configure_external_services
            .get_or_insert_with(ExternalServices::default)
    }
}

/// External mapper client fluent mappings are registered on.
pub trait MapperClient {
    /// Configuration of the current connection.
    fn current_connection_config(&mut self) -> &mut ConnectionConfig;
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::{ColumnMetadata, EntityMetadata, Record};

    struct Person;

    #[test]
    fn empty_slots_are_noops() {
        let services = ExternalServices::new();
        let entity = EntityType::of::<Person>();
        services
            .run_entity_name_service(&entity, &Record::new(EntityMetadata::new("Person")))
            .unwrap();
        services
            .run_entity_service(
                &MemberInfo::declared_by::<Person>("name"),
                &Record::new(ColumnMetadata::new("name"))
            )
            .unwrap();
    }

    #[test]
    fn installed_hooks_run() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let services = ExternalServices {
            entity_name_service: Some(Arc::new(
                move |_: &EntityType, record: &EntityRecord| -> Result<(), MappingError> {
                    counter.fetch_add(1, Ordering::SeqCst);
                    record.write().db_table_name = "tbl_person".to_string();
                    Ok(())
                }
            )),
            entity_service:      Some(Arc::new(
                |_: &MemberInfo, _: &ColumnRecord| -> Result<(), MappingError> {
                    Err(MappingError::custom("rejected"))
                }
            ))
        };

        let record = Record::new(EntityMetadata::new("Person"));
        services
            .run_entity_name_service(&EntityType::of::<Person>(), &record)
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(record.read().db_table_name, "tbl_person");

        let err = services
            .run_entity_service(
                &MemberInfo::new("name"),
                &Record::new(ColumnMetadata::new("name"))
            )
            .unwrap_err();
        assert_eq!(err, MappingError::custom("rejected"));
    }

    #[test]
    fn external_services_created_on_demand() {
        let mut config = ConnectionConfig::default();
        assert!(config.configure_external_services.is_none());
        config.external_services_mut();
        assert!(config.configure_external_services.is_some());
    }

    #[test]
    fn debug_reports_installed_slots() {
        let services = ExternalServices {
            entity_name_service: None,
            entity_service:      Some(Arc::new(
                |_: &MemberInfo, _: &ColumnRecord| -> Result<(), MappingError> { Ok(()) }
            ))
        };
        let debug = format!("{services:?}");
        assert!(debug.contains("entity_name_service: false"));
        assert!(debug.contains("entity_service: true"));
    }
}
