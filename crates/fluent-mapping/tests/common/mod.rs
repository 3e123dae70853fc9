// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Minimal mapper client used by the integration tests.
//!
//! Describes an entity the way an external mapper does: one table record,
//! one column record per member, the entity-level hook first, then the
//! property-level hook for every column.

#![allow(dead_code)]

use fluent_mapping::{
    ColumnMetadata, ConnectionConfig, EntityMetadata, EntityRecord, EntityType, ExternalServices,
    MapperClient, Mappable, MappingError, MemberInfo, Record
};

#[derive(Debug, Default)]
pub struct TestMapper {
    config: ConnectionConfig
}

impl MapperClient for TestMapper {
    fn current_connection_config(&mut self) -> &mut ConnectionConfig {
        &mut self.config
    }
}

impl TestMapper {
    pub fn services(&self) -> Option<&ExternalServices> {
        self.config.configure_external_services.as_ref()
    }

    /// Create the records of entity `T` and run both hooks over them.
    pub fn describe<T: Mappable>(&self) -> Result<EntityRecord, MappingError> {
        let entity = EntityType::of::<T>();
        let metadata = T::MEMBER_NAMES
            .iter()
            .fold(EntityMetadata::new(entity.short_name()), |metadata, name| {
                metadata.with_column(ColumnMetadata::new(*name))
            });
        let record = Record::new(metadata);
        self.revisit::<T>(&record)?;
        Ok(record)
    }

    /// Run both hooks again over existing records of entity `T`.
    pub fn revisit<T: Mappable>(&self, record: &EntityRecord) -> Result<(), MappingError> {
        let Some(services) = self.services() else {
            return Ok(());
        };

        services.run_entity_name_service(&EntityType::of::<T>(), record)?;

        let columns = record.read().columns.clone();
        for column in &columns {
            let name = column.read().property_name().to_string();
            services.run_entity_service(&MemberInfo::declared_by::<T>(name), column)?;
        }
        Ok(())
    }

    /// Run the property-level hook for a member without a declaring type.
    pub fn visit_undeclared(&self, name: &str) -> Result<ColumnMetadata, MappingError> {
        let column = Record::new(ColumnMetadata::new(name));
        if let Some(services) = self.services() {
            services.run_entity_service(&MemberInfo::new(name), &column)?;
        }
        Ok(column.snapshot())
    }
}
