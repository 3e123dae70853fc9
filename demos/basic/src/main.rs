// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Basic fluent mapping example.
//!
//! Depends on `fluent-mapping` only and demonstrates:
//! - `#[derive(Mappable)]` for typed member accessors
//! - an `EntityMapping` for one entity
//! - a minimal mapper that owns the records and runs both hooks
//!
//! Run with `RUST_LOG=debug cargo run -p demo-basic` to see registration and
//! factory events.

use fluent_mapping::{
    ColumnMetadata, ConnectionConfig, EntityMetadata, EntityRecord, EntityType, MemberInfo,
    Record, prelude::*
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Customer entity as stored by the application.
#[derive(Mappable)]
pub struct Customer {
    pub id:     i64,
    /// Display name shown on invoices.
    pub name:   String,
    pub email:  String,
    pub r#type: String,
    pub notes:  Option<String>
}

struct CustomerMap;

impl EntityMapping for CustomerMap {
    type Entity = Customer;

    fn configure(&self, builder: &mut EntityTypeBuilder<Customer>) -> Result<(), MappingError> {
        builder.to_table("customers");
        builder.property(|m| m.id)?.is_primary_key().is_identity();
        builder
            .property(|m| m.name)?
            .has_max_length(120)
            .is_not_null()
            .description_from_doc();
        builder.property(|m| m.email)?.column_name("email_address");
        builder.property(|m| m.r#type)?.column_name("customer_type");
        builder.property(|m| m.notes)?.ignore();
        Ok(())
    }
}

/// Mapper that describes entities from their member names.
#[derive(Debug, Default)]
struct Mapper {
    config: ConnectionConfig
}

impl MapperClient for Mapper {
    fn current_connection_config(&mut self) -> &mut ConnectionConfig {
        &mut self.config
    }
}

impl Mapper {
    fn describe<T: Mappable>(&self) -> Result<EntityRecord, MappingError> {
        let entity = EntityType::of::<T>();
        let metadata = T::MEMBER_NAMES
            .iter()
            .fold(EntityMetadata::new(entity.short_name()), |metadata, name| {
                metadata.with_column(ColumnMetadata::new(*name))
            });
        let record = Record::new(metadata);

        if let Some(services) = &self.config.configure_external_services {
            services.run_entity_name_service(&entity, &record)?;
            let columns = record.read().columns.clone();
            for column in &columns {
                let name = column.read().property_name().to_string();
                services.run_entity_service(&MemberInfo::declared_by::<T>(name), column)?;
            }
        }
        Ok(record)
    }
}

fn main() -> Result<(), MappingError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut mapper = Mapper::default();
    let registration = mapper.apply_fluent_mapping(FluentMapping::new().with(CustomerMap))?;
    info!(entities = registration.len(), "fluent mapping registered");

    let customer = mapper.describe::<Customer>()?;
    let customer = customer.read();
    info!(table = %customer.db_table_name, "described entity");
    for column in &customer.columns {
        let column = column.read();
        info!(
            property = column.property_name(),
            column = %column.db_column_name,
            primary_key = column.is_primary_key,
            nullable = column.is_nullable,
            ignored = column.is_ignore,
            "column"
        );
    }
    Ok(())
}
