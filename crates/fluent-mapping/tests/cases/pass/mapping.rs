// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! A complete mapping definition written against derived accessors.

use fluent_mapping::prelude::*;

#[derive(Mappable)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub orders: Vec<Order>,
}

pub struct Order {
    pub id: i64,
}

struct CustomerMap;

impl EntityMapping for CustomerMap {
    type Entity = Customer;

    fn configure(&self, builder: &mut EntityTypeBuilder<Customer>) -> Result<(), MappingError> {
        builder.to_table("customers");
        builder.property(|m| m.id)?.is_primary_key().is_identity();
        builder
            .property(|m| m.name.convert())?
            .column_name("customer_name")
            .has_max_length(80)
            .is_not_null();
        builder
            .property(|m| m.orders)?
            .one_to_many(|m| m.id, "customer_id", None)?;
        Ok(())
    }
}

fn main() {
    let _ = FluentMapping::new().with(CustomerMap);
}
