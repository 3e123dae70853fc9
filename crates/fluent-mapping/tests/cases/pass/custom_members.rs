// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Test for `#[mappable(members = "...")]` and doc comments on private
//! entities.

use fluent_mapping::Mappable;

#[derive(Mappable)]
#[mappable(members = "ProductColumns")]
struct Product {
    /// Stock keeping unit.
    sku: String,
    price: u64,
}

fn main() {
    let columns: ProductColumns = Product::MEMBERS;
    assert_eq!(columns.sku.doc(), Some("Stock keeping unit."));
    assert_eq!(columns.price.doc(), None);
}
