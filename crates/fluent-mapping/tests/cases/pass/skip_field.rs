// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Test for `#[mappable(skip)]` on fields.

use fluent_mapping::Mappable;

#[derive(Mappable)]
pub struct Session {
    pub token: String,

    #[mappable(skip)]
    pub decoded: Vec<u8>,
}

fn main() {
    assert_eq!(Session::MEMBER_NAMES, &["token"]);
    assert_eq!(Session::MEMBERS.token.name(), "token");
}
