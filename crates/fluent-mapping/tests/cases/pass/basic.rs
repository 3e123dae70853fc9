// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Basic `#[derive(Mappable)]` on a struct with named fields.

use fluent_mapping::{Mappable, Member};

#[derive(Mappable)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub nickname: Option<String>,
}

fn main() {
    let members: UserMembers = User::MEMBERS;
    let _: Member<User> = members.email;
    let copy = members;
    assert_eq!(copy.id.name(), "id");
    assert_eq!(copy.nickname.type_name(), Some("Option<String>"));
    assert_eq!(User::MEMBER_NAMES, &["id", "email", "nickname"]);
    let _ = format!("{members:?}");
}
