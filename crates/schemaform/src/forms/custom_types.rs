// File: src/forms/custom_types.rs
// Purpose: Form built around domain types: a role enum and selected user ids

use crate::field::FieldSpec;
use crate::record;
use crate::rule::Rule;
use crate::schema::Schema;
use crate::value::{Record, Value};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserRole {
    Admin,
    LibraryAdmin,
    Newbie,
    Guest,
}

impl UserRole {
    pub const ALL: [UserRole; 4] = [
        UserRole::Admin,
        UserRole::LibraryAdmin,
        UserRole::Newbie,
        UserRole::Guest,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::Admin => "Admin",
            UserRole::LibraryAdmin => "LibraryAdmin",
            UserRole::Newbie => "Newbie",
            UserRole::Guest => "Guest",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| format!("unknown user role {:?}", s))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: &'static str,
    pub full_name: &'static str,
}

/// Users offered by the selection list
pub const USERS: [User; 3] = [
    User { id: "1", full_name: "Jane Doe" },
    User { id: "2", full_name: "John Doe" },
    User { id: "3", full_name: "Joe Pesci" },
];

pub fn defaults() -> Record {
    record! {
        "firstName" => "",
        "lastName" => "",
        "role" => Value::Null,
        "user" => Vec::<String>::new(),
    }
}

pub fn schema() -> Schema {
    let roles = UserRole::ALL.map(UserRole::as_str);

    Schema::new()
        .field(FieldSpec::text("firstName").trim().required("First name is required"))
        .field(FieldSpec::text("lastName").required("Last name is required"))
        .field(
            FieldSpec::enumeration("role")
                .required("User role is required")
                .rule(Rule::one_of(
                    roles,
                    format!("User role must be one of the following values {}", roles.join(", ")),
                )),
        )
        .field(
            FieldSpec::ids("user")
                .required("At least one user must be selected")
                .rule(Rule::min_items(1, "At least one user must be selected"))
                .rule(Rule::max_items(2, "Maximum of two users can be selected"))
                .rule(Rule::unique_items("A user can only be selected once"))
                .rule(Rule::custom(known_users, "Unknown user selected")),
        )
}

fn known_users(value: &Value, _: &Record) -> bool {
    value
        .as_list()
        .is_some_and(|ids| ids.iter().all(|id| USERS.iter().any(|u| u.id == id.as_str())))
}
