// File: src/forms/mod.rs
// Purpose: Bundled showcase forms and a registry that builds their schemas

pub mod basic;
pub mod combined;
pub mod conditional;
pub mod custom_types;
pub mod dynamic;
pub mod translations;
pub mod with_regex;
pub mod with_schema;

use crate::derive::{Params, SchemaCache};
use crate::error::SchemaError;
use crate::schema::Schema;
use crate::value::Record;
use combined::CombinedOptions;
use dynamic::MinPeople;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// How cross-field and conditional checks are expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flavor {
    /// `when` blocks and `equalsField` rules on the fields themselves
    Rules,
    /// Record-level refinements after the field pass
    Refinements,
}

impl FromStr for Flavor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rules" => Ok(Flavor::Rules),
            "refinements" | "refine" => Ok(Flavor::Refinements),
            other => Err(format!("unknown flavor {:?}, expected rules or refinements", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Showcase {
    Basic,
    WithSchema,
    WithRegex,
    ConditionalOptions,
    SchemaCombine,
    Dynamic,
    Translations,
    CustomType,
}

impl Showcase {
    pub const ALL: [Showcase; 8] = [
        Showcase::Basic,
        Showcase::WithSchema,
        Showcase::WithRegex,
        Showcase::ConditionalOptions,
        Showcase::SchemaCombine,
        Showcase::Dynamic,
        Showcase::Translations,
        Showcase::CustomType,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Showcase::Basic => "basic",
            Showcase::WithSchema => "with-schema",
            Showcase::WithRegex => "with-regex",
            Showcase::ConditionalOptions => "with-conditional-options",
            Showcase::SchemaCombine => "with-schema-combine",
            Showcase::Dynamic => "dynamic",
            Showcase::Translations => "with-translations",
            Showcase::CustomType => "with-custom-type",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Showcase::Basic => "Required names with a minimum length and a consent checkbox",
            Showcase::WithSchema => "Basic form with trimmed names",
            Showcase::WithRegex => "Password pattern and confirmation",
            Showcase::ConditionalOptions => "Email recipient required only when sending a message",
            Showcase::SchemaCombine => "Optional age and email parts (params: age, email)",
            Showcase::Dynamic => "Minimum party size from a parameter (param: numberOfPeople)",
            Showcase::Translations => "Messages as catalog keys",
            Showcase::CustomType => "User role enum and selected user ids",
        }
    }

    /// Flavor used when none is requested
    pub fn default_flavor(self) -> Flavor {
        match self {
            Showcase::WithRegex => Flavor::Refinements,
            _ => Flavor::Rules,
        }
    }

    /// Whether the form exists in both flavors
    pub fn has_flavors(self) -> bool {
        matches!(self, Showcase::WithRegex | Showcase::ConditionalOptions)
    }

    pub fn defaults(self) -> Record {
        match self {
            Showcase::Basic => basic::defaults(),
            Showcase::WithSchema => with_schema::defaults(),
            Showcase::WithRegex => with_regex::defaults(),
            Showcase::ConditionalOptions => conditional::defaults(),
            Showcase::SchemaCombine => combined::defaults(),
            Showcase::Dynamic => dynamic::defaults(),
            Showcase::Translations => translations::defaults(),
            Showcase::CustomType => custom_types::defaults(),
        }
    }
}

impl fmt::Display for Showcase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Showcase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|form| form.name() == s)
            .ok_or_else(|| format!("unknown form {:?}", s))
    }
}

/// Builds showcase schemas, deriving parameterized ones once per
/// parameter value
pub struct FormRegistry {
    fixed: HashMap<(Showcase, Flavor), Arc<Schema>>,
    dynamic: SchemaCache<MinPeople>,
    combined: SchemaCache<CombinedOptions>,
}

impl FormRegistry {
    pub fn new() -> Result<Self, SchemaError> {
        let mut fixed = HashMap::new();
        fixed.insert((Showcase::Basic, Flavor::Rules), basic::schema());
        fixed.insert((Showcase::WithSchema, Flavor::Rules), with_schema::schema());
        fixed.insert((Showcase::Translations, Flavor::Rules), translations::schema()?);
        fixed.insert((Showcase::CustomType, Flavor::Rules), custom_types::schema());
        for flavor in [Flavor::Rules, Flavor::Refinements] {
            fixed.insert((Showcase::WithRegex, flavor), with_regex::schema(flavor));
            fixed.insert((Showcase::ConditionalOptions, flavor), conditional::schema(flavor));
        }

        for schema in fixed.values() {
            schema.check_references()?;
        }

        Ok(Self {
            fixed: fixed.into_iter().map(|(k, v)| (k, Arc::new(v))).collect(),
            dynamic: SchemaCache::new(dynamic::derive),
            combined: SchemaCache::new(combined::derive),
        })
    }

    /// Schema for `form`. Parameters are parsed before any schema is built;
    /// `flavor` is ignored by forms that only have one.
    pub fn schema(
        &self,
        form: Showcase,
        params: &Params,
        flavor: Option<Flavor>,
    ) -> Result<Arc<Schema>, SchemaError> {
        match form {
            Showcase::Dynamic => Ok(self.dynamic.get(&MinPeople::from_params(params)?)),
            Showcase::SchemaCombine => Ok(self.combined.get(&CombinedOptions::from_params(params)?)),
            _ => {
                let flavor = match flavor {
                    Some(flavor) if form.has_flavors() => flavor,
                    _ => form.default_flavor(),
                };
                self.fixed
                    .get(&(form, flavor))
                    .cloned()
                    .ok_or_else(|| SchemaError::MissingParameter(format!("flavor for {}", form)))
            }
        }
    }
}
