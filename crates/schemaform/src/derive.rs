// File: src/derive.rs
// Purpose: Parameterized schema derivation and memoization

use crate::error::SchemaError;
use crate::schema::Schema;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

type Derive<P, S> = Box<dyn Fn(&P) -> S + Send + Sync>;

/// Memoizes schemas by parameter value.
///
/// Derivation must be a pure function of the parameters, so identical
/// parameters always share one `Arc`. The cache belongs to its caller.
pub struct SchemaCache<P, S = Schema> {
    derive: Derive<P, S>,
    entries: Mutex<HashMap<P, Arc<S>>>,
}

impl<P, S> SchemaCache<P, S>
where
    P: Hash + Eq + Clone,
{
    pub fn new(derive: impl Fn(&P) -> S + Send + Sync + 'static) -> Self {
        Self {
            derive: Box::new(derive),
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Schema for `params`, derived on first request
    pub fn get(&self, params: &P) -> Arc<S> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(schema) = entries.get(params) {
            return Arc::clone(schema);
        }

        tracing::debug!(cached = entries.len(), "deriving schema for new parameters");
        let schema = Arc::new((self.derive)(params));
        entries.insert(params.clone(), Arc::clone(&schema));
        schema
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
}

/// Named string parameters, e.g. taken from a route segment or `key=value` args
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Parse `key=value` pairs
    pub fn parse_pairs<S: AsRef<str>>(pairs: &[S]) -> Result<Self, SchemaError> {
        let mut params = Self::new();
        for pair in pairs {
            let pair = pair.as_ref();
            let (name, value) = pair.split_once('=').ok_or_else(|| SchemaError::InvalidParameter {
                name: pair.to_string(),
                value: String::new(),
                reason: "expected key=value".to_string(),
            })?;
            params.insert(name.trim(), value.trim());
        }
        Ok(params)
    }

    pub fn raw(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Parse a parameter, failing if it is missing
    pub fn require<T>(&self, name: &str) -> Result<T, SchemaError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let raw = self
            .raw(name)
            .ok_or_else(|| SchemaError::MissingParameter(name.to_string()))?;
        parse_param(name, raw)
    }

    /// Parse a parameter, using `default` when it is missing
    pub fn get_or<T>(&self, name: &str, default: T) -> Result<T, SchemaError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.raw(name) {
            Some(raw) => parse_param(name, raw),
            None => Ok(default),
        }
    }
}

fn parse_param<T>(name: &str, raw: &str) -> Result<T, SchemaError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>().map_err(|e| SchemaError::InvalidParameter {
        name: name.to_string(),
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldSpec;
    use crate::rule::Rule;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_identical_parameters_share_one_schema() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let cache = SchemaCache::new(move |min: &u32| {
            counter.fetch_add(1, Ordering::SeqCst);
            Schema::new().field(FieldSpec::number("n").rule(Rule::min(*min, "too small")))
        });

        let a = cache.get(&5);
        let b = cache.get(&5);
        let c = cache.get(&16);

        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_params_parse_pairs() {
        let params = Params::parse_pairs(&["numberOfPeople=5", " age = true "]).unwrap();
        assert_eq!(params.require::<u32>("numberOfPeople").unwrap(), 5);
        assert!(params.require::<bool>("age").unwrap());
        assert!(!params.get_or("email", false).unwrap());
    }

    #[test]
    fn test_bad_parameters_are_rejected() {
        assert!(Params::parse_pairs(&["novalue"]).is_err());

        let params = Params::new().with("numberOfPeople", "many");
        assert!(matches!(
            params.require::<u32>("numberOfPeople"),
            Err(SchemaError::InvalidParameter { .. })
        ));
        assert!(matches!(
            params.require::<u32>("other"),
            Err(SchemaError::MissingParameter(_))
        ));
    }
}
