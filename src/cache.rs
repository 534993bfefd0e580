//! Memoization of compiled predicates.
//!
//! Rule sets are keyed by a BLAKE3 digest of their content: the connector,
//! then each condition's field path, operator and tagged literal. Two rule
//! sets with equal content share one compiled [`Predicate`].

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::{CompileError, CompileOptions, Predicate, Record, RuleSet, Schema, Value};

type Digest = [u8; 32];

/// A thread-safe cache of predicates compiled for record type `T`.
///
/// Compile errors are returned to the caller and never cached.
pub struct PredicateCache<T> {
    schema: Schema<T>,
    options: CompileOptions,
    entries: RwLock<HashMap<Digest, Predicate<T>>>,
}

impl<T: Record> PredicateCache<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(CompileOptions::default())
    }

    /// A cache whose predicates are all compiled with `options`.
    #[must_use]
    pub fn with_options(options: CompileOptions) -> Self {
        Self {
            schema: T::schema(),
            options,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Return the cached predicate for `ruleset`, compiling it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError`] if the rule set does not compile.
    pub fn get_or_compile(&self, ruleset: &RuleSet) -> Result<Predicate<T>, CompileError> {
        let key = digest(ruleset);
        if let Some(hit) = self.entries.read().get(&key) {
            trace!("predicate cache hit");
            return Ok(hit.clone());
        }

        let compiled = ruleset.compile_with_options(&self.schema, &self.options)?;
        let mut entries = self.entries.write();
        // Another thread may have inserted the same rule set meanwhile.
        let predicate = entries.entry(key).or_insert(compiled).clone();
        debug!(entries = entries.len(), "predicate cache miss");
        Ok(predicate)
    }

    /// The number of cached predicates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the cache holds no predicates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drop every cached predicate.
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

impl<T: Record> Default for PredicateCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn digest(ruleset: &RuleSet) -> Digest {
    let mut hasher = blake3::Hasher::new();
    match ruleset.connector {
        None => hasher.update(&[0]),
        Some(connector) => hasher.update(&[1, connector as u8]),
    };
    hasher.update(&(ruleset.conditions.len() as u64).to_le_bytes());
    for cond in &ruleset.conditions {
        update_str(&mut hasher, &cond.field);
        hasher.update(&[cond.operator as u8]);
        match &cond.value {
            None => {
                hasher.update(&[0]);
            }
            Some(Value::Bool(v)) => {
                hasher.update(&[1, u8::from(*v)]);
            }
            Some(Value::Int(v)) => {
                hasher.update(&[2]);
                hasher.update(&v.to_le_bytes());
            }
            Some(Value::Float(v)) => {
                hasher.update(&[3]);
                hasher.update(&v.to_bits().to_le_bytes());
            }
            Some(Value::String(v)) => {
                hasher.update(&[4]);
                update_str(&mut hasher, v);
            }
        }
    }
    *hasher.finalize().as_bytes()
}

/// Length-prefixed, so adjacent strings cannot run together.
fn update_str(hasher: &mut blake3::Hasher, s: &str) {
    hasher.update(&(s.len() as u64).to_le_bytes());
    hasher.update(s.as_bytes());
}
