//! Collection name resolution.
//!
//! A [`CollectionNamingPipeline`] folds an ordered list of rules over an
//! empty string to turn a record type into its collection name, and caches
//! the result per type. With the default rules `FamousAuthorRecord`
//! resolves to `famousAuthors`.

mod rules;

use std::any::TypeId;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use dashmap::DashMap;
use tracing::debug;

use crate::record::short_type_name;

pub use rules::{ForRecord, SeedWithTypeName, TrimSuffix, UseCamelCase, UsePlural, UseTransformation};

/// Identity and short name of the type being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordType {
    id: TypeId,
    name: &'static str,
}

impl RecordType {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: short_type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Type name without module path or generic arguments.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// One step of collection name resolution.
///
/// Rules must be pure: the same input always yields the same name.
pub trait CollectionNamingRule: Send + Sync {
    fn build_name(&self, record: &RecordType, current: &str) -> String;
}

/// The default rule chain: seed from the type name, trim `Record`,
/// lowercase the first letter, pluralize.
pub fn default_rules() -> Vec<Arc<dyn CollectionNamingRule>> {
    vec![
        Arc::new(SeedWithTypeName),
        Arc::new(TrimSuffix::default()),
        Arc::new(UseCamelCase),
        Arc::new(UsePlural),
    ]
}

/// Ordered naming rules plus a per-type cache of resolved names.
///
/// Cached names are never recomputed, even after the rules change. Two
/// threads resolving the same uncached type may both run the rules; the
/// first name stored is the one kept.
pub struct CollectionNamingPipeline {
    rules: RwLock<Vec<Arc<dyn CollectionNamingRule>>>,
    cache: DashMap<TypeId, String>,
}

impl CollectionNamingPipeline {
    /// A pipeline with the default rules.
    pub fn new() -> Self {
        Self::with_rules(default_rules())
    }

    pub fn with_rules(rules: Vec<Arc<dyn CollectionNamingRule>>) -> Self {
        Self {
            rules: RwLock::new(rules),
            cache: DashMap::new(),
        }
    }

    /// Resolve the collection name of `T`.
    pub fn collection_name_of<T: ?Sized + 'static>(&self) -> String {
        let record = RecordType::of::<T>();
        if let Some(name) = self.cache.get(&record.id) {
            return name.clone();
        }

        let rules = self
            .rules
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        let name = rules
            .iter()
            .fold(String::new(), |current, rule| rule.build_name(&record, &current));

        debug!(record = record.name, collection = %name, "resolved collection name");
        self.cache.entry(record.id).or_insert(name).clone()
    }

    /// Add a rule at the end of the chain.
    pub fn append_rule(&self, rule: impl CollectionNamingRule + 'static) -> &Self {
        self.append_rules([Arc::new(rule) as Arc<dyn CollectionNamingRule>])
    }

    /// Add rules at the end of the chain, in order.
    pub fn append_rules<I>(&self, rules: I) -> &Self
    where
        I: IntoIterator<Item = Arc<dyn CollectionNamingRule>>,
    {
        self.rules
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(rules);
        self
    }

    /// Swap the whole rule chain. An empty chain resolves every type to `""`.
    pub fn replace_rules_with<I>(&self, rules: I) -> &Self
    where
        I: IntoIterator<Item = Arc<dyn CollectionNamingRule>>,
    {
        let rules: Vec<_> = rules.into_iter().collect();
        *self.rules.write().unwrap_or_else(PoisonError::into_inner) = rules;
        self
    }

    /// Number of rules in the chain.
    pub fn len(&self) -> usize {
        self.rules.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for CollectionNamingPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CollectionNamingPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionNamingPipeline")
            .field("rules", &self.len())
            .field("cached", &self.cache.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FamousAuthorRecord;
    struct UserRecord;
    struct Address;
    struct TodoItemRecord;

    fn counting_rule(counter: Arc<AtomicUsize>) -> UseTransformation {
        UseTransformation::new(move |name| {
            counter.fetch_add(1, Ordering::SeqCst);
            name.to_string()
        })
    }

    #[test]
    fn default_rules_resolve_names() {
        let pipeline = CollectionNamingPipeline::new();
        assert_eq!(pipeline.collection_name_of::<FamousAuthorRecord>(), "famousAuthors");
        assert_eq!(pipeline.collection_name_of::<UserRecord>(), "users");
        assert_eq!(pipeline.collection_name_of::<Address>(), "address");
        assert_eq!(pipeline.collection_name_of::<TodoItemRecord>(), "todoItems");
    }

    #[test]
    fn name_is_computed_once() {
        let counter = Arc::new(AtomicUsize::new(0));
        let pipeline = CollectionNamingPipeline::new();
        pipeline.append_rule(counting_rule(counter.clone()));

        for _ in 0..5 {
            assert_eq!(pipeline.collection_name_of::<UserRecord>(), "users");
        }
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        pipeline.collection_name_of::<TodoItemRecord>();
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn appended_rules_affect_only_future_resolutions() {
        let pipeline = CollectionNamingPipeline::new();
        assert_eq!(pipeline.collection_name_of::<UserRecord>(), "users");

        pipeline.append_rule(UseTransformation::new(|name| format!("app_{name}")));
        assert_eq!(pipeline.collection_name_of::<UserRecord>(), "users");
        assert_eq!(pipeline.collection_name_of::<TodoItemRecord>(), "app_todoItems");
    }

    #[test]
    fn replacing_rules_keeps_cached_names() {
        let pipeline = CollectionNamingPipeline::new();
        assert_eq!(pipeline.collection_name_of::<UserRecord>(), "users");

        pipeline.replace_rules_with([Arc::new(ForRecord::<Address>::named("places"))
            as Arc<dyn CollectionNamingRule>]);
        assert_eq!(pipeline.len(), 1);
        assert_eq!(pipeline.collection_name_of::<UserRecord>(), "users");
        assert_eq!(pipeline.collection_name_of::<Address>(), "places");
    }

    #[test]
    fn empty_rule_chain_yields_empty_name() {
        let pipeline = CollectionNamingPipeline::new();
        pipeline.replace_rules_with(Vec::new());
        assert!(pipeline.is_empty());
        assert_eq!(pipeline.collection_name_of::<FamousAuthorRecord>(), "");
    }

    #[test]
    fn for_record_override_on_top_of_defaults() {
        let pipeline = CollectionNamingPipeline::new();
        pipeline.append_rule(ForRecord::<FamousAuthorRecord>::new(|name| format!("{name}_v2")));
        assert_eq!(pipeline.collection_name_of::<FamousAuthorRecord>(), "famousAuthors_v2");
        assert_eq!(pipeline.collection_name_of::<UserRecord>(), "users");
    }

    #[test]
    fn concurrent_resolution_converges() {
        let counter = Arc::new(AtomicUsize::new(0));
        let pipeline = Arc::new(CollectionNamingPipeline::new());
        pipeline.append_rule(counting_rule(counter.clone()));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let pipeline = pipeline.clone();
                std::thread::spawn(move || pipeline.collection_name_of::<FamousAuthorRecord>())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), "famousAuthors");
        }

        // Racing first lookups may each run the rules.
        let runs = counter.load(Ordering::SeqCst);
        assert!((1..=8).contains(&runs));

        pipeline.collection_name_of::<FamousAuthorRecord>();
        assert_eq!(counter.load(Ordering::SeqCst), runs);
    }
}
