/// Type alias for sets, we use this to hide which type of `HashSet` we are actually using.
pub type Set<S> = fxhash::FxHashSet<S>;
/// Type alias for maps, we use this to hide which type of `HashMap` we are actually using.
pub type Map<K, V> = fxhash::FxHashMap<K, V>;

/// A set that remembers the order in which its elements were inserted and allows looking up
/// the position of an element. Used as the worklist of the subset construction.
pub type IndexedSet<S> = indexmap::IndexSet<S, fxhash::FxBuildHasher>;

/// Creates an empty [`IndexedSet`].
pub fn indexed_set<S>() -> IndexedSet<S> {
    IndexedSet::with_hasher(Default::default())
}

/// Type alias for maps whose iteration order follows the order of the keys.
pub type OrderedMap<K, V> = std::collections::BTreeMap<K, V>;
