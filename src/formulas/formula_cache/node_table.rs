use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

/// Node stored in a [`NodeTable`] together with its structural hash.
#[derive(Clone, Debug)]
pub(crate) struct StoredNode<K> {
    pub content: K,
    pub hash: u64,
}

/// Arena for one type of formula node.
///
/// Nodes are addressed by their index and never removed. If hash-consing is
/// requested on insertion, the uniqueness map is consulted first, so that equal
/// contents always map onto the same index.
pub(crate) struct NodeTable<K> {
    nodes: DashMap<u64, StoredNode<K>>,
    lookup: DashMap<K, u64>,
    next_index: AtomicU64,
}

impl<K: Eq + Hash + Clone> NodeTable<K> {
    pub fn new() -> Self {
        Self { nodes: DashMap::new(), lookup: DashMap::new(), next_index: AtomicU64::new(0) }
    }

    pub fn intern(&self, content: K, hash: u64, hash_consing: bool) -> u64 {
        if hash_consing {
            *self.lookup.entry(content.clone()).or_insert_with(|| self.push(content, hash))
        } else {
            self.push(content, hash)
        }
    }

    pub fn lookup(&self, content: &K) -> Option<u64> {
        self.lookup.get(content).map(|index| *index)
    }

    fn push(&self, content: K, hash: u64) -> u64 {
        let index = self.next_index.fetch_add(1, Ordering::Relaxed);
        self.nodes.insert(index, StoredNode { content, hash });
        index
    }

    pub fn get(&self, index: u64) -> StoredNode<K> {
        self.nodes.get(&index).map(|node| node.clone()).unwrap_or_else(|| panic!("No node with index {index} in this factory"))
    }

    pub fn content(&self, index: u64) -> K {
        self.get(index).content
    }

    pub fn hash(&self, index: u64) -> u64 {
        self.nodes.get(&index).map_or_else(|| panic!("No node with index {index} in this factory"), |node| node.hash)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::NodeTable;

    #[test]
    fn test_hash_consing() {
        let table = NodeTable::new();
        let a = table.intern("a".to_string(), 1, true);
        let b = table.intern("b".to_string(), 2, true);
        let a2 = table.intern("a".to_string(), 1, true);
        assert_eq!(a, a2);
        assert_ne!(a, b);
        assert_eq!(table.len(), 2);
        assert_eq!(table.content(b), "b");
        assert_eq!(table.hash(b), 2);
        assert_eq!(table.lookup(&"a".to_string()), Some(a));
    }

    #[test]
    fn test_without_hash_consing() {
        let table = NodeTable::new();
        let a = table.intern("a".to_string(), 1, false);
        let a2 = table.intern("a".to_string(), 1, false);
        assert_ne!(a, a2);
        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup(&"a".to_string()), None);
    }
}
