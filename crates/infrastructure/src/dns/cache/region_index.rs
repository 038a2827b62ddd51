use geodns_domain::ipv4::bit_at;
use geodns_domain::{DomainError, RegionEntry, RegionKey};
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

/// A node in the binary prefix trie. Depth equals prefix length.
#[derive(Default)]
struct TrieNode {
    entry: Option<Arc<RegionEntry>>,
    children: [Option<Box<TrieNode>>; 2],
}

impl TrieNode {
    fn is_empty(&self) -> bool {
        self.entry.is_none() && self.children.iter().all(Option::is_none)
    }

    fn visit<F: FnMut(&RegionEntry)>(&self, visit: &mut F) {
        if let Some(entry) = &self.entry {
            visit(entry);
        }
        for child in self.children.iter().flatten() {
            child.visit(visit);
        }
    }
}

#[derive(Default)]
struct Trie {
    root: TrieNode,
    len: usize,
}

impl Trie {
    fn node_mut(&mut self, key: RegionKey) -> &mut TrieNode {
        let mut node = &mut self.root;
        for depth in 0..key.prefix_len {
            let bit = bit_at(key.network, depth);
            node = &mut **node.children[bit].get_or_insert_with(Box::default);
        }
        node
    }

    fn node(&self, key: RegionKey) -> Option<&TrieNode> {
        let mut node = &self.root;
        for depth in 0..key.prefix_len {
            node = node.children[bit_at(key.network, depth)].as_deref()?;
        }
        Some(node)
    }

    fn longest_match(&self, addr: u32, max_depth: u8) -> Option<Arc<RegionEntry>> {
        let mut node = &self.root;
        let mut best = node.entry.as_ref();

        for depth in 0..max_depth {
            match node.children[bit_at(addr, depth)].as_deref() {
                Some(child) => {
                    node = child;
                    if child.entry.is_some() {
                        best = child.entry.as_ref();
                    }
                }
                None => break,
            }
        }

        best.cloned()
    }

    fn remove(node: &mut TrieNode, key: RegionKey, depth: u8) -> Option<Arc<RegionEntry>> {
        if depth == key.prefix_len {
            return node.entry.take();
        }

        let bit = bit_at(key.network, depth);
        let child = node.children[bit].as_deref_mut()?;
        let removed = Self::remove(child, key, depth + 1);
        if removed.is_some() && child.is_empty() {
            node.children[bit] = None;
        }
        removed
    }
}

/// Longest-prefix-match index of one domain's region entries.
///
/// The catch-all entry (0.0.0.0/0) lives at the root, so every lookup
/// degrades to it when nothing more specific covers the address.
#[derive(Default)]
pub struct RegionIndex {
    trie: RwLock<Trie>,
}

impl RegionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Trie> {
        self.trie.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Trie> {
        self.trie.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Most specific entry covering `addr`, looking at most `exact_mask`
    /// bits deep. Pass 32 for "most specific available".
    pub fn find(&self, addr: u32, exact_mask: u8) -> Result<Arc<RegionEntry>, DomainError> {
        self.read()
            .longest_match(addr, exact_mask.min(32))
            .ok_or_else(|| {
                DomainError::NotFound(format!(
                    "no region covers {}/{}",
                    std::net::Ipv4Addr::from(addr),
                    exact_mask
                ))
            })
    }

    /// Entry stored under exactly `key`.
    pub fn get(&self, key: RegionKey) -> Result<Arc<RegionEntry>, DomainError> {
        self.read()
            .node(key)
            .and_then(|node| node.entry.clone())
            .ok_or_else(|| DomainError::NotFound(format!("no region {}", key)))
    }

    /// Inserts or overwrites the entry under its exact key.
    pub fn insert(&self, entry: RegionEntry) -> Result<(), DomainError> {
        self.store(entry).map(|_| ())
    }

    /// Replaces the entry under the same key, inserting when absent.
    /// Returns true when an older entry was replaced.
    pub fn update(&self, entry: RegionEntry) -> Result<bool, DomainError> {
        self.store(entry)
    }

    fn store(&self, entry: RegionEntry) -> Result<bool, DomainError> {
        if entry.is_empty() {
            return Err(DomainError::BadParam(format!(
                "region {} has no records",
                entry.key
            )));
        }
        if entry.key.prefix_len > 32 {
            return Err(DomainError::BadParam(format!(
                "prefix length {} exceeds 32",
                entry.key.prefix_len
            )));
        }

        let key = entry.key;
        let mut trie = self.write();
        let replaced = trie.node_mut(key).entry.replace(Arc::new(entry)).is_some();
        if !replaced {
            trie.len += 1;
        }

        debug!(region = %key, replaced, "Region entry stored");
        Ok(replaced)
    }

    pub fn remove(&self, key: RegionKey) -> Result<Arc<RegionEntry>, DomainError> {
        let mut trie = self.write();
        let removed = Trie::remove(&mut trie.root, key, 0)
            .ok_or_else(|| DomainError::NotFound(format!("no region {}", key)))?;
        trie.len -= 1;
        Ok(removed)
    }

    /// Walks every entry in key order. The read lock is held throughout,
    /// so `visit` must not touch this index.
    pub fn traverse<F: FnMut(&RegionEntry)>(&self, mut visit: F) {
        self.read().root.visit(&mut visit);
    }

    pub fn len(&self) -> usize {
        self.read().len
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for RegionIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegionIndex").field("len", &self.len()).finish()
    }
}
