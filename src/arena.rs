//! Arena storage with generational indices.
//!
//! Both the card registry and the spring scheduler keep their entries here:
//!
//! - **Generational Indices**: a [`Key`] contains index + generation, so a key
//!   that outlived its entry never resolves to a newer entry reusing the slot.
//! - **Dense Storage**: entries are stored contiguously for per-frame walks.
//! - **Sparse Map**: O(1) lookup from a stable key to the dense position.
//! - **Swap-Remove**: O(1) removal without creating holes in dense storage.

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Key {
    index: u32,
    generation: u32,
}

impl Key {
    pub(crate) const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }
}

/// Entry in the sparse map, pointing to a dense array slot.
struct SparseEntry {
    dense_index: usize,
    generation: u32,
}

struct Node<T> {
    value: T,
    /// Back-pointer to sparse array index (for swap-remove fixup)
    sparse_index: u32,
}

pub(crate) struct Arena<T> {
    dense: Vec<Node<T>>,
    sparse: Vec<Option<SparseEntry>>,
    free_indices: Vec<u32>,
    /// Generation to hand out next for each sparse slot
    generations: Vec<u32>,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self {
            dense: Vec::new(),
            sparse: Vec::new(),
            free_indices: Vec::new(),
            generations: Vec::new(),
        }
    }
}

impl<T> Arena<T> {
    /// Reserve the key the next [`insert`](Self::insert) will return.
    pub fn next_key(&self) -> Key {
        match self.free_indices.last() {
            Some(&idx) => Key::new(idx, self.generations[idx as usize]),
            None => Key::new(self.sparse.len() as u32, 0),
        }
    }

    pub fn insert(&mut self, value: T) -> Key {
        let (sparse_index, generation) = if let Some(idx) = self.free_indices.pop() {
            // Reuse a freed slot; its generation was bumped on removal
            (idx, self.generations[idx as usize])
        } else {
            let idx = self.sparse.len() as u32;
            self.sparse.push(None);
            self.generations.push(0);
            (idx, 0)
        };

        let dense_index = self.dense.len();
        self.dense.push(Node {
            value,
            sparse_index,
        });
        self.sparse[sparse_index as usize] = Some(SparseEntry {
            dense_index,
            generation,
        });

        Key::new(sparse_index, generation)
    }

    /// Remove an entry. Stale or unknown keys return `None`.
    pub fn remove(&mut self, key: Key) -> Option<T> {
        let dense_index = self.dense_index(key)?;

        let last_dense_index = self.dense.len() - 1;
        let removed = self.dense.swap_remove(dense_index);

        // Fix up the moved node's sparse entry (if we didn't remove the last element)
        if dense_index != last_dense_index {
            let moved_sparse_idx = self.dense[dense_index].sparse_index;
            if let Some(ref mut entry) = self.sparse[moved_sparse_idx as usize] {
                entry.dense_index = dense_index;
            }
        }

        self.sparse[key.index as usize] = None;
        self.generations[key.index as usize] = key.generation.wrapping_add(1);
        self.free_indices.push(key.index);

        Some(removed.value)
    }

    fn dense_index(&self, key: Key) -> Option<usize> {
        self.sparse
            .get(key.index as usize)
            .and_then(|e| e.as_ref())
            .filter(|e| e.generation == key.generation)
            .map(|e| e.dense_index)
    }

    pub fn get(&self, key: Key) -> Option<&T> {
        self.dense_index(key).map(|idx| &self.dense[idx].value)
    }

    pub fn get_mut(&mut self, key: Key) -> Option<&mut T> {
        self.dense_index(key).map(|idx| &mut self.dense[idx].value)
    }

    pub fn contains(&self, key: Key) -> bool {
        self.dense_index(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.dense.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    fn key_of(&self, node: &Node<T>) -> Key {
        let generation = self.sparse[node.sparse_index as usize]
            .as_ref()
            .map(|e| e.generation)
            .unwrap_or_default();
        Key::new(node.sparse_index, generation)
    }

    /// All live keys, in dense order.
    pub fn keys(&self) -> Vec<Key> {
        self.dense.iter().map(|node| self.key_of(node)).collect()
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.dense.iter().map(|node| &node.value)
    }

    /// Mutable walk over every entry together with its key.
    pub fn for_each_mut(&mut self, mut f: impl FnMut(Key, &mut T)) {
        let Self { dense, sparse, .. } = self;
        for node in dense.iter_mut() {
            let generation = sparse[node.sparse_index as usize]
                .as_ref()
                .map(|e| e.generation)
                .unwrap_or_default();
            f(Key::new(node.sparse_index, generation), &mut node.value);
        }
    }

    pub fn clear(&mut self) {
        for key in self.keys() {
            self.remove(key);
        }
    }
}
