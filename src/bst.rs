//! The tree and its map interface.
#![warn(missing_docs)]
use std::borrow::Borrow;
use std::cmp::Ordering::*;
use std::fmt::{Debug, Formatter};
use std::mem::replace;

use log::{debug, trace};

use crate::{Error, Result};

mod sorted;

type OptNode<K, V> = Option<Box<Node<K, V>>>;

struct Node<K, V> {
    key: K,
    val: V,
    left: OptNode<K, V>,
    right: OptNode<K, V>,
}

impl<K, V> Node<K, V> {
    fn new(key: K, val: V) -> Self {
        Node {
            key,
            val,
            left: None,
            right: None,
        }
    }
}

// Dismantles the subtree iteratively; a tree built from sorted keys is a list
// and recursive drops would overflow the stack.
impl<K, V> Drop for Node<K, V> {
    fn drop(&mut self) {
        let mut work: Vec<Box<Node<K, V>>> = Vec::new();
        work.extend(self.left.take());
        work.extend(self.right.take());
        while let Some(mut n) = work.pop() {
            work.extend(n.left.take());
            work.extend(n.right.take());
        }
    }
}

#[cfg(test)]
impl<K: Ord, V> Node<K, V> {
    // Checks that every key lies strictly between lower and upper and returns
    // the size of the subtree.
    fn chk(&self, lower: Option<&K>, upper: Option<&K>) -> usize {
        assert!(lower.iter().all(|&k| k < &self.key), "order violation");
        assert!(upper.iter().all(|&k| &self.key < k), "order violation");

        let lf_len = self
            .left
            .as_ref()
            .map_or(0, |n| n.chk(lower, Some(&self.key)));
        let rt_len = self
            .right
            .as_ref()
            .map_or(0, |n| n.chk(Some(&self.key), upper));

        lf_len + rt_len + 1
    }
}

enum DebugStep<'a, K, V> {
    Open(&'a Node<K, V>),
    Text(&'static str),
}

// Renders `(key: val left right)` with `.` for empty slots.  Uses a work stack
// so that list-shaped trees don't overflow the call stack.
impl<K: Debug, V: Debug> Debug for Node<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use DebugStep::*;

        let mut work = vec![Open(self)];
        while let Some(step) = work.pop() {
            match step {
                Text(s) => f.write_str(s)?,

                Open(n) => {
                    f.write_fmt(format_args!("({:?}: {:?} ", n.key, n.val))?;

                    // pushed in reverse of the order they are written
                    work.push(Text(")"));
                    work.push(n.right.as_deref().map_or(Text("."), Open));
                    work.push(Text(" "));
                    work.push(n.left.as_deref().map_or(Text("."), Open));
                }
            }
        }

        Ok(())
    }
}

// Returns the slot that holds key's node or, when key is absent, the empty
// slot where its node would be attached.  An empty tree yields the root slot.
fn locate<'a, K, V, Q>(
    mut slot: &'a mut OptNode<K, V>,
    key: &Q,
) -> &'a mut OptNode<K, V>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    loop {
        let ord = slot.as_ref().map(|n| key.cmp(n.key.borrow()));
        slot = match (ord, slot) {
            (Some(Less), Some(n)) => &mut n.left,
            (Some(Greater), Some(n)) => &mut n.right,
            (_, s) => return s,
        };
    }
}

fn find<'a, K, V, Q>(
    mut curr: &'a OptNode<K, V>,
    key: &Q,
) -> Option<&'a Node<K, V>>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    while let Some(n) = curr.as_deref() {
        match key.cmp(n.key.borrow()) {
            Less => curr = &n.left,
            Equal => return Some(n),
            Greater => curr = &n.right,
        }
    }

    None
}

/// A map from keys to values, stored in an unbalanced binary search tree.
///
/// Every node exclusively owns its left subtree (smaller keys) and its right
/// subtree (larger keys).  Nothing rebalances the tree, so its shape is a
/// function of the order in which keys were first inserted: inserting keys in
/// sorted order degrades the tree into a list and lookups into linear scans.
///
/// Keys are never removed individually.  [`erase`](#method.erase) resets the
/// value to `V::default()` and the key stays present; [`clear`](#method.clear)
/// drops the whole tree.
///
/// Cloning re-inserts the source's entries in pre-order (node, left subtree,
/// right subtree), which rebuilds a tree of the same shape without sharing
/// any node with the source.
pub struct BstMap<K, V> {
    len: usize,
    root: OptNode<K, V>,
}

impl<K, V> BstMap<K, V> {
    /// Creates a new, empty map.
    /// # Examples
    /// ```
    /// use bst_map::BstMap;
    /// let m: BstMap<usize, usize> = BstMap::new();
    /// assert!(m.is_empty());
    /// ```
    pub fn new() -> Self {
        BstMap { len: 0, root: None }
    }

    /// Drops all entries from the map.
    ///
    /// Clearing an empty map does nothing.
    pub fn clear(&mut self) {
        if self.root.take().is_some() {
            debug!("dropped a tree of {} entries", self.len);
        }
        self.len = 0;
    }

    /// Returns true if self contains no entries, false otherwise.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of distinct keys in self.
    ///
    /// Erased keys are still counted.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns the number of nodes on the longest path from the root to a
    /// leaf, or 0 for an empty map.
    ///
    /// # Examples
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let sorted: BstMap<_, _> = (0..8).map(|k| (k, ())).collect();
    /// assert_eq!(sorted.depth(), 8);
    ///
    /// let bushy = BstMap::from([(4, ()), (2, ()), (6, ()), (1, ()), (3, ())]);
    /// assert_eq!(bushy.depth(), 3);
    /// ```
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut work: Vec<(&Node<K, V>, usize)> =
            self.root.as_deref().map(|n| (n, 1)).into_iter().collect();

        while let Some((n, d)) = work.pop() {
            deepest = deepest.max(d);
            work.extend(n.left.as_deref().map(|m| (m, d + 1)));
            work.extend(n.right.as_deref().map(|m| (m, d + 1)));
        }

        deepest
    }

    // Visits each entry in pre-order: a node, then its left subtree, then its
    // right subtree.
    fn for_each_preorder<'a, F>(&'a self, mut f: F)
    where
        F: FnMut(&'a K, &'a V),
    {
        let mut work: Vec<&Node<K, V>> =
            self.root.as_deref().into_iter().collect();

        while let Some(n) = work.pop() {
            f(&n.key, &n.val);
            // pushed right first so the left subtree pops first
            work.extend(n.right.as_deref());
            work.extend(n.left.as_deref());
        }
    }

    #[cfg(test)]
    fn chk(&self)
    where
        K: Ord,
    {
        let chk_len = self.root.as_ref().map_or(0, |n| n.chk(None, None));
        assert_eq!(chk_len, self.len);
    }
}

impl<K: Ord, V> BstMap<K, V> {
    /// Inserts a key-value pair in the map.
    ///
    /// When the key is already present, its value is overwritten in place and
    /// the old value is returned; the shape of the tree does not change.
    /// Otherwise a new leaf is attached where the search for the key ended.
    ///
    /// # Examples
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut m = BstMap::new();
    /// assert_eq!(m.put(4, "Yippy"), None);
    /// assert_eq!(m.put(4, "Waggy"), Some("Yippy"));
    /// assert_eq!(m.get(&4), Ok(&"Waggy"));
    /// ```
    pub fn put(&mut self, key: K, val: V) -> Option<V> {
        let slot = locate(&mut self.root, &key);
        if let Some(n) = slot.as_mut() {
            return Some(replace(&mut n.val, val));
        }

        self.len += 1;
        trace!("attaching node #{}", self.len);
        *slot = Some(Box::new(Node::new(key, val)));
        None
    }

    /// Returns a reference to the value associated with key.
    ///
    /// # Errors
    /// Returns [`Error::KeyNotFound`] if the key was never inserted.
    ///
    /// # Examples
    /// ```
    /// use bst_map::{BstMap, Error};
    ///
    /// let m = BstMap::from([(0, 100)]);
    /// assert_eq!(m.get(&0), Ok(&100));
    /// assert_eq!(m.get(&1), Err(Error::KeyNotFound));
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        find(&self.root, key)
            .map(|n| &n.val)
            .ok_or(Error::KeyNotFound)
    }

    /// Returns a mutable reference to the value associated with key.
    ///
    /// # Errors
    /// Returns [`Error::KeyNotFound`] if the key was never inserted.
    ///
    /// # Examples
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut m = BstMap::from([(1, 7)]);
    /// *m.get_mut(&1).unwrap() = 2;
    /// assert_eq!(m.get(&1), Ok(&2));
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        locate(&mut self.root, key)
            .as_deref_mut()
            .map(|n| &mut n.val)
            .ok_or(Error::KeyNotFound)
    }

    /// Returns a mutable reference to the value associated with key, first
    /// inserting `default` if the key is absent.
    ///
    /// # Examples
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut m = BstMap::from([(1, "one")]);
    /// assert_eq!(*m.get_or_insert(1, "uno"), "one");
    /// assert_eq!(*m.get_or_insert(2, "two"), "two");
    /// assert_eq!(m.len(), 2);
    /// ```
    pub fn get_or_insert(&mut self, key: K, default: V) -> &mut V {
        self.get_or_insert_with(key, || default)
    }

    /// Returns a mutable reference to the value associated with key, first
    /// inserting the result of `default()` if the key is absent.
    ///
    /// `default` is only called when a node is attached.
    pub fn get_or_insert_with<F>(&mut self, key: K, default: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        let len = &mut self.len;
        let n = locate(&mut self.root, &key).get_or_insert_with(|| {
            *len += 1;
            trace!("attaching node #{}", *len);
            Box::new(Node::new(key, default()))
        });
        &mut n.val
    }

    /// Returns a mutable reference to the value associated with key, first
    /// inserting `V::default()` if the key is absent.
    ///
    /// # Examples
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut counts = BstMap::new();
    /// for w in ["a", "b", "a"] {
    ///     *counts.get_or_default(w) += 1;
    /// }
    /// assert_eq!(counts.get("a"), Ok(&2));
    /// ```
    pub fn get_or_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        self.get_or_insert_with(key, V::default)
    }

    /// Tests if self contains an entry for the given key.
    ///
    /// Erased keys are still contained.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        find(&self.root, key).is_some()
    }

    /// Resets the value associated with key to `V::default()` and returns the
    /// previous value.
    ///
    /// The key itself stays in the map: [`contains`](#method.contains) still
    /// reports it and [`len`](#method.len) is unchanged.  Erasing an absent
    /// key does nothing and returns `None`.
    ///
    /// # Examples
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut m = BstMap::from([(3, String::from("Zachary"))]);
    /// assert_eq!(m.erase(&3), Some(String::from("Zachary")));
    /// assert!(m.contains(&3));
    /// assert_eq!(m.get(&3), Ok(&String::new()));
    /// assert_eq!(m.erase(&9), None);
    /// ```
    pub fn erase<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
        V: Default,
    {
        self.get_mut(key).ok().map(std::mem::take)
    }
}

impl<K: Clone + Ord, V: Clone> BstMap<K, V> {
    // Inserts the entries of source in pre-order.
    fn copy_from(&mut self, source: &Self) {
        debug!("copying {} entries", source.len);
        source.for_each_preorder(|k, v| {
            self.put(k.clone(), v.clone());
        });
    }
}

impl<K: Clone + Ord, V: Clone> Clone for BstMap<K, V> {
    fn clone(&self) -> Self {
        let mut m = BstMap::new();
        m.copy_from(self);
        m
    }

    /// Replaces the contents of self with a deep copy of source.
    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.copy_from(source);
    }
}

impl<K: Debug, V: Debug> Debug for BstMap<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.root {
            None => f.write_str("BstMap(EMPTY)"),
            Some(n) => {
                // use Node's Debug formatter
                f.write_fmt(format_args!("BstMap(#{}, {:?})", self.len, n))
            }
        }
    }
}

impl<K, V> Default for BstMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V: PartialEq> PartialEq for BstMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.sorted() == other.sorted()
    }
}

impl<K: Ord, V: Eq> Eq for BstMap<K, V> {}

impl<K, Q, V> std::ops::Index<&Q> for BstMap<K, V>
where
    K: Borrow<Q> + Ord,
    Q: Ord + ?Sized,
{
    type Output = V;

    /// Returns a reference to the value associated with key.
    ///
    /// # Panics
    /// Panics if the key is not present.  Use [`BstMap::get`] for a
    /// `Result`, or index mutably (`m[&k] = v`) to insert `V::default()` on a
    /// miss.
    fn index(&self, key: &Q) -> &Self::Output {
        match self.get(key) {
            Ok(v) => v,
            Err(_) => panic!("key not found in BstMap"),
        }
    }
}

/// Inserts `V::default()` for a missing key, cloning the key only then.
impl<K, V> std::ops::IndexMut<&K> for BstMap<K, V>
where
    K: Clone + Ord,
    V: Default,
{
    fn index_mut(&mut self, key: &K) -> &mut Self::Output {
        let len = &mut self.len;
        let n = locate(&mut self.root, key).get_or_insert_with(|| {
            *len += 1;
            trace!("attaching node #{}", *len);
            Box::new(Node::new(key.clone(), V::default()))
        });
        &mut n.val
    }
}

impl<K: Ord, V> Extend<(K, V)> for BstMap<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for BstMap<K, V> {
    fn from(vs: [(K, V); N]) -> Self {
        BstMap::from_iter(vs)
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for BstMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut m = BstMap::new();
        m.extend(iter);
        m
    }
}
