use std::fmt::{Display, Formatter};
use std::io;

use super::BstMap;

// Stable insertion sort by key.  Each entry shifts left past every entry with a
// strictly greater key.
fn insertion_sort<K: Ord, V>(entries: &mut [(K, V)]) {
    for i in 1..entries.len() {
        let mut j = i;
        while j > 0 && entries[j - 1].0 > entries[j].0 {
            entries.swap(j - 1, j);
            j -= 1;
        }
    }
}

impl<K: Ord, V> BstMap<K, V> {
    /// Returns every entry of the map, in ascending key order.
    ///
    /// The entries are gathered with a pre-order walk of the tree and then
    /// insertion-sorted, so the cost is quadratic in the worst case.
    ///
    /// # Examples
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let m = BstMap::from([(2, 'b'), (3, 'c'), (1, 'a')]);
    /// assert_eq!(m.sorted(), vec![(&1, &'a'), (&2, &'b'), (&3, &'c')]);
    /// ```
    pub fn sorted(&self) -> Vec<(&K, &V)> {
        let mut entries = Vec::with_capacity(self.len);
        self.for_each_preorder(|k, v| entries.push((k, v)));
        insertion_sort(&mut entries);
        entries
    }

    /// Writes the entries as `(key, value)` pairs in ascending key order,
    /// separated by single spaces and followed by a newline.
    ///
    /// An empty map writes just the newline.
    ///
    /// # Examples
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let m = BstMap::from([(6, "Viktor"), (1, "Xaviar")]);
    /// let mut out = Vec::new();
    /// m.write_sorted(&mut out).unwrap();
    /// assert_eq!(out, b"(1, Xaviar) (6, Viktor)\n");
    /// ```
    pub fn write_sorted<W: io::Write>(&self, mut w: W) -> io::Result<()>
    where
        K: Display,
        V: Display,
    {
        writeln!(w, "{}", self)
    }

    /// Prints the entries to standard output in the format of
    /// [`write_sorted`](#method.write_sorted).
    ///
    /// # Errors
    /// Returns any error raised while writing to standard output.
    ///
    /// # Examples
    /// ```no_run
    /// use bst_map::BstMap;
    ///
    /// let m = BstMap::from([(2, "Balthazar"), (1, "Xaviar")]);
    /// m.print_sorted().unwrap(); // (1, Xaviar) (2, Balthazar)
    /// ```
    pub fn print_sorted(&self) -> io::Result<()>
    where
        K: Display,
        V: Display,
    {
        self.write_sorted(io::stdout().lock())
    }
}

impl<K: Ord + Display, V: Display> Display for BstMap<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (i, (k, v)) in self.sorted().into_iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "({}, {})", k, v)?;
        }
        Ok(())
    }
}

impl<'a, K: Ord, V> IntoIterator for &'a BstMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = std::vec::IntoIter<(&'a K, &'a V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.sorted().into_iter()
    }
}
