use std::ops::{Index, IndexMut};

/// Dense storage for values keyed by degree `n` and order `m`, `0 <= m <= n <= max_degree`.
///
/// Entries are laid out row by row, `(n, m)` living at `n(n+1)/2 + m`.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle<T> {
    max_degree: usize,
    values: Vec<T>,
}

impl<T: Clone> Triangle<T> {
    pub fn filled(max_degree: usize, value: T) -> Self {
        Triangle {
            max_degree,
            values: vec![value; len(max_degree)],
        }
    }
}

impl<T> Triangle<T> {
    pub fn max_degree(&self) -> usize {
        self.max_degree
    }

    pub fn get(&self, n: usize, m: usize) -> Option<&T> {
        if m > n || n > self.max_degree {
            return None;
        }
        self.values.get(offset(n, m))
    }

    /// Iterates over `((n, m), value)` in degree-then-order sequence.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), &T)> + '_ {
        (0..=self.max_degree)
            .flat_map(|n| (0..=n).map(move |m| (n, m)))
            .zip(self.values.iter())
    }
}

impl<T> Index<(usize, usize)> for Triangle<T> {
    type Output = T;

    fn index(&self, (n, m): (usize, usize)) -> &T {
        assert!(m <= n, "order {m} exceeds degree {n}");
        &self.values[offset(n, m)]
    }
}

impl<T> IndexMut<(usize, usize)> for Triangle<T> {
    fn index_mut(&mut self, (n, m): (usize, usize)) -> &mut T {
        assert!(m <= n, "order {m} exceeds degree {n}");
        &mut self.values[offset(n, m)]
    }
}

fn offset(n: usize, m: usize) -> usize {
    n * (n + 1) / 2 + m
}

fn len(max_degree: usize) -> usize {
    offset(max_degree + 1, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_is_row_major() {
        let mut t = Triangle::filled(3, 0usize);
        for n in 0..=3 {
            for m in 0..=n {
                t[(n, m)] = 10 * n + m;
            }
        }
        let keys: Vec<_> = t.iter().map(|(key, value)| (key, *value)).collect();
        assert_eq!(keys.len(), 10);
        assert_eq!(keys[0], ((0, 0), 0));
        assert_eq!(keys[4], ((2, 1), 21));
        assert_eq!(keys[9], ((3, 3), 33));
    }

    #[test]
    fn test_get_outside_triangle() {
        let t = Triangle::filled(2, 1.0);
        assert_eq!(t.get(2, 2), Some(&1.0));
        assert_eq!(t.get(1, 2), None);
        assert_eq!(t.get(3, 0), None);
    }

    #[test]
    #[should_panic]
    fn test_index_order_above_degree() {
        let t = Triangle::filled(4, 0.0);
        let _ = t[(1, 2)];
    }
}
