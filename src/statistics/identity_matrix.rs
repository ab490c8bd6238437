/// Square matrix of pairwise sequence distances.
///
/// Stored row-major. Builders fill both `(i, j)` and `(j, i)` with the same
/// value, so the matrix is symmetric; the diagonal stays 0.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentityMatrix {
    n: usize,
    values: Vec<f32>,
}

impl IdentityMatrix {
    pub fn zeros(n: usize) -> Self {
        IdentityMatrix {
            n,
            values: vec![0.0; n * n],
        }
    }

    /// Number of sequences (rows and columns)
    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f32 {
        self.values[i * self.n + j]
    }

    #[inline]
    pub fn row(&self, i: usize) -> &[f32] {
        &self.values[i * self.n..(i + 1) * self.n]
    }

    /// Write `value` at `(i, j)` and `(j, i)`
    #[inline]
    pub fn set_symmetric(&mut self, i: usize, j: usize, value: f32) {
        self.values[i * self.n + j] = value;
        self.values[j * self.n + i] = value;
    }

    pub fn is_symmetric(&self) -> bool {
        (0..self.n).all(|i| (0..i).all(|j| self.get(i, j) == self.get(j, i)))
    }
}
