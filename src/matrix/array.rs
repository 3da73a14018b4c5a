use crate::matrix::Matrix;
use crate::MatrixDataType;
use core::fmt::{Debug, Formatter};

/// Owned, statically sized storage for a `ROWS` × `COLS` matrix.
///
/// `TOTAL` must equal `ROWS * COLS`; it is a separate parameter because array lengths
/// cannot be computed from generic constants on stable Rust.
///
/// ## Example
/// ```
/// use fixed_kalman::MatrixArray;
///
/// let mut storage = MatrixArray::<2, 2, 4, f32>::new([1.0, 2.0, 3.0, 4.0]);
/// let matrix = storage.as_matrix();
/// assert_eq!(matrix.get(1, 0), 3.0);
/// ```
pub struct MatrixArray<const ROWS: usize, const COLS: usize, const TOTAL: usize, T> {
    data: [T; TOTAL],
}

impl<const ROWS: usize, const COLS: usize, const TOTAL: usize, T>
    MatrixArray<ROWS, COLS, TOTAL, T>
{
    /// Wraps a row-major array.
    ///
    /// ## Panics
    /// Panics if `ROWS * COLS != TOTAL`.
    pub fn new(data: [T; TOTAL]) -> Self {
        assert_eq!(ROWS * COLS, TOTAL, "TOTAL must equal ROWS * COLS");
        Self { data }
    }

    /// Creates a zero-initialized matrix.
    pub fn zeros() -> Self
    where
        T: MatrixDataType,
    {
        Self::new([T::zero(); TOTAL])
    }

    /// Binds a [`Matrix`] view over the storage.
    #[inline]
    pub fn as_matrix(&mut self) -> Matrix<'_, T> {
        Matrix::new(ROWS, COLS, &mut self.data)
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }
}

impl<const ROWS: usize, const COLS: usize, const TOTAL: usize, T> From<[T; TOTAL]>
    for MatrixArray<ROWS, COLS, TOTAL, T>
{
    fn from(value: [T; TOTAL]) -> Self {
        Self::new(value)
    }
}

impl<const ROWS: usize, const COLS: usize, const TOTAL: usize, T> Default
    for MatrixArray<ROWS, COLS, TOTAL, T>
where
    T: Default + Copy,
{
    fn default() -> Self {
        Self::new([T::default(); TOTAL])
    }
}

impl<const ROWS: usize, const COLS: usize, const TOTAL: usize, T> Debug
    for MatrixArray<ROWS, COLS, TOTAL, T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MatrixArray")
            .field("rows", &ROWS)
            .field("cols", &COLS)
            .field("data", &self.data)
            .finish()
    }
}
