mod array;

pub use crate::matrix::array::MatrixArray;

use crate::MatrixDataType;
use core::fmt::{Debug, Formatter};

/// A dense, row-major matrix view over a caller-owned buffer.
///
/// The view never allocates, resizes or reallocates; its dimensions are fixed when
/// it is constructed. Every arithmetic operation writes into an output view supplied
/// by the caller, which must already have the exact result shape.
///
/// ## Shape contracts
/// Dimension mismatches are programming errors, not runtime conditions. They are
/// checked with `debug_assert!` and elided in release builds. Input/output aliasing
/// cannot be expressed at all, since outputs are borrowed mutably.
pub struct Matrix<'a, T> {
    rows: usize,
    cols: usize,
    data: &'a mut [T],
}

impl<'a, T> Matrix<'a, T> {
    /// Binds a new matrix view to a buffer.
    ///
    /// ## Arguments
    /// * `rows` - The number of rows.
    /// * `cols` - The number of columns.
    /// * `data` - The row-major data buffer of exactly `rows` × `cols` elements.
    ///
    /// ## Panics
    /// Panics if the buffer length does not equal `rows` × `cols`.
    pub fn new(rows: usize, cols: usize, data: &'a mut [T]) -> Self {
        assert_eq!(
            data.len(),
            rows * cols,
            "matrix buffer length must equal rows × cols"
        );
        Self { rows, cols, data }
    }

    /// Returns the number of rows.
    #[inline(always)]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[inline(always)]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the number of elements, i.e. rows × cols.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline(always)]
    pub const fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Gets the row-major data.
    #[inline(always)]
    pub fn as_slice(&self) -> &[T] {
        &*self.data
    }

    /// Gets the row-major data for modification.
    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut *self.data
    }

    /// Returns a view over one contiguous row without copying.
    #[inline]
    pub fn row(&self, row: usize) -> &[T] {
        debug_assert!(row < self.rows);
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Returns a mutable view over one contiguous row without copying.
    #[inline]
    pub fn row_mut(&mut self, row: usize) -> &mut [T] {
        debug_assert!(row < self.rows);
        let start = row * self.cols;
        &mut self.data[start..start + self.cols]
    }

    #[inline(always)]
    fn index_of(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.rows, "row index out of range");
        debug_assert!(col < self.cols, "column index out of range");
        row * self.cols + col
    }
}

impl<'a, T> Matrix<'a, T>
where
    T: Copy,
{
    /// Gets the value at the given row and column.
    ///
    /// Bounds are only checked in debug builds; with the `unsafe` feature enabled
    /// the slice bounds check is skipped as well.
    #[inline(always)]
    pub fn get(&self, row: usize, col: usize) -> T {
        let index = self.index_of(row, col);
        self.read(index)
    }

    /// Sets the value at the given row and column.
    ///
    /// Bounds are only checked in debug builds; with the `unsafe` feature enabled
    /// the slice bounds check is skipped as well.
    #[inline(always)]
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        let index = self.index_of(row, col);
        self.write(index, value);
    }

    #[cfg(not(feature = "unsafe"))]
    #[inline(always)]
    fn read(&self, index: usize) -> T {
        self.data[index]
    }

    #[cfg(not(feature = "unsafe"))]
    #[inline(always)]
    fn write(&mut self, index: usize, value: T) {
        self.data[index] = value;
    }

    #[cfg(feature = "unsafe")]
    #[inline(always)]
    fn read(&self, index: usize) -> T {
        // SAFETY: index_of() is only ever called with row < rows and col < cols,
        //         so the index lies within the rows × cols buffer.
        unsafe { *self.data.get_unchecked(index) }
    }

    #[cfg(feature = "unsafe")]
    #[inline(always)]
    fn write(&mut self, index: usize, value: T) {
        // SAFETY: see read().
        unsafe { *self.data.get_unchecked_mut(index) = value }
    }

    /// Sets the value at `(row, col)` and its mirror at `(col, row)`.
    #[inline]
    pub fn set_symmetric(&mut self, row: usize, col: usize, value: T) {
        self.set(row, col, value);
        self.set(col, row, value);
    }

    /// Copies one row into the `out` buffer of length [`cols`](Self::cols).
    pub fn get_row_copy(&self, row: usize, out: &mut [T]) {
        debug_assert!(out.len() >= self.cols);
        let source = self.row(row);
        for i in (0..self.cols).rev() {
            out[i] = source[i];
        }
    }

    /// Copies one column into the `out` buffer of length [`rows`](Self::rows).
    pub fn get_column_copy(&self, col: usize, out: &mut [T]) {
        debug_assert!(col < self.cols);
        debug_assert!(out.len() >= self.rows);
        for i in (0..self.rows).rev() {
            out[i] = self.data[i * self.cols + col];
        }
    }

    /// Sets every element to the same value.
    pub fn set_all(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Copies all elements from a matrix of identical shape.
    pub fn copy_from(&mut self, other: &Matrix<'_, T>) {
        debug_assert_eq!(self.rows, other.rows);
        debug_assert_eq!(self.cols, other.cols);
        self.data.copy_from_slice(other.as_slice());
    }
}

impl<'a, T> Matrix<'a, T>
where
    T: MatrixDataType,
{
    /// Turns a square matrix into the identity matrix.
    pub fn make_identity(&mut self) {
        self.make_scalar(T::one());
    }

    /// Turns a square matrix into a diagonal matrix with `value` on the diagonal.
    pub fn make_scalar(&mut self, value: T) {
        debug_assert!(self.is_square());
        self.data.fill(T::zero());
        for i in 0..self.rows {
            self.set(i, i, value);
        }
    }

    /// Calculates the sum of the diagonal elements of a square matrix.
    pub fn trace(&self) -> T {
        debug_assert!(self.is_square());
        let mut sum = T::zero();
        for i in 0..self.rows {
            sum += self.get(i, i);
        }
        sum
    }

    /// Multiplies two matrices, computing `c = self × b`.
    ///
    /// ## Arguments
    /// * `b` - The right-hand operand with `b.rows == self.cols`.
    /// * `c` - The output of shape `self.rows` × `b.cols`.
    /// * `aux` - An auxiliary buffer of at least `b.rows` elements. Each column
    ///   of `b` is copied into it before use to keep the inner loop contiguous.
    pub fn multiply(&self, b: &Matrix<'_, T>, c: &mut Matrix<'_, T>, aux: &mut [T]) {
        debug_assert_eq!(self.cols, b.rows, "self.cols must equal b.rows");
        debug_assert_eq!(self.rows, c.rows, "self.rows must equal c.rows");
        debug_assert_eq!(b.cols, c.cols, "b.cols must equal c.cols");
        debug_assert!(aux.len() >= b.rows, "aux must hold a column of b");

        let column = &mut aux[..b.rows];
        for j in (0..c.cols).rev() {
            b.get_column_copy(j, column);

            for i in (0..self.rows).rev() {
                let a_row = self.row(i);
                let mut sum = T::zero();
                for (a, b) in a_row.iter().zip(column.iter()) {
                    sum += *a * *b;
                }
                c.set(i, j, sum);
            }
        }
    }

    /// Multiplies a matrix with a column vector, computing `c = self × x`.
    pub fn multiply_vector(&self, x: &Matrix<'_, T>, c: &mut Matrix<'_, T>) {
        debug_assert_eq!(x.cols, 1, "x must be a column vector");
        debug_assert_eq!(c.cols, 1, "c must be a column vector");
        debug_assert_eq!(self.cols, x.rows);
        debug_assert_eq!(self.rows, c.rows);

        for i in (0..self.rows).rev() {
            let mut sum = T::zero();
            for (a, x) in self.row(i).iter().zip(x.data.iter()) {
                sum += *a * *x;
            }
            c.data[i] = sum;
        }
    }

    #[inline]
    fn dot_rows(&self, i: usize, b: &Matrix<'_, T>, j: usize) -> T {
        let mut sum = T::zero();
        for (a, b) in self.row(i).iter().zip(b.row(j).iter()) {
            sum += *a * *b;
        }
        sum
    }

    #[inline]
    fn debug_assert_transb_shapes(&self, b: &Matrix<'_, T>, c: &Matrix<'_, T>) {
        debug_assert_eq!(self.cols, b.cols, "self.cols must equal b.cols");
        debug_assert_eq!(self.rows, c.rows, "self.rows must equal c.rows");
        debug_assert_eq!(b.rows, c.cols, "b.rows must equal c.cols");
    }

    /// Multiplies with a transposed matrix, computing `c = self × bᵀ`.
    ///
    /// The transpose is never materialized; rows of `b` are read in place.
    pub fn multiply_transb(&self, b: &Matrix<'_, T>, c: &mut Matrix<'_, T>) {
        self.debug_assert_transb_shapes(b, c);
        for i in 0..self.rows {
            for j in 0..b.rows {
                let sum = self.dot_rows(i, b, j);
                c.set(i, j, sum);
            }
        }
    }

    /// Multiplies with a transposed matrix and accumulates, computing `c += self × bᵀ`.
    pub fn multiply_add_transb(&self, b: &Matrix<'_, T>, c: &mut Matrix<'_, T>) {
        self.debug_assert_transb_shapes(b, c);
        for i in 0..self.rows {
            for j in 0..b.rows {
                let sum = self.dot_rows(i, b, j);
                let value = c.get(i, j) + sum;
                c.set(i, j, value);
            }
        }
    }

    /// Multiplies with a transposed matrix and scales, computing `c = (self × bᵀ) × scale`.
    pub fn multiply_scale_transb(&self, b: &Matrix<'_, T>, scale: T, c: &mut Matrix<'_, T>) {
        self.debug_assert_transb_shapes(b, c);
        for i in 0..self.rows {
            for j in 0..b.rows {
                let sum = self.dot_rows(i, b, j);
                c.set(i, j, sum * scale);
            }
        }
    }

    /// Adds a matrix of identical shape in place, computing `self += b`.
    pub fn add_inplace(&mut self, b: &Matrix<'_, T>) {
        debug_assert_eq!(self.rows, b.rows);
        debug_assert_eq!(self.cols, b.cols);
        for (c, b) in self.data.iter_mut().zip(b.data.iter()) {
            *c += *b;
        }
    }

    /// Subtracts a matrix of identical shape in place, computing `self -= b`.
    pub fn subtract_inplace(&mut self, b: &Matrix<'_, T>) {
        debug_assert_eq!(self.rows, b.rows);
        debug_assert_eq!(self.cols, b.cols);
        for (a, b) in self.data.iter_mut().zip(b.data.iter()) {
            *a -= *b;
        }
    }

    /// Subtracts in place, overwriting the subtrahend: computes `b = self - b`.
    pub fn subtract_inplace_b(&self, b: &mut Matrix<'_, T>) {
        debug_assert_eq!(self.rows, b.rows);
        debug_assert_eq!(self.cols, b.cols);
        for (a, b) in self.data.iter().zip(b.data.iter_mut()) {
            *b = *a - *b;
        }
    }

    /// Subtracts two matrices of identical shape, computing `c = self - b`.
    ///
    /// To overwrite the minuend, use [`subtract_inplace`](Self::subtract_inplace).
    pub fn subtract(&self, b: &Matrix<'_, T>, c: &mut Matrix<'_, T>) {
        debug_assert_eq!(self.rows, b.rows);
        debug_assert_eq!(self.cols, b.cols);
        debug_assert_eq!(self.rows, c.rows);
        debug_assert_eq!(self.cols, c.cols);
        for ((c, a), b) in c.data.iter_mut().zip(self.data.iter()).zip(b.data.iter()) {
            *c = *a - *b;
        }
    }
}

impl<'a, T> Debug for Matrix<'a, T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Matrix")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("data", &self.data)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_get_set() {
        let mut data = [0.0_f32; 6];
        let mut m = Matrix::new(2, 3, &mut data);
        m.set(1, 2, 5.0);
        m.set(0, 1, 2.0);
        assert_eq!(m.get(1, 2), 5.0);
        assert_eq!(m.as_slice(), &[0.0, 2.0, 0.0, 0.0, 0.0, 5.0]);
    }

    #[test]
    #[should_panic]
    fn test_new_rejects_wrong_length() {
        let mut data = [0.0_f32; 5];
        let _ = Matrix::new(2, 3, &mut data);
    }

    #[test]
    fn test_row_and_column_copy() {
        let mut data = [
            1.0_f32, 2.0, 3.0, 10.0, //
            4.0, 5.0, 6.0, 11.0, //
            7.0, 8.0, 9.0, 12.0,
        ];
        let m = Matrix::new(3, 4, &mut data);

        let mut column = [0.0_f32; 3];
        m.get_column_copy(2, &mut column);
        assert_eq!(column, [3.0, 6.0, 9.0]);

        let mut row = [0.0_f32; 4];
        m.get_row_copy(2, &mut row);
        assert_eq!(row, [7.0, 8.0, 9.0, 12.0]);

        assert_eq!(m.row(1), &[4.0, 5.0, 6.0, 11.0]);
    }

    #[test]
    fn test_multiply() {
        let mut a_data = [
            1.0_f32, 0.5, 0.0, //
            0.5, 1.0, 0.0, //
            0.0, 0.0, 1.0,
        ];
        let mut b_data = [
            1.0_f32, 2.0, 3.0, 4.0, //
            5.0, 6.0, 7.0, 8.0, //
            9.0, 10.0, 11.0, 12.0,
        ];
        let mut c_data = [0.0_f32; 12];
        let mut aux = [0.0_f32; 3];

        let a = Matrix::new(3, 3, &mut a_data);
        let b = Matrix::new(3, 4, &mut b_data);
        let mut c = Matrix::new(3, 4, &mut c_data);
        a.multiply(&b, &mut c, &mut aux);

        assert_abs_diff_eq!(c.get(0, 0), 3.5);
        assert_abs_diff_eq!(c.get(0, 1), 5.0);
        assert_abs_diff_eq!(c.get(1, 1), 7.0);
        assert_abs_diff_eq!(c.get(2, 3), 12.0);
    }

    #[test]
    fn test_multiply_transb() {
        let mut a_data = [
            1.0_f32, 0.5, 0.0, //
            0.5, 1.0, 0.0, //
            0.0, 0.0, 1.0,
        ];
        let mut b_data = [
            1.0_f32, 2.0, 3.0, //
            5.0, 6.0, 7.0, //
            9.0, 10.0, 11.0,
        ];
        let mut c_data = [0.0_f32; 9];

        let a = Matrix::new(3, 3, &mut a_data);
        let b = Matrix::new(3, 3, &mut b_data);
        let mut c = Matrix::new(3, 3, &mut c_data);
        a.multiply_transb(&b, &mut c);

        assert_abs_diff_eq!(c.get(0, 0), 2.0);
        assert_abs_diff_eq!(c.get(0, 1), 8.0);
        assert_abs_diff_eq!(c.get(1, 1), 8.5);
        assert_abs_diff_eq!(c.get(2, 2), 11.0);
    }

    #[test]
    fn test_multiply_add_and_scale_transb() {
        let mut a_data = [1.0_f32, 2.0, 3.0, 4.0];
        let mut b_data = [1.0_f32, 0.0, 1.0, 1.0];
        let mut c_data = [1.0_f32; 4];

        let a = Matrix::new(2, 2, &mut a_data);
        let b = Matrix::new(2, 2, &mut b_data);
        let mut c = Matrix::new(2, 2, &mut c_data);

        // a × bᵀ = [[1, 3], [3, 7]]
        a.multiply_add_transb(&b, &mut c);
        assert_eq!(c.as_slice(), &[2.0, 4.0, 4.0, 8.0]);

        a.multiply_scale_transb(&b, 0.5, &mut c);
        assert_eq!(c.as_slice(), &[0.5, 1.5, 1.5, 3.5]);
    }

    #[test]
    fn test_multiply_non_square() {
        // (2×3) × (3×1)
        let mut a_data = [1.0_f32, 2.0, 3.0, 4.0, 5.0, 6.0];
        let mut x_data = [1.0_f32, 0.0, -1.0];
        let mut c_data = [0.0_f32; 2];
        let mut v_data = [0.0_f32; 2];
        let mut aux = [0.0_f32; 3];

        let a = Matrix::new(2, 3, &mut a_data);
        let x = Matrix::new(3, 1, &mut x_data);
        let mut c = Matrix::new(2, 1, &mut c_data);
        let mut v = Matrix::new(2, 1, &mut v_data);

        a.multiply(&x, &mut c, &mut aux);
        a.multiply_vector(&x, &mut v);
        assert_eq!(c.as_slice(), &[-2.0, -2.0]);
        assert_eq!(v.as_slice(), c.as_slice());
    }

    #[test]
    fn test_add_and_subtract() {
        let mut a_data = [5.0_f32, 6.0, 7.0, 8.0];
        let mut b_data = [1.0_f32, 2.0, 3.0, 4.0];
        let mut c_data = [0.0_f32; 4];

        let mut a = Matrix::new(2, 2, &mut a_data);
        let mut b = Matrix::new(2, 2, &mut b_data);
        let mut c = Matrix::new(2, 2, &mut c_data);

        a.subtract(&b, &mut c);
        assert_eq!(c.as_slice(), &[4.0, 4.0, 4.0, 4.0]);

        a.add_inplace(&b);
        assert_eq!(a.as_slice(), &[6.0, 8.0, 10.0, 12.0]);

        a.subtract_inplace(&c);
        assert_eq!(a.as_slice(), &[2.0, 4.0, 6.0, 8.0]);

        a.subtract_inplace_b(&mut b);
        assert_eq!(b.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_make_identity_and_trace() {
        let mut data = [7.0_f32; 9];
        let mut m = Matrix::new(3, 3, &mut data);
        m.make_identity();
        assert_eq!(m.trace(), 3.0);
        assert_eq!(m.get(0, 1), 0.0);

        m.make_scalar(2.0);
        assert_eq!(m.trace(), 6.0);

        m.set_symmetric(0, 2, 4.0);
        assert_eq!(m.get(2, 0), 4.0);
        assert_eq!(m.get(0, 2), 4.0);
    }

    #[test]
    fn test_empty() {
        let mut data: [f32; 0] = [];
        let m = Matrix::new(0, 0, &mut data);
        assert!(m.is_empty());
        assert_eq!(m.rows(), 0);
        assert_eq!(m.cols(), 0);
    }
}
