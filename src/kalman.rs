//! The Kalman filter and its measurements, bound to caller-owned buffers.
//!
//! A filter is built once from pre-sized buffers and then driven by alternating
//! [`KalmanFilter::predict`] and [`KalmanFilter::correct`] calls. No step allocates;
//! all intermediate products go through a [`KalmanScratch`] sized at construction.

mod filter;
mod measurement;
mod scratch;

pub use crate::kalman::filter::KalmanFilter;
pub use crate::kalman::measurement::Measurement;
pub use crate::kalman::scratch::{
    scratch_aux_len, scratch_temp2_len, scratch_temp_len, KalmanScratch,
};

use crate::{KalmanError, Matrix};

/// Binds a buffer as a matrix view, reporting a size mismatch as an error.
fn bind<'a, T>(
    buffer: &'static str,
    rows: usize,
    cols: usize,
    data: &'a mut [T],
) -> Result<Matrix<'a, T>, KalmanError> {
    let expected = rows * cols;
    if data.len() != expected {
        return Err(KalmanError::BufferSize {
            buffer,
            expected,
            actual: data.len(),
        });
    }
    Ok(Matrix::new(rows, cols, data))
}
