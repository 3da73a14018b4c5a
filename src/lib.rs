//! # fixed-kalman
//!
//! An allocation-free linear algebra kernel and Kalman filter for embedded targets.
//! Matrices are views over caller-owned buffers with dimensions fixed at
//! construction; the filter's measurement update inverts the residual covariance
//! through a Cholesky decomposition.
//!
//! ## Crate features
//! * `std` - Uses the standard library for square roots and implements `std::error::Error`.
//!   Without it, square roots come from `libm`.
//! * `unsafe` - Skips the slice bounds check on element access.
//! * `defmt` - Logs rejected steps through `defmt` and derives `defmt::Format` on errors.
//!
//! ## Example
//! ```
//! use fixed_kalman::{
//!     scratch_aux_len, scratch_temp2_len, scratch_temp_len, KalmanFilter, KalmanScratch,
//!     Measurement,
//! };
//!
//! const STATES: usize = 2;
//! const MEASUREMENTS: usize = 1;
//!
//! let mut a = [1.0_f32, 1.0, 0.0, 1.0];
//! let mut x = [0.0_f32, 1.0];
//! let mut p = [1.0_f32, 0.0, 0.0, 1.0];
//!
//! let mut aux = [0.0_f32; scratch_aux_len(STATES, 0, MEASUREMENTS)];
//! let mut temp = [0.0_f32; scratch_temp_len(STATES, 0, MEASUREMENTS)];
//! let mut temp2 = [0.0_f32; scratch_temp2_len(STATES, MEASUREMENTS)];
//! let scratch = KalmanScratch::new(&mut aux, &mut temp, &mut temp2);
//! let mut filter = KalmanFilter::without_inputs(STATES, &mut a, &mut x, &mut p, scratch)?;
//!
//! let mut h = [1.0_f32, 0.0];
//! let mut z = [0.0_f32];
//! let mut r = [0.5_f32];
//! let (mut y, mut s, mut k) = ([0.0_f32; 1], [0.0_f32; 1], [0.0_f32; 2]);
//! let mut position = Measurement::new(
//!     STATES, MEASUREMENTS, &mut h, &mut z, &mut r, &mut y, &mut s, &mut k,
//! )?;
//!
//! filter.predict(1.0)?;
//! position.measurement_vector_mut().set(0, 0, 1.1);
//! filter.correct(&mut position)?;
//! # Ok::<(), fixed_kalman::KalmanError>(())
//! ```

// Enable no_std mode.
#![cfg_attr(not(feature = "std"), no_std)]
// Ensure allow(unsafe_code) / forbid(unsafe_code) markers.
#![cfg_attr(feature = "unsafe", allow(unsafe_code))]
#![cfg_attr(not(feature = "unsafe"), forbid(unsafe_code))]
// Only enables the `doc_cfg` feature when the `docsrs` configuration attribute is defined.
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod cholesky;
mod error;
pub mod kalman;
mod macros;
mod matrix;
mod num_traits;

pub use crate::error::{CholeskyError, KalmanError};
pub use crate::kalman::{
    scratch_aux_len, scratch_temp2_len, scratch_temp_len, KalmanFilter, KalmanScratch,
    Measurement,
};
pub use crate::matrix::{Matrix, MatrixArray};
pub use crate::num_traits::*;
