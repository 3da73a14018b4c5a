use crate::kalman::bind;
use crate::{KalmanError, Matrix};

/// A measurement (observation) of a [`KalmanFilter`](crate::KalmanFilter).
///
/// Holds the measurement vector `z`, the transformation `H`, the noise covariance `R`
/// and the outputs of the last correction: innovation `y`, residual covariance `S`
/// and Kalman gain `K`. One filter can be corrected with several measurements of
/// different sizes.
pub struct Measurement<'a, T> {
    num_states: usize,
    num_measurements: usize,
    /// Measurement vector (`num_measurements` × 1).
    pub(crate) z: Matrix<'a, T>,
    /// Measurement transformation matrix (`num_measurements` × `num_states`).
    pub(crate) h: Matrix<'a, T>,
    /// Measurement noise covariance (`num_measurements` × `num_measurements`).
    pub(crate) r: Matrix<'a, T>,
    /// Innovation vector (`num_measurements` × 1).
    pub(crate) y: Matrix<'a, T>,
    /// Residual covariance (`num_measurements` × `num_measurements`).
    pub(crate) s: Matrix<'a, T>,
    /// Kalman gain (`num_states` × `num_measurements`).
    pub(crate) k: Matrix<'a, T>,
}

impl<'a, T> Measurement<'a, T> {
    /// Binds the measurement buffers.
    ///
    /// ## Arguments
    /// * `num_states` - The number of states of the filter this measurement is used with.
    /// * `num_measurements` - The number of measured values.
    /// * `h` - The measurement transformation matrix (`num_measurements` × `num_states`).
    /// * `z` - The measurement vector (`num_measurements` × 1).
    /// * `r` - The measurement noise covariance (`num_measurements` × `num_measurements`).
    /// * `y` - The innovation vector (`num_measurements` × 1).
    /// * `s` - The residual covariance (`num_measurements` × `num_measurements`).
    /// * `k` - The Kalman gain (`num_states` × `num_measurements`).
    ///
    /// ## Errors
    /// Returns [`KalmanError::BufferSize`] if a buffer does not match its dimensions.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        num_states: usize,
        num_measurements: usize,
        h: &'a mut [T],
        z: &'a mut [T],
        r: &'a mut [T],
        y: &'a mut [T],
        s: &'a mut [T],
        k: &'a mut [T],
    ) -> Result<Self, KalmanError> {
        Ok(Self {
            num_states,
            num_measurements,
            h: bind("H", num_measurements, num_states, h)?,
            z: bind("z", num_measurements, 1, z)?,
            r: bind("R", num_measurements, num_measurements, r)?,
            y: bind("y", num_measurements, 1, y)?,
            s: bind("S", num_measurements, num_measurements, s)?,
            k: bind("K", num_states, num_measurements, k)?,
        })
    }

    /// Returns the number of states of the associated filter.
    #[inline(always)]
    pub const fn num_states(&self) -> usize {
        self.num_states
    }

    /// Returns the number of measured values.
    #[inline(always)]
    pub const fn num_measurements(&self) -> usize {
        self.num_measurements
    }

    /// Gets the measurement vector `z`.
    #[inline(always)]
    pub fn measurement_vector(&self) -> &Matrix<'a, T> {
        &self.z
    }

    /// Gets the measurement vector `z` for modification, e.g. to feed a new reading.
    #[inline(always)]
    pub fn measurement_vector_mut(&mut self) -> &mut Matrix<'a, T> {
        &mut self.z
    }

    /// Gets the measurement transformation matrix `H`.
    #[inline(always)]
    pub fn measurement_transformation(&self) -> &Matrix<'a, T> {
        &self.h
    }

    #[inline(always)]
    pub fn measurement_transformation_mut(&mut self) -> &mut Matrix<'a, T> {
        &mut self.h
    }

    /// Gets the measurement noise covariance `R`.
    #[inline(always)]
    pub fn process_noise(&self) -> &Matrix<'a, T> {
        &self.r
    }

    #[inline(always)]
    pub fn process_noise_mut(&mut self) -> &mut Matrix<'a, T> {
        &mut self.r
    }

    /// Gets the innovation `y` of the last correction.
    #[inline(always)]
    pub fn innovation(&self) -> &Matrix<'a, T> {
        &self.y
    }

    /// Gets the residual covariance buffer `S`.
    ///
    /// After a correction it holds the Cholesky factor `L` of `S` in its lower
    /// triangle; a rejected correction leaves a partial factor. The strictly upper
    /// triangle is stale.
    #[inline(always)]
    pub fn residual_covariance(&self) -> &Matrix<'a, T> {
        &self.s
    }

    /// Gets the Kalman gain `K` of the last correction.
    #[inline(always)]
    pub fn kalman_gain(&self) -> &Matrix<'a, T> {
        &self.k
    }
}
