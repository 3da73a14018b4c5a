use crate::kalman::{bind, KalmanScratch, Measurement};
use crate::{cholesky, KalmanError, Matrix, MatrixDataType};

/// A linear Kalman filter over caller-owned buffers.
///
/// Holds the state vector `x`, the state transition `A`, the system covariance `P`
/// and, when the filter has inputs, the input vector `u`, input transition `B` and
/// input covariance `Q`.
///
/// ## Covariance update
/// [`correct`](Self::correct) uses the simple form `P = P - K × (H × P)` rather than
/// the Joseph form. It is cheaper but does not enforce symmetry or positive
/// definiteness of `P` under rounding.
pub struct KalmanFilter<'a, T> {
    num_states: usize,
    num_inputs: usize,
    /// State vector (`num_states` × 1).
    x: Matrix<'a, T>,
    /// State transition matrix (`num_states` × `num_states`).
    a: Matrix<'a, T>,
    /// System covariance matrix (`num_states` × `num_states`).
    p: Matrix<'a, T>,
    /// Input vector (`num_inputs` × 1).
    u: Matrix<'a, T>,
    /// Input transition matrix (`num_states` × `num_inputs`).
    b: Matrix<'a, T>,
    /// Input covariance matrix (`num_inputs` × `num_inputs`).
    q: Matrix<'a, T>,
    scratch: KalmanScratch<'a, T>,
}

impl<'a, T> KalmanFilter<'a, T> {
    /// Binds the filter buffers.
    ///
    /// ## Arguments
    /// * `num_states` - The number of state variables.
    /// * `num_inputs` - The number of input variables; may be zero.
    /// * `a` - The state transition matrix (`num_states` × `num_states`).
    /// * `x` - The state vector (`num_states` × 1).
    /// * `b` - The input transition matrix (`num_states` × `num_inputs`); empty without inputs.
    /// * `u` - The input vector (`num_inputs` × 1); empty without inputs.
    /// * `p` - The system covariance matrix (`num_states` × `num_states`).
    /// * `q` - The input covariance matrix (`num_inputs` × `num_inputs`); empty without inputs.
    /// * `scratch` - Temporary buffers, sized for the largest measurement in use.
    ///
    /// ## Errors
    /// Returns [`KalmanError::BufferSize`] if a buffer does not match its dimensions
    /// or the scratch buffers are too small for the states and inputs.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        num_states: usize,
        num_inputs: usize,
        a: &'a mut [T],
        x: &'a mut [T],
        b: &'a mut [T],
        u: &'a mut [T],
        p: &'a mut [T],
        q: &'a mut [T],
        scratch: KalmanScratch<'a, T>,
    ) -> Result<Self, KalmanError> {
        let dim = num_states.max(num_inputs);
        if scratch.aux.len() < dim {
            return Err(KalmanError::BufferSize {
                buffer: "aux",
                expected: dim,
                actual: scratch.aux.len(),
            });
        }
        if scratch.temp.len() < dim * dim {
            return Err(KalmanError::BufferSize {
                buffer: "temp",
                expected: dim * dim,
                actual: scratch.temp.len(),
            });
        }
        if scratch.temp2.len() < num_states * num_states {
            return Err(KalmanError::BufferSize {
                buffer: "temp2",
                expected: num_states * num_states,
                actual: scratch.temp2.len(),
            });
        }

        Ok(Self {
            num_states,
            num_inputs,
            a: bind("A", num_states, num_states, a)?,
            x: bind("x", num_states, 1, x)?,
            b: bind("B", num_states, num_inputs, b)?,
            u: bind("u", num_inputs, 1, u)?,
            p: bind("P", num_states, num_states, p)?,
            q: bind("Q", num_inputs, num_inputs, q)?,
            scratch,
        })
    }

    /// Binds the buffers of a filter without inputs.
    ///
    /// See [`new`](Self::new) for the arguments.
    pub fn without_inputs(
        num_states: usize,
        a: &'a mut [T],
        x: &'a mut [T],
        p: &'a mut [T],
        scratch: KalmanScratch<'a, T>,
    ) -> Result<Self, KalmanError> {
        Self::new(num_states, 0, a, x, &mut [], &mut [], p, &mut [], scratch)
    }

    /// Returns the number of states.
    #[inline(always)]
    pub const fn num_states(&self) -> usize {
        self.num_states
    }

    /// Returns the number of inputs.
    #[inline(always)]
    pub const fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    /// Gets the state vector `x`.
    #[inline(always)]
    pub fn state_vector(&self) -> &Matrix<'a, T> {
        &self.x
    }

    /// Gets the state vector `x` for modification, e.g. to set the initial state.
    #[inline(always)]
    pub fn state_vector_mut(&mut self) -> &mut Matrix<'a, T> {
        &mut self.x
    }

    /// Gets the state transition matrix `A`.
    #[inline(always)]
    pub fn state_transition(&self) -> &Matrix<'a, T> {
        &self.a
    }

    /// Gets the state transition matrix `A` for modification, e.g. to update
    /// time-varying coefficients between steps.
    #[inline(always)]
    pub fn state_transition_mut(&mut self) -> &mut Matrix<'a, T> {
        &mut self.a
    }

    /// Gets the system covariance matrix `P`.
    #[inline(always)]
    pub fn system_covariance(&self) -> &Matrix<'a, T> {
        &self.p
    }

    #[inline(always)]
    pub fn system_covariance_mut(&mut self) -> &mut Matrix<'a, T> {
        &mut self.p
    }

    /// Gets the input vector `u`.
    #[inline(always)]
    pub fn input_vector(&self) -> &Matrix<'a, T> {
        &self.u
    }

    #[inline(always)]
    pub fn input_vector_mut(&mut self) -> &mut Matrix<'a, T> {
        &mut self.u
    }

    /// Gets the input transition matrix `B`.
    #[inline(always)]
    pub fn input_transition(&self) -> &Matrix<'a, T> {
        &self.b
    }

    #[inline(always)]
    pub fn input_transition_mut(&mut self) -> &mut Matrix<'a, T> {
        &mut self.b
    }

    /// Gets the input covariance matrix `Q`.
    #[inline(always)]
    pub fn input_covariance(&self) -> &Matrix<'a, T> {
        &self.q
    }

    #[inline(always)]
    pub fn input_covariance_mut(&mut self) -> &mut Matrix<'a, T> {
        &mut self.q
    }
}

impl<'a, T> KalmanFilter<'a, T>
where
    T: MatrixDataType,
{
    /// Performs the time update (prediction) step.
    ///
    /// Computes `x = A × x` and `P = A × P × Aᵀ × 1/λ²`, then adds `B × Q × Bᵀ` to `P`
    /// if the filter has inputs.
    ///
    /// ## Arguments
    /// * `lambda` - The forgetting factor in `(0, 1]`. Smaller values inflate the
    ///   covariance faster, i.e. reduce confidence in the prediction. Use `1` for the
    ///   plain Kalman prediction.
    ///
    /// ## Errors
    /// Returns [`KalmanError::InvalidLambda`] without modifying the filter if `lambda`
    /// is not in `(0, 1]`.
    pub fn predict(&mut self, lambda: T) -> Result<(), KalmanError> {
        if lambda <= T::zero() || lambda > T::one() || lambda.is_nan() {
            #[cfg(feature = "defmt")]
            defmt::warn!("Rejecting prediction: lambda out of range");
            return Err(KalmanError::InvalidLambda);
        }

        let n = self.num_states;
        let m = self.num_inputs;
        let KalmanScratch { aux, temp, .. } = &mut self.scratch;

        // x = A × x
        {
            let mut x_next = Matrix::new(n, 1, &mut aux[..n]);
            self.a.multiply_vector(&self.x, &mut x_next);
            self.x.copy_from(&x_next);
        }

        // P = A × P × Aᵀ × 1/λ²
        {
            let factor = (lambda * lambda).recip();
            let mut ap = Matrix::new(n, n, &mut temp[..n * n]);
            self.a.multiply(&self.p, &mut ap, &mut aux[..n]);
            ap.multiply_scale_transb(&self.a, factor, &mut self.p);
        }

        // P = P + B × Q × Bᵀ
        if m > 0 {
            let mut bq = Matrix::new(n, m, &mut temp[..n * m]);
            self.b.multiply(&self.q, &mut bq, &mut aux[..m]);
            bq.multiply_add_transb(&self.b, &mut self.p);
        }

        #[cfg(feature = "defmt")]
        defmt::trace!("Predicted {=usize} states", n);
        Ok(())
    }

    /// Applies the control input, computing `x = x + B × u`.
    ///
    /// Does nothing if the filter has no inputs.
    pub fn control(&mut self) {
        if self.num_inputs == 0 {
            return;
        }

        let n = self.num_states;
        let mut bu = Matrix::new(n, 1, &mut self.scratch.aux[..n]);
        self.b.multiply_vector(&self.u, &mut bu);
        self.x.add_inplace(&bu);
    }

    /// Performs the measurement update (correction) step.
    ///
    /// Computes the innovation `y = z - H × x`, the residual covariance
    /// `S = H × P × Hᵀ + R` and the gain `K = P × Hᵀ × S⁻¹`, then updates
    /// `x = x + K × y` and `P = P - K × (H × P)`.
    ///
    /// ## Errors
    /// * [`KalmanError::DimensionMismatch`] if the measurement was built for a different
    ///   number of states or is larger than the scratch buffers allow.
    /// * [`KalmanError::NotPositiveDefinite`] if `S` cannot be decomposed.
    ///
    /// In both cases `x` and `P` are left unmodified.
    pub fn correct(&mut self, measurement: &mut Measurement<'_, T>) -> Result<(), KalmanError> {
        let n = self.num_states;
        let k = measurement.num_measurements();

        if measurement.num_states() != n {
            return Err(KalmanError::DimensionMismatch {
                what: "measurement state count",
                expected: n,
                actual: measurement.num_states(),
            });
        }

        let dim = n.max(k);
        if self.scratch.max_dimension() < dim {
            return Err(KalmanError::DimensionMismatch {
                what: "scratch dimension",
                expected: dim,
                actual: self.scratch.max_dimension(),
            });
        }

        let KalmanScratch { aux, temp, temp2 } = &mut self.scratch;
        let Measurement {
            z,
            h,
            r,
            y,
            s,
            k: gain,
            ..
        } = measurement;

        // y = z - H × x
        h.multiply_vector(&self.x, y);
        z.subtract_inplace_b(y);

        // S = H × P × Hᵀ + R
        {
            let mut hp = Matrix::new(k, n, &mut temp[..k * n]);
            h.multiply(&self.p, &mut hp, &mut aux[..n]);
            hp.multiply_transb(h, s);
        }
        s.add_inplace(r);

        // S = L, with L × Lᵀ = S
        if let Err(error) = cholesky::decompose_lower(s) {
            #[cfg(feature = "defmt")]
            defmt::warn!("Rejecting correction: {}", error);
            return Err(error.into());
        }

        // K = P × Hᵀ × S⁻¹
        {
            let mut s_inv = Matrix::new(k, k, &mut temp2[..k * k]);
            cholesky::invert_lower(s, &mut s_inv);

            let mut pht = Matrix::new(n, k, &mut temp[..n * k]);
            self.p.multiply_transb(h, &mut pht);
            pht.multiply(&s_inv, gain, &mut aux[..k]);
        }

        // x = x + K × y
        {
            let mut ky = Matrix::new(n, 1, &mut aux[..n]);
            gain.multiply_vector(y, &mut ky);
            self.x.add_inplace(&ky);
        }

        // P = P - K × (H × P)
        {
            let mut hp = Matrix::new(k, n, &mut temp[..k * n]);
            h.multiply(&self.p, &mut hp, &mut aux[..n]);
            let mut khp = Matrix::new(n, n, &mut temp2[..n * n]);
            gain.multiply(&hp, &mut khp, &mut aux[..k]);
            self.p.subtract_inplace(&khp);
        }

        #[cfg(feature = "defmt")]
        defmt::trace!("Corrected with {=usize} measurements", k);
        Ok(())
    }
}
