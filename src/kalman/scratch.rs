use core::fmt::{Debug, Formatter};

/// Number of elements of the auxiliary column buffer for a filter with `num_states`
/// states, `num_inputs` inputs and at most `num_measurements` measurements.
pub const fn scratch_aux_len(
    num_states: usize,
    num_inputs: usize,
    num_measurements: usize,
) -> usize {
    max(max(num_states, num_inputs), num_measurements)
}

/// Number of elements of the square temporary buffer.
pub const fn scratch_temp_len(
    num_states: usize,
    num_inputs: usize,
    num_measurements: usize,
) -> usize {
    let dim = scratch_aux_len(num_states, num_inputs, num_measurements);
    dim * dim
}

/// Number of elements of the second temporary buffer, holding `S⁻¹` and later
/// `K × (H × P)`.
pub const fn scratch_temp2_len(num_states: usize, num_measurements: usize) -> usize {
    let dim = max(num_states, num_measurements);
    dim * dim
}

const fn max(a: usize, b: usize) -> usize {
    if a > b {
        a
    } else {
        b
    }
}

/// Temporary buffers reused by every predict and correct step.
///
/// Size them with [`scratch_aux_len`], [`scratch_temp_len`] and [`scratch_temp2_len`].
/// The contents are meaningless between calls.
pub struct KalmanScratch<'a, T> {
    pub(crate) aux: &'a mut [T],
    pub(crate) temp: &'a mut [T],
    pub(crate) temp2: &'a mut [T],
}

impl<'a, T> KalmanScratch<'a, T> {
    /// Binds the scratch buffers.
    ///
    /// ## Arguments
    /// * `aux` - The auxiliary column buffer, see [`scratch_aux_len`].
    /// * `temp` - The square temporary buffer, see [`scratch_temp_len`].
    /// * `temp2` - The second square temporary buffer, see [`scratch_temp2_len`].
    pub fn new(aux: &'a mut [T], temp: &'a mut [T], temp2: &'a mut [T]) -> Self {
        Self { aux, temp, temp2 }
    }

    /// The largest matrix dimension all three buffers can serve.
    pub fn max_dimension(&self) -> usize {
        let mut dim = 0;
        while dim < self.aux.len()
            && (dim + 1) * (dim + 1) <= self.temp.len()
            && (dim + 1) * (dim + 1) <= self.temp2.len()
        {
            dim += 1;
        }
        dim
    }
}

impl<'a, T> Debug for KalmanScratch<'a, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("KalmanScratch")
            .field("aux", &self.aux.len())
            .field("temp", &self.temp.len())
            .field("temp2", &self.temp2.len())
            .finish()
    }
}
