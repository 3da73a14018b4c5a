//! Estimates the gravitational acceleration from position readings of a falling object.

use approx::assert_abs_diff_eq;
use fixed_kalman::{
    scratch_aux_len, scratch_temp2_len, scratch_temp_len, KalmanError, KalmanFilter,
    KalmanScratch, MatrixArray, Measurement,
};

const STATES: usize = 3; // position, velocity, acceleration
const MEASUREMENTS: usize = 1; // position

const GRAVITY: f32 = 9.81;
const LAMBDA: f32 = 0.98;

/// Noise-free position of an object falling from rest.
fn true_position(t: f32) -> f32 {
    0.5 * GRAVITY * t * t
}

#[test]
fn test_gravity_estimation() -> Result<(), KalmanError> {
    let mut a = MatrixArray::<STATES, STATES, { STATES * STATES }, f32>::zeros();
    let mut x = MatrixArray::<STATES, 1, STATES, f32>::zeros();
    let mut p = MatrixArray::<STATES, STATES, { STATES * STATES }, f32>::zeros();

    let mut aux = [0.0_f32; scratch_aux_len(STATES, 0, MEASUREMENTS)];
    let mut temp = [0.0_f32; scratch_temp_len(STATES, 0, MEASUREMENTS)];
    let mut temp2 = [0.0_f32; scratch_temp2_len(STATES, MEASUREMENTS)];
    let scratch = KalmanScratch::new(&mut aux, &mut temp, &mut temp2);

    let mut filter = KalmanFilter::without_inputs(
        STATES,
        a.as_mut_slice(),
        x.as_mut_slice(),
        p.as_mut_slice(),
        scratch,
    )?;

    // Constant acceleration model with a time step of one second.
    {
        let a = filter.state_transition_mut();
        a.set(0, 0, 1.0);
        a.set(0, 1, 1.0);
        a.set(0, 2, 0.5);
        a.set(1, 1, 1.0);
        a.set(1, 2, 1.0);
        a.set(2, 2, 1.0);
    }
    filter.system_covariance_mut().make_identity();

    let mut h = MatrixArray::<MEASUREMENTS, STATES, { MEASUREMENTS * STATES }, f32>::zeros();
    let mut z = MatrixArray::<MEASUREMENTS, 1, MEASUREMENTS, f32>::zeros();
    let mut r = MatrixArray::<MEASUREMENTS, MEASUREMENTS, 1, f32>::zeros();
    let mut y = MatrixArray::<MEASUREMENTS, 1, MEASUREMENTS, f32>::zeros();
    let mut s = MatrixArray::<MEASUREMENTS, MEASUREMENTS, 1, f32>::zeros();
    let mut k = MatrixArray::<STATES, MEASUREMENTS, { STATES * MEASUREMENTS }, f32>::zeros();

    let mut position = Measurement::new(
        STATES,
        MEASUREMENTS,
        h.as_mut_slice(),
        z.as_mut_slice(),
        r.as_mut_slice(),
        y.as_mut_slice(),
        s.as_mut_slice(),
        k.as_mut_slice(),
    )?;
    position.measurement_transformation_mut().set(0, 0, 1.0);
    position.process_noise_mut().set(0, 0, 0.5);

    let initial_trace = filter.system_covariance().trace();
    for step in 1..=30 {
        filter.predict(LAMBDA)?;

        let t = step as f32;
        position
            .measurement_vector_mut()
            .set(0, 0, true_position(t));
        filter.correct(&mut position)?;
    }

    let estimate = filter.state_vector();
    assert_abs_diff_eq!(estimate.get(2, 0), GRAVITY, epsilon = 0.05);
    assert_abs_diff_eq!(estimate.get(1, 0), GRAVITY * 30.0, epsilon = 1.0);
    assert_abs_diff_eq!(estimate.get(0, 0), true_position(30.0), epsilon = 1.0);

    let covariance = filter.system_covariance();
    assert!(covariance.trace() < initial_trace);
    for i in 0..STATES {
        assert!(covariance.get(i, i) > 0.0);
        for j in 0..STATES {
            assert_abs_diff_eq!(covariance.get(i, j), covariance.get(j, i), epsilon = 1e-3);
        }
    }

    Ok(())
}

#[test]
fn test_process_noise_through_inputs() -> Result<(), KalmanError> {
    // Random-walk acceleration entering through the input transition.
    const INPUTS: usize = 1;

    let mut a = [
        1.0_f32, 1.0, 0.5, //
        0.0, 1.0, 1.0, //
        0.0, 0.0, 1.0,
    ];
    let mut x = [0.0_f32; STATES];
    let mut b = [0.0_f32, 0.0, 1.0];
    let mut u = [0.0_f32; INPUTS];
    let mut p = [
        1.0_f32, 0.0, 0.0, //
        0.0, 1.0, 0.0, //
        0.0, 0.0, 1.0,
    ];
    let mut q = [0.01_f32];

    let mut aux = [0.0_f32; scratch_aux_len(STATES, INPUTS, MEASUREMENTS)];
    let mut temp = [0.0_f32; scratch_temp_len(STATES, INPUTS, MEASUREMENTS)];
    let mut temp2 = [0.0_f32; scratch_temp2_len(STATES, MEASUREMENTS)];
    let scratch = KalmanScratch::new(&mut aux, &mut temp, &mut temp2);

    let mut filter = KalmanFilter::new(
        STATES, INPUTS, &mut a, &mut x, &mut b, &mut u, &mut p, &mut q, scratch,
    )?;

    let mut h = [1.0_f32, 0.0, 0.0];
    let mut z = [0.0_f32];
    let mut r = [0.5_f32];
    let mut y = [0.0_f32];
    let mut s = [0.0_f32];
    let mut k = [0.0_f32; STATES];
    let mut position = Measurement::new(
        STATES,
        MEASUREMENTS,
        &mut h,
        &mut z,
        &mut r,
        &mut y,
        &mut s,
        &mut k,
    )?;

    for step in 1..=40 {
        filter.predict(1.0)?;
        let t = step as f32;
        position
            .measurement_vector_mut()
            .set(0, 0, true_position(t));
        filter.correct(&mut position)?;
    }

    // The input covariance keeps the acceleration variance from collapsing.
    assert!(filter.system_covariance().get(2, 2) > 1e-3);
    assert_abs_diff_eq!(filter.state_vector().get(2, 0), GRAVITY, epsilon = 0.1);
    Ok(())
}
