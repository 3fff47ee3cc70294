//! Per-sample system identification.
//!
//! For each sample the snapshot pairs `X1 = x[0..T-1]`, `X2 = x[1..T]` and the
//! inputs `U = u[0..T-1]` are stacked into `Omega = [X1; U]`. A truncated SVD
//! `Omega ~ U_r S_r V_r^T` gives `[A B] = X2 V_r S_r^-1 U_r^T`, with `S_r^-1`
//! applied through its QR factors. The output map uses the full pseudoinverse
//! of `X1`, independent of the SVD truncation.

use crate::bank::{CenteringRef, ModelBank, SampleModel};
use crate::error::{DmdcError, DmdcResult};
use crate::extract::{SampleSignals, Trajectories};
use nalgebra::{DMatrix, DVector};
use rayon::prelude::*;
use rf_core::{Real, SampleId};
use rf_linalg::{LinalgError, RankPolicy, projected_least_squares, pseudo_inverse, truncated_svd};

/// Identify `(A, B, C)` for one sample.
pub fn identify_sample(
    sample: SampleId,
    signals: &SampleSignals,
    center: bool,
    rank: RankPolicy,
) -> DmdcResult<SampleModel> {
    let steps = signals.timesteps();
    if steps < 2 {
        return Err(DmdcError::shape(format!(
            "sample {sample} has {steps} timesteps; at least 2 are required"
        )));
    }
    let n = signals.x.nrows();
    let m = signals.u.nrows();
    let pairs = steps - 1;

    let mut x1 = signals.x.columns(0, pairs).into_owned();
    let mut x2 = signals.x.columns(1, pairs).into_owned();
    let mut u = signals.u.columns(0, pairs).into_owned();
    let mut y1 = signals.y.columns(0, pairs).into_owned();

    if center {
        let x0 = signals.x.column(0).into_owned();
        subtract_from_columns(&mut x1, &x0);
        subtract_from_columns(&mut x2, &x0);
        subtract_from_columns(&mut u, &signals.u.column(0).into_owned());
        subtract_from_columns(&mut y1, &signals.y.column(0).into_owned());
    }

    let omega = DMatrix::from_fn(n + m, pairs, |r, c| {
        if r < n { x1[(r, c)] } else { u[(r - n, c)] }
    });

    let svd = truncated_svd(&omega, rank)?;
    let beta = projected_least_squares(&x2, &svd).map_err(|e| match e {
        LinalgError::SingularR { rank } => DmdcError::SingularR { sample, rank },
        other => other.into(),
    })?;

    let a = &beta * svd.u.rows(0, n).transpose();
    let b = &beta * svd.u.rows(n, m).transpose();
    let c = &y1 * pseudo_inverse(&x1)?;

    tracing::debug!(
        sample = sample.index(),
        policy_rank = svd.policy_rank,
        effective_rank = svd.rank(),
        "identified sample model"
    );

    Ok(SampleModel {
        a,
        b,
        c,
        rank: svd.rank(),
    })
}

/// Identify every sample independently and collect the index-aligned bank.
///
/// Samples are processed in parallel. Any failure aborts the whole call and no
/// bank is returned.
pub fn identify_all(
    trajectories: &Trajectories,
    center: bool,
    rank: RankPolicy,
) -> DmdcResult<ModelBank> {
    let models = trajectories
        .samples
        .par_iter()
        .enumerate()
        .map(|(i, signals)| identify_sample(SampleId::from_index(i), signals, center, rank))
        .collect::<DmdcResult<Vec<_>>>()?;

    let references = trajectories.samples.iter().map(CenteringRef::of).collect();
    ModelBank::new(models, references)
}

fn subtract_from_columns(m: &mut DMatrix<Real>, reference: &DVector<Real>) {
    for mut column in m.column_iter_mut() {
        column -= reference;
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// x[k+1] = a x[k] + b u[k], y = c x
    pub(crate) fn linear_signals(a: Real, b: Real, c: Real, x0: Real, u: &[Real]) -> SampleSignals {
        let mut x = vec![x0];
        for k in 0..u.len() - 1 {
            x.push(a * x[k] + b * u[k]);
        }
        let y: Vec<Real> = x.iter().map(|v| c * v).collect();
        SampleSignals {
            u: DMatrix::from_row_slice(1, u.len(), u),
            x: DMatrix::from_row_slice(1, x.len(), &x),
            y: DMatrix::from_row_slice(1, y.len(), &y),
        }
    }

    #[test]
    fn recovers_scalar_system() {
        let signals = linear_signals(0.9, 0.5, 2.0, 1.0, &[1.0, 0.3, -0.7, 0.2, 0.5]);
        let model =
            identify_sample(SampleId::from_index(0), &signals, false, RankPolicy::Full).unwrap();

        assert_eq!(model.a.shape(), (1, 1));
        assert_eq!(model.b.shape(), (1, 1));
        assert_eq!(model.c.shape(), (1, 1));
        assert_eq!(model.rank, 2);
        assert!((model.a[(0, 0)] - 0.9).abs() < 1e-10);
        assert!((model.b[(0, 0)] - 0.5).abs() < 1e-10);
        assert!((model.c[(0, 0)] - 2.0).abs() < 1e-10);
    }

    #[test]
    fn residual_small_for_two_state_system() {
        // Two states, one actuator, one output.
        let a = DMatrix::from_row_slice(2, 2, &[0.8, 0.1, -0.2, 0.7]);
        let b = DMatrix::from_row_slice(2, 1, &[0.5, 0.3]);
        let u_vals = [1.0, -0.4, 0.8, 0.1, -0.9, 0.6, 0.2, -0.3];
        let mut x = DMatrix::zeros(2, u_vals.len());
        x[(0, 0)] = 1.0;
        x[(1, 0)] = -0.5;
        for k in 0..u_vals.len() - 1 {
            let next = &a * x.column(k) + b.column(0) * u_vals[k];
            x.set_column(k + 1, &next);
        }
        let y = DMatrix::from_fn(1, u_vals.len(), |_, k| x[(0, k)] - x[(1, k)]);
        let signals = SampleSignals {
            u: DMatrix::from_row_slice(1, u_vals.len(), &u_vals),
            x: x.clone(),
            y,
        };

        let model =
            identify_sample(SampleId::from_index(0), &signals, false, RankPolicy::Full).unwrap();
        let pairs = u_vals.len() - 1;
        let x1 = x.columns(0, pairs);
        let x2 = x.columns(1, pairs);
        let u = signals.u.columns(0, pairs);
        let residual = x2 - (&model.a * x1 + &model.b * u);
        assert!(residual.abs().max() < 1e-9);

        let y_fit = &model.c * x1;
        assert!((y_fit - signals.y.columns(0, pairs)).abs().max() < 1e-9);
    }

    #[test]
    fn centered_constant_signals_are_singular() {
        let signals = SampleSignals {
            u: DMatrix::from_element(1, 5, 2.0),
            x: DMatrix::from_element(1, 5, 3.0),
            y: DMatrix::from_element(1, 5, 4.0),
        };
        let err = identify_sample(SampleId::from_index(4), &signals, true, RankPolicy::Full)
            .unwrap_err();
        match err {
            DmdcError::SingularR { sample, rank } => {
                assert_eq!(sample.index(), 4);
                assert_eq!(rank, 0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn fixed_rank_limits_effective_rank() {
        let signals = linear_signals(0.9, 0.5, 2.0, 1.0, &[1.0, 0.3, -0.7, 0.2, 0.5]);
        let model =
            identify_sample(SampleId::from_index(0), &signals, false, RankPolicy::Fixed(1)).unwrap();
        assert_eq!(model.rank, 1);
        assert_eq!(model.a.shape(), (1, 1));
    }
}
