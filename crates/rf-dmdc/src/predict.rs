//! Forward rollout of identified models.

use crate::bank::{ModelBank, SampleModel};
use crate::error::{DmdcError, DmdcResult};
use crate::extract::{check_columns, signal_block};
use crate::neighbors::NeighborIndex;
use crate::settings::{DecenterPolicy, VariableLayout};
use nalgebra::{DMatrix, DVector};
use rf_core::{Real, SampleId, SeriesBatch};

/// One evaluation request: an actuator trajectory and the state it starts from.
#[derive(Debug, Clone, PartialEq)]
pub struct RolloutRequest {
    /// Actuators, `m x T_req`, as supplied (not centered).
    pub actuators: DMatrix<Real>,
    /// Initial state, length `n`, as supplied.
    pub initial_state: DVector<Real>,
    /// Scheduling parameters when the model is parametric.
    pub parameters: Option<Vec<Real>>,
}

impl RolloutRequest {
    /// Slice requests out of a `requests x timesteps x features` array.
    ///
    /// Initial states and scheduling parameters are read at timestep 0.
    pub fn from_batch(layout: &VariableLayout, features: &SeriesBatch) -> DmdcResult<Vec<Self>> {
        check_columns(features, layout.feature_count, "evaluation feature")?;
        if features.samples() == 0 || features.timesteps() == 0 {
            return Err(DmdcError::shape("evaluation array has no requests or no timesteps"));
        }
        if layout.init_state_ids.len() != layout.state_ids.len() {
            return Err(DmdcError::config(format!(
                "evaluation needs one initStateVariable per state variable ({} given for {} states)",
                layout.init_state_ids.len(),
                layout.state_ids.len()
            )));
        }

        Ok((0..features.samples())
            .map(|r| RolloutRequest {
                actuators: signal_block(features, r, &layout.actuator_cols),
                initial_state: DVector::from_iterator(
                    layout.init_state_cols.len(),
                    layout.init_state_cols.iter().map(|&c| features.get(r, 0, c)),
                ),
                parameters: layout.is_parametric().then(|| {
                    layout
                        .parameter_cols
                        .iter()
                        .map(|&c| features.get(r, 0, c))
                        .collect()
                }),
            })
            .collect())
    }
}

/// Propagate `x[i+1] = A x[i] + B u[i]`, `y[i] = C x[i]` from `x0` over every column of `u`.
///
/// Returns `(x, y)` with one column per timestep.
pub fn rollout(
    model: &SampleModel,
    x0: &DVector<Real>,
    u: &DMatrix<Real>,
) -> (DMatrix<Real>, DMatrix<Real>) {
    let steps = u.ncols();
    let n = model.a.nrows();
    let p = model.c.nrows();
    let mut x = DMatrix::zeros(n, steps);
    let mut y = DMatrix::zeros(p, steps);
    if steps == 0 {
        return (x, y);
    }

    x.set_column(0, x0);
    y.set_column(0, &(&model.c * x0));
    for i in 0..steps - 1 {
        let next = &model.a * x.column(i) + &model.b * u.column(i);
        y.set_column(i + 1, &(&model.c * &next));
        x.set_column(i + 1, &next);
    }
    (x, y)
}

/// Rolled-out trajectories of one request.
#[derive(Debug, Clone, PartialEq)]
pub struct RolloutResult {
    /// Training sample whose model produced the trajectories.
    pub sample: SampleId,
    /// States, `n x T_req`.
    pub x: DMatrix<Real>,
    /// Outputs, `p x T_req`.
    pub y: DMatrix<Real>,
}

/// Run every request against its selected model.
///
/// Non-parametric models answer every request with sample 0. With centering,
/// the selected sample's `u0`/`x0` are subtracted before the rollout and the
/// `x0`/`y0` references chosen by `decenter` are added back afterwards.
pub fn predict_batch(
    bank: &ModelBank,
    neighbors: Option<&NeighborIndex>,
    requests: &[RolloutRequest],
    center: bool,
    decenter: DecenterPolicy,
) -> DmdcResult<Vec<RolloutResult>> {
    let mut results = Vec::with_capacity(requests.len());

    for request in requests {
        let sample = match (neighbors, &request.parameters) {
            (Some(index), Some(params)) => index.nearest(params)?,
            (Some(_), None) => {
                return Err(DmdcError::shape(
                    "parametric model requires scheduling parameters in every request",
                ));
            }
            (None, _) => SampleId::from_index(0),
        };
        let (model, reference) = bank.get(sample).ok_or_else(|| {
            DmdcError::shape(format!("selected sample {sample} is not in the model bank"))
        })?;

        if request.actuators.nrows() != model.b.ncols()
            || request.initial_state.len() != model.a.nrows()
        {
            return Err(DmdcError::shape(format!(
                "request has {} actuators and {} initial states, model expects {} and {}",
                request.actuators.nrows(),
                request.initial_state.len(),
                model.b.ncols(),
                model.a.nrows()
            )));
        }

        let (x, y) = if center {
            let mut u = request.actuators.clone();
            for mut column in u.column_iter_mut() {
                column -= &reference.u0;
            }
            let x0 = &request.initial_state - &reference.x0;
            rollout(model, &x0, &u)
        } else {
            rollout(model, &request.initial_state, &request.actuators)
        };

        results.push(RolloutResult { sample, x, y });
    }

    if center && let Some(last) = results.last().map(|r| r.sample) {
        for result in &mut results {
            let source = match decenter {
                DecenterPolicy::LastSelected => last,
                DecenterPolicy::PerRequest => result.sample,
            };
            if let Some((_, reference)) = bank.get(source) {
                for mut column in result.x.column_iter_mut() {
                    column += &reference.x0;
                }
                for mut column in result.y.column_iter_mut() {
                    column += &reference.y0;
                }
            }
        }
    }

    tracing::debug!(requests = results.len(), center, "rollout batch complete");
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::CenteringRef;
    use crate::extract::SampleSignals;

    fn scalar_model(a: Real, b: Real, c: Real) -> SampleModel {
        SampleModel {
            a: DMatrix::from_element(1, 1, a),
            b: DMatrix::from_element(1, 1, b),
            c: DMatrix::from_element(1, 1, c),
            rank: 2,
        }
    }

    fn reference(u0: Real, x0: Real, y0: Real) -> CenteringRef {
        CenteringRef::of(&SampleSignals {
            u: DMatrix::from_element(1, 2, u0),
            x: DMatrix::from_element(1, 2, x0),
            y: DMatrix::from_element(1, 2, y0),
        })
    }

    fn request(u: &[Real], x0: Real, params: Option<Vec<Real>>) -> RolloutRequest {
        RolloutRequest {
            actuators: DMatrix::from_row_slice(1, u.len(), u),
            initial_state: DVector::from_element(1, x0),
            parameters: params,
        }
    }

    #[test]
    fn rollout_follows_recurrence() {
        let model = scalar_model(0.5, 1.0, 3.0);
        let u = DMatrix::from_row_slice(1, 3, &[1.0, 2.0, 0.0]);
        let (x, y) = rollout(&model, &DVector::from_element(1, 2.0), &u);
        // x: 2, 0.5*2+1=2, 0.5*2+2=3
        assert_eq!(x.as_slice(), &[2.0, 2.0, 3.0]);
        assert_eq!(y.as_slice(), &[6.0, 6.0, 9.0]);
    }

    #[test]
    fn rollout_is_deterministic() {
        let model = scalar_model(0.93, 0.21, 1.7);
        let u = DMatrix::from_row_slice(1, 6, &[0.1, 0.7, -0.3, 0.9, 0.4, -0.8]);
        let x0 = DVector::from_element(1, 0.37);
        let first = rollout(&model, &x0, &u);
        let second = rollout(&model, &x0, &u);
        assert_eq!(first, second);
    }

    #[test]
    fn last_selected_decentering_uses_final_request_reference() {
        let bank = ModelBank::new(
            vec![scalar_model(1.0, 0.0, 1.0), scalar_model(1.0, 0.0, 1.0)],
            vec![reference(0.0, 1.0, 10.0), reference(0.0, 2.0, 20.0)],
        )
        .unwrap();
        let index = NeighborIndex::build(DMatrix::from_row_slice(2, 1, &[0.0, 1.0])).unwrap();
        let requests = vec![
            request(&[0.0, 0.0], 1.0, Some(vec![0.0])),
            request(&[0.0, 0.0], 2.0, Some(vec![1.0])),
        ];

        let last = predict_batch(
            &bank,
            Some(&index),
            &requests,
            true,
            DecenterPolicy::LastSelected,
        )
        .unwrap();
        assert_eq!(last[0].sample.index(), 0);
        assert_eq!(last[1].sample.index(), 1);
        // Request 0 is centered with sample 0 (x0=1 -> 0) but de-centered with sample 1.
        assert_eq!(last[0].x.as_slice(), &[2.0, 2.0]);
        assert_eq!(last[0].y.as_slice(), &[20.0, 20.0]);

        let per = predict_batch(
            &bank,
            Some(&index),
            &requests,
            true,
            DecenterPolicy::PerRequest,
        )
        .unwrap();
        assert_eq!(per[0].x.as_slice(), &[1.0, 1.0]);
        assert_eq!(per[0].y.as_slice(), &[10.0, 10.0]);
        assert_eq!(per[1].x, last[1].x);
    }

    #[test]
    fn non_parametric_uses_sample_zero() {
        let bank = ModelBank::new(
            vec![scalar_model(0.0, 1.0, 1.0), scalar_model(0.0, 2.0, 1.0)],
            vec![reference(0.0, 0.0, 0.0), reference(0.0, 0.0, 0.0)],
        )
        .unwrap();
        let results = predict_batch(
            &bank,
            None,
            &[request(&[1.0, 1.0], 0.0, None), request(&[3.0, 3.0], 0.0, None)],
            false,
            DecenterPolicy::default(),
        )
        .unwrap();
        assert!(results.iter().all(|r| r.sample.index() == 0));
        assert_eq!(results[1].x.as_slice(), &[0.0, 3.0]);
    }

    #[test]
    fn parametric_request_without_parameters_rejected() {
        let bank = ModelBank::new(
            vec![scalar_model(1.0, 1.0, 1.0)],
            vec![reference(0.0, 0.0, 0.0)],
        )
        .unwrap();
        let index = NeighborIndex::build(DMatrix::from_element(1, 1, 0.0)).unwrap();
        let err = predict_batch(
            &bank,
            Some(&index),
            &[request(&[1.0], 0.0, None)],
            false,
            DecenterPolicy::default(),
        )
        .unwrap_err();
        assert!(matches!(err, DmdcError::Shape { .. }));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn repeated_rollouts_are_bit_identical(
            a in -1.0_f64..1.0,
            b in -2.0_f64..2.0,
            x0 in -5.0_f64..5.0,
            u in prop::collection::vec(-3.0_f64..3.0, 1..20),
        ) {
            let model = SampleModel {
                a: DMatrix::from_element(1, 1, a),
                b: DMatrix::from_element(1, 1, b),
                c: DMatrix::from_element(1, 1, 1.0),
                rank: 2,
            };
            let u = DMatrix::from_row_slice(1, u.len(), &u);
            let x0 = DVector::from_element(1, x0);
            let (x1, y1) = rollout(&model, &x0, &u);
            let (x2, y2) = rollout(&model, &x0, &u);
            prop_assert_eq!(x1.as_slice(), x2.as_slice());
            prop_assert_eq!(y1.as_slice(), y2.as_slice());
        }
    }
}
