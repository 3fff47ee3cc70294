//! DMDc model lifecycle: configure, train once, then evaluate and export.

use crate::bank::ModelBank;
use crate::error::{DmdcError, DmdcResult};
use crate::evaluation::Evaluation;
use crate::export::build_document;
use crate::extract::{TimeScale, Trajectories};
use crate::identify::identify_all;
use crate::neighbors::NeighborIndex;
use crate::predict::{RolloutRequest, predict_batch};
use crate::settings::{DmdcSettings, VariableLayout};
use nalgebra::DMatrix;
use rf_core::timing::Timer;
use rf_core::{Real, SeriesBatch};
use rf_export::{ExportDocument, ExportSelection};

/// Everything produced by a successful training call. Read-only afterwards.
#[derive(Debug, Clone)]
pub struct TrainedState {
    pub bank: ModelBank,
    pub neighbors: Option<NeighborIndex>,
    /// Time axis of training sample 0.
    pub pivot: Vec<Real>,
    pub time_scale: TimeScale,
}

/// A DMDc surrogate.
///
/// Each instance owns its settings, model bank, centering references and
/// neighbor index; nothing is shared between instances.
#[derive(Debug, Clone)]
pub struct Dmdc {
    settings: DmdcSettings,
    layout: VariableLayout,
    trained: Option<TrainedState>,
}

impl Dmdc {
    /// Validate the settings. Id contract violations fail here.
    pub fn new(settings: DmdcSettings) -> DmdcResult<Self> {
        let layout = settings.layout()?;
        Ok(Self {
            settings,
            layout,
            trained: None,
        })
    }

    pub fn settings(&self) -> &DmdcSettings {
        &self.settings
    }

    pub fn layout(&self) -> &VariableLayout {
        &self.layout
    }

    pub fn is_trained(&self) -> bool {
        self.trained.is_some()
    }

    pub fn trained(&self) -> DmdcResult<&TrainedState> {
        self.trained.as_ref().ok_or(DmdcError::NotTrained)
    }

    /// Identify one model per training sample.
    ///
    /// `features` is `samples x timesteps x features`, `targets` is
    /// `samples x timesteps x targets`. Any previous training is discarded first;
    /// on failure the model is left untrained.
    pub fn train(&mut self, features: &SeriesBatch, targets: &SeriesBatch) -> DmdcResult<()> {
        self.trained = None;
        let timer = Timer::start("dmdc train");

        let trajectories = Trajectories::extract(&self.layout, features, targets)?;
        let bank = identify_all(&trajectories, self.settings.center, self.settings.rank)?;

        tracing::info!(
            samples = bank.len(),
            timesteps = trajectories.pivot.len(),
            parametric = trajectories.neighbors.is_some(),
            center = self.settings.center,
            elapsed_s = timer.stop(),
            "DMDc training complete"
        );

        let Trajectories {
            pivot,
            time_scale,
            neighbors,
            ..
        } = trajectories;
        self.trained = Some(TrainedState {
            bank,
            neighbors,
            pivot,
            time_scale,
        });
        Ok(())
    }

    /// Roll the identified models forward for each request in `features`
    /// (`requests x timesteps x features`).
    pub fn evaluate(&self, features: &SeriesBatch) -> DmdcResult<Evaluation> {
        let trained = self.trained()?;
        let timer = Timer::start("dmdc evaluate");

        let requests = RolloutRequest::from_batch(&self.layout, features)?;
        let results = predict_batch(
            &trained.bank,
            trained.neighbors.as_ref(),
            &requests,
            self.settings.center,
            self.settings.decenter,
        )?;

        let mut evaluation = Evaluation::default();
        let actuators: Vec<&DMatrix<Real>> = requests.iter().map(|r| &r.actuators).collect();
        let states: Vec<&DMatrix<Real>> = results.iter().map(|r| &r.x).collect();
        let outputs: Vec<&DMatrix<Real>> = results.iter().map(|r| &r.y).collect();

        for (row, id) in self.layout.actuator_ids.iter().enumerate() {
            evaluation.insert_matrix_rows(id, &actuators, row);
        }
        for (row, id) in self.layout.state_ids.iter().enumerate() {
            evaluation.insert_matrix_rows(id, &states, row);
        }
        for (row, id) in self.layout.output_ids.iter().enumerate() {
            evaluation.insert_matrix_rows(id, &outputs, row);
        }
        evaluation.insert_rows(
            &self.layout.pivot_id,
            vec![trained.pivot.clone(); requests.len()],
        );

        tracing::info!(
            requests = requests.len(),
            timesteps = features.timesteps(),
            elapsed_s = timer.stop(),
            "DMDc evaluation complete"
        );
        Ok(evaluation)
    }

    /// Build the export document for an already validated selection.
    pub fn export(&self, selection: &ExportSelection) -> DmdcResult<ExportDocument> {
        let trained = self.trained()?;
        Ok(build_document(&self.settings, &self.layout, trained, selection))
    }

    /// Validate block names, then export. Unknown names are a configuration error.
    pub fn export_named<S: AsRef<str>>(
        &self,
        what: Option<&[S]>,
        skip: &[S],
    ) -> DmdcResult<ExportDocument> {
        let selection = ExportSelection::from_names(what, skip)
            .map_err(|e| DmdcError::config(e.to_string()))?;
        self.export(&selection)
    }
}
