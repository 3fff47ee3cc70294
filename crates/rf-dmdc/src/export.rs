//! Block-format export of a trained model.

use crate::bank::{CenteringRef, SampleModel};
use crate::model::TrainedState;
use crate::settings::{DmdcSettings, VariableLayout};
use nalgebra::{DMatrix, DVector};
use rf_core::{Real, SampleId};
use rf_export::{
    ExportBlock, ExportDocument, ExportSelection, MatrixBlock, MatrixRealization, SampleTags,
    ScalarBlock, ScalarValue, VectorBlock, VectorRealization,
};
use std::collections::BTreeMap;

pub const EXPORT_TARGET: &str = "DMDcModel";

pub const DESCRIPTION: &str = "This document contains the main information of the DMDc ROM. \
    The method is explained in: Proctor, Joshua L., Steven L. Brunton, and J. Nathan Kutz. \
    \"Dynamic mode decomposition with control.\" \
    SIAM Journal on Applied Dynamical Systems 15, no. 1 (2016): 142-161.";

pub(crate) fn build_document(
    settings: &DmdcSettings,
    layout: &VariableLayout,
    trained: &TrainedState,
    selection: &ExportSelection,
) -> ExportDocument {
    let mut doc = ExportDocument::new(EXPORT_TARGET, DESCRIPTION);

    for block in selection.iter() {
        let value = match block {
            ExportBlock::RankSvd => ScalarValue::Rank {
                requested: settings.rank.code(),
                effective: trained.bank.effective_ranks(),
            },
            ExportBlock::Actuators => ScalarValue::Ids(layout.actuator_ids.clone()),
            ExportBlock::StateVariables => ScalarValue::Ids(layout.state_ids.clone()),
            ExportBlock::InitStateVariables => ScalarValue::Ids(layout.init_state_ids.clone()),
            ExportBlock::Outputs => ScalarValue::Ids(layout.output_ids.clone()),
            ExportBlock::TimeScale => ScalarValue::Numbers(trained.time_scale.times()),
            _ => continue,
        };
        doc.scalars.push(ScalarBlock { block, value });
    }

    let tags = |sample: SampleId| SampleTags {
        sample: sample.index(),
        parameters: trained
            .neighbors
            .as_ref()
            .map(|index| {
                layout
                    .parameter_ids
                    .iter()
                    .cloned()
                    .zip(index.point(sample))
                    .collect()
            })
            .unwrap_or_else(BTreeMap::new),
    };

    for block in selection.iter() {
        let wanted = match block {
            ExportBlock::UNorm | ExportBlock::XNorm | ExportBlock::YNorm => settings.center,
            ExportBlock::XLast => true,
            _ => false,
        };
        if !wanted {
            continue;
        }
        let realizations = trained
            .bank
            .iter()
            .map(|(sample, _, reference)| VectorRealization {
                tags: tags(sample),
                values: reference_vector(block, reference).as_slice().to_vec(),
            })
            .collect();
        doc.vectors.push(VectorBlock {
            block,
            realizations,
        });
    }

    for block in selection.iter() {
        let wanted = match block {
            ExportBlock::ATilde | ExportBlock::BTilde => true,
            ExportBlock::CTilde => !layout.output_ids.is_empty(),
            _ => false,
        };
        if !wanted {
            continue;
        }
        let realizations = trained
            .bank
            .iter()
            .map(|(sample, model, _)| {
                let matrix = model_matrix(block, model);
                MatrixRealization::real_valued(
                    tags(sample),
                    [matrix.nrows(), matrix.ncols()],
                    matrix.as_slice(),
                )
            })
            .collect();
        doc.matrices.push(MatrixBlock {
            block,
            realizations,
        });
    }

    doc
}

fn reference_vector(block: ExportBlock, reference: &CenteringRef) -> &DVector<Real> {
    match block {
        ExportBlock::UNorm => &reference.u0,
        ExportBlock::XNorm => &reference.x0,
        ExportBlock::YNorm => &reference.y0,
        _ => &reference.x_last,
    }
}

fn model_matrix(block: ExportBlock, model: &SampleModel) -> &DMatrix<Real> {
    match block {
        ExportBlock::ATilde => &model.a,
        ExportBlock::BTilde => &model.b,
        _ => &model.c,
    }
}
