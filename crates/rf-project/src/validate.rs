//! ROM definition validation logic.

use crate::schema::RomDef;
use std::collections::HashSet;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_rom(rom: &RomDef) -> Result<(), ValidationError> {
    if rom.version > crate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: rom.version,
        });
    }

    let feature_ids = unique_ids(&rom.features, "features")?;
    let target_ids = unique_ids(&rom.targets, "targets")?;

    require_non_empty(&rom.actuators, "actuators")?;
    require_non_empty(&rom.state_variables, "state_variables")?;

    unique_ids(&rom.actuators, "actuators")?;
    unique_ids(&rom.state_variables, "state_variables")?;
    unique_ids(&rom.init_state_variables, "init_state_variables")?;

    if !target_ids.contains(&rom.pivot) {
        return Err(ValidationError::MissingReference {
            id: rom.pivot.clone(),
            context: "pivot (targets)".to_string(),
        });
    }

    require_members(&rom.actuators, &feature_ids, "actuators (features)")?;
    require_members(&rom.state_variables, &target_ids, "state_variables (targets)")?;
    require_members(
        &rom.init_state_variables,
        &feature_ids,
        "init_state_variables (features)",
    )?;

    if rom.state_variables.contains(&rom.pivot) {
        return Err(ValidationError::InvalidValue {
            field: "state_variables".to_string(),
            value: rom.pivot.clone(),
            reason: "the pivot cannot be a state variable".to_string(),
        });
    }

    if let Some(rank) = rom.rank_svd {
        validate_rank(rank)?;
    }

    Ok(())
}

/// Check that data arrays carry one column per declared feature/target id.
pub fn validate_data_columns(
    rom: &RomDef,
    feature_columns: usize,
    target_columns: Option<usize>,
) -> Result<(), ValidationError> {
    if feature_columns != rom.features.len() {
        return Err(ValidationError::InvalidValue {
            field: "features columns".to_string(),
            value: feature_columns.to_string(),
            reason: format!("ROM '{}' declares {} features", rom.name, rom.features.len()),
        });
    }
    if let Some(columns) = target_columns
        && columns != rom.targets.len()
    {
        return Err(ValidationError::InvalidValue {
            field: "targets columns".to_string(),
            value: columns.to_string(),
            reason: format!("ROM '{}' declares {} targets", rom.name, rom.targets.len()),
        });
    }
    Ok(())
}

fn validate_rank(rank: f64) -> Result<(), ValidationError> {
    let ok = rank == -1.0
        || rank == 0.0
        || (rank > 0.0 && rank < 1.0)
        || (rank >= 1.0 && rank.is_finite() && rank.fract() == 0.0);
    if ok {
        Ok(())
    } else {
        Err(ValidationError::InvalidValue {
            field: "rank_svd".to_string(),
            value: rank.to_string(),
            reason: "expected -1, 0, a fraction in (0, 1) or an integer >= 1".to_string(),
        })
    }
}

fn unique_ids<'a>(
    ids: &'a [String],
    context: &str,
) -> Result<HashSet<&'a String>, ValidationError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ValidationError::DuplicateId {
                id: id.clone(),
                context: context.to_string(),
            });
        }
    }
    Ok(seen)
}

fn require_non_empty(ids: &[String], field: &str) -> Result<(), ValidationError> {
    if ids.is_empty() {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: "[]".to_string(),
            reason: "at least one id is required".to_string(),
        });
    }
    Ok(())
}

fn require_members(
    ids: &[String],
    within: &HashSet<&String>,
    context: &str,
) -> Result<(), ValidationError> {
    match ids.iter().find(|id| !within.contains(id)) {
        Some(id) => Err(ValidationError::MissingReference {
            id: id.clone(),
            context: context.to_string(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::DecenterDef;

    fn rom() -> RomDef {
        RomDef {
            version: 1,
            name: "heater".to_string(),
            features: vec!["u".into(), "x_init".into(), "power".into()],
            targets: vec!["x".into(), "y".into(), "time".into()],
            pivot: "time".to_string(),
            actuators: vec!["u".into()],
            state_variables: vec!["x".into()],
            init_state_variables: vec!["x_init".into()],
            subtract_norm_uxy: false,
            rank_svd: None,
            decenter: DecenterDef::default(),
        }
    }

    #[test]
    fn accepts_well_formed_definition() {
        assert!(validate_rom(&rom()).is_ok());
    }

    #[test]
    fn rejects_duplicate_feature() {
        let mut r = rom();
        r.features.push("u".into());
        assert!(matches!(
            validate_rom(&r),
            Err(ValidationError::DuplicateId { .. })
        ));
    }

    #[test]
    fn rejects_state_outside_targets() {
        let mut r = rom();
        r.state_variables = vec!["z".into()];
        let err = validate_rom(&r).unwrap_err();
        assert!(matches!(err, ValidationError::MissingReference { ref id, .. } if id == "z"));
    }

    #[test]
    fn rejects_missing_pivot() {
        let mut r = rom();
        r.pivot = "clock".into();
        assert!(matches!(
            validate_rom(&r),
            Err(ValidationError::MissingReference { .. })
        ));
    }

    #[test]
    fn rejects_empty_actuators() {
        let mut r = rom();
        r.actuators.clear();
        assert!(matches!(
            validate_rom(&r),
            Err(ValidationError::InvalidValue { .. })
        ));
    }

    #[test]
    fn rank_codes() {
        for ok in [-1.0, 0.0, 0.9, 1.0, 4.0] {
            assert!(validate_rank(ok).is_ok(), "{ok}");
        }
        for bad in [-2.0, 1.5, f64::NAN, f64::INFINITY] {
            assert!(validate_rank(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn unsupported_version() {
        let mut r = rom();
        r.version = crate::LATEST_VERSION + 1;
        assert!(matches!(
            validate_rom(&r),
            Err(ValidationError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn data_columns_checked() {
        let r = rom();
        assert!(validate_data_columns(&r, 3, Some(3)).is_ok());
        assert!(validate_data_columns(&r, 3, None).is_ok());
        assert!(validate_data_columns(&r, 2, Some(3)).is_err());
        assert!(validate_data_columns(&r, 3, Some(4)).is_err());
    }
}
