//! Fixed enumeration of exportable blocks.

use crate::{ExportError, ExportResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExportBlock {
    #[serde(rename = "rankSVD")]
    RankSvd,
    #[serde(rename = "actuators")]
    Actuators,
    #[serde(rename = "stateVariables")]
    StateVariables,
    #[serde(rename = "initStateVariables")]
    InitStateVariables,
    #[serde(rename = "outputs")]
    Outputs,
    #[serde(rename = "dmdTimeScale")]
    TimeScale,
    #[serde(rename = "UNorm")]
    UNorm,
    #[serde(rename = "XNorm")]
    XNorm,
    #[serde(rename = "YNorm")]
    YNorm,
    #[serde(rename = "XLast")]
    XLast,
    #[serde(rename = "Atilde")]
    ATilde,
    #[serde(rename = "Btilde")]
    BTilde,
    #[serde(rename = "Ctilde")]
    CTilde,
}

impl ExportBlock {
    pub const ALL: [ExportBlock; 13] = [
        ExportBlock::RankSvd,
        ExportBlock::Actuators,
        ExportBlock::StateVariables,
        ExportBlock::InitStateVariables,
        ExportBlock::Outputs,
        ExportBlock::TimeScale,
        ExportBlock::UNorm,
        ExportBlock::XNorm,
        ExportBlock::YNorm,
        ExportBlock::XLast,
        ExportBlock::ATilde,
        ExportBlock::BTilde,
        ExportBlock::CTilde,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ExportBlock::RankSvd => "rankSVD",
            ExportBlock::Actuators => "actuators",
            ExportBlock::StateVariables => "stateVariables",
            ExportBlock::InitStateVariables => "initStateVariables",
            ExportBlock::Outputs => "outputs",
            ExportBlock::TimeScale => "dmdTimeScale",
            ExportBlock::UNorm => "UNorm",
            ExportBlock::XNorm => "XNorm",
            ExportBlock::YNorm => "YNorm",
            ExportBlock::XLast => "XLast",
            ExportBlock::ATilde => "Atilde",
            ExportBlock::BTilde => "Btilde",
            ExportBlock::CTilde => "Ctilde",
        }
    }
}

impl fmt::Display for ExportBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExportBlock {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExportBlock::ALL
            .iter()
            .copied()
            .find(|b| b.name() == s)
            .ok_or_else(|| ExportError::UnknownBlocks {
                names: vec![s.to_string()],
            })
    }
}

/// Validated set of blocks to export, kept in canonical order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSelection {
    blocks: Vec<ExportBlock>,
}

impl Default for ExportSelection {
    fn default() -> Self {
        Self::all()
    }
}

impl ExportSelection {
    pub fn all() -> Self {
        Self {
            blocks: ExportBlock::ALL.to_vec(),
        }
    }

    /// Resolve requested and skipped block names.
    ///
    /// `what = None` selects every block. Every name in `what` and `skip` must be
    /// recognized; all unknown names are reported together.
    pub fn from_names<S: AsRef<str>>(what: Option<&[S]>, skip: &[S]) -> ExportResult<Self> {
        let mut unknown = Vec::new();
        let mut parse_all = |names: &[S]| -> Vec<ExportBlock> {
            names
                .iter()
                .filter_map(|n| match n.as_ref().parse::<ExportBlock>() {
                    Ok(block) => Some(block),
                    Err(_) => {
                        unknown.push(n.as_ref().to_string());
                        None
                    }
                })
                .collect()
        };

        let requested = what.map(&mut parse_all);
        let skipped = parse_all(skip);

        if !unknown.is_empty() {
            return Err(ExportError::UnknownBlocks { names: unknown });
        }

        let blocks = ExportBlock::ALL
            .iter()
            .copied()
            .filter(|b| requested.as_ref().is_none_or(|r| r.contains(b)))
            .filter(|b| !skipped.contains(b))
            .collect();
        Ok(Self { blocks })
    }

    pub fn contains(&self, block: ExportBlock) -> bool {
        self.blocks.contains(&block)
    }

    pub fn iter(&self) -> impl Iterator<Item = ExportBlock> + '_ {
        self.blocks.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
