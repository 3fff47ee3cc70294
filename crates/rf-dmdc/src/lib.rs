//! Dynamic Mode Decomposition with control (DMDc) surrogate.
//!
//! Learns one discrete-time linear state-space model per training sample,
//!
//! ```text
//! x[k+1] = A x[k] + B u[k]
//! y[k+1] = C x[k+1]
//! ```
//!
//! from snapshot trajectories, and rolls the identified model forward for new
//! actuator signals. When scheduling parameters are present, the model of the
//! nearest training sample answers each request.
//!
//! Ref. Proctor, Brunton, Kutz, "Dynamic mode decomposition with control",
//! SIAM J. Appl. Dyn. Syst. 15(1), 142-161 (2016).

pub mod bank;
pub mod error;
pub mod evaluation;
pub mod export;
pub mod extract;
pub mod identify;
pub mod model;
pub mod neighbors;
pub mod predict;
pub mod settings;

pub use bank::{CenteringRef, ModelBank, SampleModel};
pub use error::{DmdcError, DmdcResult};
pub use evaluation::{Evaluation, Series};
pub use extract::{SampleSignals, TimeScale, Trajectories};
pub use identify::{identify_all, identify_sample};
pub use model::{Dmdc, TrainedState};
pub use neighbors::NeighborIndex;
pub use predict::{RolloutRequest, RolloutResult, predict_batch, rollout};
pub use settings::{DecenterPolicy, DmdcSettings, VariableLayout};
