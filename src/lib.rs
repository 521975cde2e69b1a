pub mod bindings;
pub mod brm;
pub mod error;
pub mod estimate;
pub mod fisher;
pub mod grm;
pub mod select;
pub mod types;
pub mod uniroot;

pub use error::IrtError;
pub use estimate::{wle_est, wle_est_with_diagnostics, EstResult};
pub use fisher::FiResult;
pub use select::sel_prm;
pub use types::{FiKind, LderType, ModelType};
pub use uniroot::{uniroot_lder1, UnirootResult};
