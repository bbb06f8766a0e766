pub mod auto_save;
pub mod breaks;
pub mod error;
pub mod plan;
pub mod scale;
pub mod time_value;

pub use auto_save::{AutoSaveConfig, AutoSaveService};
pub use breaks::{Break, BreakPlanner, DEFAULT_BREAK_DURATION};
pub use error::{RespiteError, RespiteResult};
pub use plan::{SessionPlan, PLAN_FORMAT_VERSION};
pub use scale::{GridScale, PIXELS_PER_MINUTE};
pub use time_value::TimeValue;
