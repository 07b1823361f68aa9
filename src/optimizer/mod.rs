pub mod anneal;
pub mod initialization;
pub mod mutation;
pub mod runner;

pub use self::anneal::AnnealingSchedule;
pub use self::initialization::{assign_characters, Placement};
pub use self::runner::{
    CancelToken, OptimizationOptions, OptimizationResult, Optimizer, Progress, ProgressCallback,
    Silent,
};
