//! Deployment pipeline.
//!
//! One-shot mirror of a local build tree onto a remote store: clear the
//! remote target directory, then re-upload everything in enumeration order.

pub mod engine;
pub mod enumerate;
pub mod error;
pub mod exclude;
pub mod path_utils;
pub mod timing;

pub use engine::{DeployEngine, DeployPhase};
pub use enumerate::LocalTree;
pub use error::DeployError;
pub use exclude::ExcludePatterns;
pub use timing::{format_mission_time, MissionTiming};
