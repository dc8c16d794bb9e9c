//! 领域模型模块

pub mod deploy;

pub use deploy::{DeployOutcome, LogOutput};
