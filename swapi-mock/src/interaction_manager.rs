use crate::{data::InteractionData, error::BoxedError};
use std::fmt::Debug;

/// Storage for the interactions a session plays back or records.
pub trait InteractionManager: Debug {
    fn load_interactions(&self) -> Result<Vec<InteractionData>, BoxedError>;
    fn save_interactions(&self, interactions: &[InteractionData]) -> Result<(), BoxedError>;
    /// Fails when `interactions` differ from what is currently stored.
    fn check_data_unchanged(&self, interactions: &[InteractionData]) -> Result<(), BoxedError>;
}
