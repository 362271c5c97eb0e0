//! Result wrapper types for displaying operation outcomes.
//!
//! Create and update operations return the canonical persisted resource;
//! these wrappers prepend a one-line confirmation before the resource's own
//! rendering.

use std::fmt;

use crate::models::{Order, StageKey, Warehouse};

/// Wrapper type for displaying the result of create operations.
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    /// Create a new CreateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<Order> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created order with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<Warehouse> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Registered warehouse with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of a stage transition or update.
///
/// Always renders from the canonical order re-read inside the transaction,
/// never from the submitted payload.
pub struct UpdateResult<T> {
    pub resource: T,
    pub stage: Option<StageKey>,
}

impl<T> UpdateResult<T> {
    /// Create a new UpdateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            stage: None,
        }
    }

    /// Create an UpdateResult naming the stage that was acted on.
    pub fn for_stage(resource: T, stage: StageKey) -> Self {
        Self {
            resource,
            stage: Some(stage),
        }
    }
}

impl fmt::Display for UpdateResult<Order> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.stage {
            Some(stage) => writeln!(
                f,
                "Updated order {} at stage '{}'",
                self.resource.id,
                stage.label()
            )?,
            None => writeln!(f, "Updated order {}", self.resource.id)?,
        }
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}
