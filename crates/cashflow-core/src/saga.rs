//! Multi-step store operations with compensating actions.
//!
//! The data store offers no transactions spanning several calls, so an
//! operation such as "create account, then its opening movement" runs as a
//! saga: each completed step may register an inverse, and when a later step
//! fails the inverses of the completed steps run in reverse order.

use tracing::{debug, warn};

use crate::error::{CollaboratorError, CoreError};

type Action<'a, C> = Box<dyn FnOnce(&mut C) -> Result<(), CollaboratorError> + 'a>;
type Compensation<'a, C> = Box<dyn FnOnce(&C) -> Result<(), CollaboratorError> + 'a>;

struct Step<'a, C> {
    name: &'static str,
    action: Action<'a, C>,
    compensation: Option<Compensation<'a, C>>,
}

/// Ordered forward steps sharing a context `C`.
pub struct Saga<'a, C> {
    steps: Vec<Step<'a, C>>,
}

/// The step that failed, its error, and any compensation that failed too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SagaFailure {
    pub step: &'static str,
    pub error: CollaboratorError,
    pub compensation_errors: Vec<(&'static str, CollaboratorError)>,
}

impl<'a, C> Default for Saga<'a, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, C> Saga<'a, C> {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Adds a step with nothing to undo.
    pub fn step(
        mut self,
        name: &'static str,
        action: impl FnOnce(&mut C) -> Result<(), CollaboratorError> + 'a,
    ) -> Self {
        self.steps.push(Step {
            name,
            action: Box::new(action),
            compensation: None,
        });
        self
    }

    /// Adds a step whose effect `compensation` reverts if a later step fails.
    pub fn step_with_compensation(
        mut self,
        name: &'static str,
        action: impl FnOnce(&mut C) -> Result<(), CollaboratorError> + 'a,
        compensation: impl FnOnce(&C) -> Result<(), CollaboratorError> + 'a,
    ) -> Self {
        self.steps.push(Step {
            name,
            action: Box::new(action),
            compensation: Some(Box::new(compensation)),
        });
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Runs the steps in order, stopping at the first failure and unwinding.
    pub fn run(self, context: &mut C) -> Result<(), SagaFailure> {
        let mut completed: Vec<(&'static str, Option<Compensation<'a, C>>)> = Vec::new();
        for step in self.steps {
            debug!(step = step.name, "running saga step");
            match (step.action)(context) {
                Ok(()) => completed.push((step.name, step.compensation)),
                Err(error) => {
                    warn!(step = step.name, %error, "saga step failed; compensating");
                    let compensation_errors = unwind(completed, context);
                    return Err(SagaFailure {
                        step: step.name,
                        error,
                        compensation_errors,
                    });
                }
            }
        }
        Ok(())
    }
}

fn unwind<C>(
    completed: Vec<(&'static str, Option<Compensation<'_, C>>)>,
    context: &C,
) -> Vec<(&'static str, CollaboratorError)> {
    let mut failures = Vec::new();
    for (name, compensation) in completed.into_iter().rev() {
        let Some(undo) = compensation else {
            continue;
        };
        if let Err(error) = undo(context) {
            warn!(step = name, %error, "compensation failed");
            failures.push((name, error));
        }
    }
    failures
}

impl From<SagaFailure> for CoreError {
    fn from(failure: SagaFailure) -> Self {
        if failure.compensation_errors.is_empty() {
            return CoreError::Collaborator(failure.error);
        }
        CoreError::Compensation {
            original: failure.error,
            cleanup: failure
                .compensation_errors
                .into_iter()
                .map(|(_, error)| error)
                .collect(),
        }
    }
}
