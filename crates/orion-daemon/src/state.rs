// crates/orion-daemon/src/state.rs
//
// Service lifecycle state machine.
//
// Valid transitions:
//   Initializing -> Ready
//   Any state -> ShuttingDown

use std::fmt;

/// Lifecycle states of the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceState {
    /// Loading configuration and building the registry.
    Initializing,
    /// Serving assessment requests.
    Ready,
    ShuttingDown,
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceState::Initializing => write!(f, "Initializing"),
            ServiceState::Ready => write!(f, "Ready"),
            ServiceState::ShuttingDown => write!(f, "ShuttingDown"),
        }
    }
}

pub struct ServiceStateMachine {
    pub current: ServiceState,
}

impl ServiceStateMachine {
    pub fn new() -> Self {
        Self {
            current: ServiceState::Initializing,
        }
    }

    /// Attempt to transition to a new state.
    ///
    /// Returns an error if the transition is not valid.
    pub fn transition(&mut self, new_state: ServiceState) -> Result<(), String> {
        let valid = matches!(
            (&self.current, &new_state),
            (_, ServiceState::ShuttingDown) | (ServiceState::Initializing, ServiceState::Ready)
        );

        if !valid {
            return Err(format!(
                "Invalid state transition: {} -> {}",
                self.current, new_state
            ));
        }

        tracing::info!("State transition: {} -> {}", self.current, new_state);
        self.current = new_state;
        Ok(())
    }
}

impl Default for ServiceStateMachine {
    fn default() -> Self {
        Self::new()
    }
}
