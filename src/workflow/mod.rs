//! Workflow State Machine
//!
//! The per-query pipeline as an explicit state machine: every query starts in
//! `Routing`, moves to exactly one handler state based on the routing label,
//! and terminates in `Done`. Transitions are pure; the engine drives them and
//! performs the side effects each state implies.

use crate::types::RouteLabel;

/// Position of a query in the triage pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    /// Awaiting classification
    Routing,
    /// Dispatched to the IT specialist
    ItSpecialist,
    /// Dispatched to the finance specialist
    FinanceSpecialist,
    /// Dispatched to the fixed irrelevant-query handler
    IrrelevantHandler,
    /// Terminal; a response exists
    Done,
}

impl WorkflowState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }
}

/// The single dispatch transition: a routing label determines the one handler
/// state that follows `Routing`.
pub fn next_state(label: RouteLabel) -> WorkflowState {
    match label {
        RouteLabel::It => WorkflowState::ItSpecialist,
        RouteLabel::Finance => WorkflowState::FinanceSpecialist,
        RouteLabel::Irrelevant => WorkflowState::IrrelevantHandler,
    }
}
