//! Decision checkpoint state machine.
//!
//! ```text
//! Idle --advance_to(year)--> Open(checkpoint) --choose/accept/skip--> Resolved
//!   ^                                                                    |
//!   +------------------------- advance_to(year) ------------------------+
//! ```
//!
//! Checkpoints open in calendar order once simulation time reaches them.
//! The history only ever grows by appending, or is cleared by [`reset`].
//!
//! [`reset`]: DecisionSession::reset

use serde::{Deserialize, Serialize};

use crate::catalog::{InterventionId, applicable_interventions};
use crate::error::SessionError;
use crate::model::{CHECKPOINT_YEARS, DecisionRecord, SimulationRequest, checkpoint_phase_index};
use crate::recommend::{DecisionSnapshot, Rule, recommend_with_rule};

/// How the recommender's snapshot is produced at a checkpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotMode {
    /// Medians of the macro indicators simulated under the current history
    #[default]
    Aggregated,
    /// Every indicator fixed at 100
    Placeholder,
}

/// An open decision point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub year: i32,
    pub phase_index: usize,
    pub applicable: Vec<InterventionId>,
    pub recommended: InterventionId,
    pub rule: Rule,
    pub snapshot: DecisionSnapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    Decided(DecisionRecord),
    Skipped { year: i32 },
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckpointState {
    #[default]
    Idle,
    Open(Checkpoint),
    Resolved(Resolution),
}

/// One interactive session: a request, its decision history and the
/// checkpoint cursor.
#[derive(Debug, Clone)]
pub struct DecisionSession {
    request: SimulationRequest,
    snapshot_mode: SnapshotMode,
    history: Vec<DecisionRecord>,
    next_checkpoint: usize,
    state: CheckpointState,
}

impl DecisionSession {
    pub fn new(request: SimulationRequest, snapshot_mode: SnapshotMode) -> Self {
        Self {
            request,
            snapshot_mode,
            history: Vec::new(),
            next_checkpoint: 0,
            state: CheckpointState::Idle,
        }
    }

    pub fn request(&self) -> &SimulationRequest {
        &self.request
    }

    pub fn state(&self) -> &CheckpointState {
        &self.state
    }

    pub fn history(&self) -> &[DecisionRecord] {
        &self.history
    }

    pub fn open_checkpoint(&self) -> Option<&Checkpoint> {
        match &self.state {
            CheckpointState::Open(cp) => Some(cp),
            _ => None,
        }
    }

    /// Year of the next checkpoint not yet passed
    pub fn next_checkpoint_year(&self) -> Option<i32> {
        CHECKPOINT_YEARS.get(self.next_checkpoint).copied()
    }

    /// Advance simulation time to `year`, opening the earliest pending
    /// checkpoint at or before it.
    pub fn advance_to(&mut self, year: i32) -> Result<&CheckpointState, SessionError> {
        if let CheckpointState::Open(cp) = &self.state {
            return Err(SessionError::CheckpointPending { year: cp.year });
        }

        self.state = match self.next_checkpoint_year() {
            Some(cp_year) if cp_year <= year => CheckpointState::Open(self.build_checkpoint(cp_year)?),
            _ => CheckpointState::Idle,
        };
        Ok(&self.state)
    }

    fn build_checkpoint(&self, year: i32) -> Result<Checkpoint, SessionError> {
        let phase_index = checkpoint_phase_index(year);
        let snapshot = match self.snapshot_mode {
            SnapshotMode::Aggregated => {
                DecisionSnapshot::aggregate(&self.request, &self.history, year)?
            }
            SnapshotMode::Placeholder => DecisionSnapshot::placeholder(),
        };
        let (recommended, rule) = recommend_with_rule(&snapshot, phase_index, self.request.scenario);

        tracing::info!(
            year,
            phase_index,
            recommended = %recommended,
            rule = rule.describe(),
            "decision checkpoint opened"
        );

        Ok(Checkpoint {
            year,
            phase_index,
            applicable: applicable_interventions(phase_index),
            recommended,
            rule,
            snapshot,
        })
    }

    fn take_open(&mut self) -> Result<Checkpoint, SessionError> {
        match std::mem::take(&mut self.state) {
            CheckpointState::Open(cp) => Ok(cp),
            other => {
                self.state = other;
                Err(SessionError::NoOpenCheckpoint)
            }
        }
    }

    fn resolve(&mut self, year: i32, id: InterventionId) -> &DecisionRecord {
        let record = DecisionRecord::new(year, id);
        tracing::info!(year, intervention = %id, "decision recorded");
        self.history.push(record.clone());
        self.next_checkpoint += 1;
        self.state = CheckpointState::Resolved(Resolution::Decided(record));
        // just pushed
        &self.history[self.history.len() - 1]
    }

    /// Resolve the open checkpoint with an explicit choice, which must be
    /// applicable in the checkpoint's phase.
    pub fn choose(&mut self, id: InterventionId) -> Result<&DecisionRecord, SessionError> {
        let cp = self.open_checkpoint().ok_or(SessionError::NoOpenCheckpoint)?;
        if !cp.applicable.contains(&id) {
            return Err(SessionError::NotApplicable {
                id,
                phase_index: cp.phase_index,
            });
        }
        let cp = self.take_open()?;
        Ok(self.resolve(cp.year, id))
    }

    /// Resolve the open checkpoint with its recommendation. The recommender
    /// is trusted even when its pick falls outside the phase's applicable set.
    pub fn accept_recommendation(&mut self) -> Result<&DecisionRecord, SessionError> {
        let cp = self.take_open()?;
        Ok(self.resolve(cp.year, cp.recommended))
    }

    /// Pass the open checkpoint without recording a decision
    pub fn skip(&mut self) -> Result<(), SessionError> {
        let cp = self.take_open()?;
        tracing::info!(year = cp.year, "decision skipped");
        self.next_checkpoint += 1;
        self.state = CheckpointState::Resolved(Resolution::Skipped { year: cp.year });
        Ok(())
    }

    /// Forget every decision and return to the first checkpoint
    pub fn reset(&mut self) {
        self.history.clear();
        self.next_checkpoint = 0;
        self.state = CheckpointState::Idle;
    }

    /// Accept every recommendation for checkpoints up to `year`
    pub fn autopilot(&mut self, year: i32) -> Result<&[DecisionRecord], SessionError> {
        while matches!(self.advance_to(year)?, CheckpointState::Open(_)) {
            self.accept_recommendation()?;
        }
        Ok(&self.history)
    }
}
