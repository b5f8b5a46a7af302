//! Sweep scheduling as a tick driven state machine.
//!
//! The scheduler does no I/O and keeps no clock. Its driver calls `start` once, then `tick`
//! every update interval, and carries out the returned steps: registering listeners on
//! `Activate`, updating the progress indicator on `Progress`, unregistering on `Deactivate`.

use std::time::Duration;

use common::types::ExperimentKey;

use crate::helpers;

/// What to sweep and how long each cell lasts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepPlan {
    pub frequencies: Vec<u32>,
    pub magnetometer_states: Vec<bool>,
    pub cell_duration: Duration,
    pub update_interval: Duration,
    pub gyroscope_stagger: Duration,
    pub magnetometer_sampling_period_us: u32,
}

impl SweepPlan {
    /// Cells in execution order: magnetometer states in the outer loop, frequencies in the inner one.
    pub fn cells(&self) -> Vec<ExperimentKey> {
        self.magnetometer_states
            .iter()
            .flat_map(|state| {
                self.frequencies
                    .iter()
                    .map(move |frequency| ExperimentKey::new(*frequency, *state))
            })
            .collect()
    }

    pub fn steps_per_cell(&self) -> u64 {
        helpers::steps_per_cell(self.cell_duration, self.update_interval)
    }

    /// Value of the progress counter once the sweep is over.
    pub fn progress_max(&self) -> u64 {
        self.cells().len() as u64 * self.steps_per_cell()
    }

    pub fn total_duration(&self) -> Duration {
        self.cell_duration * self.cells().len() as u32
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SweepState {
    Idle,
    CellActive {
        key: ExperimentKey,
        remaining_ticks: u64,
    },
    SweepDone,
}

/// Action requested from the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SweepStep {
    Activate(ExperimentKey),
    Progress { current: u64, max: u64 },
    Deactivate(ExperimentKey),
    Finished,
}

pub struct Scheduler {
    plan: SweepPlan,
    cells: Vec<ExperimentKey>,
    next_cell: usize,
    state: SweepState,
    progress: u64,
}

impl Scheduler {
    pub fn new(plan: SweepPlan) -> Self {
        let cells = plan.cells();
        Self {
            plan,
            cells,
            next_cell: 0,
            state: SweepState::Idle,
            progress: 0,
        }
    }

    pub fn plan(&self) -> &SweepPlan {
        &self.plan
    }

    pub fn state(&self) -> &SweepState {
        &self.state
    }

    pub fn progress(&self) -> u64 {
        self.progress
    }

    /// Starts a sweep from the first cell. Restarting a finished sweep resets the progress counter.
    /// Returns `None` while a cell is active: the sweep is left untouched and there is nothing for
    /// the driver to do.
    pub fn start(&mut self) -> Option<SweepStep> {
        if let SweepState::CellActive { key, .. } = &self.state {
            log::warn!("Sweep already running, currently on {}", key);
            return None;
        }
        self.progress = 0;
        self.next_cell = 0;
        Some(self.advance())
    }

    /// Advances the sweep by one update interval.
    pub fn tick(&mut self) -> Vec<SweepStep> {
        let (key, remaining_ticks) = match &self.state {
            SweepState::CellActive {
                key,
                remaining_ticks,
            } => (*key, *remaining_ticks),
            SweepState::Idle | SweepState::SweepDone => return vec![],
        };

        let mut steps = Vec::with_capacity(3);
        let mut remaining_ticks = remaining_ticks;
        if remaining_ticks > 0 {
            remaining_ticks -= 1;
            self.progress += 1;
            steps.push(SweepStep::Progress {
                current: self.progress,
                max: self.plan.progress_max(),
            });
        }

        if remaining_ticks == 0 {
            steps.push(SweepStep::Deactivate(key));
            steps.push(self.advance());
        } else {
            self.state = SweepState::CellActive {
                key,
                remaining_ticks,
            };
        }
        steps
    }

    fn advance(&mut self) -> SweepStep {
        match self.cells.get(self.next_cell) {
            Some(key) => {
                self.next_cell += 1;
                self.state = SweepState::CellActive {
                    key: *key,
                    remaining_ticks: self.plan.steps_per_cell(),
                };
                SweepStep::Activate(*key)
            }
            None => {
                self.state = SweepState::SweepDone;
                SweepStep::Finished
            }
        }
    }
}
