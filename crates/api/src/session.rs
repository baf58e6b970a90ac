use crate::builder;
use crate::solver::MicrolpSolver;
use crate::ApiError;
use lpstudio_core::form::ProblemForm;
use lpstudio_core::history::{HistoryEntry, SessionHistory};
use lpstudio_core::options::Limits;
use lpstudio_core::traits::LpSolver;
use uuid::Uuid;

/// One user's interactive session: a solver, the configured form limits and
/// the history of every solve made so far.
#[derive(Debug)]
pub struct Session<S: LpSolver = MicrolpSolver> {
    id: Uuid,
    solver: S,
    limits: Limits,
    history: SessionHistory,
}

impl Session<MicrolpSolver> {
    pub fn new() -> Self {
        Self::with_solver(MicrolpSolver::new())
    }
}

impl Default for Session<MicrolpSolver> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: LpSolver> Session<S> {
    pub fn with_solver(solver: S) -> Self {
        let id = Uuid::new_v4();
        tracing::debug!(session = %id, solver = solver.name(), "session started");
        Self {
            id,
            solver,
            limits: Limits::default(),
            history: SessionHistory::new(),
        }
    }

    pub fn limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn current_limits(&self) -> &Limits {
        &self.limits
    }

    pub fn solver(&self) -> &S {
        &self.solver
    }

    /// Checks the form, builds and solves the program and records the outcome.
    ///
    /// Non-optimal outcomes are recorded like any other; only a malformed form
    /// is an error, and nothing is recorded for it.
    pub fn resolve(&mut self, form: &ProblemForm) -> Result<&HistoryEntry, ApiError> {
        let span = tracing::info_span!("resolve", session = %self.id);
        let _guard = span.enter();

        self.limits.check(form)?;
        form.validate()?;
        let program = builder::from_form(form)?;
        let result = self.solver.solve(&program);
        tracing::info!(
            status = %result.status,
            objective = ?result.objective_value,
            "problem resolved"
        );
        Ok(self.history.append(HistoryEntry::new(form, result)))
    }

    pub fn history(&self) -> &SessionHistory {
        &self.history
    }

    /// The entries a history panel shows, newest first.
    pub fn recent(&self) -> Vec<&HistoryEntry> {
        self.history.recent(self.limits.history_display)
    }

    pub fn clear_history(&mut self) {
        tracing::info!(session = %self.id, entries = self.history.len(), "clearing history");
        self.history.clear();
    }
}
