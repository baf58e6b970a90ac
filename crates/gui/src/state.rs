//! Window-independent state of the workbench: the form being edited, the
//! session it is solved in and the result shown under "Resultado Atual".

use lpstudio_api::{ApiError, Limits, Session, SolveResult};
use lpstudio_core::form::ProblemForm;
use lpstudio_core::problem::ProblemResult;

pub struct Workbench {
    pub form: ProblemForm,
    pub variable_count: usize,
    pub constraint_count: usize,
    session: Session,
    current: Option<SolveResult>,
}

impl Workbench {
    pub fn new(limits: Limits) -> Self {
        let mut form = ProblemForm::default();
        let variable_count = limits.clamp_variables(form.variable_count());
        let constraint_count = limits.clamp_constraints(form.constraints.len());
        form.resize(variable_count, constraint_count);
        Self {
            form,
            variable_count,
            constraint_count,
            session: Session::new().limits(limits),
            current: None,
        }
    }

    pub fn limits(&self) -> &Limits {
        self.session.current_limits()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn current(&self) -> Option<&SolveResult> {
        self.current.as_ref()
    }

    /// Zero-fills or truncates the form after the counts changed.
    pub fn sync(&mut self) {
        self.form.resize(self.variable_count, self.constraint_count);
    }

    pub fn load(&mut self, form: ProblemForm) -> ProblemResult<()> {
        self.limits().check(&form)?;
        form.validate()?;
        self.variable_count = form.variable_count();
        self.constraint_count = form.constraints.len();
        self.form = form;
        self.current = None;
        Ok(())
    }

    pub fn resolve(&mut self) -> Result<&SolveResult, ApiError> {
        self.sync();
        let result = self.session.resolve(&self.form)?.result().clone();
        Ok(self.current.insert(result))
    }

    pub fn clear_history(&mut self) {
        self.session.clear_history();
        self.current = None;
    }
}
