use crate::context::{Context, ErrorDetail, PathSegment};

/// Location of one validated field plus the short-circuit flag of its chain.
///
/// Once a check has failed, later checks in the same chain are skipped, so a
/// field contributes at most one error per chain.
#[derive(Debug, Clone)]
pub(crate) struct Field<'s> {
    context: Context<'s>,
    segment: PathSegment,
    failed: bool,
}

impl<'s> Field<'s> {
    pub(crate) fn new(context: Context<'s>, segment: PathSegment) -> Self {
        Self {
            context,
            segment,
            failed: false,
        }
    }

    pub(crate) fn failed(&self) -> bool {
        self.failed
    }

    /// Record the detail unless the condition holds or the chain already failed.
    pub(crate) fn check(&mut self, ok: bool, detail: impl FnOnce() -> ErrorDetail) {
        if !self.failed && !ok {
            self.fail(detail());
        }
    }

    pub(crate) fn fail(&mut self, detail: ErrorDetail) {
        if !self.failed {
            self.context.append_error(self.segment.clone(), detail);
            self.failed = true;
        }
    }
}
