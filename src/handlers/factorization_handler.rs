use crate::handlers::{ComputationHandler, LngEvent};

/// A clause limiting handler for factorizations. This handler cancels the
/// computation if the number of distributions or the number of created clauses
/// exceed the specified limits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClauseLimitFactorizationHandler {
    /// Number of distribution already performed.
    pub dists: u64,
    /// Number of clauses already added.
    pub clauses: u64,
    dists_limit: u64,
    clauses_limit: u64,
}

impl ClauseLimitFactorizationHandler {
    /// Constructs a new handler which allows a maximum number of distributions
    /// and new clauses.
    pub const fn new(dists_limit: u64, clauses_limit: u64) -> Self {
        Self { dists: 0, clauses: 0, dists_limit, clauses_limit }
    }
}

impl ComputationHandler for ClauseLimitFactorizationHandler {
    fn should_resume(&mut self, event: LngEvent) -> bool {
        match event {
            LngEvent::ComputationStarted(_) => {
                self.dists = 0;
                self.clauses = 0;
                true
            }
            LngEvent::DistributionPerformed => {
                self.dists += 1;
                self.dists <= self.dists_limit
            }
            LngEvent::FactorizationCreatedClause(_) => {
                self.clauses += 1;
                self.clauses <= self.clauses_limit
            }
            _ => true,
        }
    }
}
