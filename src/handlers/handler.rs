use super::LngEvent;

/// Basic handler trait which can be used to control computations.
///
/// Long running computations report their progress as [`LngEvent`]s to a
/// handler. If the handler returns `false`, the computation is canceled and
/// returns the event which caused the cancellation, usually as
/// [`LngResult::Canceled`](super::LngResult::Canceled).
pub trait ComputationHandler {
    /// Is called for each event of the computation. Returns `false` if the
    /// computation should be canceled.
    fn should_resume(&mut self, _event: LngEvent) -> bool {
        true
    }
}

/// A handler which never cancels a computation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NopHandler;

impl NopHandler {
    /// Creates a new `NopHandler`.
    pub const fn new() -> Self {
        Self
    }
}

impl ComputationHandler for NopHandler {}

impl<H: ComputationHandler + ?Sized> ComputationHandler for &mut H {
    fn should_resume(&mut self, event: LngEvent) -> bool {
        (**self).should_resume(event)
    }
}

/// A handler which cancels a computation once it allocated more nodes than
/// a given limit. It reacts on [`LngEvent::BddNewNodeAllocated`] and
/// [`LngEvent::SddNewNodeAllocated`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NumberOfNodesHandler {
    limit: usize,
    count: usize,
}

impl NumberOfNodesHandler {
    /// Creates a new handler which allows at most `limit` new nodes.
    pub const fn new(limit: usize) -> Self {
        Self { limit, count: 0 }
    }

    /// Returns the number of nodes allocated so far.
    pub const fn count(&self) -> usize {
        self.count
    }
}

impl ComputationHandler for NumberOfNodesHandler {
    fn should_resume(&mut self, event: LngEvent) -> bool {
        match event {
            LngEvent::ComputationStarted(_) => {
                self.count = 0;
                true
            }
            LngEvent::BddNewNodeAllocated | LngEvent::SddNewNodeAllocated => {
                self.count += 1;
                self.count <= self.limit
            }
            _ => true,
        }
    }
}
