use std::collections::HashMap;

/// Logical destination of a remote response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewTarget {
    /// Unfiltered source view (grayscale refresh).
    Source,
    /// Single-adjustment result view.
    Result,
    /// Layer composite view.
    Layer,
    /// Square-aspect analysis.
    Analysis,
    /// Filter-layer renders. Each one creates a layer, so none supersedes another.
    LayerContent,
}

impl ViewTarget {
    fn latest_wins(&self) -> bool {
        !matches!(self, Self::LayerContent)
    }
}

/// A request issued by the session and not yet answered.
#[derive(Debug, Clone)]
pub struct Pending<R> {
    pub target: ViewTarget,
    pub sequence: u64,
    pub epoch: u64,
    pub request: R,
}

/// What happened to a response handed back to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// A newer request for the same view was issued, or the image changed.
    Stale,
}

/// Hands out monotonically increasing sequence numbers per target so only
/// the newest response for a view is ever applied.
#[derive(Debug, Clone, Default)]
pub struct RequestSequencer {
    counter: u64,
    epoch: u64,
    latest: HashMap<ViewTarget, u64>,
}

impl RequestSequencer {
    pub fn issue<R>(&mut self, target: ViewTarget, request: R) -> Pending<R> {
        self.counter += 1;
        self.latest.insert(target, self.counter);
        Pending {
            target,
            sequence: self.counter,
            epoch: self.epoch,
            request,
        }
    }

    pub fn is_current<R>(&self, pending: &Pending<R>) -> bool {
        if pending.epoch != self.epoch {
            return false;
        }
        !pending.target.latest_wins()
            || self.latest.get(&pending.target) == Some(&pending.sequence)
    }

    /// Marks everything in flight for `target` as stale.
    pub fn invalidate(&mut self, target: ViewTarget) {
        self.counter += 1;
        self.latest.insert(target, self.counter);
    }

    /// Marks everything in flight for every target as stale.
    pub fn new_epoch(&mut self) {
        self.epoch += 1;
        self.latest.clear();
    }
}
