/// Assets gating the reveal of the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssetKind {
    MainModel,
    Logo,
    MarkerModel,
}

impl AssetKind {
    pub const GATED: [AssetKind; 3] = [AssetKind::MainModel, AssetKind::Logo, AssetKind::MarkerModel];

    pub fn url(self) -> &'static str {
        match self {
            AssetKind::MainModel => crate::constants::MAIN_MODEL_URL,
            AssetKind::Logo => crate::constants::LOGO_MODEL_URL,
            AssetKind::MarkerModel => crate::constants::MARKER_MODEL_URL,
        }
    }
}

/// Counts settled assets (loaded or failed) and completes exactly once.
#[derive(Debug)]
pub struct LoadLatch {
    expected: usize,
    settled: Vec<AssetKind>,
    failed: usize,
    completed: bool,
}

impl LoadLatch {
    pub fn new(expected: usize) -> Self {
        Self {
            expected,
            settled: Vec::with_capacity(expected),
            failed: 0,
            completed: expected == 0,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    pub fn settled_count(&self) -> usize {
        self.settled.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failed
    }

    pub fn has_settled(&self, kind: AssetKind) -> bool {
        self.settled.contains(&kind)
    }

    /// Settle one asset. Returns true only on the call that completes the
    /// latch; repeats for an already settled asset are ignored.
    pub fn settle(&mut self, kind: AssetKind, ok: bool) -> bool {
        if self.completed || self.has_settled(kind) {
            return false;
        }
        self.settled.push(kind);
        if !ok {
            self.failed += 1;
        }
        log::info!(
            "[assets] settled {:?} ok={} ({}/{})",
            kind,
            ok,
            self.settled.len(),
            self.expected
        );
        if self.settled.len() < self.expected {
            return false;
        }
        self.completed = true;
        true
    }
}
