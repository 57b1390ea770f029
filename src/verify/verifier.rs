//! Verification orchestration.

use std::collections::VecDeque;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;

use crate::collector::PackageIdentity;
use crate::error::Result;
use crate::managers::adapter_for;
use crate::state::{StateDir, VerificationMap};
use crate::verify::status::{BatchSummary, VerificationStatus};

/// Runs verification and persists results keyed by identity.
pub struct Verifier {
    state: StateDir,
}

impl Verifier {
    /// Create a verifier over a state directory.
    pub fn new(state: StateDir) -> Self {
        Self { state }
    }

    /// Verify one package, store the result, and return it.
    ///
    /// Reruns always overwrite the prior stored status for the identity.
    pub fn verify_one(&self, identity: &PackageIdentity) -> Result<VerificationStatus> {
        let status = adapter_for(identity.manager).verify(&identity.name);

        let mut map = VerificationMap::load(&self.state);
        map.set(identity, status.clone());
        map.save(&self.state)?;

        Ok(status)
    }

    /// Verify every identity with a bounded worker pool.
    ///
    /// Each verification is dominated by external-process latency, so a few
    /// workers cut wall-clock substantially. Any single check may fail or
    /// take long without aborting the batch; the stored map is commutative
    /// because each entry depends only on its own latest check. Results are
    /// returned sorted by identity for stable reporting.
    pub fn verify_all(
        &self,
        identities: Vec<PackageIdentity>,
        jobs: usize,
    ) -> Result<(BatchSummary, Vec<(PackageIdentity, VerificationStatus)>)> {
        let workers = jobs.max(1).min(identities.len().max(1));
        let queue: Arc<Mutex<VecDeque<PackageIdentity>>> =
            Arc::new(Mutex::new(identities.into_iter().collect()));
        let (tx, rx) = mpsc::channel();

        let mut handles = Vec::with_capacity(workers);
        for _ in 0..workers {
            let queue = Arc::clone(&queue);
            let tx = tx.clone();
            handles.push(thread::spawn(move || loop {
                let next = queue.lock().unwrap().pop_front();
                let Some(identity) = next else { break };
                let status = adapter_for(identity.manager).verify(&identity.name);
                if tx.send((identity, status)).is_err() {
                    break;
                }
            }));
        }
        drop(tx);

        let mut results: Vec<(PackageIdentity, VerificationStatus)> = rx.into_iter().collect();
        for handle in handles {
            let _ = handle.join();
        }
        results.sort_by(|a, b| a.0.cmp(&b.0));

        let mut map = VerificationMap::load(&self.state);
        for (identity, status) in &results {
            map.set(identity, status.clone());
        }
        map.save(&self.state)?;

        let summary = BatchSummary::tally(results.iter().map(|(_, status)| status));
        Ok((summary, results))
    }
}
