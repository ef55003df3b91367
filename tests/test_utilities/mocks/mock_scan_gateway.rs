use async_trait::async_trait;
use docscan::prelude::*;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

struct Scripted {
    delay: Duration,
    outcome: GatewayResult<RawServiceResponse>,
}

/// Mock ScanGateway replaying scripted outcomes in order
///
/// Records when each call arrived and which file name it carried. Once the
/// script is exhausted every further call fails with `FailureOutcome::Other`.
#[derive(Default, Clone)]
pub struct MockScanGateway {
    script: Arc<Mutex<VecDeque<Scripted>>>,
    calls: Arc<Mutex<Vec<(Instant, String)>>>,
}

#[allow(dead_code)]
impl MockScanGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, outcome: GatewayResult<RawServiceResponse>) -> Self {
        self.respond_after(Duration::ZERO, outcome)
    }

    pub fn respond_after(
        self,
        delay: Duration,
        outcome: GatewayResult<RawServiceResponse>,
    ) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Scripted { delay, outcome });
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn call_times(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().iter().map(|(t, _)| *t).collect()
    }

    pub fn submitted_names(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, name)| name.clone())
            .collect()
    }
}

#[async_trait]
impl ScanGateway for MockScanGateway {
    async fn submit(
        &self,
        file: &CandidateFile,
        _credential: &Credential,
        on_progress: ProgressCallback,
    ) -> GatewayResult<RawServiceResponse> {
        self.calls
            .lock()
            .unwrap()
            .push((Instant::now(), file.name().to_string()));
        let next = self.script.lock().unwrap().pop_front();
        let Some(Scripted { delay, outcome }) = next else {
            return Err(FailureOutcome::Other {
                message: "no scripted response".to_string(),
            });
        };

        on_progress(UploadProgress::new(file.size(), file.size()));
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        outcome
    }
}
