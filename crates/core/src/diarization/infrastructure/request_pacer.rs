use std::time::{Duration, Instant};

/// Spaces outgoing requests at a steady minimum interval.
///
/// Hosted diarization providers throttle bursty clients; pacing on our
/// side keeps request rate flat. This is a cap, not a retry mechanism:
/// a throttled response still fails the request.
pub struct RequestPacer {
    min_interval: Duration,
    last_request: Option<Instant>,
}

impl RequestPacer {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: None,
        }
    }

    /// Block until the minimum interval since the previous call has passed.
    pub fn wait(&mut self) {
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                std::thread::sleep(self.min_interval - elapsed);
            }
        }
        self.last_request = Some(Instant::now());
    }
}
