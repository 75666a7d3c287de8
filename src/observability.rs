use biometrics::{Collector, Counter, Moments};

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("medassist.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter =
    Counter::new("medassist.client.request_errors");
pub(crate) static CLIENT_RATE_LIMITED: Counter = Counter::new("medassist.client.rate_limited");
pub(crate) static CLIENT_TIMEOUTS: Counter = Counter::new("medassist.client.timeouts");
pub(crate) static CLIENT_SERVER_ERRORS: Counter = Counter::new("medassist.client.server_errors");
pub(crate) static CLIENT_REQUEST_DURATION: Moments =
    Moments::new("medassist.client.request_duration_seconds");

pub(crate) static SESSION_SUBMISSIONS: Counter = Counter::new("medassist.session.submissions");
pub(crate) static SESSION_DECLINED: Counter = Counter::new("medassist.session.declined");
pub(crate) static SESSION_FAILED: Counter = Counter::new("medassist.session.failed");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);
    collector.register_counter(&CLIENT_RATE_LIMITED);
    collector.register_counter(&CLIENT_TIMEOUTS);
    collector.register_counter(&CLIENT_SERVER_ERRORS);
    collector.register_moments(&CLIENT_REQUEST_DURATION);

    collector.register_counter(&SESSION_SUBMISSIONS);
    collector.register_counter(&SESSION_DECLINED);
    collector.register_counter(&SESSION_FAILED);
}
