use biometrics::{Collector, Counter};

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("nyaya.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter = Counter::new("nyaya.client.request_errors");
pub(crate) static CLIENT_ATTACHMENT_REQUESTS: Counter =
    Counter::new("nyaya.client.attachment_requests");

pub(crate) static SESSION_TURNS: Counter = Counter::new("nyaya.session.turns");
pub(crate) static SESSION_ROLLBACKS: Counter = Counter::new("nyaya.session.rollbacks");
pub(crate) static SESSION_RESETS: Counter = Counter::new("nyaya.session.resets");
pub(crate) static SESSION_REJECTED_ATTACHMENTS: Counter =
    Counter::new("nyaya.session.rejected_attachments");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);
    collector.register_counter(&CLIENT_ATTACHMENT_REQUESTS);
    collector.register_counter(&SESSION_TURNS);
    collector.register_counter(&SESSION_ROLLBACKS);
    collector.register_counter(&SESSION_RESETS);
    collector.register_counter(&SESSION_REJECTED_ATTACHMENTS);
}
