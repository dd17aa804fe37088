pub mod event_request;
pub mod response_envelope;
