pub mod add_document;
pub mod ask;
pub mod heartbeat;
