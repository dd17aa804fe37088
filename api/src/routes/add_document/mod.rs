pub mod add_document_request;
pub mod add_document_route;
