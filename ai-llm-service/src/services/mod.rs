pub mod completion_service;
pub mod ollama_service;
