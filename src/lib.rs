pub mod agent;
pub mod entities;
pub mod environment;
pub mod hook_generator;
pub mod logging;
pub mod openai_handler;
pub mod pages;
pub mod router;
