//! tutor-service: AI relay for flashcard study content.
//!
//! Every endpoint follows the same shape: validate the request, build a
//! fixed prompt, forward it to the configured chat-completion API, normalize
//! the response text, and return the uniform success envelope. The service
//! keeps no state between requests.

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
