//! API data models
//!
//! This module contains the request structures sent to the endpoint.

pub mod openai;
