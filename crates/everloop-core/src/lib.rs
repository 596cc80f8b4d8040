//! Core types, the store trait, the writing assistant and the services of the
//! Everloop story engine.
//!
//! This crate is free of HTTP and storage dependencies. Backends implement
//! [`store::StoryStore`]; front ends drive a [`service::StoryEngine`].

pub mod assistant;
pub mod canon;
pub mod error;
pub mod id;
pub mod seed;
pub mod service;
pub mod store;
pub mod story;
pub mod world;
pub mod writer;

pub use error::{Error, Result};
