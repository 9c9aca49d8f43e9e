//! prepdeck: timed aptitude test and recorded mock interview, with Hexagonal Architecture.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
