//! Redirect decision engine.

mod service;
mod strategy;

pub use service::BalancerService;
pub use strategy::{BalancingStrategy, NthRequestStrategy};
