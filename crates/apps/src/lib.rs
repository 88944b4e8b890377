//! The two front-ends over the shared decision engine.
//!
//! Both are thin: they collect raw fields, hand them to
//! [`DecisionEngine::infer_fields`](rp_decisions::DecisionEngine::infer_fields) and render
//! the result through `rp-views`.

pub mod assistant;
pub mod cli;
pub mod console;
pub mod web;
