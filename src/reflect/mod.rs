//! # Target resolution and metadata aggregation
//!
//! ```text
//! Target ──classify──▶ TargetKind ──resolve──▶ Reflector
//!                                                 │
//!                              attributes / decorators (one level)
//!                                                 │
//!                              ancestor walk ──▶ merged result
//! ```
//!
//! [`Inspector`] is the entry point. Classification is an ordered predicate chain
//! (handle, class, method pair, function); the first match decides the handle kind.

mod extract;
mod hierarchy;
mod inspector;
mod target;


pub use inspector::Inspector;
pub use target::{Target, TargetKind};
