//! JVM Return-Type Inference System
//!
//! Infers what a compiled method really returns by walking its instruction
//! stream backward from each return to the instruction that produced the value.
//!
//! # Architecture
//!
//! ```text
//! ReturnTypeResolver        →  fast path (signature) or one trace per return
//!       │
//!       ▼
//! trace_before              →  skips markers, helper sequences, non-producers
//!       │
//!       ▼
//! InferStrategy (trait)     →  combines via or_else()
//!       │
//!       ▼
//! InferContext (immutable)  →  method, ClassIndex, Conventions, depth
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use sigscope_java::inference::infer;
//!
//! let types = infer(&method, &index);
//! println!("{:?}", types.to_strings());
//! ```

pub mod context;
pub mod conventions;
pub mod filter;
pub mod resolver;
pub mod strategy;

pub use context::{InferContext, MAX_TRACE_DEPTH};
pub use conventions::{AccessorConvention, ClosureConvention, ConventionError, Conventions};
pub use filter::{IntrinsicFilter, IntrinsicPattern};
pub use resolver::{ReturnTypeResolver, infer};
pub use strategy::{InferStrategy, build_producer_inferrer, trace_before};
