pub mod bytecode;
pub mod config;
pub mod descriptor;
pub mod inference;
pub mod signature;

pub use bytecode::{ClassIndex, ClassModel, InMemoryClassIndex, MethodModel};
pub use config::InferenceConfig;
pub use inference::{Conventions, ReturnTypeResolver, infer};
