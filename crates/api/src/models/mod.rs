pub mod inferred;
pub mod type_name;

pub use inferred::*;
pub use type_name::TypeName;
