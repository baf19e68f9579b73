//! Type system module

pub mod type_system;

pub use type_system::{check_compatibility, infer_type, DataType, LiteralType, NumericShape};
