pub mod axis;
pub mod builder;
pub mod error;
pub mod variable;
