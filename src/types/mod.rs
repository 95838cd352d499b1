pub mod arith;
pub mod value;
