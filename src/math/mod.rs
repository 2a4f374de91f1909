pub mod matrix3;

pub use matrix3::{InversePolicy, Matrix3};
