pub mod origin;
pub mod rejection;
