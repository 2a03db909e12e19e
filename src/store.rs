pub mod es;
pub mod factory;
pub mod memory;
