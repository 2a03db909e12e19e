pub mod es;
pub mod logs;
