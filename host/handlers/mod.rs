pub mod invoke;
pub mod modules;
