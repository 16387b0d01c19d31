pub mod time;
pub mod xml;
