pub mod ranking;
pub mod selection;
