pub mod classify;
pub mod items;
pub mod serve;
