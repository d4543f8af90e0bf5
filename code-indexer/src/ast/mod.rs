pub mod interface;
pub mod java;
