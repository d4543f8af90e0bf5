pub mod staging;
pub mod uuid;
