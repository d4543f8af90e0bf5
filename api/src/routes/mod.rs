pub mod documentation;
pub mod health;
pub mod index_project;
