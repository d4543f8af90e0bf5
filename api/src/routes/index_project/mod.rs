pub mod index_project_request;
pub mod index_project_route;
