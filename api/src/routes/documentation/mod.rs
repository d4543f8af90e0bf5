pub mod documentation_request;
pub mod documentation_route;
