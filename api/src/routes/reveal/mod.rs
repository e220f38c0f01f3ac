pub mod reveal_request;
pub mod reveal_route;
