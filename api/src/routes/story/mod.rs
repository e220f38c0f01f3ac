pub mod story_request;
pub mod story_route;
