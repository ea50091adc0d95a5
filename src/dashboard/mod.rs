pub mod client;
pub mod notification;
pub mod render;
pub mod view_model;
