pub mod admin_controller;
pub mod certificates_controller;
pub mod members_controller;
pub mod server;
