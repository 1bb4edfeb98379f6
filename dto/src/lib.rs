pub mod api_response;
pub mod availability;
pub mod bulk_operation;
pub mod gender;
pub mod member;
pub mod member_registration;
pub mod membership_category;
