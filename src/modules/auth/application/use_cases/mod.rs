pub mod bootstrap_admin;
pub mod login_user;
pub mod register_user;
