mod login_user;
mod logout_user;
mod register_user;
mod user_dto;

pub use login_user::{login_user_handler, LoginRequestDto, LoginResponse, __path_login_user_handler};
pub use logout_user::{logout_user_handler, __path_logout_user_handler};
pub use register_user::{register_user_handler, RegisterUserRequest, __path_register_user_handler};
pub use user_dto::UserDto;
