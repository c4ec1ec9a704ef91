pub mod app_state_builder;
pub mod fakes;
pub mod listing_fixtures;
pub mod multipart;

pub fn load_test_env() {
    dotenvy::from_filename(".env.test").ok();
}
