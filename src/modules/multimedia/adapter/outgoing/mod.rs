pub mod cloudinary;
pub mod disabled_media_store;
