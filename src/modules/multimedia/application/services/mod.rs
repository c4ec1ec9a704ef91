pub mod remote_cleanup;

pub use remote_cleanup::discard_remote_objects;
