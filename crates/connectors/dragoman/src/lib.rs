pub mod query;
pub mod state;
pub mod subscription;
