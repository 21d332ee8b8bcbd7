pub mod add;
pub mod del;
pub mod import;
pub mod log;
pub mod normalize;
pub mod portal;
pub mod reconcile;
pub mod summary;
pub mod team;
pub mod window;
