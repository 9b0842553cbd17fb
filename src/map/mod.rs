pub mod consts;
pub mod dedup;
pub mod markers;
pub mod models;
pub mod viewpoint;
