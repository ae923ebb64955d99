//! CLI commands for keymark

pub mod batch;
pub mod dispatch;
pub mod grade;
pub mod helpers;
pub mod key;
pub mod responses;
