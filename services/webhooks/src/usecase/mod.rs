pub mod dispatch;
pub mod session;
pub mod user;
