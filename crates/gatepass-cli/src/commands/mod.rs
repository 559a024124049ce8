pub mod check;
pub mod dispatch;
pub mod import;
pub mod last_log;
pub mod logs;
pub mod serve;
pub mod shared;
