pub mod check;
pub mod discover;
pub mod dispatch;
pub mod export;
pub mod format;
pub mod reset;
