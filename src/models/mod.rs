pub mod user;
pub mod repository;
pub mod event;
pub mod contribution;
pub mod report;

pub use user::*;
pub use repository::*;
pub use event::*;
pub use contribution::*;
pub use report::*;
