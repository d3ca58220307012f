pub mod config;
pub mod context;
pub mod modules;
pub mod shared;

pub use modules::auth;
pub use modules::category;
pub use modules::message;
pub use modules::project;
pub use modules::resume;
pub use modules::upload;
