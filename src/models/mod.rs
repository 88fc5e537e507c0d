pub mod asset;
pub mod part;
pub mod request;
pub mod response;

pub use asset::*;
pub use part::*;
pub use request::*;
pub use response::*;
