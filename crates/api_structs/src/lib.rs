mod event;
mod status;
mod user;

pub mod dtos {
    pub use crate::event::dtos::*;
    pub use crate::user::dtos::*;
}

pub mod admin {
    pub use crate::event::admin::*;
}

pub use crate::event::api::*;
pub use crate::status::api::*;
pub use crate::user::api::*;
