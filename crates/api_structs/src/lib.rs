mod date_option;
mod event;
mod signup;
mod status;
mod user;

pub mod dtos {
    pub use crate::date_option::dtos::*;
    pub use crate::event::dtos::*;
    pub use crate::signup::dtos::*;
    pub use crate::user::dtos::*;
}

pub use crate::date_option::api::*;
pub use crate::event::api::*;
pub use crate::signup::api::*;
pub use crate::status::api::*;
pub use crate::user::api::*;
