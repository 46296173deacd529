mod date_option;
mod event;
mod shared;
mod signup;
mod user;

pub use date_option::{DateVote, EventDateOption};
pub use event::{Event, EventVisibility};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use shared::user_id::{InvalidUserIdError, UserId};
pub use signup::{Attendee, EventSignup};
pub use user::{parse_name_from_email, User};
