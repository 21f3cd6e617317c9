mod login;
mod profile;
mod register;
mod routes;

pub use login::*;
pub use profile::*;
pub use register::*;
pub use routes::*;
