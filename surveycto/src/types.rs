/// Primitive SurveyCTO API data types and NewType-patterns.
mod date;
mod enums;
mod server_url;
mod strings;

pub use date::*;
pub use enums::*;
pub use server_url::*;
pub use strings::*;
