//! Value objects - immutable types that represent domain concepts

mod color;
mod display_name;
mod snowflake;

pub use color::{username_color, USERNAME_COLORS};
pub use display_name::{DisplayName, InvalidDisplayName};
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
