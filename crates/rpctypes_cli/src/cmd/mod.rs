/// Remote call command.
pub mod call;
/// Struct registry extraction command.
pub mod structs;
