//! Row structs and request DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` DTOs for the write operations that touch the table

pub mod comment;
pub mod tag;
pub mod todo_list;
pub mod todo_task;
pub mod user;
