//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Access decisions stay
//! in the handlers; repositories only embed the predicate where it is
//! folded into a single guarded statement.

pub mod comment_repo;
pub mod tag_repo;
pub mod task_repo;
pub mod todo_list_repo;
pub mod user_repo;

pub use comment_repo::CommentRepo;
pub use tag_repo::TagRepo;
pub use task_repo::TaskRepo;
pub use todo_list_repo::TodoListRepo;
pub use user_repo::UserRepo;
