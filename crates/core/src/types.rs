/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Opaque subject identifier issued by the external identity provider.
///
/// Mirrored into the `users` table so foreign keys hold; never parsed
/// or generated by this service.
pub type UserId = String;
