use time::OffsetDateTime;

/// Current instant in UTC, used for `createdAt`/`updatedAt` stamps.
pub fn now_utc() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}
