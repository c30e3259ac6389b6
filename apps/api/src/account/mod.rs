// Account endpoints: sign-in bookkeeping, profile summary and account deletion.

pub mod handlers;
pub mod summary;
