// Generation history: a user's stored generations, searchable and deletable.

pub mod filter;
pub mod handlers;
