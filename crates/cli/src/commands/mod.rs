pub(crate) mod cached;
pub(crate) mod search;
pub(crate) mod sync;
