pub(crate) mod extract;
pub(crate) mod normalized;
