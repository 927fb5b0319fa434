pub(crate) mod phases;
