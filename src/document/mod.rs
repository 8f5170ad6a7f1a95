pub(crate) mod builder;
pub(crate) mod defs;
pub(crate) mod node;
pub(crate) mod parse;
pub(crate) mod serialize;
