pub(crate) mod common;
pub(crate) mod context;
pub(crate) mod group;
pub(crate) mod image;
pub(crate) mod media;
pub(crate) mod registry;
pub(crate) mod shape;
pub(crate) mod text;
pub(crate) mod vector;
