pub(crate) mod css;
pub(crate) mod rewrite;
pub(crate) mod rules;
pub(crate) mod validate;
