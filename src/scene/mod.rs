pub(crate) mod hierarchy;
pub(crate) mod load;
pub(crate) mod model;
pub(crate) mod props;
