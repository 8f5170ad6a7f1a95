pub(crate) mod design_check;
pub(crate) mod opts;
pub(crate) mod pipeline;
pub(crate) mod report;
