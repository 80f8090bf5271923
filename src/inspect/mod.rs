//! Generic property dumper for debug server detail objects.

pub(crate) mod props;

pub use props::{PropertyTree, PropertyView};
