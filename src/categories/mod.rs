pub mod registry;

pub use registry::{
    all_categories, find, is_scope_compatible, Category, CategoryId, DataType,
    SITE_COMPATIBLE,
};
