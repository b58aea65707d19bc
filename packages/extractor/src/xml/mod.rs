//! XML utilities and namespace resolution.

mod namespace;
mod utils;

pub use namespace::{default_namespace, resolve_namespaces, Namespace};
pub use utils::{
    element_children, find_all_by_path, find_child, get_attribute, get_tag_name, get_text,
    qualified_tag_name,
};
