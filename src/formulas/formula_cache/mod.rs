pub(crate) mod formula_encoding;
pub(crate) mod formula_factory_caches;
pub(crate) mod node_table;
