mod xml;

pub use xml::{assert_xml_semantic_eq, normalize_xml};
