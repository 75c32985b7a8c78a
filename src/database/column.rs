use std::collections::BTreeMap;

/// A catalog column found in the header, e.g. one drink type.
#[derive(Clone, Debug, PartialEq)]
pub struct CatalogColumn {
    /// Header name as declared in the catalog
    pub name: String,
    /// Column index (0-based)
    pub index: usize,
}

/// Mapping from logical field name to 0-based column index, built from one header row.
///
/// Required fields always hold an index once resolution succeeded; optional
/// fields hold None when their header is absent. Catalog columns keep catalog
/// order and only contain names that were found.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColumnMap {
    fields: BTreeMap<String, Option<usize>>,
    catalog: Vec<CatalogColumn>,
}

impl ColumnMap {
    pub(crate) fn insert_field(&mut self, name: &str, index: Option<usize>) {
        self.fields.insert(name.to_owned(), index);
    }

    pub(crate) fn push_catalog(&mut self, name: &str, index: usize) {
        self.catalog.push(CatalogColumn {
            name: name.to_owned(),
            index,
        });
    }

    /// Column index of a declared field, None when the field is absent or undeclared.
    pub fn index(&self, name: &str) -> Option<usize> {
        self.fields.get(name).copied().flatten()
    }

    /// Catalog columns present in the header, in catalog order.
    pub fn catalog(&self) -> &[CatalogColumn] {
        &self.catalog
    }

    /// Highest resolved column index over fields and catalog columns.
    pub fn last_index(&self) -> Option<usize> {
        self.fields
            .values()
            .flatten()
            .copied()
            .chain(self.catalog.iter().map(|column| column.index))
            .max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_map_lookup() {
        let mut columns = ColumnMap::default();
        columns.insert_field("Evento", Some(0));
        columns.insert_field("Local", None);
        columns.push_catalog("Jack & Coke", 7);
        columns.push_catalog("MaracuJack", 4);

        assert_eq!(columns.index("Evento"), Some(0));
        assert_eq!(columns.index("Local"), None);
        assert_eq!(columns.index("Data"), None);
        assert_eq!(columns.catalog()[0].name, "Jack & Coke");
        assert_eq!(columns.last_index(), Some(7));
        assert_eq!(ColumnMap::default().last_index(), None);
    }
}
