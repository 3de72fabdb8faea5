//! table holds the public description of a schema entry: its name, root
//! page, and declared columns. Grounded on the teacher's `table.rs`
//! `Table`, which additionally carried a live pager reference and typed
//! row casting; those concerns moved to `schema.rs` (column extraction)
//! and `Database::visit_table_records` (page access), leaving `Table`
//! itself a plain, pager-independent description.

#[derive(Debug, Clone)]
pub struct Column {
    name: String,
    declared_type: String,
}

impl Column {
    pub fn new(name: String, declared_type: String) -> Self {
        Column { name, declared_type }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declared_type(&self) -> &str {
        &self.declared_type
    }
}

#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    root_page: crate::pager::PageNum,
    columns: Vec<Column>,
}

impl Table {
    pub fn new(name: String, root_page: crate::pager::PageNum, columns: Vec<Column>) -> Self {
        Table {
            name,
            root_page,
            columns,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root_page(&self) -> crate::pager::PageNum {
        self.root_page
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }
}
