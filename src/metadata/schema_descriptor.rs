use crate::schema::types::ParquetType;
use crate::schema::Repetition;

use super::column_descriptor::ColumnDescriptor;

/// A schema descriptor. This encapsulates the top-level schema for all the
/// columns, as well as a descriptor per primitive (leaf) column with its
/// maximum definition and repetition levels and its path from the root.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDescriptor {
    // The top-level schema (the "message" type).
    schema: ParquetType,

    // All the descriptors for primitive columns in this schema, constructed from
    // `schema` in DFS order.
    leaves: Vec<ColumnDescriptor>,
}

impl SchemaDescriptor {
    /// Creates a new schema descriptor from a root parquet type.
    ///
    /// # Panics
    /// Panics iff `type_` is not a root group type.
    pub fn new(type_: ParquetType) -> Self {
        assert!(type_.is_root());
        match type_ {
            ParquetType::GroupType { ref fields, .. } => {
                let mut leaves = vec![];
                for field in fields {
                    let mut path = vec![];
                    build_tree(field, 0, 0, &mut leaves, &mut path);
                }

                Self {
                    schema: type_,
                    leaves,
                }
            }
            ParquetType::PrimitiveType { .. } => unreachable!(),
        }
    }

    /// Returns the [`ColumnDescriptor`] of the leaf at position `i`.
    pub fn column(&self, i: usize) -> &ColumnDescriptor {
        &self.leaves[i]
    }

    /// Returns slice of [`ColumnDescriptor`], one per leaf, in write order.
    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.leaves
    }

    /// Returns number of leaf-level columns.
    pub fn num_columns(&self) -> usize {
        self.leaves.len()
    }

    /// Returns the schema as a [`ParquetType`] tree.
    pub fn root_schema(&self) -> &ParquetType {
        &self.schema
    }

    /// Returns schema name.
    pub fn name(&self) -> &str {
        self.schema.name()
    }
}

// every non-REQUIRED node on the path raises the definition level; every
// REPEATED node additionally raises the repetition level.
fn build_tree<'a>(
    type_: &'a ParquetType,
    mut max_rep_level: i16,
    mut max_def_level: i16,
    leaves: &mut Vec<ColumnDescriptor>,
    path_so_far: &mut Vec<&'a str>,
) {
    path_so_far.push(type_.name());
    match type_.get_basic_info().repetition() {
        Repetition::Optional => {
            max_def_level += 1;
        }
        Repetition::Repeated => {
            max_def_level += 1;
            max_rep_level += 1;
        }
        Repetition::Required => {}
    }

    match type_ {
        ParquetType::PrimitiveType { .. } => {
            let path_in_schema = path_so_far.iter().copied().map(String::from).collect();
            leaves.push(ColumnDescriptor::new(
                type_.clone(),
                max_def_level,
                max_rep_level,
                path_in_schema,
            ));
        }
        ParquetType::GroupType { ref fields, .. } => {
            for field in fields {
                build_tree(field, max_rep_level, max_def_level, leaves, path_so_far);
                path_so_far.pop();
            }
        }
    }
}
