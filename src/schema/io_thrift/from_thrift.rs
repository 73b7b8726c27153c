use crate::error::{Error, Result};
use crate::format::SchemaElement;

use super::super::types::{
    converted_to_group_converted, converted_to_primitive_converted, ParquetType, PhysicalType,
};

impl ParquetType {
    /// Builds a type tree from the flat schema of a parquet footer.
    ///
    /// The flat schema is the depth-first traversal of the tree: each group
    /// element consumes its next `num_children` elements recursively.
    pub fn try_from_thrift(elements: &[SchemaElement]) -> Result<ParquetType> {
        let mut index = 0;
        let mut schema_nodes = Vec::new();
        while index < elements.len() {
            let (next_index, node) = from_thrift_helper(elements, index)?;
            index = next_index;
            schema_nodes.push(node);
        }
        if schema_nodes.len() != 1 {
            return Err(Error::oos(format!(
                "expected exactly one root node, but found {}",
                schema_nodes.len()
            )));
        }

        Ok(schema_nodes.remove(0))
    }
}

/// Constructs a new type from `elements`, starting at index `index`.
/// The first result is the starting index for the next type after this one.
fn from_thrift_helper(
    elements: &[SchemaElement],
    index: usize,
) -> Result<(usize, ParquetType)> {
    // There is only one message type node, at the start of the flat schema.
    let is_root_node = index == 0;

    let element = elements
        .get(index)
        .ok_or_else(|| Error::oos("schema tree points past the flat schema list"))?;
    let name = element.name.clone();
    let converted_type = element.converted_type;
    let field_id = element.field_id;
    match element.num_children {
        // parquet-cpp sometimes sets num_children to 0 for primitive types
        None | Some(0) => {
            let repetition = element
                .repetition_type
                .ok_or_else(|| Error::oos("primitive types require a repetition"))?
                .try_into()?;
            let physical_type = element
                .type_
                .ok_or_else(|| Error::oos("primitive types require a physical type"))?;
            let physical_type =
                PhysicalType::try_from_thrift(physical_type, element.type_length)?;

            let converted_type = match converted_type {
                Some(converted_type) => {
                    let maybe_decimal = match (element.precision, element.scale) {
                        (Some(precision), Some(scale)) => Some((precision, scale)),
                        (None, None) => None,
                        _ => {
                            return Err(Error::oos(
                                "when precision or scale are defined, both must be defined",
                            ))
                        }
                    };
                    Some(converted_to_primitive_converted(
                        converted_type,
                        maybe_decimal,
                    )?)
                }
                None => None,
            };

            let type_ = ParquetType::try_from_primitive(
                name,
                physical_type,
                repetition,
                converted_type,
                field_id,
            )?;

            Ok((index + 1, type_))
        }
        Some(n) => {
            if n < 0 {
                return Err(Error::oos(format!("negative num_children {}", n)));
            }
            let repetition = element
                .repetition_type
                .map(|repetition| repetition.try_into())
                .transpose()?;
            let mut fields = vec![];
            let mut next_index = index + 1;
            for _ in 0..n {
                let (index, child) = from_thrift_helper(elements, next_index)?;
                next_index = index;
                fields.push(child);
            }

            let type_ = if is_root_node {
                ParquetType::new_root(name, fields)
            } else {
                let converted_type = converted_type
                    .map(converted_to_group_converted)
                    .transpose()?;
                ParquetType::from_converted(name, fields, repetition, converted_type, field_id)
            };
            Ok((next_index, type_))
        }
    }
}
