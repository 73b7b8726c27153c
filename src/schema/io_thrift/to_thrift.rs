use crate::format::SchemaElement;

use super::super::types::{
    group_converted_to_thrift, primitive_converted_to_thrift, ParquetType,
};

impl ParquetType {
    /// Flattens the tree back into the depth-first element list of the wire
    /// format. Inverse of [`ParquetType::try_from_thrift`] up to semantics.
    pub fn to_thrift(&self) -> Vec<SchemaElement> {
        let mut elements = vec![];
        to_thrift_helper(self, &mut elements, true);
        elements
    }
}

fn to_thrift_helper(schema: &ParquetType, elements: &mut Vec<SchemaElement>, is_root: bool) {
    match schema {
        ParquetType::PrimitiveType {
            basic_info,
            converted_type,
            physical_type,
        } => {
            let (type_, type_length) = physical_type.to_thrift();
            let (converted_type, maybe_decimal) = match converted_type {
                Some(converted_type) => {
                    let (code, maybe_decimal) = primitive_converted_to_thrift(*converted_type);
                    (Some(code), maybe_decimal)
                }
                None => (None, None),
            };

            elements.push(SchemaElement {
                type_: Some(type_),
                type_length,
                repetition_type: Some((*basic_info.repetition()).into()),
                name: basic_info.name().to_string(),
                num_children: None,
                converted_type,
                scale: maybe_decimal.map(|decimal| decimal.1),
                precision: maybe_decimal.map(|decimal| decimal.0),
                field_id: basic_info.id(),
            });
        }
        ParquetType::GroupType {
            basic_info,
            converted_type,
            fields,
        } => {
            // the root element does not carry a repetition
            let repetition_type = if is_root {
                None
            } else {
                Some((*basic_info.repetition()).into())
            };
            elements.push(SchemaElement {
                type_: None,
                type_length: None,
                repetition_type,
                name: basic_info.name().to_string(),
                num_children: Some(fields.len() as i32),
                converted_type: converted_type.map(group_converted_to_thrift),
                scale: None,
                precision: None,
                field_id: basic_info.id(),
            });

            for field in fields {
                to_thrift_helper(field, elements, false);
            }
        }
    }
}
