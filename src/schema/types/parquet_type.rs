// see https://github.com/apache/parquet-format/blob/master/LogicalTypes.md
use crate::error::Result;

use super::super::Repetition;
use super::{spec, BasicTypeInfo, GroupConvertedType, PhysicalType, PrimitiveConvertedType};

/// Representation of a parquet type.
/// Used to describe primitive leaf fields and groups, including the
/// top-level schema. The top-level schema is a `GroupType` flagged as root;
/// its repetition is irrelevant.
#[derive(Clone, Debug, PartialEq)]
pub enum ParquetType {
    PrimitiveType {
        basic_info: BasicTypeInfo,
        converted_type: Option<PrimitiveConvertedType>,
        physical_type: PhysicalType,
    },
    GroupType {
        basic_info: BasicTypeInfo,
        converted_type: Option<GroupConvertedType>,
        fields: Vec<ParquetType>,
    },
}

/// Accessors
impl ParquetType {
    pub fn get_basic_info(&self) -> &BasicTypeInfo {
        match self {
            Self::PrimitiveType { basic_info, .. } => basic_info,
            Self::GroupType { basic_info, .. } => basic_info,
        }
    }

    /// Returns this type's field name.
    pub fn name(&self) -> &str {
        self.get_basic_info().name()
    }

    pub fn is_root(&self) -> bool {
        self.get_basic_info().is_root()
    }

    /// The number of schema elements in this subtree, including this one.
    pub fn count(&self) -> usize {
        match self {
            Self::PrimitiveType { .. } => 1,
            Self::GroupType { fields, .. } => {
                1 + fields.iter().map(|field| field.count()).sum::<usize>()
            }
        }
    }
}

/// Constructors
impl ParquetType {
    pub fn new_root(name: String, fields: Vec<ParquetType>) -> Self {
        let basic_info = BasicTypeInfo::new(name, Repetition::Required, None, true);
        ParquetType::GroupType {
            basic_info,
            fields,
            converted_type: None,
        }
    }

    pub fn from_converted(
        name: String,
        fields: Vec<ParquetType>,
        repetition: Option<Repetition>,
        converted_type: Option<GroupConvertedType>,
        id: Option<i32>,
    ) -> Self {
        let basic_info =
            BasicTypeInfo::new(name, repetition.unwrap_or(Repetition::Optional), id, false);
        ParquetType::GroupType {
            basic_info,
            fields,
            converted_type,
        }
    }

    pub fn try_from_primitive(
        name: String,
        physical_type: PhysicalType,
        repetition: Repetition,
        converted_type: Option<PrimitiveConvertedType>,
        id: Option<i32>,
    ) -> Result<Self> {
        spec::check_converted_invariants(&physical_type, &converted_type)?;

        let basic_info = BasicTypeInfo::new(name, repetition, id, false);

        Ok(ParquetType::PrimitiveType {
            basic_info,
            converted_type,
            physical_type,
        })
    }

    pub fn from_physical(name: String, physical_type: PhysicalType) -> Self {
        let basic_info = BasicTypeInfo::new(name, Repetition::Optional, None, false);
        ParquetType::PrimitiveType {
            basic_info,
            converted_type: None,
            physical_type,
        }
    }
}
