use super::super::Repetition;

/// Common information of both group and primitive fields.
#[derive(Clone, Debug, PartialEq)]
pub struct BasicTypeInfo {
    name: String,
    repetition: Repetition,
    id: Option<i32>,
    is_root: bool,
}

impl BasicTypeInfo {
    pub fn new(name: String, repetition: Repetition, id: Option<i32>, is_root: bool) -> Self {
        Self {
            name,
            repetition,
            id,
            is_root,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn repetition(&self) -> &Repetition {
        &self.repetition
    }

    pub fn id(&self) -> Option<i32> {
        self.id
    }

    pub fn is_root(&self) -> bool {
        self.is_root
    }
}
