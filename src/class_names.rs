use serde_derive::{Deserialize, Serialize};
use std::collections::HashMap;

/// Class id to class name table, fixed for a run.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct ClassNames(HashMap<i32, String>);

impl ClassNames {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, class_id: i32) -> Option<&str> {
        self.0.get(&class_id).map(String::as_str)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(i32, S)> for ClassNames {
    fn from_iter<I: IntoIterator<Item = (i32, S)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(id, name)| (id, name.into())).collect())
    }
}

impl From<HashMap<i32, String>> for ClassNames {
    fn from(map: HashMap<i32, String>) -> Self {
        Self(map)
    }
}
