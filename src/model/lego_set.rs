use serde::{Deserialize, Serialize};

use crate::model::{Theme, ThemeId};

/// Field values of a set row, as written by add and edit.
///
/// `set_num` is an opaque identifier chosen by the caller; no format is
/// imposed on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetData {
    pub set_num: String,
    pub name: String,
    pub year: i32,
    pub num_parts: i32,
    pub theme_id: ThemeId,
    pub img_url: String,
}

/// A set joined with the theme it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegoSet {
    pub set_num: String,
    pub name: String,
    pub year: i32,
    pub num_parts: i32,
    pub theme_id: ThemeId,
    pub img_url: String,
    pub theme: Theme,
}

impl LegoSet {
    pub fn from_parts(data: SetData, theme: Theme) -> Self {
        Self {
            set_num: data.set_num,
            name: data.name,
            year: data.year,
            num_parts: data.num_parts,
            theme_id: data.theme_id,
            img_url: data.img_url,
            theme,
        }
    }

    /// The editable field values of this set, without the joined theme.
    pub fn data(&self) -> SetData {
        SetData {
            set_num: self.set_num.clone(),
            name: self.name.clone(),
            year: self.year,
            num_parts: self.num_parts,
            theme_id: self.theme_id,
            img_url: self.img_url.clone(),
        }
    }
}
