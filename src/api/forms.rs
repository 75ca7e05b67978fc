use serde::{Deserialize, Serialize};

use crate::model::{LegoSet, SetData};

/// Raw add/edit form body. Every field is kept as submitted so a rejected
/// form can be shown again unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetForm {
    pub name: Option<String>,
    pub year: Option<String>,
    pub theme_id: Option<String>,
    pub num_parts: Option<String>,
    pub set_num: Option<String>,
    pub img_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("Invalid numeric value provided")]
    InvalidNumber,
}

impl SetForm {
    /// Pre-fill a form from an existing set.
    pub fn from_set(set: &LegoSet) -> Self {
        Self {
            name: Some(set.name.clone()),
            year: Some(set.year.to_string()),
            theme_id: Some(set.theme_id.to_string()),
            num_parts: Some(set.num_parts.to_string()),
            set_num: Some(set.set_num.clone()),
            img_url: Some(set.img_url.clone()),
        }
    }

    /// Check that every field is present and coerce the numeric ones.
    pub fn validate(&self) -> Result<SetData, FormError> {
        let name = required("name", &self.name)?;
        let year = required("year", &self.year)?;
        let theme_id = required("theme_id", &self.theme_id)?;
        let num_parts = required("num_parts", &self.num_parts)?;
        let set_num = required("set_num", &self.set_num)?;
        let img_url = required("img_url", &self.img_url)?;

        Ok(SetData {
            set_num: set_num.to_string(),
            name: name.to_string(),
            year: number(year)?,
            num_parts: number(num_parts)?,
            theme_id: number(theme_id)?,
            img_url: img_url.to_string(),
        })
    }

    /// The submitted value of a field, or an empty string.
    pub fn value(&self, field: &str) -> &str {
        let value = match field {
            "name" => &self.name,
            "year" => &self.year,
            "theme_id" => &self.theme_id,
            "num_parts" => &self.num_parts,
            "set_num" => &self.set_num,
            "img_url" => &self.img_url,
            _ => return "",
        };
        value.as_deref().unwrap_or_default()
    }
}

fn required<'a>(field: &'static str, value: &'a Option<String>) -> Result<&'a str, FormError> {
    match value.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(FormError::Missing(field)),
    }
}

fn number(value: &str) -> Result<i32, FormError> {
    value.parse().map_err(|_| FormError::InvalidNumber)
}
