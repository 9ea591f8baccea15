use crate::error::Error;
use domain::user::NewUser;
use domain::{Id, IntoUpdateMap, UpdateMap, Value};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

/// Longest `name` / `title` the users table can store.
pub const MAX_TEXT_LEN: usize = 255;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateParams {
    /// Optional explicit UUID (generated when omitted)
    #[schema(value_type = Option<sea_orm::prelude::Uuid>)]
    pub id: Option<Id>,
    pub name: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateParams {
    pub name: Option<String>,
    pub title: Option<String>,
    /// The version of the user the client last read
    pub version: i32,
}

fn check_len(field: &str, value: Option<&str>, problems: &mut Vec<serde_json::Value>) {
    if let Some(value) = value {
        let len = value.chars().count();
        if len > MAX_TEXT_LEN {
            problems.push(json!({
                "field": field,
                "message": format!("{field} must be at most {MAX_TEXT_LEN} characters"),
                "length": len,
            }));
        }
    }
}

fn into_result(problems: Vec<serde_json::Value>) -> Result<(), Error> {
    if problems.is_empty() {
        Ok(())
    } else {
        Err(Error::validation(
            "Invalid user fields",
            json!({ "errors": problems }),
        ))
    }
}

impl CreateParams {
    pub fn validate(&self) -> Result<(), Error> {
        let mut problems = Vec::new();
        check_len("name", self.name.as_deref(), &mut problems);
        check_len("title", self.title.as_deref(), &mut problems);
        into_result(problems)
    }
}

impl UpdateParams {
    pub fn validate(&self) -> Result<(), Error> {
        let mut problems = Vec::new();
        check_len("name", self.name.as_deref(), &mut problems);
        check_len("title", self.title.as_deref(), &mut problems);
        into_result(problems)
    }
}

impl From<CreateParams> for NewUser {
    fn from(params: CreateParams) -> Self {
        NewUser {
            id: params.id,
            name: params.name,
            title: params.title,
        }
    }
}

// Only the fields present in the request are written; `version` travels separately
// as the optimistic-locking precondition.
impl IntoUpdateMap for UpdateParams {
    fn into_update_map(self) -> UpdateMap {
        let mut update_map = UpdateMap::new();
        if let Some(name) = self.name {
            update_map.insert(
                "name".to_string(),
                Some(Value::String(Some(Box::new(name)))),
            );
        }
        if let Some(title) = self.title {
            update_map.insert(
                "title".to_string(),
                Some(Value::String(Some(Box::new(title)))),
            );
        }
        update_map
    }
}
