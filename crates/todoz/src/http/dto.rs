use serde::{Deserialize, Serialize};
use todoapp::commands::{ListQuery, StatusFilter};
use todoapp::model::{NewTodo, Priority, Todo, TodoPatch};
use todoapp::validation::{validate_title, TitleError};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTodoRequest {
    pub title: String,
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(default)]
    pub priority: Option<Priority>,
}

impl CreateTodoRequest {
    pub fn into_new_todo(self) -> Result<NewTodo, TitleError> {
        let title = validate_title(&self.title)?;
        Ok(NewTodo::new(title)
            .completed(self.completed.unwrap_or(false))
            .priority(self.priority.unwrap_or_default()))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTodoRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(default)]
    pub priority: Option<Priority>,
}

impl UpdateTodoRequest {
    pub fn into_patch(self) -> Result<TodoPatch, TitleError> {
        Ok(TodoPatch {
            title: self.title.as_deref().map(validate_title).transpose()?,
            completed: self.completed,
            priority: self.priority,
        })
    }
}

/// `?filter=completed|pending&search=term`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub filter: Option<String>,
    pub search: Option<String>,
}

impl ListParams {
    pub fn into_query(self) -> ListQuery {
        ListQuery {
            filter: self.filter.as_deref().and_then(StatusFilter::parse),
            search: self.search,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ClearedResponse {
    pub removed: Vec<Todo>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_defaults_and_trims() {
        let request: CreateTodoRequest = serde_json::from_str(r#"{"title": "  Buy milk "}"#).unwrap();
        let new = request.into_new_todo().unwrap();
        assert_eq!(new.title, "Buy milk");
        assert!(!new.completed);
        assert_eq!(new.priority, Priority::Medium);
    }

    #[test]
    fn create_rejects_blank_title() {
        let request: CreateTodoRequest = serde_json::from_str(r#"{"title": "   "}"#).unwrap();
        assert_eq!(request.into_new_todo(), Err(TitleError::Empty));
    }

    #[test]
    fn unknown_priority_fails_to_parse() {
        let parsed: Result<CreateTodoRequest, _> =
            serde_json::from_str(r#"{"title": "x", "priority": "urgent"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn update_only_sets_present_fields() {
        let request: UpdateTodoRequest = serde_json::from_str(r#"{"completed": true}"#).unwrap();
        let patch = request.into_patch().unwrap();
        assert_eq!(patch, TodoPatch::default().completed(true));
    }

    #[test]
    fn update_validates_title_when_present() {
        let request: UpdateTodoRequest =
            serde_json::from_str(r#"{"title": " \t "}"#).unwrap();
        assert_eq!(request.into_patch(), Err(TitleError::Empty));
    }

    #[test]
    fn other_filter_values_are_ignored() {
        let query = ListParams {
            filter: Some("everything".into()),
            search: None,
        }
        .into_query();
        assert_eq!(query.filter, None);
    }
}
