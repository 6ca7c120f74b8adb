use serde_json::{Map, Value};
use taskhub_atoms::comments::Comment;
use taskhub_atoms::folders::Folder;
use taskhub_atoms::lists::List;
use taskhub_atoms::schema::Document;
use taskhub_atoms::spaces::Space;
use taskhub_atoms::tasks::Task;
use taskhub_atoms::users::User;
use taskhub_atoms::workspaces::Workspace;

fn entry<T: Document>(map: &mut Map<String, Value>) {
    map.insert(T::KIND.schema_key().to_string(), T::json_schema());
}

/// Body of `GET /schema`: entity key to its schema description.
pub fn schema_catalogue() -> Value {
    let mut map = Map::new();
    entry::<User>(&mut map);
    entry::<Workspace>(&mut map);
    entry::<Space>(&mut map);
    entry::<Folder>(&mut map);
    entry::<List>(&mut map);
    entry::<Task>(&mut map);
    entry::<Comment>(&mut map);
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use taskhub_atoms::EntityKind;

    #[test]
    fn every_kind_is_published() {
        let catalogue = schema_catalogue();
        for kind in EntityKind::ALL {
            assert!(catalogue.get(kind.schema_key()).is_some(), "{} missing", kind.name());
        }
        assert_eq!(catalogue.as_object().map(|m| m.len()), Some(7));
    }

    #[test]
    fn task_schema_lists_required_fields_and_enums() {
        let catalogue = schema_catalogue();
        let task = &catalogue["task"];
        assert_eq!(task["required"], json!(["title", "list_id"]));
        assert_eq!(task["properties"]["status"]["enum"], json!(["todo", "in_progress", "review", "done"]));
        assert_eq!(task["properties"]["priority"]["default"], "none");
        assert_eq!(catalogue["list"]["title"], "ListModel");
    }
}
