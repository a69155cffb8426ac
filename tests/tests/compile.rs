use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::{Arc, Mutex};
use tantalim::{
    schema::{ColumnDefault, DataType},
    Db, Model, ModelDef, Result, Table, TableCache, TableProvider, TableSet,
};
use tantalim_core::async_trait;
use tests::{fixtures, MockDriver};

fn db() -> Db {
    Db::builder()
        .table_provider(fixtures::tables())
        .build(MockDriver::new())
}

async fn compile(def: serde_json::Value) -> Result<Model> {
    let def: ModelDef = serde_json::from_value(def).unwrap();
    db().compile(&def).await
}

/// Records every table name it is asked for.
#[derive(Debug)]
struct Recording {
    tables: TableSet,
    requests: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl TableProvider for Recording {
    async fn table(&self, name: &str) -> Result<Table> {
        self.requests.lock().unwrap().push(name.to_string());
        self.tables.table(name).await
    }
}

#[tokio::test]
async fn compiles_the_person_tree() {
    tests::init_tracing();

    let model = db().compile(&fixtures::person()).await.unwrap();

    assert_eq!(model.name, "Person");
    assert_eq!(model.basis_table.storage_name, "person");
    assert_eq!(model.instance_key().unwrap().name, "PersonID");

    let [status] = &model.steps[..] else {
        panic!("expected one step; got {:#?}", model.steps)
    };
    assert_eq!(status.index, 1);
    assert_eq!(status.join.table.storage_name, "status");

    let label = model.field("StatusLabel").unwrap();
    assert_eq!(label.step, 1);
    assert_eq!(label.storage_name(), Some("label"));

    assert_eq!(
        model.field("CreatedDate").unwrap().column_default,
        Some(ColumnDefault::CreatedDate)
    );
    assert_eq!(
        model.field("Active").unwrap().data_type,
        Some(DataType::Boolean)
    );
    assert!(model.field("Name").unwrap().required);

    let children: Vec<_> = model.children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(children, ["Child", "Note"]);

    let note = model.child("Note").unwrap();
    let link = note.parent_link.as_ref().unwrap();
    assert_eq!(link.parent_field, "PersonID");
    assert_eq!(link.child_field, "PersonID");
    assert_eq!(
        note.field("NoteID").unwrap().column_default,
        Some(ColumnDefault::Guid)
    );

    let toy = model.child("Child").unwrap().child("Toy").unwrap();
    assert_eq!(toy.instance_key().unwrap().name, "ToyID");
}

#[tokio::test]
async fn fetches_tables_in_waves() {
    let requests = Arc::new(Mutex::new(vec![]));
    let cache = Arc::new(TableCache::new());

    let db = Db::builder()
        .table_cache(cache.clone())
        .table_provider(Recording {
            tables: fixtures::tables(),
            requests: requests.clone(),
        })
        .build(MockDriver::new());

    let def: ModelDef = serde_json::from_value(json!({
        "name": "Person",
        "basisTable": "Person",
        "steps": [
            {"name": "Status", "join": "PersonStatus", "required": true},
            {"name": "Group", "join": "StatusGroup", "previousStep": "Status"}
        ],
        "fields": [
            {"name": "Name", "basisColumn": "Name"},
            {"name": "GroupTitle", "basisColumn": "Title", "step": "Group"}
        ]
    }))
    .unwrap();

    let model = db.compile(&def).await.unwrap();

    // Each table is only discoverable once the table joining to it is cached
    assert_eq!(
        *requests.lock().unwrap(),
        ["Person", "Status", "StatusGroup"]
    );
    assert_eq!(cache.len(), 3);
    assert_eq!(model.field("GroupTitle").unwrap().step, 2);

    // A second compile is served from the cache
    db.compile(&def).await.unwrap();
    assert_eq!(requests.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn fetches_sibling_tables_in_one_wave() {
    let requests = Arc::new(Mutex::new(vec![]));

    let db = Db::builder()
        .table_provider(Recording {
            tables: fixtures::tables(),
            requests: requests.clone(),
        })
        .build(MockDriver::new());

    db.compile(&fixtures::person()).await.unwrap();

    let requests = requests.lock().unwrap();
    assert_eq!(requests.len(), 5);
    assert_eq!(requests[..4], ["Child", "Note", "Person", "Toy"]);
    assert_eq!(requests[4], "Status");
}

#[tokio::test]
async fn preloaded_tables_need_no_provider() {
    let mut builder = Db::builder();
    for name in ["Person", "Status", "Child", "Toy", "Note"] {
        builder.table(fixtures::tables().table(name).await.unwrap());
    }
    let db = builder.build(MockDriver::new());

    let model = db.compile(&fixtures::person()).await.unwrap();
    assert_eq!(model.children.len(), 2);
}

#[tokio::test]
async fn missing_table_without_provider() {
    let db = Db::builder().build(MockDriver::new());

    let err = db.compile(&fixtures::person()).await.unwrap_err();
    assert!(err.is_table_not_found(), "{err}");
}

#[tokio::test]
async fn provider_does_not_know_the_table() {
    let err = compile(json!({"basisTable": "Ghost"})).await.unwrap_err();
    assert!(err.is_table_not_found(), "{err}");
    assert!(err.to_string().contains("Ghost"), "{err}");
}

#[tokio::test]
async fn compiles_from_json_text() {
    let model = db().compile_json(fixtures::PERSON).await.unwrap();
    assert_eq!(model.fields.len(), 6);

    let err = db().compile_json("{ not json").await.unwrap_err();
    assert!(!err.is_invalid_definition());
}

#[tokio::test]
async fn name_defaults_to_the_basis_table() {
    let model = compile(json!({
        "basisTable": "Person",
        "fields": [{"name": "Name", "basisColumn": "Name"}]
    }))
    .await
    .unwrap();

    assert_eq!(model.name, "Person");
}

#[tokio::test]
async fn deprecated_default_key_still_applies() {
    let mut tables = TableSet::new();
    tables.insert(
        serde_json::from_value(json!({
            "name": "Log",
            "dbName": "log",
            "columns": [{"name": "At", "dbName": "at", "default": "CreatedDate"}]
        }))
        .unwrap(),
    );

    let db = Db::builder().table_provider(tables).build(MockDriver::new());
    let model = db
        .compile(&fixtures::simple("Log", "Log", &[("At", "At")]))
        .await
        .unwrap();

    assert_eq!(
        model.field("At").unwrap().column_default,
        Some(ColumnDefault::CreatedDate)
    );
}

#[track_caller]
fn assert_invalid(result: Result<Model>, needle: &str) {
    let err = result.unwrap_err();
    assert!(err.is_invalid_definition(), "{err}");
    assert!(err.to_string().contains(needle), "`{needle}` not in `{err}`");
}

#[tokio::test]
async fn definition_errors() {
    assert_invalid(
        compile(json!({"name": "Nope"})).await,
        "basisTable is required",
    );

    assert_invalid(
        compile(json!({
            "basisTable": "Person",
            "fields": [{"name": "Nick", "basisColumn": "Nickname"}]
        }))
        .await,
        "`Nickname`",
    );

    assert_invalid(
        compile(json!({
            "basisTable": "Person",
            "fields": [{"name": "2Name", "basisColumn": "Name"}]
        }))
        .await,
        "`2Name` is not a valid name",
    );

    assert_invalid(
        compile(json!({
            "basisTable": "Person",
            "fields": [
                {"name": "Name", "basisColumn": "Name"},
                {"name": "Name", "basisColumn": "Active"}
            ]
        }))
        .await,
        "duplicate field `Name`",
    );

    assert_invalid(
        compile(json!({
            "basisTable": "Person",
            "fields": [{"name": "Label", "basisColumn": "Label", "step": "Status"}]
        }))
        .await,
        "unknown step `Status`",
    );
}

#[tokio::test]
async fn step_errors() {
    assert_invalid(
        compile(json!({
            "basisTable": "Person",
            "steps": [{"name": "Mother", "join": "PersonMother"}]
        }))
        .await,
        "join `PersonMother`",
    );

    assert_invalid(
        compile(json!({
            "basisTable": "Person",
            "steps": [{"name": "Status"}]
        }))
        .await,
        "must define a join",
    );

    assert_invalid(
        compile(json!({
            "basisTable": "Person",
            "steps": [{"name": "Group", "join": "StatusGroup", "previousStep": "Status"}]
        }))
        .await,
        "not declared before it",
    );
}

#[tokio::test]
async fn order_by_needs_a_column() {
    assert_invalid(
        compile(json!({
            "basisTable": "Person",
            "fields": [{"name": "Scratch"}],
            "orderBy": [{"fieldName": "Scratch", "direction": "DESC"}]
        }))
        .await,
        "orderBy field `Scratch`",
    );
}

#[tokio::test]
async fn static_filter_is_checked_at_compile_time() {
    let err = compile(json!({
        "basisTable": "Person",
        "fields": [{"name": "Name", "basisColumn": "Name"}],
        "filter": "Name ~ Foo"
    }))
    .await
    .unwrap_err();

    assert!(err.is_invalid_definition(), "{err}");
    assert!(err.root().is_invalid_filter(), "{err}");

    let err = compile(json!({
        "basisTable": "Person",
        "fields": [{"name": "Name", "basisColumn": "Name"}],
        "filter": "Nickname = Foo"
    }))
    .await
    .unwrap_err();

    assert!(err.to_string().contains("unknown field `Nickname`"), "{err}");
}

fn with_child(child: serde_json::Value) -> serde_json::Value {
    json!({
        "basisTable": "Person",
        "fields": [{"name": "PersonID", "basisColumn": "PersonID"}],
        "children": [child]
    })
}

#[tokio::test]
async fn child_link_errors() {
    let child_fields = json!([
        {"name": "ChildID", "basisColumn": "ChildID"},
        {"name": "PersonID", "basisColumn": "PersonID"}
    ]);

    assert_invalid(
        compile(with_child(json!({
            "basisTable": "Child",
            "fields": child_fields
        })))
        .await,
        "must declare a parentLink",
    );

    assert_invalid(
        compile(with_child(json!({
            "basisTable": "Child",
            "fields": child_fields,
            "foreignKeys": [
                {"parentField": "PersonID", "childField": "PersonID"},
                {"parentField": "PersonID", "childField": "ChildID"}
            ]
        })))
        .await,
        "single-column",
    );

    assert_invalid(
        compile(with_child(json!({
            "basisTable": "Child",
            "fields": child_fields,
            "parentLink": {"parentField": "Name", "childField": "PersonID"}
        })))
        .await,
        "parentField `Name`",
    );

    assert_invalid(
        compile(with_child(json!({
            "basisTable": "Child",
            "fields": child_fields,
            "parentLink": {"parentField": "PersonID", "childField": "Parent"}
        })))
        .await,
        "childField `Parent`",
    );

    assert_invalid(
        compile(json!({
            "basisTable": "Person",
            "fields": [{"name": "PersonID", "basisColumn": "PersonID"}],
            "children": [
                {"name": "Kids", "basisTable": "Child", "fields": child_fields,
                 "parentLink": {"parentField": "PersonID", "childField": "PersonID"}},
                {"name": "Kids", "basisTable": "Child", "fields": child_fields,
                 "parentLink": {"parentField": "PersonID", "childField": "PersonID"}}
            ]
        }))
        .await,
        "duplicate child model `Kids`",
    );
}
