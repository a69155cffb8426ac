use pretty_assertions::assert_eq;
use tantalim::{driver::Response, Db, Error, Model, ModelDef, Row, RowState, Value};
use tests::{fixtures, row, ExecLog, MockDriver};

async fn setup(driver: MockDriver) -> (Db, Model, ExecLog) {
    tests::init_tracing();

    let log = driver.log();
    let db = Db::builder()
        .table_provider(fixtures::tables())
        .build(driver);
    let model = db.compile(&fixtures::person()).await.unwrap();

    (db, model, log)
}

fn with_id(mut row: Row, id: impl Into<Value>) -> Row {
    row.id = Some(id.into());
    row
}

fn with_children(mut row: Row, model: &str, children: Vec<Row>) -> Row {
    row.children.insert(model.to_string(), children);
    row
}

/// `Person` with a `Child` model whose fields omit the child table's key.
fn keyless_children() -> ModelDef {
    serde_json::from_value(serde_json::json!({
        "name": "Person",
        "basisTable": "Person",
        "fields": [
            {"name": "PersonID", "basisColumn": "PersonID", "updateable": false},
            {"name": "Name", "basisColumn": "Name"}
        ],
        "children": [{
            "name": "Child",
            "basisTable": "Child",
            "fields": [
                {"name": "PersonID", "basisColumn": "PersonID"},
                {"name": "Name", "basisColumn": "Name"}
            ],
            "parentLink": {"parentField": "PersonID", "childField": "PersonID"}
        }]
    }))
    .unwrap()
}

fn boom() -> Error {
    Error::driver(std::io::Error::other("boom"))
}

#[tokio::test]
async fn insert_assigns_the_generated_key_to_children() {
    let driver = MockDriver::new()
        .on("INSERT INTO `person`", Response::inserted(1, 5))
        .on("INSERT INTO `child`", Response::inserted(1, 11));
    let (db, model, log) = setup(driver).await;

    let toy = row(Some(RowState::Inserted), &[("Name", Value::from("Kite"))]);
    let kid = with_children(
        row(Some(RowState::Inserted), &[("Name", Value::from("Kid"))]),
        "Toy",
        vec![toy],
    );
    let ada = with_children(
        row(
            Some(RowState::Inserted),
            &[("Name", Value::from("Ada")), ("Active", Value::Bool(true))],
        ),
        "Child",
        vec![kid],
    );

    let saved = db.save(&model, vec![ada]).await.unwrap();

    assert_eq!(
        log.sql(),
        [
            "INSERT INTO `person` (`name`, `active`, `created`, `updated`) \
             VALUES ('Ada', TRUE, NOW(), NOW())",
            "INSERT INTO `child` (`person_id`, `name`) VALUES (5, 'Kid')",
            "INSERT INTO `toy` (`child_id`, `name`) VALUES (11, 'Kite')",
        ]
    );

    let ada = &saved[0];
    assert_eq!(ada.state, None);
    assert_eq!(ada.id, Some(Value::I64(5)));
    assert_eq!(ada.get("PersonID"), &Value::I64(5));

    let kid = &ada.children["Child"][0];
    assert_eq!(kid.state, None);
    assert_eq!(kid.id, Some(Value::I64(11)));
    assert_eq!(kid.get("PersonID"), &Value::I64(5));
    assert_eq!(kid.foreign_key, Some(Value::I64(5)));

    let toy = &kid.children["Toy"][0];
    assert_eq!(toy.get("ChildID"), &Value::I64(11));
    assert_eq!(toy.foreign_key, Some(Value::I64(11)));
}

#[tokio::test]
async fn guid_keys_come_from_the_temp_id() {
    let (db, model, log) = setup(MockDriver::new()).await;

    let mut note = row(Some(RowState::Inserted), &[("Body", Value::from("hi"))]);
    note.temp_id = Some(Value::from("n-1"));

    let person = with_children(
        with_id(
            row(None, &[("PersonID", Value::I64(5))]),
            Value::I64(5),
        ),
        "Note",
        vec![note],
    );

    let saved = db.save(&model, vec![person]).await.unwrap();

    assert_eq!(
        log.sql(),
        ["INSERT INTO `note` (`id`, `body`) VALUES ('n-1', 'hi')"]
    );

    let note = &saved[0].children["Note"][0];
    assert_eq!(note.id, Some(Value::from("n-1")));
    assert_eq!(note.get("NoteID"), &Value::from("n-1"));
    assert_eq!(note.state, None);
}

#[tokio::test]
async fn update_writes_present_fields_by_key() {
    let (db, model, log) = setup(MockDriver::new()).await;

    let bo = with_id(
        row(
            Some(RowState::Updated),
            &[("PersonID", Value::I64(5)), ("Name", Value::from("Bo"))],
        ),
        5,
    );

    let saved = db.save(&model, vec![bo]).await.unwrap();

    assert_eq!(
        log.sql(),
        ["UPDATE `person` SET `name` = 'Bo', `updated` = NOW() WHERE `id` = 5"]
    );
    assert_eq!(saved[0].state, None);
}

#[tokio::test]
async fn children_of_unchanged_parents_are_saved() {
    let (db, model, log) = setup(MockDriver::new()).await;

    let ann = with_id(
        row(
            Some(RowState::Updated),
            &[
                ("ChildID", Value::I64(10)),
                ("PersonID", Value::I64(1)),
                ("Name", Value::from("Ann")),
            ],
        ),
        10,
    );
    let ada = with_children(with_id(row(None, &[]), 1), "Child", vec![ann]);

    db.save(&model, vec![ada]).await.unwrap();

    assert_eq!(
        log.sql(),
        ["UPDATE `child` SET `person_id` = 1, `name` = 'Ann' WHERE `id` = 10"]
    );
}

#[tokio::test]
async fn delete_removes_children_first() {
    let (db, model, log) = setup(MockDriver::new()).await;

    let toy = with_id(row(None, &[]), 9);
    let kid = with_children(with_id(row(None, &[]), 3), "Toy", vec![toy]);
    let note = with_id(row(Some(RowState::Updated), &[]), "n-1");

    let ada = with_id(row(Some(RowState::Deleted), &[]), 7);
    let ada = with_children(ada, "Child", vec![kid]);
    let ada = with_children(ada, "Note", vec![note]);

    let saved = db.save(&model, vec![ada]).await.unwrap();

    assert_eq!(
        log.sql(),
        [
            "DELETE FROM `toy` WHERE `id` = 9",
            "DELETE FROM `child` WHERE `id` = 3",
            "DELETE FROM `note` WHERE `id` = 'n-1'",
            "DELETE FROM `person` WHERE `id` = 7",
        ]
    );

    assert_eq!(saved[0].state, None);
    assert_eq!(saved[0].children["Note"][0].state, None);
}

#[tokio::test]
async fn delete_must_touch_exactly_one_row() {
    let driver = MockDriver::new().on("DELETE FROM `person`", Response::count(0));
    let (db, model, _log) = setup(driver).await;

    let ghost = with_id(row(Some(RowState::Deleted), &[]), 7);
    let err = db.save(&model, vec![ghost]).await.unwrap_err();

    assert!(err.is_save_failed(), "{err}");
    assert!(err.root().is_invalid_record_count(), "{err}");
}

#[tokio::test]
async fn failed_child_delete_keeps_the_parent() {
    let driver = MockDriver::new().on("DELETE FROM `child`", Response::count(2));
    let (db, model, log) = setup(driver).await;

    let kid = with_id(row(None, &[]), 3);
    let ada = with_children(with_id(row(Some(RowState::Deleted), &[]), 7), "Child", vec![kid]);

    let err = db.save(&model, vec![ada]).await.unwrap_err();

    assert!(err.root().is_invalid_record_count(), "{err}");
    assert_eq!(log.count("DELETE FROM `person`"), 0);
}

#[tokio::test]
async fn one_failing_row_does_not_stop_its_siblings() {
    let driver = MockDriver::new().fail("'boom'", boom());
    let (db, model, log) = setup(driver).await;

    let rows = ["Ann", "boom", "Cy"]
        .into_iter()
        .enumerate()
        .map(|(i, name)| {
            let id = i as i64 + 1;
            with_id(
                row(Some(RowState::Updated), &[("Name", Value::from(name))]),
                id,
            )
        })
        .collect();

    let err = db.save(&model, rows).await.unwrap_err();

    assert!(err.is_save_failed(), "{err}");
    assert!(err.root().is_driver(), "{err}");

    let message = err.to_string();
    assert!(message.contains("failed for 1 of 3 rows"), "{message}");
    assert!(message.contains("id=2"), "{message}");

    assert_eq!(log.count("UPDATE `person`"), 3);
}

#[tokio::test]
async fn failed_parent_insert_skips_its_children() {
    let driver = MockDriver::new().fail("INSERT INTO `person`", boom());
    let (db, model, log) = setup(driver).await;

    let kid = row(Some(RowState::Inserted), &[("Name", Value::from("Kid"))]);
    let ada = with_children(
        row(Some(RowState::Inserted), &[("Name", Value::from("Ada"))]),
        "Child",
        vec![kid],
    );

    let err = db.save(&model, vec![ada]).await.unwrap_err();

    assert!(err.is_save_failed(), "{err}");
    assert_eq!(log.count("INSERT INTO `child`"), 0);
}

#[tokio::test]
async fn update_without_an_id_is_a_missing_key() {
    let (db, model, log) = setup(MockDriver::new()).await;

    let anon = row(Some(RowState::Updated), &[("Name", Value::from("Anon"))]);
    let err = db.save(&model, vec![anon]).await.unwrap_err();

    assert!(err.is_save_failed(), "{err}");
    assert!(err.root().is_missing_key(), "{err}");
    assert!(log.is_empty());
}

#[tokio::test]
async fn model_without_an_instance_key_cannot_be_saved() {
    let (db, _model, log) = setup(MockDriver::new()).await;

    let model = db
        .compile(&fixtures::simple("People", "Person", &[("Name", "Name")]))
        .await
        .unwrap();

    let err = db
        .save(&model, vec![row(Some(RowState::Inserted), &[])])
        .await
        .unwrap_err();

    assert!(err.is_missing_key(), "{err}");
    assert!(log.is_empty());
}

#[tokio::test]
async fn keyless_children_without_changes_do_not_block_the_parent() {
    let (db, _model, log) = setup(MockDriver::new()).await;
    let model = db.compile(&keyless_children()).await.unwrap();

    let ada = with_id(
        row(Some(RowState::Updated), &[("Name", Value::from("Ada"))]),
        1,
    );
    let ada = with_children(ada, "Child", vec![]);

    let saved = db.save(&model, vec![ada]).await.unwrap();

    assert_eq!(log.sql(), ["UPDATE `person` SET `name` = 'Ada' WHERE `id` = 1"]);
    assert_eq!(saved[0].state, None);
    assert!(saved[0].children["Child"].is_empty());
}

#[tokio::test]
async fn changed_keyless_children_fail_before_any_write() {
    let (db, _model, log) = setup(MockDriver::new()).await;
    let model = db.compile(&keyless_children()).await.unwrap();

    let kid = row(Some(RowState::Updated), &[("Name", Value::from("Kit"))]);
    let ada = with_id(
        row(Some(RowState::Updated), &[("Name", Value::from("Ada"))]),
        1,
    );
    let ada = with_children(ada, "Child", vec![kid]);

    let err = db.save(&model, vec![ada]).await.unwrap_err();

    assert!(err.is_missing_key(), "{err}");
    assert!(log.is_empty());
}

#[tokio::test]
async fn delete_skips_children_that_were_never_inserted() {
    let (db, model, log) = setup(MockDriver::new()).await;

    let draft = row(Some(RowState::Inserted), &[("Name", Value::from("Kit"))]);
    let ada = with_id(row(Some(RowState::Deleted), &[]), 7);
    let ada = with_children(ada, "Child", vec![draft]);

    let saved = db.save(&model, vec![ada]).await.unwrap();

    assert_eq!(log.sql(), ["DELETE FROM `person` WHERE `id` = 7"]);
    assert_eq!(saved[0].state, None);
}

#[tokio::test]
async fn saving_twice_writes_once() {
    let driver = MockDriver::new().on("INSERT INTO `person`", Response::inserted(1, 5));
    let (db, model, mut log) = setup(driver).await;

    let ada = row(Some(RowState::Inserted), &[("Name", Value::from("Ada"))]);

    let saved = db.save(&model, vec![ada]).await.unwrap();
    assert_eq!(log.len(), 1);
    log.clear();

    let again = db.save(&model, saved.clone()).await.unwrap();
    assert!(log.is_empty());
    assert_eq!(again, saved);
}

#[tokio::test]
async fn empty_batches_are_fine() {
    let (db, model, log) = setup(MockDriver::new()).await;

    assert!(db.save(&model, vec![]).await.unwrap().is_empty());
    assert!(log.is_empty());
}
