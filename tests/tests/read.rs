use pretty_assertions::assert_eq;
use tantalim::{driver::Response, Db, Model, Value};
use tests::{fixtures, record, ExecLog, MockDriver};

async fn setup(driver: MockDriver) -> (Db, Model, ExecLog) {
    tests::init_tracing();

    let log = driver.log();
    let db = Db::builder()
        .table_provider(fixtures::tables())
        .build(driver);
    let model = db.compile(&fixtures::person()).await.unwrap();

    (db, model, log)
}

fn person(id: i64, name: &str, active: Value) -> tantalim::Record {
    record(&[
        ("PersonID", Value::I64(id)),
        ("Name", Value::from(name)),
        ("Active", active),
    ])
}

fn child(id: i64, person_id: i64, name: &str) -> tantalim::Record {
    record(&[
        ("ChildID", Value::I64(id)),
        ("PersonID", Value::I64(person_id)),
        ("Name", Value::from(name)),
    ])
}

#[tokio::test]
async fn top_level_select() {
    let (db, model, log) = setup(MockDriver::new()).await;

    let rows = db.get_data(&model, None, None).await.unwrap();

    assert!(rows.is_empty());
    assert_eq!(
        log.sql(),
        [
            "SELECT t0.`id` AS `PersonID`, t0.`name` AS `Name`, t0.`active` AS `Active`, \
             t1.`label` AS `StatusLabel`, t0.`created` AS `CreatedDate`, \
             t0.`updated` AS `UpdatedDate` \
             FROM `person` AS t0 \
             LEFT JOIN `status` AS t1 ON t1.`code` = t0.`status_code` \
             ORDER BY t0.`name`"
        ]
    );
}

#[tokio::test]
async fn caller_filter_becomes_the_where_clause() {
    let (db, model, log) = setup(MockDriver::new()).await;

    db.get_data(&model, Some("Name BeginsWith A and StatusLabel IN x, y"), None)
        .await
        .unwrap();

    assert!(
        log.find("FROM `person`").contains(
            " WHERE t0.`name` LIKE 'A%' AND t1.`label` IN ('x', 'y') ORDER BY"
        ),
        "{:#?}",
        log.sql()
    );
}

#[tokio::test]
async fn bad_filter_runs_nothing() {
    let (db, model, log) = setup(MockDriver::new()).await;

    let err = db
        .get_data(&model, Some("Nickname = Bob"), None)
        .await
        .unwrap_err();

    assert!(err.is_invalid_filter(), "{err}");
    assert!(log.is_empty());
}

#[tokio::test]
async fn rows_carry_ids_and_strict_booleans() {
    let driver = MockDriver::new().on(
        "FROM `person`",
        Response::values(vec![
            person(1, "Ada", Value::I64(1)),
            person(2, "Bo", Value::I64(0)),
            person(3, "Cy", Value::Null),
            person(4, "Di", Value::from("yes")),
        ]),
    );
    let (db, model, _log) = setup(driver).await;

    let rows = db.get_data(&model, None, None).await.unwrap();

    let active: Vec<_> = rows.iter().map(|row| row.get("Active").clone()).collect();
    assert_eq!(
        active,
        [
            Value::Bool(true),
            Value::Bool(false),
            Value::Bool(false),
            Value::Bool(true)
        ]
    );

    assert_eq!(rows[0].id, Some(Value::I64(1)));
    assert_eq!(rows[0].state, None);
    assert_eq!(rows[0].foreign_key, None);
}

#[tokio::test]
async fn children_are_partitioned_by_parent() {
    let driver = MockDriver::new()
        .on(
            "FROM `person`",
            Response::values(vec![
                person(1, "Ada", Value::I64(1)),
                person(2, "Bo", Value::I64(1)),
                person(3, "Cy", Value::I64(1)),
            ]),
        )
        .on(
            "FROM `child`",
            Response::values(vec![
                child(10, 1, "Ann"),
                child(11, 2, "Ben"),
                child(12, 1, "Cat"),
                child(13, 99, "Orphan"),
            ]),
        );
    let (db, model, log) = setup(driver).await;

    let rows = db.get_data(&model, None, None).await.unwrap();

    let names = |row: &tantalim::Row| -> Vec<Value> {
        row.children["Child"]
            .iter()
            .map(|child| child.get("Name").clone())
            .collect()
    };

    assert_eq!(names(&rows[0]), [Value::from("Ann"), Value::from("Cat")]);
    assert_eq!(names(&rows[1]), [Value::from("Ben")]);
    assert_eq!(names(&rows[2]), Vec::<Value>::new());

    // Every parent gets an entry for every child model, even when empty
    for row in &rows {
        assert!(row.children["Note"].is_empty());
    }

    let ann = &rows[0].children["Child"][0];
    assert_eq!(ann.id, Some(Value::I64(10)));
    assert_eq!(ann.foreign_key, Some(Value::I64(1)));

    assert_eq!(
        log.find("FROM `child`"),
        "SELECT t0.`id` AS `ChildID`, t0.`person_id` AS `PersonID`, t0.`name` AS `Name` \
         FROM `child` AS t0 WHERE t0.`person_id` IN (1, 2, 3)"
    );
    assert_eq!(
        log.find("FROM `note`"),
        "SELECT t0.`id` AS `NoteID`, t0.`person_id` AS `PersonID`, t0.`body` AS `Body` \
         FROM `note` AS t0 WHERE t0.`person_id` IN (1, 2, 3)"
    );
    assert_eq!(
        log.find("FROM `toy`"),
        "SELECT t0.`id` AS `ToyID`, t0.`child_id` AS `ChildID`, t0.`name` AS `Name` \
         FROM `toy` AS t0 WHERE t0.`child_id` IN (10, 11, 12, 13)"
    );
}

#[tokio::test]
async fn grandchildren_are_attached() {
    let driver = MockDriver::new()
        .on(
            "FROM `person`",
            Response::values(vec![person(1, "Ada", Value::I64(1))]),
        )
        .on("FROM `child`", Response::values(vec![child(10, 1, "Ann")]))
        .on(
            "FROM `toy`",
            Response::values(vec![record(&[
                ("ToyID", Value::I64(100)),
                ("ChildID", Value::I64(10)),
                ("Name", Value::from("Kite")),
            ])]),
        );
    let (db, model, _log) = setup(driver).await;

    let rows = db.get_data(&model, None, None).await.unwrap();

    let toys = &rows[0].children["Child"][0].children["Toy"];
    assert_eq!(toys.len(), 1);
    assert_eq!(toys[0].get("Name"), &Value::from("Kite"));
    assert_eq!(toys[0].foreign_key, Some(Value::I64(10)));
}

#[tokio::test]
async fn no_parent_rows_means_no_child_queries() {
    let (db, model, log) = setup(MockDriver::new()).await;

    db.get_data(&model, None, None).await.unwrap();

    assert_eq!(log.len(), 1);
    assert_eq!(log.count("SELECT"), 1);
}

#[tokio::test]
async fn parents_without_keys_skip_the_child_query() {
    let driver = MockDriver::new().on(
        "FROM `person`",
        Response::values(vec![record(&[
            ("PersonID", Value::Null),
            ("Name", Value::from("Ghost")),
        ])]),
    );
    let (db, model, log) = setup(driver).await;

    let rows = db.get_data(&model, None, None).await.unwrap();

    assert_eq!(rows[0].id, None);
    assert!(rows[0].children["Child"].is_empty());
    assert_eq!(log.len(), 1);
}

#[tokio::test]
async fn child_failure_fails_the_read() {
    let driver = MockDriver::new()
        .on(
            "FROM `person`",
            Response::values(vec![person(1, "Ada", Value::I64(1))]),
        )
        .fail(
            "FROM `note`",
            tantalim::Error::driver(std::io::Error::other("connection reset")),
        );
    let (db, model, _log) = setup(driver).await;

    let err = db.get_data(&model, None, None).await.unwrap_err();

    assert!(err.is_driver(), "{err}");
    assert!(err.to_string().contains("connection reset"), "{err}");
}

#[tokio::test]
async fn page_number_applies_the_limit() {
    let (db, _model, log) = setup(MockDriver::new()).await;

    let mut def = fixtures::simple("People", "Person", &[("Name", "Name")]);
    def.limit = Some(25);
    let model = db.compile(&def).await.unwrap();

    db.get_data(&model, None, Some(3)).await.unwrap();
    db.get_data(&model, None, None).await.unwrap();

    assert_eq!(
        log.sql(),
        [
            "SELECT t0.`name` AS `Name` FROM `person` AS t0 LIMIT 25 OFFSET 50",
            "SELECT t0.`name` AS `Name` FROM `person` AS t0 LIMIT 25",
        ]
    );
}

#[tokio::test]
async fn static_filter_is_anded_with_the_caller_filter() {
    let (db, _model, log) = setup(MockDriver::new()).await;

    let mut def = fixtures::simple("Active", "Person", &[("Name", "Name"), ("On", "Active")]);
    def.filter = Some("On = 1".into());
    let model = db.compile(&def).await.unwrap();

    db.get_data(&model, Some("Name EndsWith son"), None)
        .await
        .unwrap();

    assert_eq!(
        log.sql(),
        ["SELECT t0.`name` AS `Name`, t0.`active` AS `On` FROM `person` AS t0 \
          WHERE t0.`active` = '1' AND t0.`name` LIKE '%son'"]
    );
}
