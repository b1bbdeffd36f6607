//! Repositories against an on-disk SQLite database.

use std::sync::Arc;

use chrono::NaiveDate;
use diesel::prelude::*;
use mismetas_core::goals::{
    GoalRecord, GoalRepositoryTrait, GoalService, GoalServiceTrait, GoalStatus, GoalUpdate,
    NewGoal, NewTask, TaskStatus,
};
use mismetas_core::users::{NewUser, UserRepositoryTrait};
use mismetas_core::errors::DatabaseError;
use mismetas_core::Error;
use mismetas_storage_sqlite::schema::tasks;
use mismetas_storage_sqlite::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbPool, GoalRepository, UserRepository,
};
use tempfile::TempDir;

struct TestDb {
    pool: Arc<DbPool>,
    goals: Arc<GoalRepository>,
    users: UserRepository,
    _temp_dir: TempDir,
}

fn setup() -> TestDb {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("nested").join("test.db");
    let db_path = init(&db_path.to_string_lossy()).expect("Failed to init database");

    let pool = create_pool(&db_path).expect("Failed to create pool");
    run_migrations(&pool).expect("Failed to run migrations");
    let writer = spawn_writer((*pool).clone());

    TestDb {
        goals: Arc::new(GoalRepository::new(pool.clone(), writer.clone())),
        users: UserRepository::new(pool.clone(), writer),
        pool,
        _temp_dir: temp_dir,
    }
}

async fn create_user(db: &TestDb, email: &str) -> String {
    db.users
        .insert_user(NewUser {
            name: "Ana".to_string(),
            email: email.to_string(),
            image: None,
            password_hash: Some("$argon2id$stub".to_string()),
        })
        .await
        .expect("insert user")
        .id
}

fn record(user_id: &str, title: &str, tasks: &[(&str, TaskStatus)]) -> GoalRecord {
    GoalRecord {
        user_id: user_id.to_string(),
        title: title.to_string(),
        description: String::new(),
        target: 12,
        target_date: NaiveDate::from_ymd_opt(2024, 12, 31)
            .unwrap()
            .and_hms_opt(23, 59, 59),
        is_habit: false,
        tasks: tasks
            .iter()
            .map(|(t, status)| NewTask {
                title: t.to_string(),
                status: *status,
            })
            .collect(),
    }
}

#[tokio::test]
async fn users_are_found_by_email_and_id() {
    let db = setup();
    let id = create_user(&db, "ana@example.com").await;

    let by_email = db.users.find_by_email("ana@example.com").unwrap().unwrap();
    assert_eq!(by_email.id, id);
    assert_eq!(by_email.password_hash.as_deref(), Some("$argon2id$stub"));
    assert!(db.users.find_by_id(&id).unwrap().is_some());
    assert!(db.users.find_by_email("nobody@example.com").unwrap().is_none());
}

#[tokio::test]
async fn duplicate_email_is_a_unique_violation() {
    let db = setup();
    create_user(&db, "ana@example.com").await;

    let err = db
        .users
        .insert_user(NewUser {
            name: "Other".to_string(),
            email: "ana@example.com".to_string(),
            image: None,
            password_hash: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Database(DatabaseError::UniqueViolation(_))
    ));
}

#[tokio::test]
async fn goal_is_stored_with_tasks_in_plan_order() {
    let db = setup();
    let user = create_user(&db, "ana@example.com").await;

    let created = db
        .goals
        .insert_goal_with_tasks(record(
            &user,
            "Read 12 books",
            &[
                ("Pick a book", TaskStatus::Accepted),
                ("Join a club", TaskStatus::Suggested),
                ("Read daily", TaskStatus::Accepted),
            ],
        ))
        .await
        .unwrap();

    assert_eq!(created.goal.progress, 0);
    assert_eq!(created.goal.status, GoalStatus::InProgress);
    let titles: Vec<&str> = created.tasks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Pick a book", "Join a club", "Read daily"]);
    assert_eq!(created.tasks[1].status, TaskStatus::Suggested);
    assert!(created.tasks.iter().all(|t| !t.completed));

    let reloaded = db.goals.find_goal(&user, &created.goal.id).unwrap().unwrap();
    assert_eq!(reloaded, created.goal);
    assert_eq!(db.goals.load_tasks(&created.goal.id).unwrap(), created.tasks);
}

#[tokio::test]
async fn lookups_are_scoped_to_the_owner() {
    let db = setup();
    let owner = create_user(&db, "owner@example.com").await;
    let other = create_user(&db, "other@example.com").await;
    let goal = db
        .goals
        .insert_goal_with_tasks(record(&owner, "Run 5k", &[("Jog", TaskStatus::Accepted)]))
        .await
        .unwrap()
        .goal;

    assert!(db.goals.find_goal(&other, &goal.id).unwrap().is_none());
    assert!(db.goals.load_goals_for_user(&other).unwrap().is_empty());
    assert_eq!(
        db.goals
            .delete_goal(other.clone(), goal.id.clone())
            .await
            .unwrap(),
        0
    );

    let mut foreign = goal.clone();
    foreign.user_id = other;
    foreign.title = "Hijacked".to_string();
    assert!(matches!(
        db.goals.update_goal(foreign).await,
        Err(Error::NotFound(_))
    ));
    assert_eq!(
        db.goals.find_goal(&owner, &goal.id).unwrap().unwrap().title,
        "Run 5k"
    );
}

#[tokio::test]
async fn most_recently_updated_goal_comes_first() {
    let db = setup();
    let user = create_user(&db, "ana@example.com").await;
    let first = db
        .goals
        .insert_goal_with_tasks(record(&user, "First", &[("a", TaskStatus::Accepted)]))
        .await
        .unwrap()
        .goal;
    db.goals
        .insert_goal_with_tasks(record(&user, "Second", &[("b", TaskStatus::Accepted)]))
        .await
        .unwrap();

    let mut bumped = first.clone();
    bumped.progress = 3;
    db.goals.update_goal(bumped).await.unwrap();

    let titles: Vec<String> = db
        .goals
        .load_goals_for_user(&user)
        .unwrap()
        .into_iter()
        .map(|g| g.title)
        .collect();
    assert_eq!(titles, vec!["First".to_string(), "Second".to_string()]);
}

#[tokio::test]
async fn deleting_a_goal_removes_its_tasks() {
    let db = setup();
    let user = create_user(&db, "ana@example.com").await;
    let created = db
        .goals
        .insert_goal_with_tasks(record(
            &user,
            "Learn Spanish",
            &[("Install app", TaskStatus::Accepted), ("Find tutor", TaskStatus::Suggested)],
        ))
        .await
        .unwrap();

    let deleted = db
        .goals
        .delete_goal(user.clone(), created.goal.id.clone())
        .await
        .unwrap();
    assert_eq!(deleted, 1);
    assert!(db.goals.load_tasks(&created.goal.id).unwrap().is_empty());

    let mut conn = get_connection(&db.pool).unwrap();
    let remaining: i64 = tasks::table
        .count()
        .get_result(&mut conn)
        .unwrap();
    assert_eq!(remaining, 0);
}

#[tokio::test]
async fn service_flow_over_sqlite() {
    let db = setup();
    let user = create_user(&db, "ana@example.com").await;
    let service = GoalService::new(db.goals.clone());

    let created = service
        .create_goal(
            &user,
            NewGoal {
                title: "  Meditate daily ".to_string(),
                description: None,
                target: 10,
                target_date: None,
                is_habit: true,
                tasks: vec![NewTask {
                    title: "Sit for 2 minutes".to_string(),
                    status: TaskStatus::Suggested,
                }],
            },
        )
        .await
        .unwrap();
    let goal_id = created.goal.id.clone();
    let task_id = created.tasks[0].id.clone();
    assert_eq!(created.goal.title, "Meditate daily");
    assert!(created.goal.is_habit);
    assert_eq!(created.goal.target_date, None);

    let done = service.update_goal_progress(&user, &goal_id, 25).await.unwrap();
    assert_eq!(done.progress, 10);
    assert_eq!(done.status, GoalStatus::Completed);

    let updated = service
        .update_goal(
            &user,
            &goal_id,
            GoalUpdate {
                title: "Meditate every day".to_string(),
                description: Some("Mornings".to_string()),
                target: 20,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.status, GoalStatus::InProgress);
    assert_eq!(updated.description, "Mornings");

    let toggled = service.toggle_task(&user, &goal_id, &task_id).await.unwrap();
    assert!(toggled.completed);
    let accepted = service.accept_task(&user, &goal_id, &task_id).await.unwrap();
    assert_eq!(accepted.status, TaskStatus::Accepted);
    assert!(accepted.completed);

    let summary = service.get_dashboard_summary(&user).unwrap();
    assert_eq!(summary.active_goals, 1);
    assert_eq!(summary.overall_progress, 50);

    service.delete_goal(&user, &goal_id).await.unwrap();
    assert!(matches!(
        service.get_goal(&user, &goal_id),
        Err(Error::NotFound(_))
    ));
}
