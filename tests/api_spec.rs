use speculate2::speculate;

speculate! {
    use axum::http::{header, HeaderValue, StatusCode};
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use taskboard::{api, Database};
    use tempfile::TempDir;

    struct Harness {
        server: TestServer,
        dir: TempDir,
    }

    impl Harness {
        fn db_path(&self) -> std::path::PathBuf {
            self.dir.path().join("db.json")
        }
    }

    fn setup() -> Harness {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let db = Database::open(dir.path().join("db.json"));
        db.initialize().expect("Failed to initialize database");
        let server = TestServer::new(api::create_router(db)).expect("Failed to start test server");
        Harness { server, dir }
    }

    async fn create_project(server: &TestServer, name: &str) -> Value {
        let response = server
            .post("/projects")
            .json(&json!({ "name": name, "description": format!("{name} description") }))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
        response.json::<Value>()
    }

    async fn create_task(server: &TestServer, project_id: u64, title: &str) -> Value {
        let response = server
            .post("/tasks")
            .json(&json!({ "projectId": project_id, "title": title, "description": "d" }))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
        response.json::<Value>()
    }

    describe "projects" {
        it "assigns id 1 to the first project" {
            tokio_test::block_on(async {
                let h = setup();
                let project = create_project(&h.server, "A").await;

                assert_eq!(project["id"], 1);
                assert_eq!(project["name"], "A");
                assert!(project["createdAt"].as_str().unwrap().ends_with('Z'));
            });
        }

        it "returns the created project from GET" {
            tokio_test::block_on(async {
                let h = setup();
                let created = create_project(&h.server, "A").await;

                let response = h.server.get("/projects/1").await;
                assert_eq!(response.status_code(), StatusCode::OK);
                assert_eq!(response.json::<Value>(), created);
            });
        }

        it "rejects a project without a description" {
            tokio_test::block_on(async {
                let h = setup();
                let response = h.server.post("/projects").json(&json!({ "name": "A" })).await;

                assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
                assert_eq!(
                    response.json::<Value>()["error"],
                    "Name and description are required"
                );
            });
        }

        it "returns 404 for an unknown project" {
            tokio_test::block_on(async {
                let h = setup();
                let response = h.server.get("/projects/42").await;

                assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
                assert_eq!(response.json::<Value>()["error"], "Project with ID 42 not found");
            });
        }

        it "rejects a non-numeric id" {
            tokio_test::block_on(async {
                let h = setup();
                let response = h.server.get("/projects/abc").await;

                assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
                assert!(response.json::<Value>()["error"].is_string());
            });
        }

        it "patches only the supplied fields" {
            tokio_test::block_on(async {
                let h = setup();
                let created = create_project(&h.server, "A").await;

                let response = h
                    .server
                    .patch("/projects/1")
                    .json(&json!({ "name": "B", "id": 5, "createdAt": "1999-01-01T00:00:00.000Z" }))
                    .await;
                assert_eq!(response.status_code(), StatusCode::OK);

                let updated = response.json::<Value>();
                assert_eq!(updated["name"], "B");
                assert_eq!(updated["id"], created["id"]);
                assert_eq!(updated["createdAt"], created["createdAt"]);
                assert_eq!(updated["description"], created["description"]);
            });
        }

        it "returns 404 when patching an unknown project" {
            tokio_test::block_on(async {
                let h = setup();
                let before = std::fs::read_to_string(h.db_path()).unwrap();

                let response = h.server.patch("/projects/3").json(&json!({ "name": "x" })).await;
                assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
                assert_eq!(std::fs::read_to_string(h.db_path()).unwrap(), before);
            });
        }

        it "reports a missing project before a missing body" {
            tokio_test::block_on(async {
                let h = setup();
                let response = h.server.patch("/projects/999").await;
                assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
                assert_eq!(response.json::<Value>()["error"], "Project with ID 999 not found");

                create_project(&h.server, "A").await;
                let response = h.server.patch("/projects/1").await;
                assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
            });
        }

        it "filters by a stored status property" {
            tokio_test::block_on(async {
                let h = setup();
                create_project(&h.server, "A").await;
                create_project(&h.server, "B").await;
                h.server
                    .patch("/projects/2")
                    .json(&json!({ "status": "active" }))
                    .await;

                let active = h.server.get("/projects").add_query_param("status", "active").await;
                let active = active.json::<Vec<Value>>();
                assert_eq!(active.len(), 1);
                assert_eq!(active[0]["name"], "B");

                let all = h.server.get("/projects").await.json::<Vec<Value>>();
                assert_eq!(all.len(), 2);
            });
        }

        it "returns 404 when deleting an unknown project" {
            tokio_test::block_on(async {
                let h = setup();
                let response = h.server.delete("/projects/8").await;
                assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
            });
        }
    }

    describe "tasks" {
        it "defaults status and priority" {
            tokio_test::block_on(async {
                let h = setup();
                create_project(&h.server, "A").await;
                let task = create_task(&h.server, 1, "t").await;

                assert_eq!(task["id"], 1);
                assert_eq!(task["projectId"], 1);
                assert_eq!(task["status"], "to_do");
                assert_eq!(task["priority"], "medium");
            });
        }

        it "rejects a task for a missing project" {
            tokio_test::block_on(async {
                let h = setup();
                let before = std::fs::read_to_string(h.db_path()).unwrap();

                let response = h
                    .server
                    .post("/tasks")
                    .json(&json!({ "projectId": 999, "title": "t", "description": "d" }))
                    .await;

                assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
                let error = response.json::<Value>()["error"].as_str().unwrap().to_string();
                assert!(error.contains("999"));
                assert_eq!(std::fs::read_to_string(h.db_path()).unwrap(), before);
            });
        }

        it "rejects a task without a title" {
            tokio_test::block_on(async {
                let h = setup();
                create_project(&h.server, "A").await;
                let response = h
                    .server
                    .post("/tasks")
                    .json(&json!({ "projectId": 1, "description": "d" }))
                    .await;

                assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
                assert_eq!(
                    response.json::<Value>()["error"],
                    "ProjectId, title and description are required"
                );
            });
        }

        it "rejects a malformed body as JSON" {
            tokio_test::block_on(async {
                let h = setup();
                let response = h
                    .server
                    .post("/tasks")
                    .text("{ nope")
                    .content_type("application/json")
                    .await;

                assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
                assert!(response.json::<Value>()["error"].is_string());
            });
        }

        it "lists tasks for one project" {
            tokio_test::block_on(async {
                let h = setup();
                create_project(&h.server, "A").await;
                create_project(&h.server, "B").await;
                create_task(&h.server, 1, "a1").await;
                create_task(&h.server, 2, "b1").await;
                create_task(&h.server, 2, "b2").await;

                let tasks = h
                    .server
                    .get("/tasks")
                    .add_query_param("projectId", 2)
                    .await
                    .json::<Vec<Value>>();
                let titles: Vec<_> = tasks.iter().map(|t| t["title"].clone()).collect();
                assert_eq!(titles, vec![json!("b1"), json!("b2")]);

                let all = h.server.get("/tasks").await.json::<Vec<Value>>();
                assert_eq!(all.len(), 3);
            });
        }

        it "moves a task to another column" {
            tokio_test::block_on(async {
                let h = setup();
                create_project(&h.server, "A").await;
                let created = create_task(&h.server, 1, "t").await;

                let response = h
                    .server
                    .patch("/tasks/1")
                    .json(&json!({ "status": "in_progress", "projectId": 7 }))
                    .await;
                assert_eq!(response.status_code(), StatusCode::OK);

                let updated = response.json::<Value>();
                assert_eq!(updated["status"], "in_progress");
                assert_eq!(updated["projectId"], 1);
                assert_eq!(updated["createdAt"], created["createdAt"]);
                assert_eq!(h.server.get("/tasks/1").await.json::<Value>(), updated);
            });
        }

        it "rejects an unknown status value" {
            tokio_test::block_on(async {
                let h = setup();
                create_project(&h.server, "A").await;
                create_task(&h.server, 1, "t").await;

                let response = h
                    .server
                    .patch("/tasks/1")
                    .json(&json!({ "status": "blocked" }))
                    .await;
                assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
            });
        }

        it "returns 404 for an unknown task" {
            tokio_test::block_on(async {
                let h = setup();
                assert_eq!(h.server.get("/tasks/5").await.status_code(), StatusCode::NOT_FOUND);
                let response = h.server.patch("/tasks/5").json(&json!({ "title": "x" })).await;
                assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
            });
        }

        it "reports a missing task before a missing body" {
            tokio_test::block_on(async {
                let h = setup();
                let response = h.server.patch("/tasks/7").await;
                assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
                assert_eq!(response.json::<Value>()["error"], "Task with ID 7 not found");
            });
        }

        it "deletes a single task" {
            tokio_test::block_on(async {
                let h = setup();
                create_project(&h.server, "A").await;
                create_task(&h.server, 1, "a").await;
                create_task(&h.server, 1, "b").await;

                let response = h.server.delete("/tasks/1").await;
                assert_eq!(response.status_code(), StatusCode::OK);
                assert_eq!(response.json::<Value>()["message"], "Task 1 deleted successfully");

                assert_eq!(h.server.get("/tasks/1").await.status_code(), StatusCode::NOT_FOUND);
                assert_eq!(h.server.get("/tasks/2").await.status_code(), StatusCode::OK);
            });
        }
    }

    describe "project deletion" {
        it "cascades to the project's tasks" {
            tokio_test::block_on(async {
                let h = setup();
                create_project(&h.server, "A").await;
                create_project(&h.server, "B").await;
                create_task(&h.server, 1, "t").await;
                create_task(&h.server, 2, "other").await;

                let response = h.server.delete("/projects/1").await;
                assert_eq!(response.status_code(), StatusCode::OK);
                let body = response.json::<Value>();
                assert_eq!(body["message"], "Project 1 and all its tasks deleted successfully");
                assert_eq!(body["deletedTasks"], 1);

                let orphans = h
                    .server
                    .get("/tasks")
                    .add_query_param("projectId", 1)
                    .await
                    .json::<Vec<Value>>();
                assert!(orphans.is_empty());

                let remaining = h.server.get("/tasks").await.json::<Vec<Value>>();
                assert_eq!(remaining.len(), 1);
                assert_eq!(remaining[0]["projectId"], 2);
                assert_eq!(h.server.get("/projects/1").await.status_code(), StatusCode::NOT_FOUND);
            });
        }
    }

    describe "storage failures" {
        it "answers 500 without leaking the file path" {
            tokio_test::block_on(async {
                let h = setup();
                std::fs::remove_file(h.db_path()).unwrap();

                let response = h.server.get("/tasks").await;
                assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
                let error = response.json::<Value>()["error"].as_str().unwrap().to_string();
                assert!(!error.contains("db.json"));
            });
        }

        it "answers 500 for a corrupt document" {
            tokio_test::block_on(async {
                let h = setup();
                std::fs::write(h.db_path(), "[]").unwrap();

                let response = h
                    .server
                    .post("/projects")
                    .json(&json!({ "name": "A", "description": "d" }))
                    .await;
                assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
            });
        }
    }

    describe "cross-cutting" {
        it "allows any origin" {
            tokio_test::block_on(async {
                let h = setup();
                let response = h
                    .server
                    .get("/projects")
                    .add_header(header::ORIGIN, HeaderValue::from_static("http://localhost:5173"))
                    .await;

                assert_eq!(
                    response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
                    Some(&HeaderValue::from_static("*"))
                );
            });
        }

        it "reports health without touching storage" {
            tokio_test::block_on(async {
                let h = setup();
                std::fs::remove_file(h.db_path()).unwrap();

                let response = h.server.get("/health").await;
                assert_eq!(response.status_code(), StatusCode::OK);
                assert_eq!(response.json::<Value>(), json!({ "status": "ok" }));
            });
        }
    }
}
