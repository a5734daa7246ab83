//! Full CRUD lifecycle against a live server.
//!
//! Starts the server on a random port with an in-memory store, then drives
//! every client operation over real HTTP with ureq.

use todo_core::{ApiError, HttpMethod, HttpResponse, ListQuery, TodoClient, TodoInput};

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Status codes are returned as data so the client does the interpretation.
fn execute(req: todo_core::HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.url).call(),
        (HttpMethod::Delete, _) => agent.delete(&req.url).call(),
        (HttpMethod::Post, Some(body)) => agent
            .post(&req.url)
            .content_type("application/json")
            .send(body.as_bytes()),
        (HttpMethod::Post, None) => agent.post(&req.url).send_empty(),
        (HttpMethod::Put, Some(body)) => agent
            .put(&req.url)
            .content_type("application/json")
            .send(body.as_bytes()),
        (HttpMethod::Put, None) => agent.put(&req.url).send_empty(),
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();
    HttpResponse::new(status, body)
}

fn start_server() -> std::net::SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let config = todo_server::Config {
                page_size: 2,
                ..todo_server::Config::default()
            };
            let store = todo_server::Store::new_in_memory().unwrap();
            let state = todo_server::AppState::new(store, &config).unwrap();
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            todo_server::run(listener, state).await
        })
        .unwrap();
    });

    addr
}

#[test]
fn crud_lifecycle() {
    let client = TodoClient::new(&format!("http://{}", start_server()));
    let all = ListQuery::default().status("all");

    // empty listing
    let req = client.build_list_todos(&all).unwrap();
    let listing = client.parse_list_todos(execute(req)).unwrap();
    assert_eq!(listing.count, 0);

    // create
    let req = client
        .build_create_todo(&TodoInput::new("Integration test"))
        .unwrap();
    let created = client.parse_create_todo(execute(req)).unwrap();
    assert_eq!(created.task_name, "Integration test");
    assert!(created.task_description.is_none());
    assert!(!created.is_completed);
    let id = created.id;

    // duplicate create is a field-level rejection
    let req = client
        .build_create_todo(&TodoInput::new("Integration test"))
        .unwrap();
    match client.parse_create_todo(execute(req)).unwrap_err() {
        ApiError::Validation(errors) => assert_eq!(
            errors.field("task_name"),
            ["todo with this task name already exists."]
        ),
        other => panic!("unexpected error: {other:?}"),
    }

    // get
    let fetched = client.parse_get_todo(execute(client.build_get_todo(id))).unwrap();
    assert_eq!(fetched, created);

    // default listing only shows completed records
    let req = client.build_list_todos(&ListQuery::default()).unwrap();
    assert_eq!(client.parse_list_todos(execute(req)).unwrap().count, 0);

    // update to completed
    let req = client
        .build_update_todo(id, &TodoInput::new("Integration test").completed(true))
        .unwrap();
    let updated = client.parse_update_todo(execute(req)).unwrap();
    assert!(updated.is_completed);

    let req = client.build_list_todos(&ListQuery::default()).unwrap();
    assert_eq!(client.parse_list_todos(execute(req)).unwrap().count, 1);

    // blank update is rejected and changes nothing
    let req = client.build_update_todo(id, &TodoInput::new("")).unwrap();
    assert!(matches!(
        client.parse_update_todo(execute(req)),
        Err(ApiError::Validation(_))
    ));
    let fetched = client.parse_get_todo(execute(client.build_get_todo(id))).unwrap();
    assert_eq!(fetched, updated);

    // delete, then delete again
    client
        .parse_delete_todo(execute(client.build_delete_todo(id)))
        .unwrap();
    let err = client
        .parse_delete_todo(execute(client.build_delete_todo(id)))
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound));
    let err = client
        .parse_get_todo(execute(client.build_get_todo(id)))
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound));
}

#[test]
fn follows_pagination_links() {
    let client = TodoClient::new(&format!("http://{}", start_server()));
    for name in ["Task 1", "Task 2", "Todo 1"] {
        let req = client.build_create_todo(&TodoInput::new(name)).unwrap();
        client.parse_create_todo(execute(req)).unwrap();
    }

    let query = ListQuery::default().status("not-completed").search("t");
    let first = client
        .parse_list_todos(execute(client.build_list_todos(&query).unwrap()))
        .unwrap();
    assert_eq!(first.count, 3);
    assert_eq!(first.results.len(), 2);

    let next = first.next.expect("second page link");
    let second = client
        .parse_list_todos(execute(client.build_follow(&next)))
        .unwrap();
    assert_eq!(second.results.len(), 1);
    assert_eq!(second.results[0].task_name, "Todo 1");
    assert!(second.next.is_none());

    let req = client
        .build_list_todos(&ListQuery::default().status("all").search("task"))
        .unwrap();
    let listing = client.parse_list_todos(execute(req)).unwrap();
    assert_eq!(listing.count, 2);
}
