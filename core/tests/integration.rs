//! End-to-end runs of the client core against the real catalog server.
//!
//! # Design
//! Starts the server on a random port, with a stub upstream posts endpoint
//! on a second port, then executes every request the core builds over real
//! HTTP using ureq. The view model is driven the way a UI host would drive
//! it: execute what it returns, feed the response back.

use axum::{routing::get, Json, Router};
use catalog_core::{
    ApiError, CatalogClient, CatalogViewModel, DraftForm, HttpMethod, HttpRequest, HttpResponse,
    ItemFilter, LoadState, Notice, RequestKind, UpdateItem,
};
use catalog_server::{AppState, ExternalFeed, ItemStore};

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Status codes are returned as data rather than `Err`, letting the core
/// handle status interpretation.
fn execute(req: HttpRequest) -> HttpResponse {
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

/// Runs `router` on its own thread and returns its address.
fn spawn(router: Router) -> std::net::SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            axum::serve(listener, router).await
        })
        .unwrap();
    });
    addr
}

fn spawn_catalog(store: ItemStore) -> CatalogClient {
    let posts: Vec<serde_json::Value> = (1..=6)
        .map(|id| serde_json::json!({"id": id, "title": format!("post {id}"), "body": "short body"}))
        .collect();
    let upstream = spawn(Router::new().route("/posts", get(move || async move { Json(posts) })));

    let feed = ExternalFeed::new(format!("http://{upstream}/posts"));
    let addr = spawn(catalog_server::app(AppState::new(store, feed)));
    CatalogClient::new(&format!("http://{addr}"))
}

#[test]
fn crud_lifecycle() {
    let client = spawn_catalog(ItemStore::with_demo_items());

    // Seeded listing, then the min-price filter.
    let page = client
        .parse_list_items(execute(client.build_list_items(&ItemFilter::default())))
        .unwrap();
    assert_eq!(page.total, 3);

    let page = client
        .parse_list_items(execute(client.build_list_items(&ItemFilter::min_price(150.0))))
        .unwrap();
    let ids: Vec<u64> = page.items.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![2, 3]);
    assert_eq!(page.total, 2);

    // Create.
    let input = catalog_core::CreateItem {
        name: "Integration".to_string(),
        price: 99.0,
        category: "books".to_string(),
    };
    let created = client
        .parse_create_item(execute(client.build_create_item(&input).unwrap()))
        .unwrap();
    assert_eq!(created.id, 4);
    assert!(created.created_at.is_some());

    // Update price only.
    let update = UpdateItem {
        price: Some(0.0),
        ..Default::default()
    };
    let updated = client
        .parse_update_item(execute(client.build_update_item(4, &update).unwrap()))
        .unwrap();
    assert_eq!(updated.price, 0.0);
    assert_eq!(updated.name, "Integration");
    assert!(updated.updated_at.is_some());

    // Delete, then delete again.
    let removed = client
        .parse_delete_item(execute(client.build_delete_item(4)))
        .unwrap();
    assert_eq!(removed.id, 4);
    let err = client
        .parse_delete_item(execute(client.build_delete_item(4)))
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));

    // Category filter with no match.
    let page = client
        .parse_list_items(execute(client.build_list_items(&ItemFilter::category("toys"))))
        .unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.total, 0);

    // External feed.
    let records = client
        .parse_external_records(execute(client.build_external_records()))
        .unwrap();
    assert_eq!(records.len(), 5);
    assert_eq!(records[0].content, "short body...");
}

#[test]
fn view_model_drives_the_page() {
    let client = spawn_catalog(ItemStore::new());
    let mut vm = CatalogViewModel::new(client);

    for request in vm.mount() {
        let kind = request.kind;
        assert!(vm.on_response(kind, execute(request)).is_none());
    }
    assert_eq!(vm.status(), &LoadState::Loaded);
    assert!(vm.items().is_empty());
    assert_eq!(vm.external_records().len(), 5);

    *vm.draft_mut() = DraftForm {
        name: "Desk".to_string(),
        price: "120".to_string(),
        category: "electronics".to_string(),
    };
    let create = vm.submit_draft().unwrap();
    let refresh = vm.on_response(create.kind, execute(create)).unwrap();
    assert_eq!(refresh.kind, RequestKind::ListItems);
    vm.on_response(refresh.kind, execute(refresh));
    assert_eq!(vm.items().len(), 1);
    assert!(vm.draft().is_empty());
    assert!(matches!(vm.take_notice(), Some(Notice::Success(_))));

    let id = vm.items()[0].id;
    vm.request_delete(id);
    let delete = vm.confirm_delete().unwrap();
    let refresh = vm.on_response(delete.kind, execute(delete)).unwrap();
    vm.on_response(refresh.kind, execute(refresh));
    assert!(vm.items().is_empty());
}
