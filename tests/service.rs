//! End-to-end behavior of the bundled service.

use std::time::Duration;

use resource_router::config::RouterConfig;
use resource_router::http::{MatchResponse, NotFoundResponse};

mod common;

fn widget_config() -> RouterConfig {
    let mut config = RouterConfig::default();
    config.routes = vec![
        common::route("GET", "/widgets/[id:int]", "handlerA", Some("widget.view")),
        common::route("POST", "/widgets", "handlerB", None),
        common::route("GET", "/widgets", "handlerC", None),
    ];
    config
}

#[tokio::test]
async fn test_method_aware_dispatch() {
    let router = common::start_router(widget_config()).await;
    let client = common::client();

    let res = client.post(router.url("/widgets")).send().await.unwrap();
    let body: MatchResponse = res.json().await.unwrap();
    assert_eq!(body.handler, "handlerB");

    let res = client.get(router.url("/widgets")).send().await.unwrap();
    let body: MatchResponse = res.json().await.unwrap();
    assert_eq!(body.handler, "handlerC");

    let res = client.delete(router.url("/widgets")).send().await.unwrap();
    assert_eq!(res.status(), 404);
    let body: NotFoundResponse = res.json().await.unwrap();
    assert_eq!(body.uri, "/widgets");

    let res = client.get(router.url("/widgets/42")).send().await.unwrap();
    let body: MatchResponse = res.json().await.unwrap();
    assert_eq!(body.handler, "handlerA");
    assert_eq!(body.params.get("id").map(String::as_str), Some("42"));

    router.shutdown.trigger();
}

#[tokio::test]
async fn test_reload_swaps_table_and_rejects_broken_config() {
    let router = common::start_router(widget_config()).await;
    let client = common::client();

    let mut next = RouterConfig::default();
    next.routes = vec![common::route("*", "*", "handlerD", None)];
    router.updates.send(next).unwrap();

    let mut swapped = false;
    for _ in 0..50 {
        let res = client.patch(router.url("/anything/at/all")).send().await.unwrap();
        if res.status().is_success() {
            let body: MatchResponse = res.json().await.unwrap();
            assert_eq!(body.handler, "handlerD");
            swapped = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert!(swapped, "reloaded table was never published");

    // A duplicate name makes the table invalid; the wildcard table must stay.
    let mut broken = RouterConfig::default();
    broken.routes = vec![
        common::route("GET", "/a", "a", Some("same")),
        common::route("GET", "/b", "b", Some("same")),
    ];
    router.updates.send(broken).unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    let res = client.get(router.url("/a")).send().await.unwrap();
    let body: MatchResponse = res.json().await.unwrap();
    assert_eq!(body.handler, "handlerD");

    router.shutdown.trigger();
}

#[tokio::test]
async fn test_shutdown_stops_server() {
    let router = common::start_router(widget_config()).await;
    router.shutdown.trigger();

    let result = tokio::time::timeout(Duration::from_secs(5), router.handle)
        .await
        .expect("server did not stop");
    assert!(result.unwrap().is_ok());
}
