//! Concurrent lookups against a live service.

use std::time::{Duration, Instant};

use resource_router::config::RouterConfig;
use resource_router::http::MatchResponse;

mod common;

#[tokio::test]
async fn test_concurrent_matching() {
    let mut config = RouterConfig::default();
    config.routes = vec![
        common::route("GET", "/widgets", "widgets#index", Some("widgets")),
        common::route("GET", "/widgets/[id:int]", "widgets#show", Some("widget.view")),
        common::route("*", "*", "fallback", None),
    ];
    let router = common::start_router(config).await;

    let concurrency = 20;
    let requests_per_task = 25;
    let total_requests = concurrency * requests_per_task;

    let client = common::client();
    let start = Instant::now();

    let mut tasks = Vec::new();
    for task in 0..concurrency {
        let client = client.clone();
        let base = router.url("");
        tasks.push(tokio::spawn(async move {
            let mut latencies = Vec::new();
            for i in 0..requests_per_task {
                let id = task * requests_per_task + i;
                let req_start = Instant::now();
                let res = client
                    .get(format!("{base}/widgets/{id}"))
                    .send()
                    .await
                    .expect("router unreachable");
                assert!(res.status().is_success());
                let body: MatchResponse = res.json().await.unwrap();
                assert_eq!(body.handler, "widgets#show");
                assert_eq!(body.params.get("id"), Some(&id.to_string()));
                latencies.push(req_start.elapsed());
            }
            latencies
        }));
    }

    let mut all_latencies: Vec<Duration> = Vec::new();
    for task in tasks {
        all_latencies.extend(task.await.unwrap());
    }
    assert_eq!(all_latencies.len(), total_requests);

    let duration = start.elapsed();
    all_latencies.sort();
    let p50 = all_latencies[all_latencies.len() / 2];
    let p99 = all_latencies[(all_latencies.len() as f64 * 0.99) as usize];

    println!("\n--- Match Load Results ---");
    println!("Total Requests: {}", total_requests);
    println!("Concurrency:    {}", concurrency);
    println!("Total Duration: {:?}", duration);
    println!(
        "Requests/sec:   {:.2}",
        total_requests as f64 / duration.as_secs_f64()
    );
    println!("P50 Latency:    {:?}", p50);
    println!("P99 Latency:    {:?}", p99);
    println!("--------------------------\n");

    router.shutdown.trigger();
}
