// Benchmark of the logs table pipeline: filtering, sorting and attempt reconstruction.
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hookscope::logs::{TableState, WebhookFilters};
use hookscope::prelude::{LogsQueryParams, Pagination, Sort, WebhookLog};
use hookscope::{build_delivery_attempts, select_page};

fn sample_logs(count: usize) -> Vec<WebhookLog> {
    (0..count)
        .map(|i| {
            let status = if i % 7 == 0 { 500 } else { 200 };
            WebhookLog::new(
                "bench-api",
                format!("req-{i}"),
                format!("2025-06-{:02}T12:{:02}:00.000Z", 1 + i % 28, i % 60),
                status,
            )
            .with_application(format!("app-{}", i % 5), format!("Service {}", i % 5))
            .with_callback_url(format!("https://hooks{}.example.com/events", i % 11))
            .with_response_time((i as u64 * 37) % 3000)
            .with_metric(
                "string_webhook_retry_timeline",
                r#"[{"attempt":1,"timestamp":1718542500000,"status":500},{"attempt":2,"timestamp":1718542505000,"status":200,"duration":240}]"#,
            )
        })
        .collect()
}

fn filter_pipeline_benchmarks(c: &mut Criterion) {
    let logs = sample_logs(5_000);

    c.bench_function("select_page_search_and_sort", |b| {
        let filters = WebhookFilters {
            search_term: "hooks3".into(),
            ..Default::default()
        };
        let sort = Sort::desc("gatewayResponseTime");
        b.iter(|| {
            let page = select_page(
                black_box(&logs),
                &filters,
                Pagination { index: 2, size: 25 },
                Some(&sort),
            );
            black_box(page);
        });
    });

    c.bench_function("select_page_from_query", |b| {
        let params = LogsQueryParams {
            statuses: Some("500".into()),
            timeframe: Some("-1d".into()),
            ..Default::default()
        };
        b.iter(|| {
            let table = TableState::from_query(black_box(&params), 10);
            let page = select_page(&logs, &table.filters, table.pagination, table.sort.as_ref());
            black_box(page);
        });
    });

    c.bench_function("build_delivery_attempts", |b| {
        let log = &logs[0];
        b.iter(|| black_box(build_delivery_attempts(black_box(log))));
    });
}

criterion_group!(benches, filter_pipeline_benchmarks);
criterion_main!(benches);
